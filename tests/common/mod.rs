//! Shared test doubles for the console scenario tests.
//!
//! - `InMemoryLedger`: a stateful fake ledger with a clock, balances,
//!   certificates, policies and a registry, plus per-call failure injection.
//! - `ScriptedInput`: answers prompts from a queue and records every prompt.
//! - `RecordingSink`: keeps every report and failure it was shown.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use alloy::primitives::{Address, TxHash, U256};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;

use metadefender_console::domain::amount::parse_token_amount;
use metadefender_console::domain::{
    CertificateId, CertificateInfo, FeeOverride, GlobalsSnapshot, Market, MarketContracts,
    MarketRegistration, PolicyId, PolicyInfo, RegisteredMarket, Report,
};
use metadefender_console::ports::display::ReportSink;
use metadefender_console::ports::input::InputCollector;
use metadefender_console::ports::ledger::LedgerClient;
use metadefender_console::usecases::Session;

pub const GENESIS_TIME: u64 = 1_700_000_000;

pub fn account(n: u8) -> Address {
    Address::repeat_byte(n)
}

pub fn market(name: &str, seed: u8) -> Market {
    Market::new(
        name,
        MarketContracts {
            defender: Address::repeat_byte(seed),
            certificate: Address::repeat_byte(seed + 1),
            policy: Address::repeat_byte(seed + 2),
        },
    )
}

pub fn session(signers: &[Address]) -> Session {
    session_with_fee(signers, None)
}

/// Session on a network whose transactions carry `fee`.
pub fn session_with_fee(signers: &[Address], fee: Option<FeeOverride>) -> Session {
    Session::new(
        "localhost",
        vec![market("Mining Pool", 0xA0), market("Exchange", 0xB0)],
        0,
        signers[0],
        fee,
    )
    .unwrap()
}

#[derive(Default)]
struct LedgerState {
    now: u64,
    balances: HashMap<Address, U256>,
    certificates: Vec<(Address, CertificateInfo)>,
    policies: Vec<(Address, PolicyInfo)>,
    registry: Vec<RegisteredMarket>,
    tx_count: u64,
    calls: Vec<&'static str>,
}

/// Stateful fake ledger.
pub struct InMemoryLedger {
    signers: Vec<Address>,
    state: Mutex<LedgerState>,
    failing: Mutex<HashSet<&'static str>>,
}

impl InMemoryLedger {
    pub fn new(signers: Vec<Address>) -> Self {
        Self {
            signers,
            state: Mutex::new(LedgerState {
                now: GENESIS_TIME,
                ..Default::default()
            }),
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Make every call named `call` fail from now on.
    pub fn fail(&self, call: &'static str) {
        self.failing.lock().unwrap().insert(call);
    }

    pub fn add_certificate(&self, owner: Address, id: u64, liquidity: U256, is_valid: bool) {
        self.state.lock().unwrap().certificates.push((
            owner,
            CertificateInfo {
                id: U256::from(id),
                liquidity,
                entered_epoch: U256::from(1),
                exited_epoch: U256::ZERO,
                reward_debt: U256::ZERO,
                is_valid,
            },
        ));
    }

    pub fn balance(&self, owner: Address) -> U256 {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(&owner)
            .copied()
            .unwrap_or_default()
    }

    pub fn now(&self) -> u64 {
        self.state.lock().unwrap().now
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn registry(&self) -> Vec<RegisteredMarket> {
        self.state.lock().unwrap().registry.clone()
    }

    fn enter(&self, call: &'static str) -> Result<std::sync::MutexGuard<'_, LedgerState>> {
        if self.failing.lock().unwrap().contains(call) {
            bail!("{call} reverted");
        }
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        Ok(state)
    }

    fn next_tx(state: &mut LedgerState) -> TxHash {
        state.tx_count += 1;
        TxHash::left_padding_from(&state.tx_count.to_be_bytes())
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn signers(&self) -> Result<Vec<Address>> {
        let _state = self.enter("signers")?;
        Ok(self.signers.clone())
    }

    async fn token_balance(&self, owner: Address) -> Result<U256> {
        let state = self.enter("balanceOf")?;
        Ok(state.balances.get(&owner).copied().unwrap_or_default())
    }

    async fn certificates_of(&self, _market: &Market, owner: Address) -> Result<Vec<CertificateId>> {
        let state = self.enter("getLiquidityProviders")?;
        Ok(state
            .certificates
            .iter()
            .filter(|(o, _)| *o == owner)
            .map(|(_, c)| c.id)
            .collect())
    }

    async fn certificate_info(&self, _market: &Market, id: CertificateId) -> Result<CertificateInfo> {
        let state = self.enter("getCertificateInfo")?;
        state
            .certificates
            .iter()
            .find(|(_, c)| c.id == id)
            .map(|(_, c)| c.clone())
            .ok_or_else(|| anyhow!("unknown certificate {id}"))
    }

    async fn policies_of(&self, _market: &Market, owner: Address) -> Result<Vec<PolicyId>> {
        let state = self.enter("getPolicies")?;
        Ok(state
            .policies
            .iter()
            .filter(|(o, _)| *o == owner)
            .map(|(_, p)| p.id)
            .collect())
    }

    async fn policy_info(&self, _market: &Market, id: PolicyId) -> Result<PolicyInfo> {
        let state = self.enter("getPolicyInfo")?;
        state
            .policies
            .iter()
            .find(|(_, p)| p.id == id)
            .map(|(_, p)| p.clone())
            .ok_or_else(|| anyhow!("unknown policy {id}"))
    }

    async fn provide_liquidity(
        &self,
        _market: &Market,
        from: Address,
        amount: U256,
        _fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let mut state = self.enter("certificateProviderEntrance")?;
        let balance = state.balances.entry(from).or_default();
        if *balance < amount {
            bail!("insufficient balance");
        }
        *balance -= amount;
        let id = U256::from(state.certificates.len() + 1);
        state.certificates.push((
            from,
            CertificateInfo {
                id,
                liquidity: amount,
                entered_epoch: U256::from(1),
                exited_epoch: U256::ZERO,
                reward_debt: U256::ZERO,
                is_valid: true,
            },
        ));
        Ok(Self::next_tx(&mut state))
    }

    async fn withdraw_liquidity(
        &self,
        _market: &Market,
        from: Address,
        certificate: CertificateId,
        _immediate: bool,
        _fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let mut state = self.enter("certificateProviderExit")?;
        let (_, cert) = state
            .certificates
            .iter_mut()
            .find(|(o, c)| *o == from && c.id == certificate)
            .ok_or_else(|| anyhow!("not the owner"))?;
        let refund = cert.liquidity;
        cert.is_valid = false;
        cert.liquidity = U256::ZERO;
        *state.balances.entry(from).or_default() += refund;
        Ok(Self::next_tx(&mut state))
    }

    async fn buy_policy(
        &self,
        _market: &Market,
        _from: Address,
        beneficiary: Address,
        coverage: U256,
        duration_days: U256,
        _fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let mut state = self.enter("buyPolicy")?;
        let id = U256::from(state.policies.len() + 1);
        let bought_at = state.now;
        state.policies.push((
            beneficiary,
            PolicyInfo {
                id,
                beneficiary,
                coverage,
                deposit: U256::ZERO,
                duration_days,
                bought_at,
                is_claimed: false,
                is_settled: false,
            },
        ));
        Ok(Self::next_tx(&mut state))
    }

    async fn settle_policy(
        &self,
        _market: &Market,
        _from: Address,
        policy: PolicyId,
        _fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let mut state = self.enter("settlePolicy")?;
        let (_, info) = state
            .policies
            .iter_mut()
            .find(|(_, p)| p.id == policy)
            .ok_or_else(|| anyhow!("unknown policy {policy}"))?;
        info.is_settled = true;
        Ok(Self::next_tx(&mut state))
    }

    async fn claim_rewards(
        &self,
        _market: &Market,
        _from: Address,
        _certificate: CertificateId,
        _fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let mut state = self.enter("claimRewards")?;
        Ok(Self::next_tx(&mut state))
    }

    async fn get_rewards(
        &self,
        _market: &Market,
        _certificate: CertificateId,
        _settle: bool,
    ) -> Result<U256> {
        let _state = self.enter("getRewards")?;
        Ok(U256::ZERO)
    }

    async fn transfer(
        &self,
        from: Address,
        to: Address,
        amount: U256,
        _fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let mut state = self.enter("transfer")?;
        let balance = state.balances.entry(from).or_default();
        if *balance < amount {
            bail!("transfer amount exceeds balance");
        }
        *balance -= amount;
        *state.balances.entry(to).or_default() += amount;
        Ok(Self::next_tx(&mut state))
    }

    async fn mint_test_token(&self, _from: Address, to: Address, amount: U256) -> Result<TxHash> {
        let mut state = self.enter("mint")?;
        *state.balances.entry(to).or_default() += amount;
        Ok(Self::next_tx(&mut state))
    }

    async fn approve(
        &self,
        _from: Address,
        _spender: Address,
        _amount: U256,
        _fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let mut state = self.enter("approve")?;
        Ok(Self::next_tx(&mut state))
    }

    async fn premium(&self, _market: &Market, coverage: &str, duration_days: &str) -> Result<U256> {
        let _state = self.enter("getPremium")?;
        let coverage = parse_token_amount("coverage", coverage)?;
        let days: U256 = duration_days.trim().parse()?;
        Ok(coverage * days / U256::from(365))
    }

    async fn globals(&self) -> Result<GlobalsSnapshot> {
        let state = self.enter("getGlobals")?;
        let total_liquidity = state
            .certificates
            .iter()
            .fold(U256::ZERO, |acc, (_, c)| acc + c.liquidity);
        Ok(GlobalsSnapshot {
            total_liquidity,
            total_coverage: U256::ZERO,
            free_capital: total_liquidity,
            reward_per_share: U256::ZERO,
            current_epoch: U256::from(1),
        })
    }

    async fn insurance_markets(&self) -> Result<Vec<RegisteredMarket>> {
        let state = self.enter("getInsuranceMarkets")?;
        Ok(state.registry.clone())
    }

    async fn add_market(
        &self,
        _from: Address,
        registration: &MarketRegistration,
        _fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let mut state = self.enter("registerMarket")?;
        state.registry.push(RegisteredMarket {
            id: registration.contracts.defender,
            name: registration.name.clone(),
        });
        Ok(Self::next_tx(&mut state))
    }

    async fn remove_market(
        &self,
        _from: Address,
        id: Address,
        _fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let mut state = self.enter("removeMarket")?;
        state.registry.retain(|m| m.id != id);
        Ok(Self::next_tx(&mut state))
    }

    async fn current_time(&self) -> Result<u64> {
        let state = self.enter("getBlock")?;
        Ok(state.now)
    }

    async fn advance_time(&self, seconds: u64) -> Result<()> {
        let mut state = self.enter("evm_increaseTime")?;
        state.now += seconds;
        Ok(())
    }
}

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum Answer {
    /// Free text.
    Text(String),
    /// Pick the entry with this exact label.
    Label(String),
    /// Pick by position.
    Index(usize),
}

pub fn text(s: &str) -> Answer {
    Answer::Text(s.to_string())
}

pub fn pick(label: &str) -> Answer {
    Answer::Label(label.to_string())
}

/// Answers prompts in order and records what it was asked.
#[derive(Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<Answer>>,
    prompts: Mutex<Vec<String>>,
    offered: Mutex<Vec<Vec<String>>>,
}

impl ScriptedInput {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Every prompt message, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Choice lists offered by `select`, in order.
    pub fn offered(&self) -> Vec<Vec<String>> {
        self.offered.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn next(&self, message: &str) -> Result<Answer> {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer for {message:?}"))
    }
}

#[async_trait]
impl InputCollector for ScriptedInput {
    async fn text(&self, message: &str) -> Result<String> {
        match self.next(message)? {
            Answer::Text(s) => Ok(s),
            other => bail!("expected text answer for {message:?}, scripted {other:?}"),
        }
    }

    async fn select(&self, message: &str, choices: &[String]) -> Result<usize> {
        self.offered.lock().unwrap().push(choices.to_vec());
        match self.next(message)? {
            Answer::Index(i) => Ok(i),
            Answer::Label(label) => choices
                .iter()
                .position(|c| *c == label)
                .ok_or_else(|| anyhow!("{label:?} not offered for {message:?}")),
            Answer::Text(s) => bail!("expected selection for {message:?}, scripted text {s:?}"),
        }
    }
}

/// Records everything the dispatcher shows.
#[derive(Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<Report>>,
    failures: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<(String, String)> {
        self.failures.lock().unwrap().clone()
    }
}

impl ReportSink for RecordingSink {
    fn show(&self, report: &Report) {
        self.reports.lock().unwrap().push(report.clone());
    }

    fn show_failure(&self, operation: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .push((operation.to_string(), message.to_string()));
    }
}
