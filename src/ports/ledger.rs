//! Ledger Client Port - MetaDefender Contract Interface
//!
//! Defines the trait the console uses to reach the remote ledger:
//! the MetaDefender market contracts, the quote token, the markets
//! registry and the globals viewer. Market-scoped calls take the
//! `Market` whose contract set they target; mutating calls take the
//! signing account and the optional fee override.

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::domain::{
  CertificateId, CertificateInfo, FeeOverride, GlobalsSnapshot, Market, MarketRegistration,
  PolicyId, PolicyInfo, RegisteredMarket,
};

/// Trait for ledger access.
///
/// Implementors resolve each method to one contract call (or one node
/// RPC for the clock methods). Failures carry the client's message and
/// are surfaced to the operator unchanged; nothing is retried here.
#[async_trait]
pub trait LedgerClient: Send + Sync + 'static {
  /// Accounts able to sign transactions, in a stable order.
  async fn signers(&self) -> anyhow::Result<Vec<Address>>;

  /// Quote-token balance of `owner` in base units.
  async fn token_balance(&self, owner: Address) -> anyhow::Result<U256>;

  /// All certificates ever issued to `owner` in `market`, including spent ones.
  async fn certificates_of(
    &self,
    market: &Market,
    owner: Address,
  ) -> anyhow::Result<Vec<CertificateId>>;

  /// Details of one certificate.
  async fn certificate_info(
    &self,
    market: &Market,
    id: CertificateId,
  ) -> anyhow::Result<CertificateInfo>;

  /// All policies bought by `owner` in `market`.
  async fn policies_of(&self, market: &Market, owner: Address) -> anyhow::Result<Vec<PolicyId>>;

  /// Details of one policy.
  async fn policy_info(&self, market: &Market, id: PolicyId) -> anyhow::Result<PolicyInfo>;

  /// Deposit `amount` base units and mint a liquidity certificate.
  async fn provide_liquidity(
    &self,
    market: &Market,
    from: Address,
    amount: U256,
    fee: Option<FeeOverride>,
  ) -> anyhow::Result<TxHash>;

  /// Exit a certificate. `immediate` forces exit without waiting for the epoch.
  async fn withdraw_liquidity(
    &self,
    market: &Market,
    from: Address,
    certificate: CertificateId,
    immediate: bool,
    fee: Option<FeeOverride>,
  ) -> anyhow::Result<TxHash>;

  /// Buy coverage for `beneficiary`.
  async fn buy_policy(
    &self,
    market: &Market,
    from: Address,
    beneficiary: Address,
    coverage: U256,
    duration_days: U256,
    fee: Option<FeeOverride>,
  ) -> anyhow::Result<TxHash>;

  /// Settle an expired policy and release its deposit.
  async fn settle_policy(
    &self,
    market: &Market,
    from: Address,
    policy: PolicyId,
    fee: Option<FeeOverride>,
  ) -> anyhow::Result<TxHash>;

  /// Claim accrued rewards of a certificate.
  async fn claim_rewards(
    &self,
    market: &Market,
    from: Address,
    certificate: CertificateId,
    fee: Option<FeeOverride>,
  ) -> anyhow::Result<TxHash>;

  /// Rewards accrued by a certificate. `settle` also accounts the current epoch.
  async fn get_rewards(
    &self,
    market: &Market,
    certificate: CertificateId,
    settle: bool,
  ) -> anyhow::Result<U256>;

  /// Transfer quote tokens.
  async fn transfer(
    &self,
    from: Address,
    to: Address,
    amount: U256,
    fee: Option<FeeOverride>,
  ) -> anyhow::Result<TxHash>;

  /// Mint test quote tokens to `to` (test deployments only).
  async fn mint_test_token(&self, from: Address, to: Address, amount: U256)
  -> anyhow::Result<TxHash>;

  /// Approve `spender` to pull quote tokens from `from`.
  async fn approve(
    &self,
    from: Address,
    spender: Address,
    amount: U256,
    fee: Option<FeeOverride>,
  ) -> anyhow::Result<TxHash>;

  /// Premium for `coverage` tokens over `duration_days` in `market`.
  ///
  /// Takes the operator's raw text: the client does its own conversion,
  /// so unchecked callers see conversion failures as ledger failures.
  async fn premium(
    &self,
    market: &Market,
    coverage: &str,
    duration_days: &str,
  ) -> anyhow::Result<U256>;

  /// Protocol-wide figures.
  async fn globals(&self) -> anyhow::Result<GlobalsSnapshot>;

  /// Markets currently in the on-chain registry.
  async fn insurance_markets(&self) -> anyhow::Result<Vec<RegisteredMarket>>;

  /// Register a market in the on-chain registry.
  async fn add_market(
    &self,
    from: Address,
    registration: &MarketRegistration,
    fee: Option<FeeOverride>,
  ) -> anyhow::Result<TxHash>;

  /// Remove a market from the on-chain registry.
  async fn remove_market(
    &self,
    from: Address,
    id: Address,
    fee: Option<FeeOverride>,
  ) -> anyhow::Result<TxHash>;

  /// Timestamp of the latest block.
  async fn current_time(&self) -> anyhow::Result<u64>;

  /// Move the chain clock forward and mine a block (development nodes only).
  async fn advance_time(&self, seconds: u64) -> anyhow::Result<()>;
}
