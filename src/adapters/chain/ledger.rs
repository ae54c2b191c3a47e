//! MetaDefender Ledger Client - alloy-rs Implementation
//!
//! Implements the `LedgerClient` port on top of the generated contract
//! bindings. Views are plain `eth_call`s; mutating calls are sent from
//! the requested account, carry the fee override when one is given and
//! wait for the receipt so a revert surfaces as an error.

use std::sync::Arc;

use alloy::contract::SolCallBuilder;
use alloy::eips::BlockNumberOrTag;
use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::Provider;
use alloy::rpc::types::BlockTransactionsKind;
use alloy::sol_types::SolCall;
use alloy::transports::http::{Client, Http};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::config::deployment::SharedContracts;
use crate::domain::amount::parse_token_amount;
use crate::domain::{
    CertificateId, CertificateInfo, FeeOverride, GlobalsSnapshot, Market, MarketRegistration,
    PolicyId, PolicyInfo, RegisteredMarket,
};
use crate::ports::ledger::LedgerClient;

use super::contracts::{
    IGlobalsViewer, ILiquidityCertificate, IMarketsRegistry, IMetaDefender, IPolicy, ITestERC20,
    pair_registry_entries,
};
use super::provider::RpcProvider;

/// Send a contract call from `from` and wait for a successful receipt.
async fn submit<P, C>(
    call: SolCallBuilder<Http<Client>, P, C>,
    from: Address,
    fee: Option<FeeOverride>,
) -> Result<TxHash>
where
    P: Provider<Http<Client>> + Clone,
    C: SolCall + Send + Sync,
{
    let mut call = call.from(from);
    if let Some(fee) = fee {
        call = call.gas(fee.gas_limit).gas_price(fee.gas_price);
    }

    let pending = call.send().await.context("Transaction submission failed")?;
    let receipt = pending
        .get_receipt()
        .await
        .context("Failed to fetch transaction receipt")?;

    anyhow::ensure!(
        receipt.status(),
        "Transaction {} reverted",
        receipt.transaction_hash
    );
    debug!(tx = %receipt.transaction_hash, gas_used = receipt.gas_used, "Transaction mined");
    Ok(receipt.transaction_hash)
}

/// `LedgerClient` over a live node.
pub struct AlloyLedger<P> {
    /// Shared RPC provider and signer set.
    rpc: Arc<RpcProvider<P>>,
    /// Quote token, registry and globals viewer of the deployment.
    shared: SharedContracts,
}

impl<P> AlloyLedger<P>
where
    P: Provider<Http<Client>> + Clone + 'static,
{
    /// Create a ledger client for one deployment.
    pub fn new(rpc: Arc<RpcProvider<P>>, shared: SharedContracts) -> Self {
        Self { rpc, shared }
    }

    fn provider(&self) -> P {
        self.rpc.inner()
    }

    fn defender(&self, market: &Market) -> IMetaDefender::IMetaDefenderInstance<Http<Client>, P> {
        IMetaDefender::new(market.contracts.defender, self.provider())
    }

    fn certificates(
        &self,
        market: &Market,
    ) -> ILiquidityCertificate::ILiquidityCertificateInstance<Http<Client>, P> {
        ILiquidityCertificate::new(market.contracts.certificate, self.provider())
    }

    fn policies(&self, market: &Market) -> IPolicy::IPolicyInstance<Http<Client>, P> {
        IPolicy::new(market.contracts.policy, self.provider())
    }

    fn token(&self) -> ITestERC20::ITestERC20Instance<Http<Client>, P> {
        ITestERC20::new(self.shared.quote_token, self.provider())
    }

    fn registry(&self) -> IMarketsRegistry::IMarketsRegistryInstance<Http<Client>, P> {
        IMarketsRegistry::new(self.shared.registry, self.provider())
    }

    fn viewer(&self) -> IGlobalsViewer::IGlobalsViewerInstance<Http<Client>, P> {
        IGlobalsViewer::new(self.shared.globals_viewer, self.provider())
    }
}

#[async_trait]
impl<P> LedgerClient for AlloyLedger<P>
where
    P: Provider<Http<Client>> + Clone + 'static,
{
    async fn signers(&self) -> Result<Vec<Address>> {
        self.rpc.signers().await
    }

    #[instrument(skip(self))]
    async fn token_balance(&self, owner: Address) -> Result<U256> {
        let token = self.token();
        let balance = token
            .balanceOf(owner)
            .call()
            .await
            .context("balanceOf call failed")?
            ._0;
        Ok(balance)
    }

    #[instrument(skip(self, market), fields(market = %market.name))]
    async fn certificates_of(&self, market: &Market, owner: Address) -> Result<Vec<CertificateId>> {
        let registry = self.certificates(market);
        let ids = registry
            .getLiquidityProviders(owner)
            .call()
            .await
            .context("getLiquidityProviders call failed")?
            ._0;
        Ok(ids)
    }

    #[instrument(skip(self, market), fields(market = %market.name))]
    async fn certificate_info(&self, market: &Market, id: CertificateId) -> Result<CertificateInfo> {
        let registry = self.certificates(market);
        let info = registry
            .getCertificateInfo(id)
            .call()
            .await
            .context("getCertificateInfo call failed")?
            ._0;
        Ok(info.into_domain(id))
    }

    #[instrument(skip(self, market), fields(market = %market.name))]
    async fn policies_of(&self, market: &Market, owner: Address) -> Result<Vec<PolicyId>> {
        let registry = self.policies(market);
        let ids = registry
            .getPolicies(owner)
            .call()
            .await
            .context("getPolicies call failed")?
            ._0;
        Ok(ids)
    }

    #[instrument(skip(self, market), fields(market = %market.name))]
    async fn policy_info(&self, market: &Market, id: PolicyId) -> Result<PolicyInfo> {
        let registry = self.policies(market);
        let info = registry
            .getPolicyInfo(id)
            .call()
            .await
            .context("getPolicyInfo call failed")?
            ._0;
        Ok(info.into_domain(id))
    }

    #[instrument(skip(self, market), fields(market = %market.name))]
    async fn provide_liquidity(
        &self,
        market: &Market,
        from: Address,
        amount: U256,
        fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let defender = self.defender(market);
        submit(defender.certificateProviderEntrance(amount), from, fee).await
    }

    #[instrument(skip(self, market), fields(market = %market.name))]
    async fn withdraw_liquidity(
        &self,
        market: &Market,
        from: Address,
        certificate: CertificateId,
        immediate: bool,
        fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let defender = self.defender(market);
        submit(
            defender.certificateProviderExit(certificate, immediate),
            from,
            fee,
        )
        .await
    }

    #[instrument(skip(self, market), fields(market = %market.name))]
    async fn buy_policy(
        &self,
        market: &Market,
        from: Address,
        beneficiary: Address,
        coverage: U256,
        duration_days: U256,
        fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let defender = self.defender(market);
        submit(
            defender.buyPolicy(beneficiary, coverage, duration_days),
            from,
            fee,
        )
        .await
    }

    #[instrument(skip(self, market), fields(market = %market.name))]
    async fn settle_policy(
        &self,
        market: &Market,
        from: Address,
        policy: PolicyId,
        fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let defender = self.defender(market);
        submit(defender.settlePolicy(policy), from, fee).await
    }

    #[instrument(skip(self, market), fields(market = %market.name))]
    async fn claim_rewards(
        &self,
        market: &Market,
        from: Address,
        certificate: CertificateId,
        fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let defender = self.defender(market);
        submit(defender.claimRewards(certificate), from, fee).await
    }

    #[instrument(skip(self, market), fields(market = %market.name))]
    async fn get_rewards(
        &self,
        market: &Market,
        certificate: CertificateId,
        settle: bool,
    ) -> Result<U256> {
        let defender = self.defender(market);
        let rewards = defender
            .getRewards(certificate, settle)
            .call()
            .await
            .context("getRewards call failed")?
            ._0;
        Ok(rewards)
    }

    #[instrument(skip(self))]
    async fn transfer(
        &self,
        from: Address,
        to: Address,
        amount: U256,
        fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let token = self.token();
        submit(token.transfer(to, amount), from, fee).await
    }

    #[instrument(skip(self))]
    async fn mint_test_token(&self, from: Address, to: Address, amount: U256) -> Result<TxHash> {
        let token = self.token();
        submit(token.mint(to, amount), from, None).await
    }

    #[instrument(skip(self))]
    async fn approve(
        &self,
        from: Address,
        spender: Address,
        amount: U256,
        fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let token = self.token();
        submit(token.approve(spender, amount), from, fee).await
    }

    #[instrument(skip(self, market), fields(market = %market.name))]
    async fn premium(&self, market: &Market, coverage: &str, duration_days: &str) -> Result<U256> {
        let coverage = parse_token_amount("coverage", coverage)?;
        let duration: U256 = duration_days
            .trim()
            .parse()
            .with_context(|| format!("duration {duration_days:?} is not a whole number of days"))?;

        let viewer = self.viewer();
        let premium = viewer
            .getPremium(coverage, duration, market.contracts.defender)
            .call()
            .await
            .context("getPremium call failed")?
            ._0;
        Ok(premium)
    }

    #[instrument(skip(self))]
    async fn globals(&self) -> Result<GlobalsSnapshot> {
        let viewer = self.viewer();
        let info = viewer
            .getGlobals()
            .call()
            .await
            .context("getGlobals call failed")?
            ._0;
        Ok(info.into())
    }

    #[instrument(skip(self))]
    async fn insurance_markets(&self) -> Result<Vec<RegisteredMarket>> {
        let registry = self.registry();
        let markets = registry
            .getInsuranceMarkets()
            .call()
            .await
            .context("getInsuranceMarkets call failed")?;
        pair_registry_entries(markets._0, markets._1)
    }

    #[instrument(skip(self), fields(market = %registration.name))]
    async fn add_market(
        &self,
        from: Address,
        registration: &MarketRegistration,
        fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let registry = self.registry();
        let contracts = registration.contracts;
        submit(
            registry.registerMarket(
                contracts.defender,
                contracts.certificate,
                contracts.policy,
                registration.name.clone(),
            ),
            from,
            fee,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn remove_market(
        &self,
        from: Address,
        id: Address,
        fee: Option<FeeOverride>,
    ) -> Result<TxHash> {
        let registry = self.registry();
        submit(registry.removeMarket(id), from, fee).await
    }

    async fn current_time(&self) -> Result<u64> {
        let block = self
            .provider()
            .get_block_by_number(BlockNumberOrTag::Latest, BlockTransactionsKind::Hashes)
            .await
            .context("Failed to fetch latest block")?
            .context("Node returned no latest block")?;
        Ok(block.header.timestamp)
    }

    #[instrument(skip(self))]
    async fn advance_time(&self, seconds: u64) -> Result<()> {
        let provider = self.provider();
        provider
            .raw_request::<_, serde_json::Value>("evm_increaseTime".into(), (seconds,))
            .await
            .context("evm_increaseTime failed")?;
        provider
            .raw_request::<_, serde_json::Value>("evm_mine".into(), Vec::<serde_json::Value>::new())
            .await
            .context("evm_mine failed")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy::providers::ProviderBuilder;

    use crate::domain::MarketContracts;

    use super::*;

    /// A ledger whose node is never reachable; only the local key is known.
    fn offline_ledger(signer: Address) -> AlloyLedger<impl Provider<Http<Client>> + Clone + 'static> {
        let url = "http://127.0.0.1:1".parse().unwrap();
        let provider = ProviderBuilder::new().on_http(url);
        let rpc = RpcProvider::from_parts(provider, vec![signer], 31_337);
        AlloyLedger::new(
            Arc::new(rpc),
            SharedContracts {
                quote_token: Address::repeat_byte(0x01),
                registry: Address::repeat_byte(0x02),
                globals_viewer: Address::repeat_byte(0x03),
            },
        )
    }

    fn market() -> Market {
        Market {
            name: "Mining Pool".to_string(),
            contracts: MarketContracts {
                defender: Address::repeat_byte(0xA0),
                certificate: Address::repeat_byte(0xA1),
                policy: Address::repeat_byte(0xA2),
            },
        }
    }

    #[tokio::test]
    async fn test_local_signers_need_no_node() {
        let signer = Address::repeat_byte(0x11);
        let ledger = offline_ledger(signer);
        assert_eq!(ledger.signers().await.unwrap(), vec![signer]);
    }

    #[tokio::test]
    async fn test_premium_rejects_coverage_before_calling_node() {
        let ledger = offline_ledger(Address::ZERO);
        let err = ledger.premium(&market(), "abc", "10").await.unwrap_err();
        assert!(err.to_string().contains("coverage"));
    }

    #[tokio::test]
    async fn test_node_errors_carry_call_name() {
        let ledger = offline_ledger(Address::ZERO);

        let err = ledger.token_balance(Address::ZERO).await.unwrap_err();
        assert!(err.to_string().contains("balanceOf"));

        let err = ledger.advance_time(86_400).await.unwrap_err();
        assert!(err.to_string().contains("evm_increaseTime"));
    }
}
