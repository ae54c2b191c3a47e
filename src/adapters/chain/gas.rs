//! Gas Oracle - Fee Override Resolution
//!
//! Resolves the fee override of the session once at startup. Networks
//! listed in `[fee_override].networks` get the configured gas limit and
//! either the configured gas price or the node's current one; every
//! other network leaves gas to the node's estimate.

use alloy::providers::Provider;
use alloy::transports::http::{Client, Http};
use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::config::FeeOverrideConfig;
use crate::domain::FeeOverride;

/// Gas price oracle.
pub struct GasOracle<P> {
    provider: P,
}

impl<P: Provider<Http<Client>>> GasOracle<P> {
    /// Create an oracle over `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Current legacy gas price in wei from the node.
    #[instrument(skip(self))]
    pub async fn current_gas_price(&self) -> Result<u128> {
        let price = self
            .provider
            .get_gas_price()
            .await
            .context("Failed to query gas price")?;
        debug!(gas_price_wei = price, "Gas price queried");
        Ok(price)
    }

    /// Fee override for `network`, or `None` when the network needs none.
    ///
    /// The node is only asked for a price when the network is listed and
    /// no price is configured.
    pub async fn fee_override(
        &self,
        network: &str,
        config: &FeeOverrideConfig,
    ) -> Result<Option<FeeOverride>> {
        let node_price = if config.needs_node_price(network) {
            Some(self.current_gas_price().await?)
        } else {
            None
        };

        let Some(fee) = config.resolve(network, node_price) else {
            debug!(network, "No fee override for network");
            return Ok(None);
        };
        info!(network, %fee, "Fee override active");
        Ok(Some(fee))
    }
}

#[cfg(test)]
mod tests {
    use alloy::providers::ProviderBuilder;

    use super::*;

    fn oracle() -> GasOracle<impl Provider<Http<Client>>> {
        let url = "http://127.0.0.1:1".parse().unwrap();
        GasOracle::new(ProviderBuilder::new().on_http(url))
    }

    #[tokio::test]
    async fn test_unlisted_network_never_queries_node() {
        let config = FeeOverrideConfig::default();
        let fee = oracle().fee_override("localhost", &config).await.unwrap();
        assert_eq!(fee, None);
    }

    #[tokio::test]
    async fn test_configured_price_skips_node() {
        let config = FeeOverrideConfig {
            gas_price_wei: Some(1_000),
            ..FeeOverrideConfig::default()
        };
        let fee = oracle().fee_override("mandala", &config).await.unwrap();
        assert_eq!(
            fee,
            Some(FeeOverride {
                gas_limit: 21_000_000,
                gas_price: 1_000,
            })
        );
    }

    #[tokio::test]
    async fn test_listed_network_needs_reachable_node() {
        let config = FeeOverrideConfig::default();
        let err = oracle().fee_override("mandala", &config).await.unwrap_err();
        assert!(err.to_string().contains("gas price"));
    }
}
