//! Deployment Record - Per-network Contract Addresses
//!
//! Deployment scripts write `<deployments_dir>/.env.<network>.json`
//! with the addresses of every market and of the shared contracts.
//! A missing or malformed record is a configuration error: the console
//! cannot start without knowing which contracts to talk to.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use serde::Deserialize;
use tracing::info;

use crate::domain::{Market, MarketContracts};
use crate::error::ConsoleError;

/// One market entry of the deployment record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRecord {
  /// Display name.
  pub market_name: String,
  /// MetaDefender entry point.
  pub meta_defender: Address,
  /// LiquidityCertificate registry.
  pub liquidity_certificate: Address,
  /// Policy registry.
  pub policy: Address,
}

/// Contents of `.env.<network>.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
  /// Deployed markets, in deployment order.
  pub markets: Vec<MarketRecord>,
  /// Quote token (test ERC-20 on development networks).
  #[serde(rename = "testERC20")]
  pub test_erc20: Address,
  /// On-chain markets registry.
  pub meta_defender_markets_registry: Address,
  /// Read-only aggregate viewer.
  pub globals_viewer: Address,
}

/// Contracts shared by every market of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedContracts {
  /// Quote token.
  pub quote_token: Address,
  /// Markets registry.
  pub registry: Address,
  /// Globals viewer.
  pub globals_viewer: Address,
}

impl DeploymentRecord {
  /// Path of the record for `network` inside `dir`.
  pub fn path_for(dir: &str, network: &str) -> PathBuf {
    Path::new(dir).join(format!(".env.{network}.json"))
  }

  /// Load and validate the record for `network`.
  pub fn load(dir: &str, network: &str) -> Result<Self, ConsoleError> {
    let path = Self::path_for(dir, network);
    if !path.exists() {
      return Err(ConsoleError::Config(format!(
        "no deployment record for network {network:?} at {}",
        path.display()
      )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| {
      ConsoleError::Config(format!("cannot read {}: {e}", path.display()))
    })?;
    let record = Self::parse(&content)?;

    info!(
      network,
      markets = record.markets.len(),
      path = %path.display(),
      "Deployment record loaded"
    );

    Ok(record)
  }

  /// Parse and validate record JSON.
  pub fn parse(content: &str) -> Result<Self, ConsoleError> {
    let record: Self = serde_json::from_str(content)
      .map_err(|e| ConsoleError::Config(format!("malformed deployment record: {e}")))?;
    record.validate()?;
    Ok(record)
  }

  fn validate(&self) -> Result<(), ConsoleError> {
    if self.markets.is_empty() {
      return Err(ConsoleError::Config(
        "deployment record lists no markets".to_string(),
      ));
    }

    let mut seen = HashSet::new();
    for market in &self.markets {
      if !seen.insert(market.market_name.as_str()) {
        return Err(ConsoleError::Config(format!(
          "duplicate market name {:?} in deployment record",
          market.market_name
        )));
      }
    }

    Ok(())
  }

  /// Markets in record order.
  pub fn markets(&self) -> Vec<Market> {
    self
      .markets
      .iter()
      .map(|m| {
        Market::new(
          m.market_name.clone(),
          MarketContracts {
            defender: m.meta_defender,
            certificate: m.liquidity_certificate,
            policy: m.policy,
          },
        )
      })
      .collect()
  }

  /// Shared contract handles.
  pub fn shared(&self) -> SharedContracts {
    SharedContracts {
      quote_token: self.test_erc20,
      registry: self.meta_defender_markets_registry,
      globals_viewer: self.globals_viewer,
    }
  }
}
