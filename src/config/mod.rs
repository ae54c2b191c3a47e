//! Configuration Module - TOML-based Console Configuration
//!
//! Loads and validates configuration from `config.toml`. The network
//! name selects which deployment record is read from the deployments
//! directory; contract addresses live only in that record.

pub mod deployment;
pub mod loader;

use serde::Deserialize;

use crate::domain::{FeeOverride, FeePolicy};

/// Top-level console configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Console identity and logging.
  pub console: ConsoleConfig,
  /// Network and deployment location.
  pub network: NetworkConfig,
  /// Local signing identities.
  #[serde(default)]
  pub signers: SignerConfig,
  /// Networks requiring explicit gas parameters.
  #[serde(default)]
  pub fee_override: FeeOverrideConfig,
}

/// Console identity and logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
  /// Human-readable console name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Emit JSON log lines instead of human-readable ones.
  #[serde(default)]
  pub json_logs: bool,
}

/// Network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
  /// Network name; also selects `.env.<name>.json` in `deployments_dir`.
  pub name: String,
  /// JSON-RPC endpoint.
  pub rpc_url: String,
  /// Directory holding deployment records.
  #[serde(default = "default_deployments_dir")]
  pub deployments_dir: String,
}

/// Signing identities.
///
/// When `private_keys_env` names a set variable, its comma-separated
/// keys are the signers. Otherwise the node's unlocked accounts are used.
#[derive(Debug, Clone, Deserialize)]
pub struct SignerConfig {
  /// Environment variable holding comma-separated private keys.
  #[serde(default = "default_private_keys_env")]
  pub private_keys_env: String,
}

impl Default for SignerConfig {
  fn default() -> Self {
    Self {
      private_keys_env: default_private_keys_env(),
    }
  }
}

/// Fee override configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeOverrideConfig {
  /// Networks on which every mutating call carries an override.
  #[serde(default = "default_override_networks")]
  pub networks: Vec<String>,
  /// Gas limit applied on those networks.
  #[serde(default = "default_gas_limit")]
  pub gas_limit: u64,
  /// Fixed gas price in wei; queried from the node when absent.
  pub gas_price_wei: Option<u64>,
}

impl Default for FeeOverrideConfig {
  fn default() -> Self {
    Self {
      networks: default_override_networks(),
      gas_limit: default_gas_limit(),
      gas_price_wei: None,
    }
  }
}

impl FeeOverrideConfig {
  /// Network policy derived from the configured list.
  pub fn policy(&self) -> FeePolicy {
    FeePolicy::new(self.networks.iter().cloned())
  }

  /// Whether `network` needs the node's gas price to build its override.
  pub fn needs_node_price(&self, network: &str) -> bool {
    self.gas_price_wei.is_none() && self.policy().applies_to(network)
  }

  /// Override for `network`: `None` when the network is not listed.
  ///
  /// The configured price wins over `node_price`. A listed network with
  /// neither yields `None` as well, so callers must supply the node price
  /// whenever `needs_node_price` says so.
  pub fn resolve(&self, network: &str, node_price: Option<u128>) -> Option<FeeOverride> {
    if !self.policy().applies_to(network) {
      return None;
    }
    let gas_price = self.gas_price_wei.map(u128::from).or(node_price)?;
    Some(FeeOverride {
      gas_limit: self.gas_limit,
      gas_price,
    })
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_deployments_dir() -> String {
  "deployments".to_string()
}

fn default_private_keys_env() -> String {
  "CONSOLE_PRIVATE_KEYS".to_string()
}

fn default_override_networks() -> Vec<String> {
  vec!["mandala".to_string(), "mandala_localhost".to_string()]
}

fn default_gas_limit() -> u64 {
  21_000_000
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config(gas_price_wei: Option<u64>) -> FeeOverrideConfig {
    FeeOverrideConfig {
      gas_price_wei,
      ..FeeOverrideConfig::default()
    }
  }

  #[test]
  fn test_unlisted_network_gets_no_override() {
    let cfg = config(Some(1_000));
    assert!(!cfg.needs_node_price("localhost"));
    assert_eq!(cfg.resolve("localhost", Some(7)), None);
  }

  #[test]
  fn test_configured_price_wins() {
    let cfg = config(Some(200_786_445_289));
    assert!(!cfg.needs_node_price("mandala"));
    assert_eq!(
      cfg.resolve("mandala", Some(7)),
      Some(FeeOverride {
        gas_limit: 21_000_000,
        gas_price: 200_786_445_289,
      })
    );
  }

  #[test]
  fn test_node_price_used_when_unconfigured() {
    let cfg = config(None);
    assert!(cfg.needs_node_price("mandala_localhost"));
    assert_eq!(
      cfg.resolve("mandala_localhost", Some(42)),
      Some(FeeOverride {
        gas_limit: 21_000_000,
        gas_price: 42,
      })
    );
    assert_eq!(cfg.resolve("mandala_localhost", None), None);
  }
}
