//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    network = %config.network.name,
    rpc = %config.network.rpc_url,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig =
    toml::from_str(content).with_context(|| "Failed to parse config.toml")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.console.name.trim().is_empty(),
    "console.name must not be empty"
  );

  anyhow::ensure!(
    !config.network.name.trim().is_empty(),
    "network.name must not be empty"
  );
  anyhow::ensure!(
    config.network.rpc_url.starts_with("http://") || config.network.rpc_url.starts_with("https://"),
    "network.rpc_url must be an http(s) URL, got {}",
    config.network.rpc_url
  );
  anyhow::ensure!(
    !config.network.deployments_dir.trim().is_empty(),
    "network.deployments_dir must not be empty"
  );

  anyhow::ensure!(
    config.fee_override.gas_limit > 0,
    "fee_override.gas_limit must be positive"
  );
  if let Some(price) = config.fee_override.gas_price_wei {
    anyhow::ensure!(price > 0, "fee_override.gas_price_wei must be positive");
  }

  Ok(())
}
