//! MetaDefender Console — Entry Point
//!
//! Wires configuration, logging, the ledger connection and the terminal
//! into one interactive session, then hands control to the dispatcher.
//!
//! Wiring sequence:
//! 1. Parse CLI flags, load config.toml + validate
//! 2. Init tracing (stderr, JSON when configured)
//! 3. Load the deployment record of the selected network
//! 4. Connect to the RPC node and resolve signers
//! 5. Resolve the fee override for the network
//! 6. Ask for the market, pick the first signer
//! 7. Run the menu loop until "Exit"

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use alloy::providers::Provider;
use alloy::transports::http::{Client, Http};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use metadefender_console::adapters::chain::{
    AlloyLedger, GasOracle, RpcProvider, connect_node_accounts, connect_with_keys,
    load_private_keys,
};
use metadefender_console::adapters::terminal::{TerminalInput, TerminalSink};
use metadefender_console::config::AppConfig;
use metadefender_console::config::deployment::DeploymentRecord;
use metadefender_console::config::loader::load_config;
use metadefender_console::usecases::{Dispatcher, Session};

/// Interactive operator console for MetaDefender insurance markets.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Network to use instead of `network.name` from the config.
    #[arg(long)]
    network: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── 1. Load configuration ───────────────────────────────
    let mut config = load_config(&cli.config).context("Failed to load configuration")?;
    if let Some(network) = cli.network {
        config.network.name = network;
    }

    // ── 2. Initialize logging ───────────────────────────────
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.console.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.console.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(
        name = %config.console.name,
        version = env!("CARGO_PKG_VERSION"),
        network = %config.network.name,
        "Starting MetaDefender console"
    );

    // ── 3. Deployment record ────────────────────────────────
    let record = DeploymentRecord::load(&config.network.deployments_dir, &config.network.name)?;

    // ── 4. Ledger connection ────────────────────────────────
    let keys = load_private_keys(&config.signers.private_keys_env)?;
    if keys.is_empty() {
        let rpc = connect_node_accounts(&config.network).await?;
        run(config, record, rpc).await
    } else {
        let rpc = connect_with_keys(&config.network, keys).await?;
        run(config, record, rpc).await
    }
}

/// Steps 5-7 over whichever provider the signer mode produced.
async fn run<P>(config: AppConfig, record: DeploymentRecord, rpc: RpcProvider<P>) -> Result<()>
where
    P: Provider<Http<Client>> + Clone + 'static,
{
    let rpc = Arc::new(rpc);
    let markets = record.markets();
    info!(chain_id = rpc.chain_id(), markets = markets.len(), "Ledger reachable");

    // ── 5. Fee override ─────────────────────────────────────
    let fee_override = GasOracle::new(rpc.inner())
        .fee_override(&config.network.name, &config.fee_override)
        .await?;

    let ledger = Arc::new(AlloyLedger::new(Arc::clone(&rpc), record.shared()));
    let input = Arc::new(TerminalInput::new());
    let sink = Arc::new(TerminalSink::new());

    // ── 6. Session ──────────────────────────────────────────
    let session = Session::initialize(
        config.network.name.clone(),
        markets,
        ledger.as_ref(),
        input.as_ref(),
        fee_override,
    )
    .await?;

    // ── 7. Menu loop ────────────────────────────────────────
    let mut dispatcher = Dispatcher::new(ledger, input, sink, session);
    dispatcher.run().await?;

    let (completed, failed) = dispatcher.stats();
    info!(completed, failed, "Console session ended");
    Ok(())
}
