//! RPC Provider - alloy-rs 0.9 Connection Management
//!
//! Manages the connection to the configured EVM node and the signing
//! identities the console may act as. Contract bindings clone the
//! provider they are built on.
//!
//! Identities come from private keys in an environment variable when it
//! is set; otherwise the node's unlocked accounts are used, which is
//! what development nodes (hardhat, anvil) provide. The two cases build
//! different filler stacks, so each has its own constructor and callers
//! stay generic over the provider type.

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use alloy::transports::http::{Client, Http};
use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::config::NetworkConfig;

/// RPC provider backed by alloy-rs 0.9.
pub struct RpcProvider<P> {
    /// The alloy HTTP provider.
    provider: P,
    /// Addresses of locally held keys, in configuration order.
    local_signers: Vec<Address>,
    /// Chain ID reported at connect time.
    chain_id: u64,
}

/// Connect with a wallet holding `keys`; transactions are signed locally.
#[instrument(skip_all, fields(network = %network.name, keys = keys.len()))]
pub async fn connect_with_keys(
    network: &NetworkConfig,
    keys: Vec<PrivateKeySigner>,
) -> Result<RpcProvider<impl Provider<Http<Client>> + Clone + 'static>> {
    let url = rpc_url(network)?;
    let local_signers: Vec<Address> = keys.iter().map(|k| k.address()).collect();

    let mut keys = keys.into_iter();
    let first = keys.next().context("At least one private key is required")?;
    let mut wallet = EthereumWallet::new(first);
    for key in keys {
        wallet.register_signer(key);
    }

    let provider = ProviderBuilder::new()
        .with_recommended_fillers()
        .wallet(wallet)
        .on_http(url);
    RpcProvider::new(provider, local_signers).await
}

/// Connect without local keys; the node signs for its unlocked accounts.
#[instrument(skip_all, fields(network = %network.name))]
pub async fn connect_node_accounts(
    network: &NetworkConfig,
) -> Result<RpcProvider<impl Provider<Http<Client>> + Clone + 'static>> {
    let url = rpc_url(network)?;
    let provider = ProviderBuilder::new().with_recommended_fillers().on_http(url);
    RpcProvider::new(provider, Vec::new()).await
}

fn rpc_url(network: &NetworkConfig) -> Result<Url> {
    network.rpc_url.parse().context("Invalid RPC URL")
}

impl<P> RpcProvider<P>
where
    P: Provider<Http<Client>> + Clone + 'static,
{
    /// Wrap `provider`, querying the chain ID once.
    pub async fn new(provider: P, local_signers: Vec<Address>) -> Result<Self> {
        let chain_id = provider
            .get_chain_id()
            .await
            .context("Failed to query chain ID")?;

        info!(
            chain_id,
            local_signers = local_signers.len(),
            "Connected to RPC"
        );
        Ok(Self::from_parts(provider, local_signers, chain_id))
    }

    /// Wrap `provider` with an already known chain ID.
    pub fn from_parts(provider: P, local_signers: Vec<Address>, chain_id: u64) -> Self {
        Self {
            provider,
            local_signers,
            chain_id,
        }
    }

    /// Handle to the alloy provider for contract bindings.
    pub fn inner(&self) -> P {
        self.provider.clone()
    }

    /// Chain ID reported at connect time.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Accounts the console can sign for.
    pub async fn signers(&self) -> Result<Vec<Address>> {
        if !self.local_signers.is_empty() {
            return Ok(self.local_signers.clone());
        }
        let accounts = self
            .provider
            .get_accounts()
            .await
            .context("Failed to list node accounts")?;
        debug!(accounts = accounts.len(), "Using node-managed accounts");
        Ok(accounts)
    }
}

/// Parse comma-separated private keys from `var`. Unset means none.
pub fn load_private_keys(var: &str) -> Result<Vec<PrivateKeySigner>> {
    let Ok(raw) = std::env::var(var) else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .enumerate()
        .map(|(i, k)| {
            k.parse::<PrivateKeySigner>()
                .with_context(|| format!("Invalid private key #{i} in {var}"))
        })
        .collect()
}
