//! Chain Adapters - EVM Ledger Access
//!
//! Provides on-chain access via alloy-rs 0.9 for:
//! - RPC provider and signer management
//! - MetaDefender, certificate, policy, token and registry bindings
//! - Fee override resolution for networks that need it
//! - Development-node clock control

pub mod contracts;
pub mod gas;
pub mod ledger;
pub mod provider;

pub use gas::GasOracle;
pub use ledger::AlloyLedger;
pub use provider::{RpcProvider, connect_node_accounts, connect_with_keys, load_private_keys};
