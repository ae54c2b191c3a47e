//! Insurance market types.
//!
//! A `Market` is one deployed MetaDefender instance: the defender entry
//! point plus the certificate and policy registries it issues into.
//! Markets come from the deployment record and never change afterwards.
//! `RegisteredMarket` is the view the on-chain registry keeps, which may
//! drift from the deployment record as markets are added or removed.

use alloy::primitives::Address;

/// Contract handles of a single market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketContracts {
    /// MetaDefender entry point (liquidity, policies, rewards).
    pub defender: Address,
    /// LiquidityCertificate registry.
    pub certificate: Address,
    /// Policy registry.
    pub policy: Address,
}

/// A deployed insurance market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    /// Human-readable market name (unique within a deployment).
    pub name: String,
    /// Contract handles.
    pub contracts: MarketContracts,
}

impl Market {
    /// Create a market from its name and contract handles.
    pub fn new(name: impl Into<String>, contracts: MarketContracts) -> Self {
        Self {
            name: name.into(),
            contracts,
        }
    }
}

impl std::fmt::Display for Market {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.contracts.defender)
    }
}

/// Directory entry returned by the on-chain markets registry.
///
/// The registry keys markets by their defender address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredMarket {
    /// Registry key (defender address).
    pub id: Address,
    /// Registered name.
    pub name: String,
}

/// Arguments of a registry `registerMarket` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketRegistration {
    /// Name to register the market under.
    pub name: String,
    /// Contract handles to register.
    pub contracts: MarketContracts,
}

impl From<&Market> for MarketRegistration {
    fn from(market: &Market) -> Self {
        Self {
            name: market.name.clone(),
            contracts: market.contracts,
        }
    }
}
