//! Fee override policy for mutating ledger calls.
//!
//! Some networks (the Acala `mandala` EVM+ chains) reject transactions
//! whose gas limit and gas price are left to the node's estimate. For
//! those networks every mutating call carries an explicit override. The
//! set of networks is declared in configuration; nothing is inferred
//! from the network name.

/// Explicit gas parameters attached to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeOverride {
    /// Gas limit for the transaction.
    pub gas_limit: u64,
    /// Legacy gas price in wei.
    pub gas_price: u128,
}

/// Decides whether a network gets a fee override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeePolicy {
    /// Networks that require an override.
    networks: Vec<String>,
}

impl FeePolicy {
    /// Policy applying to exactly `networks`.
    pub fn new<I, S>(networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            networks: networks.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether transactions on `network` need an explicit override.
    pub fn applies_to(&self, network: &str) -> bool {
        self.networks.iter().any(|n| n == network)
    }
}

impl std::fmt::Display for FeeOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gas_limit={} gas_price={}wei", self.gas_limit, self.gas_price)
    }
}
