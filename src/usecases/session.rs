//! Session State - Active Signer and Market
//!
//! Holds what every handler needs to know about "who" and "where": the
//! signing account, the chosen market and the fee override of the
//! network. The dispatcher owns the session and lends it to one handler
//! at a time; `set_signer` and `set_market` are the only mutations.

use alloy::primitives::Address;
use tracing::info;

use crate::domain::{FeeOverride, Market};
use crate::error::ConsoleError;
use crate::ports::input::InputCollector;
use crate::ports::ledger::LedgerClient;

use super::prompt::choose;

/// Operator session.
#[derive(Debug, Clone)]
pub struct Session {
  /// Network the deployment record was read for.
  network: String,
  /// Account signing mutating calls.
  signer: Address,
  /// Index of the active market in `markets`.
  active: usize,
  /// Markets from the deployment record.
  markets: Vec<Market>,
  /// Gas override applied to mutating calls, if the network needs one.
  fee_override: Option<FeeOverride>,
}

impl Session {
  /// Build a session with an explicit market and signer.
  pub fn new(
    network: impl Into<String>,
    markets: Vec<Market>,
    active: usize,
    signer: Address,
    fee_override: Option<FeeOverride>,
  ) -> Result<Self, ConsoleError> {
    if active >= markets.len() {
      return Err(ConsoleError::Config(format!(
        "market index {active} out of range ({} known)",
        markets.len()
      )));
    }

    Ok(Self {
      network: network.into(),
      signer,
      active,
      markets,
      fee_override,
    })
  }

  /// Interactive startup: the operator picks the market, the first
  /// ledger signer becomes the active identity.
  pub async fn initialize(
    network: impl Into<String>,
    markets: Vec<Market>,
    ledger: &dyn LedgerClient,
    input: &dyn InputCollector,
    fee_override: Option<FeeOverride>,
  ) -> Result<Self, ConsoleError> {
    let options: Vec<(String, usize)> = markets
      .iter()
      .enumerate()
      .map(|(i, m)| (m.name.clone(), i))
      .collect();
    let active = choose(input, "markets", "Which market do you want to use?", &options).await?;

    let signers = ledger
      .signers()
      .await
      .map_err(ConsoleError::ledger("getSigners"))?;
    let signer = signers
      .first()
      .copied()
      .ok_or_else(|| ConsoleError::Config("no signing accounts available".to_string()))?;

    let session = Self::new(network, markets, active, signer, fee_override)?;
    info!(
      network = %session.network,
      market = %session.market().name,
      signer = %session.signer,
      fee_override = session.fee_override.is_some(),
      "Session initialized"
    );
    Ok(session)
  }

  /// Network name.
  pub fn network(&self) -> &str {
    &self.network
  }

  /// Active signing account.
  pub fn signer(&self) -> Address {
    self.signer
  }

  /// Active market.
  pub fn market(&self) -> &Market {
    &self.markets[self.active]
  }

  /// All markets of the deployment, in record order.
  pub fn markets(&self) -> &[Market] {
    &self.markets
  }

  /// Gas override for mutating calls.
  pub fn fee_override(&self) -> Option<FeeOverride> {
    self.fee_override
  }

  /// Switch the signing account.
  pub fn set_signer(&mut self, signer: Address) {
    info!(from = %self.signer, to = %signer, "Active signer changed");
    self.signer = signer;
  }

  /// Switch the active market by directory index.
  pub fn set_market(&mut self, index: usize) -> Result<(), ConsoleError> {
    if index >= self.markets.len() {
      return Err(ConsoleError::validation(
        "market",
        format!("index {index} out of range"),
      ));
    }
    self.active = index;
    info!(market = %self.market().name, "Active market changed");
    Ok(())
  }
}
