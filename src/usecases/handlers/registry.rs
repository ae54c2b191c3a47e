//! Markets registry and protocol-wide views.

use alloy::primitives::Address;

use crate::domain::{MarketContracts, MarketRegistration, Report, Tone};
use crate::error::ConsoleError;
use crate::usecases::operation::Operation;
use crate::usecases::prompt::{ask_text, choose};

use super::{OperationContext, transaction_report};

async fn ask_address(
  ctx: &OperationContext<'_>,
  field: &'static str,
  message: &str,
) -> Result<Address, ConsoleError> {
  let raw = ask_text(ctx.input, message).await?;
  raw
    .trim()
    .parse()
    .map_err(|e| ConsoleError::validation(field, format!("{:?} is not an address: {e}", raw.trim())))
}

pub(super) async fn query_global_views(
  ctx: &mut OperationContext<'_>,
) -> Result<Report, ConsoleError> {
  let globals = ctx
    .ledger
    .globals()
    .await
    .map_err(ConsoleError::ledger("getGlobals"))?;

  Ok(Report::new(Operation::QueryGlobalViews.label()).section("Globals", Tone::Plain, globals.lines()))
}

pub(super) async fn query_market_addresses(
  ctx: &mut OperationContext<'_>,
) -> Result<Report, ConsoleError> {
  let markets = ctx
    .ledger
    .insurance_markets()
    .await
    .map_err(ConsoleError::ledger("getInsuranceMarkets"))?;

  let lines = markets
    .iter()
    .map(|m| format!("{}: {}", m.name, m.id))
    .collect();
  Ok(Report::new(Operation::QueryMarketAddresses.label()).section("Registered markets", Tone::Plain, lines))
}

/// Register the active deployment market in the on-chain registry.
pub(super) async fn register_market(
  ctx: &mut OperationContext<'_>,
) -> Result<Report, ConsoleError> {
  let registration = MarketRegistration::from(ctx.session.market());
  let tx = ctx
    .ledger
    .add_market(ctx.session.signer(), &registration, ctx.session.fee_override())
    .await
    .map_err(ConsoleError::ledger("registerMarket"))?;

  Ok(transaction_report(Operation::RegisterMarket, tx))
}

pub(super) async fn add_market(ctx: &mut OperationContext<'_>) -> Result<Report, ConsoleError> {
  let name = ask_text(ctx.input, "What is the market name?").await?;
  let name = name.trim().to_string();
  if name.is_empty() {
    return Err(ConsoleError::validation("market name", "must not be empty"));
  }

  let defender = ask_address(ctx, "defender address", "MetaDefender address:").await?;
  let certificate = ask_address(
    ctx,
    "certificate address",
    "LiquidityCertificate address:",
  )
  .await?;
  let policy = ask_address(ctx, "policy address", "Policy address:").await?;

  let registration = MarketRegistration {
    name,
    contracts: MarketContracts {
      defender,
      certificate,
      policy,
    },
  };
  let tx = ctx
    .ledger
    .add_market(ctx.session.signer(), &registration, ctx.session.fee_override())
    .await
    .map_err(ConsoleError::ledger("registerMarket"))?;

  Ok(transaction_report(Operation::AddMarket, tx))
}

pub(super) async fn remove_market(ctx: &mut OperationContext<'_>) -> Result<Report, ConsoleError> {
  let markets = ctx
    .ledger
    .insurance_markets()
    .await
    .map_err(ConsoleError::ledger("getInsuranceMarkets"))?;
  let options: Vec<(String, Address)> = markets.into_iter().map(|m| (m.name, m.id)).collect();
  let id = choose(
    ctx.input,
    "registered markets",
    "Which market do you want to remove?",
    &options,
  )
  .await?;

  let tx = ctx
    .ledger
    .remove_market(ctx.session.signer(), id, ctx.session.fee_override())
    .await
    .map_err(ConsoleError::ledger("removeMarket"))?;

  Ok(transaction_report(Operation::RemoveMarket, tx))
}
