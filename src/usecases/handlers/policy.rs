//! Policy purchase, settlement and pricing.
//!
//! The two premium queries deliberately differ. "Query Insurance Price"
//! is the operator-facing quote and refuses non-numeric input before
//! calling the ledger. "Calculate Premium" is the diagnostic variant: it
//! forwards whatever was typed and lets the ledger client reject it, so
//! the operator sees exactly what the client does with raw input.

use crate::domain::amount::{format_tokens, parse_number, parse_token_amount, parse_whole_days};
use crate::domain::{PolicyId, Report, Tone};
use crate::error::ConsoleError;
use crate::usecases::operation::Operation;
use crate::usecases::prompt::{ask_text, choose, labelled};

use super::{OperationContext, transaction_report};

const COVERAGE_PROMPT: &str = "How much coverage do you want to buy?";
const DURATION_PROMPT: &str = "How long do you want to buy? (in days)";

async fn ask_coverage_and_duration(
  ctx: &OperationContext<'_>,
) -> Result<(String, String), ConsoleError> {
  let coverage = ask_text(ctx.input, COVERAGE_PROMPT).await?;
  let duration = ask_text(ctx.input, DURATION_PROMPT).await?;
  Ok((coverage, duration))
}

/// Buys a policy for the active signer, who is also the beneficiary.
///
/// The duration must be a whole number of days: "0.5" is rejected here,
/// before any transaction, even though the price queries accept it.
pub(super) async fn buy_policy(ctx: &mut OperationContext<'_>) -> Result<Report, ConsoleError> {
  let (coverage, duration) = ask_coverage_and_duration(ctx).await?;
  let coverage = parse_token_amount("coverage", &coverage)?;
  let duration_days = parse_whole_days("duration", &duration)?;

  let signer = ctx.session.signer();
  let tx = ctx
    .ledger
    .buy_policy(
      ctx.session.market(),
      signer,
      signer,
      coverage,
      duration_days,
      ctx.session.fee_override(),
    )
    .await
    .map_err(ConsoleError::ledger("buyPolicy"))?;

  Ok(transaction_report(Operation::BuyPolicy, tx))
}

pub(super) async fn settle_policy(ctx: &mut OperationContext<'_>) -> Result<Report, ConsoleError> {
  let policies: Vec<PolicyId> = ctx
    .ledger
    .policies_of(ctx.session.market(), ctx.session.signer())
    .await
    .map_err(ConsoleError::ledger("getPolicies"))?;
  let policy = choose(
    ctx.input,
    "policies",
    "Which policy do you want to settle?",
    &labelled(&policies),
  )
  .await?;

  let tx = ctx
    .ledger
    .settle_policy(
      ctx.session.market(),
      ctx.session.signer(),
      policy,
      ctx.session.fee_override(),
    )
    .await
    .map_err(ConsoleError::ledger("settlePolicy"))?;

  Ok(transaction_report(Operation::SettlePolicy, tx))
}

/// Checked quote: both fields must be numbers before the ledger is asked.
pub(super) async fn query_insurance_price(
  ctx: &mut OperationContext<'_>,
) -> Result<Report, ConsoleError> {
  let (coverage, duration) = ask_coverage_and_duration(ctx).await?;
  parse_number("coverage", &coverage)?;
  parse_number("duration", &duration)?;

  let price = ctx
    .ledger
    .premium(ctx.session.market(), coverage.trim(), duration.trim())
    .await
    .map_err(ConsoleError::ledger("getPremium"))?;

  Ok(
    Report::new(Operation::QueryInsurancePrice.label())
      .line(Tone::Success, format!("Price: {}", format_tokens(price))),
  )
}

/// Unchecked quote: the raw text goes to the ledger client as typed.
pub(super) async fn calculate_premium(
  ctx: &mut OperationContext<'_>,
) -> Result<Report, ConsoleError> {
  let (coverage, duration) = ask_coverage_and_duration(ctx).await?;

  let premium = ctx
    .ledger
    .premium(ctx.session.market(), &coverage, &duration)
    .await
    .map_err(ConsoleError::ledger("getPremium"))?;

  Ok(
    Report::new(Operation::CalculatePremium.label())
      .line(Tone::Plain, format!("premium: {} ({premium} base units)", format_tokens(premium))),
  )
}
