//! Operation Handlers - One Per Menu Entry
//!
//! A handler prompts for its parameters, validates them locally, makes
//! its ledger calls in sequence and returns a `Report`. Enumerable sets
//! (certificates, policies, signers, registry entries) are queried right
//! before the prompt that offers them and are never reused across
//! operations, since any mutating call may change them.

mod account;
mod chain;
mod liquidity;
mod policy;
mod registry;

use alloy::primitives::TxHash;
use tracing::info;

use crate::domain::{Report, Tone};
use crate::error::ConsoleError;
use crate::ports::input::InputCollector;
use crate::ports::ledger::LedgerClient;

use super::operation::Operation;
use super::session::Session;

pub use account::{APPROVAL_TOKENS, FAUCET_TOKENS};
pub use chain::TIME_TRAVEL_SECONDS;

/// Everything a handler may touch.
pub struct OperationContext<'a> {
  /// Remote ledger.
  pub ledger: &'a dyn LedgerClient,
  /// Operator prompts.
  pub input: &'a dyn InputCollector,
  /// Session, mutable only through its setters.
  pub session: &'a mut Session,
}

/// What the dispatcher should do after a handler finishes.
#[derive(Debug)]
pub enum Outcome {
  /// Show the report and return to the menu.
  Report(Report),
  /// End the session.
  Exit,
}

/// Run the handler bound to `operation`.
pub async fn execute(
  operation: Operation,
  ctx: &mut OperationContext<'_>,
) -> Result<Outcome, ConsoleError> {
  let report = match operation {
    Operation::GetRewards => liquidity::get_rewards(ctx).await?,
    Operation::ClaimRewards => liquidity::claim_rewards(ctx).await?,
    Operation::ProvideLiquidity => liquidity::provide_liquidity(ctx).await?,
    Operation::LiquidityWithdraw => liquidity::withdraw_liquidity(ctx).await?,
    Operation::BuyPolicy => policy::buy_policy(ctx).await?,
    Operation::SettlePolicy => policy::settle_policy(ctx).await?,
    Operation::QueryMyAccount => account::query_my_account(ctx).await?,
    Operation::QueryInsurancePrice => policy::query_insurance_price(ctx).await?,
    Operation::QueryGlobalViews => registry::query_global_views(ctx).await?,
    Operation::CalculatePremium => policy::calculate_premium(ctx).await?,
    Operation::RegisterMarket => registry::register_market(ctx).await?,
    Operation::QueryMarketAddresses => registry::query_market_addresses(ctx).await?,
    Operation::TimeTravel => chain::time_travel(ctx).await?,
    Operation::GiveMeSomeTestToken => account::give_me_some_test_token(ctx).await?,
    Operation::Approve => account::approve(ctx).await?,
    Operation::Transfer => account::transfer(ctx).await?,
    Operation::MyAddress => account::my_address(ctx),
    Operation::ChooseAddress => account::choose_address(ctx).await?,
    Operation::AddMarket => registry::add_market(ctx).await?,
    Operation::RemoveMarket => registry::remove_market(ctx).await?,
    Operation::Exit => return Ok(Outcome::Exit),
  };
  Ok(Outcome::Report(report))
}

/// Report for a mined transaction.
fn transaction_report(operation: Operation, tx_hash: TxHash) -> Report {
  info!(operation = %operation, tx = %tx_hash, "Transaction confirmed");
  Report::new(operation.label()).line(Tone::Success, format!("transaction {tx_hash}"))
}
