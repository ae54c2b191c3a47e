//! Signer identity, quote token and account overview.

use alloy::primitives::Address;

use crate::domain::amount::{format_tokens, parse_token_amount, whole_tokens};
use crate::domain::{Report, Tone};
use crate::error::ConsoleError;
use crate::usecases::operation::Operation;
use crate::usecases::prompt::{ask_text, choose, labelled};

use super::{OperationContext, transaction_report};

/// Tokens minted by the faucet entry.
pub const FAUCET_TOKENS: u64 = 10_000;

/// Allowance granted to the active market by the approve entry.
pub const APPROVAL_TOKENS: u64 = 99_999_999;

async fn choose_signer(ctx: &OperationContext<'_>) -> Result<Address, ConsoleError> {
  let signers = ctx
    .ledger
    .signers()
    .await
    .map_err(ConsoleError::ledger("getSigners"))?;
  choose(
    ctx.input,
    "signing accounts",
    "Which address do you want to choose?",
    &labelled(&signers),
  )
  .await
}

/// Balance, every certificate and every policy of the active signer.
///
/// Spent certificates and expired policies are listed too: this is the
/// audit view, not a selection list.
pub(super) async fn query_my_account(
  ctx: &mut OperationContext<'_>,
) -> Result<Report, ConsoleError> {
  let owner = ctx.session.signer();
  let market = ctx.session.market();

  let balance = ctx
    .ledger
    .token_balance(owner)
    .await
    .map_err(ConsoleError::ledger("balanceOf"))?;

  let certificate_ids = ctx
    .ledger
    .certificates_of(market, owner)
    .await
    .map_err(ConsoleError::ledger("getLiquidityProviders"))?;
  let mut certificates = Vec::with_capacity(certificate_ids.len());
  for id in certificate_ids {
    let info = ctx
      .ledger
      .certificate_info(market, id)
      .await
      .map_err(ConsoleError::ledger("getCertificateInfo"))?;
    certificates.push(info.to_string());
  }

  let policy_ids = ctx
    .ledger
    .policies_of(market, owner)
    .await
    .map_err(ConsoleError::ledger("getPolicies"))?;
  let mut policies = Vec::with_capacity(policy_ids.len());
  for id in policy_ids {
    let info = ctx
      .ledger
      .policy_info(market, id)
      .await
      .map_err(ConsoleError::ledger("getPolicyInfo"))?;
    policies.push(info.to_string());
  }

  Ok(
    Report::new(Operation::QueryMyAccount.label())
      .section(
        "Balance",
        Tone::Plain,
        vec![format!("You have the balance of {} tokens", format_tokens(balance))],
      )
      .section("Certificates (including expired ones)", Tone::Success, certificates)
      .section("Policies", Tone::Alert, policies),
  )
}

pub(super) fn my_address(ctx: &OperationContext<'_>) -> Report {
  Report::new(Operation::MyAddress.label()).line(Tone::Success, ctx.session.signer().to_string())
}

pub(super) async fn choose_address(ctx: &mut OperationContext<'_>) -> Result<Report, ConsoleError> {
  let signer = choose_signer(ctx).await?;
  ctx.session.set_signer(signer);
  Ok(
    Report::new(Operation::ChooseAddress.label())
      .line(Tone::Success, format!("active address: {signer}")),
  )
}

pub(super) async fn give_me_some_test_token(
  ctx: &mut OperationContext<'_>,
) -> Result<Report, ConsoleError> {
  let signer = ctx.session.signer();
  let tx = ctx
    .ledger
    .mint_test_token(signer, signer, whole_tokens(FAUCET_TOKENS))
    .await
    .map_err(ConsoleError::ledger("mint"))?;

  Ok(transaction_report(Operation::GiveMeSomeTestToken, tx))
}

pub(super) async fn approve(ctx: &mut OperationContext<'_>) -> Result<Report, ConsoleError> {
  let tx = ctx
    .ledger
    .approve(
      ctx.session.signer(),
      ctx.session.market().contracts.defender,
      whole_tokens(APPROVAL_TOKENS),
      ctx.session.fee_override(),
    )
    .await
    .map_err(ConsoleError::ledger("approve"))?;

  Ok(transaction_report(Operation::Approve, tx))
}

pub(super) async fn transfer(ctx: &mut OperationContext<'_>) -> Result<Report, ConsoleError> {
  let raw = ask_text(ctx.input, "How many tokens do you want to transfer?").await?;
  let amount = parse_token_amount("amount", &raw)?;
  let recipient = choose_signer(ctx).await?;

  let tx = ctx
    .ledger
    .transfer(
      ctx.session.signer(),
      recipient,
      amount,
      ctx.session.fee_override(),
    )
    .await
    .map_err(ConsoleError::ledger("transfer"))?;

  Ok(transaction_report(Operation::Transfer, tx))
}
