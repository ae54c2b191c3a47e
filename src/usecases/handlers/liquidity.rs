//! Liquidity certificate operations.

use crate::domain::amount::{format_tokens, parse_token_amount};
use crate::domain::position::valid_certificates;
use crate::domain::{CertificateId, Report, Tone};
use crate::error::ConsoleError;
use crate::usecases::operation::Operation;
use crate::usecases::prompt::{ask_text, choose, labelled};

use super::{OperationContext, transaction_report};

/// Certificates of the active signer that the ledger still reports as valid.
///
/// Fans out one `getCertificateInfo` per certificate, in ledger order.
async fn valid_certificate_ids(
  ctx: &OperationContext<'_>,
) -> Result<Vec<CertificateId>, ConsoleError> {
  let market = ctx.session.market();
  let ids = ctx
    .ledger
    .certificates_of(market, ctx.session.signer())
    .await
    .map_err(ConsoleError::ledger("getLiquidityProviders"))?;

  let mut infos = Vec::with_capacity(ids.len());
  for id in ids {
    let info = ctx
      .ledger
      .certificate_info(market, id)
      .await
      .map_err(ConsoleError::ledger("getCertificateInfo"))?;
    infos.push(info);
  }

  Ok(valid_certificates(&infos))
}

async fn choose_certificate(
  ctx: &OperationContext<'_>,
  message: &str,
) -> Result<CertificateId, ConsoleError> {
  let ids = valid_certificate_ids(ctx).await?;
  choose(ctx.input, "valid certificates", message, &labelled(&ids)).await
}

pub(super) async fn get_rewards(ctx: &mut OperationContext<'_>) -> Result<Report, ConsoleError> {
  let certificate = choose_certificate(ctx, "Which certificate do you want to get rewards for?").await?;
  let rewards = ctx
    .ledger
    .get_rewards(ctx.session.market(), certificate, false)
    .await
    .map_err(ConsoleError::ledger("getRewards"))?;

  Ok(
    Report::new(Operation::GetRewards.label())
      .line(Tone::Success, format!("rewards of certificate #{certificate}: {}", format_tokens(rewards))),
  )
}

pub(super) async fn claim_rewards(ctx: &mut OperationContext<'_>) -> Result<Report, ConsoleError> {
  let certificate = choose_certificate(ctx, "Which certificate do you want to claim rewards for?").await?;
  let tx = ctx
    .ledger
    .claim_rewards(
      ctx.session.market(),
      ctx.session.signer(),
      certificate,
      ctx.session.fee_override(),
    )
    .await
    .map_err(ConsoleError::ledger("claimRewards"))?;

  Ok(transaction_report(Operation::ClaimRewards, tx))
}

pub(super) async fn provide_liquidity(
  ctx: &mut OperationContext<'_>,
) -> Result<Report, ConsoleError> {
  let raw = ask_text(ctx.input, "How many tokens do you want to provide?").await?;
  let amount = parse_token_amount("amount", &raw)?;

  let tx = ctx
    .ledger
    .provide_liquidity(
      ctx.session.market(),
      ctx.session.signer(),
      amount,
      ctx.session.fee_override(),
    )
    .await
    .map_err(ConsoleError::ledger("certificateProviderEntrance"))?;

  Ok(transaction_report(Operation::ProvideLiquidity, tx))
}

pub(super) async fn withdraw_liquidity(
  ctx: &mut OperationContext<'_>,
) -> Result<Report, ConsoleError> {
  let certificate = choose_certificate(ctx, "Which certificate do you want to withdraw?").await?;
  let tx = ctx
    .ledger
    .withdraw_liquidity(
      ctx.session.market(),
      ctx.session.signer(),
      certificate,
      false,
      ctx.session.fee_override(),
    )
    .await
    .map_err(ConsoleError::ledger("certificateProviderExit"))?;

  Ok(transaction_report(Operation::LiquidityWithdraw, tx))
}
