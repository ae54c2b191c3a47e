//! Development-chain clock control.

use chrono::DateTime;

use crate::domain::{Report, Tone};
use crate::error::ConsoleError;
use crate::usecases::operation::Operation;

use super::OperationContext;

/// Seconds the clock moves per "Time Travel".
pub const TIME_TRAVEL_SECONDS: u64 = 86_400;

fn describe(timestamp: u64) -> String {
  let iso = i64::try_from(timestamp)
    .ok()
    .and_then(|secs| DateTime::from_timestamp(secs, 0))
    .map(|dt| dt.to_rfc3339())
    .unwrap_or_else(|| "out of range".to_string());
  format!("current time is {timestamp} ({iso})")
}

pub(super) async fn time_travel(ctx: &mut OperationContext<'_>) -> Result<Report, ConsoleError> {
  let before = ctx
    .ledger
    .current_time()
    .await
    .map_err(ConsoleError::ledger("getBlock"))?;
  ctx
    .ledger
    .advance_time(TIME_TRAVEL_SECONDS)
    .await
    .map_err(ConsoleError::ledger("evm_increaseTime"))?;
  let after = ctx
    .ledger
    .current_time()
    .await
    .map_err(ConsoleError::ledger("getBlock"))?;

  Ok(
    Report::new(Operation::TimeTravel.label())
      .line(Tone::Plain, describe(before))
      .line(Tone::Success, describe(after)),
  )
}
