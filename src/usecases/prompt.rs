//! Prompt helpers shared by handlers and session setup.
//!
//! `choose` pairs each displayed label with the identifier it stands
//! for, so handlers get back the identifier and never parse labels.

use tracing::warn;

use crate::error::ConsoleError;
use crate::ports::input::InputCollector;

/// Ask a free-text question.
pub async fn ask_text(input: &dyn InputCollector, message: &str) -> Result<String, ConsoleError> {
  input.text(message).await.map_err(ConsoleError::Input)
}

/// Offer `options` as a single-choice list and return the chosen value.
///
/// `what` names the set for the empty-set error ("certificates").
pub async fn choose<T: Clone>(
  input: &dyn InputCollector,
  what: &'static str,
  message: &str,
  options: &[(String, T)],
) -> Result<T, ConsoleError> {
  if options.is_empty() {
    warn!(what, "Nothing to choose from");
    return Err(ConsoleError::NothingToChoose(what));
  }

  let labels: Vec<String> = options.iter().map(|(label, _)| label.clone()).collect();
  let index = input
    .select(message, &labels)
    .await
    .map_err(ConsoleError::Input)?;

  options
    .get(index)
    .map(|(_, value)| value.clone())
    .ok_or_else(|| ConsoleError::Input(anyhow::anyhow!("selection {index} out of range")))
}

/// Options whose label is the value's `Display` form.
pub fn labelled<T: ToString + Clone>(values: &[T]) -> Vec<(String, T)> {
  values.iter().map(|v| (v.to_string(), v.clone())).collect()
}
