//! Input Collector Port - Operator Prompts
//!
//! Two prompt shapes: free text and a single choice from a list. The
//! collector returns raw answers only; parsing and validation belong to
//! the operation handlers.

use async_trait::async_trait;

/// Trait for operator input.
///
/// Both methods suspend until the operator answers. There is no timeout.
#[async_trait]
pub trait InputCollector: Send + Sync + 'static {
  /// Ask a free-text question and return the answer verbatim.
  async fn text(&self, message: &str) -> anyhow::Result<String>;

  /// Ask the operator to pick one of `choices` (non-empty).
  ///
  /// Returns the index of the chosen entry.
  async fn select(&self, message: &str, choices: &[String]) -> anyhow::Result<usize>;
}
