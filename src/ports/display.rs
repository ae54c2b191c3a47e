//! Report Sink Port - Result Rendering
//!
//! Receives display-ready reports from the dispatcher.

use crate::domain::Report;

/// Trait for showing operation results to the operator.
pub trait ReportSink: Send + Sync + 'static {
  /// Render a successful operation's report.
  fn show(&self, report: &Report);

  /// Render a contained operation failure.
  fn show_failure(&self, operation: &str, message: &str);
}
