//! Command Dispatcher - The Console Main Loop
//!
//! Renders the menu, waits for a choice, runs the bound handler to
//! completion and shows its report. Operations run strictly one after
//! another; a failing operation is logged and shown, then the menu comes
//! back. Only "Exit" leaves the loop.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, instrument, warn};

use crate::ports::display::ReportSink;
use crate::ports::input::InputCollector;
use crate::ports::ledger::LedgerClient;

use super::handlers::{self, OperationContext, Outcome};
use super::operation::Operation;
use super::session::Session;

/// Prompt shown above the menu.
pub const MENU_PROMPT: &str = "What do you want to do?";

/// Whether the loop continues after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
  /// Back to the menu.
  Continue,
  /// Session over.
  Exit,
}

/// Sequential menu loop over one session.
pub struct Dispatcher<L: LedgerClient, I: InputCollector, S: ReportSink> {
  /// Ledger port.
  ledger: Arc<L>,
  /// Operator prompts.
  input: Arc<I>,
  /// Report rendering.
  sink: Arc<S>,
  /// Operator session, lent to one handler at a time.
  session: Session,
  /// Operations run so far (including failed ones).
  completed: u64,
  /// Operations that ended in an error.
  failed: u64,
}

impl<L: LedgerClient, I: InputCollector, S: ReportSink> Dispatcher<L, I, S> {
  /// Create a dispatcher over an initialized session.
  pub fn new(ledger: Arc<L>, input: Arc<I>, sink: Arc<S>, session: Session) -> Self {
    Self {
      ledger,
      input,
      sink,
      session,
      completed: 0,
      failed: 0,
    }
  }

  /// Current session state.
  pub fn session(&self) -> &Session {
    &self.session
  }

  /// Number of operations run and number of those that failed.
  pub fn stats(&self) -> (u64, u64) {
    (self.completed, self.failed)
  }

  /// Run until the operator chooses "Exit".
  ///
  /// # Errors
  /// Returns an error only when the menu prompt itself fails (for
  /// example a closed terminal). Handler failures never end the loop.
  pub async fn run(&mut self) -> Result<()> {
    let menu = Operation::menu();
    info!(market = %self.session.market().name, "Console ready");

    loop {
      let index = self
        .input
        .select(MENU_PROMPT, &menu)
        .await
        .context("Failed to read menu choice")?;

      let Some(operation) = Operation::ALL.get(index).copied() else {
        warn!(index, "Menu choice out of range, ignoring");
        continue;
      };

      if self.step(operation).await == Flow::Exit {
        info!(
          completed = self.completed,
          failed = self.failed,
          "Exit chosen, session over"
        );
        return Ok(());
      }
    }
  }

  /// Run one operation and render its outcome.
  #[instrument(skip(self), fields(signer = %self.session.signer()))]
  pub async fn step(&mut self, operation: Operation) -> Flow {
    let mut ctx = OperationContext {
      ledger: self.ledger.as_ref(),
      input: self.input.as_ref(),
      session: &mut self.session,
    };

    let outcome = handlers::execute(operation, &mut ctx).await;
    self.completed += 1;

    match outcome {
      Ok(Outcome::Exit) => Flow::Exit,
      Ok(Outcome::Report(report)) => {
        self.sink.show(&report);
        Flow::Continue
      }
      Err(e) => {
        self.failed += 1;
        error!(
          operation = %operation,
          kind = e.kind(),
          error = %e,
          "Operation failed"
        );
        self.sink.show_failure(operation.label(), &e.to_string());
        Flow::Continue
      }
    }
  }
}
