//! Console error taxonomy.
//!
//! Ports and adapters speak `anyhow`; handlers wrap those failures into
//! `ConsoleError` so the dispatcher can log what kind of failure ended an
//! operation. Only `Config` is fatal, and only before the menu loop starts.

use thiserror::Error;

/// Errors surfaced by startup and by operation handlers.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Deployment record or signer set unusable. Aborts startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Operator input rejected before any ledger call.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Name of the prompted field.
        field: &'static str,
        /// Why the input was rejected.
        reason: String,
    },

    /// A selection was needed but the ledger returned nothing to pick from.
    #[error("no {0} available to choose from")]
    NothingToChoose(&'static str),

    /// The operator prompt itself failed (closed terminal, interrupted read).
    #[error("input failed: {0:#}")]
    Input(#[source] anyhow::Error),

    /// The remote ledger rejected or failed a call.
    #[error("ledger call `{call}` failed: {source:#}")]
    Ledger {
        /// Contract operation that failed.
        call: &'static str,
        /// Underlying client error.
        #[source]
        source: anyhow::Error,
    },
}

impl ConsoleError {
    /// Build a validation error for `field`.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Adapter for `map_err` on ledger calls.
    pub fn ledger(call: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Self::Ledger { call, source }
    }

    /// Short machine-readable kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Validation { .. } => "validation",
            Self::NothingToChoose(_) => "empty_choice",
            Self::Input(_) => "input",
            Self::Ledger { .. } => "ledger",
        }
    }

    /// Whether the session must stop because of this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_config_is_fatal() {
        assert!(ConsoleError::Config("missing".into()).is_fatal());
        assert!(!ConsoleError::validation("amount", "not a number").is_fatal());
        assert!(!ConsoleError::NothingToChoose("certificates").is_fatal());
        assert!(!ConsoleError::ledger("claimRewards")(anyhow::anyhow!("revert")).is_fatal());
    }

    #[test]
    fn test_ledger_error_message_names_call() {
        let err = ConsoleError::ledger("buyPolicy")(anyhow::anyhow!("insufficient funds"));
        assert_eq!(err.kind(), "ledger");
        assert_eq!(
            err.to_string(),
            "ledger call `buyPolicy` failed: insufficient funds"
        );
    }
}
