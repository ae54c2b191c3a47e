//! Domain layer - Console data model.
//!
//! Markets, liquidity positions, token amounts, fee overrides and the
//! display-ready report type. Nothing here talks to the ledger or the
//! terminal; everything is testable in isolation.

pub mod amount;
pub mod fees;
pub mod market;
pub mod position;
pub mod report;

// Re-export core types for convenience
pub use fees::{FeeOverride, FeePolicy};
pub use market::{Market, MarketContracts, MarketRegistration, RegisteredMarket};
pub use position::{CertificateId, CertificateInfo, GlobalsSnapshot, PolicyId, PolicyInfo};
pub use report::{Report, Section, Tone};
