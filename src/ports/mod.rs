//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `LedgerClient`: MetaDefender contracts, quote token, registry, chain clock
//! - `InputCollector`: Operator prompts (free text, single choice)
//! - `ReportSink`: Rendering of operation results

pub mod display;
pub mod input;
pub mod ledger;
