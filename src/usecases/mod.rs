//! Use Cases Layer - Console Workflows
//!
//! Orchestrates the session, the operation catalog and the handlers
//! on top of the port interfaces.
//!
//! Use cases:
//! - `Dispatcher`: Menu loop, failure containment
//! - `Session`: Active signer and market
//! - `Operation`: Fixed menu catalog
//! - `handlers`: One workflow per menu entry

pub mod dispatcher;
pub mod handlers;
pub mod operation;
pub mod prompt;
pub mod session;

pub use dispatcher::{Dispatcher, Flow};
pub use operation::Operation;
pub use session::Session;
