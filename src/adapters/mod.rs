//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (EVM RPC, interactive terminal).
//!
//! Adapter categories:
//! - `chain`: MetaDefender contracts via alloy-rs
//! - `terminal`: Prompts and report rendering via dialoguer

pub mod chain;
pub mod terminal;
