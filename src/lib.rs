//! Blockfall (workspace facade crate).
//!
//! Re-exports the game crates under one name and holds the pieces only the
//! terminal binary needs: startup configuration and the session log.

pub mod config;
pub mod session_log;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
