//! Shared utilities for the taikutsu workspace.
//!
//! Cross-cutting concerns used by every binary: logging setup and the
//! clock abstraction.

pub mod logger;
pub mod time;
