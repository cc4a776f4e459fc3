//! # advisorctl Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the command groups of the advisorctl CLI and makes
//! them available to the entry point (`main.rs`).
//!
//! ## Command Groups
//!
//! - `stack`: lifecycle of the advisor compose stack (`up`, `down`, `logs`,
//!   `shell`, `test`, `interactive`, `prod`, `build`, `clean`, `status`) and
//!   pass-through of unknown subcommands to compose.
//! - `validate`: the fail-fast environment validation pipeline.
//!
//! Each group defines its own argument structures and handler functions.
//! Handlers return the process exit code; `main.rs` exits with it.
//!

/// Compose stack lifecycle commands.
pub mod stack;
/// Environment validation pipeline.
pub mod validate;
