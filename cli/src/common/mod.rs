//! # advisorctl Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities used by the command handlers: everything that touches the
//! host (processes, the Docker daemon, the network) or the terminal. Command
//! specific logic stays in `commands::`; configuration and errors in `core::`.
//!
//! ## Architecture
//!
//! - **`docker`**: compose detection and invocation building, plus the
//!   Docker Engine API (`bollard`) listing used by `status`.
//! - **`network`**: HTTP connectivity probes.
//! - **`process`**: the `CommandRunner` abstraction over external commands.
//! - **`system`**: runtime installation and daemon checks.
//! - **`ui`**: tagged, colored console output and confirmation prompts.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{docker::compose, process::SystemRunner, system};
//!
//! # async fn run_example() {
//! let runner = SystemRunner;
//! if system::daemon_running(&runner).await {
//!     let tool = compose::detect_compose(&runner).await;
//! }
//! # }
//! ```
//!

/// Compose invocation and Docker Engine API helpers.
pub mod docker;
/// HTTP connectivity probes.
pub mod network;
/// External command execution behind the `CommandRunner` trait.
pub mod process;
/// Host checks for the container runtime.
pub mod system;
/// Console output and prompts.
pub mod ui;
