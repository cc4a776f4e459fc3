//! # advisorctl Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components shared by every
//! command: configuration, the env file reader, and error handling.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading, merging, and validation
//! - `env_file`: Reading the application's `.env` file and detecting placeholder values
//! - `error`: Error types, the `Result` alias, and the validation exit code registry
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::env_file::EnvFile; // For reading API keys
//! use crate::core::error::{AdvisorError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod env_file;
pub mod error;
