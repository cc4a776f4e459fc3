//! # advisorctl Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//!
//! ## Overview
//!
//! Network access in advisorctl is limited to the lightweight HTTP GET probes
//! the validation pipeline sends to the configured API providers.
//!
//! - **`http`**: the `HttpProbe` trait, its `reqwest` implementation with a
//!   per-request timeout, and URL redaction for log output.
//!
pub mod http;
