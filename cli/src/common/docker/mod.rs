//! # advisorctl Docker Utilities (`common::docker`)
//!
//! File: cli/src/common/docker/mod.rs
//!
//! ## Overview
//!
//! Everything advisorctl knows about Docker:
//!
//! - **`compose`**: detecting the compose flavour and building compose invocations.
//! - **`connect`**: connecting to the Engine API with `bollard`.
//! - **`state`**: listing the compose project's containers.
//! - **`images`**: listing the compose project's images.
//!
//! Lifecycle operations (up, down, build, run) are delegated to the compose
//! CLI rather than reimplemented against the API, so the stack behaves
//! exactly as `docker compose` users expect. The API is only used for the
//! read-only listing in `advisorctl status`.
//!
pub mod compose;
pub mod connect;
pub mod images;
pub mod state;

pub use compose::{Compose, Profile};
