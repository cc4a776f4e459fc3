//! # advisorctl HTTP Probes (`common::network::http`)
//!
//! File: cli/src/common/network/http.rs
//!
//! ## Overview
//!
//! A probe issues one GET request and reports the HTTP status code. It never
//! fails: transport errors (DNS, TLS, refused connection) and timeouts are
//! folded into the sentinel status `TRANSPORT_FAILURE` (printed as `000`),
//! which the caller treats like any other non-200 answer.
//!
//! Probe URLs carry API keys as query parameters, so they are only ever
//! logged through `redact_url`.
//!
use crate::core::error::{AdvisorError, Result};
use anyhow::anyhow;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Status reported when no HTTP response was received.
pub const TRANSPORT_FAILURE: u16 = 0;

/// Issues a GET request and reports the response status.
#[async_trait]
pub trait HttpProbe: Send + Sync {
    async fn status(&self, url: &str) -> u16;
}

/// `HttpProbe` backed by a `reqwest` client with a fixed timeout.
#[derive(Debug, Clone)]
pub struct ReqwestProbe {
    client: reqwest::Client,
}

impl ReqwestProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("advisorctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow!(AdvisorError::Http(format!("Failed to create HTTP client: {}", e))))?;
        Ok(ReqwestProbe { client })
    }
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn status(&self, url: &str) -> u16 {
        debug!("GET {}", redact_url(url));
        match self.client.get(url).send().await {
            Ok(response) => response.status().as_u16(),
            Err(e) => {
                // reqwest errors embed the full URL, API key included.
                warn!("GET {} failed: {}", redact_url(url), e.without_url());
                TRANSPORT_FAILURE
            }
        }
    }
}

/// Drops the query string, which may contain credentials.
pub fn redact_url(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => format!("{}?<redacted>", base),
        None => url.to_string(),
    }
}

/// Formats a probe status the way it is shown to users (`000` for no response).
pub fn format_status(status: u16) -> String {
    format!("{:03}", status)
}
