//! # advisorctl Required API Keys
//!
//! File: cli/src/commands/validate/keys.rs
//!
//! ## Overview
//!
//! The advisor needs market data and at least one LLM. In terms of the env
//! file that means two rules:
//!
//! 1. `POLYGON_API_KEY` must hold a real value.
//! 2. At least one of `GOOGLE_API_KEY`, `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`
//!    must hold a real value.
//!
//! "Real" means non-empty and not the template placeholder
//! (`your-<anything>-api-key`). Both rules are always evaluated so a single
//! run reports every missing key.
//!
//! The module also knows which providers can be probed cheaply for
//! connectivity: Polygon's ticker reference list and Google's model list both
//! take the key as a query parameter and are read-only.
//!
use crate::core::env_file::EnvFile;
use crate::core::error::Result;
use anyhow::Context;
use reqwest::Url;

/// Market-data provider key.
pub const MARKET_DATA_KEY: &str = "POLYGON_API_KEY";

/// LLM provider keys; any one of them satisfies the requirement.
pub const LLM_PROVIDER_KEYS: [&str; 3] = ["GOOGLE_API_KEY", "OPENAI_API_KEY", "ANTHROPIC_API_KEY"];

/// Keys the application reads when present. Never required.
pub const OPTIONAL_KEYS: [&str; 2] = ["GROQ_API_KEY", "ALPHAVANTAGE_API_KEY"];

/// Outcome of evaluating the required key rules against an env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReport {
    pub market_data_configured: bool,
    pub llm_configured: Vec<&'static str>,
    pub optional_configured: Vec<&'static str>,
}

impl KeyReport {
    pub fn evaluate(env: &EnvFile) -> Self {
        KeyReport {
            market_data_configured: env.is_configured(MARKET_DATA_KEY),
            llm_configured: LLM_PROVIDER_KEYS
                .into_iter()
                .filter(|key| env.is_configured(key))
                .collect(),
            optional_configured: OPTIONAL_KEYS
                .into_iter()
                .filter(|key| env.is_configured(key))
                .collect(),
        }
    }

    pub fn llm_satisfied(&self) -> bool {
        !self.llm_configured.is_empty()
    }

    #[cfg(test)]
    pub fn all_satisfied(&self) -> bool {
        self.market_data_configured && self.llm_satisfied()
    }
}

/// A provider endpoint that can be probed with a key as query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityProbe {
    /// Human-readable provider name.
    pub provider: &'static str,
    /// Env file key holding the credential.
    pub key: &'static str,
    base_url: &'static str,
    key_param: &'static str,
    extra_params: &'static [(&'static str, &'static str)],
}

impl ConnectivityProbe {
    /// Full request URL for `api_key`.
    pub fn url(&self, api_key: &str) -> Result<String> {
        let mut params: Vec<(&str, &str)> = self.extra_params.to_vec();
        params.push((self.key_param, api_key));
        let url = Url::parse_with_params(self.base_url, &params)
            .with_context(|| format!("Failed to build probe URL for {}", self.provider))?;
        Ok(url.into())
    }
}

/// Probes for providers with a cheap, read-only, key-in-query endpoint.
pub const PROBES: [ConnectivityProbe; 2] = [
    ConnectivityProbe {
        provider: "Polygon.io",
        key: MARKET_DATA_KEY,
        base_url: "https://api.polygon.io/v3/reference/tickers",
        key_param: "apiKey",
        extra_params: &[("limit", "1")],
    },
    ConnectivityProbe {
        provider: "Google Gemini",
        key: "GOOGLE_API_KEY",
        base_url: "https://generativelanguage.googleapis.com/v1beta/models",
        key_param: "key",
        extra_params: &[],
    },
];

/// Probes whose key is configured in `env`, in declaration order.
pub fn applicable_probes(env: &EnvFile) -> Vec<ConnectivityProbe> {
    PROBES
        .into_iter()
        .filter(|probe| env.is_configured(probe.key))
        .collect()
}
