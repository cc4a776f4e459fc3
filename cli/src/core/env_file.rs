//! # advisorctl Environment File Reader
//!
//! File: cli/src/core/env_file.rs
//!
//! ## Overview
//!
//! Reads the application's `.env` file: newline-separated `KEY=VALUE` pairs
//! holding the market-data and LLM provider API keys. The format is kept
//! deliberately small, matching what `docker compose` itself reads:
//!
//! - A line defines `KEY` if it starts with `KEY=`; everything after the
//!   first `=` is the value.
//! - When a key is defined more than once, the **last** definition wins.
//! - One layer of surrounding double quotes is stripped from the value.
//! - Comment lines (`# ...`) and lines without `=` define nothing.
//!
//! A value is considered unset when it is empty or still holds the template
//! placeholder `your-<anything>-api-key`.
//!
//! This module never writes to an existing env file. The only mutation is
//! `ensure_env_file`, which copies the `.env.example` template when the env
//! file does not exist yet.
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::env_file::{self, EnvFile};
//!
//! let env = EnvFile::load(Path::new(".env"))?;
//! let polygon = env.get("POLYGON_API_KEY");
//! if env_file::is_placeholder_or_empty(polygon) {
//!     println!("POLYGON_API_KEY still needs a real value");
//! }
//! ```
//!
use crate::core::error::{AdvisorError, Result};
use anyhow::{anyhow, Context};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fs, path::Path};
use tracing::{debug, info};

/// Template placeholder pattern, e.g. `your-openai-api-key`.
static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^your-.*-api-key$").unwrap_or_else(|e| panic!("invalid placeholder regex: {e}"))
});

/// Parsed contents of an env file, kept in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
}

impl EnvFile {
    /// Parses env file content.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .filter_map(|line| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                let (key, value) = line.split_once('=')?;
                if key.is_empty() || key.starts_with('#') {
                    return None;
                }
                Some((key.to_string(), strip_quotes(value).to_string()))
            })
            .collect();
        EnvFile { entries }
    }

    /// Reads and parses the env file at `path`.
    ///
    /// A missing file yields an empty `EnvFile` (every key reads as empty).
    /// Callers that need the file to exist must check that first.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("Env file {} not found, treating all keys as empty", path.display());
            return Ok(EnvFile::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read env file: {}", path.display()))?;
        Ok(EnvFile::parse(&content))
    }

    /// Returns the last value assigned to `key`, or `""` when the key is absent.
    pub fn get(&self, key: &str) -> &str {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// True when `key` holds a real (non-empty, non-placeholder) value.
    pub fn is_configured(&self, key: &str) -> bool {
        !is_placeholder_or_empty(self.get(key))
    }
}

/// Returns the last value assigned to `key` in the env file at `path`.
#[allow(dead_code)] // Single-key lookup for callers that do not keep the parsed file.
pub fn get_value(path: &Path, key: &str) -> Result<String> {
    Ok(EnvFile::load(path)?.get(key).to_string())
}

/// True if `value` is empty or matches `your-<anything>-api-key`.
pub fn is_placeholder_or_empty(value: &str) -> bool {
    value.is_empty() || PLACEHOLDER_PATTERN.is_match(value)
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Result of making sure the env file exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvFileStatus {
    /// The env file was already there.
    Present,
    /// The env file was missing and has been copied from the template.
    CreatedFromTemplate,
    /// Neither the env file nor the template exist.
    Missing,
}

/// Ensures `env_path` exists, copying `template_path` into place if needed.
///
/// # Errors
///
/// Returns `AdvisorError::FileSystem` if the template exists but cannot be copied.
pub fn ensure_env_file(env_path: &Path, template_path: &Path) -> Result<EnvFileStatus> {
    if env_path.is_file() {
        debug!("Env file present at {}", env_path.display());
        return Ok(EnvFileStatus::Present);
    }
    if !template_path.is_file() {
        debug!(
            "Neither {} nor {} exist",
            env_path.display(),
            template_path.display()
        );
        return Ok(EnvFileStatus::Missing);
    }
    fs::copy(template_path, env_path).map_err(|e| {
        anyhow!(AdvisorError::FileSystem(format!(
            "Failed to copy {} to {}: {}",
            template_path.display(),
            env_path.display(),
            e
        )))
    })?;
    info!(
        "Created {} from template {}",
        env_path.display(),
        template_path.display()
    );
    Ok(EnvFileStatus::CreatedFromTemplate)
}
