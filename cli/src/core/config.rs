//! # advisorctl Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the configuration that tells
//! advisorctl how the advisor's container stack is laid out: which compose
//! services map to the development, production and interactive profiles,
//! where the env file and its template live, and which commands the
//! validation pipeline runs inside the containers.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.advisorctl.toml` in the current directory or ancestors
//!    (the search stops at a directory containing `.git`)
//! 2. User-specific `<config dir>/advisorctl/config.toml`
//! 3. Default values defined in the code
//!
//! Files deserialize into `ConfigFile`, where every field is optional. The
//! merge takes each field from the project file, then the user file, then the
//! default, producing a fully populated `Config`. Paths are expanded (`~`)
//! and the result is validated before use.
//!
//! The resulting `Config` is loaded once in `main.rs` and passed by reference
//! to every command; nothing in the crate mutates it afterwards.
//!
//! ## Examples
//!
//! ```toml
//! # .advisorctl.toml
//! [compose]
//! file = "docker/docker-compose.yml"
//! dev_service = "financial-advisor-dev"
//!
//! [validation]
//! probe_timeout_secs = 10
//! ```
//!
use crate::core::error::{AdvisorError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".advisorctl.toml";

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub compose: ComposeConfig,
    pub env: EnvConfig,
    pub validation: ValidationConfig,
    pub test: TestConfig,
}

/// Layout of the compose stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeConfig {
    /// Explicit compose manifest. `None` lets the compose tool find its default file.
    pub file: Option<PathBuf>,
    /// Explicit compose project name. `None` means the compose default.
    pub project_name: Option<String>,
    /// Service started by the `development` profile.
    pub dev_service: String,
    /// Service started by the `production` profile.
    pub prod_service: String,
    /// Service started by the `interactive` profile.
    pub interactive_service: String,
}

/// Location of the env file and its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub file: PathBuf,
    pub template: PathBuf,
}

/// Commands and limits used by `advisorctl validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Command proving the application package imports inside a container.
    pub smoke_command: Vec<String>,
    /// Command proving the test runner is installed inside a container.
    pub dev_tool_command: Vec<String>,
    pub probe_timeout: Duration,
}

/// Test runner invoked by `advisorctl test`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfig {
    pub command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        merge_configs(ConfigFile::default(), ConfigFile::default())
    }
}

impl ComposeConfig {
    /// Project name used for Docker label filtering.
    ///
    /// Follows compose's own precedence: the configured name (passed as `-p`),
    /// then `COMPOSE_PROJECT_NAME`, then the name of the project directory,
    /// lower-cased and restricted to `[a-z0-9_-]`.
    pub fn effective_project_name(&self) -> Result<String> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let from_env = std::env::var("COMPOSE_PROJECT_NAME").ok();
        Ok(self.resolve_project_name(&cwd, from_env.as_deref()))
    }

    fn resolve_project_name(&self, cwd: &Path, from_env: Option<&str>) -> String {
        if let Some(name) = &self.project_name {
            return name.clone();
        }
        if let Some(name) = from_env.filter(|n| !n.trim().is_empty()) {
            return normalize_project_name(name);
        }
        // With `-f`, compose uses the directory holding the manifest.
        let project_dir = match &self.file {
            Some(file) => cwd
                .join(file)
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.to_path_buf()),
            None => cwd.to_path_buf(),
        };
        let dir_name = project_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        normalize_project_name(&dir_name)
    }
}

fn normalize_project_name(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

// --- On-disk representation ---

/// Configuration as written in a TOML file. Every field is optional.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub compose: ComposeSection,
    #[serde(default)]
    pub env: EnvSection,
    #[serde(default)]
    pub validation: ValidationSection,
    #[serde(default)]
    pub test: TestSection,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ComposeSection {
    pub file: Option<String>,
    pub project_name: Option<String>,
    pub dev_service: Option<String>,
    pub prod_service: Option<String>,
    pub interactive_service: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct EnvSection {
    pub file: Option<String>,
    pub template: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ValidationSection {
    pub smoke_command: Option<Vec<String>>,
    pub dev_tool_command: Option<Vec<String>>,
    pub probe_timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct TestSection {
    pub command: Option<Vec<String>>,
}

// --- Defaults ---

fn default_dev_service() -> String {
    "advisor-dev".to_string()
}
fn default_prod_service() -> String {
    "advisor-prod".to_string()
}
fn default_interactive_service() -> String {
    "advisor-interactive".to_string()
}
fn default_env_file() -> String {
    ".env".to_string()
}
fn default_env_template() -> String {
    ".env.example".to_string()
}
fn default_smoke_command() -> Vec<String> {
    vec![
        "python".to_string(),
        "-c".to_string(),
        "import sys; sys.path.insert(0, 'src'); import main; print('import ok')".to_string(),
    ]
}
fn default_dev_tool_command() -> Vec<String> {
    vec!["python".to_string(), "-m".to_string(), "pytest".to_string(), "--version".to_string()]
}
fn default_test_command() -> Vec<String> {
    vec!["python".to_string(), "-m".to_string(), "pytest".to_string()]
}
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

// --- Loading ---

/// Loads, merges, expands and validates the configuration.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged = merge_configs(
        project_config.unwrap_or_default(),
        user_config.unwrap_or_default(),
    );
    expand_config_paths(&mut merged);
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "advisorctl") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigFile>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(path) = find_project_config_path(&current_dir) {
        info!("Loading project configuration from: {}", path.display());
        load_config_from_path(&path).map(Some)
    } else {
        debug!("No {} found in current directory or ancestors.", PROJECT_CONFIG_FILENAME);
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Field-by-field merge: `primary` wins over `fallback`, which wins over defaults.
fn merge_configs(primary: ConfigFile, fallback: ConfigFile) -> Config {
    let timeout_secs = primary
        .validation
        .probe_timeout_secs
        .or(fallback.validation.probe_timeout_secs)
        .unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS);

    Config {
        compose: ComposeConfig {
            file: primary
                .compose
                .file
                .or(fallback.compose.file)
                .map(PathBuf::from),
            project_name: primary.compose.project_name.or(fallback.compose.project_name),
            dev_service: primary
                .compose
                .dev_service
                .or(fallback.compose.dev_service)
                .unwrap_or_else(default_dev_service),
            prod_service: primary
                .compose
                .prod_service
                .or(fallback.compose.prod_service)
                .unwrap_or_else(default_prod_service),
            interactive_service: primary
                .compose
                .interactive_service
                .or(fallback.compose.interactive_service)
                .unwrap_or_else(default_interactive_service),
        },
        env: EnvConfig {
            file: PathBuf::from(
                primary
                    .env
                    .file
                    .or(fallback.env.file)
                    .unwrap_or_else(default_env_file),
            ),
            template: PathBuf::from(
                primary
                    .env
                    .template
                    .or(fallback.env.template)
                    .unwrap_or_else(default_env_template),
            ),
        },
        validation: ValidationConfig {
            smoke_command: primary
                .validation
                .smoke_command
                .or(fallback.validation.smoke_command)
                .unwrap_or_else(default_smoke_command),
            dev_tool_command: primary
                .validation
                .dev_tool_command
                .or(fallback.validation.dev_tool_command)
                .unwrap_or_else(default_dev_tool_command),
            probe_timeout: Duration::from_secs(timeout_secs),
        },
        test: TestConfig {
            command: primary
                .test
                .command
                .or(fallback.test.command)
                .unwrap_or_else(default_test_command),
        },
    }
}

fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

fn expand_config_paths(config: &mut Config) {
    debug!("Expanding paths in configuration...");
    config.env.file = expand_path(&config.env.file);
    config.env.template = expand_path(&config.env.template);
    if let Some(file) = &config.compose.file {
        config.compose.file = Some(expand_path(file));
    }
}

fn validate_config(config: &Config) -> Result<()> {
    let services = [
        ("compose.dev_service", &config.compose.dev_service),
        ("compose.prod_service", &config.compose.prod_service),
        ("compose.interactive_service", &config.compose.interactive_service),
    ];
    for (field, value) in services {
        if value.trim().is_empty() {
            return Err(anyhow!(AdvisorError::Config(format!(
                "'{}' cannot be empty.",
                field
            ))));
        }
    }
    let commands = [
        ("validation.smoke_command", &config.validation.smoke_command),
        ("validation.dev_tool_command", &config.validation.dev_tool_command),
        ("test.command", &config.test.command),
    ];
    for (field, value) in commands {
        if value.is_empty() || value[0].trim().is_empty() {
            return Err(anyhow!(AdvisorError::Config(format!(
                "'{}' must name a program to run.",
                field
            ))));
        }
    }
    if config.validation.probe_timeout.is_zero() {
        return Err(anyhow!(AdvisorError::Config(
            "'validation.probe_timeout_secs' must be greater than zero.".to_string()
        )));
    }
    if let Some(name) = &config.compose.project_name {
        if normalize_project_name(name) != *name || name.is_empty() {
            return Err(anyhow!(AdvisorError::Config(format!(
                "Invalid compose project name '{}'. Use lowercase letters, digits, '-' and '_'.",
                name
            ))));
        }
    }
    Ok(())
}
