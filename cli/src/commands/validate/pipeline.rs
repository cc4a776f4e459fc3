//! # advisorctl Validation Pipeline
//!
//! File: cli/src/commands/validate/pipeline.rs
//!
//! ## Overview
//!
//! The ordered, fail-fast checks behind `advisorctl validate`. Cheap local
//! checks come first and expensive ones (network, image builds, container
//! runs) last, so a broken machine is diagnosed without waiting on a build.
//!
//! | # | Check                         | Failure code            |
//! |---|-------------------------------|-------------------------|
//! | 1 | Docker installed              | DOCKER_NOT_INSTALLED    |
//! | 2 | Docker daemon running         | DAEMON_NOT_RUNNING      |
//! | 3 | Compose available             | COMPOSE_NOT_AVAILABLE   |
//! | 4 | Env file present              | ENV_MISSING             |
//! | 5 | Market-data key               | REQUIRED_KEYS_MISSING   |
//! | 6 | LLM provider key              | REQUIRED_KEYS_MISSING   |
//! | 7 | API connectivity              | API_CONNECTIVITY_FAILED |
//! | 8 | Image build                   | DOCKER_BUILD_FAILED     |
//! | 9 | Smoke run (development)       | CONTAINER_RUN_FAILED    |
//! | 10| Smoke run (production)        | CONTAINER_RUN_FAILED    |
//! | 11| Dev tool probe                | warning only            |
//!
//! ## Architecture
//!
//! Each check returns a `CheckOutcome` (`Pass`, `Warn` or `Fail`). The
//! `Pipeline::run` driver records every outcome through a `Recorder`, which
//! prints it and remembers the first failure, then decides once per step
//! whether to continue. Checks 5 and 6 are recorded together before that
//! decision so that all missing keys are reported in one run.
//!
//! The driver never returns an error: a problem that stops a check (an
//! unreadable env file, a command that cannot be launched) becomes that
//! check's failure.
//!
use super::keys::{self, KeyReport, LLM_PROVIDER_KEYS, MARKET_DATA_KEY};
use crate::common::{
    docker::{compose, Compose, Profile},
    network::http::{self, HttpProbe},
    process::{CommandOutput, CommandRunner, CommandSpec},
    system,
    ui::Console,
};
use crate::core::{
    config::Config,
    env_file::{self, EnvFile, EnvFileStatus},
    error::ValidationCode,
};
use tracing::{debug, info};

/// The pipeline's checks, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckId {
    DockerInstalled,
    DaemonRunning,
    ComposeAvailable,
    EnvFilePresent,
    MarketDataKey,
    LlmProviderKey,
    ApiConnectivity,
    ImageBuild,
    DevSmokeRun,
    ProdSmokeRun,
    DevToolProbe,
}

impl CheckId {
    pub const ALL: [CheckId; 11] = [
        CheckId::DockerInstalled,
        CheckId::DaemonRunning,
        CheckId::ComposeAvailable,
        CheckId::EnvFilePresent,
        CheckId::MarketDataKey,
        CheckId::LlmProviderKey,
        CheckId::ApiConnectivity,
        CheckId::ImageBuild,
        CheckId::DevSmokeRun,
        CheckId::ProdSmokeRun,
        CheckId::DevToolProbe,
    ];

    /// 1-based position in the pipeline.
    pub fn order(self) -> usize {
        CheckId::ALL
            .iter()
            .position(|c| *c == self)
            .map_or(0, |i| i + 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            CheckId::DockerInstalled => "Docker installation",
            CheckId::DaemonRunning => "Docker daemon",
            CheckId::ComposeAvailable => "Docker Compose",
            CheckId::EnvFilePresent => "Environment file",
            CheckId::MarketDataKey => "Market data API key",
            CheckId::LlmProviderKey => "LLM provider API key",
            CheckId::ApiConnectivity => "API connectivity",
            CheckId::ImageBuild => "Docker image build",
            CheckId::DevSmokeRun => "Development container",
            CheckId::ProdSmokeRun => "Production container",
            CheckId::DevToolProbe => "Development tools",
        }
    }

    /// Exit code used when this check fails.
    pub fn failure_code(self) -> ValidationCode {
        match self {
            CheckId::DockerInstalled => ValidationCode::DockerNotInstalled,
            CheckId::DaemonRunning => ValidationCode::DaemonNotRunning,
            CheckId::ComposeAvailable => ValidationCode::ComposeNotAvailable,
            CheckId::EnvFilePresent => ValidationCode::EnvMissing,
            CheckId::MarketDataKey | CheckId::LlmProviderKey => ValidationCode::RequiredKeysMissing,
            CheckId::ApiConnectivity => ValidationCode::ApiConnectivityFailed,
            CheckId::ImageBuild => ValidationCode::DockerBuildFailed,
            CheckId::DevSmokeRun | CheckId::ProdSmokeRun => ValidationCode::ContainerRunFailed,
            CheckId::DevToolProbe => ValidationCode::DevToolMissing,
        }
    }
}

/// What went wrong in a failed check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Failure {
    /// One line per problem; all of them are printed.
    pub messages: Vec<String>,
    /// Remediation hints (URLs, commands).
    pub hints: Vec<String>,
    /// Captured command output, shown with `--verbose`.
    pub detail: Option<String>,
}

impl Failure {
    fn new(message: impl Into<String>) -> Self {
        Failure {
            messages: vec![message.into()],
            ..Default::default()
        }
    }

    fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    fn detail_from(mut self, output: &CommandOutput) -> Self {
        let combined = format!("{}{}", output.stdout, output.stderr);
        if !combined.trim().is_empty() {
            self.detail = Some(combined);
        }
        self
    }
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Pass(String),
    Warn(String),
    Fail(Failure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub check: CheckId,
    pub outcome: CheckOutcome,
}

/// Everything a validation run observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub steps: Vec<StepResult>,
    pub code: ValidationCode,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.code == ValidationCode::Success
    }

    /// The check that halted the pipeline.
    pub fn failed_at(&self) -> Option<CheckId> {
        self.steps.iter().find_map(|step| match step.outcome {
            CheckOutcome::Fail(_) => Some(step.check),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|step| match &step.outcome {
                CheckOutcome::Warn(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    #[cfg(test)]
    pub fn outcome(&self, check: CheckId) -> Option<&CheckOutcome> {
        self.steps
            .iter()
            .find(|step| step.check == check)
            .map(|step| &step.outcome)
    }
}

/// Prints outcomes as they arrive and tracks the first failure.
struct Recorder {
    console: Console,
    steps: Vec<StepResult>,
    first_failure: Option<CheckId>,
}

impl Recorder {
    fn new(console: Console) -> Self {
        Recorder {
            console,
            steps: Vec::new(),
            first_failure: None,
        }
    }

    fn announce(&self, check: CheckId) {
        self.console.info(&format!(
            "[{}/{}] Checking {}...",
            check.order(),
            CheckId::ALL.len(),
            check.name().to_lowercase()
        ));
    }

    fn record(&mut self, check: CheckId, outcome: CheckOutcome) {
        match &outcome {
            CheckOutcome::Pass(message) => self.console.success(message),
            CheckOutcome::Warn(message) => self.console.warning(message),
            CheckOutcome::Fail(failure) => {
                for message in &failure.messages {
                    self.console.error(message);
                }
                for hint in &failure.hints {
                    self.console.hint(hint);
                }
                if let Some(detail) = &failure.detail {
                    self.console.detail(detail);
                }
                if self.first_failure.is_none() {
                    self.first_failure = Some(check);
                }
            }
        }
        debug!("{:?} -> {:?}", check, outcome);
        self.steps.push(StepResult { check, outcome });
    }

    fn halted(&self) -> bool {
        self.first_failure.is_some()
    }

    fn finish(self) -> ValidationReport {
        let code = self
            .first_failure
            .map_or(ValidationCode::Success, CheckId::failure_code);
        info!("Validation finished with {:?}", code);
        ValidationReport {
            steps: self.steps,
            code,
        }
    }
}

/// The validation pipeline and its collaborators.
pub struct Pipeline<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
    probe: &'a dyn HttpProbe,
    console: Console,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a Config,
        runner: &'a dyn CommandRunner,
        probe: &'a dyn HttpProbe,
        console: Console,
    ) -> Self {
        Pipeline {
            config,
            runner,
            probe,
            console,
        }
    }

    /// Runs the checks in order, stopping at the first failure.
    pub async fn run(&self) -> ValidationReport {
        let mut rec = Recorder::new(self.console);

        rec.announce(CheckId::DockerInstalled);
        rec.record(CheckId::DockerInstalled, self.check_docker_installed().await);
        if rec.halted() {
            return rec.finish();
        }

        rec.announce(CheckId::DaemonRunning);
        rec.record(CheckId::DaemonRunning, self.check_daemon().await);
        if rec.halted() {
            return rec.finish();
        }

        rec.announce(CheckId::ComposeAvailable);
        let (outcome, compose) = self.check_compose().await;
        rec.record(CheckId::ComposeAvailable, outcome);
        let Some(compose) = compose else {
            return rec.finish();
        };

        rec.announce(CheckId::EnvFilePresent);
        let (outcome, env) = self.check_env_file();
        rec.record(CheckId::EnvFilePresent, outcome);
        let Some(env) = env else {
            return rec.finish();
        };

        rec.announce(CheckId::MarketDataKey);
        let report = KeyReport::evaluate(&env);
        rec.record(CheckId::MarketDataKey, self.check_market_data_key(&report));
        rec.announce(CheckId::LlmProviderKey);
        rec.record(CheckId::LlmProviderKey, self.check_llm_provider_key(&report));
        if rec.halted() {
            return rec.finish();
        }

        rec.announce(CheckId::ApiConnectivity);
        rec.record(CheckId::ApiConnectivity, self.check_connectivity(&env).await);
        if rec.halted() {
            return rec.finish();
        }

        rec.announce(CheckId::ImageBuild);
        rec.record(CheckId::ImageBuild, self.check_build(&compose).await);
        if rec.halted() {
            return rec.finish();
        }

        rec.announce(CheckId::DevSmokeRun);
        rec.record(
            CheckId::DevSmokeRun,
            self.check_smoke_run(&compose, Profile::Development, &self.config.compose.dev_service)
                .await,
        );
        if rec.halted() {
            return rec.finish();
        }

        rec.announce(CheckId::ProdSmokeRun);
        rec.record(
            CheckId::ProdSmokeRun,
            self.check_smoke_run(&compose, Profile::Production, &self.config.compose.prod_service)
                .await,
        );
        if rec.halted() {
            return rec.finish();
        }

        rec.announce(CheckId::DevToolProbe);
        rec.record(CheckId::DevToolProbe, self.check_dev_tools(&compose).await);
        rec.finish()
    }

    async fn check_docker_installed(&self) -> CheckOutcome {
        match system::docker_version(self.runner).await {
            Some(version) => CheckOutcome::Pass(format!("Docker is installed: {}", version)),
            None => CheckOutcome::Fail(
                Failure::new("Docker is not installed or not in PATH")
                    .hint("Install Docker: https://docs.docker.com/get-docker/"),
            ),
        }
    }

    async fn check_daemon(&self) -> CheckOutcome {
        if system::daemon_running(self.runner).await {
            CheckOutcome::Pass("Docker daemon is running".to_string())
        } else {
            CheckOutcome::Fail(
                Failure::new("Docker daemon is not running")
                    .hint("Start Docker Desktop, or on Linux run: sudo systemctl start docker"),
            )
        }
    }

    async fn check_compose(&self) -> (CheckOutcome, Option<Compose>) {
        match compose::detect_compose(self.runner).await {
            Some(tool) => (
                CheckOutcome::Pass(format!("Docker Compose is available ({})", tool.label())),
                Some(Compose::new(tool, &self.config.compose)),
            ),
            None => (
                CheckOutcome::Fail(
                    Failure::new("Docker Compose is not available")
                        .hint("Install Docker Compose: https://docs.docker.com/compose/install/"),
                ),
                None,
            ),
        }
    }

    fn check_env_file(&self) -> (CheckOutcome, Option<EnvFile>) {
        let env_path = &self.config.env.file;
        let template = &self.config.env.template;
        let outcome = match env_file::ensure_env_file(env_path, template) {
            Ok(EnvFileStatus::Present) => {
                CheckOutcome::Pass(format!("{} file found", env_path.display()))
            }
            Ok(EnvFileStatus::CreatedFromTemplate) => CheckOutcome::Warn(format!(
                "{} not found; created it from {}. Edit it and add your API keys.",
                env_path.display(),
                template.display()
            )),
            Ok(EnvFileStatus::Missing) => {
                return (
                    CheckOutcome::Fail(
                        Failure::new(format!(
                            "{} not found and no {} template to copy",
                            env_path.display(),
                            template.display()
                        ))
                        .hint(format!(
                            "Create {} with {}=... and one of {}",
                            env_path.display(),
                            MARKET_DATA_KEY,
                            LLM_PROVIDER_KEYS.join(", ")
                        )),
                    ),
                    None,
                )
            }
            Err(e) => {
                return (
                    CheckOutcome::Fail(
                        Failure::new(format!("{:#}", e))
                            .hint(format!("Copy {} to {} manually", template.display(), env_path.display())),
                    ),
                    None,
                )
            }
        };
        match EnvFile::load(env_path) {
            Ok(env) => (outcome, Some(env)),
            Err(e) => (
                CheckOutcome::Fail(
                    Failure::new(format!("{:#}", e))
                        .hint(format!("Check the permissions of {}", env_path.display())),
                ),
                None,
            ),
        }
    }

    fn check_market_data_key(&self, report: &KeyReport) -> CheckOutcome {
        if report.market_data_configured {
            CheckOutcome::Pass(format!("{} is set", MARKET_DATA_KEY))
        } else {
            CheckOutcome::Fail(
                Failure::new(format!(
                    "{} is missing or still set to a placeholder in {}",
                    MARKET_DATA_KEY,
                    self.config.env.file.display()
                ))
                .hint("Get a free key at https://polygon.io/dashboard/api-keys"),
            )
        }
    }

    fn check_llm_provider_key(&self, report: &KeyReport) -> CheckOutcome {
        if report.llm_satisfied() {
            let mut message = format!("LLM provider key(s) set: {}", report.llm_configured.join(", "));
            if !report.optional_configured.is_empty() {
                message.push_str(&format!(
                    " (also set: {})",
                    report.optional_configured.join(", ")
                ));
            }
            CheckOutcome::Pass(message)
        } else {
            CheckOutcome::Fail(
                Failure::new(format!(
                    "No LLM provider key set. Set at least one of {}",
                    LLM_PROVIDER_KEYS.join(", ")
                ))
                .hint("Google: https://aistudio.google.com/app/apikey")
                .hint("OpenAI: https://platform.openai.com/api-keys")
                .hint("Anthropic: https://console.anthropic.com/settings/keys"),
            )
        }
    }

    async fn check_connectivity(&self, env: &EnvFile) -> CheckOutcome {
        let probes = keys::applicable_probes(env);
        if probes.is_empty() {
            return CheckOutcome::Pass("No configured provider offers a connectivity probe".to_string());
        }

        let mut reachable = Vec::new();
        let mut problems = Vec::new();
        for probe in probes {
            let status = match probe.url(env.get(probe.key)) {
                Ok(url) => {
                    debug!("Probing {} at {}", probe.provider, http::redact_url(&url));
                    self.probe.status(&url).await
                }
                Err(e) => {
                    debug!("{:#}", e);
                    http::TRANSPORT_FAILURE
                }
            };
            if status == 200 {
                reachable.push(probe.provider);
            } else {
                problems.push(format!(
                    "{} API check failed ({}): HTTP {}",
                    probe.provider,
                    probe.key,
                    http::format_status(status)
                ));
            }
        }

        if problems.is_empty() {
            CheckOutcome::Pass(format!("API connectivity verified: {}", reachable.join(", ")))
        } else {
            CheckOutcome::Fail(Failure {
                messages: problems,
                hints: vec![
                    format!("Verify the keys in {} are valid and active", self.config.env.file.display()),
                    "HTTP 000 means no response: check network access, proxies and firewalls".to_string(),
                ],
                detail: None,
            })
        }
    }

    async fn check_build(&self, compose: &Compose) -> CheckOutcome {
        let build = compose.command(&Profile::ALL, ["build"]);
        let no_cache = compose.command(&Profile::ALL, ["build", "--no-cache"]);
        match self.runner.capture(&build).await {
            Ok(output) if output.success() => CheckOutcome::Pass("Docker images built".to_string()),
            Ok(output) => CheckOutcome::Fail(
                Failure::new(format!("Docker image build failed (exit code {:?})", output.code))
                    .hint(format!("Rebuild without cache: {}", no_cache))
                    .hint("Check the Dockerfile and requirements.txt for errors")
                    .hint("Check network access for package downloads")
                    .detail_from(&output),
            ),
            Err(e) => CheckOutcome::Fail(Failure::new(format!("Could not run '{}': {:#}", build, e))),
        }
    }

    async fn check_smoke_run(&self, compose: &Compose, profile: Profile, service: &str) -> CheckOutcome {
        let command = self.run_in_service(compose, profile, service, &self.config.validation.smoke_command);
        match self.runner.capture(&command).await {
            Ok(output) if output.success() => CheckOutcome::Pass(format!(
                "Application imports in the {} container ({})",
                profile.name(),
                service
            )),
            Ok(output) => CheckOutcome::Fail(
                Failure::new(format!(
                    "Application failed to import in the {} container ({})",
                    profile.name(),
                    service
                ))
                .hint(format!("Reproduce with: {}", command))
                .hint("Check that requirements.txt installs every package the application imports")
                .detail_from(&output),
            ),
            Err(e) => CheckOutcome::Fail(Failure::new(format!("Could not run '{}': {:#}", command, e))),
        }
    }

    async fn check_dev_tools(&self, compose: &Compose) -> CheckOutcome {
        let command = self.run_in_service(
            compose,
            Profile::Development,
            &self.config.compose.dev_service,
            &self.config.validation.dev_tool_command,
        );
        match self.runner.capture(&command).await {
            Ok(output) if output.success() => {
                let version = format!("{}{}", output.stdout, output.stderr);
                let version = version.lines().next().unwrap_or("").trim();
                CheckOutcome::Pass(format!("Test runner available: {}", version))
            }
            _ => CheckOutcome::Warn(
                "Test runner not available in the development container; 'advisorctl test' will not work"
                    .to_string(),
            ),
        }
    }

    fn run_in_service(
        &self,
        compose: &Compose,
        profile: Profile,
        service: &str,
        command: &[String],
    ) -> CommandSpec {
        let mut args = vec!["run".to_string(), "--rm".to_string(), service.to_string()];
        args.extend(command.iter().cloned());
        compose.command(&[profile], args)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::network::http::testing::FixedProbe;
    use crate::common::process::testing::ScriptedRunner;
    use crate::common::ui::Verbosity;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const VALID_ENV: &str = "POLYGON_API_KEY=pk_abc\nOPENAI_API_KEY=sk-real\n";

    /// Config pointing at an env file inside a fresh temp dir.
    fn fixture(env_content: Option<&str>) -> (TempDir, Config) {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.env.file = dir.path().join(".env");
        config.env.template = dir.path().join(".env.example");
        if let Some(content) = env_content {
            fs::write(&config.env.file, content).unwrap();
        }
        (dir, config)
    }

    async fn run(config: &Config, runner: &ScriptedRunner, probe: &FixedProbe) -> ValidationReport {
        Pipeline::new(config, runner, probe, Console::new(Verbosity::Quiet))
            .run()
            .await
    }

    fn messages(report: &ValidationReport, check: CheckId) -> Vec<String> {
        match report.outcome(check) {
            Some(CheckOutcome::Fail(failure)) => failure.messages.clone(),
            other => panic!("expected {:?} to fail, got {:?}", check, other),
        }
    }

    #[tokio::test]
    async fn test_all_checks_pass() {
        let (_dir, config) = fixture(Some(VALID_ENV));
        let runner = ScriptedRunner::new();
        let probe = FixedProbe::new();

        let report = run(&config, &runner, &probe).await;

        assert!(report.passed());
        assert_eq!(report.code.code(), 0);
        assert_eq!(report.steps.len(), CheckId::ALL.len());
        let order: Vec<CheckId> = report.steps.iter().map(|s| s.check).collect();
        assert_eq!(order, CheckId::ALL.to_vec());
        assert!(report.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_missing_docker_short_circuits_before_env_checks() {
        let (dir, config) = fixture(None);
        fs::write(dir.path().join(".env.example"), VALID_ENV).unwrap();
        let runner = ScriptedRunner::new().missing("docker");
        let probe = FixedProbe::new();

        let report = run(&config, &runner, &probe).await;

        assert_eq!(report.code, ValidationCode::DockerNotInstalled);
        assert_eq!(report.steps.len(), 1);
        assert_eq!(runner.calls(), vec!["docker --version"]);
        // The env file must not have been created from the template.
        assert!(!config.env.file.exists());
        assert!(probe.requests().is_empty());
    }

    #[tokio::test]
    async fn test_daemon_not_running() {
        let (_dir, config) = fixture(Some(VALID_ENV));
        let runner = ScriptedRunner::new().exit_code("docker info", 1);
        let report = run(&config, &runner, &FixedProbe::new()).await;
        assert_eq!(report.code, ValidationCode::DaemonNotRunning);
        assert_eq!(report.code.code(), 2);
    }

    #[tokio::test]
    async fn test_compose_not_available() {
        let (_dir, config) = fixture(Some(VALID_ENV));
        let runner = ScriptedRunner::new()
            .exit_code("docker compose", 1)
            .missing("docker-compose");
        let report = run(&config, &runner, &FixedProbe::new()).await;
        assert_eq!(report.code, ValidationCode::ComposeNotAvailable);
        assert_eq!(report.failed_at(), Some(CheckId::ComposeAvailable));
    }

    #[tokio::test]
    async fn test_legacy_compose_is_used_for_later_steps() {
        let (_dir, config) = fixture(Some(VALID_ENV));
        let runner = ScriptedRunner::new().exit_code("docker compose", 1);
        let report = run(&config, &runner, &FixedProbe::new()).await;
        assert!(report.passed());
        assert!(runner
            .calls()
            .iter()
            .any(|c| c.starts_with("docker-compose --profile development") && c.contains(" build")));
    }

    #[tokio::test]
    async fn test_env_missing_without_template() {
        let (_dir, config) = fixture(None);
        let report = run(&config, &ScriptedRunner::new(), &FixedProbe::new()).await;
        assert_eq!(report.code, ValidationCode::EnvMissing);
        assert_eq!(report.code.code(), 4);
    }

    #[tokio::test]
    async fn test_env_created_from_template_is_reported_and_checked() {
        let (dir, config) = fixture(None);
        fs::write(
            dir.path().join(".env.example"),
            "POLYGON_API_KEY=your-polygon-api-key\nOPENAI_API_KEY=your-openai-api-key\n",
        )
        .unwrap();

        let report = run(&config, &ScriptedRunner::new(), &FixedProbe::new()).await;

        assert!(config.env.file.exists());
        assert!(matches!(
            report.outcome(CheckId::EnvFilePresent),
            Some(CheckOutcome::Warn(_))
        ));
        // The template's placeholders then fail the key checks.
        assert_eq!(report.code, ValidationCode::RequiredKeysMissing);
    }

    #[tokio::test]
    async fn test_empty_market_key_fails_at_step_five() {
        let (_dir, config) = fixture(Some("POLYGON_API_KEY=\nOPENAI_API_KEY=sk-real\n"));
        let report = run(&config, &ScriptedRunner::new(), &FixedProbe::new()).await;

        assert_eq!(report.code, ValidationCode::RequiredKeysMissing);
        assert_eq!(report.code.code(), 5);
        assert_eq!(report.failed_at(), Some(CheckId::MarketDataKey));
        assert!(messages(&report, CheckId::MarketDataKey)[0].contains("POLYGON_API_KEY"));
        assert!(matches!(
            report.outcome(CheckId::LlmProviderKey),
            Some(CheckOutcome::Pass(_))
        ));
    }

    #[tokio::test]
    async fn test_placeholder_llm_keys_fail_at_step_six() {
        let (_dir, config) = fixture(Some(
            "POLYGON_API_KEY=pk_abc\n\
             GOOGLE_API_KEY=your-google-api-key\n\
             OPENAI_API_KEY=your-openai-api-key\n\
             ANTHROPIC_API_KEY=your-anthropic-api-key\n",
        ));
        let probe = FixedProbe::new();
        let report = run(&config, &ScriptedRunner::new(), &probe).await;

        assert_eq!(report.code, ValidationCode::RequiredKeysMissing);
        assert_eq!(report.failed_at(), Some(CheckId::LlmProviderKey));
        assert!(probe.requests().is_empty(), "no probes after a key failure");
    }

    #[tokio::test]
    async fn test_all_key_problems_are_reported_together() {
        let (_dir, config) = fixture(Some("POLYGON_API_KEY=your-polygon-api-key\n"));
        let report = run(&config, &ScriptedRunner::new(), &FixedProbe::new()).await;

        assert_eq!(report.failed_at(), Some(CheckId::MarketDataKey));
        assert!(matches!(
            report.outcome(CheckId::LlmProviderKey),
            Some(CheckOutcome::Fail(_))
        ));
        assert_eq!(report.steps.len(), 6);
    }

    #[tokio::test]
    async fn test_any_single_llm_key_passes_key_checks() {
        for key in LLM_PROVIDER_KEYS {
            let (_dir, config) = fixture(Some(&format!("POLYGON_API_KEY=pk_abc\n{}=real\n", key)));
            let report = run(&config, &ScriptedRunner::new(), &FixedProbe::new()).await;
            assert!(report.passed(), "{} alone should pass, got {:?}", key, report.code);
        }
    }

    #[tokio::test]
    async fn test_market_probe_403_fails_connectivity() {
        let (_dir, config) = fixture(Some(VALID_ENV));
        let runner = ScriptedRunner::new();
        let probe = FixedProbe::new().answer("https://api.polygon.io/", 403);

        let report = run(&config, &runner, &probe).await;

        assert_eq!(report.code, ValidationCode::ApiConnectivityFailed);
        assert_eq!(report.code.code(), 6);
        let problems = messages(&report, CheckId::ApiConnectivity);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("HTTP 403"));
        // Nothing was built after the connectivity failure.
        assert!(!runner.calls().iter().any(|c| c.contains(" build")));
    }

    #[tokio::test]
    async fn test_every_failing_probe_is_reported() {
        let (_dir, config) = fixture(Some("POLYGON_API_KEY=pk_abc\nGOOGLE_API_KEY=AIza\n"));
        let probe = FixedProbe::new()
            .answer("https://api.polygon.io/", 401)
            .answer("https://generativelanguage.googleapis.com/", http::TRANSPORT_FAILURE);

        let report = run(&config, &ScriptedRunner::new(), &probe).await;

        let problems = messages(&report, CheckId::ApiConnectivity);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("HTTP 401"));
        assert!(problems[1].contains("HTTP 000"));
    }

    #[tokio::test]
    async fn test_only_configured_providers_are_probed() {
        let (_dir, config) = fixture(Some(VALID_ENV));
        let probe = FixedProbe::new();
        run(&config, &ScriptedRunner::new(), &probe).await;

        let requests = probe.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0],
            "https://api.polygon.io/v3/reference/tickers?limit=1&apiKey=pk_abc"
        );
    }

    #[tokio::test]
    async fn test_build_failure() {
        let (_dir, config) = fixture(Some(VALID_ENV));
        let runner = ScriptedRunner::new().exit_code(
            "docker compose --profile development --profile production --profile interactive build",
            1,
        );
        let report = run(&config, &runner, &FixedProbe::new()).await;
        assert_eq!(report.code, ValidationCode::DockerBuildFailed);
        assert_eq!(report.code.code(), 7);
        assert!(!runner.calls().iter().any(|c| c.contains(" run --rm")));
    }

    #[tokio::test]
    async fn test_production_smoke_run_failure() {
        let (_dir, config) = fixture(Some(VALID_ENV));
        let runner = ScriptedRunner::new().exit_code("docker compose --profile production run", 1);
        let report = run(&config, &runner, &FixedProbe::new()).await;
        assert_eq!(report.code, ValidationCode::ContainerRunFailed);
        assert_eq!(report.failed_at(), Some(CheckId::ProdSmokeRun));
        assert!(matches!(
            report.outcome(CheckId::DevSmokeRun),
            Some(CheckOutcome::Pass(_))
        ));
    }

    #[tokio::test]
    async fn test_dev_tool_probe_failure_only_warns() {
        let (_dir, config) = fixture(Some(VALID_ENV));
        let runner = ScriptedRunner::new().exit_code(
            "docker compose --profile development run --rm advisor-dev python -m pytest --version",
            1,
        );

        let report = run(&config, &runner, &FixedProbe::new()).await;

        assert!(report.passed());
        assert_eq!(report.code.code(), 0);
        assert_eq!(report.warnings().len(), 1);
        assert_eq!(report.failed_at(), None);
    }

    #[test]
    fn test_check_order_is_one_based() {
        assert_eq!(CheckId::DockerInstalled.order(), 1);
        assert_eq!(CheckId::ApiConnectivity.order(), 7);
        assert_eq!(CheckId::DevToolProbe.order(), 11);
    }
}
