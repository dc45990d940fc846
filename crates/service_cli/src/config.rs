//! CLI configuration management
//!
//! Settings are layered, lowest priority first:
//! 1. Default values
//! 2. `optpricer.toml` (or the file given with `--config`)
//! 3. Environment variables (`OPTPRICER_*`, `__` between nested keys)
//! 4. CLI arguments

use std::path::PathBuf;
use std::str::FromStr;

use pricer_risk::RiskConfig;
use serde::Deserialize;
use thiserror::Error;

/// Configuration file read when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "optpricer.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "OPTPRICER";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Confidence outside (0, 1]
    #[error("Invalid confidence: {0}. Must be in (0, 1]")]
    InvalidConfidence(f64),

    /// Zero lattice steps
    #[error("Invalid lattice steps: {0}. Must be at least 1")]
    InvalidSteps(usize),

    /// Scenario settings rejected by the risk engine
    #[error("Invalid risk settings: {0}")]
    InvalidRisk(String),

    /// File or environment source could not be read
    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Library debug events
    Debug,
    /// Progress messages
    Info,
    /// Warnings only
    #[default]
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Resolved CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Lattice steps for American contracts when `--steps` is absent
    pub default_steps: usize,
    /// VaR/ES confidence when `--confidence` is absent
    pub confidence: f64,
    /// Risk engine settings
    pub risk: RiskConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            default_steps: 100,
            confidence: 0.95,
            risk: RiskConfig::default(),
        }
    }
}

impl CliConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.confidence.is_finite() && self.confidence > 0.0 && self.confidence <= 1.0) {
            return Err(ConfigError::InvalidConfidence(self.confidence));
        }
        if self.default_steps == 0 {
            return Err(ConfigError::InvalidSteps(self.default_steps));
        }
        self.risk
            .grid
            .validate()
            .and_then(|_| self.risk.lognormal.validate())
            .map_err(|e| ConfigError::InvalidRisk(e.to_string()))
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(steps) = cli.steps {
            self.default_steps = steps;
        }
        if let Some(confidence) = cli.confidence {
            self.confidence = confidence;
        }
        if let Some(threshold) = cli.parallel_threshold {
            self.risk.parallel.parallel_threshold = threshold;
        }
        Ok(())
    }
}

/// Global CLI overrides
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path; a missing explicit file is an error
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Default lattice steps override
    pub steps: Option<usize>,
    /// Confidence override
    pub confidence: Option<f64>,
    /// Parallel sweep threshold override
    pub parallel_threshold: Option<usize>,
}

/// Environment source for `OPTPRICER_*` variables.
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Build configuration from all sources
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, environment())
}

/// Build configuration with an explicit environment source
pub fn build_config_with_env(
    cli: &CliArgs,
    env: config::Environment,
) -> Result<CliConfig, ConfigError> {
    let (path, required) = match &cli.config_file {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let settings = config::Config::builder()
        .add_source(
            config::File::from(path.as_path())
                .format(config::FileFormat::Toml)
                .required(required),
        )
        .add_source(env)
        .build()?;

    let mut config: CliConfig = settings.try_deserialize()?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}
