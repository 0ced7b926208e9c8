//! Configuration management for proc-run.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::runner::{ProcessRunner, DEFAULT_SHELL, DEFAULT_SHELL_FLAG};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Runner configuration.
    pub runner: RunnerSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Runner configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerSection {
    /// Shell executable that interprets command lines.
    pub shell: String,
    /// Flag passed to the shell before the command line.
    pub shell_flag: String,
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
            shell_flag: DEFAULT_SHELL_FLAG.to_string(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace) or filter directive.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(shell) = std::env::var("PROC_RUN_SHELL") {
            if !shell.is_empty() {
                self.runner.shell = shell;
            }
        }

        if let Ok(level) = std::env::var("PROC_RUN_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref shell) = args.shell {
            self.runner.shell = shell.clone();
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Check that the runner settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runner.shell.trim().is_empty() {
            return Err(ConfigError::EmptyValue("runner.shell"));
        }
        if self.runner.shell_flag.trim().is_empty() {
            return Err(ConfigError::EmptyValue("runner.shell_flag"));
        }
        Ok(())
    }

    /// Build a runner from this configuration.
    pub fn to_runner(&self) -> ProcessRunner {
        ProcessRunner::new()
            .with_shell(self.runner.shell.clone())
            .with_shell_flag(self.runner.shell_flag.clone())
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// A required setting is empty.
    EmptyValue(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::EmptyValue(name) => write!(f, "{} must not be empty", name),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.runner.shell, DEFAULT_SHELL);
        assert_eq!(config.runner.shell_flag, DEFAULT_SHELL_FLAG);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "runner": {
                "shell": "/bin/bash",
                "shell_flag": "-lc"
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.runner.shell, "/bin/bash");
        assert_eq!(config.runner.shell_flag, "-lc");
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{"runner": {"shell": "/bin/dash"}}"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.runner.shell, "/bin/dash");
        assert_eq!(config.runner.shell_flag, DEFAULT_SHELL_FLAG); // Default
    }

    #[test]
    fn test_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        let args = Args {
            shell: Some("/bin/zsh".to_string()),
            log_level: Some("trace".to_string()),
            ..Args::default()
        };

        config.apply_args(&args);

        assert_eq!(config.runner.shell, "/bin/zsh");
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_empty_shell_rejected() {
        let mut config = Config::default();
        config.runner.shell = "  ".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("runner.shell"));
    }

    #[test]
    fn test_to_runner() {
        let mut config = Config::default();
        config.runner.shell = "/bin/bash".to_string();

        let runner = config.to_runner();
        assert_eq!(runner.shell(), "/bin/bash");
        assert_eq!(runner.shell_flag(), DEFAULT_SHELL_FLAG);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"shell\""));
        assert!(json.contains("\"level\""));
    }
}
