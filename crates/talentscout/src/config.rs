//! Configuration for talentscout.
//!
//! Connection settings come from the environment (optionally seeded from a
//! `.env` file). Tunables come from `talentscout.toml` in the working
//! directory, or the file passed with `--config`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use talentscout_core::InterviewSettings;
use talentscout_llm::GenerationConfig;

/// Generation endpoint URL
pub const API_URL_VAR: &str = "GEMINI_API_URL";
/// Generation API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
/// Document store URI
pub const STORE_URI_VAR: &str = "TALENTSCOUT_STORE_URI";

/// The config file name
pub const CONFIG_FILE_NAME: &str = "talentscout.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("Invalid config file {path}: {message}")]
    InvalidFile { path: PathBuf, message: String },
}

/// Connection settings required before any session starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub api_key: String,
    pub store_uri: String,
}

impl AppConfig {
    /// Read connection settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read connection settings through `lookup`.
    ///
    /// Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        Ok(Self {
            api_url: required(API_URL_VAR)?,
            api_key: required(API_KEY_VAR)?,
            store_uri: required(STORE_URI_VAR)?,
        })
    }

    /// The API key with all but its last four characters hidden
    pub fn redacted_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

/// Project-level configuration loaded from `talentscout.toml`
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Decoding parameters sent with every generation request
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Question counts and retry budget
    #[serde(default)]
    pub interview: InterviewSettings,
}

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        Self::load_from(&config_path).map(Some)
    }

    /// Load an explicitly named config file, which must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidFile {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        toml::from_str(&content).map_err(|e| invalid(e.to_string()))
    }

    /// Interview settings with counts clamped to at least one
    pub fn interview_settings(&self) -> InterviewSettings {
        InterviewSettings::default()
            .with_question_count(self.interview.question_count)
            .with_more_question_count(self.interview.more_question_count)
            .with_max_generation_attempts(self.interview.max_generation_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_app_config_from_lookup() {
        let vars = env(&[
            (API_URL_VAR, "https://example.test/v1/models/m:generateContent"),
            (API_KEY_VAR, "  secret-key-1234 "),
            (STORE_URI_VAR, "sqlite://data/talentscout.db"),
        ]);

        let config = AppConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.api_key, "secret-key-1234");
        assert_eq!(config.store_uri, "sqlite://data/talentscout.db");
        assert_eq!(config.redacted_key(), "****1234");
    }

    #[test]
    fn test_missing_var_is_reported_by_name() {
        let vars = env(&[
            (API_URL_VAR, "https://example.test"),
            (STORE_URI_VAR, "sqlite::memory:"),
        ]);

        let err = AppConfig::from_lookup(|name| vars.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(API_KEY_VAR)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_blank_var_counts_as_missing() {
        let vars = env(&[
            (API_URL_VAR, "https://example.test"),
            (API_KEY_VAR, "key"),
            (STORE_URI_VAR, "   "),
        ]);

        let err = AppConfig::from_lookup(|name| vars.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(STORE_URI_VAR)));
    }

    #[test]
    fn test_short_key_is_fully_redacted() {
        let config = AppConfig {
            api_url: String::new(),
            api_key: "abc".to_string(),
            store_uri: String::new(),
        };
        assert_eq!(config.redacted_key(), "****");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(ProjectConfig::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[generation]\ntemperature = 0.2\n\n[interview]\nquestion_count = 8\n",
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap().unwrap();
        assert_eq!(config.generation.temperature, 0.2);
        assert_eq!(config.generation.max_output_tokens, 1024);
        assert_eq!(config.interview.question_count, 8);
        assert_eq!(config.interview.more_question_count, 3);
    }

    #[test]
    fn test_unknown_field_is_invalid() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[interview]\nquestions = 8\n",
        )
        .unwrap();

        let err = ProjectConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFile { .. }));
    }

    #[test]
    fn test_load_from_missing_path_is_invalid() {
        let dir = TempDir::new().unwrap();
        let err = ProjectConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFile { .. }));
    }

    #[test]
    fn test_interview_settings_are_clamped() {
        let config = ProjectConfig {
            interview: InterviewSettings {
                question_count: 0,
                more_question_count: 2,
                max_generation_attempts: 0,
            },
            ..Default::default()
        };

        let settings = config.interview_settings();
        assert_eq!(settings.question_count, 1);
        assert_eq!(settings.more_question_count, 2);
        assert_eq!(settings.max_generation_attempts, 1);
    }
}
