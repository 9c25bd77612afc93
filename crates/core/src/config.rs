//! Run configuration, loaded from TOML.
//!
//! ```toml
//! model_name = "gpt-4o-mini"
//! system_message = "You are a blogger who writes short, casual posts."
//! user_message = "Write a new post."
//!
//! [training]
//! data_directory = "data"
//! output_file = "output/training.jsonl"
//! expected_epochs = 3
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::record::Prompts;
use crate::{Error, Result};

pub const DEFAULT_MODEL_NAME: &str = "gpt-4o-mini";
pub const DEFAULT_SYSTEM_MESSAGE: &str =
    "You are a blogger. You write short, personal posts in your own voice.";
pub const DEFAULT_USER_MESSAGE: &str = "Write a new post.";

/// Top-level configuration, constructed once and passed by reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Model whose tokenizer is used for accounting and pricing.
    pub model_name: String,
    pub system_message: String,
    pub user_message: String,
    pub training: TrainingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingConfig {
    /// Directory holding the export files (not searched recursively).
    pub data_directory: PathBuf,
    /// Corpus file, overwritten on every run.
    pub output_file: PathBuf,
    pub expected_epochs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
            user_message: DEFAULT_USER_MESSAGE.to_string(),
            training: TrainingConfig::default(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("data"),
            output_file: PathBuf::from("output").join("training.jsonl"),
            expected_epochs: 1,
        }
    }
}

impl Config {
    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&contents, path)
    }

    /// Parse and validate config text. Missing keys take their defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Self::parse(contents, Path::new(""))
    }

    fn parse(contents: &str, path: &Path) -> Result<Self> {
        let config: Config = toml::from_str(contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.model_name.trim().is_empty() {
            return Err(Error::InvalidConfig("model_name must not be empty".into()));
        }
        if self.system_message.is_empty() || self.user_message.is_empty() {
            return Err(Error::InvalidConfig(
                "system_message and user_message must not be empty".into(),
            ));
        }
        if self.training.expected_epochs == 0 {
            return Err(Error::InvalidConfig(
                "training.expected_epochs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn prompts(&self) -> Prompts<'_> {
        Prompts {
            system_message: &self.system_message,
            user_message: &self.user_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.model_name, DEFAULT_MODEL_NAME);
        assert_eq!(config.training.expected_epochs, 1);
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
            model_name = "gpt-4o"
            system_message = "sys"
            user_message = "usr"

            [training]
            data_directory = "exports"
            output_file = "out/corpus.jsonl"
            expected_epochs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.model_name, "gpt-4o");
        assert_eq!(config.prompts().system_message, "sys");
        assert_eq!(config.prompts().user_message, "usr");
        assert_eq!(config.training.data_directory, PathBuf::from("exports"));
        assert_eq!(config.training.output_file, PathBuf::from("out/corpus.jsonl"));
        assert_eq!(config.training.expected_epochs, 3);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml("[training]\nexpected_epochs = 2\n").unwrap();
        assert_eq!(config.model_name, DEFAULT_MODEL_NAME);
        assert_eq!(config.training.data_directory, PathBuf::from("data"));
        assert_eq!(config.training.expected_epochs, 2);
    }

    #[test]
    fn test_zero_epochs_rejected() {
        let err = Config::from_toml("[training]\nexpected_epochs = 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::from_toml("modle_name = \"gpt-4o\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "expected_epochs = ").unwrap();
        match Config::load(&path).unwrap_err() {
            Error::ConfigParse { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(Error::Io { .. })));
    }
}
