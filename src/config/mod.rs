use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::select::Policy;
use crate::utils;

/// Video used by `transcript-json` when none is given
pub const DEFAULT_JSON_VIDEO_ID: &str = "YxKALSesXiE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP client settings
    pub http: HttpConfig,

    /// Per-binary defaults
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Accept-Language header sent to YouTube
    pub accept_language: String,

    /// User agent for every request
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Policy used by `transcript-file`
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub file_policy: Policy,

    /// Policy used by `transcript-json`
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub json_policy: Policy,

    /// Video fetched by `transcript-json` without an argument
    pub json_video_id: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            accept_language: "en-US".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            file_policy: Policy::EnglishFirst,
            json_policy: Policy::OriginalFirst,
            json_video_id: DEFAULT_JSON_VIDEO_ID.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or fall back to defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Get configuration file path, if one exists
    fn config_path() -> Option<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("yt-transcript.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("yt-transcript").join("config.yaml"))
            .filter(|path| path.exists())
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            anyhow::bail!("http.timeout_secs must be greater than zero");
        }

        if self.http.accept_language.trim().is_empty() {
            anyhow::bail!("http.accept_language must not be empty");
        }

        utils::validate_video_id(&self.defaults.json_video_id)
            .context("defaults.json_video_id is not a valid video id")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.defaults.file_policy, Policy::EnglishFirst);
        assert_eq!(config.defaults.json_policy, Policy::OriginalFirst);
        assert_eq!(config.defaults.json_video_id, DEFAULT_JSON_VIDEO_ID);
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("defaults:\n  json_policy: english-first\n");
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.defaults.json_policy, Policy::EnglishFirst);
        assert_eq!(config.defaults.file_policy, Policy::EnglishFirst);
        assert_eq!(config.http, HttpConfig::default());
    }

    #[test]
    fn test_language_list_policy() {
        let file = write_config("defaults:\n  file_policy:\n    languages: [de, en]\n");
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(
            config.defaults.file_policy,
            Policy::Languages(vec!["de".to_string(), "en".to_string()])
        );
    }

    #[test]
    fn test_language_list_policy_round_trips_through_yaml() {
        let mut config = Config::default();
        config.defaults.json_policy = Policy::Languages(vec!["ja".to_string()]);

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("languages:"));

        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let file = write_config("http:\n  timeout_secs: 0\n");
        assert!(Config::load_from(file.path()).is_err());

        let file = write_config("defaults:\n  json_video_id: nope\n");
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_unparsable_file() {
        let file = write_config("http: [not, a, map]\n");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
