//! Settings for the language handler.
//!
//! Read from a TOML file, from JSON `initializationOptions`, or left at
//! their defaults. Every field is optional:
//!
//! ```toml
//! [translation-memory]
//! base-url = "https://amagama-live.translatehouse.org/api/v1/en"
//! max-results = 3
//! min-quality = 80
//! timeout-secs = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that replaces the translation-memory base URL.
pub const TM_URL_ENV: &str = "XLIFF_TM_URL";

pub const DEFAULT_TM_URL: &str = "https://amagama-live.translatehouse.org/api/v1/en";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct XliffConfig {
    pub translation_memory: TranslationMemoryConfig,
}

/// Where and how translation suggestions are fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TranslationMemoryConfig {
    /// Service root; the target language and source text are appended as
    /// path segments.
    pub base_url: String,
    pub max_results: u32,
    /// Lowest match quality (0-100) the service should return.
    pub min_quality: u32,
    pub timeout_secs: u64,
}

impl Default for TranslationMemoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TM_URL.to_string(),
            max_results: 3,
            min_quality: 80,
            timeout_secs: 10,
        }
    }
}

impl XliffConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Settings sent by an editor, e.g. LSP `initializationOptions`.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(TM_URL_ENV).filter(|url| !url.trim().is_empty()) {
            tracing::debug!(%url, "translation memory URL from environment");
            self.translation_memory.base_url = url;
        }
        self
    }
}
