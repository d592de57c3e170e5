//! Translation-memory lookups.
//!
//! A translation memory maps a source sentence to previously translated
//! sentences in a target language, each with a match quality from 0 to 100.
//! [`HttpTranslationMemory`] talks to an Amagama-compatible service:
//!
//! ```text
//! GET {base}/{language}/{source}/?max_results=3&min_quality=80
//! [{"target": "Bonjour", "quality": 100.0}, ...]
//! ```

use crate::config::TranslationMemoryConfig;
use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Characters escaped in a path segment: everything but
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One suggestion returned by a translation memory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmMatch {
    pub target: String,
    pub quality: f64,
}

/// Transport and decoding failures are reported alike.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("translation memory request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation memory lookup failed: {0}")]
    Other(String),
}

#[async_trait]
pub trait TranslationMemory: Send + Sync {
    /// Suggestions for `source` translated into `target_language`.
    async fn lookup(&self, target_language: &str, source: &str)
    -> Result<Vec<TmMatch>, LookupError>;
}

/// HTTP client for an Amagama-style translation memory.
#[derive(Debug, Clone)]
pub struct HttpTranslationMemory {
    client: reqwest::Client,
    config: TranslationMemoryConfig,
}

impl HttpTranslationMemory {
    pub fn new(config: TranslationMemoryConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Request URL for a lookup.
    pub fn request_url(&self, target_language: &str, source: &str) -> String {
        format!(
            "{}/{}/{}/?max_results={}&min_quality={}",
            self.config.base_url.trim_end_matches('/'),
            utf8_percent_encode(target_language, COMPONENT),
            utf8_percent_encode(source, COMPONENT),
            self.config.max_results,
            self.config.min_quality,
        )
    }
}

#[async_trait]
impl TranslationMemory for HttpTranslationMemory {
    async fn lookup(
        &self,
        target_language: &str,
        source: &str,
    ) -> Result<Vec<TmMatch>, LookupError> {
        let url = self.request_url(target_language, source);
        tracing::debug!(%url, "translation memory request");
        let matches = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<TmMatch>>()
            .await?;
        tracing::debug!(count = matches.len(), "translation memory response");
        Ok(matches)
    }
}
