//! Human-readable security tips
//!
//! Tips are a side channel: nothing in [`crate::crypto`] depends on them, and a
//! source never fails. The remote variant degrades to the static list on any error.
//!
//! Which variant runs is decided once, from an explicit [`AdviceConfig`]. This module
//! never reads credentials from the environment.

mod remote;
mod static_list;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

pub use remote::{RemoteAdvice, RemoteAdviceError};
pub use static_list::{StaticAdvice, STATIC_TIPS};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A capability that produces one short security tip for a topic
#[async_trait::async_trait]
pub trait AdviceSource: Send + Sync {
    async fn tip(&self, topic: &str) -> String;
}

/// Configuration for the advice source, usually the `[advice]` table of the app config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceConfig {
    /// API key for the text-generation service. Without one, only static tips are served.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model name used in the `generateContent` call
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the text-generation API
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).expect("hardcoded URL must parse")
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AdviceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the advice source this configuration describes
    ///
    /// Returns a [`RemoteAdvice`] when an API key is set, otherwise a [`StaticAdvice`].
    /// If the HTTP client cannot be built the static list is used instead.
    pub fn source(&self) -> Box<dyn AdviceSource> {
        let Some(api_key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Box::new(StaticAdvice);
        };

        match RemoteAdvice::new(self, api_key) {
            Ok(remote) => Box::new(remote),
            Err(e) => {
                tracing::warn!("failed to build remote advice client, using static tips: {}", e);
                Box::new(StaticAdvice)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdviceConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint.as_str(), "https://generativelanguage.googleapis.com/v1beta");
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_config_fills_defaults() {
        let config: AdviceConfig = serde_json::from_str(r#"{ "api_key": "k" }"#).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
    }

    #[tokio::test]
    async fn test_source_without_key_is_static() {
        let source = AdviceConfig::default().source();
        let tip = source.tip("key storage").await;
        assert!(STATIC_TIPS.contains(&tip.as_str()));
    }

    #[tokio::test]
    async fn test_blank_key_is_static() {
        let config = AdviceConfig {
            api_key: Some("   ".to_string()),
            // Would hang the test if a request were attempted
            endpoint: Url::parse("http://10.255.255.1").unwrap(),
            ..Default::default()
        };
        let tip = config.source().tip("anything").await;
        assert!(STATIC_TIPS.contains(&tip.as_str()));
    }
}
