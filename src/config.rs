//! Environment-driven settings for the bench.
//!
//! Every knob has a production-friendly default; nothing here is required to
//! be set apart from the API key itself (see [`crate::credentials`]).

use crate::{Error, ErrorContext, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
pub const DEFAULT_KEYRING_SERVICE: &str = "voice-bench";
pub const DEFAULT_VOICE_CACHE_TTL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub base_url: String,
    /// `None` leaves the timeout to the HTTP client's defaults.
    pub timeout: Option<Duration>,
    pub proxy_url: Option<String>,
    pub voice_cache_ttl: Duration,
    pub keyring_service: String,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            proxy_url: None,
            voice_cache_ttl: DEFAULT_VOICE_CACHE_TTL,
            keyring_service: DEFAULT_KEYRING_SERVICE.to_string(),
        }
    }
}

impl BenchConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup (tests, embedding).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("ELEVENLABS_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.base_url);
        url::Url::parse(&base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("ELEVENLABS_BASE_URL")
                    .with_details(base_url.clone()),
            )
        })?;

        let timeout = lookup("VOICE_BENCH_HTTP_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let proxy_url = lookup("VOICE_BENCH_PROXY_URL").filter(|s| !s.trim().is_empty());

        let voice_cache_ttl = lookup("VOICE_BENCH_VOICE_CACHE_TTL_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.voice_cache_ttl);

        let keyring_service = lookup("VOICE_BENCH_KEYRING_SERVICE")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.keyring_service);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            proxy_url,
            voice_cache_ttl,
            keyring_service,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_voice_cache_ttl(mut self, ttl: Duration) -> Self {
        self.voice_cache_ttl = ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = BenchConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, BenchConfig::default());
        assert_eq!(config.voice_cache_ttl, Duration::from_secs(600));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = BenchConfig::from_lookup(lookup_from(&[
            ("ELEVENLABS_BASE_URL", "http://127.0.0.1:4010/"),
            ("VOICE_BENCH_HTTP_TIMEOUT_SECS", "45"),
            ("VOICE_BENCH_VOICE_CACHE_TTL_SECS", "5"),
            ("VOICE_BENCH_KEYRING_SERVICE", "bench-dev"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:4010");
        assert_eq!(config.timeout, Some(Duration::from_secs(45)));
        assert_eq!(config.voice_cache_ttl, Duration::from_secs(5));
        assert_eq!(config.keyring_service, "bench-dev");
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = BenchConfig::from_lookup(lookup_from(&[
            ("VOICE_BENCH_HTTP_TIMEOUT_SECS", "soon"),
            ("VOICE_BENCH_VOICE_CACHE_TTL_SECS", "-1"),
        ]))
        .unwrap();
        assert!(config.timeout.is_none());
        assert_eq!(config.voice_cache_ttl, DEFAULT_VOICE_CACHE_TTL);
    }

    #[test]
    fn invalid_base_url_is_a_configuration_error() {
        let err = BenchConfig::from_lookup(lookup_from(&[("ELEVENLABS_BASE_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }
}
