//! API key resolution.
//!
//! The key is looked up in an ordered list of [`SecretSource`]s: the OS keyring
//! (the interactive session's secret store) first, then the process environment.
//! The first non-empty value wins and is checked against the placeholder shipped
//! in sample configs before it is handed to the transport.

use crate::{Error, ErrorContext, Result};
use keyring::Entry;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::sync::Arc;

/// Name of the secret in every source.
pub const API_KEY_NAME: &str = "ELEVENLABS_API_KEY";

/// Literal left in sample secrets files; never a usable key.
pub const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

const MASK_PREFIX_LEN: usize = 4;

/// Resolved API key. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First few characters followed by an ellipsis, for status displays.
    ///
    /// Keys too short to keep most of their characters hidden are fully masked.
    pub fn masked(&self) -> String {
        if self.0.chars().count() <= MASK_PREFIX_LEN * 2 {
            return "***".to_string();
        }
        let prefix: String = self.0.chars().take(MASK_PREFIX_LEN).collect();
        format!("{}...", prefix)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// A place a named secret may be stored.
pub trait SecretSource: Send + Sync {
    fn lookup(&self, name: &str) -> Option<String>;
    fn name(&self) -> &'static str;
}

/// OS keyring entry under a fixed service name.
pub struct KeyringSource {
    service: String,
}

impl KeyringSource {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl SecretSource for KeyringSource {
    fn lookup(&self, name: &str) -> Option<String> {
        let entry = Entry::new(&self.service, name).ok()?;
        entry.get_password().ok()
    }

    fn name(&self) -> &'static str {
        "keyring"
    }
}

pub struct EnvSource;

impl SecretSource for EnvSource {
    fn lookup(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn name(&self) -> &'static str {
        "environment"
    }
}

/// Fixed in-memory secrets, for tests and embedding applications.
#[derive(Default)]
pub struct StaticSource {
    values: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl SecretSource for StaticSource {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[derive(Clone)]
pub struct CredentialResolver {
    sources: Vec<Arc<dyn SecretSource>>,
}

impl CredentialResolver {
    pub fn new(sources: Vec<Arc<dyn SecretSource>>) -> Self {
        Self { sources }
    }

    /// Keyring under `keyring_service`, then the environment.
    pub fn standard(keyring_service: &str) -> Self {
        Self::new(vec![
            Arc::new(KeyringSource::new(keyring_service)),
            Arc::new(EnvSource),
        ])
    }

    /// Resolver that always yields `key` (still subject to the placeholder check).
    pub fn fixed(key: impl Into<String>) -> Self {
        Self::new(vec![Arc::new(StaticSource::new().with(API_KEY_NAME, key))])
    }

    pub fn resolve(&self) -> Result<ApiKey> {
        for source in &self.sources {
            let Some(value) = source.lookup(API_KEY_NAME) else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            if value == PLACEHOLDER_API_KEY {
                tracing::warn!(source = source.name(), "placeholder API key found");
                return Err(Error::configuration_with_context(
                    format!(
                        "{} is still set to the placeholder value; replace it with your actual ElevenLabs API key",
                        API_KEY_NAME
                    ),
                    ErrorContext::new()
                        .with_field_path(API_KEY_NAME)
                        .with_source(source.name()),
                ));
            }
            tracing::debug!(source = source.name(), "API key resolved");
            return Ok(ApiKey(value.to_string()));
        }

        let searched: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        Err(Error::configuration_with_context(
            format!("{} not found in keyring or environment variables", API_KEY_NAME),
            ErrorContext::new()
                .with_field_path(API_KEY_NAME)
                .with_details(format!("searched: {}", searched.join(", "))),
        ))
    }
}

impl fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("CredentialResolver")
            .field("sources", &names)
            .finish()
    }
}
