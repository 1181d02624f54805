//! The remote service seam.
//!
//! [`SpeechTransport`] is one method per remote call; [`http::HttpTransport`]
//! is the production implementation. Tests substitute their own.

pub mod http;

use crate::credentials::ApiKey;
use crate::tts::{OutputFormat, VoiceSettings, VoiceSettingsOverrides};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use http::HttpTransport;

/// A voice exactly as the listing endpoint returns it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RemoteVoice {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub settings: Option<VoiceSettingsOverrides>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VoiceListing {
    #[serde(default)]
    pub voices: Vec<RemoteVoice>,
}

/// Body of a text-to-speech call, already merged with defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertRequest {
    #[serde(skip)]
    pub voice_id: String,
    #[serde(skip)]
    pub output_format: OutputFormat,
    pub text: String,
    pub model_id: String,
    pub voice_settings: WireVoiceSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WireVoiceSettings {
    #[serde(flatten)]
    pub settings: VoiceSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
}

pub type TransportResult<T> = std::result::Result<T, TransportError>;

#[async_trait]
pub trait SpeechTransport: Send + Sync {
    /// Full voice listing, in service order.
    async fn fetch_voices(&self, api_key: &ApiKey) -> TransportResult<Vec<RemoteVoice>>;

    /// Synthesize and drain the audio stream into one buffer.
    async fn convert(
        &self,
        api_key: &ApiKey,
        request: &ConvertRequest,
    ) -> TransportResult<Vec<u8>>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid voice id '{0}'")]
    InvalidVoiceId(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
