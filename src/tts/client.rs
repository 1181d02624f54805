//! TTS (Text-to-Speech) client.
//!
//! Each operation resolves the API key, makes exactly one remote call and
//! normalizes the outcome into [`crate::Error`]. Nothing is retried or cached
//! here; callers that want a voice cache keep one themselves
//! (see [`crate::bench::VoiceCache`]).

use super::models;
use super::types::{Model, SynthesisRequest, SynthesisResult, Voice, VoiceSettings};
use crate::config::BenchConfig;
use crate::credentials::{ApiKey, CredentialResolver};
use crate::transport::{ConvertRequest, HttpTransport, SpeechTransport, WireVoiceSettings};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;

/// Largest page the voice listing is truncated to.
pub const MAX_PAGE_SIZE: usize = 100;

/// Client for the text-to-speech service.
pub struct TtsClient<T: SpeechTransport = HttpTransport> {
    transport: Arc<T>,
    credentials: CredentialResolver,
}

impl<T: SpeechTransport> Clone for TtsClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            credentials: self.credentials.clone(),
        }
    }
}

impl TtsClient<HttpTransport> {
    /// HTTP transport plus the keyring→environment resolver, both from `config`.
    pub fn from_config(config: &BenchConfig) -> Result<Self> {
        TtsClientBuilder::new()
            .transport(HttpTransport::new(config)?)
            .credentials(CredentialResolver::standard(&config.keyring_service))
            .build()
    }
}

impl<T: SpeechTransport> TtsClient<T> {
    pub fn builder() -> TtsClientBuilder<T> {
        TtsClientBuilder::new()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn resolve_credential(&self) -> Result<ApiKey> {
        self.credentials.resolve()
    }

    /// Voices in listing order, at most `page_size` (capped at [`MAX_PAGE_SIZE`]).
    pub async fn list_voices(&self, page_size: usize) -> Result<Vec<Voice>> {
        let api_key = self.resolve_credential()?;
        let limit = page_size.clamp(1, MAX_PAGE_SIZE);

        let remote = self.transport.fetch_voices(&api_key).await.map_err(|e| {
            tracing::error!("Failed to list voices: {}", e);
            Error::from(e)
        })?;

        let voices: Vec<Voice> = remote
            .into_iter()
            .take(limit)
            .map(|v| Voice {
                voice_id: v.voice_id,
                name: v.name,
            })
            .collect();
        tracing::info!("Successfully retrieved {} voices", voices.len());
        Ok(voices)
    }

    /// Default settings of one voice, with fallbacks for fields the service omits.
    pub async fn get_voice_settings(&self, voice_id: &str) -> Result<VoiceSettings> {
        let api_key = self.resolve_credential()?;

        let remote = self.transport.fetch_voices(&api_key).await.map_err(|e| {
            tracing::error!("Failed to get voice settings for {}: {}", voice_id, e);
            Error::from(e)
        })?;

        let voice = remote
            .into_iter()
            .find(|v| v.voice_id == voice_id)
            .ok_or_else(|| {
                tracing::warn!("Voice {} not in listing", voice_id);
                Error::not_found_with_context(
                    format!("Voice with ID {} not found", voice_id),
                    ErrorContext::new()
                        .with_field_path("voice_id")
                        .with_source("tts_client"),
                )
            })?;

        let settings = voice.settings.unwrap_or_default().resolve();
        tracing::info!("Retrieved settings for voice {}", voice_id);
        Ok(settings)
    }

    /// One synthesis call; the audio is fully buffered before returning.
    ///
    /// Text is forwarded as given, empty or not.
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResult> {
        let api_key = self.resolve_credential()?;

        let body = ConvertRequest {
            voice_id: request.voice_id.clone(),
            output_format: request.output_format,
            text: request.text.clone(),
            model_id: request.model_id.clone(),
            voice_settings: WireVoiceSettings {
                settings: request.voice_settings.resolve(),
                speed: request.speed,
            },
            seed: request.seed,
            language_code: request.language_code.clone(),
        };

        let audio = self.transport.convert(&api_key, &body).await.map_err(|e| {
            tracing::error!("Failed to synthesize speech: {}", e);
            Error::from(e)
        })?;

        tracing::info!(
            "Successfully generated audio for text (length: {}, bytes: {})",
            request.text.chars().count(),
            audio.len()
        );
        Ok(SynthesisResult::new(audio, request.output_format))
    }

    pub fn list_models(&self) -> Vec<Model> {
        models::list_models()
    }
}

pub struct TtsClientBuilder<T: SpeechTransport> {
    transport: Option<Arc<T>>,
    credentials: Option<CredentialResolver>,
}

impl<T: SpeechTransport> TtsClientBuilder<T> {
    pub fn new() -> Self {
        Self {
            transport: None,
            credentials: None,
        }
    }

    pub fn transport(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Share a transport with the caller (tests keep a handle to inspect it).
    pub fn shared_transport(mut self, transport: Arc<T>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn credentials(mut self, resolver: CredentialResolver) -> Self {
        self.credentials = Some(resolver);
        self
    }

    pub fn api_key(self, api_key: impl Into<String>) -> Self {
        self.credentials(CredentialResolver::fixed(api_key))
    }

    pub fn build(self) -> Result<TtsClient<T>> {
        let transport = self
            .transport
            .ok_or_else(|| Error::configuration("Transport must be specified"))?;
        let credentials = self
            .credentials
            .unwrap_or_else(|| {
                CredentialResolver::standard(crate::config::DEFAULT_KEYRING_SERVICE)
            });
        Ok(TtsClient {
            transport,
            credentials,
        })
    }
}

impl<T: SpeechTransport> Default for TtsClientBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
