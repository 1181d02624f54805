use super::cache::VoiceCache;
use super::controls::SynthesisControls;
use crate::transport::{HttpTransport, SpeechTransport};
use crate::tts::{Model, SynthesisResult, TtsClient, Voice, VoiceSettings};
use crate::{Error, ErrorContext, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Page size the bench asks for when filling its voice picker.
pub const VOICE_PAGE_SIZE: usize = 50;

pub const DOWNLOAD_STEM: &str = "voice_bench_output";

/// Outcome of the connectivity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected { voices_available: bool },
    Failed {
        message: String,
        remediation: Option<&'static str>,
    },
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Connected {
                voices_available: true,
            } => write!(f, "API connected - voices available"),
            ConnectionStatus::Connected {
                voices_available: false,
            } => write!(f, "API connected but no voices found"),
            ConnectionStatus::Failed {
                message,
                remediation,
            } => {
                write!(f, "API connection failed: {}", message)?;
                if let Some(hint) = remediation {
                    write!(f, "\n{}", hint)?;
                }
                Ok(())
            }
        }
    }
}

/// One operator's bench: the client, the voice cache and the last generated audio.
pub struct BenchSession<T: SpeechTransport = HttpTransport> {
    client: TtsClient<T>,
    voices: VoiceCache,
    last: Option<SynthesisResult>,
}

impl<T: SpeechTransport> BenchSession<T> {
    pub fn new(client: TtsClient<T>, voice_cache_ttl: Duration) -> Self {
        Self {
            client,
            voices: VoiceCache::new(voice_cache_ttl),
            last: None,
        }
    }

    pub fn client(&self) -> &TtsClient<T> {
        &self.client
    }

    pub fn voice_cache(&self) -> &VoiceCache {
        &self.voices
    }

    /// Check connectivity with the smallest possible listing.
    pub async fn status(&self) -> ConnectionStatus {
        match self.client.list_voices(1).await {
            Ok(voices) => ConnectionStatus::Connected {
                voices_available: !voices.is_empty(),
            },
            Err(e) => ConnectionStatus::Failed {
                remediation: e.remediation(),
                message: e.to_string(),
            },
        }
    }

    pub fn models(&self) -> Vec<Model> {
        self.client.list_models()
    }

    /// Voice listing, served from the cache while it is fresh.
    pub async fn voices(&mut self) -> Result<Vec<Voice>> {
        if let Some(cached) = self.voices.get() {
            return Ok(cached.to_vec());
        }
        let voices = self.client.list_voices(VOICE_PAGE_SIZE).await?;
        self.voices.set(voices.clone());
        Ok(voices)
    }

    pub fn refresh_voices(&mut self) {
        self.voices.invalidate();
    }

    /// Starting values for the sliders; the built-in defaults if the lookup fails.
    pub async fn settings_for(&self, voice_id: &str) -> VoiceSettings {
        match self.client.get_voice_settings(voice_id).await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to get voice settings: {}; using defaults", e);
                VoiceSettings::default()
            }
        }
    }

    /// Voice id and default settings for an operator's pick.
    ///
    /// `id_or_name` is tried as a voice id against the full listing first, so ids
    /// beyond the cached page still resolve. Otherwise it is matched
    /// case-insensitively against the names in the cached page.
    pub async fn resolve_voice(&mut self, id_or_name: &str) -> Result<(String, VoiceSettings)> {
        let by_id = self.client.get_voice_settings(id_or_name).await;
        match by_id {
            Ok(settings) => return Ok((id_or_name.to_string(), settings)),
            Err(Error::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let voice_id = self
            .voices()
            .await?
            .into_iter()
            .find(|v| v.name.eq_ignore_ascii_case(id_or_name))
            .map(|v| v.voice_id)
            .ok_or_else(|| {
                Error::not_found_with_context(
                    format!("No voice with ID or name '{}'", id_or_name),
                    ErrorContext::new()
                        .with_field_path("voice")
                        .with_source("bench_session"),
                )
            })?;
        let settings = self.client.get_voice_settings(&voice_id).await?;
        Ok((voice_id, settings))
    }

    /// Validate, synthesize and keep the result. On failure the previous result stays.
    pub async fn generate(&mut self, controls: &SynthesisControls) -> Result<&SynthesisResult> {
        let request = controls.to_request()?;
        let result = self.client.synthesize(&request).await?;
        Ok(self.last.insert(result))
    }

    pub fn last_result(&self) -> Option<&SynthesisResult> {
        self.last.as_ref()
    }

    pub fn download_file_name(&self) -> Option<String> {
        self.last
            .as_ref()
            .map(|r| format!("{}.{}", DOWNLOAD_STEM, r.file_extension()))
    }

    /// Write the last audio into `dir` under [`download_file_name`](Self::download_file_name).
    pub async fn save_last(&self, dir: &Path) -> Result<PathBuf> {
        let (Some(result), Some(name)) = (self.last.as_ref(), self.download_file_name()) else {
            return Err(Error::validation_with_context(
                "Generate speech before downloading",
                ErrorContext::new().with_source("bench_session"),
            ));
        };
        let path = dir.join(name);
        tokio::fs::write(&path, &result.audio).await?;
        tracing::info!("Saved {} bytes to {}", result.len(), path.display());
        Ok(path)
    }
}
