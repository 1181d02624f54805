//! TTS (Text-to-Speech) types.

use crate::{Error, ErrorContext};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_STABILITY: f32 = 0.5;
pub const DEFAULT_SIMILARITY_BOOST: f32 = 0.75;
pub const DEFAULT_STYLE: f32 = 0.0;
pub const DEFAULT_USE_SPEAKER_BOOST: bool = true;

/// A speaker profile as listed by the service (settings excluded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
}

/// Delivery parameters for a voice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: DEFAULT_STABILITY,
            similarity_boost: DEFAULT_SIMILARITY_BOOST,
            style: DEFAULT_STYLE,
            use_speaker_boost: DEFAULT_USE_SPEAKER_BOOST,
        }
    }
}

/// Partial settings: every field the service or the caller may leave out.
///
/// Doubles as the wire shape of a voice's `settings` object, where any field
/// may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettingsOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_boost: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_speaker_boost: Option<bool>,
}

impl VoiceSettingsOverrides {
    /// Field-by-field merge onto `base`.
    pub fn apply_to(&self, base: VoiceSettings) -> VoiceSettings {
        VoiceSettings {
            stability: self.stability.unwrap_or(base.stability),
            similarity_boost: self.similarity_boost.unwrap_or(base.similarity_boost),
            style: self.style.unwrap_or(base.style),
            use_speaker_boost: self.use_speaker_boost.unwrap_or(base.use_speaker_boost),
        }
    }

    pub fn resolve(&self) -> VoiceSettings {
        self.apply_to(VoiceSettings::default())
    }
}

impl From<VoiceSettings> for VoiceSettingsOverrides {
    fn from(s: VoiceSettings) -> Self {
        Self {
            stability: Some(s.stability),
            similarity_boost: Some(s.similarity_boost),
            style: Some(s.style),
            use_speaker_boost: Some(s.use_speaker_boost),
        }
    }
}

/// A selectable synthesis engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Model {
    pub model_id: &'static str,
    pub name: &'static str,
}

/// Output encodings offered by the bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    Mp3_22050_32,
    #[default]
    Mp3_44100_128,
    Wav44100,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Mp3_22050_32,
        OutputFormat::Mp3_44100_128,
        OutputFormat::Wav44100,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3_22050_32 => "mp3_22050_32",
            Self::Mp3_44100_128 => "mp3_44100_128",
            Self::Wav44100 => "wav_44100",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        mime_type_for(self.as_str())
    }

    pub fn extension(&self) -> &'static str {
        if self.as_str().starts_with("mp3") {
            "mp3"
        } else {
            "wav"
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                Error::validation_with_context(
                    format!("Unknown output format '{}'", s),
                    ErrorContext::new()
                        .with_field_path("output_format")
                        .with_details("expected one of mp3_22050_32, mp3_44100_128, wav_44100"),
                )
            })
    }
}

/// MIME type for an output format literal: `mp3*` is MPEG audio, everything else WAV.
pub fn mime_type_for(output_format: &str) -> &'static str {
    if output_format.starts_with("mp3") {
        "audio/mpeg"
    } else {
        "audio/wav"
    }
}

/// Everything one synthesis call needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: String,
    pub model_id: String,
    pub output_format: OutputFormat,
    pub voice_settings: VoiceSettingsOverrides,
    pub seed: Option<u32>,
    pub language_code: Option<String>,
    /// Passed through to the service untouched.
    pub speed: Option<f32>,
}

impl SynthesisRequest {
    /// Request with the default model and format and no overrides.
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: voice_id.into(),
            model_id: super::models::DEFAULT_MODEL_ID.to_string(),
            output_format: OutputFormat::default(),
            voice_settings: VoiceSettingsOverrides::default(),
            seed: None,
            language_code: None,
            speed: None,
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_voice_settings(mut self, settings: impl Into<VoiceSettingsOverrides>) -> Self {
        self.voice_settings = settings.into();
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_language_code(mut self, code: impl Into<String>) -> Self {
        self.language_code = Some(code.into());
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }
}

/// Synthesized audio plus the MIME type derived from the requested format.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    pub audio: Vec<u8>,
    pub mime_type: &'static str,
    pub output_format: OutputFormat,
}

impl SynthesisResult {
    pub fn new(audio: Vec<u8>, output_format: OutputFormat) -> Self {
        Self {
            audio,
            mime_type: output_format.mime_type(),
            output_format,
        }
    }

    pub fn file_extension(&self) -> &'static str {
        self.output_format.extension()
    }

    pub fn len(&self) -> usize {
        self.audio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.audio.is_empty()
    }
}
