//! Operator-facing inputs for one synthesis, and their range checks.

use crate::tts::{
    find_model, OutputFormat, SynthesisRequest, VoiceSettings, VoiceSettingsOverrides,
    DEFAULT_MODEL_ID,
};
use crate::{Error, ErrorContext, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::RangeInclusive;

pub const UNIT_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const SPEED_RANGE: RangeInclusive<f32> = 0.5..=1.5;
pub const SEED_MAX: u32 = 999_999;
pub const DEFAULT_SPEED: f32 = 1.0;

pub const SAMPLE_TEXT: &str = "Welcome to the TTS Test Bench. \
    This is a sample text that demonstrates the text-to-speech capabilities of ElevenLabs. \
    You can replace this with any text you'd like to convert to speech.";

// ISO 639 code with an optional region/script subtag ("en", "pt-BR").
static LANGUAGE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})?$").expect("valid regex"));

/// The values behind the bench's widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisControls {
    pub text: String,
    pub voice_id: String,
    pub model_id: String,
    pub output_format: OutputFormat,
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
    pub speed: f32,
    pub seed: Option<u32>,
    /// Free text; blank means "let the model decide".
    pub language_code: String,
}

impl SynthesisControls {
    /// Widgets as first shown for `voice_id`, seeded with that voice's defaults.
    pub fn for_voice(voice_id: impl Into<String>, defaults: VoiceSettings) -> Self {
        Self {
            text: SAMPLE_TEXT.to_string(),
            voice_id: voice_id.into(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            output_format: OutputFormat::default(),
            stability: defaults.stability,
            similarity_boost: defaults.similarity_boost,
            style: defaults.style,
            use_speaker_boost: defaults.use_speaker_boost,
            speed: DEFAULT_SPEED,
            seed: None,
            language_code: String::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn voice_settings(&self) -> VoiceSettings {
        VoiceSettings {
            stability: self.stability,
            similarity_boost: self.similarity_boost,
            style: self.style,
            use_speaker_boost: self.use_speaker_boost,
        }
    }

    /// Check every control and build the request the client expects.
    pub fn to_request(&self) -> Result<SynthesisRequest> {
        if self.text.trim().is_empty() {
            return Err(invalid("text", "Please enter some text to convert to speech", None));
        }
        if self.voice_id.trim().is_empty() {
            return Err(invalid("voice_id", "No voice selected", None));
        }
        if find_model(&self.model_id).is_none() {
            return Err(invalid(
                "model_id",
                format!("Unknown model '{}'", self.model_id),
                None,
            ));
        }

        check_range("stability", self.stability, &UNIT_RANGE)?;
        check_range("similarity_boost", self.similarity_boost, &UNIT_RANGE)?;
        check_range("style", self.style, &UNIT_RANGE)?;
        check_range("speed", self.speed, &SPEED_RANGE)?;

        if let Some(seed) = self.seed {
            if seed > SEED_MAX {
                return Err(invalid(
                    "seed",
                    format!("Seed {} is out of range", seed),
                    Some(format!("expected 0..={}", SEED_MAX)),
                ));
            }
        }

        let language_code = match self.language_code.trim() {
            "" => None,
            code if LANGUAGE_CODE.is_match(code) => Some(code.to_string()),
            code => {
                return Err(invalid(
                    "language_code",
                    format!("'{}' is not a language code", code),
                    Some("e.g. 'en', 'es', 'pt-BR'".to_string()),
                ))
            }
        };

        Ok(SynthesisRequest {
            text: self.text.clone(),
            voice_id: self.voice_id.clone(),
            model_id: self.model_id.clone(),
            output_format: self.output_format,
            voice_settings: VoiceSettingsOverrides::from(self.voice_settings()),
            seed: self.seed,
            language_code,
            speed: Some(self.speed),
        })
    }
}

fn check_range(field: &str, value: f32, range: &RangeInclusive<f32>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!("{} {} is out of range", field, value),
            Some(format!("expected {}..={}", range.start(), range.end())),
        ))
    }
}

fn invalid(field: &str, message: impl Into<String>, details: Option<String>) -> Error {
    let mut context = ErrorContext::new().with_field_path(format!("controls.{}", field));
    if let Some(details) = details {
        context = context.with_details(details);
    }
    Error::validation_with_context(message, context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> SynthesisControls {
        SynthesisControls::for_voice("v1", VoiceSettings::default())
    }

    #[test]
    fn defaults_produce_a_request() {
        let req = controls().to_request().unwrap();
        assert_eq!(req.voice_id, "v1");
        assert_eq!(req.model_id, DEFAULT_MODEL_ID);
        assert_eq!(req.voice_settings.resolve(), VoiceSettings::default());
        assert_eq!(req.speed, Some(1.0));
        assert_eq!(req.language_code, None);
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = controls().with_text("  \n ").to_request().unwrap_err();
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("controls.text")
        );
    }

    #[test]
    fn sliders_are_bounded() {
        let mut c = controls();
        c.style = 1.2;
        assert!(matches!(c.to_request(), Err(Error::Validation { .. })));

        let mut c = controls();
        c.speed = 0.4;
        assert!(c.to_request().is_err());

        let mut c = controls();
        c.speed = 1.5;
        c.stability = 0.0;
        assert!(c.to_request().is_ok());
    }

    #[test]
    fn seed_is_bounded() {
        let mut c = controls();
        c.seed = Some(SEED_MAX);
        assert_eq!(c.to_request().unwrap().seed, Some(SEED_MAX));
        c.seed = Some(SEED_MAX + 1);
        assert!(c.to_request().is_err());
    }

    #[test]
    fn language_code_is_trimmed_and_checked() {
        let mut c = controls();
        c.language_code = " es ".into();
        assert_eq!(c.to_request().unwrap().language_code.as_deref(), Some("es"));
        c.language_code = "pt-BR".into();
        assert!(c.to_request().is_ok());
        c.language_code = "spanish please".into();
        assert!(c.to_request().is_err());
    }

    #[test]
    fn unknown_model_is_rejected() {
        let mut c = controls();
        c.model_id = "eleven_v9".into();
        assert!(c.to_request().is_err());
    }
}
