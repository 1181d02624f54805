//! TTS module: wraps the hosted text-to-speech API (voices, settings, synthesis, models).

mod client;
mod models;
mod types;

pub use client::{TtsClient, TtsClientBuilder, MAX_PAGE_SIZE};
pub use models::{find_model, list_models, DEFAULT_MODEL_ID};
pub use types::{
    mime_type_for, Model, OutputFormat, SynthesisRequest, SynthesisResult, Voice, VoiceSettings,
    VoiceSettingsOverrides, DEFAULT_SIMILARITY_BOOST, DEFAULT_STABILITY, DEFAULT_STYLE,
    DEFAULT_USE_SPEAKER_BOOST,
};
