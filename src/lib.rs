//! # voice-bench
//!
//! Operator test bench for the ElevenLabs text-to-speech API: pick a voice, a
//! model and synthesis parameters, submit text, and play back or save the audio.
//!
//! ## Overview
//!
//! The library is a thin, stateless wrapper around the hosted service plus a
//! small session layer for the interactive surface:
//!
//! - [`TtsClient`] exposes the four operations: list voices, fetch a voice's
//!   default settings, synthesize, and list the fixed model catalog.
//! - [`credentials`] resolves the API key from the OS keyring, then the
//!   `ELEVENLABS_API_KEY` environment variable.
//! - [`transport`] is the single seam to the remote service.
//! - [`bench`] holds what lives across interactions: the voice cache and the
//!   last generated audio.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use voice_bench::{BenchConfig, OutputFormat, SynthesisRequest, TtsClient};
//!
//! #[tokio::main]
//! async fn main() -> voice_bench::Result<()> {
//!     let client = TtsClient::from_config(&BenchConfig::from_env()?)?;
//!
//!     let voices = client.list_voices(50).await?;
//!     let request = SynthesisRequest::new("Hello from the bench", &voices[0].voice_id)
//!         .with_output_format(OutputFormat::Wav44100);
//!     let result = client.synthesize(&request).await?;
//!     assert_eq!(result.mime_type, "audio/wav");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`tts`] | Client and data model (voices, settings, models, formats) |
//! | [`credentials`] | Ordered secret sources and placeholder rejection |
//! | [`transport`] | Remote service trait and its HTTP implementation |
//! | [`bench`] | Session state and control validation for the interactive surface |
//! | [`config`] | Environment-driven settings |

pub mod bench;
pub mod config;
pub mod credentials;
pub mod transport;
pub mod tts;

pub use bench::{BenchSession, ConnectionStatus, SynthesisControls};
pub use config::BenchConfig;
pub use credentials::{ApiKey, CredentialResolver};
pub use tts::{
    list_models, Model, OutputFormat, SynthesisRequest, SynthesisResult, TtsClient,
    TtsClientBuilder, Voice, VoiceSettings, VoiceSettingsOverrides,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
