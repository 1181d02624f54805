//! The interactive side of the bench.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`BenchSession`] | Client + voice cache + last generated audio for one operator |
//! | [`SynthesisControls`] | Widget values, validated into a [`crate::tts::SynthesisRequest`] |
//! | [`VoiceCache`] | Time-bounded, manually invalidatable voice listing |
//!
//! The client itself stays stateless; everything that lives across
//! interactions is owned here.

mod cache;
mod controls;
mod session;

pub use cache::{CacheStats, VoiceCache};
pub use controls::{
    SynthesisControls, DEFAULT_SPEED, SAMPLE_TEXT, SEED_MAX, SPEED_RANGE, UNIT_RANGE,
};
pub use session::{BenchSession, ConnectionStatus, DOWNLOAD_STEM, VOICE_PAGE_SIZE};
