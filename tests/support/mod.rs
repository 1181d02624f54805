//! In-process stand-in for the remote service.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use voice_bench::credentials::ApiKey;
use voice_bench::transport::{ConvertRequest, RemoteVoice, SpeechTransport, TransportError};
use voice_bench::{TtsClient, VoiceSettingsOverrides};

/// Counting mock: returns a fixed listing and a fixed payload, or fails on demand.
#[derive(Default)]
pub struct MockTransport {
    pub voices: Vec<RemoteVoice>,
    pub audio: Vec<u8>,
    pub fail_with: Mutex<Option<String>>,
    pub fetch_calls: AtomicUsize,
    pub convert_calls: AtomicUsize,
    pub last_convert: Mutex<Option<ConvertRequest>>,
    pub last_key: Mutex<Option<String>>,
}

impl MockTransport {
    pub fn with_voices(voices: Vec<RemoteVoice>) -> Self {
        Self {
            voices,
            ..Default::default()
        }
    }

    pub fn audio(mut self, bytes: &[u8]) -> Self {
        self.audio = bytes.to_vec();
        self
    }

    pub fn failing(self, message: &str) -> Self {
        self.fail_from_now_on(message);
        self
    }

    /// Make every later call fail with `message`.
    pub fn fail_from_now_on(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst) + self.convert_calls.load(Ordering::SeqCst)
    }

    fn failure(&self) -> Option<TransportError> {
        self.fail_with.lock().unwrap().clone().map(TransportError::Other)
    }
}

#[async_trait]
impl SpeechTransport for MockTransport {
    async fn fetch_voices(&self, api_key: &ApiKey) -> Result<Vec<RemoteVoice>, TransportError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_key.lock().unwrap() = Some(api_key.expose().to_string());
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(self.voices.clone())
    }

    async fn convert(
        &self,
        api_key: &ApiKey,
        request: &ConvertRequest,
    ) -> Result<Vec<u8>, TransportError> {
        self.convert_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_key.lock().unwrap() = Some(api_key.expose().to_string());
        *self.last_convert.lock().unwrap() = Some(request.clone());
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(self.audio.clone())
    }
}

pub fn voice(id: &str, name: &str, settings: Option<VoiceSettingsOverrides>) -> RemoteVoice {
    RemoteVoice {
        voice_id: id.to_string(),
        name: name.to_string(),
        settings,
    }
}

/// Alpha has no settings object; Beta has a full one.
pub fn alpha_beta() -> Vec<RemoteVoice> {
    vec![
        voice("v1", "Alpha", None),
        voice(
            "v2",
            "Beta",
            Some(VoiceSettingsOverrides {
                stability: Some(0.7),
                similarity_boost: Some(0.8),
                style: Some(0.3),
                use_speaker_boost: Some(false),
            }),
        ),
    ]
}

pub fn client(transport: MockTransport) -> (TtsClient<MockTransport>, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    let client = TtsClient::builder()
        .shared_transport(Arc::clone(&transport))
        .api_key("test-api-key")
        .build()
        .expect("client");
    (client, transport)
}
