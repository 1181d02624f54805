//! HTTP transport against a local mockito server.

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use voice_bench::{BenchConfig, Error, OutputFormat, SynthesisRequest, TtsClient, VoiceSettings};

struct MockServerFixture {
    server: ServerGuard,
}

impl MockServerFixture {
    async fn new() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    fn client(&self) -> TtsClient {
        let config = BenchConfig::default().with_base_url(self.server.url());
        TtsClient::builder()
            .transport(voice_bench::transport::HttpTransport::new(&config).unwrap())
            .api_key("test-api-key")
            .build()
            .unwrap()
    }

    async fn mock_voices(&mut self, body: serde_json::Value) -> mockito::Mock {
        self.server
            .mock("GET", "/v1/voices")
            .match_header("xi-api-key", "test-api-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }
}

fn listing() -> serde_json::Value {
    json!({
        "voices": [
            {"voice_id": "v1", "name": "Alpha", "settings": null, "category": "premade"},
            {"voice_id": "v2", "name": "Beta", "settings": {
                "stability": 0.25,
                "similarity_boost": 0.5,
                "style": 0.125,
                "use_speaker_boost": false
            }}
        ]
    })
}

#[tokio::test]
async fn lists_voices_with_api_key_header() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_voices(listing()).await;

    let voices = fixture.client().list_voices(50).await.unwrap();
    assert_eq!(voices.len(), 2);
    assert_eq!(voices[0].name, "Alpha");
    assert_eq!(voices[1].voice_id, "v2");
    mock.assert_async().await;
}

#[tokio::test]
async fn reads_settings_from_listing() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_voices(listing()).await;
    let client = fixture.client();

    assert_eq!(
        client.get_voice_settings("v2").await.unwrap(),
        VoiceSettings {
            stability: 0.25,
            similarity_boost: 0.5,
            style: 0.125,
            use_speaker_boost: false,
        }
    );
    assert_eq!(client.get_voice_settings("v1").await.unwrap(), VoiceSettings::default());
}

#[tokio::test]
async fn posts_synthesis_and_returns_body_bytes() {
    let mut fixture = MockServerFixture::new().await;
    let payload: Vec<u8> = (0u8..=255).cycle().take(64 * 1024).collect();
    let mock = fixture
        .server
        .mock("POST", "/v1/text-to-speech/v2")
        .match_header("xi-api-key", "test-api-key")
        .match_query(Matcher::UrlEncoded("output_format".into(), "wav_44100".into()))
        .match_body(Matcher::PartialJson(json!({
            "text": "Hello there",
            "model_id": "eleven_flash_v2_5",
            "voice_settings": {"use_speaker_boost": true},
            "seed": 7
        })))
        .with_status(200)
        .with_header("content-type", "audio/wav")
        .with_body(&payload)
        .create_async()
        .await;

    let request = SynthesisRequest::new("Hello there", "v2")
        .with_model("eleven_flash_v2_5")
        .with_output_format(OutputFormat::Wav44100)
        .with_seed(7);
    let result = fixture.client().synthesize(&request).await.unwrap();

    assert_eq!(result.audio, payload);
    assert_eq!(result.mime_type, "audio/wav");
    mock.assert_async().await;
}

#[tokio::test]
async fn error_status_becomes_remote_error_with_body() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/v1/text-to-speech/v1")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"detail":{"status":"invalid_api_key","message":"Invalid API key"}}"#)
        .create_async()
        .await;

    let err = fixture
        .client()
        .synthesize(&SynthesisRequest::new("hi", "v1"))
        .await
        .unwrap_err();
    match err {
        Error::Remote { status, ref message } => {
            assert_eq!(status, Some(401));
            assert!(message.contains("Invalid API key"));
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_listing_is_a_remote_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("GET", "/v1/voices")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = fixture.client().list_voices(10).await.unwrap_err();
    assert!(matches!(err, Error::Remote { status: None, .. }));
}

#[tokio::test]
async fn unreachable_service_is_a_remote_error() {
    let config = BenchConfig::default().with_base_url("http://127.0.0.1:1");
    let client = TtsClient::builder()
        .transport(voice_bench::transport::HttpTransport::new(&config).unwrap())
        .api_key("test-api-key")
        .build()
        .unwrap();

    assert!(matches!(client.list_voices(1).await, Err(Error::Remote { .. })));
}

#[tokio::test]
async fn voice_id_with_path_characters_stays_on_the_synthesis_route() {
    let mut fixture = MockServerFixture::new().await;
    let wrong = fixture
        .server
        .mock("POST", "/v1/voices/x")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("WRONG-ENDPOINT")
        .expect(0)
        .create_async()
        .await;
    let right = fixture
        .server
        .mock("POST", "/v1/text-to-speech/..%2Fvoices%2Fx")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("audio")
        .create_async()
        .await;

    let result = fixture
        .client()
        .synthesize(&SynthesisRequest::new("hi", "../voices/x"))
        .await
        .unwrap();
    assert_eq!(result.audio, b"audio");
    wrong.assert_async().await;
    right.assert_async().await;
}

#[tokio::test]
async fn dot_voice_ids_are_refused_without_a_request() {
    let mut fixture = MockServerFixture::new().await;
    let parent = fixture
        .server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = fixture.client();
    for id in ["", ".", ".."] {
        let err = client
            .synthesize(&SynthesisRequest::new("hi", id))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Remote { status: None, .. }), "{id:?}");
        assert!(err.to_string().contains("Invalid voice id"));
    }
    parent.assert_async().await;
}
