use super::{
    ConvertRequest, RemoteVoice, SpeechTransport, TransportError, TransportResult, VoiceListing,
};
use crate::config::BenchConfig;
use crate::credentials::ApiKey;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::Proxy;
use url::Url;

const API_KEY_HEADER: &str = "xi-api-key";

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &BenchConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "Base URL cannot carry API paths",
                    ErrorContext::new()
                        .with_field_path("ELEVENLABS_BASE_URL")
                        .with_details(config.base_url.clone()),
                )
            })?;

        let mut builder = reqwest::Client::builder();

        // No timeout unless configured: long syntheses must not be cut off by us.
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = &config.proxy_url {
            match Proxy::all(proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => tracing::warn!("ignoring invalid proxy URL: {}", e),
            }
        }

        let client = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// `base_url` with `segments` appended, each percent-encoded as a single segment.
    fn endpoint(&self, segments: &[&str]) -> TransportResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::Other(format!("cannot extend {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn check_status(response: reqwest::Response) -> TransportResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(TransportError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SpeechTransport for HttpTransport {
    async fn fetch_voices(&self, api_key: &ApiKey) -> TransportResult<Vec<RemoteVoice>> {
        let url = self.endpoint(&["v1", "voices"])?;
        tracing::debug!(%url, "listing voices");

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, api_key.expose())
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let body = response.bytes().await?;
        let listing: VoiceListing =
            serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))?;
        Ok(listing.voices)
    }

    async fn convert(
        &self,
        api_key: &ApiKey,
        request: &ConvertRequest,
    ) -> TransportResult<Vec<u8>> {
        // Dot segments would be dropped by the URL parser and hit the parent route.
        if matches!(request.voice_id.as_str(), "" | "." | "..") {
            return Err(TransportError::InvalidVoiceId(request.voice_id.clone()));
        }
        let url = self.endpoint(&["v1", "text-to-speech", &request.voice_id])?;
        tracing::debug!(%url, output_format = %request.output_format, "converting text");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key.expose())
            .query(&[("output_format", request.output_format.as_str())])
            .json(request)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        // Drain the chunked body; a failure mid-stream discards what was read.
        let chunks: Vec<Bytes> = response.bytes_stream().try_collect().await?;
        Ok(chunks.concat())
    }
}
