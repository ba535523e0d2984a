//! Google Cloud Text-to-Speech over its REST `text:synthesize` method.
//!
//! Requests LINEAR16, which the service returns as a base64 WAV (header
//! included).

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use dialogue_voice_domain::{Language, SynthesisBackend, SynthesizedAudio, VoiceProfile};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com";
const SYNTHESIZE_PATH: &str = "/v1/text:synthesize";
pub const API_KEY_ENV: &str = "GOOGLE_TTS_API_KEY";

#[derive(Debug, Error)]
pub enum GoogleError {
    #[error("Google TTS API key is missing (set {API_KEY_ENV} or pass --google-api-key)")]
    MissingApiKey,
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
    #[error("http client setup failed: {0}")]
    ClientSetup(String),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error("Google TTS returned {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("audioContent is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("Google TTS returned no audio for voice {voice}")]
    EmptyAudio { voice: String },
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: TextInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct TextInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: String,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f32,
    pitch: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

#[derive(Clone)]
pub struct GoogleBackend {
    client: reqwest::Client,
    api_key: String,
    endpoint: Url,
}

impl std::fmt::Debug for GoogleBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleBackend")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"***")
            .finish()
    }
}

impl GoogleBackend {
    /// Build a client; the key comes from `config.api_key` or
    /// `GOOGLE_TTS_API_KEY`.
    pub fn new(config: GoogleConfig) -> Result<Self, GoogleError> {
        let api_key = config
            .api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or(GoogleError::MissingApiKey)?;

        let endpoint = config
            .base_url
            .parse::<Url>()
            .and_then(|base| base.join(SYNTHESIZE_PATH))
            .map_err(|e| GoogleError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
        let mut root_store = rustls::RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let client = reqwest::Client::builder()
            .use_preconfigured_tls(tls_config)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| GoogleError::ClientSetup(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            endpoint,
        })
    }

    pub fn default_voices() -> [(&'static str, VoiceProfile); 2] {
        [
            (
                "PersonA",
                VoiceProfile::new("en-GB-Neural2-B")
                    .with_language(Language::english_uk())
                    .with_description("Google Neural2, male, British"),
            ),
            (
                "PersonB",
                VoiceProfile::new("en-US-Neural2-F")
                    .with_language(Language::english_us())
                    .with_description("Google Neural2, female, American"),
            ),
        ]
    }

    fn request_body<'a>(text: &'a str, voice: &'a VoiceProfile) -> SynthesizeRequest<'a> {
        let name = voice.voice_id.id();
        // Voice names start with their language code ("en-GB-Neural2-B").
        let language_code = voice
            .language
            .as_ref()
            .map(|l| l.code().to_string())
            .unwrap_or_else(|| name.splitn(3, '-').take(2).collect::<Vec<_>>().join("-"));
        SynthesizeRequest {
            input: TextInput { text },
            voice: VoiceSelection {
                language_code,
                name,
            },
            audio_config: AudioConfig {
                audio_encoding: "LINEAR16",
                speaking_rate: voice.speed_factor(),
                pitch: voice.pitch_semitones(),
            },
        }
    }
}

impl SynthesisBackend for GoogleBackend {
    type Error = GoogleError;

    fn name(&self) -> &str {
        "google"
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceProfile,
    ) -> Result<SynthesizedAudio, GoogleError> {
        let body = Self::request_body(text, voice);
        debug!(endpoint = %self.endpoint, voice = %voice.voice_id, "google tts request");

        let resp = self
            .client
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GoogleError::Http { status, body });
        }

        let payload: SynthesizeResponse = resp.json().await?;
        let data = STANDARD.decode(payload.audio_content.as_bytes())?;
        if data.is_empty() {
            return Err(GoogleError::EmptyAudio {
                voice: voice.voice_id.to_string(),
            });
        }
        info!(size_bytes = data.len(), voice = %voice.voice_id, "Synthesized audio");
        Ok(SynthesizedAudio::wav(data))
    }
}
