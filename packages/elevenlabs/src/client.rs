use crate::endpoints::{ElevenLabsEndpoint, RequestBody};
use crate::error::{Error, Result};
use reqwest::{Method, Url, header::CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

const XI_API_KEY_HEADER: &str = "xi-api-key";
const APPLICATION_JSON: &str = "application/json";

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// ElevenLabs client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme + host the endpoints are resolved against
    pub base_url: String,
    /// Whole-request timeout, including the audio download
    pub request_timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone)]
pub struct ElevenLabsClient {
    inner: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for ElevenLabsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevenLabsClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"***")
            .finish()
    }
}

impl ElevenLabsClient {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_config(ClientConfig::default())
    }

    pub fn from_env_with_config(config: ClientConfig) -> Result<Self> {
        // Try all possible ElevenLabs API key environment variables
        let api_key = std::env::var("ELEVENLABS_API_KEY")
            .or_else(|_| std::env::var("ELEVEN_API_KEY"))
            .or_else(|_| std::env::var("ELEVEN_LABS_API_KEY"))
            .map_err(|_| Error::MissingApiKey)?;

        Self::new_with_config(api_key, config)
    }

    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::new_with_config(api_key, ClientConfig::default())
    }

    pub fn new_with_config(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }

        let base_url = config
            .base_url
            .parse::<Url>()
            .map_err(|e| Error::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        // Install default crypto provider for rustls (ignore if already installed)
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
            .map_err(|e| Error::TlsSetup(e.to_string()))?;

        Ok(Self {
            inner: client,
            api_key,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn hit<T: ElevenLabsEndpoint>(&self, endpoint: T) -> Result<T::ResponseBody> {
        let url = endpoint.url(&self.base_url)?;
        debug!(method = %T::METHOD, %url, "elevenlabs request");

        let mut builder = self
            .inner
            .request(T::METHOD, url)
            .header(XI_API_KEY_HEADER, &self.api_key);

        if matches!(T::METHOD, Method::POST | Method::PATCH) {
            builder = match endpoint.request_body()? {
                RequestBody::Json(json) => {
                    builder.header(CONTENT_TYPE, APPLICATION_JSON).json(&json)
                }
                RequestBody::Empty => builder,
            };
        }

        let resp = builder.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
            return Err(Error::HttpError { status, body });
        }

        let bytes = resp.bytes().await?;
        debug!(%status, size_bytes = bytes.len(), "elevenlabs response");
        endpoint.response_body(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_api_key_is_rejected() {
        assert!(matches!(
            ElevenLabsClient::new("   "),
            Err(Error::MissingApiKey)
        ));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client = ElevenLabsClient::new("sk_live_secret").unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("sk_live_secret"));
        assert!(rendered.contains("api.elevenlabs.io"));
    }
}
