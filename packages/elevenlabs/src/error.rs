use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("http error {status}: {body}")]
    HttpError { status: http::StatusCode, body: Value },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("tls setup failed: {0}")]
    TlsSetup(String),
    #[error("No ElevenLabs API key found. Set ELEVENLABS_API_KEY, ELEVEN_API_KEY, or ELEVEN_LABS_API_KEY")]
    MissingApiKey,
    #[error("request text must not be empty")]
    EmptyText,
    #[error("empty audio response for voice {voice_id}")]
    EmptyAudio { voice_id: String },
    #[error("pcm payload has odd length {len}")]
    MisalignedPcm { len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
