//! ElevenLabs synthesis backend for dialogue-voice.
//!
//! # Usage
//!
//! ```no_run
//! use dialogue_voice_domain::{SynthesisBackend, VoiceProfile};
//! use dialogue_voice_elevenlabs::{ElevenLabsBackend, ElevenLabsConfig};
//!
//! # async fn run() -> Result<(), dialogue_voice_elevenlabs::Error> {
//! let backend = ElevenLabsBackend::from_env(ElevenLabsConfig::default())?;
//! let audio = backend
//!     .synthesize("Hello from dialogue-voice!", &VoiceProfile::new("Rachel"))
//!     .await?;
//! assert!(!audio.is_empty());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod endpoints;
mod engine;
mod error;

pub mod voice;

pub use client::{ClientConfig, DEFAULT_BASE_URL, ElevenLabsClient};
pub use endpoints::genai::tts::OutputFormat;
pub use engine::{DEFAULT_MODEL_ID, ElevenLabsBackend, ElevenLabsConfig};
pub use error::{Error, Result};
pub use voice::Voice;
