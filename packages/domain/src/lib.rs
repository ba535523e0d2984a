//! # Dialogue Voice Domain
//!
//! Shared domain objects and types for the dialogue-voice workspace.
//!
//! This crate holds the value types that flow between the conversation
//! parser, the synthesis backends and the concatenation pipeline, so that
//! backend crates can implement [`SynthesisBackend`] without depending on
//! the pipeline itself.

pub mod audio_clip;
pub mod audio_format;
pub mod dialogue_error;
pub mod language;
pub mod pitch;
pub mod similarity;
pub mod speaker;
pub mod stability;
pub mod synthesis_backend;
pub mod utterance;
pub mod vocal_speed;
pub mod voice_id;
pub mod voice_profile;

// Re-export core types
pub use audio_clip::AudioClip;
pub use audio_format::{AudioFormat, SynthesizedAudio};
pub use dialogue_error::{BoxError, DialogueError};
pub use language::Language;
pub use pitch::PitchShift;
pub use similarity::Similarity;
pub use speaker::SpeakerLabel;
pub use stability::Stability;
pub use synthesis_backend::SynthesisBackend;
pub use utterance::Utterance;
pub use vocal_speed::VocalSpeedMod;
pub use voice_id::VoiceId;
pub use voice_profile::VoiceProfile;

/// Convenience result alias used across the workspace.
pub type Result<T, E = DialogueError> = std::result::Result<T, E>;

