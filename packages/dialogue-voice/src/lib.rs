//! # dialogue-voice
//!
//! Turns a two-person conversation script into one spoken WAV file.
//!
//! Each `Speaker: text` line is voiced with the speaker's configured voice by
//! a pluggable [`SynthesisBackend`], and the clips are joined in order with a
//! short silence between them.
//!
//! ```no_run
//! use dialogue_voice::{BackendKind, DialoguePipeline, PipelineConfig};
//! use dialogue_voice::engines::EspeakBackend;
//!
//! # async fn run() -> dialogue_voice::Result<()> {
//! let pipeline = DialoguePipeline::new(
//!     EspeakBackend::default(),
//!     BackendKind::Espeak.default_voices(),
//!     PipelineConfig::default(),
//! )?;
//! if let Some(rendered) = pipeline.process_file("data/conversation.txt").await? {
//!     println!("{} clips -> {}", rendered.clip_count, rendered.path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod conversation;
pub mod engines;
pub mod pipeline;
pub mod setup;
pub mod voices;

pub use audio::{ClipSpan, CombinedAudio};
pub use conversation::{Conversation, Utterances, parse_line};
pub use engines::{AnyBackend, BackendKind, EngineError};
pub use pipeline::{DEFAULT_GAP, DialoguePipeline, OutputTarget, PipelineConfig, RenderedDialogue};
pub use voices::VoiceMap;

pub use dialogue_voice_domain::{
    AudioClip, AudioFormat, DialogueError, Result, SpeakerLabel, SynthesisBackend,
    SynthesizedAudio, Utterance, VoiceProfile,
};
