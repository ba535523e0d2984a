//! The capability every speech engine provides to the pipeline.

use crate::{audio_format::SynthesizedAudio, voice_profile::VoiceProfile};
use std::future::Future;

/// Text-to-speech engine treated as a function from (text, voice) to audio.
///
/// Implementations may be local models, subprocesses or cloud services; the
/// pipeline only depends on this contract. Calls are awaited one at a time
/// and never retried, so a backend failure aborts the run with the backend's
/// own error kept as the source.
pub trait SynthesisBackend: Send + Sync {
    /// Backend-specific failure (network error, missing binary, bad params).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Synthesize non-empty `text` with `voice`.
    fn synthesize(
        &self,
        text: &str,
        voice: &VoiceProfile,
    ) -> impl Future<Output = Result<SynthesizedAudio, Self::Error>> + Send;
}
