//! Built-in synthesis backends and runtime selection between them.

pub mod command;
pub mod coqui;
pub mod espeak;
pub mod google;

use clap::ValueEnum;
use dialogue_voice_domain::{SynthesisBackend, SynthesizedAudio, VoiceProfile};
use dialogue_voice_elevenlabs::ElevenLabsBackend;
use thiserror::Error;

pub use command::CommandError;
pub use coqui::{CoquiBackend, CoquiConfig};
pub use espeak::{EspeakBackend, EspeakConfig};
pub use google::{GoogleBackend, GoogleConfig, GoogleError};

use crate::voices::VoiceMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BackendKind {
    /// Coqui TTS `tts` CLI with the VCTK multi-speaker model
    #[default]
    Coqui,
    /// eSpeak / eSpeak NG
    Espeak,
    /// Google Cloud Text-to-Speech
    Google,
    /// ElevenLabs text-to-speech API
    Elevenlabs,
}

impl BackendKind {
    /// Built-in PersonA / PersonB roster for this backend.
    pub fn default_voices(self) -> VoiceMap {
        let pairs = match self {
            Self::Coqui => CoquiBackend::default_voices(),
            Self::Espeak => EspeakBackend::default_voices(),
            Self::Google => GoogleBackend::default_voices(),
            Self::Elevenlabs => ElevenLabsBackend::default_voices(),
        };
        VoiceMap::from_pairs(pairs)
    }
}

/// Error from whichever backend is active.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Google(#[from] GoogleError),
    #[error(transparent)]
    ElevenLabs(#[from] dialogue_voice_elevenlabs::Error),
}

impl EngineError {
    /// Local engine binary missing from PATH.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Command(e) if e.is_not_found())
    }
}

/// A backend chosen at runtime.
#[derive(Debug)]
pub enum AnyBackend {
    Coqui(CoquiBackend),
    Espeak(EspeakBackend),
    Google(GoogleBackend),
    ElevenLabs(ElevenLabsBackend),
}

impl AnyBackend {
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Coqui(_) => BackendKind::Coqui,
            Self::Espeak(_) => BackendKind::Espeak,
            Self::Google(_) => BackendKind::Google,
            Self::ElevenLabs(_) => BackendKind::Elevenlabs,
        }
    }
}

impl From<CoquiBackend> for AnyBackend {
    fn from(backend: CoquiBackend) -> Self {
        Self::Coqui(backend)
    }
}

impl From<EspeakBackend> for AnyBackend {
    fn from(backend: EspeakBackend) -> Self {
        Self::Espeak(backend)
    }
}

impl From<GoogleBackend> for AnyBackend {
    fn from(backend: GoogleBackend) -> Self {
        Self::Google(backend)
    }
}

impl From<ElevenLabsBackend> for AnyBackend {
    fn from(backend: ElevenLabsBackend) -> Self {
        Self::ElevenLabs(backend)
    }
}

impl SynthesisBackend for AnyBackend {
    type Error = EngineError;

    fn name(&self) -> &str {
        match self {
            Self::Coqui(b) => b.name(),
            Self::Espeak(b) => b.name(),
            Self::Google(b) => b.name(),
            Self::ElevenLabs(b) => b.name(),
        }
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceProfile,
    ) -> Result<SynthesizedAudio, EngineError> {
        Ok(match self {
            Self::Coqui(b) => b.synthesize(text, voice).await?,
            Self::Espeak(b) => b.synthesize(text, voice).await?,
            Self::Google(b) => b.synthesize(text, voice).await?,
            Self::ElevenLabs(b) => b.synthesize(text, voice).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialogue_voice_domain::SpeakerLabel;

    #[test]
    fn every_backend_voices_both_default_speakers() {
        for kind in BackendKind::value_variants() {
            let voices = kind.default_voices();
            assert_eq!(voices.len(), 2, "{kind:?}");
            assert!(voices.resolve(&SpeakerLabel::person_a()).is_ok());
            assert!(voices.resolve(&SpeakerLabel::person_b()).is_ok());
        }
    }

    #[test]
    fn backend_names_parse_from_cli() {
        assert_eq!(BackendKind::from_str("espeak", false), Ok(BackendKind::Espeak));
        assert_eq!(
            BackendKind::from_str("elevenlabs", false),
            Ok(BackendKind::Elevenlabs)
        );
        assert_eq!(BackendKind::default(), BackendKind::Coqui);
    }

    #[tokio::test]
    async fn dispatch_keeps_backend_error() {
        let backend = AnyBackend::from(EspeakBackend::new(EspeakConfig {
            program: "no-such-espeak".into(),
        }));
        assert_eq!(backend.name(), "espeak");
        assert_eq!(backend.kind(), BackendKind::Espeak);
        let err = backend
            .synthesize("Hello back.", &VoiceProfile::new("en-us+f3"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
