//! Unified error for the dialogue pipeline.
use std::path::PathBuf;
use thiserror::Error;

/// Opaque backend failure carried as an error source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error covering parsing, voice resolution, synthesis and export.
///
/// An empty result (no utterance produced any audio) is deliberately not a
/// variant: the pipeline reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum DialogueError {
    /// The conversation file does not exist.
    #[error("conversation file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The speaker label has no configured voice.
    #[error("invalid speaker: {speaker:?}, must be one of {}", known.join(", "))]
    InvalidSpeaker { speaker: String, known: Vec<String> },
    /// The utterance text is empty after trimming.
    #[error("line {line}: text cannot be empty")]
    EmptyText { line: usize },
    /// The synthesis backend failed; its error is kept unchanged as source.
    #[error("line {line}: synthesis failed for {speaker}: {source}")]
    Synthesis {
        line: usize,
        speaker: String,
        #[source]
        source: BoxError,
    },
    /// Decoding, conforming or encoding audio failed.
    #[error("audio processing: {0}")]
    AudioProcessing(String),
    /// Configuration-related failure reason.
    #[error("configuration: {0}")]
    Configuration(String),
}

impl DialogueError {
    /// Build an [`DialogueError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error was raised before any backend was called for the
    /// offending line (bad input rather than a failing engine).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. } | Self::InvalidSpeaker { .. } | Self::EmptyText { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_speaker_lists_known_labels() {
        let err = DialogueError::InvalidSpeaker {
            speaker: "Narrator".into(),
            known: vec!["PersonA".into(), "PersonB".into()],
        };
        assert_eq!(
            err.to_string(),
            "invalid speaker: \"Narrator\", must be one of PersonA, PersonB"
        );
        assert!(err.is_input_error());
    }

    #[test]
    fn synthesis_keeps_backend_source() {
        let backend = std::io::Error::new(std::io::ErrorKind::NotFound, "espeak not found");
        let err = DialogueError::Synthesis {
            line: 3,
            speaker: "PersonA".into(),
            source: Box::new(backend),
        };
        let source = std::error::Error::source(&err).expect("source kept");
        assert_eq!(source.to_string(), "espeak not found");
        assert!(!err.is_input_error());
    }
}
