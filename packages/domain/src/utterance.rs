//! One parsed line of dialogue.
use crate::speaker::SpeakerLabel;
use serde::{Deserialize, Serialize};

/// A speaker's line of dialogue, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    /// 1-based line number in the conversation file.
    pub line: usize,
    /// Who speaks.
    pub speaker: SpeakerLabel,
    /// What is said, trimmed.
    pub text: String,
}

impl Utterance {
    pub fn new(line: usize, speaker: impl Into<SpeakerLabel>, text: impl AsRef<str>) -> Self {
        Self {
            line,
            speaker: speaker.into(),
            text: text.as_ref().trim().to_owned(),
        }
    }

    /// Whether there is anything to synthesize.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
