//! Speaker label as written in the conversation file.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label on the left of the `:` delimiter, trimmed.
///
/// Membership in a voice roster is not checked here; that happens when the
/// pipeline resolves a voice for the label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeakerLabel(String);

impl SpeakerLabel {
    /// First speaker of the default two-person roster.
    pub const PERSON_A: &'static str = "PersonA";
    /// Second speaker of the default two-person roster.
    pub const PERSON_B: &'static str = "PersonB";

    /// Create a label, trimming surrounding whitespace.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(label.as_ref().trim().to_owned())
    }

    pub fn person_a() -> Self {
        Self(Self::PERSON_A.to_owned())
    }

    pub fn person_b() -> Self {
        Self(Self::PERSON_B.to_owned())
    }

    /// Get the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison used by rosters configured that way.
    pub fn matches_ignore_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl fmt::Display for SpeakerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpeakerLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl AsRef<str> for SpeakerLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_trimmed() {
        assert_eq!(SpeakerLabel::new("  PersonA \t").as_str(), "PersonA");
    }

    #[test]
    fn ignore_case_matching() {
        let label = SpeakerLabel::new("persona");
        assert!(label.matches_ignore_case(SpeakerLabel::PERSON_A));
        assert_ne!(label, SpeakerLabel::person_a());
    }
}
