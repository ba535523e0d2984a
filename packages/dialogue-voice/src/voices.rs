//! Speaker-to-voice resolution.
//!
//! The map is fixed when the pipeline is built. Lookup never falls back to
//! another voice: an unknown label is an [`DialogueError::InvalidSpeaker`].

use dialogue_voice_domain::{DialogueError, Result, SpeakerLabel, VoiceProfile};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct VoiceMap {
    voices: BTreeMap<String, VoiceProfile>,
    case_sensitive: bool,
}

/// On-disk roster: either a bare `{"Label": profile}` object or one wrapped
/// with matching options.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VoiceFile {
    Wrapped {
        #[serde(default = "default_case_sensitive")]
        case_sensitive: bool,
        voices: BTreeMap<String, VoiceProfile>,
    },
    Bare(BTreeMap<String, VoiceProfile>),
}

fn default_case_sensitive() -> bool {
    true
}

impl VoiceMap {
    pub fn new() -> Self {
        Self {
            voices: BTreeMap::new(),
            case_sensitive: true,
        }
    }

    /// Build from `(label, profile)` pairs.
    pub fn from_pairs<L, I>(pairs: I) -> Self
    where
        L: AsRef<str>,
        I: IntoIterator<Item = (L, VoiceProfile)>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |map, (label, profile)| map.with_voice(label, profile))
    }

    /// Parse a JSON roster.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: VoiceFile = serde_json::from_str(json)
            .map_err(|e| DialogueError::Configuration(format!("invalid voice file: {e}")))?;
        let (voices, case_sensitive) = match file {
            VoiceFile::Wrapped {
                case_sensitive,
                voices,
            } => (voices, case_sensitive),
            VoiceFile::Bare(voices) => (voices, true),
        };
        let map = Self::from_pairs(voices).case_sensitive(case_sensitive);
        map.validate()?;
        Ok(map)
    }

    /// Load a JSON roster from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DialogueError::Configuration(format!(
                "voice file not found: {}",
                path.display()
            )),
            _ => DialogueError::io(path, e),
        })?;
        Self::from_json(&json)
    }

    pub fn with_voice(mut self, label: impl AsRef<str>, profile: VoiceProfile) -> Self {
        self.voices
            .insert(SpeakerLabel::new(label).as_str().to_owned(), profile);
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Reject rosters that cannot resolve anything or are ambiguous.
    pub fn validate(&self) -> Result<()> {
        if self.voices.is_empty() {
            return Err(DialogueError::Configuration(
                "voice roster must define at least one speaker".into(),
            ));
        }
        if let Some((label, _)) = self.voices.iter().find(|(label, _)| label.is_empty()) {
            return Err(DialogueError::Configuration(format!(
                "voice roster contains an empty speaker label {label:?}"
            )));
        }
        if let Some((label, _)) = self
            .voices
            .iter()
            .find(|(_, profile)| profile.voice_id.id().trim().is_empty())
        {
            return Err(DialogueError::Configuration(format!(
                "speaker {label} has an empty voice_id"
            )));
        }
        if !self.case_sensitive {
            let mut seen = std::collections::BTreeSet::new();
            for label in self.voices.keys() {
                if !seen.insert(label.to_lowercase()) {
                    return Err(DialogueError::Configuration(format!(
                        "speaker {label} collides with another label when case is ignored"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Look up the voice for `speaker`.
    pub fn resolve(&self, speaker: &SpeakerLabel) -> Result<&VoiceProfile> {
        let found = if self.case_sensitive {
            self.voices.get(speaker.as_str())
        } else {
            self.voices
                .iter()
                .find(|(label, _)| speaker.matches_ignore_case(label))
                .map(|(_, profile)| profile)
        };
        found.ok_or_else(|| DialogueError::InvalidSpeaker {
            speaker: speaker.to_string(),
            known: self.labels().map(str::to_owned).collect(),
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.voices.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VoiceProfile)> {
        self.voices.iter().map(|(label, profile)| (label.as_str(), profile))
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Log the roster, one line per speaker.
    pub fn log_roster(&self, backend: &str) {
        for (label, profile) in self.iter() {
            info!(
                backend,
                speaker = label,
                voice = %profile.voice_id,
                description = profile.description.as_deref().unwrap_or(""),
                "voice assigned"
            );
        }
    }
}

impl Default for VoiceMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_people() -> VoiceMap {
        VoiceMap::from_pairs([
            (SpeakerLabel::PERSON_A, VoiceProfile::new("p273")),
            (SpeakerLabel::PERSON_B, VoiceProfile::new("p262")),
        ])
    }

    #[test]
    fn resolves_known_speakers() {
        let voices = two_people();
        let profile = voices.resolve(&SpeakerLabel::person_a()).unwrap();
        assert_eq!(profile.voice_id.id(), "p273");
        let profile = voices.resolve(&SpeakerLabel::person_b()).unwrap();
        assert_eq!(profile.voice_id.id(), "p262");
    }

    #[test]
    fn unknown_speaker_has_no_fallback() {
        let err = two_people()
            .resolve(&SpeakerLabel::new("PersonC"))
            .unwrap_err();
        match err {
            DialogueError::InvalidSpeaker { speaker, known } => {
                assert_eq!(speaker, "PersonC");
                assert_eq!(known, vec!["PersonA", "PersonB"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn matching_is_case_sensitive_by_default() {
        assert!(two_people().resolve(&SpeakerLabel::new("persona")).is_err());
        let relaxed = two_people().case_sensitive(false);
        assert_eq!(
            relaxed
                .resolve(&SpeakerLabel::new("persona"))
                .unwrap()
                .voice_id
                .id(),
            "p273"
        );
    }

    #[test]
    fn loads_bare_json_roster_with_extra_speakers() {
        let voices = VoiceMap::from_json(
            r#"{"Narrator": {"voice_id": "p225"},
                "PersonA": {"voice_id": "p273", "speed": 1.1}}"#,
        )
        .unwrap();
        assert_eq!(voices.len(), 2);
        assert!(voices.is_case_sensitive());
        assert_eq!(
            voices
                .resolve(&SpeakerLabel::new("Narrator"))
                .unwrap()
                .voice_id
                .id(),
            "p225"
        );
    }

    #[test]
    fn loads_wrapped_json_roster() {
        let voices = VoiceMap::from_json(
            r#"{"case_sensitive": false, "voices": {"Host": {"voice_id": "en-gb"}}}"#,
        )
        .unwrap();
        assert!(!voices.is_case_sensitive());
        assert!(voices.resolve(&SpeakerLabel::new("HOST")).is_ok());
    }

    #[test]
    fn rejects_empty_and_ambiguous_rosters() {
        assert!(matches!(
            VoiceMap::from_json("{}"),
            Err(DialogueError::Configuration(_))
        ));
        assert!(matches!(
            VoiceMap::from_json(
                r#"{"case_sensitive": false,
                    "voices": {"Host": {"voice_id": "a"}, "host": {"voice_id": "b"}}}"#
            ),
            Err(DialogueError::Configuration(_))
        ));
        assert!(matches!(
            VoiceMap::from_json(r#"{"Host": {"voice_id": "  "}}"#),
            Err(DialogueError::Configuration(_))
        ));
    }
}
