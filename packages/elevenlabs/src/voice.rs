//! Premade ElevenLabs voices.
//!
//! Profiles may name one of these (`"George"`) instead of spelling out the
//! opaque voice id; anything else is passed through as a raw id.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Voice {
    /// Young, cheerful American female voice
    Rachel,
    /// Warm, friendly female voice
    Sarah,
    /// Mature, distinguished British male voice
    George,
    /// British, articulate male voice
    Callum,
    /// Clear, professional female voice
    Alice,
    /// Professional, trustworthy male voice
    Brian,
    /// Warm, engaging British male voice
    Daniel,
    /// Sweet, gentle British female voice
    Lily,
}

impl Voice {
    /// Get the ElevenLabs voice ID for this voice
    pub fn id(self) -> &'static str {
        match self {
            Voice::Rachel => "21m00Tcm4TlvDq8ikWAM",
            Voice::Sarah => "EXAVITQu4vr4xnSDxMaL",
            Voice::George => "JBFqnCBsd6RMkjVDRZzb",
            Voice::Callum => "N2lVS1w4EtoT3dr4eOWO",
            Voice::Alice => "Xb7hH8MSUJpSbSDYk0k2",
            Voice::Brian => "nPczCjzI2devNBz1zQrb",
            Voice::Daniel => "onwK4e9ZLuTAKqWW03F9",
            Voice::Lily => "pFZP5JQG7iQjIQuC4Bku",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Voice::Rachel => "Rachel",
            Voice::Sarah => "Sarah",
            Voice::George => "George",
            Voice::Callum => "Callum",
            Voice::Alice => "Alice",
            Voice::Brian => "Brian",
            Voice::Daniel => "Daniel",
            Voice::Lily => "Lily",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Voice::Rachel => "Young, cheerful American female voice",
            Voice::Sarah => "Warm, friendly female voice",
            Voice::George => "Mature, distinguished British male voice",
            Voice::Callum => "British, articulate male voice",
            Voice::Alice => "Clear, professional female voice",
            Voice::Brian => "Professional, trustworthy male voice",
            Voice::Daniel => "Warm, engaging British male voice",
            Voice::Lily => "Sweet, gentle British female voice",
        }
    }

    /// Look a voice up by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Voice> {
        Self::all()
            .into_iter()
            .find(|voice| voice.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn all() -> [Voice; 8] {
        [
            Voice::Rachel,
            Voice::Sarah,
            Voice::George,
            Voice::Callum,
            Voice::Alice,
            Voice::Brian,
            Voice::Daniel,
            Voice::Lily,
        ]
    }
}

/// Map a profile's voice id onto the API's id: premade names are translated,
/// everything else is used verbatim.
pub fn resolve_voice_id(voice_id: &str) -> &str {
    match Voice::from_name(voice_id) {
        Some(voice) => voice.id(),
        None => voice_id.trim(),
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Voice> for String {
    fn from(voice: Voice) -> String {
        voice.id().to_string()
    }
}
