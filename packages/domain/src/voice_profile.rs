//! Per-speaker synthesis parameters.
use crate::{
    language::Language, pitch::PitchShift, similarity::Similarity, stability::Stability,
    vocal_speed::VocalSpeedMod, voice_id::VoiceId,
};
use serde::{Deserialize, Serialize};

/// Voice selection and tuning for one speaker.
///
/// Backends read the fields they understand and ignore the rest: a VCTK
/// model only needs `voice_id`, espeak maps `speed` and `pitch` onto its
/// flags, cloud engines also take `language`, `stability` and `similarity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub voice_id: VoiceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<VocalSpeedMod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<PitchShift>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<Stability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<Similarity>,
    /// Human-readable description shown in the startup roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VoiceProfile {
    pub fn new(voice_id: impl Into<VoiceId>) -> Self {
        Self {
            voice_id: voice_id.into(),
            language: None,
            speed: None,
            pitch: None,
            stability: None,
            similarity: None,
            description: None,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_speed(mut self, speed: VocalSpeedMod) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_pitch(mut self, pitch: PitchShift) -> Self {
        self.pitch = Some(pitch);
        self
    }

    pub fn with_stability(mut self, stability: Stability) -> Self {
        self.stability = Some(stability);
        self
    }

    pub fn with_similarity(mut self, similarity: Similarity) -> Self {
        self.similarity = Some(similarity);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Speed multiplier, 1.0 when unset.
    pub fn speed_factor(&self) -> f32 {
        self.speed.unwrap_or_default().factor()
    }

    /// Pitch shift in semitones, 0.0 when unset.
    pub fn pitch_semitones(&self) -> f32 {
        self.pitch.unwrap_or_default().semitones()
    }
}

impl From<VoiceId> for VoiceProfile {
    fn from(voice_id: VoiceId) -> Self {
        Self::new(voice_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_profile() {
        let profile: VoiceProfile = serde_json::from_str(r#"{"voice_id":"p273"}"#).unwrap();
        assert_eq!(profile.voice_id.id(), "p273");
        assert_eq!(profile.speed_factor(), 1.0);
        assert_eq!(profile.pitch_semitones(), 0.0);
        assert!(profile.language.is_none());
    }

    #[test]
    fn deserializes_full_profile_with_clamping() {
        let profile: VoiceProfile = serde_json::from_str(
            r#"{"voice_id":"en-GB-Neural2-B","language":"en-GB","speed":1.2,
                "pitch":-2.0,"stability":1.7,"similarity":0.4}"#,
        )
        .unwrap();
        assert_eq!(profile.language.as_ref().map(|l| l.code()), Some("en-GB"));
        assert_eq!(profile.speed_factor(), 1.2);
        assert_eq!(profile.pitch_semitones(), -2.0);
        assert_eq!(profile.stability.map(|s| s.value()), Some(1.0));
        assert_eq!(profile.similarity.map(|s| s.value()), Some(0.4));
    }
}
