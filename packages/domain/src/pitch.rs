//! Relative pitch shift in semitones (0.0 = the voice's natural pitch).
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchShift(pub f32);

impl PitchShift {
    /// Semitones clamped to the -20..=20 range cloud engines accept.
    pub fn semitones(self) -> f32 {
        self.0.clamp(-20.0, 20.0)
    }
}
