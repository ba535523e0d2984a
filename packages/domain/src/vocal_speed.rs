//! Speaking rate multiplier (1.0 = normal).
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VocalSpeedMod(pub f32);

impl VocalSpeedMod {
    pub const NORMAL: Self = Self(1.0);

    /// Multiplier clamped to the 0.25..=4.0 range every backend accepts.
    pub fn factor(self) -> f32 {
        self.0.clamp(0.25, 4.0)
    }
}

impl Default for VocalSpeedMod {
    fn default() -> Self {
        Self::NORMAL
    }
}
