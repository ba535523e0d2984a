//! Voice stability parameter.
//!
//! Only cloud engines with voice settings honour it; local engines ignore it.

use serde::{Deserialize, Serialize};

/// Voice stability setting between 0.0 and 1.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Stability(f32);

impl Stability {
    /// Create a new stability value, clamped to 0.0..=1.0.
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the stability value.
    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for Stability {
    fn default() -> Self {
        Self(0.5)
    }
}

impl From<f32> for Stability {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Stability> for f32 {
    fn from(value: Stability) -> Self {
        value.0
    }
}
