//! Decoded audio for one utterance.
//!
//! Samples are interleaved signed 16-bit PCM. Duration is derived from the
//! frame count rather than stored, so it can never drift from the data.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Interleaved samples (`frames * channels` long).
    pub samples: Vec<i16>,
    /// Frames per second.
    pub sample_rate: u32,
    /// Interleaved channel count, at least 1.
    pub channels: u16,
}

impl AudioClip {
    pub fn new(samples: Vec<i16>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels: channels.max(1),
        }
    }

    /// `duration` of digital silence.
    pub fn silence(duration: Duration, sample_rate: u32, channels: u16) -> Self {
        let frames = frames_for(duration, sample_rate);
        let channels = channels.max(1);
        Self::new(vec![0; frames * channels as usize], sample_rate, channels)
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> Duration {
        duration_of(self.frames(), self.sample_rate)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Frames needed to cover `duration` at `sample_rate`, rounded to nearest.
pub fn frames_for(duration: Duration, sample_rate: u32) -> usize {
    ((duration.as_nanos() * sample_rate as u128 + 500_000_000) / 1_000_000_000) as usize
}

/// Wall-clock length of `frames` at `sample_rate`.
pub fn duration_of(frames: usize, sample_rate: u32) -> Duration {
    if sample_rate == 0 {
        return Duration::ZERO;
    }
    Duration::from_nanos((frames as u128 * 1_000_000_000 / sample_rate as u128) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_has_requested_length() {
        let gap = AudioClip::silence(Duration::from_millis(500), 16_000, 2);
        assert_eq!(gap.frames(), 8_000);
        assert_eq!(gap.samples.len(), 16_000);
        assert_eq!(gap.duration(), Duration::from_millis(500));
        assert!(gap.samples.iter().all(|&s| s == 0));
    }

    #[test]
    fn frames_round_to_nearest() {
        // 500 ms at 22.05 kHz is 11025 frames exactly.
        assert_eq!(frames_for(Duration::from_millis(500), 22_050), 11_025);
        // 1 ms at 22.05 kHz is 22.05 frames.
        assert_eq!(frames_for(Duration::from_millis(1), 22_050), 22);
    }

    #[test]
    fn zero_channels_is_treated_as_mono() {
        let clip = AudioClip::new(vec![1, 2, 3], 8_000, 0);
        assert_eq!(clip.channels, 1);
        assert_eq!(clip.frames(), 3);
    }
}
