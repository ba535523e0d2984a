//! The growing dialogue track.
//!
//! Clips are appended in order with a fixed silence gap between neighbours;
//! nothing precedes the first clip or follows the last. When a clip's format
//! differs from the buffer, both are brought to the higher sample rate and
//! channel count before joining.

use std::time::Duration;

use dialogue_voice_domain::{AudioClip, Result, SpeakerLabel, audio_clip::duration_of};
use tracing::debug;

use super::resample;

/// Where one utterance sits inside the combined track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipSpan {
    pub line: usize,
    pub speaker: SpeakerLabel,
    pub start: Duration,
    pub end: Duration,
}

impl ClipSpan {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[derive(Debug, Clone)]
pub struct CombinedAudio {
    track: AudioClip,
    gap: Duration,
    // Spans stored as frame offsets so resampling can rescale them.
    spans: Vec<(usize, SpeakerLabel, usize, usize)>,
}

impl CombinedAudio {
    /// Start a track with its first clip.
    pub fn from_clip(first: AudioClip, gap: Duration, line: usize, speaker: SpeakerLabel) -> Self {
        let frames = first.frames();
        Self {
            track: first,
            gap,
            spans: vec![(line, speaker, 0, frames)],
        }
    }

    /// Append `gap` of silence and then `clip`.
    pub fn append(&mut self, clip: AudioClip, line: usize, speaker: SpeakerLabel) -> Result<()> {
        let rate = self.track.sample_rate.max(clip.sample_rate);
        let channels = self.track.channels.max(clip.channels);

        if self.track.sample_rate != rate || self.track.channels != channels {
            debug!(
                from_rate = self.track.sample_rate,
                from_channels = self.track.channels,
                rate,
                channels,
                "upconverting combined track"
            );
            let old_rate = self.track.sample_rate;
            let track = std::mem::replace(&mut self.track, AudioClip::new(Vec::new(), rate, channels));
            self.track = resample::conform(track, rate, channels)?;
            self.rescale_spans(old_rate, rate);
        }
        let clip = if clip.sample_rate != rate || clip.channels != channels {
            debug!(line, clip_rate = clip.sample_rate, rate, "conforming clip");
            resample::conform(clip, rate, channels)?
        } else {
            clip
        };

        let silence = AudioClip::silence(self.gap, rate, channels);
        self.track.samples.extend_from_slice(&silence.samples);
        let start = self.track.frames();
        self.track.samples.extend_from_slice(&clip.samples);
        self.spans.push((line, speaker, start, self.track.frames()));
        Ok(())
    }

    fn rescale_spans(&mut self, from: u32, to: u32) {
        let scale = |frames: usize| {
            ((frames as u64 * to as u64 + from as u64 / 2) / from as u64) as usize
        };
        let total = self.track.frames();
        for (_, _, start, end) in &mut self.spans {
            *start = scale(*start).min(total);
            *end = scale(*end).min(total);
        }
    }

    pub fn clip_count(&self) -> usize {
        self.spans.len()
    }

    pub fn duration(&self) -> Duration {
        self.track.duration()
    }

    pub fn sample_rate(&self) -> u32 {
        self.track.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.track.channels
    }

    pub fn spans(&self) -> Vec<ClipSpan> {
        let rate = self.track.sample_rate;
        self.spans
            .iter()
            .map(|(line, speaker, start, end)| ClipSpan {
                line: *line,
                speaker: speaker.clone(),
                start: duration_of(*start, rate),
                end: duration_of(*end, rate),
            })
            .collect()
    }

    pub fn as_clip(&self) -> &AudioClip {
        &self.track
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAP: Duration = Duration::from_millis(500);

    fn tone(ms: u64, rate: u32, channels: u16) -> AudioClip {
        let frames = (rate as u64 * ms / 1000) as usize;
        AudioClip::new(vec![1_000; frames * channels as usize], rate, channels)
    }

    #[test]
    fn single_clip_has_no_gap() {
        let track = CombinedAudio::from_clip(tone(300, 16_000, 1), GAP, 1, "PersonA".into());
        assert_eq!(track.duration(), Duration::from_millis(300));
        assert_eq!(track.clip_count(), 1);
    }

    #[test]
    fn gaps_only_between_clips() {
        let mut track = CombinedAudio::from_clip(tone(1200, 16_000, 1), GAP, 1, "PersonA".into());
        track.append(tone(900, 16_000, 1), 2, "PersonB".into()).unwrap();
        track.append(tone(100, 16_000, 1), 3, "PersonA".into()).unwrap();
        assert_eq!(track.duration(), Duration::from_millis(1200 + 500 + 900 + 500 + 100));

        let spans = track.spans();
        assert_eq!(spans[1].start, Duration::from_millis(1700));
        assert_eq!(spans[1].duration(), Duration::from_millis(900));
        assert_eq!(spans[2].line, 3);

        // Gap is silent.
        let gap_start = 16_000 * 1200 / 1000;
        assert!(track.as_clip().samples[gap_start..gap_start + 8_000].iter().all(|&s| s == 0));
    }

    #[test]
    fn mismatched_clips_use_the_higher_spec() {
        let mut track = CombinedAudio::from_clip(tone(500, 16_000, 1), GAP, 1, "PersonA".into());
        track.append(tone(500, 24_000, 2), 2, "PersonB".into()).unwrap();
        assert_eq!(track.sample_rate(), 24_000);
        assert_eq!(track.channels(), 2);
        assert_eq!(track.duration(), Duration::from_millis(1500));
        assert_eq!(track.spans()[0].end, Duration::from_millis(500));
        assert_eq!(track.spans()[1].start, Duration::from_millis(1000));
    }

    #[test]
    fn stereo_track_accepts_a_three_channel_clip() {
        let mut track = CombinedAudio::from_clip(tone(100, 16_000, 2), GAP, 1, "PersonA".into());
        track.append(tone(100, 16_000, 3), 2, "PersonB".into()).unwrap();
        assert_eq!(track.channels(), 3);
        assert_eq!(track.duration(), Duration::from_millis(700));
        assert_eq!(track.as_clip().samples.len(), 16 * 700 * 3);
    }
}
