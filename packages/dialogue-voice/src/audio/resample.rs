//! Channel and sample-rate conformance for clips that disagree with the
//! combined buffer. Resampling is FFT-based (rubato); callers pass and get
//! interleaved `i16`.

use dialogue_voice_domain::{AudioClip, DialogueError, Result};
use rubato::{FftFixedIn, Resampler};

const CHUNK: usize = 1024;
const SUB_CHUNKS: usize = 2;

/// Convert `clip` to `sample_rate` / `channels`.
pub fn conform(clip: AudioClip, sample_rate: u32, channels: u16) -> Result<AudioClip> {
    let clip = remix(clip, channels)?;
    resample(clip, sample_rate)
}

/// Up-mix mono by duplication, down-mix to mono by averaging. Any other
/// layout change goes through a mono mix copied to every output channel.
pub fn remix(clip: AudioClip, channels: u16) -> Result<AudioClip> {
    let from = clip.channels;
    let channels = channels.max(1);
    if from == channels {
        return Ok(clip);
    }
    let mono: Vec<i16> = if from == 1 {
        clip.samples
    } else {
        clip.samples
            .chunks_exact(from as usize)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| s as i32).sum();
                (sum / from as i32) as i16
            })
            .collect()
    };
    let samples = if channels == 1 {
        mono
    } else {
        mono.iter()
            .flat_map(|&s| std::iter::repeat_n(s, channels as usize))
            .collect()
    };
    Ok(AudioClip::new(samples, clip.sample_rate, channels))
}

/// Resample every channel of `clip` to `sample_rate`.
pub fn resample(clip: AudioClip, sample_rate: u32) -> Result<AudioClip> {
    if clip.sample_rate == sample_rate || clip.is_empty() {
        return Ok(AudioClip::new(clip.samples, sample_rate, clip.channels));
    }
    let channels = clip.channels as usize;
    let frames = clip.frames();

    let planar: Vec<Vec<f32>> = (0..channels)
        .map(|ch| {
            clip.samples
                .iter()
                .skip(ch)
                .step_by(channels)
                .map(|&s| s as f32 / 32768.0)
                .collect()
        })
        .collect();

    let mut resampler = FftFixedIn::<f32>::new(
        clip.sample_rate as usize,
        sample_rate as usize,
        CHUNK,
        SUB_CHUNKS,
        channels,
    )
    .map_err(|e| DialogueError::AudioProcessing(format!("resampler setup: {e}")))?;

    let delay = resampler.output_delay();
    let expected = ((frames as u64 * sample_rate as u64 + clip.sample_rate as u64 / 2)
        / clip.sample_rate as u64) as usize;
    let mut out: Vec<Vec<f32>> = vec![Vec::with_capacity(expected + delay + CHUNK); channels];
    let resample_err = |e: rubato::ResampleError| {
        DialogueError::AudioProcessing(format!("resampling failed: {e}"))
    };

    let mut pos = 0;
    while frames - pos >= resampler.input_frames_next() {
        let needed = resampler.input_frames_next();
        let block: Vec<&[f32]> = planar.iter().map(|c| &c[pos..pos + needed]).collect();
        let produced = resampler.process(block.as_slice(), None).map_err(resample_err)?;
        append(&mut out, produced);
        pos += needed;
    }
    if pos < frames {
        let block: Vec<&[f32]> = planar.iter().map(|c| &c[pos..]).collect();
        let produced = resampler
            .process_partial(Some(block.as_slice()), None)
            .map_err(resample_err)?;
        append(&mut out, produced);
    }
    // Flush the filter tail until the delayed signal is fully out.
    while out[0].len() < expected + delay {
        let produced = resampler
            .process_partial::<&[f32]>(None, None)
            .map_err(resample_err)?;
        if produced[0].is_empty() {
            break;
        }
        append(&mut out, produced);
    }

    for channel in &mut out {
        channel.drain(..delay.min(channel.len()));
        channel.resize(expected, 0.0);
    }

    let mut samples = Vec::with_capacity(expected * channels);
    for frame in 0..expected {
        for channel in &out {
            let v = (channel[frame] * 32768.0).round().clamp(i16::MIN as f32, i16::MAX as f32);
            samples.push(v as i16);
        }
    }
    Ok(AudioClip::new(samples, sample_rate, clip.channels))
}

fn append(out: &mut [Vec<f32>], produced: Vec<Vec<f32>>) {
    for (dst, src) in out.iter_mut().zip(produced) {
        dst.extend(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn mono_is_duplicated_into_stereo() {
        let clip = AudioClip::new(vec![1, -2, 3], 16_000, 1);
        let stereo = remix(clip, 2).unwrap();
        assert_eq!(stereo.samples, vec![1, 1, -2, -2, 3, 3]);
        assert_eq!(stereo.frames(), 3);
    }

    #[test]
    fn stereo_is_averaged_into_mono() {
        let clip = AudioClip::new(vec![10, 20, -4, 4], 16_000, 2);
        assert_eq!(remix(clip, 1).unwrap().samples, vec![15, 0]);
    }

    #[test]
    fn stereo_into_three_channels_goes_through_mono() {
        let clip = AudioClip::new(vec![10, 20, -4, 4], 16_000, 2);
        let wide = remix(clip, 3).unwrap();
        assert_eq!(wide.channels, 3);
        assert_eq!(wide.samples, vec![15, 15, 15, 0, 0, 0]);
    }

    #[test]
    fn resampling_preserves_duration() {
        let tone: Vec<i16> = (0..22_050)
            .map(|i| ((i as f32 * 0.05).sin() * 8_000.0) as i16)
            .collect();
        let clip = AudioClip::new(tone, 22_050, 1);
        let converted = resample(clip, 24_000).unwrap();
        assert_eq!(converted.sample_rate, 24_000);
        assert_eq!(converted.frames(), 24_000);
        assert_eq!(converted.duration(), Duration::from_secs(1));
    }

    #[test]
    fn same_rate_is_untouched() {
        let clip = AudioClip::new(vec![5; 10], 24_000, 2);
        assert_eq!(resample(clip.clone(), 24_000).unwrap(), clip);
    }
}
