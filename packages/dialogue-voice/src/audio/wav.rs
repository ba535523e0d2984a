//! WAV I/O helpers built on `hound`.
//!
//! Everything is normalised to interleaved signed 16-bit PCM on the way in,
//! and written back out as 16-bit PCM.

use std::io::{BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

use dialogue_voice_domain::{AudioClip, AudioFormat, DialogueError, Result, SynthesizedAudio};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

fn audio_err(context: &str, e: impl std::fmt::Display) -> DialogueError {
    DialogueError::AudioProcessing(format!("{context}: {e}"))
}

fn spec_for(sample_rate: u32, channels: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Decode any PCM WAV (8/16/24/32-bit int or 32-bit float) to 16-bit.
pub fn decode_wav<R: Read>(reader: R) -> Result<AudioClip> {
    let reader = WavReader::new(reader).map_err(|e| audio_err("invalid wav header", e))?;
    let spec = reader.spec();
    if spec.channels == 0 || spec.sample_rate == 0 {
        return Err(DialogueError::AudioProcessing(format!(
            "unsupported wav parameters: {} Hz, {} channels",
            spec.sample_rate, spec.channels
        )));
    }

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => reader
            .into_samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>(),
        (SampleFormat::Int, bits @ (8 | 24 | 32)) => {
            let shift = bits as i32 - 16;
            reader
                .into_samples::<i32>()
                .map(|s| {
                    s.map(|v| {
                        if shift >= 0 {
                            (v >> shift) as i16
                        } else {
                            (v << -shift) as i16
                        }
                    })
                })
                .collect()
        }
        (SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
            .collect(),
        (format, bits) => {
            return Err(DialogueError::AudioProcessing(format!(
                "unsupported wav sample format: {format:?} {bits}-bit"
            )));
        }
    }
    .map_err(|e| audio_err("corrupt wav data", e))?;

    Ok(AudioClip::new(samples, spec.sample_rate, spec.channels))
}

/// Decode a WAV file on disk.
pub fn read_wav(path: impl AsRef<Path>) -> Result<AudioClip> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| DialogueError::io(path, e))?;
    decode_wav(std::io::BufReader::new(file))
}

/// Write `clip` as 16-bit PCM WAV to any seekable sink.
pub fn encode_wav<W: Write + Seek>(sink: W, clip: &AudioClip) -> Result<()> {
    let mut writer = WavWriter::new(sink, spec_for(clip.sample_rate, clip.channels))
        .map_err(|e| audio_err("failed to start wav", e))?;
    for &sample in &clip.samples {
        writer
            .write_sample(sample)
            .map_err(|e| audio_err("failed to write samples", e))?;
    }
    writer
        .finalize()
        .map_err(|e| audio_err("failed to finalize wav", e))
}

/// Encode `clip` into an in-memory WAV file.
pub fn wav_bytes(clip: &AudioClip) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    encode_wav(&mut cursor, clip)?;
    Ok(cursor.into_inner())
}

/// Persist raw backend output as a standalone WAV file.
///
/// Containers are written as-is; headerless PCM gets a WAV header.
pub fn write_synthesized(path: &Path, audio: &SynthesizedAudio) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| DialogueError::io(path, e))?;
    match audio.format.pcm_sample_rate() {
        None => {
            let mut out = BufWriter::new(file);
            out.write_all(&audio.data)
                .and_then(|_| out.flush())
                .map_err(|e| DialogueError::io(path, e))
        }
        Some(sample_rate) => {
            let clip = pcm_to_clip(&audio.data, audio.format, sample_rate)?;
            encode_wav(BufWriter::new(file), &clip)
        }
    }
}

fn pcm_to_clip(data: &[u8], format: AudioFormat, sample_rate: u32) -> Result<AudioClip> {
    if data.len() % 2 != 0 {
        return Err(DialogueError::AudioProcessing(format!(
            "{format:?} payload has odd length {}",
            data.len()
        )));
    }
    let samples = data
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    Ok(AudioClip::new(samples, sample_rate, 1))
}
