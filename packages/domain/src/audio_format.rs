//! Encodings a synthesis backend may hand back.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioFormat {
    /// Self-describing RIFF/WAVE container.
    Wav,
    /// 16-bit PCM at 16 kHz, mono.
    Pcm16Khz,
    /// 16-bit PCM at 22.05 kHz, mono.
    Pcm22Khz,
    /// 16-bit PCM at 24 kHz, mono.
    Pcm24Khz,
    /// 16-bit PCM at 44.1 kHz, mono.
    Pcm44Khz,
    /// 16-bit PCM at 48 kHz, mono.
    Pcm48Khz,
}

impl AudioFormat {
    /// Sample rate of headerless PCM formats; `None` for containers, whose
    /// header carries it.
    pub fn pcm_sample_rate(self) -> Option<u32> {
        match self {
            Self::Wav => None,
            Self::Pcm16Khz => Some(16_000),
            Self::Pcm22Khz => Some(22_050),
            Self::Pcm24Khz => Some(24_000),
            Self::Pcm44Khz => Some(44_100),
            Self::Pcm48Khz => Some(48_000),
        }
    }
}

/// Raw backend output for one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub data: Vec<u8>,
    pub format: AudioFormat,
}

impl SynthesizedAudio {
    pub fn wav(data: Vec<u8>) -> Self {
        Self {
            data,
            format: AudioFormat::Wav,
        }
    }

    pub fn pcm(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
