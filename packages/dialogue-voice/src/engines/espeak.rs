//! eSpeak / eSpeak NG. Text goes in on stdin so it never needs shell quoting.

use std::path::PathBuf;

use dialogue_voice_domain::{Language, SynthesisBackend, SynthesizedAudio, VoiceProfile};
use tracing::info;

use super::command::{CommandError, SynthCommand};

const BASE_WPM: f32 = 175.0;
const BASE_PITCH: f32 = 50.0;

#[derive(Debug, Clone)]
pub struct EspeakConfig {
    pub program: PathBuf,
}

impl Default for EspeakConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("espeak"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EspeakBackend {
    config: EspeakConfig,
}

impl EspeakBackend {
    pub fn new(config: EspeakConfig) -> Self {
        Self { config }
    }

    pub fn default_voices() -> [(&'static str, VoiceProfile); 2] {
        [
            (
                "PersonA",
                VoiceProfile::new("en-gb+m3")
                    .with_language(Language::english_uk())
                    .with_description("eSpeak en-gb, male variant 3"),
            ),
            (
                "PersonB",
                VoiceProfile::new("en-us+f3")
                    .with_language(Language::english_us())
                    .with_description("eSpeak en-us, female variant 3"),
            ),
        ]
    }

    /// Words per minute for a speed multiplier.
    fn words_per_minute(voice: &VoiceProfile) -> u32 {
        (BASE_WPM * voice.speed_factor()).round().clamp(80.0, 450.0) as u32
    }

    /// espeak pitch (0..=99), two units per semitone around the default 50.
    fn pitch(voice: &VoiceProfile) -> u32 {
        (BASE_PITCH + voice.pitch_semitones() * 2.0)
            .round()
            .clamp(0.0, 99.0) as u32
    }

    fn command(&self, text: &str, voice: &VoiceProfile) -> SynthCommand {
        SynthCommand::new(&self.config.program)
            .arg("-v")
            .arg(voice.voice_id.id())
            .arg("-s")
            .arg(Self::words_per_minute(voice).to_string())
            .arg("-p")
            .arg(Self::pitch(voice).to_string())
            .arg("--stdin")
            .stdin(text)
    }
}

impl SynthesisBackend for EspeakBackend {
    type Error = CommandError;

    fn name(&self) -> &str {
        "espeak"
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceProfile,
    ) -> Result<SynthesizedAudio, CommandError> {
        let data = self.command(text, voice).render_to_wav("-w").await?;
        info!(size_bytes = data.len(), voice = %voice.voice_id, "Synthesized audio");
        Ok(SynthesizedAudio::wav(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialogue_voice_domain::{PitchShift, VocalSpeedMod};

    #[test]
    fn speed_and_pitch_map_onto_flags() {
        let plain = VoiceProfile::new("en-us");
        assert_eq!(EspeakBackend::words_per_minute(&plain), 175);
        assert_eq!(EspeakBackend::pitch(&plain), 50);

        let tuned = plain
            .with_speed(VocalSpeedMod(1.2))
            .with_pitch(PitchShift(-5.0));
        assert_eq!(EspeakBackend::words_per_minute(&tuned), 210);
        assert_eq!(EspeakBackend::pitch(&tuned), 40);
    }

    #[test]
    fn extreme_pitch_is_clamped() {
        let voice = VoiceProfile::new("en-us").with_pitch(PitchShift(40.0));
        assert_eq!(EspeakBackend::pitch(&voice), 90);
    }
}
