//! Coqui TTS through its `tts` command-line entry point.
//!
//! The default model is the multi-speaker VCTK VITS checkpoint; a voice id is
//! a VCTK speaker index such as `p273`.

use std::ffi::OsString;
use std::path::PathBuf;

use dialogue_voice_domain::{Language, SynthesisBackend, SynthesizedAudio, VoiceProfile};
use tracing::info;

use super::command::{CommandError, SynthCommand};

pub const DEFAULT_MODEL: &str = "tts_models/en/vctk/vits";

/// Newer torch versions refuse to unpickle the VCTK checkpoint unless told to
/// keep the weights-only loader on.
const WEIGHTS_ONLY_ENV: &str = "TORCH_FORCE_WEIGHTS_ONLY_LOAD";

#[derive(Debug, Clone)]
pub struct CoquiConfig {
    pub program: PathBuf,
    pub model: String,
    pub weights_only: bool,
}

impl Default for CoquiConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("tts"),
            model: DEFAULT_MODEL.to_string(),
            weights_only: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoquiBackend {
    config: CoquiConfig,
}

impl CoquiBackend {
    pub fn new(config: CoquiConfig) -> Self {
        Self { config }
    }

    pub fn default_voices() -> [(&'static str, VoiceProfile); 2] {
        [
            (
                "PersonA",
                VoiceProfile::new("p273")
                    .with_language(Language::english_uk())
                    .with_description("VCTK p273, male, British"),
            ),
            (
                "PersonB",
                VoiceProfile::new("p262")
                    .with_language(Language::english_us())
                    .with_description("VCTK p262, female, American"),
            ),
        ]
    }

    fn command(&self, text: &str, voice: &VoiceProfile) -> SynthCommand {
        let command = SynthCommand::new(&self.config.program)
            // Joined so text starting with '-' is not parsed as a flag.
            .arg(flag_value("--text", text))
            .arg("--model_name")
            .arg(&self.config.model)
            .arg("--speaker_idx")
            .arg(voice.voice_id.id())
            .args(["--progress_bar", "false"]);
        if self.config.weights_only {
            command.env(WEIGHTS_ONLY_ENV, "1")
        } else {
            command
        }
    }
}

fn flag_value(flag: &str, value: &str) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push("=");
    arg.push(value);
    arg
}

impl SynthesisBackend for CoquiBackend {
    type Error = CommandError;

    fn name(&self) -> &str {
        "coqui"
    }

    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceProfile,
    ) -> Result<SynthesizedAudio, CommandError> {
        let data = self.command(text, voice).render_to_wav("--out_path").await?;
        info!(size_bytes = data.len(), speaker_idx = %voice.voice_id, "Synthesized audio");
        Ok(SynthesizedAudio::wav(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_vctk_speakers() {
        let [(a, person_a), (b, person_b)] = CoquiBackend::default_voices();
        assert_eq!((a, person_a.voice_id.id()), ("PersonA", "p273"));
        assert_eq!((b, person_b.voice_id.id()), ("PersonB", "p262"));
        assert_eq!(CoquiConfig::default().model, DEFAULT_MODEL);
    }

    #[test]
    fn text_is_passed_as_a_single_flag_argument() {
        let backend = CoquiBackend::default();
        let command = backend.command("-Yes.", &VoiceProfile::new("p273"));
        let args = command.arg_list();
        assert!(args.contains(&OsString::from("--text=-Yes.")));
        assert!(!args.contains(&OsString::from("--text")));
        assert!(!args.contains(&OsString::from("-Yes.")));
    }

    #[tokio::test]
    async fn missing_binary_surfaces_as_not_found() {
        let backend = CoquiBackend::new(CoquiConfig {
            program: PathBuf::from("no-such-coqui-tts"),
            ..CoquiConfig::default()
        });
        let err = backend
            .synthesize("Hi there.", &VoiceProfile::new("p273"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
