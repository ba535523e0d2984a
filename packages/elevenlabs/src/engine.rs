//! [`SynthesisBackend`] implementation over the ElevenLabs REST API.

use crate::client::{ClientConfig, ElevenLabsClient};
use crate::endpoints::genai::tts::{OutputFormat, TextToSpeech, TextToSpeechBody, VoiceSettings};
use crate::error::{Error, Result};
use crate::voice::{Voice, resolve_voice_id};
use dialogue_voice_domain::{
    AudioFormat, Language, SynthesisBackend, SynthesizedAudio, VoiceProfile,
};
use tracing::info;

pub const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

/// Models that accept an explicit `language_code`; the rest reject it.
const LANGUAGE_ENFORCING_MODELS: &[&str] = &["eleven_turbo_v2_5", "eleven_flash_v2_5"];

/// Whether requests for `model_id` may carry a language code.
fn model_accepts_language(model_id: &str) -> bool {
    LANGUAGE_ENFORCING_MODELS.contains(&model_id)
}

/// Backend settings
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub model_id: String,
    pub output_format: OutputFormat,
    pub client: ClientConfig,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            output_format: OutputFormat::default(),
            client: ClientConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ElevenLabsBackend {
    client: ElevenLabsClient,
    model_id: String,
    output_format: OutputFormat,
}

impl ElevenLabsBackend {
    pub fn new(api_key: impl Into<String>, config: ElevenLabsConfig) -> Result<Self> {
        let client = ElevenLabsClient::new_with_config(api_key, config.client)?;
        Ok(Self::with_client(client, config.model_id, config.output_format))
    }

    pub fn from_env(config: ElevenLabsConfig) -> Result<Self> {
        let client = ElevenLabsClient::from_env_with_config(config.client)?;
        Ok(Self::with_client(client, config.model_id, config.output_format))
    }

    pub fn with_client(
        client: ElevenLabsClient,
        model_id: impl Into<String>,
        output_format: OutputFormat,
    ) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            output_format,
        }
    }

    /// PersonA and PersonB defaults: a British male and an American female.
    pub fn default_voices() -> [(&'static str, VoiceProfile); 2] {
        [
            (
                "PersonA",
                VoiceProfile::new(Voice::George.name())
                    .with_language(Language::english_uk())
                    .with_description(Voice::George.description()),
            ),
            (
                "PersonB",
                VoiceProfile::new(Voice::Rachel.name())
                    .with_language(Language::english_us())
                    .with_description(Voice::Rachel.description()),
            ),
        ]
    }

    pub(crate) fn request_for(&self, text: &str, voice: &VoiceProfile) -> TextToSpeech {
        let settings = VoiceSettings {
            stability: voice.stability.map(|s| s.value()),
            similarity_boost: voice.similarity.map(|s| s.value()),
            speed: voice.speed.map(|s| s.factor()),
        };
        let mut body =
            TextToSpeechBody::new(text, self.model_id.as_str()).with_voice_settings(settings);
        if let Some(language) = voice
            .language
            .as_ref()
            .filter(|_| model_accepts_language(&self.model_id))
        {
            body = body.with_language_code(language.primary());
        }
        TextToSpeech::new(
            resolve_voice_id(voice.voice_id.id()),
            body,
            self.output_format,
        )
    }

    fn audio_format(&self) -> AudioFormat {
        match self.output_format {
            OutputFormat::Pcm16000Hz => AudioFormat::Pcm16Khz,
            OutputFormat::Pcm22050Hz => AudioFormat::Pcm22Khz,
            OutputFormat::Pcm24000Hz => AudioFormat::Pcm24Khz,
            OutputFormat::Pcm44100Hz => AudioFormat::Pcm44Khz,
        }
    }
}

impl SynthesisBackend for ElevenLabsBackend {
    type Error = Error;

    fn name(&self) -> &str {
        "elevenlabs"
    }

    async fn synthesize(&self, text: &str, voice: &VoiceProfile) -> Result<SynthesizedAudio> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyText);
        }

        let voice_id = resolve_voice_id(voice.voice_id.id()).to_string();
        let audio = self.client.hit(self.request_for(text, voice)).await?;

        if audio.is_empty() {
            return Err(Error::EmptyAudio { voice_id });
        }
        if audio.len() % 2 != 0 {
            return Err(Error::MisalignedPcm { len: audio.len() });
        }

        info!(size_bytes = audio.len(), voice_id = %voice_id, model = %self.model_id, "Synthesized audio");
        Ok(SynthesizedAudio::pcm(audio.to_vec(), self.audio_format()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::ElevenLabsEndpoint;
    use dialogue_voice_domain::{Stability, VocalSpeedMod};

    fn backend() -> ElevenLabsBackend {
        ElevenLabsBackend::new("test-key", ElevenLabsConfig::default()).unwrap()
    }

    #[test]
    fn request_translates_profile() {
        let profile = VoiceProfile::new("George")
            .with_language(Language::english_uk())
            .with_speed(VocalSpeedMod(1.1))
            .with_stability(Stability::new(0.3));
        let request = backend().request_for("Hi there.", &profile);

        let url = request
            .url(&reqwest::Url::parse("https://api.elevenlabs.io").unwrap())
            .unwrap();
        assert!(url.path().ends_with("/JBFqnCBsd6RMkjVDRZzb"));

        let crate::endpoints::RequestBody::Json(json) = request.request_body().unwrap() else {
            panic!("expected json body");
        };
        assert_eq!(json["text"], "Hi there.");
        assert_eq!(json["model_id"], DEFAULT_MODEL_ID);
        assert!(json.get("language_code").is_none());
        assert!((json["voice_settings"]["stability"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert!(json["voice_settings"].get("similarity_boost").is_none());
    }

    #[test]
    fn default_voices_send_no_language_to_default_model() {
        let (_, george) = &ElevenLabsBackend::default_voices()[0];
        let crate::endpoints::RequestBody::Json(json) =
            backend().request_for("Hi", george).request_body().unwrap()
        else {
            panic!("expected json body");
        };
        assert_eq!(
            json,
            serde_json::json!({"text": "Hi", "model_id": DEFAULT_MODEL_ID})
        );
    }

    #[test]
    fn turbo_and_flash_models_get_the_language_code() {
        assert!(model_accepts_language("eleven_flash_v2_5"));
        assert!(!model_accepts_language(DEFAULT_MODEL_ID));

        let config = ElevenLabsConfig {
            model_id: "eleven_turbo_v2_5".into(),
            ..ElevenLabsConfig::default()
        };
        let backend = ElevenLabsBackend::new("test-key", config).unwrap();
        let profile = VoiceProfile::new("George").with_language(Language::english_uk());
        let crate::endpoints::RequestBody::Json(json) =
            backend.request_for("Hi", &profile).request_body().unwrap()
        else {
            panic!("expected json body");
        };
        assert_eq!(json["language_code"], "en");
    }

    #[test]
    fn defaults_cover_both_people() {
        let voices = ElevenLabsBackend::default_voices();
        assert_eq!(voices[0].0, "PersonA");
        assert_eq!(voices[1].0, "PersonB");
        assert_eq!(resolve_voice_id(voices[1].1.voice_id.id()), Voice::Rachel.id());
    }

    #[tokio::test]
    async fn empty_text_is_rejected_before_any_request() {
        let err = backend()
            .synthesize("   ", &VoiceProfile::new("Rachel"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyText));
    }
}
