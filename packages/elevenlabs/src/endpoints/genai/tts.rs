//! Convert text into speech using a voice of your choice.
//!
//! `POST /v1/text-to-speech/:voice_id`
//!
//! The response body is the encoded audio; with a `pcm_*` output format it is
//! headerless little-endian 16-bit mono PCM.

use crate::endpoints::*;
use strum::{Display, EnumString};

/// Output format of the generated audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum OutputFormat {
    #[strum(serialize = "pcm_16000")]
    Pcm16000Hz,
    #[strum(serialize = "pcm_22050")]
    Pcm22050Hz,
    #[default]
    #[strum(serialize = "pcm_24000")]
    Pcm24000Hz,
    #[strum(serialize = "pcm_44100")]
    Pcm44100Hz,
}

impl OutputFormat {
    pub fn sample_rate(self) -> u32 {
        match self {
            Self::Pcm16000Hz => 16_000,
            Self::Pcm22050Hz => 22_050,
            Self::Pcm24000Hz => 24_000,
            Self::Pcm44100Hz => 44_100,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct VoiceSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_boost: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
}

impl VoiceSettings {
    pub fn is_empty(&self) -> bool {
        self.stability.is_none() && self.similarity_boost.is_none() && self.speed.is_none()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TextToSpeechBody {
    pub text: String,
    pub model_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<VoiceSettings>,
}

impl TextToSpeechBody {
    pub fn new(text: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_id: model_id.into(),
            language_code: None,
            voice_settings: None,
        }
    }

    pub fn with_language_code(mut self, code: impl Into<String>) -> Self {
        self.language_code = Some(code.into());
        self
    }

    pub fn with_voice_settings(mut self, settings: VoiceSettings) -> Self {
        if !settings.is_empty() {
            self.voice_settings = Some(settings);
        }
        self
    }
}

#[derive(Clone, Debug)]
pub struct TextToSpeech {
    voice_id: String,
    body: TextToSpeechBody,
    output_format: OutputFormat,
}

impl TextToSpeech {
    pub fn new(
        voice_id: impl Into<String>,
        body: TextToSpeechBody,
        output_format: OutputFormat,
    ) -> Self {
        Self {
            voice_id: voice_id.into(),
            body,
            output_format,
        }
    }
}

impl ElevenLabsEndpoint for TextToSpeech {
    const PATH: &'static str = "/v1/text-to-speech/:voice_id";

    const METHOD: Method = Method::POST;

    type ResponseBody = Bytes;

    fn query_params(&self) -> Option<QueryValues> {
        Some(vec![("output_format", self.output_format.to_string())])
    }

    fn path_params(&self) -> Vec<(&'static str, &str)> {
        vec![(":voice_id", self.voice_id.as_str())]
    }

    fn request_body(&self) -> Result<RequestBody> {
        Ok(RequestBody::Json(serde_json::to_value(&self.body)?))
    }

    fn response_body(self, body: Bytes) -> Result<Self::ResponseBody> {
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn url_contains_voice_and_output_format() {
        let endpoint = TextToSpeech::new(
            "JBFqnCBsd6RMkjVDRZzb",
            TextToSpeechBody::new("Hi there.", "eleven_multilingual_v2"),
            OutputFormat::Pcm24000Hz,
        );
        let base = Url::parse("https://api.elevenlabs.io").unwrap();
        let url = endpoint.url(&base).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.elevenlabs.io/v1/text-to-speech/JBFqnCBsd6RMkjVDRZzb?output_format=pcm_24000"
        );
    }

    #[test]
    fn body_omits_unset_settings() {
        let body = TextToSpeechBody::new("Hello back.", "eleven_multilingual_v2")
            .with_voice_settings(VoiceSettings::default());
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "Hello back.", "model_id": "eleven_multilingual_v2"})
        );
    }

    #[test]
    fn body_serializes_voice_settings() {
        let body = TextToSpeechBody::new("Hello.", "eleven_turbo_v2_5")
            .with_language_code("en")
            .with_voice_settings(VoiceSettings {
                stability: Some(0.5),
                similarity_boost: Some(0.75),
                speed: None,
            });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["language_code"], "en");
        assert_eq!(json["voice_settings"]["stability"], 0.5);
        assert_eq!(json["voice_settings"]["similarity_boost"], 0.75);
        assert!(json["voice_settings"].get("speed").is_none());
    }

    #[test]
    fn output_format_round_trips_through_strum() {
        assert_eq!(OutputFormat::Pcm22050Hz.to_string(), "pcm_22050");
        assert_eq!(
            OutputFormat::from_str("pcm_44100").unwrap(),
            OutputFormat::Pcm44100Hz
        );
        assert_eq!(OutputFormat::default().sample_rate(), 24_000);
    }
}
