//! Synthesis-and-concatenation pipeline.
//!
//! Utterances are handled strictly in source order: resolve the voice, call
//! the backend, stage the clip in a scratch directory, decode it and append
//! it to the combined track. The first failing utterance aborts the run and
//! nothing is exported. Scratch files live in a temporary directory that is
//! removed on every exit path. File work runs on tokio's blocking pool.

use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local};
use dialogue_voice_domain::{AudioClip, DialogueError, Result, SynthesisBackend, Utterance};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::audio::{ClipSpan, CombinedAudio, read_wav, wav, write_synthesized};
use crate::conversation::Conversation;
use crate::voices::VoiceMap;

/// Silence inserted between consecutive clips.
pub const DEFAULT_GAP: Duration = Duration::from_millis(500);
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_OUTPUT_PREFIX: &str = "conversation";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Where the combined WAV goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Exactly this path.
    File(PathBuf),
    /// `<directory>/<prefix>_<YYYYmmdd_HHMMSS>.wav`, stamped at export time.
    Timestamped { directory: PathBuf, prefix: String },
}

impl OutputTarget {
    pub fn timestamped_in(directory: impl Into<PathBuf>) -> Self {
        Self::Timestamped {
            directory: directory.into(),
            prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }

    /// Concrete path for an export happening at `now`.
    pub fn resolve(&self, now: DateTime<Local>) -> PathBuf {
        match self {
            Self::File(path) => path.clone(),
            Self::Timestamped { directory, prefix } => {
                directory.join(format!("{prefix}_{}.wav", now.format(TIMESTAMP_FORMAT)))
            }
        }
    }
}

impl Default for OutputTarget {
    fn default() -> Self {
        Self::timestamped_in(DEFAULT_OUTPUT_DIR)
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub gap: Duration,
    pub output: OutputTarget,
    /// Parent for the per-run scratch directory; the system temp dir if unset.
    pub scratch_root: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            output: OutputTarget::default(),
            scratch_root: None,
        }
    }
}

/// Summary of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDialogue {
    pub path: PathBuf,
    pub clip_count: usize,
    pub duration: Duration,
    pub sample_rate: u32,
    pub channels: u16,
    pub spans: Vec<ClipSpan>,
}

pub struct DialoguePipeline<B> {
    backend: B,
    voices: VoiceMap,
    config: PipelineConfig,
}

impl<B: SynthesisBackend> DialoguePipeline<B> {
    /// Fails if `voices` cannot resolve any speaker.
    pub fn new(backend: B, voices: VoiceMap, config: PipelineConfig) -> Result<Self> {
        voices.validate()?;
        Ok(Self {
            backend,
            voices,
            config,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn voices(&self) -> &VoiceMap {
        &self.voices
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Render a conversation file.
    pub async fn process_file(&self, path: impl AsRef<Path>) -> Result<Option<RenderedDialogue>> {
        let conversation = Conversation::open(path)?;
        self.process(conversation.utterances()?).await
    }

    /// Render `utterances` into one WAV.
    ///
    /// Returns `Ok(None)` without writing anything when no utterance produced
    /// audio.
    pub async fn process<I>(&self, utterances: I) -> Result<Option<RenderedDialogue>>
    where
        I: IntoIterator<Item = Result<Utterance>>,
    {
        let scratch = self.scratch_dir()?;
        debug!(scratch = %scratch.path().display(), backend = self.backend.name(), "starting run");

        let mut combined: Option<CombinedAudio> = None;
        for utterance in utterances {
            let utterance = utterance?;
            let clip = self.render(&utterance, scratch.path()).await?;
            if let Some(track) = combined.as_mut() {
                track.append(clip, utterance.line, utterance.speaker)?;
            } else {
                combined = Some(CombinedAudio::from_clip(
                    clip,
                    self.config.gap,
                    utterance.line,
                    utterance.speaker,
                ));
            }
        }

        let Some(combined) = combined else {
            warn!("No audio was generated");
            return Ok(None);
        };

        let path = self.config.output.resolve(Local::now());
        let combined = {
            let path = path.clone();
            blocking(move || export(&combined, &path).map(|()| combined)).await?
        };
        info!(
            path = %path.display(),
            clips = combined.clip_count(),
            duration_ms = combined.duration().as_millis() as u64,
            "Successfully saved audio to {}",
            path.display()
        );

        Ok(Some(RenderedDialogue {
            path,
            clip_count: combined.clip_count(),
            duration: combined.duration(),
            sample_rate: combined.sample_rate(),
            channels: combined.channels(),
            spans: combined.spans(),
        }))
    }

    async fn render(&self, utterance: &Utterance, scratch: &Path) -> Result<AudioClip> {
        let voice = self.voices.resolve(&utterance.speaker)?;
        if !utterance.has_text() {
            return Err(DialogueError::EmptyText {
                line: utterance.line,
            });
        }

        info!(
            line = utterance.line,
            voice = %voice.voice_id,
            "Generating audio for {}: {}",
            utterance.speaker,
            utterance.text
        );
        let audio = self
            .backend
            .synthesize(&utterance.text, voice)
            .await
            .map_err(|e| DialogueError::Synthesis {
                line: utterance.line,
                speaker: utterance.speaker.to_string(),
                source: Box::new(e),
            })?;
        if audio.is_empty() {
            return Err(DialogueError::AudioProcessing(format!(
                "{} returned no audio for line {}",
                self.backend.name(),
                utterance.line
            )));
        }

        let staged = scratch.join(format!("line_{}.wav", utterance.line));
        let clip = blocking(move || {
            write_synthesized(&staged, &audio)?;
            read_wav(&staged)
        })
        .await?;
        debug!(
            line = utterance.line,
            frames = clip.frames(),
            sample_rate = clip.sample_rate,
            channels = clip.channels,
            "clip decoded"
        );
        Ok(clip)
    }

    fn scratch_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("dialogue-voice-");
        match &self.config.scratch_root {
            Some(root) => {
                std::fs::create_dir_all(root).map_err(|e| DialogueError::io(root, e))?;
                builder.tempdir_in(root).map_err(|e| DialogueError::io(root, e))
            }
            None => builder
                .tempdir()
                .map_err(|e| DialogueError::io(std::env::temp_dir(), e)),
        }
    }
}

/// Run synchronous file and codec work off the async workers.
async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| DialogueError::AudioProcessing(format!("audio task failed: {e}")))?
}

/// Write the track next to `path` and rename it into place, so a failed
/// export never leaves a truncated file behind.
fn export(combined: &CombinedAudio, path: &Path) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| DialogueError::io(dir, e))?;

    let staged = tempfile::Builder::new()
        .prefix(".dialogue-voice-")
        .suffix(".wav.part")
        .tempfile_in(dir)
        .map_err(|e| DialogueError::io(dir, e))?;
    wav::encode_wav(BufWriter::new(staged.as_file()), combined.as_clip())?;
    staged
        .persist(path)
        .map_err(|e| DialogueError::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamped_target_formats_local_time() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            OutputTarget::default().resolve(now),
            PathBuf::from("output/conversation_20240309_070501.wav")
        );
        let custom = OutputTarget::Timestamped {
            directory: "renders".into(),
            prefix: "take".into(),
        };
        assert_eq!(
            custom.resolve(now),
            PathBuf::from("renders/take_20240309_070501.wav")
        );
    }

    #[test]
    fn explicit_file_target_is_used_verbatim() {
        let target = OutputTarget::File("out/final.wav".into());
        assert_eq!(target.resolve(Local::now()), PathBuf::from("out/final.wav"));
    }

    #[tokio::test]
    async fn blocking_work_returns_its_result() {
        let value = blocking(|| Ok(std::thread::current().id())).await.unwrap();
        assert_ne!(value, std::thread::current().id());

        let err = blocking::<(), _>(|| Err(DialogueError::AudioProcessing("bad header".into())))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("bad header"));
    }

    #[tokio::test]
    async fn panicking_blocking_work_becomes_an_error() {
        let err = blocking::<(), _>(|| panic!("decoder blew up")).await.unwrap_err();
        assert!(matches!(err, DialogueError::AudioProcessing(_)), "{err:?}");
    }

    #[test]
    fn default_gap_is_half_a_second() {
        assert_eq!(PipelineConfig::default().gap, Duration::from_millis(500));
    }
}
