// src/main.rs
// ─────────────────────────────────────────────────────────────────────────────
// dialogue-voice CLI
//
//  ❯ cargo run --release -- data/conversation.txt
//  ❯ cargo run --release -- script.txt --backend espeak --output dialogue.wav
// ─────────────────────────────────────────────────────────────────────────────

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use dialogue_voice::{
    AnyBackend, BackendKind, DialogueError, DialoguePipeline, EngineError, OutputTarget,
    PipelineConfig, RenderedDialogue, SynthesisBackend, VoiceMap,
    engines::{CoquiBackend, CoquiConfig, EspeakBackend, EspeakConfig, GoogleBackend, GoogleConfig},
    setup,
};
use dialogue_voice_elevenlabs::{DEFAULT_MODEL_ID, ElevenLabsBackend, ElevenLabsConfig};

/// CLI switches.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Conversation script, one `Speaker: text` line per utterance.
    #[arg(default_value = "data/conversation.txt")]
    input: PathBuf,

    /// Speech engine.
    #[arg(long, value_enum, default_value_t = BackendKind::Coqui)]
    backend: BackendKind,

    /// Write the WAV to exactly this path.
    #[arg(long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Directory for timestamped `conversation_<YYYYmmdd_HHMMSS>.wav` files.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// JSON voice roster replacing the backend's PersonA/PersonB defaults.
    #[arg(long)]
    voices: Option<PathBuf>,

    /// Match speaker labels regardless of case.
    #[arg(long)]
    case_insensitive: bool,

    /// Silence between lines, in milliseconds.
    #[arg(long, default_value_t = 500)]
    gap_ms: u64,

    /// Parent directory for per-run scratch files.
    #[arg(long)]
    scratch_dir: Option<PathBuf>,

    /// Coqui `tts` executable.
    #[arg(long, default_value = "tts")]
    coqui_bin: PathBuf,

    /// Coqui model name.
    #[arg(long, default_value = dialogue_voice::engines::coqui::DEFAULT_MODEL)]
    coqui_model: String,

    /// Let torch fall back to full unpickling when loading the Coqui model.
    #[arg(long)]
    allow_unsafe_weights: bool,

    /// espeak / espeak-ng executable.
    #[arg(long, default_value = "espeak")]
    espeak_bin: PathBuf,

    /// Google Cloud TTS API key.
    #[arg(long, env = "GOOGLE_TTS_API_KEY", hide_env_values = true)]
    google_api_key: Option<String>,

    /// ElevenLabs API key.
    #[arg(long, env = "ELEVENLABS_API_KEY", hide_env_values = true)]
    elevenlabs_api_key: Option<String>,

    /// ElevenLabs model id.
    #[arg(long, default_value = DEFAULT_MODEL_ID)]
    elevenlabs_model: String,
}

impl Args {
    fn backend(&self) -> Result<AnyBackend> {
        Ok(match self.backend {
            BackendKind::Coqui => CoquiBackend::new(CoquiConfig {
                program: self.coqui_bin.clone(),
                model: self.coqui_model.clone(),
                weights_only: !self.allow_unsafe_weights,
            })
            .into(),
            BackendKind::Espeak => EspeakBackend::new(EspeakConfig {
                program: self.espeak_bin.clone(),
            })
            .into(),
            BackendKind::Google => GoogleBackend::new(GoogleConfig {
                api_key: self.google_api_key.clone(),
                ..GoogleConfig::default()
            })
            .context("Failed to set up Google TTS")?
            .into(),
            BackendKind::Elevenlabs => {
                let config = ElevenLabsConfig {
                    model_id: self.elevenlabs_model.clone(),
                    ..ElevenLabsConfig::default()
                };
                let backend = match &self.elevenlabs_api_key {
                    Some(key) => ElevenLabsBackend::new(key.clone(), config),
                    None => ElevenLabsBackend::from_env(config),
                };
                backend.context("Failed to set up ElevenLabs")?.into()
            }
        })
    }

    fn voices(&self) -> Result<VoiceMap> {
        let voices = match &self.voices {
            Some(path) => VoiceMap::load(path)
                .with_context(|| format!("Failed to load voices from {}", path.display()))?,
            None => self.backend.default_voices(),
        };
        Ok(if self.case_insensitive {
            voices.case_sensitive(false)
        } else {
            voices
        })
    }

    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            gap: Duration::from_millis(self.gap_ms),
            output: match &self.output {
                Some(path) => OutputTarget::File(path.clone()),
                None => OutputTarget::timestamped_in(&self.output_dir),
            },
            scratch_root: self.scratch_dir.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = setup::init_tracing() {
        eprintln!("{e}");
    }
    let args = Args::parse();

    match async_main(args).await {
        Ok(Some(rendered)) => {
            info!(
                clips = rendered.clip_count,
                duration_ms = rendered.duration.as_millis() as u64,
                "Success! Created dialogue audio file: {}",
                rendered.path.display()
            );
            ExitCode::SUCCESS
        }
        Ok(None) => {
            error!("No dialogue processed. Check if input file is empty or formatted correctly.");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e:#}");
            print_hints(&e);
            ExitCode::FAILURE
        }
    }
}

async fn async_main(args: Args) -> Result<Option<RenderedDialogue>> {
    let backend = args.backend()?;
    let voices = args.voices()?;

    info!(backend = backend.name(), input = %args.input.display(), "Processing conversation");
    voices.log_roster(backend.name());

    let pipeline = DialoguePipeline::new(backend, voices, args.pipeline_config())
        .context("Invalid voice configuration")?;
    pipeline
        .process_file(&args.input)
        .await
        .with_context(|| format!("Error processing conversation {}", args.input.display()))
}

fn print_hints(err: &anyhow::Error) {
    let missing_input = matches!(
        err.downcast_ref::<DialogueError>(),
        Some(DialogueError::FileNotFound { .. })
    );
    let missing_binary = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<EngineError>())
        .any(EngineError::is_not_found);

    if !missing_input && !missing_binary {
        return;
    }
    eprintln!("\nTroubleshooting tips:");
    if missing_input {
        eprintln!("- Pass a conversation file, or create data/conversation.txt with lines like");
        eprintln!("  `PersonA: Hi there.`");
    }
    if missing_binary {
        eprintln!("- Install the engine's command-line tool (`pip install TTS` for coqui,");
        eprintln!("  `espeak-ng` from your package manager), or point --coqui-bin/--espeak-bin at it.");
        eprintln!("- The first coqui run downloads the VCTK model and may take a few minutes.");
    }
}
