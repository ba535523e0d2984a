//! Process-wide initialisation for the CLI.

use dialogue_voice_domain::{DialogueError, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "dialogue_voice=info";

/// Install the tracing subscriber.
///
/// `RUST_LOG`, when set, is used as the whole filter; otherwise
/// `dialogue_voice=info`. Calling this twice is harmless.
pub fn init_tracing() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::registry()
        .with(env_filter(rust_log.as_deref())?)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
    Ok(())
}

fn env_filter(rust_log: Option<&str>) -> Result<EnvFilter> {
    let directives = rust_log
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE);
    EnvFilter::try_new(directives).map_err(|e| {
        DialogueError::Configuration(format!("Failed to parse tracing directive: {e}"))
    })
}
