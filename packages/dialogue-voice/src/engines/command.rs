//! Shared runner for command-line synthesizers.
//!
//! The engine writes a WAV to a temporary path which is read back into memory
//! and removed when the handle drops.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("`{program}` not found on PATH; install it or pass its location")]
    NotFound { program: String },
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    #[error("`{program}` produced no audio")]
    NoOutput { program: String },
    #[error("scratch file for `{program}`: {source}")]
    Scratch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// One synthesizer invocation.
#[derive(Debug)]
pub struct SynthCommand {
    program: PathBuf,
    args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
    stdin: Option<String>,
}

impl SynthCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set a variable for the child only.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    #[cfg(test)]
    pub(crate) fn arg_list(&self) -> &[OsString] {
        &self.args
    }

    fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Run with `out_path` appended via `out_flag` and return the bytes
    /// written there.
    pub async fn render_to_wav(self, out_flag: &str) -> Result<Vec<u8>, CommandError> {
        let program = self.program_name();
        let out = tempfile::Builder::new()
            .prefix("dialogue-voice-")
            .suffix(".wav")
            .tempfile()
            .map_err(|source| CommandError::Scratch {
                program: program.clone(),
                source,
            })?;
        let out_path = out.path().to_path_buf();

        self.arg(out_flag).arg(out_path.as_os_str()).run().await?;
        read_output(&program, &out_path).await
    }

    /// Spawn, feed stdin if any, and wait for a zero exit.
    pub async fn run(self) -> Result<(), CommandError> {
        let program = self.program_name();
        debug!(program = %program, args = ?self.args, "spawning synthesizer");

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => CommandError::NotFound {
                program: program.clone(),
            },
            _ => CommandError::Spawn {
                program: program.clone(),
                source,
            },
        })?;

        if let (Some(input), Some(mut pipe)) = (self.stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes())
                .await
                .map_err(|source| CommandError::Spawn {
                    program: program.clone(),
                    source,
                })?;
            // Close so the child sees EOF.
            drop(pipe);
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: program.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(CommandError::Failed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

async fn read_output(program: &str, path: &Path) -> Result<Vec<u8>, CommandError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| CommandError::Scratch {
            program: program.to_string(),
            source,
        })?;
    if data.is_empty() {
        return Err(CommandError::NoOutput {
            program: program.to_string(),
        });
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_is_reported_by_name() {
        let err = SynthCommand::new("definitely-not-a-tts-binary")
            .arg("--help")
            .run()
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("definitely-not-a-tts-binary"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_keeps_stderr() {
        let err = SynthCommand::new("sh")
            .args(["-c", "echo broken voice >&2; exit 3"])
            .run()
            .await
            .unwrap_err();
        match err {
            CommandError::Failed { stderr, status, .. } => {
                assert_eq!(stderr, "broken voice");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn output_file_and_stdin_are_wired() {
        // `sh -c script name out_flag path`: $2 is the output path.
        let data = SynthCommand::new("sh")
            .args(["-c", "cat > \"$2\"", "sh"])
            .stdin("RIFF-ish")
            .render_to_wav("-w")
            .await
            .unwrap();
        assert_eq!(data, b"RIFF-ish");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn empty_output_is_an_error() {
        let err = SynthCommand::new("sh")
            .args(["-c", "true", "sh"])
            .render_to_wav("-o")
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::NoOutput { .. }));
    }
}
