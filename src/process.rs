//! Running the emulator executable and capturing its output.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};

use tracing::{debug, warn};

use crate::command::EmulatorCommand;
use crate::error::{AutomationError, AutomationResult};

/// Runs a program with a command and returns what it wrote to stdout.
pub trait ProcessRunner: Send + Sync {
    /// Runs `program` with `command`, blocking until the process exits.
    fn run(&self, program: &Path, command: EmulatorCommand) -> AutomationResult<String>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    /// Creates a runner that spawns real processes.
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &Path, command: EmulatorCommand) -> AutomationResult<String> {
        let launch_error = |source| AutomationError::Launch {
            program: program.to_path_buf(),
            command,
            source,
        };

        debug!(program = %program.display(), %command, "Running storage emulator");

        let mut process = Command::new(program);
        process
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        hide_window(&mut process);

        let mut child = process.spawn().map_err(launch_error)?;

        // Drain stdout before waiting so a chatty child cannot block on a full pipe.
        let mut raw = Vec::new();
        if let Some(mut stdout) = child.stdout.take() {
            drain_or_reap(&mut child, &mut stdout, &mut raw).map_err(launch_error)?;
        }
        let status = child.wait().map_err(launch_error)?;

        if !status.success() {
            warn!(%command, exit_code = ?status.code(), "Storage emulator exited with failure");
        }

        let output = String::from_utf8_lossy(&raw).into_owned();
        debug!(%command, bytes = output.len(), "Storage emulator finished");
        Ok(output)
    }
}

/// Reads `output` to the end. On a read error the child is killed and
/// reaped before the error is returned.
fn drain_or_reap(
    child: &mut Child,
    output: &mut impl Read,
    buf: &mut Vec<u8>,
) -> io::Result<()> {
    if let Err(e) = output.read_to_end(buf) {
        if let Err(kill_error) = child.kill() {
            debug!("Failed to kill storage emulator after read error: {}", kill_error);
        }
        if let Err(wait_error) = child.wait() {
            warn!("Failed to reap storage emulator after read error: {}", wait_error);
        }
        return Err(e);
    }
    Ok(())
}

#[cfg(windows)]
fn hide_window(command: &mut Command) {
    use std::os::windows::process::CommandExt;

    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_window(_command: &mut Command) {}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout() {
        let output = SystemProcessRunner::new()
            .run(Path::new("echo"), EmulatorCommand::ClearAll)
            .unwrap();
        assert_eq!(output.trim_end(), "clear all");
    }

    #[test]
    fn test_failed_exit_still_returns_output() {
        let output = SystemProcessRunner::new()
            .run(Path::new("false"), EmulatorCommand::Status)
            .unwrap();
        assert!(output.is_empty());
    }

    struct BrokenPipe;

    impl Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_read_error_reaps_child() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();
        let mut buf = Vec::new();

        let err = drain_or_reap(&mut child, &mut BrokenPipe, &mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        // Already waited on, so the exit status is cached.
        let status = child.try_wait().unwrap().unwrap();
        assert!(!status.success());
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let err = SystemProcessRunner::new()
            .run(
                Path::new("/nonexistent/AzureStorageEmulator.exe"),
                EmulatorCommand::Start,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            AutomationError::Launch {
                command: EmulatorCommand::Start,
                ..
            }
        ));
    }
}
