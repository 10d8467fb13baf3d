//! Error types for emulator automation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::command::EmulatorCommand;

/// Errors raised while driving the storage emulator executable.
#[derive(Debug, Error)]
pub enum AutomationError {
    /// None of the candidate executable paths exist.
    #[error("unable to locate the storage emulator at any of the expected paths: {}", join_paths(.probed))]
    ExecutableNotFound { probed: Vec<PathBuf> },

    /// The operating system refused to run the executable, or waiting on it failed.
    #[error("failed to run `{} {command}`: {source}", .program.display())]
    Launch {
        program: PathBuf,
        command: EmulatorCommand,
        #[source]
        source: io::Error,
    },

    /// The `status` output carried neither running marker.
    #[error("unable to determine if the storage emulator is running from output: {output:?}")]
    UnrecognizedStatus { output: String },

    /// A blocking emulator call on the tokio blocking pool panicked or was cancelled.
    #[error("emulator task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AutomationError {
    /// Returns the probed candidate paths for a not-found error.
    pub fn probed_paths(&self) -> Option<&[PathBuf]> {
        match self {
            AutomationError::ExecutableNotFound { probed } => Some(probed),
            _ => None,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for automation operations.
pub type AutomationResult<T> = Result<T, AutomationError>;
