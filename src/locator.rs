//! Locating the emulator executable on disk.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{
    Config, DEFAULT_PROGRAM_FILES_X86, EMULATOR_EXECUTABLES, EMULATOR_INSTALL_DIR,
    PROGRAM_FILES_X86_VAR,
};
use crate::error::{AutomationError, AutomationResult};

/// Probes an ordered list of candidate paths for the emulator executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableLocator {
    candidates: Vec<PathBuf>,
}

impl ExecutableLocator {
    /// Creates a locator over an explicit candidate list.
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Creates a locator for the standard install layout under `program_files`.
    pub fn under(program_files: impl AsRef<Path>) -> Self {
        let install_dir = EMULATOR_INSTALL_DIR
            .iter()
            .fold(program_files.as_ref().to_path_buf(), |dir, part| dir.join(part));

        let candidates = EMULATOR_EXECUTABLES
            .iter()
            .map(|name| install_dir.join(name))
            .collect();

        Self { candidates }
    }

    /// Creates a locator for the machine's Program Files (x86) directory.
    pub fn installed() -> Self {
        let program_files = env::var_os(PROGRAM_FILES_X86_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROGRAM_FILES_X86));
        Self::under(program_files)
    }

    /// Creates a locator from configuration.
    pub fn from_config(config: &Config) -> Self {
        match (&config.executable, &config.program_files) {
            (Some(executable), _) => Self::new(vec![executable.clone()]),
            (None, Some(program_files)) => Self::under(program_files),
            (None, None) => Self::installed(),
        }
    }

    /// Returns the candidate paths in probe order.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Returns the first candidate that exists as a file.
    pub fn locate(&self) -> AutomationResult<PathBuf> {
        for candidate in &self.candidates {
            if candidate.is_file() {
                debug!("Found storage emulator at {}", candidate.display());
                return Ok(candidate.clone());
            }
        }

        Err(AutomationError::ExecutableNotFound {
            probed: self.candidates.clone(),
        })
    }
}

impl Default for ExecutableLocator {
    fn default() -> Self {
        Self::installed()
    }
}
