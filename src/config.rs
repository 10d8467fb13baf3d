//! Automation configuration.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::command::EmulatorCommand;

/// Environment variable holding the 32-bit Program Files directory on Windows.
pub const PROGRAM_FILES_X86_VAR: &str = "ProgramFiles(x86)";

/// Program Files directory used when the environment does not name one.
pub const DEFAULT_PROGRAM_FILES_X86: &str = r"C:\Program Files (x86)";

/// Emulator install directory, relative to the Program Files directory.
pub const EMULATOR_INSTALL_DIR: [&str; 3] = ["Microsoft SDKs", "Azure", "Storage Emulator"];

/// Executable names, in probe order. Older SDKs ship `WAStorageEmulator.exe`.
pub const EMULATOR_EXECUTABLES: [&str; 2] = ["AzureStorageEmulator.exe", "WAStorageEmulator.exe"];

/// Command-line arguments for `emulator-ctl`.
#[derive(Parser, Debug, Clone)]
#[command(name = "emulator-ctl")]
#[command(about = "Start, stop, query and clear the Azure Storage Emulator")]
#[command(version)]
pub struct Args {
    /// Path to the emulator executable (skips the installation probe).
    #[arg(long, short = 'e')]
    pub executable: Option<PathBuf>,

    /// Program Files (x86) directory to probe for the emulator.
    #[arg(long)]
    pub program_files: Option<PathBuf>,

    /// Print status as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging.
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Enable silent mode (errors only).
    #[arg(long, short = 's')]
    pub silent: bool,

    #[command(subcommand)]
    pub action: Action,
}

impl Args {
    /// Log level selected by `--debug` / `--silent`.
    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::DEBUG
        } else if self.silent {
            LevelFilter::ERROR
        } else {
            LevelFilter::INFO
        }
    }

    /// Log filter from `rust_log` (the `RUST_LOG` value) when it parses,
    /// otherwise from the command-line level.
    pub fn log_filter(&self, rust_log: Option<&str>) -> EnvFilter {
        rust_log
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::default().add_directive(self.log_level().into()))
    }
}

/// Emulator action requested on the command line.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// One-time emulator initialization (skipped while it is running).
    Init,
    /// Start the emulator if it is not already running.
    Start,
    /// Stop the emulator.
    Stop,
    /// Report whether the emulator is running.
    Status,
    /// Delete persisted emulator data.
    Clear {
        #[arg(value_enum, default_value_t = ClearTarget::All)]
        target: ClearTarget,
    },
}

/// Which persisted data a `clear` wipes.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearTarget {
    All,
    Blob,
    Table,
    Queue,
}

impl From<ClearTarget> for EmulatorCommand {
    fn from(target: ClearTarget) -> Self {
        match target {
            ClearTarget::All => EmulatorCommand::ClearAll,
            ClearTarget::Blob => EmulatorCommand::ClearBlobs,
            ClearTarget::Table => EmulatorCommand::ClearTables,
            ClearTarget::Queue => EmulatorCommand::ClearQueues,
        }
    }
}

/// Where to find the emulator executable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Explicit executable path; when set, nothing else is probed.
    pub executable: Option<PathBuf>,
    /// Program Files (x86) directory; defaults to the environment's.
    pub program_files: Option<PathBuf>,
}

impl Config {
    /// Configuration pointing at a specific executable.
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: Some(executable.into()),
            program_files: None,
        }
    }

    /// Configuration probing a specific Program Files directory.
    pub fn with_program_files(program_files: impl Into<PathBuf>) -> Self {
        Self {
            executable: None,
            program_files: Some(program_files.into()),
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self {
            executable: args.executable.clone(),
            program_files: args.program_files.clone(),
        }
    }
}
