//! Lifecycle automation for the Azure Storage Emulator.
//!
//! Drives the emulator's own command-line tool to start, stop, query and
//! clear it. A [`StorageEmulator`] handle stops the emulator when dropped,
//! but only if that handle was the one that started it.
//!
//! # Example
//!
//! ```no_run
//! use storage_emulator_automation::{Config, StorageEmulator};
//!
//! fn main() -> storage_emulator_automation::AutomationResult<()> {
//!     let mut emulator = StorageEmulator::new(&Config::default());
//!     emulator.start()?;
//!     assert!(emulator.is_running()?);
//!     emulator.clear_blobs()?;
//!     Ok(())
//! }
//! ```

pub mod automation;
pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod locator;
pub mod nonblocking;
pub mod process;
pub mod status;

// Re-exports for convenience
pub use automation::{Ownership, StorageEmulator};
pub use client::EmulatorClient;
pub use command::EmulatorCommand;
pub use config::{Action, Args, ClearTarget, Config};
pub use error::{AutomationError, AutomationResult};
pub use locator::ExecutableLocator;
pub use nonblocking::AsyncStorageEmulator;
pub use process::{ProcessRunner, SystemProcessRunner};
pub use status::{parse_is_running, EmulatorStatus};
