//! Stateless emulator commands.

use std::sync::Arc;

use tracing::{debug, info};

use crate::command::EmulatorCommand;
use crate::config::Config;
use crate::error::AutomationResult;
use crate::locator::ExecutableLocator;
use crate::process::{ProcessRunner, SystemProcessRunner};
use crate::status::{parse_is_running, EmulatorStatus};

/// Issues commands to the emulator executable without tracking any state.
///
/// The executable is located afresh for every command.
#[derive(Clone)]
pub struct EmulatorClient {
    locator: ExecutableLocator,
    runner: Arc<dyn ProcessRunner>,
}

impl EmulatorClient {
    /// Creates a client that runs the installed emulator.
    pub fn new(config: &Config) -> Self {
        Self::with_runner(
            ExecutableLocator::from_config(config),
            Arc::new(SystemProcessRunner::new()),
        )
    }

    /// Creates a client with a custom locator and process runner.
    pub fn with_runner(locator: ExecutableLocator, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { locator, runner }
    }

    /// Returns the locator used to find the executable.
    pub fn locator(&self) -> &ExecutableLocator {
        &self.locator
    }

    /// Runs a command and returns its standard output.
    pub fn run(&self, command: EmulatorCommand) -> AutomationResult<String> {
        let program = self.locator.locate()?;
        self.runner.run(&program, command)
    }

    /// Returns the full status report.
    pub fn status(&self) -> AutomationResult<EmulatorStatus> {
        EmulatorStatus::parse(&self.run(EmulatorCommand::Status)?)
    }

    /// Queries whether the emulator is running.
    pub fn is_running(&self) -> AutomationResult<bool> {
        parse_is_running(&self.run(EmulatorCommand::Status)?)
    }

    /// Performs one-time initialization unless the emulator is already running.
    pub fn init(&self) -> AutomationResult<()> {
        if self.is_running()? {
            debug!("Storage emulator is running, skipping init");
            return Ok(());
        }
        self.run(EmulatorCommand::Init)?;
        Ok(())
    }

    /// Starts the emulator unless it is already running.
    ///
    /// Returns `true` when this call started it.
    pub fn start(&self) -> AutomationResult<bool> {
        if self.is_running()? {
            debug!("Storage emulator is already running");
            return Ok(false);
        }
        self.run(EmulatorCommand::Start)?;
        info!("Started storage emulator");
        Ok(true)
    }

    /// Stops the emulator regardless of who started it.
    pub fn stop(&self) -> AutomationResult<()> {
        self.run(EmulatorCommand::Stop)?;
        info!("Stopped storage emulator");
        Ok(())
    }

    /// Deletes all blob, table and queue data.
    pub fn clear_all(&self) -> AutomationResult<()> {
        self.clear(EmulatorCommand::ClearAll)
    }

    /// Deletes blob data only.
    pub fn clear_blobs(&self) -> AutomationResult<()> {
        self.clear(EmulatorCommand::ClearBlobs)
    }

    /// Deletes table data only.
    pub fn clear_tables(&self) -> AutomationResult<()> {
        self.clear(EmulatorCommand::ClearTables)
    }

    /// Deletes queue data only.
    pub fn clear_queues(&self) -> AutomationResult<()> {
        self.clear(EmulatorCommand::ClearQueues)
    }

    fn clear(&self, command: EmulatorCommand) -> AutomationResult<()> {
        self.run(command)?;
        info!(%command, "Cleared storage emulator data");
        Ok(())
    }
}

impl Default for EmulatorClient {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl std::fmt::Debug for EmulatorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmulatorClient")
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}
