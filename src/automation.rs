//! Scoped emulator handle that stops what it started.

use tracing::{info, warn};

use crate::client::EmulatorClient;
use crate::config::Config;
use crate::error::AutomationResult;
use crate::status::EmulatorStatus;

/// Whether a handle is responsible for stopping the emulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    /// `start` has not been called on this handle.
    #[default]
    NotStarted,
    /// A `start` on this handle found the emulator stopped and started it.
    /// Never downgraded afterwards.
    StartedByThisHandle,
    /// Every `start` on this handle so far found the emulator already running.
    AlreadyRunning,
}

/// Drives the storage emulator and stops it on drop if this handle started it.
///
/// ```no_run
/// use storage_emulator_automation::StorageEmulator;
///
/// # fn main() -> storage_emulator_automation::AutomationResult<()> {
/// let mut emulator = StorageEmulator::installed();
/// emulator.start()?;
/// emulator.clear_all()?;
/// // Stopped here, unless it was already running before `start`.
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StorageEmulator {
    client: EmulatorClient,
    ownership: Ownership,
    armed: bool,
}

impl StorageEmulator {
    /// Creates a handle that locates the emulator from `config`.
    pub fn new(config: &Config) -> Self {
        Self::with_client(EmulatorClient::new(config))
    }

    /// Handle for the emulator installed in the standard location.
    pub fn installed() -> Self {
        Self::new(&Config::default())
    }

    /// Creates a handle around an existing client.
    pub fn with_client(client: EmulatorClient) -> Self {
        Self {
            client,
            ownership: Ownership::NotStarted,
            armed: true,
        }
    }

    /// Returns the client used to issue commands.
    pub fn client(&self) -> &EmulatorClient {
        &self.client
    }

    /// Returns whether this handle is responsible for stopping the emulator.
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Returns true when dropping this handle will stop the emulator.
    pub fn started_by_automation(&self) -> bool {
        self.ownership == Ownership::StartedByThisHandle
    }

    /// Performs one-time initialization unless the emulator is running.
    ///
    /// Use before [`start`](Self::start) when the emulator reports that it
    /// needs to be initialized. Existing data is kept.
    pub fn init(&self) -> AutomationResult<()> {
        self.client.init()
    }

    /// Starts the emulator unless it is already running.
    ///
    /// Any call that starts the emulator makes this handle its owner.
    pub fn start(&mut self) -> AutomationResult<()> {
        let started = self.client.start()?;
        if started {
            self.ownership = Ownership::StartedByThisHandle;
        } else if self.ownership == Ownership::NotStarted {
            self.ownership = Ownership::AlreadyRunning;
        }
        Ok(())
    }

    /// Stops the emulator regardless of who started it.
    pub fn stop(&self) -> AutomationResult<()> {
        self.client.stop()
    }

    /// Deletes all blob, table and queue data.
    pub fn clear_all(&self) -> AutomationResult<()> {
        self.client.clear_all()
    }

    /// Deletes blob data only.
    pub fn clear_blobs(&self) -> AutomationResult<()> {
        self.client.clear_blobs()
    }

    /// Deletes table data only.
    pub fn clear_tables(&self) -> AutomationResult<()> {
        self.client.clear_tables()
    }

    /// Deletes queue data only.
    pub fn clear_queues(&self) -> AutomationResult<()> {
        self.client.clear_queues()
    }

    /// Queries whether the emulator is running.
    pub fn is_running(&self) -> AutomationResult<bool> {
        self.client.is_running()
    }

    /// Returns the full status report.
    pub fn status(&self) -> AutomationResult<EmulatorStatus> {
        self.client.status()
    }

    /// Releases the handle now, returning any error from stopping the emulator.
    pub fn shutdown(mut self) -> AutomationResult<()> {
        self.armed = false;
        self.release()
    }

    /// Releases the handle without stopping the emulator.
    pub fn detach(mut self) -> Ownership {
        self.armed = false;
        self.ownership
    }

    fn release(&self) -> AutomationResult<()> {
        if self.started_by_automation() {
            info!("Stopping storage emulator started by this handle");
            self.client.stop()?;
        }
        Ok(())
    }
}

impl Drop for StorageEmulator {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = self.release() {
            warn!("Failed to stop storage emulator on drop: {}", e);
        }
    }
}
