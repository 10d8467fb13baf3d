//! Awaitable wrapper around [`StorageEmulator`].
//!
//! Every emulator call spawns a process and waits for it, so each operation
//! runs on tokio's blocking pool instead of stalling the async executor.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task;

use crate::automation::{Ownership, StorageEmulator};
use crate::config::Config;
use crate::error::AutomationResult;
use crate::status::EmulatorStatus;

/// Async handle to the storage emulator.
///
/// Clones share one underlying [`StorageEmulator`]. When the last clone is
/// dropped inside a tokio runtime, the final `stop` (if this handle started
/// the emulator) is sent to the blocking pool and the drop returns at once;
/// the runtime waits for it on shutdown. Outside a runtime the drop blocks
/// until the emulator has stopped.
#[derive(Debug, Clone)]
pub struct AsyncStorageEmulator {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    emulator: Mutex<StorageEmulator>,
    // Copy of the emulator's ownership, refreshed after every call, so
    // readers never wait behind a running process.
    ownership: Mutex<Ownership>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        let emulator = self.emulator.get_mut();
        let disarmed = StorageEmulator::with_client(emulator.client().clone());
        let emulator = std::mem::replace(emulator, disarmed);

        match Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn_blocking(move || drop(emulator));
            }
            Err(_) => drop(emulator),
        }
    }
}

impl AsyncStorageEmulator {
    /// Creates a handle that locates the emulator from `config`.
    pub fn new(config: &Config) -> Self {
        Self::from_blocking(StorageEmulator::new(config))
    }

    /// Wraps an existing blocking handle, keeping its ownership.
    pub fn from_blocking(emulator: StorageEmulator) -> Self {
        let ownership = emulator.ownership();
        Self {
            shared: Arc::new(Shared {
                emulator: Mutex::new(emulator),
                ownership: Mutex::new(ownership),
            }),
        }
    }

    async fn call<T, F>(&self, f: F) -> AutomationResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut StorageEmulator) -> AutomationResult<T> + Send + 'static,
    {
        let shared = Arc::clone(&self.shared);
        task::spawn_blocking(move || {
            let mut emulator = shared.emulator.lock();
            let result = f(&mut *emulator);
            *shared.ownership.lock() = emulator.ownership();
            result
        })
        .await?
    }

    /// Returns whether this handle is responsible for stopping the emulator.
    ///
    /// Reflects the last completed call; never waits on one in flight.
    pub fn ownership(&self) -> Ownership {
        *self.shared.ownership.lock()
    }

    /// Returns true when dropping the last clone will stop the emulator.
    pub fn started_by_automation(&self) -> bool {
        self.ownership() == Ownership::StartedByThisHandle
    }

    /// Performs one-time initialization unless the emulator is running.
    pub async fn init(&self) -> AutomationResult<()> {
        self.call(|emulator| emulator.init()).await
    }

    /// Starts the emulator unless it is already running.
    pub async fn start(&self) -> AutomationResult<()> {
        self.call(|emulator| emulator.start()).await
    }

    /// Stops the emulator regardless of who started it.
    pub async fn stop(&self) -> AutomationResult<()> {
        self.call(|emulator| emulator.stop()).await
    }

    /// Deletes all blob, table and queue data.
    pub async fn clear_all(&self) -> AutomationResult<()> {
        self.call(|emulator| emulator.clear_all()).await
    }

    /// Deletes blob data only.
    pub async fn clear_blobs(&self) -> AutomationResult<()> {
        self.call(|emulator| emulator.clear_blobs()).await
    }

    /// Deletes table data only.
    pub async fn clear_tables(&self) -> AutomationResult<()> {
        self.call(|emulator| emulator.clear_tables()).await
    }

    /// Deletes queue data only.
    pub async fn clear_queues(&self) -> AutomationResult<()> {
        self.call(|emulator| emulator.clear_queues()).await
    }

    /// Queries whether the emulator is running.
    pub async fn is_running(&self) -> AutomationResult<bool> {
        self.call(|emulator| emulator.is_running()).await
    }

    /// Returns the full status report.
    pub async fn status(&self) -> AutomationResult<EmulatorStatus> {
        self.call(|emulator| emulator.status()).await
    }

    /// Stops the emulator if this handle started it, without waiting for the
    /// last clone to be dropped. Later drops do nothing.
    pub async fn shutdown(self) -> AutomationResult<()> {
        self.call(|emulator| {
            let disarmed = StorageEmulator::with_client(emulator.client().clone());
            std::mem::replace(emulator, disarmed).shutdown()
        })
        .await
    }
}
