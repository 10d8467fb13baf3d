//! Common test utilities.
//!
//! `FakeEmulator` installs a shell script at the emulator's standard install
//! layout inside a temporary Program Files directory. The script answers the
//! emulator's command vocabulary and keeps its running flag and blob, table
//! and queue artifacts on disk next to itself.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, MutexGuard};
use tempfile::TempDir;

use storage_emulator_automation::{Config, StorageEmulator};

pub const TEST_BLOB_NAME: &str = "TestBlob";
pub const TEST_QUEUE_MESSAGE: &str = "test-queue-message";

const FAKE_EMULATOR: &str = r#"#!/bin/sh
here=$(dirname "$0")
data="$here/data"
echo "$*" >> "$here/calls.log"
case "$1" in
  status)
    echo "Windows Azure Storage Emulator 5.10.0.0 command line tool"
    if [ -f "$here/running" ]; then
      echo "IsRunning: True"
      echo "BlobEndpoint: http://127.0.0.1:10000/"
      echo "QueueEndpoint: http://127.0.0.1:10001/"
      echo "TableEndpoint: http://127.0.0.1:10002/"
    else
      echo "IsRunning: False"
    fi
    ;;
  init)
    echo "The storage emulator was successfully initialized and is ready to use."
    ;;
  start)
    touch "$here/running"
    echo "The storage emulator was successfully started."
    ;;
  stop)
    rm -f "$here/running"
    echo "The storage emulator was successfully stopped."
    ;;
  clear)
    case "$2" in
      all) rm -rf "$data/blob" "$data/table" "$data/queue" ;;
      blob|table|queue) rm -rf "$data/$2" ;;
      *) echo "Unknown clear target: $2"; exit 1 ;;
    esac
    echo "The storage emulator was successfully cleared."
    ;;
  *)
    echo "Unknown command: $*"
    exit 1
    ;;
esac
"#;

static SERIAL: Mutex<()> = Mutex::new(());

/// Serializes tests that write and then execute scripts, so no concurrent
/// fork can hold a script open for writing while it is executed.
pub fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock()
}

/// A scripted emulator installed under a temporary Program Files directory.
pub struct FakeEmulator {
    program_files: TempDir,
    executable: PathBuf,
}

impl FakeEmulator {
    /// Installs the fake as `AzureStorageEmulator.exe`.
    pub fn install() -> Self {
        Self::install_as("AzureStorageEmulator.exe", FAKE_EMULATOR)
    }

    /// Installs the fake under the older `WAStorageEmulator.exe` name.
    pub fn install_legacy() -> Self {
        Self::install_as("WAStorageEmulator.exe", FAKE_EMULATOR)
    }

    /// Installs an emulator whose `status` prints `output` and nothing else.
    pub fn with_status_output(output: &str) -> Self {
        let script = format!("#!/bin/sh\ncat <<'OUTPUT'\n{}\nOUTPUT\n", output);
        Self::install_as("AzureStorageEmulator.exe", &script)
    }

    fn install_as(name: &str, script: &str) -> Self {
        let program_files = tempfile::tempdir().unwrap();
        let dir = install_dir(program_files.path());
        fs::create_dir_all(&dir).unwrap();

        let executable = dir.join(name);
        fs::write(&executable, script).unwrap();
        fs::set_permissions(&executable, fs::Permissions::from_mode(0o755)).unwrap();

        Self {
            program_files,
            executable,
        }
    }

    pub fn program_files(&self) -> &Path {
        self.program_files.path()
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Configuration that finds this fake through the install-layout search.
    pub fn config(&self) -> Config {
        Config::with_program_files(self.program_files())
    }

    pub fn automation(&self) -> StorageEmulator {
        StorageEmulator::new(&self.config())
    }

    fn state_dir(&self) -> PathBuf {
        install_dir(self.program_files())
    }

    /// Reads the running flag directly, bypassing the `status` command.
    pub fn is_running(&self) -> bool {
        self.state_dir().join("running").exists()
    }

    /// Flips the running flag directly, as another process would.
    pub fn set_running(&self, running: bool) {
        let flag = self.state_dir().join("running");
        if running {
            fs::write(flag, b"").unwrap();
        } else if flag.exists() {
            fs::remove_file(flag).unwrap();
        }
    }

    /// Every command line the fake has received, in order.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.state_dir().join("calls.log"))
            .map(|log| log.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    fn data_dir(&self, kind: &str, name: &str) -> PathBuf {
        self.state_dir().join("data").join(kind).join(name)
    }

    pub fn add_test_blob_to_container(&self, container: &str) {
        let dir = self.data_dir("blob", container);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(TEST_BLOB_NAME), "test").unwrap();
    }

    pub fn add_test_row_to_table(&self, table: &str) {
        let dir = self.data_dir("table", table);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("row"), "TestProperty=test").unwrap();
    }

    pub fn add_test_queue_item_to(&self, queue: &str) {
        let dir = self.data_dir("queue", queue);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("message"), TEST_QUEUE_MESSAGE).unwrap();
    }

    pub fn blob_container_contains_test_blob(&self, container: &str) -> bool {
        self.data_dir("blob", container).join(TEST_BLOB_NAME).is_file()
    }

    pub fn table_contains_test_row(&self, table: &str) -> bool {
        self.data_dir("table", table).join("row").is_file()
    }

    pub fn queue_contains_test_message(&self, queue: &str) -> bool {
        fs::read_to_string(self.data_dir("queue", queue).join("message"))
            .map(|message| message == TEST_QUEUE_MESSAGE)
            .unwrap_or(false)
    }
}

/// Standard emulator install directory under a Program Files directory.
pub fn install_dir(program_files: &Path) -> PathBuf {
    program_files
        .join("Microsoft SDKs")
        .join("Azure")
        .join("Storage Emulator")
}
