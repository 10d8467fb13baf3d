//! Parsing the emulator's `status` report.
//!
//! A running emulator reports something like:
//!
//! ```text
//! Windows Azure Storage Emulator 5.10.0.0 command line tool
//! IsRunning: True
//! BlobEndpoint: http://127.0.0.1:10000/
//! QueueEndpoint: http://127.0.0.1:10001/
//! TableEndpoint: http://127.0.0.1:10002/
//! ```

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::{AutomationError, AutomationResult};

/// Marker printed when the emulator is running.
pub const RUNNING_MARKER: &str = "IsRunning: True";

/// Marker printed when the emulator is stopped.
pub const STOPPED_MARKER: &str = "IsRunning: False";

/// Decides from `status` output whether the emulator is running.
pub fn parse_is_running(output: &str) -> AutomationResult<bool> {
    if output.contains(RUNNING_MARKER) {
        Ok(true)
    } else if output.contains(STOPPED_MARKER) {
        Ok(false)
    } else {
        Err(AutomationError::UnrecognizedStatus {
            output: output.to_string(),
        })
    }
}

/// Parsed `status` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmulatorStatus {
    pub is_running: bool,
    pub blob_endpoint: Option<Url>,
    pub queue_endpoint: Option<Url>,
    pub table_endpoint: Option<Url>,
}

impl EmulatorStatus {
    /// Parses a full `status` report. Endpoint lines are optional.
    pub fn parse(output: &str) -> AutomationResult<Self> {
        let is_running = parse_is_running(output)?;

        let mut status = Self {
            is_running,
            blob_endpoint: None,
            queue_endpoint: None,
            table_endpoint: None,
        };

        for line in output.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let slot = match key.trim() {
                "BlobEndpoint" => &mut status.blob_endpoint,
                "QueueEndpoint" => &mut status.queue_endpoint,
                "TableEndpoint" => &mut status.table_endpoint,
                _ => continue,
            };
            match Url::parse(value.trim()) {
                Ok(url) => *slot = Some(url),
                Err(e) => debug!("Ignoring malformed {} {:?}: {}", key.trim(), value.trim(), e),
            }
        }

        Ok(status)
    }
}
