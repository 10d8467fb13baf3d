//! Command vocabulary understood by the emulator executable.

use std::fmt;

/// A single command passed to the emulator's command-line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmulatorCommand {
    Init,
    Start,
    Stop,
    Status,
    ClearAll,
    ClearBlobs,
    ClearTables,
    ClearQueues,
}

impl EmulatorCommand {
    /// Returns the command as typed on the emulator's command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmulatorCommand::Init => "init",
            EmulatorCommand::Start => "start",
            EmulatorCommand::Stop => "stop",
            EmulatorCommand::Status => "status",
            EmulatorCommand::ClearAll => "clear all",
            EmulatorCommand::ClearBlobs => "clear blob",
            EmulatorCommand::ClearTables => "clear table",
            EmulatorCommand::ClearQueues => "clear queue",
        }
    }

    /// Returns the argv words handed to the executable.
    ///
    /// The emulator reads `clear all` as two words, so multi-word commands
    /// are split rather than quoted into a single argument.
    pub fn args(&self) -> &'static [&'static str] {
        match self {
            EmulatorCommand::Init => &["init"],
            EmulatorCommand::Start => &["start"],
            EmulatorCommand::Stop => &["stop"],
            EmulatorCommand::Status => &["status"],
            EmulatorCommand::ClearAll => &["clear", "all"],
            EmulatorCommand::ClearBlobs => &["clear", "blob"],
            EmulatorCommand::ClearTables => &["clear", "table"],
            EmulatorCommand::ClearQueues => &["clear", "queue"],
        }
    }
}

impl fmt::Display for EmulatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
