use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// External build tool events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BuildEvent {
    /// A tool invocation is starting
    CommandStarted {
        package: String,
        command: String,
        working_dir: PathBuf,
    },

    /// A line of tool output
    OutputLine {
        package: String,
        line: String,
        stderr: bool,
    },

    /// A tool invocation finished with exit status zero
    CommandCompleted {
        package: String,
        command: String,
        duration: Duration,
    },

    /// A tool invocation failed
    CommandFailed {
        package: String,
        command: String,
        exit_code: Option<i32>,
    },

    /// A generator wrote a file into the generators folder
    FileGenerated { generator: String, path: PathBuf },
}
