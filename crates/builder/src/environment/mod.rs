//! Process execution for external build tools

mod execution;
mod types;

pub use types::BuildCommandResult;

use irrpkg_events::{EventEmitter, EventSender};

/// Environment external tools run in
#[derive(Clone, Debug)]
pub struct BuildEnvironment {
    /// Package the commands are run for (labels events)
    pub(crate) package: String,
    pub(crate) event_sender: Option<EventSender>,
}

impl EventEmitter for BuildEnvironment {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl BuildEnvironment {
    #[must_use]
    pub fn new(package: impl Into<String>, event_sender: Option<EventSender>) -> Self {
        Self {
            package: package.into(),
            event_sender,
        }
    }
}
