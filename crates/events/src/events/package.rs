use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Package folder population events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PackageEvent {
    /// A file was copied into the export or package folder
    FileCopied { from: PathBuf, to: PathBuf },

    /// A directory was pruned from the package folder
    DirectoryPruned { path: PathBuf, existed: bool },

    /// Package metadata was written for consumers
    PackageInfoPublished {
        package: String,
        path: PathBuf,
        components: Vec<String>,
    },
}
