use std::path::PathBuf;

use crate::downloader::{Downloader, SequenceDownloader};

/// Configuration for a single install call.
///
/// Each call owns its options; the only mutation the install manager performs
/// is backfilling `java_path` when it is unset. Not meant to be shared across
/// concurrent installs.
pub struct InstallOptions {
    /// Root of the managed game directory the forge version is installed into.
    pub install_root: PathBuf,
    /// Java binary the installer runs with. Resolved from the launcher when unset.
    pub java_path: Option<PathBuf>,
    /// Strategy used for every file the installer has to fetch.
    pub downloader: Box<dyn Downloader>,
    /// Extra arguments appended to the forge installer invocation.
    pub installer_args: Vec<String>,
}

impl InstallOptions {
    pub fn new(install_root: impl Into<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
            java_path: None,
            downloader: Box::new(SequenceDownloader),
            installer_args: Vec::new(),
        }
    }

    pub fn with_java_path(mut self, java_path: impl Into<PathBuf>) -> Self {
        self.java_path = Some(java_path.into());
        self
    }

    pub fn with_downloader(mut self, downloader: Box<dyn Downloader>) -> Self {
        self.downloader = downloader;
        self
    }
}


