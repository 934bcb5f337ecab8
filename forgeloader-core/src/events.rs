use tokio::sync::broadcast;

/// What a downloaded file is for, mirrored into file-change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Installer,
    Library,
    Resource,
}

/// Payload of a file-change event: which file, and how far through the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProgress {
    pub kind: FileKind,
    pub name: String,
    pub progressed_files: usize,
    pub total_files: usize,
}

/// Outbound event channels handed to an installer before it runs.
///
/// Everything emitted here lands on the owning manager's subscribers with the
/// payload untouched. Sends to channels nobody listens on are dropped.
#[derive(Debug, Clone)]
pub struct InstallerEvents {
    file: broadcast::Sender<FileProgress>,
    progress: broadcast::Sender<u8>,
    output: broadcast::Sender<String>,
}

impl InstallerEvents {
    pub(crate) fn from_senders(
        file: broadcast::Sender<FileProgress>,
        progress: broadcast::Sender<u8>,
        output: broadcast::Sender<String>,
    ) -> Self {
        Self { file, progress, output }
    }

    /// Standalone channel set, for driving an installer outside a manager.
    pub fn new() -> Self {
        let (file, _) = broadcast::channel(128);
        let (progress, _) = broadcast::channel(128);
        let (output, _) = broadcast::channel(128);
        Self { file, progress, output }
    }

    pub fn subscribe_file_changed(&self) -> broadcast::Receiver<FileProgress> {
        self.file.subscribe()
    }

    pub fn subscribe_progress(&self) -> broadcast::Receiver<u8> {
        self.progress.subscribe()
    }

    pub fn subscribe_output(&self) -> broadcast::Receiver<String> {
        self.output.subscribe()
    }

    pub fn file_changed(&self, progress: FileProgress) {
        let _ = self.file.send(progress);
    }

    pub fn progress(&self, percent: u8) {
        let _ = self.progress.send(percent);
    }

    pub fn output(&self, line: impl Into<String>) {
        let _ = self.output.send(line.into());
    }
}

impl Default for InstallerEvents {
    fn default() -> Self {
        Self::new()
    }
}


