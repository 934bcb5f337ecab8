use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::Result;
use crate::events::{FileKind, FileProgress, InstallerEvents};

/// One file an installer needs on disk.
#[derive(Debug, Clone)]
pub struct DownloadEntry {
    pub url: String,
    pub path: PathBuf,
    pub kind: FileKind,
    pub name: String,
}

/// Download strategy carried inside [`crate::InstallOptions`].
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, entries: &[DownloadEntry], events: &InstallerEvents) -> Result<()>;
}

// Caps how often streaming progress reaches subscribers.
struct ProgressGate {
    last: Option<Instant>,
    min_interval: Duration,
}

impl ProgressGate {
    fn new(min_interval: Duration) -> Self {
        Self { last: None, min_interval }
    }

    fn ready(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(prev) if now.duration_since(prev) < self.min_interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Default strategy: fetch entries one at a time, streaming to disk.
/// Files already present are kept as-is.
pub struct SequenceDownloader;

#[async_trait]
impl Downloader for SequenceDownloader {
    async fn download(&self, entries: &[DownloadEntry], events: &InstallerEvents) -> Result<()> {
        let client = reqwest::Client::new();
        let total = entries.len();
        let mut gate = ProgressGate::new(Duration::from_millis(150));
        for (i, entry) in entries.iter().enumerate() {
            events.file_changed(FileProgress {
                kind: entry.kind,
                name: entry.name.clone(),
                progressed_files: i,
                total_files: total,
            });
            if entry.path.exists() {
                continue;
            }
            if let Some(parent) = entry.path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let resp = client
                .get(&entry.url)
                .header("User-Agent", "forgeloader-rs")
                .send()
                .await?;
            if !resp.status().is_success() {
                return Err(anyhow::anyhow!(
                    "download failed: {} ({})",
                    entry.url,
                    resp.status()
                )
                .into());
            }
            let total_bytes = resp.content_length().unwrap_or(0);
            let mut stream = resp.bytes_stream();
            let mut file = tokio::fs::File::create(&entry.path).await?;
            let mut downloaded: u64 = 0;
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk).await?;
                downloaded += chunk.len() as u64;
                if total_bytes > 0 && gate.ready() {
                    let file_share = downloaded as f32 / total_bytes as f32;
                    let pct = (((i as f32 + file_share) / total as f32) * 100.0) as u8;
                    debug!(
                        target: "progress",
                        "downloading {}: {}/{} KB",
                        entry.name,
                        downloaded / 1024,
                        total_bytes / 1024
                    );
                    events.progress(pct.min(100));
                }
            }
            file.flush().await?;
            events.file_changed(FileProgress {
                kind: entry.kind,
                name: entry.name.clone(),
                progressed_files: i + 1,
                total_files: total,
            });
        }
        Ok(())
    }
}
