use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::downloader::DownloadEntry;
use crate::error::{ForgeError, Result};
use crate::events::{FileKind, InstallerEvents};
use crate::installers::{artifact_id, maven_url, ForgeInstaller};
use crate::options::InstallOptions;
use crate::versions::ForgeRelease;

/// Install-profile era protocol: fetch the official installer jar and run it
/// against the install root, relaying its stdout line by line.
pub struct ModernInstaller {
    release: ForgeRelease,
    version_name: String,
}

impl ModernInstaller {
    pub fn new(release: ForgeRelease) -> Self {
        let version_name = format!("{}-forge-{}", release.mc_version, release.forge_version);
        Self { release, version_name }
    }
}

// The installer refuses roots it does not recognize as a launcher directory.
fn ensure_launcher_profiles(root: &Path) -> Result<()> {
    let profiles = root.join("launcher_profiles.json");
    if !profiles.exists() {
        std::fs::create_dir_all(root)?;
        std::fs::write(&profiles, "{\"profiles\":{}}")?;
    }
    Ok(())
}

#[async_trait]
impl ForgeInstaller for ModernInstaller {
    fn version_name(&self) -> &str {
        &self.version_name
    }

    fn release(&self) -> &ForgeRelease {
        &self.release
    }

    async fn install(&self, options: &mut InstallOptions, events: &InstallerEvents) -> Result<()> {
        let java = options.java_path.clone().ok_or(ForgeError::JavaNotFound)?;

        events.output(format!("Installing {}", self.version_name));
        events.progress(5);

        let jar_name = format!("forge-{}-installer.jar", artifact_id(&self.release));
        let jar_path = std::env::temp_dir().join("forgeloader").join(&jar_name);
        let entries = [DownloadEntry {
            url: maven_url(&self.release, "installer", "jar"),
            path: jar_path.clone(),
            kind: FileKind::Installer,
            name: jar_name.clone(),
        }];
        options.downloader.download(&entries, events).await?;
        events.progress(40);

        ensure_launcher_profiles(&options.install_root)?;

        info!("running forge installer: {}", jar_name);
        events.output(format!("Running {}", jar_name));
        let mut child = tokio::process::Command::new(&java)
            .arg("-jar")
            .arg(&jar_path)
            .arg("--installClient")
            .arg(&options.install_root)
            .args(&options.installer_args)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("installer stdout unavailable"))?;
        let mut lines = BufReader::new(stdout).lines();
        while let Some(line) = lines.next_line().await? {
            events.output(line);
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(anyhow::anyhow!("forge installer exited with {}", status).into());
        }

        events.progress(100);
        events.output(format!("Installed {}", self.version_name));
        Ok(())
    }
}


