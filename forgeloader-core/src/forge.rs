use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use crate::catalog::ForgeVersionCatalog;
use crate::error::{ForgeError, Result};
use crate::events::{FileProgress, InstallerEvents};
use crate::installers::{ForgeInstallerMapper, InstallerMapper};
use crate::launcher::{LauncherCore, VersionInfo};
use crate::options::InstallOptions;
use crate::versions::{select_release, split_version_id, ForgeRelease};

/// Resolves a forge release for a game version and drives its installation
/// on top of the launcher-managed distribution.
///
/// One call is one sequential chain: resolve the release, probe whether the
/// produced version already exists, make sure the vanilla prerequisites are
/// on disk, resolve a java binary, run the installer with the event channels
/// wired up, refresh the launcher's version list. Subscribers see every
/// event an installer emits, payload untouched.
pub struct ForgeInstallManager {
    launcher: Arc<dyn LauncherCore>,
    catalog: Arc<dyn ForgeVersionCatalog>,
    mapper: Box<dyn InstallerMapper>,
    file_events: broadcast::Sender<FileProgress>,
    progress_events: broadcast::Sender<u8>,
    output_events: broadcast::Sender<String>,
}

impl ForgeInstallManager {
    pub fn new(launcher: Arc<dyn LauncherCore>, catalog: Arc<dyn ForgeVersionCatalog>) -> Self {
        Self::with_mapper(launcher, catalog, Box::new(ForgeInstallerMapper))
    }

    /// Same manager with a custom release-to-installer mapping.
    pub fn with_mapper(
        launcher: Arc<dyn LauncherCore>,
        catalog: Arc<dyn ForgeVersionCatalog>,
        mapper: Box<dyn InstallerMapper>,
    ) -> Self {
        let (file_events, _) = broadcast::channel(128);
        let (progress_events, _) = broadcast::channel(128);
        let (output_events, _) = broadcast::channel(128);
        Self {
            launcher,
            catalog,
            mapper,
            file_events,
            progress_events,
            output_events,
        }
    }

    pub fn subscribe_file_changed(&self) -> broadcast::Receiver<FileProgress> {
        self.file_events.subscribe()
    }

    pub fn subscribe_progress(&self) -> broadcast::Receiver<u8> {
        self.progress_events.subscribe()
    }

    pub fn subscribe_output(&self) -> broadcast::Receiver<String> {
        self.output_events.subscribe()
    }

    fn default_options(&self) -> InstallOptions {
        InstallOptions::new(self.launcher.minecraft_root())
    }

    fn events_sink(&self) -> InstallerEvents {
        InstallerEvents::from_senders(
            self.file_events.clone(),
            self.progress_events.clone(),
            self.output_events.clone(),
        )
    }

    /// Install the best release for `version_id` with default options.
    ///
    /// `version_id` is either a plain game version (`"1.20.1"`, picks
    /// recommended, then latest, then first) or a combined id
    /// (`"1.20.1-forge-47.2.0"`, pins that exact release).
    pub async fn install(&self, version_id: &str, force_update: bool) -> Result<String> {
        self.install_with_options(version_id, self.default_options(), force_update)
            .await
    }

    pub async fn install_with_options(
        &self,
        version_id: &str,
        options: InstallOptions,
        force_update: bool,
    ) -> Result<String> {
        let (mc_version, embedded) = split_version_id(version_id)?;
        let releases = self.catalog.releases(&mc_version).await?;
        let release = select_release(&mc_version, &releases, embedded.as_deref())?.clone();
        self.install_release(&release, options, force_update).await
    }

    /// Install an explicitly named forge version with default options.
    pub async fn install_version(
        &self,
        mc_version: &str,
        forge_version: &str,
        force_update: bool,
    ) -> Result<String> {
        self.install_version_with_options(mc_version, forge_version, self.default_options(), force_update)
            .await
    }

    pub async fn install_version_with_options(
        &self,
        mc_version: &str,
        forge_version: &str,
        options: InstallOptions,
        force_update: bool,
    ) -> Result<String> {
        let releases = self.catalog.releases(mc_version).await?;
        let release = select_release(mc_version, &releases, Some(forge_version))?.clone();
        self.install_release(&release, options, force_update).await
    }

    /// Install a resolved release. Returns the canonical installed-version name.
    pub async fn install_release(
        &self,
        release: &ForgeRelease,
        mut options: InstallOptions,
        force_update: bool,
    ) -> Result<String> {
        let installer = self.mapper.create(release);
        let version_name = installer.version_name().to_string();

        if !force_update && self.version_installed(&version_name).await? {
            info!("{} already installed, skipping", version_name);
            return Ok(version_name);
        }

        let vanilla = self.ensure_vanilla(&release.mc_version).await?;
        if options.java_path.is_none() {
            options.java_path = Some(self.resolve_java_path(&vanilla)?);
        }

        info!("installing {}", version_name);
        let events = self.events_sink();
        installer.install(&mut options, &events).await?;

        self.launcher.refresh_versions().await?;
        Ok(version_name)
    }

    /// Idempotency probe. The launcher not knowing the name is a normal
    /// negative; anything else propagates.
    async fn version_installed(&self, name: &str) -> Result<bool> {
        match self.launcher.get_version(name).await {
            Ok(_) => Ok(true),
            Err(ForgeError::VersionNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn ensure_vanilla(&self, mc_version: &str) -> Result<VersionInfo> {
        let version = self.launcher.get_version(mc_version).await?;
        self.launcher.ensure_downloaded(&version).await?;
        Ok(version)
    }

    fn resolve_java_path(&self, version: &VersionInfo) -> Result<PathBuf> {
        let java = self
            .launcher
            .java_path(version)
            .filter(|p| p.exists())
            .or_else(|| self.launcher.default_java_path().filter(|p| p.exists()))
            .ok_or(ForgeError::JavaNotFound)?;
        Ok(normalize_java_path(java, Path::new("/proc/self/cgroup").exists()))
    }
}

/// The windowed java binary does not exist under that name on POSIX hosts;
/// strip a trailing `w.exe` so a `javaw.exe` lookup resolves to `java`.
fn normalize_java_path(path: PathBuf, posix: bool) -> PathBuf {
    if !posix {
        return path;
    }
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => match name.strip_suffix("w.exe") {
            Some(stripped) if !stripped.is_empty() => path.with_file_name(stripped),
            _ => path,
        },
        None => path,
    }
}
