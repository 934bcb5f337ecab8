use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;

/// A vanilla game version as the launcher knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub id: String,
    /// Java major release the version manifest asks for, when declared.
    pub java_major: Option<u32>,
}

impl VersionInfo {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), java_major: None }
    }
}

/// The launcher that owns the vanilla distribution this crate installs on top of.
///
/// Listing, downloading and java resolution all belong to the launcher; this
/// crate only sequences calls against it. `get_version` failing with
/// [`crate::ForgeError::VersionNotFound`] is how the launcher reports an
/// unknown version name.
#[async_trait]
pub trait LauncherCore: Send + Sync {
    /// Root of the managed game directory (versions/, libraries/, ...).
    fn minecraft_root(&self) -> &Path;

    async fn installed_versions(&self) -> Result<Vec<String>>;

    async fn get_version(&self, name: &str) -> Result<VersionInfo>;

    /// Fetch and validate the version's assets so they exist locally.
    async fn ensure_downloaded(&self, version: &VersionInfo) -> Result<()>;

    /// Java binary associated with this specific version, if the launcher has one.
    fn java_path(&self, version: &VersionInfo) -> Option<PathBuf>;

    /// Launcher-wide java fallback. Defaults to whatever is on PATH.
    fn default_java_path(&self) -> Option<PathBuf> {
        which::which("java").ok()
    }

    /// Invalidate the installed-version listing after an install.
    async fn refresh_versions(&self) -> Result<()>;
}


