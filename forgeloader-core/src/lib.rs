pub mod error;
pub mod versions;
pub mod catalog;
pub mod launcher;
pub mod events;
pub mod options;
pub mod downloader;
pub mod installers;
pub mod forge;
pub mod settings;
pub mod logging;

pub use error::{ForgeError, Result};
pub use versions::{split_version_id, select_release, ForgeRelease};
pub use catalog::{ForgeVersionCatalog, HttpForgeCatalog};
pub use launcher::{LauncherCore, VersionInfo};
pub use events::{FileKind, FileProgress, InstallerEvents};
pub use options::InstallOptions;
pub use downloader::{DownloadEntry, Downloader, SequenceDownloader};
pub use installers::{family_for, ForgeInstaller, ForgeInstallerMapper, InstallerFamily, InstallerMapper, LegacyInstaller, ModernInstaller};
pub use forge::ForgeInstallManager;
pub use settings::{ForgeSettings, SettingsStore};
pub use logging::init_logging;


