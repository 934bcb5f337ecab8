use async_trait::async_trait;

use crate::error::Result;
use crate::events::InstallerEvents;
use crate::options::InstallOptions;
use crate::versions::ForgeRelease;

pub mod legacy;
pub mod modern;

pub use legacy::LegacyInstaller;
pub use modern::ModernInstaller;

const MAVEN_ROOT: &str = "https://maven.minecraftforge.net/net/minecraftforge/forge";

/// A concrete install protocol for one forge release.
///
/// `version_name` is the canonical id the install will produce under
/// `versions/`; it is what install calls return and what the idempotency
/// probe checks against the launcher.
#[async_trait]
pub trait ForgeInstaller: Send + Sync {
    fn version_name(&self) -> &str;

    fn release(&self) -> &ForgeRelease;

    async fn install(&self, options: &mut InstallOptions, events: &InstallerEvents) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerFamily {
    /// Universal-archive era, before the install-profile installer.
    Legacy,
    /// Installer-jar era (forge 25.x / game 1.13 and newer).
    Modern,
}

/// Which protocol a release uses, decided from the forge major version alone.
pub fn family_for(release: &ForgeRelease) -> InstallerFamily {
    let major = release
        .forge_version
        .split('.')
        .next()
        .and_then(|s| s.parse::<u32>().ok());
    match major {
        Some(m) if m < 25 => InstallerFamily::Legacy,
        _ => InstallerFamily::Modern,
    }
}

/// Maps a release to the installer that can produce it.
pub trait InstallerMapper: Send + Sync {
    fn create(&self, release: &ForgeRelease) -> Box<dyn ForgeInstaller>;
}

/// Default mapper over the closed installer set.
pub struct ForgeInstallerMapper;

impl InstallerMapper for ForgeInstallerMapper {
    fn create(&self, release: &ForgeRelease) -> Box<dyn ForgeInstaller> {
        match family_for(release) {
            InstallerFamily::Modern => Box::new(ModernInstaller::new(release.clone())),
            InstallerFamily::Legacy => Box::new(LegacyInstaller::new(release.clone())),
        }
    }
}

pub(crate) fn artifact_id(release: &ForgeRelease) -> String {
    format!("{}-{}", release.mc_version, release.forge_version)
}

pub(crate) fn maven_url(release: &ForgeRelease, classifier: &str, ext: &str) -> String {
    let artifact = artifact_id(release);
    format!("{MAVEN_ROOT}/{artifact}/forge-{artifact}-{classifier}.{ext}")
}
