use std::io::Read;
use std::path::Path;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;
use zip::ZipArchive;

use crate::downloader::DownloadEntry;
use crate::error::Result;
use crate::events::{FileKind, FileProgress, InstallerEvents};
use crate::installers::{artifact_id, maven_url, ForgeInstaller};
use crate::options::InstallOptions;
use crate::versions::ForgeRelease;

/// Universal-archive era protocol: fetch the universal jar, place it in the
/// libraries layout and write a version json inheriting the vanilla version.
pub struct LegacyInstaller {
    release: ForgeRelease,
    version_name: String,
}

impl LegacyInstaller {
    pub fn new(release: ForgeRelease) -> Self {
        let version_name = format!(
            "{}-Forge{}-{}",
            release.mc_version, release.forge_version, release.mc_version
        );
        Self { release, version_name }
    }

    fn read_embedded_version_json(&self, jar_path: &Path) -> Result<serde_json::Value> {
        let file = std::fs::File::open(jar_path)?;
        let mut archive = ZipArchive::new(file).map_err(anyhow::Error::from)?;
        let text: Option<String> = match archive.by_name("version.json") {
            Ok(mut entry) => {
                let mut text = String::new();
                entry.read_to_string(&mut text)?;
                Some(text)
            }
            // Oldest universal archives ship no version json at all.
            Err(_) => None,
        };
        match text {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(json!({
                "mainClass": "net.minecraft.launchwrapper.Launch",
                "minecraftArguments": "--tweakClass cpw.mods.fml.common.launcher.FMLTweaker",
            })),
        }
    }
}

#[async_trait]
impl ForgeInstaller for LegacyInstaller {
    fn version_name(&self) -> &str {
        &self.version_name
    }

    fn release(&self) -> &ForgeRelease {
        &self.release
    }

    async fn install(&self, options: &mut InstallOptions, events: &InstallerEvents) -> Result<()> {
        events.output(format!("Installing {}", self.version_name));
        events.progress(5);

        let artifact = artifact_id(&self.release);
        let jar_name = format!("forge-{artifact}-universal.jar");
        let jar_path = std::env::temp_dir().join("forgeloader").join(&jar_name);
        let entries = [DownloadEntry {
            url: maven_url(&self.release, "universal", "jar"),
            path: jar_path.clone(),
            kind: FileKind::Installer,
            name: jar_name.clone(),
        }];
        options.downloader.download(&entries, events).await?;
        events.progress(50);

        let mut version_json = self.read_embedded_version_json(&jar_path)?;
        if !version_json.is_object() {
            return Err(anyhow::anyhow!("unexpected version json in universal archive").into());
        }
        version_json["id"] = json!(self.version_name);
        if version_json.get("inheritsFrom").is_none() {
            version_json["inheritsFrom"] = json!(self.release.mc_version);
        }

        let version_dir = options.install_root.join("versions").join(&self.version_name);
        std::fs::create_dir_all(&version_dir)?;
        let json_path = version_dir.join(format!("{}.json", self.version_name));
        std::fs::write(&json_path, serde_json::to_string_pretty(&version_json)?)?;
        info!("wrote version json: {}", json_path.display());
        events.progress(75);

        let library_dir = options
            .install_root
            .join("libraries")
            .join("net")
            .join("minecraftforge")
            .join("forge")
            .join(&artifact);
        std::fs::create_dir_all(&library_dir)?;
        let library_path = library_dir.join(format!("forge-{artifact}.jar"));
        std::fs::copy(&jar_path, &library_path)?;
        events.file_changed(FileProgress {
            kind: FileKind::Library,
            name: format!("forge-{artifact}.jar"),
            progressed_files: 1,
            total_files: 1,
        });

        events.progress(100);
        events.output(format!("Installed {}", self.version_name));
        Ok(())
    }
}


