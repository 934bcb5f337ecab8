use std::collections::HashMap;
use std::{fs, path::PathBuf, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::info;

use crate::error::Result;
use crate::versions::ForgeRelease;

const MAVEN_METADATA_URL: &str =
    "https://files.minecraftforge.net/net/minecraftforge/forge/maven-metadata.json";
const PROMOTIONS_URL: &str =
    "https://files.minecraftforge.net/net/minecraftforge/forge/promotions_slim.json";

/// Source of the forge releases known for a game version.
#[async_trait]
pub trait ForgeVersionCatalog: Send + Sync {
    /// All releases for `mc_version`, in catalog order. An unknown game
    /// version yields an empty list; failures reaching the catalog propagate.
    async fn releases(&self, mc_version: &str) -> Result<Vec<ForgeRelease>>;
}

#[derive(Debug, Deserialize)]
struct Promotions {
    promos: HashMap<String, String>,
}

/// Catalog backed by the forge maven metadata and promotions indexes.
pub struct HttpForgeCatalog {
    client: reqwest::Client,
    metadata_url: String,
    promotions_url: String,
}

impl HttpForgeCatalog {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            metadata_url: MAVEN_METADATA_URL.to_string(),
            promotions_url: PROMOTIONS_URL.to_string(),
        }
    }

    /// Point both indexes at a mirror root instead of files.minecraftforge.net.
    pub fn with_mirror(mirror: &str) -> Self {
        let root = mirror.trim_end_matches('/');
        Self {
            client: reqwest::Client::new(),
            metadata_url: format!("{root}/maven-metadata.json"),
            promotions_url: format!("{root}/promotions_slim.json"),
        }
    }

    /// Honor a configured mirror, falling back to the official indexes.
    pub fn from_settings(settings: &crate::settings::ForgeSettings) -> Self {
        match &settings.maven_mirror {
            Some(mirror) => Self::with_mirror(mirror),
            None => Self::new(),
        }
    }

    fn cache_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "forgeloader", "forgeloader")
            .ok_or_else(|| anyhow::anyhow!("project dirs"))?;
        let dir = dirs.cache_dir().join("catalog");
        fs::create_dir_all(&dir).ok();
        Ok(dir)
    }

    fn cache_is_valid(p: &PathBuf, ttl: Duration) -> bool {
        if let Ok(meta) = fs::metadata(p) {
            if let Ok(modified) = meta.modified() {
                if let Ok(elapsed) = modified.elapsed() {
                    return elapsed < ttl;
                }
            }
        }
        false
    }

    async fn fetch_cached(&self, url: &str, cache_name: &str) -> Result<String> {
        let cache = Self::cache_dir()?.join(cache_name);
        let ttl = Duration::from_secs(8 * 60);
        if Self::cache_is_valid(&cache, ttl) {
            if let Ok(text) = fs::read_to_string(&cache) {
                return Ok(text);
            }
        }

        info!("catalog fetch: {}", url);
        let resp = self
            .client
            .get(url)
            .header("User-Agent", "forgeloader-rs")
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(anyhow::anyhow!("forge catalog error: {}", status).into());
        }
        fs::write(&cache, &text).ok();
        Ok(text)
    }
}

impl Default for HttpForgeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForgeVersionCatalog for HttpForgeCatalog {
    async fn releases(&self, mc_version: &str) -> Result<Vec<ForgeRelease>> {
        let metadata = self
            .fetch_cached(&self.metadata_url, "maven-metadata.json")
            .await?;
        let promotions = self
            .fetch_cached(&self.promotions_url, "promotions_slim.json")
            .await?;
        let metadata: HashMap<String, Vec<String>> =
            serde_json::from_str(&metadata).context("parse forge maven metadata")?;
        let promotions: Promotions =
            serde_json::from_str(&promotions).context("parse forge promotions")?;
        Ok(build_releases(mc_version, &metadata, &promotions.promos))
    }
}

fn build_releases(
    mc_version: &str,
    metadata: &HashMap<String, Vec<String>>,
    promos: &HashMap<String, String>,
) -> Vec<ForgeRelease> {
    let recommended = promos.get(&format!("{mc_version}-recommended"));
    let latest = promos.get(&format!("{mc_version}-latest"));
    let prefix = format!("{mc_version}-");
    metadata
        .get(mc_version)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.strip_prefix(&prefix))
                .map(|forge| ForgeRelease {
                    mc_version: mc_version.to_string(),
                    forge_version: forge.to_string(),
                    is_recommended: recommended.is_some_and(|v| v.as_str() == forge),
                    is_latest: latest.is_some_and(|v| v.as_str() == forge),
                })
                .collect()
        })
        .unwrap_or_default()
}
