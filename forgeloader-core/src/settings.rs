use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::options::InstallOptions;

/// Operator overrides for forge installs. Everything is optional; unset
/// fields leave the launcher-derived defaults alone.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ForgeSettings {
    pub minecraft_root: Option<String>,
    pub java_path: Option<String>,
    /// Mirror root for the forge catalog and maven downloads.
    pub maven_mirror: Option<String>,
    /// Extra arguments appended to the forge installer invocation, quoted
    /// shell-style.
    pub installer_args: Option<String>,
}

impl ForgeSettings {
    /// Copy the overrides onto a prepared options value.
    pub fn apply(&self, options: &mut InstallOptions) {
        if let Some(root) = &self.minecraft_root {
            options.install_root = PathBuf::from(root);
        }
        if let Some(java) = &self.java_path {
            options.java_path = Some(PathBuf::from(java));
        }
        if let Some(args) = &self.installer_args {
            options.installer_args = split_args_quoted(args);
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("io", "forgeloader", "forgeloader")
            .ok_or_else(|| anyhow::anyhow!("project dirs"))?;
        fs::create_dir_all(dirs.config_dir())?;
        Ok(Self { path: dirs.config_dir().join("settings.toml") })
    }

    pub fn load(&self) -> Result<ForgeSettings> {
        if !self.path.exists() {
            return Ok(ForgeSettings::default());
        }
        let text = fs::read_to_string(&self.path)?;
        let settings: ForgeSettings = toml::from_str(&text)?;
        Ok(settings)
    }

    pub fn save(&self, settings: &ForgeSettings) -> Result<()> {
        let text = toml::to_string_pretty(settings)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

fn split_args_quoted(src: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut quote_char: char = '\0';
    let mut escape = false;
    for ch in src.chars() {
        if escape {
            cur.push(ch);
            escape = false;
            continue;
        }
        match ch {
            '\\' => { escape = true; }
            '"' | '\'' => {
                if in_quotes {
                    if ch == quote_char { in_quotes = false; } else { cur.push(ch); }
                } else {
                    in_quotes = true; quote_char = ch;
                }
            }
            c if c.is_whitespace() && !in_quotes => {
                if !cur.is_empty() { out.push(cur.clone()); cur.clear(); }
            }
            _ => cur.push(ch),
        }
    }
    if !cur.is_empty() { out.push(cur); }
    out
}
