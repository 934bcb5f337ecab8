use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};

/// One forge release known for a specific game version, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeRelease {
    pub mc_version: String,
    pub forge_version: String,
    pub is_recommended: bool,
    pub is_latest: bool,
}

impl ForgeRelease {
    pub fn new(mc_version: impl Into<String>, forge_version: impl Into<String>) -> Self {
        Self {
            mc_version: mc_version.into(),
            forge_version: forge_version.into(),
            is_recommended: false,
            is_latest: false,
        }
    }
}

/// Split a version id into its game version and an optional embedded forge version.
///
/// `"1.20.1"` has no embedded version; `"1.20.1-forge-47.2.0"` pins `47.2.0`.
/// A dash without the `-forge-` delimiter is rejected outright rather than
/// silently matched against a release name that cannot exist.
pub fn split_version_id(id: &str) -> Result<(String, Option<String>)> {
    if !id.contains('-') {
        return Ok((id.to_string(), None));
    }
    if let Some((_, forge)) = id.split_once("-forge-") {
        if forge.is_empty() {
            return Err(ForgeError::InvalidVersionId { id: id.to_string() });
        }
        let mc = id.split('-').next().unwrap_or_default();
        return Ok((mc.to_string(), Some(forge.to_string())));
    }
    Err(ForgeError::InvalidVersionId { id: id.to_string() })
}

/// Pick exactly one release out of the catalog listing.
///
/// With an explicit version the name must match literally. Without one the
/// precedence is recommended, then latest, then the first catalog entry.
pub fn select_release<'a>(
    mc_version: &str,
    releases: &'a [ForgeRelease],
    explicit: Option<&str>,
) -> Result<&'a ForgeRelease> {
    if releases.is_empty() {
        return Err(ForgeError::NoVersionFound {
            mc_version: mc_version.to_string(),
        });
    }
    match explicit {
        Some(name) => releases
            .iter()
            .find(|r| r.forge_version == name)
            .ok_or_else(|| ForgeError::ForgeVersionNotFound {
                name: name.to_string(),
            }),
        None => Ok(releases
            .iter()
            .find(|r| r.is_recommended)
            .or_else(|| releases.iter().find(|r| r.is_latest))
            .unwrap_or(&releases[0])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(forge: &str, recommended: bool, latest: bool) -> ForgeRelease {
        ForgeRelease {
            mc_version: "1.20.1".into(),
            forge_version: forge.into(),
            is_recommended: recommended,
            is_latest: latest,
        }
    }

    #[test]
    fn split_plain_id() {
        let (mc, forge) = split_version_id("1.20.1").unwrap();
        assert_eq!(mc, "1.20.1");
        assert!(forge.is_none());
    }

    #[test]
    fn split_combined_id() {
        let (mc, forge) = split_version_id("1.20.1-forge-47.2.0").unwrap();
        assert_eq!(mc, "1.20.1");
        assert_eq!(forge.as_deref(), Some("47.2.0"));
    }

    #[test]
    fn split_rejects_stray_dash() {
        assert!(matches!(
            split_version_id("1.20.1-rc1"),
            Err(ForgeError::InvalidVersionId { .. })
        ));
    }

    #[test]
    fn split_rejects_empty_suffix() {
        assert!(matches!(
            split_version_id("1.20.1-forge-"),
            Err(ForgeError::InvalidVersionId { .. })
        ));
    }

    #[test]
    fn recommended_wins_over_latest_and_order() {
        let releases = vec![
            release("47.0.1", false, true),
            release("47.2.0", true, false),
            release("47.3.0", false, false),
        ];
        let picked = select_release("1.20.1", &releases, None).unwrap();
        assert_eq!(picked.forge_version, "47.2.0");
    }

    #[test]
    fn latest_wins_without_recommended() {
        let releases = vec![
            release("47.0.1", false, false),
            release("47.3.0", false, true),
        ];
        let picked = select_release("1.20.1", &releases, None).unwrap();
        assert_eq!(picked.forge_version, "47.3.0");
    }

    #[test]
    fn falls_back_to_first_entry() {
        let releases = vec![
            release("47.0.1", false, false),
            release("47.3.0", false, false),
        ];
        let picked = select_release("1.20.1", &releases, None).unwrap();
        assert_eq!(picked.forge_version, "47.0.1");
    }

    #[test]
    fn empty_catalog_fails() {
        assert!(matches!(
            select_release("1.20.1", &[], None),
            Err(ForgeError::NoVersionFound { .. })
        ));
    }

    #[test]
    fn explicit_version_must_match_exactly() {
        let releases = vec![
            release("47.2.0", true, false),
            release("47.1.0", false, true),
        ];
        let picked = select_release("1.20.1", &releases, Some("47.1.0")).unwrap();
        assert_eq!(picked.forge_version, "47.1.0");
        assert!(matches!(
            select_release("1.20.1", &releases, Some("47.9.9")),
            Err(ForgeError::ForgeVersionNotFound { .. })
        ));
    }
}


