use thiserror::Error;

pub type Result<T, E = ForgeError> = std::result::Result<T, E>;

/// Failures surfaced by forge version resolution and installation.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The catalog has no forge releases at all for the requested game version.
    #[error("no forge version found for {mc_version}")]
    NoVersionFound { mc_version: String },

    /// An explicitly requested forge version is not in the catalog.
    #[error("cannot find forge version {name}")]
    ForgeVersionNotFound { name: String },

    /// A version id contained a dash but no `-forge-` suffix.
    #[error("invalid version id '{id}': expected '<mc>' or '<mc>-forge-<version>'")]
    InvalidVersionId { id: String },

    /// The launcher does not know the named version.
    #[error("version {name} is not installed")]
    VersionNotFound { name: String },

    /// No usable java binary after the per-version and default lookups.
    #[error("cannot find any java binary; set the java path in the install options")]
    JavaNotFound,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}


