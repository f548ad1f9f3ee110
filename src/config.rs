use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::registry::preset::Preset;
use crate::registry::version::VersionTriple;

// =============================================================================
// Defaults
// =============================================================================

/// Environment variable naming a catalog file
pub const CATALOG_ENV: &str = "VERSION_REGISTRY_CATALOG";

/// Environment variable holding the log filter (EnvFilter syntax)
pub const LOG_ENV: &str = "VERSION_REGISTRY_LOG";

/// Catalog file picked up from the project root when no other source is given
pub const DEFAULT_CATALOG_FILE: &str = "version-registry.toml";

/// Build output directory removed by `clean`
pub const DEFAULT_BUILD_DIR: &str = "build";

pub const DEFAULT_UPSTREAM_REPOSITORY: &str = "https://github.com/matrix-org/matrix-rust-sdk";

pub const DEFAULT_ASSET_PREFIX: &str = "matrix-android";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown preset: {0}. Available presets: {available}", available = Preset::names())]
    UnknownPreset(String),
}

/// Catalog file structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CatalogConfig {
    pub sdk: SdkConfig,
    pub publish: PublishConfig,
    pub modules: ModulesConfig,
    #[serde(default)]
    pub versions: IndexMap<String, String>,
    #[serde(default)]
    pub libraries: IndexMap<String, LibraryConfig>,
    #[serde(default)]
    pub plugins: IndexMap<String, PluginConfig>,
    #[serde(default)]
    pub release: ReleaseConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SdkConfig {
    pub compile_sdk: u32,
    pub target_sdk: u32,
    pub min_sdk: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PublishConfig {
    pub group_id: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ModulesConfig {
    pub sdk: VersionTriple,
    pub crypto: VersionTriple,
}

/// A library entry: full notation or a table
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LibraryConfig {
    Notation(String),
    Table(LibraryTable),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LibraryTable {
    /// `group:artifact`
    pub module: String,
    pub version: Option<String>,
    pub version_ref: Option<String>,
    pub classifier: Option<String>,
    pub extension: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PluginConfig {
    pub id: String,
    pub version: Option<String>,
    pub version_ref: Option<String>,
}

/// Release naming settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ReleaseConfig {
    pub upstream_repository: String,
    pub asset_prefix: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            upstream_repository: DEFAULT_UPSTREAM_REPOSITORY.to_string(),
            asset_prefix: DEFAULT_ASSET_PREFIX.to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

/// Returns the catalog file to load, if any.
/// Uses the explicit path if given, then $VERSION_REGISTRY_CATALOG,
/// then `version-registry.toml` in the project root if it exists.
/// `None` means the selected preset is used.
pub fn catalog_path(explicit: Option<&Path>, root: &Path) -> Option<PathBuf> {
    catalog_path_with_env(explicit, std::env::var(CATALOG_ENV).ok(), root)
}

fn catalog_path_with_env(
    explicit: Option<&Path>,
    env_catalog: Option<String>,
    root: &Path,
) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_catalog.filter(|s| !s.is_empty()).map(PathBuf::from))
        .or_else(|| {
            let candidate = root.join(DEFAULT_CATALOG_FILE);
            candidate.is_file().then_some(candidate)
        })
}
