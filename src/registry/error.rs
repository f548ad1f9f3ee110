use thiserror::Error;

use crate::config::ConfigError;
use crate::registry::coordinate::CoordinateError;

/// Kind of named entry looked up in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Library,
    Version,
    Plugin,
}

impl NameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameKind::Library => "library",
            NameKind::Version => "version",
            NameKind::Plugin => "plugin",
        }
    }
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("Malformed version '{0}': expected major.minor.patch")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Malformed coordinate '{coordinate}' for '{name}': {reason}")]
    MalformedCoordinate {
        name: String,
        coordinate: String,
        reason: CoordinateError,
    },

    #[error(
        "Invalid SDK bounds: minSdk ({min_sdk}) <= targetSdk ({target_sdk}) <= compileSdk ({compile_sdk}) does not hold"
    )]
    InvalidSdkBounds {
        compile_sdk: u32,
        target_sdk: u32,
        min_sdk: u32,
    },

    #[error("Unknown {kind}: {name}")]
    UnknownName { kind: NameKind, name: String },

    #[error("'{name}' references unknown version '{version_ref}'")]
    UnknownVersionRef { name: String, version_ref: String },

    #[error("'{0}' declares both version and versionRef")]
    AmbiguousVersion(String),

    #[error("'{0}' declares neither version nor versionRef")]
    MissingVersion(String),

    #[error("Artifact '{artifact_id}' is declared by both '{first}' and '{second}'")]
    DuplicateArtifact {
        artifact_id: String,
        first: String,
        second: String,
    },

    #[error("Publish group ID must not be empty")]
    EmptyPublishGroup,

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
