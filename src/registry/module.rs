//! Publishable modules and their orchestrator-facing locations

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Module published by the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Sdk,
    Crypto,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid module choice: {0}. Available options: SDK, CRYPTO")]
pub struct UnknownModule(pub String);

impl Module {
    pub const ALL: [Module; 2] = [Module::Sdk, Module::Crypto];

    /// Lowercase name, used in release names and paths
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Sdk => "sdk",
            Module::Crypto => "crypto",
        }
    }

    /// Uppercase display name, used in commit messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Module::Sdk => "SDK",
            Module::Crypto => "CRYPTO",
        }
    }

    /// Version file holding the module's `majorVersion`/`minorVersion`/`patchVersion`
    pub fn version_file(&self) -> PathBuf {
        let file_name = match self {
            Module::Sdk => "BuildVersionsSDK.kt",
            Module::Crypto => "BuildVersionsCrypto.kt",
        };
        PathBuf::from("buildSrc/src/main/kotlin").join(file_name)
    }

    /// Orchestrator project path, e.g. `:sdk:sdk-android`
    pub fn project_path(&self) -> String {
        format!(":{0}:{0}-android", self.as_str())
    }

    pub fn publish_task(&self) -> String {
        format!("{}:publishToSonatype", self.project_path())
    }

    /// Release archive produced by the orchestrator, relative to the project root
    pub fn asset_path(&self) -> PathBuf {
        let name = self.as_str();
        PathBuf::from(name)
            .join(format!("{}-android", name))
            .join("build/outputs/aar")
            .join(format!("{}-android-release.aar", name))
    }

    /// Name the archive is published under, e.g. `matrix-android-sdk.aar`
    pub fn asset_name(&self, asset_prefix: &str) -> String {
        format!("{}-{}.aar", asset_prefix, self.as_str())
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sdk" => Ok(Module::Sdk),
            "crypto" => Ok(Module::Crypto),
            _ => Err(UnknownModule(s.to_string())),
        }
    }
}
