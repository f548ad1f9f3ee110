//! Validated, immutable registry built from a catalog

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::config::{
    CatalogConfig, LibraryConfig, ModulesConfig, PluginConfig, ReleaseConfig, catalog_path,
};
use crate::registry::coordinate::{DependencyCoordinate, PluginCoordinate};
use crate::registry::error::{NameKind, RegistryError};
use crate::registry::module::Module;
use crate::registry::preset::Preset;
use crate::registry::publish::PublishIdentity;
use crate::registry::sdk::SdkBounds;
use crate::registry::version::VersionTriple;

/// Build configuration values for one invocation
///
/// Constructed once from a [`CatalogConfig`] after every value has been
/// validated, then only read. Pass it by reference to consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    sdk: SdkBounds,
    publish_group_id: String,
    modules: ModulesConfig,
    versions: IndexMap<String, String>,
    libraries: IndexMap<String, DependencyCoordinate>,
    plugins: IndexMap<String, PluginCoordinate>,
    release: ReleaseConfig,
}

impl Registry {
    pub fn from_config(config: CatalogConfig) -> Result<Self, RegistryError> {
        let sdk = SdkBounds::new(
            config.sdk.compile_sdk,
            config.sdk.target_sdk,
            config.sdk.min_sdk,
        )?;

        if config.publish.group_id.trim().is_empty() {
            return Err(RegistryError::EmptyPublishGroup);
        }

        let libraries = config
            .libraries
            .iter()
            .map(|(name, library)| {
                resolve_library(name, library, &config.versions).map(|c| (name.clone(), c))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;
        check_unique_artifacts(&libraries)?;

        let plugins = config
            .plugins
            .iter()
            .map(|(name, plugin)| {
                resolve_plugin(name, plugin, &config.versions).map(|p| (name.clone(), p))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;

        debug!(
            "Registry loaded: {} versions, {} libraries, {} plugins",
            config.versions.len(),
            libraries.len(),
            plugins.len()
        );

        Ok(Self {
            sdk,
            publish_group_id: config.publish.group_id,
            modules: config.modules,
            versions: config.versions,
            libraries,
            plugins,
            release: config.release,
        })
    }

    pub fn from_preset(preset: Preset) -> Result<Self, RegistryError> {
        debug!("Loading built-in preset {}", preset);
        Self::from_config(preset.catalog()?)
    }

    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        debug!("Loading catalog {:?}", path);
        Self::from_config(CatalogConfig::load(path)?)
    }

    /// Load from the first available catalog source, falling back to `preset`
    ///
    /// See [`catalog_path`] for the lookup order.
    pub fn discover(
        explicit: Option<&Path>,
        root: &Path,
        preset: Preset,
    ) -> Result<Self, RegistryError> {
        match catalog_path(explicit, root) {
            Some(path) => Self::load(&path),
            None => Self::from_preset(preset),
        }
    }

    /// Dotted version name of a module
    pub fn resolve_version_name(&self, module: Module) -> String {
        self.module_version(module).version_name()
    }

    pub fn module_version(&self, module: Module) -> VersionTriple {
        match module {
            Module::Sdk => self.modules.sdk,
            Module::Crypto => self.modules.crypto,
        }
    }

    pub fn resolve_sdk_bounds(&self) -> SdkBounds {
        self.sdk
    }

    pub fn resolve_dependency_coordinate(
        &self,
        name: &str,
    ) -> Result<&DependencyCoordinate, RegistryError> {
        debug!("Resolving library {}", name);
        self.libraries
            .get(name)
            .ok_or_else(|| unknown(NameKind::Library, name))
    }

    /// Value of a named entry in the versions table
    pub fn resolve_version(&self, name: &str) -> Result<&str, RegistryError> {
        debug!("Resolving version {}", name);
        self.versions
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| unknown(NameKind::Version, name))
    }

    /// Looks up a plugin by alias, then by plugin id
    pub fn resolve_plugin(&self, name: &str) -> Result<&PluginCoordinate, RegistryError> {
        debug!("Resolving plugin {}", name);
        self.plugins
            .get(name)
            .or_else(|| self.plugins.values().find(|plugin| plugin.id == name))
            .ok_or_else(|| unknown(NameKind::Plugin, name))
    }

    pub fn publish_group_id(&self) -> &str {
        &self.publish_group_id
    }

    pub fn publish_identity(&self, module: Module) -> PublishIdentity {
        PublishIdentity {
            group_id: self.publish_group_id.clone(),
            version_name: self.resolve_version_name(module),
        }
    }

    pub fn release_settings(&self) -> &ReleaseConfig {
        &self.release
    }

    /// Versions table in declaration order
    pub fn versions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.versions.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Libraries in declaration order
    pub fn libraries(&self) -> impl Iterator<Item = (&str, &DependencyCoordinate)> {
        self.libraries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Plugins in declaration order
    pub fn plugins(&self) -> impl Iterator<Item = (&str, &PluginCoordinate)> {
        self.plugins.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn snapshot(&self) -> RegistrySnapshot<'_> {
        RegistrySnapshot {
            sdk: self.sdk,
            publish_group_id: &self.publish_group_id,
            modules: Module::ALL
                .iter()
                .map(|module| (module.as_str(), self.resolve_version_name(*module)))
                .collect(),
            versions: &self.versions,
            libraries: &self.libraries,
            plugins: &self.plugins,
        }
    }

    /// `key=value` lines for the build orchestrator
    pub fn to_properties(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = writeln!(out, "compileSdk={}", self.sdk.compile_sdk());
        let _ = writeln!(out, "targetSdk={}", self.sdk.target_sdk());
        let _ = writeln!(out, "minSdk={}", self.sdk.min_sdk());
        let _ = writeln!(out, "publishGroupId={}", self.publish_group_id);
        for module in Module::ALL {
            let _ = writeln!(
                out,
                "{}.versionName={}",
                module,
                self.resolve_version_name(module)
            );
        }
        for (name, version) in self.versions() {
            let _ = writeln!(out, "versions.{}={}", name, version);
        }
        for (name, coordinate) in self.libraries() {
            let _ = writeln!(out, "libraries.{}={}", name, coordinate);
        }
        for (name, plugin) in self.plugins() {
            let _ = writeln!(out, "plugins.{}={}", name, plugin);
        }
        out
    }
}

/// Serializable view of a [`Registry`]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySnapshot<'a> {
    pub sdk: SdkBounds,
    pub publish_group_id: &'a str,
    pub modules: IndexMap<&'static str, String>,
    pub versions: &'a IndexMap<String, String>,
    pub libraries: &'a IndexMap<String, DependencyCoordinate>,
    pub plugins: &'a IndexMap<String, PluginCoordinate>,
}

fn unknown(kind: NameKind, name: &str) -> RegistryError {
    RegistryError::UnknownName {
        kind,
        name: name.to_string(),
    }
}

fn pick_version(
    name: &str,
    version: Option<&str>,
    version_ref: Option<&str>,
    versions: &IndexMap<String, String>,
) -> Result<String, RegistryError> {
    match (version, version_ref) {
        (Some(_), Some(_)) => Err(RegistryError::AmbiguousVersion(name.to_string())),
        (None, None) => Err(RegistryError::MissingVersion(name.to_string())),
        (Some(version), None) => Ok(version.to_string()),
        (None, Some(version_ref)) => {
            versions
                .get(version_ref)
                .cloned()
                .ok_or_else(|| RegistryError::UnknownVersionRef {
                    name: name.to_string(),
                    version_ref: version_ref.to_string(),
                })
        }
    }
}

fn resolve_library(
    name: &str,
    library: &LibraryConfig,
    versions: &IndexMap<String, String>,
) -> Result<DependencyCoordinate, RegistryError> {
    match library {
        LibraryConfig::Notation(notation) => {
            notation
                .parse::<DependencyCoordinate>()
                .map_err(|reason| RegistryError::MalformedCoordinate {
                    name: name.to_string(),
                    coordinate: notation.clone(),
                    reason,
                })
        }
        LibraryConfig::Table(table) => {
            let version = pick_version(
                name,
                table.version.as_deref(),
                table.version_ref.as_deref(),
                versions,
            )?;
            DependencyCoordinate::from_module(
                &table.module,
                &version,
                table.classifier.as_deref(),
                table.extension.as_deref(),
            )
            .map_err(|reason| RegistryError::MalformedCoordinate {
                name: name.to_string(),
                coordinate: table.module.clone(),
                reason,
            })
        }
    }
}

fn resolve_plugin(
    name: &str,
    plugin: &PluginConfig,
    versions: &IndexMap<String, String>,
) -> Result<PluginCoordinate, RegistryError> {
    let version = pick_version(
        name,
        plugin.version.as_deref(),
        plugin.version_ref.as_deref(),
        versions,
    )?;
    PluginCoordinate::new(&plugin.id, &version).map_err(|reason| {
        RegistryError::MalformedCoordinate {
            name: name.to_string(),
            coordinate: plugin.id.clone(),
            reason,
        }
    })
}

fn check_unique_artifacts(
    libraries: &IndexMap<String, DependencyCoordinate>,
) -> Result<(), RegistryError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (name, coordinate) in libraries {
        if let Some(first) = seen.insert(&coordinate.artifact_id, name) {
            return Err(RegistryError::DuplicateArtifact {
                artifact_id: coordinate.artifact_id.clone(),
                first: first.to_string(),
                second: name.clone(),
            });
        }
    }
    Ok(())
}
