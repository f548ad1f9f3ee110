//! Comparison of two registry revisions
//!
//! Reports what changed between two registries (e.g. two presets). Nothing
//! is merged or migrated.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::registry::catalog::Registry;
use crate::registry::module::Module;
use crate::registry::semver::compare_versions;

/// Registry section a change belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Sdk,
    Module,
    Version,
    Library,
    Plugin,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Sdk => "sdk",
            Section::Module => "module",
            Section::Version => "version",
            Section::Library => "library",
            Section::Plugin => "plugin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Added,
    Removed,
    Upgraded,
    Downgraded,
    /// Identity changed or versions are not comparable
    Changed,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Added => "added",
            Direction::Removed => "removed",
            Direction::Upgraded => "upgraded",
            Direction::Downgraded => "downgraded",
            Direction::Changed => "changed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub section: Section,
    pub name: String,
    pub old: Option<String>,
    pub new: Option<String>,
    pub direction: Direction,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} -> {} ({})",
            self.section.as_str(),
            self.name,
            self.old.as_deref().unwrap_or("-"),
            self.new.as_deref().unwrap_or("-"),
            self.direction.as_str()
        )
    }
}

/// Flattened view of one named entry
struct Entry {
    /// Full rendering, used to detect any change
    display: String,
    /// Everything except the version
    identity: String,
    version: String,
}

/// List every value that differs between `old` and `new`
pub fn diff(old: &Registry, new: &Registry) -> Vec<Change> {
    let mut changes = Vec::new();

    let (old_sdk, new_sdk) = (old.resolve_sdk_bounds(), new.resolve_sdk_bounds());
    for (name, before, after) in [
        ("compileSdk", old_sdk.compile_sdk(), new_sdk.compile_sdk()),
        ("targetSdk", old_sdk.target_sdk(), new_sdk.target_sdk()),
        ("minSdk", old_sdk.min_sdk(), new_sdk.min_sdk()),
    ] {
        let direction = match after.cmp(&before) {
            Ordering::Equal => continue,
            Ordering::Greater => Direction::Upgraded,
            Ordering::Less => Direction::Downgraded,
        };
        changes.push(Change {
            section: Section::Sdk,
            name: name.to_string(),
            old: Some(before.to_string()),
            new: Some(after.to_string()),
            direction,
        });
    }

    let modules = |registry: &Registry| -> IndexMap<String, Entry> {
        Module::ALL
            .iter()
            .map(|module| {
                let version = registry.resolve_version_name(*module);
                (module.as_str().to_string(), plain_entry(version))
            })
            .collect()
    };
    diff_section(Section::Module, &modules(old), &modules(new), &mut changes);

    let versions = |registry: &Registry| -> IndexMap<String, Entry> {
        registry
            .versions()
            .map(|(name, version)| (name.to_string(), plain_entry(version.to_string())))
            .collect()
    };
    diff_section(Section::Version, &versions(old), &versions(new), &mut changes);

    let libraries = |registry: &Registry| -> IndexMap<String, Entry> {
        registry
            .libraries()
            .map(|(name, coordinate)| {
                let mut identity = coordinate.module();
                if let Some(classifier) = &coordinate.classifier {
                    identity.push(':');
                    identity.push_str(classifier);
                }
                if let Some(extension) = &coordinate.extension {
                    identity.push('@');
                    identity.push_str(extension);
                }
                let entry = Entry {
                    display: coordinate.to_string(),
                    identity,
                    version: coordinate.version.clone(),
                };
                (name.to_string(), entry)
            })
            .collect()
    };
    diff_section(
        Section::Library,
        &libraries(old),
        &libraries(new),
        &mut changes,
    );

    let plugins = |registry: &Registry| -> IndexMap<String, Entry> {
        registry
            .plugins()
            .map(|(name, plugin)| {
                let entry = Entry {
                    display: plugin.to_string(),
                    identity: plugin.id.clone(),
                    version: plugin.version.clone(),
                };
                (name.to_string(), entry)
            })
            .collect()
    };
    diff_section(Section::Plugin, &plugins(old), &plugins(new), &mut changes);

    changes
}

fn plain_entry(version: String) -> Entry {
    Entry {
        display: version.clone(),
        identity: String::new(),
        version,
    }
}

fn diff_section(
    section: Section,
    old: &IndexMap<String, Entry>,
    new: &IndexMap<String, Entry>,
    changes: &mut Vec<Change>,
) {
    for (name, before) in old {
        let Some(after) = new.get(name) else {
            changes.push(Change {
                section,
                name: name.clone(),
                old: Some(before.display.clone()),
                new: None,
                direction: Direction::Removed,
            });
            continue;
        };

        if before.display == after.display {
            continue;
        }

        let direction = if before.identity == after.identity {
            match compare_versions(&before.version, &after.version) {
                Some(Ordering::Greater) => Direction::Upgraded,
                Some(Ordering::Less) => Direction::Downgraded,
                _ => Direction::Changed,
            }
        } else {
            Direction::Changed
        };

        changes.push(Change {
            section,
            name: name.clone(),
            old: Some(before.display.clone()),
            new: Some(after.display.clone()),
            direction,
        });
    }

    for (name, after) in new {
        if !old.contains_key(name) {
            changes.push(Change {
                section,
                name: name.clone(),
                old: None,
                new: Some(after.display.clone()),
                direction: Direction::Added,
            });
        }
    }
}
