//! Module version bumps and release naming
//!
//! - [`version_file`]: Reads and rewrites a module's version file
//! - [`plan`]: Computes release names for a bump
//! - [`error`]: Error types for version file access

pub mod error;
pub mod plan;
pub mod version_file;

use std::path::Path;

use tracing::{info, warn};

use crate::registry::catalog::Registry;
use crate::registry::module::Module;
use crate::registry::version::VersionTriple;
use crate::release::error::ReleaseError;
use crate::release::plan::{PlanOutcome, plan_release};
use crate::release::version_file::VersionFileEditor;

pub use plan::ReleasePlan;

/// A requested version bump
#[derive(Debug, Clone)]
pub struct BumpRequest<'a> {
    pub module: Module,
    pub version: VersionTriple,
    pub upstream_ref: &'a str,
    /// Compute the plan without touching the version file
    pub dry_run: bool,
}

/// Version currently declared in the module's version file under `root`
pub fn current_version(
    editor: &VersionFileEditor,
    root: &Path,
    module: Module,
) -> Result<VersionTriple, ReleaseError> {
    editor.read(&root.join(module.version_file()))
}

/// Create the module's version file under `root` from the registry's module version
pub fn init_version_file(
    editor: &VersionFileEditor,
    registry: &Registry,
    root: &Path,
    module: Module,
) -> Result<VersionTriple, ReleaseError> {
    let relative = module.version_file();
    let object_name = relative
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("BuildVersions");
    let version = registry.module_version(module);

    editor.create(&root.join(&relative), object_name, version)?;
    Ok(version)
}

/// Check the requested version against the module's version file and
/// rewrite the file when it is strictly higher
pub fn bump(
    editor: &VersionFileEditor,
    registry: &Registry,
    root: &Path,
    request: &BumpRequest<'_>,
) -> Result<PlanOutcome, ReleaseError> {
    let path = root.join(request.module.version_file());
    let current = editor.read(&path)?;

    let outcome = plan_release(
        registry,
        request.module,
        current,
        request.version,
        request.upstream_ref,
    );

    match &outcome {
        PlanOutcome::NotHigher { current, requested } => {
            warn!(
                "The provided version ({}) is not higher than the previous version ({}), bump the version before retrying",
                requested, current
            );
        }
        PlanOutcome::Ready(plan) if request.dry_run => {
            info!("Dry run: {} would move {} -> {}", plan.module, current, plan.version);
        }
        PlanOutcome::Ready(_) => {
            editor.write(&path, request.version)?;
        }
    }

    Ok(outcome)
}
