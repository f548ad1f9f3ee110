//! Release naming for a module version bump

use std::path::PathBuf;

use serde::Serialize;

use crate::registry::catalog::Registry;
use crate::registry::module::Module;
use crate::registry::publish::PublishIdentity;
use crate::registry::version::VersionTriple;

/// Everything the release process needs to name its artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleasePlan {
    pub module: Module,
    pub previous_version: String,
    pub version: String,
    /// Also used as the tag name, e.g. `sdk-v0.2.57`
    pub release_name: String,
    pub commit_message: String,
    pub release_notes: String,
    pub asset_name: String,
    pub asset_path: PathBuf,
    pub publish_task: String,
    pub publish_identity: PublishIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    Ready(ReleasePlan),
    /// Requested version is not strictly higher than the current one
    NotHigher {
        current: VersionTriple,
        requested: VersionTriple,
    },
}

/// Plan the release of `module` at `requested`
///
/// `upstream_ref` is the branch, tag or commit of the upstream repository
/// the release is built from.
pub fn plan_release(
    registry: &Registry,
    module: Module,
    current: VersionTriple,
    requested: VersionTriple,
    upstream_ref: &str,
) -> PlanOutcome {
    if !requested.is_higher_than(&current) {
        return PlanOutcome::NotHigher { current, requested };
    }

    let settings = registry.release_settings();
    let upstream = settings.upstream_repository.trim_end_matches('/');
    let version = requested.version_name();

    PlanOutcome::Ready(ReleasePlan {
        module,
        previous_version: current.version_name(),
        release_name: format!("{}-v{}", module.as_str(), version),
        commit_message: format!(
            "Bump {} version to {} ({} to {})",
            module.display_name(),
            version,
            repository_name(upstream),
            upstream_ref
        ),
        release_notes: format!("{}/tree/{}", upstream, upstream_ref),
        asset_name: module.asset_name(&settings.asset_prefix),
        asset_path: module.asset_path(),
        publish_task: module.publish_task(),
        publish_identity: PublishIdentity {
            group_id: registry.publish_group_id().to_string(),
            version_name: version.clone(),
        },
        version,
    })
}

/// Last path segment of a repository URL, without `.git`
fn repository_name(url: &str) -> &str {
    let name = url.rsplit('/').next().unwrap_or(url);
    name.strip_suffix(".git").unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::preset::Preset;
    use rstest::rstest;

    #[test]
    fn plan_release_names_artifacts() {
        let registry = Registry::from_preset(Preset::Api34).unwrap();

        let outcome = plan_release(
            &registry,
            Module::Sdk,
            VersionTriple::new(0, 2, 56),
            VersionTriple::new(0, 2, 57),
            "a1b2c3d",
        );

        assert_eq!(
            outcome,
            PlanOutcome::Ready(ReleasePlan {
                module: Module::Sdk,
                previous_version: "0.2.56".to_string(),
                version: "0.2.57".to_string(),
                release_name: "sdk-v0.2.57".to_string(),
                commit_message: "Bump SDK version to 0.2.57 (matrix-rust-sdk to a1b2c3d)"
                    .to_string(),
                release_notes: "https://github.com/matrix-org/matrix-rust-sdk/tree/a1b2c3d"
                    .to_string(),
                asset_name: "matrix-android-sdk.aar".to_string(),
                asset_path: PathBuf::from(
                    "sdk/sdk-android/build/outputs/aar/sdk-android-release.aar"
                ),
                publish_task: ":sdk:sdk-android:publishToSonatype".to_string(),
                publish_identity: PublishIdentity {
                    group_id: "org.matrix.rustcomponents".to_string(),
                    version_name: "0.2.57".to_string(),
                },
            })
        );
    }

    #[rstest]
    #[case(VersionTriple::new(0, 4, 2))]
    #[case(VersionTriple::new(0, 4, 1))]
    #[case(VersionTriple::new(0, 3, 9))]
    fn plan_release_refuses_non_increasing_versions(#[case] requested: VersionTriple) {
        let registry = Registry::from_preset(Preset::Api34).unwrap();
        let current = VersionTriple::new(0, 4, 2);

        let outcome = plan_release(&registry, Module::Crypto, current, requested, "main");

        assert_eq!(outcome, PlanOutcome::NotHigher { current, requested });
    }

    #[rstest]
    #[case("https://github.com/matrix-org/matrix-rust-sdk", "matrix-rust-sdk")]
    #[case("https://github.com/matrix-org/matrix-rust-sdk.git", "matrix-rust-sdk")]
    #[case("matrix-rust-sdk", "matrix-rust-sdk")]
    fn repository_name_takes_last_segment(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(repository_name(url), expected);
    }
}
