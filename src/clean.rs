//! Removal of the build output directory

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("Refusing to clean {0:?}: build directory must be relative and stay inside the project root")]
    UnsafeBuildDir(PathBuf),

    #[error("Failed to remove {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanOutcome {
    Removed(PathBuf),
    NothingToClean(PathBuf),
}

/// Delete `<root>/<build_dir>` and everything below it
pub fn clean(root: &Path, build_dir: &Path) -> Result<CleanOutcome, CleanError> {
    let stays_inside = build_dir.components().all(|c| matches!(c, Component::Normal(_)))
        && build_dir.components().next().is_some();
    if !stays_inside {
        return Err(CleanError::UnsafeBuildDir(build_dir.to_path_buf()));
    }

    let target = root.join(build_dir);
    if !target.exists() {
        debug!("Nothing to clean at {:?}", target);
        return Ok(CleanOutcome::NothingToClean(target));
    }

    std::fs::remove_dir_all(&target).map_err(|source| CleanError::Io {
        path: target.clone(),
        source,
    })?;
    info!("Removed {:?}", target);
    Ok(CleanOutcome::Removed(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn clean_removes_build_dir_recursively() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("build/outputs/aar");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("sdk-android-release.aar"), b"aar").unwrap();

        let outcome = clean(temp_dir.path(), Path::new("build")).unwrap();

        assert_eq!(outcome, CleanOutcome::Removed(temp_dir.path().join("build")));
        assert!(!temp_dir.path().join("build").exists());
    }

    #[test]
    fn clean_without_build_dir_is_a_no_op() {
        let temp_dir = TempDir::new().unwrap();

        let outcome = clean(temp_dir.path(), Path::new("build")).unwrap();

        assert_eq!(
            outcome,
            CleanOutcome::NothingToClean(temp_dir.path().join("build"))
        );
    }

    #[test]
    fn clean_keeps_sibling_directories() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("build")).unwrap();
        std::fs::create_dir_all(temp_dir.path().join("buildSrc")).unwrap();

        clean(temp_dir.path(), Path::new("build")).unwrap();

        assert!(temp_dir.path().join("buildSrc").exists());
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("..")]
    #[case("build/../..")]
    #[case("/tmp/build")]
    fn clean_rejects_dirs_outside_root(#[case] build_dir: &str) {
        let temp_dir = TempDir::new().unwrap();

        assert!(matches!(
            clean(temp_dir.path(), Path::new(build_dir)),
            Err(CleanError::UnsafeBuildDir(_))
        ));
    }
}
