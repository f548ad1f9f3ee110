//! Module version file reader and rewriter
//!
//! The build orchestrator reads a module's version from a source file
//! declaring three integer constants:
//!
//! ```text
//! object BuildVersionsSDK {
//!     const val majorVersion = 0
//!     const val minorVersion = 2
//!     const val patchVersion = 56
//! }
//! ```
//!
//! Only the `<key> = <digits>` assignments are touched; the rest of the
//! file is preserved byte for byte.

use std::path::Path;

use regex::Regex;
use tracing::{debug, info};

use crate::registry::version::VersionTriple;
use crate::release::error::ReleaseError;

const KEYS: [&str; 3] = ["majorVersion", "minorVersion", "patchVersion"];

/// Reads and rewrites version files
pub struct VersionFileEditor {
    /// One regex per key, capturing `<key> = ` and the digits
    key_res: [Regex; 3],
}

impl VersionFileEditor {
    pub fn new() -> Self {
        Self {
            key_res: KEYS.map(|key| Regex::new(&format!(r"\b({}\s*=\s*)(\d+)", key)).unwrap()),
        }
    }

    /// Extract the version declared in `content`
    pub fn parse(&self, path: &Path, content: &str) -> Result<VersionTriple, ReleaseError> {
        let mut values = [0u64; 3];

        for ((key, re), value) in KEYS.into_iter().zip(&self.key_res).zip(values.iter_mut()) {
            let caps = re.captures(content).ok_or_else(|| ReleaseError::MissingKey {
                path: path.to_path_buf(),
                key,
            })?;
            let digits = &caps[2];
            *value = digits.parse().map_err(|_| ReleaseError::InvalidValue {
                path: path.to_path_buf(),
                key,
                value: digits.to_string(),
            })?;
        }

        let [major, minor, patch] = values;
        Ok(VersionTriple::new(major, minor, patch))
    }

    /// Return `content` with every key assignment set to `version`
    ///
    /// Fails without producing output if any key is missing.
    pub fn rewrite(
        &self,
        path: &Path,
        content: &str,
        version: VersionTriple,
    ) -> Result<String, ReleaseError> {
        if let Some(key) = KEYS
            .into_iter()
            .zip(&self.key_res)
            .find_map(|(key, re)| (!re.is_match(content)).then_some(key))
        {
            return Err(ReleaseError::MissingKey {
                path: path.to_path_buf(),
                key,
            });
        }

        let values = [
            version.major_version,
            version.minor_version,
            version.patch_version,
        ];
        let mut rewritten = content.to_string();
        for (re, value) in self.key_res.iter().zip(values) {
            rewritten = re
                .replace_all(&rewritten, format!("${{1}}{}", value))
                .into_owned();
        }
        Ok(rewritten)
    }

    /// Source of a fresh version file declaring `object <object_name>`
    pub fn render(&self, object_name: &str, version: VersionTriple) -> String {
        format!(
            "object {} {{\n    const val majorVersion = {}\n    const val minorVersion = {}\n    const val patchVersion = {}\n}}\n",
            object_name, version.major_version, version.minor_version, version.patch_version
        )
    }

    pub fn read(&self, path: &Path) -> Result<VersionTriple, ReleaseError> {
        debug!("Reading version file {:?}", path);
        let content = read_to_string(path)?;
        self.parse(path, &content)
    }

    pub fn write(&self, path: &Path, version: VersionTriple) -> Result<(), ReleaseError> {
        let content = read_to_string(path)?;
        let rewritten = self.rewrite(path, &content, version)?;
        write_string(path, &rewritten)?;
        info!("Set {:?} to {}", path, version);
        Ok(())
    }

    /// Create a version file; refuses to overwrite an existing one
    pub fn create(
        &self,
        path: &Path,
        object_name: &str,
        version: VersionTriple,
    ) -> Result<(), ReleaseError> {
        if path.exists() {
            return Err(ReleaseError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ReleaseError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        write_string(path, &self.render(object_name, version))?;
        info!("Created {:?} at {}", path, version);
        Ok(())
    }
}

impl Default for VersionFileEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn read_to_string(path: &Path) -> Result<String, ReleaseError> {
    std::fs::read_to_string(path).map_err(|source| ReleaseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_string(path: &Path, content: &str) -> Result<(), ReleaseError> {
    std::fs::write(path, content).map_err(|source| ReleaseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    const SDK_FILE: &str = r#"object BuildVersionsSDK {
    const val majorVersion = 0
    const val minorVersion = 2
    const val patchVersion = 56
}
"#;

    fn path() -> &'static Path {
        Path::new("BuildVersionsSDK.kt")
    }

    #[test]
    fn parse_reads_all_three_keys() {
        let editor = VersionFileEditor::new();

        assert_eq!(
            editor.parse(path(), SDK_FILE).unwrap(),
            VersionTriple::new(0, 2, 56)
        );
    }

    #[test]
    fn parse_tolerates_missing_whitespace() {
        let editor = VersionFileEditor::new();
        let content = "majorVersion=1\nminorVersion =2\npatchVersion= 3\n";

        assert_eq!(
            editor.parse(path(), content).unwrap(),
            VersionTriple::new(1, 2, 3)
        );
    }

    #[rstest]
    #[case("minorVersion = 1\npatchVersion = 2\n", "majorVersion")]
    #[case("majorVersion = 1\npatchVersion = 2\n", "minorVersion")]
    #[case("majorVersion = 1\nminorVersion = 2\n", "patchVersion")]
    fn parse_reports_first_missing_key(#[case] content: &str, #[case] expected: &str) {
        let editor = VersionFileEditor::new();

        let err = editor.parse(path(), content).unwrap_err();

        assert!(matches!(err, ReleaseError::MissingKey { key, .. } if key == expected));
    }

    #[test]
    fn parse_rejects_values_out_of_range() {
        let editor = VersionFileEditor::new();
        let content =
            "majorVersion = 99999999999999999999\nminorVersion = 0\npatchVersion = 0\n";

        assert!(matches!(
            editor.parse(path(), content),
            Err(ReleaseError::InvalidValue {
                key: "majorVersion",
                ..
            })
        ));
    }

    #[test]
    fn rewrite_replaces_values_and_preserves_layout() {
        let editor = VersionFileEditor::new();

        let rewritten = editor
            .rewrite(path(), SDK_FILE, VersionTriple::new(1, 0, 10))
            .unwrap();

        assert_eq!(
            rewritten,
            r#"object BuildVersionsSDK {
    const val majorVersion = 1
    const val minorVersion = 0
    const val patchVersion = 10
}
"#
        );
    }

    #[test]
    fn rewrite_fails_when_a_key_is_missing() {
        let editor = VersionFileEditor::new();

        let err = editor
            .rewrite(
                path(),
                "majorVersion = 0\nminorVersion = 1\n",
                VersionTriple::new(0, 2, 0),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            ReleaseError::MissingKey {
                key: "patchVersion",
                ..
            }
        ));
    }

    #[test]
    fn render_produces_parseable_file() {
        let editor = VersionFileEditor::new();
        let version = VersionTriple::new(0, 4, 2);

        let content = editor.render("BuildVersionsCrypto", version);

        assert!(content.starts_with("object BuildVersionsCrypto {\n"));
        assert_eq!(editor.parse(path(), &content).unwrap(), version);
    }

    #[test]
    fn write_updates_file_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("BuildVersionsSDK.kt");
        std::fs::write(&file, SDK_FILE).unwrap();
        let editor = VersionFileEditor::new();

        editor.write(&file, VersionTriple::new(0, 3, 0)).unwrap();

        assert_eq!(editor.read(&file).unwrap(), VersionTriple::new(0, 3, 0));
    }

    #[test]
    fn write_leaves_file_untouched_when_key_missing() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("BuildVersionsSDK.kt");
        std::fs::write(&file, "majorVersion = 0\n").unwrap();
        let editor = VersionFileEditor::new();

        assert!(editor.write(&file, VersionTriple::new(0, 3, 0)).is_err());
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "majorVersion = 0\n"
        );
    }

    #[test]
    fn create_makes_parent_dirs_and_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("buildSrc/src/main/kotlin/BuildVersionsSDK.kt");
        let editor = VersionFileEditor::new();

        editor
            .create(&file, "BuildVersionsSDK", VersionTriple::new(0, 1, 0))
            .unwrap();
        assert_eq!(editor.read(&file).unwrap(), VersionTriple::new(0, 1, 0));

        assert!(matches!(
            editor.create(&file, "BuildVersionsSDK", VersionTriple::new(0, 2, 0)),
            Err(ReleaseError::AlreadyExists(_))
        ));
    }

    #[test]
    fn read_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let editor = VersionFileEditor::new();

        assert!(matches!(
            editor.read(&temp_dir.path().join("missing.kt")),
            Err(ReleaseError::Io { .. })
        ));
    }
}
