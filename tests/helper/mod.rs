//! Project fixture utilities

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use version_registry::config::DEFAULT_CATALOG_FILE;

/// Catalog exercising each library notation form
pub const CUSTOM_CATALOG: &str = r#"
[sdk]
compileSdk = 35
targetSdk = 34
minSdk = 24

[publish]
groupId = "org.example.components"

[modules.sdk]
majorVersion = 1
minorVersion = 0
patchVersion = 3

[modules.crypto]
majorVersion = 0
minorVersion = 9
patchVersion = 0

[versions]
kotlin = "2.0.0"
jna = "5.17.0"

[libraries]
jna = { module = "net.java.dev.jna:jna", versionRef = "jna", extension = "aar" }
okhttp = "com.squareup.okhttp3:okhttp:4.12.0"
natives = { module = "org.example:natives", version = "1.2.0", classifier = "arm64" }

[plugins]
kotlinAndroid = { id = "org.jetbrains.kotlin.android", versionRef = "kotlin" }

[release]
upstreamRepository = "https://github.com/example/rust-sdk.git"
assetPrefix = "example-android"
"#;

/// Temporary project root
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Project with `version-registry.toml` at its root
    pub fn with_catalog(content: &str) -> Self {
        let project = Self::new();
        project.write(DEFAULT_CATALOG_FILE, content);
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, relative: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.dir.path().join(relative)).unwrap()
    }
}
