//! Platform API level bounds

use serde::Serialize;

use crate::registry::error::RegistryError;

/// Compile, target and minimum SDK levels
///
/// Only constructible through [`SdkBounds::new`], which enforces
/// `min_sdk <= target_sdk <= compile_sdk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkBounds {
    compile_sdk: u32,
    target_sdk: u32,
    min_sdk: u32,
}

impl SdkBounds {
    pub fn new(compile_sdk: u32, target_sdk: u32, min_sdk: u32) -> Result<Self, RegistryError> {
        if min_sdk > target_sdk || target_sdk > compile_sdk {
            return Err(RegistryError::InvalidSdkBounds {
                compile_sdk,
                target_sdk,
                min_sdk,
            });
        }

        Ok(Self {
            compile_sdk,
            target_sdk,
            min_sdk,
        })
    }

    pub fn compile_sdk(&self) -> u32 {
        self.compile_sdk
    }

    pub fn target_sdk(&self) -> u32 {
        self.target_sdk
    }

    pub fn min_sdk(&self) -> u32 {
        self.min_sdk
    }
}
