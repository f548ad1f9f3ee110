//! Module version triple

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::registry::error::VersionError;

/// A `major.minor.patch` module version
///
/// Field order makes the derived `Ord` match semantic ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VersionTriple {
    pub major_version: u64,
    pub minor_version: u64,
    pub patch_version: u64,
}

impl VersionTriple {
    pub const fn new(major_version: u64, minor_version: u64, patch_version: u64) -> Self {
        Self {
            major_version,
            minor_version,
            patch_version,
        }
    }

    /// Dotted version name, e.g. `0.2.56`
    pub fn version_name(&self) -> String {
        self.to_string()
    }

    /// Returns true if `self` is strictly newer than `other`
    pub fn is_higher_than(&self, other: &VersionTriple) -> bool {
        self > other
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.major_version, self.minor_version, self.patch_version
        )
    }
}

impl FromStr for VersionTriple {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || VersionError::Malformed(s.to_string());

        let parts: Vec<&str> = s.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(malformed());
        };

        let component = |part: &str| -> Result<u64, VersionError> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            part.parse::<u64>().map_err(|_| malformed())
        };

        Ok(Self::new(
            component(major)?,
            component(minor)?,
            component(patch)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 0, "0.0.0")]
    #[case(1, 2, 3, "1.2.3")]
    #[case(0, 2, 56, "0.2.56")]
    #[case(10, 0, 100, "10.0.100")]
    fn version_name_joins_components_with_dots(
        #[case] major: u64,
        #[case] minor: u64,
        #[case] patch: u64,
        #[case] expected: &str,
    ) {
        assert_eq!(
            VersionTriple::new(major, minor, patch).version_name(),
            expected
        );
    }

    #[test]
    fn from_str_accepts_leading_zeros() {
        assert_eq!(
            "01.2.03".parse::<VersionTriple>(),
            Ok(VersionTriple::new(1, 2, 3))
        );
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case("1.2")]
    #[case("1.2.3.4")]
    #[case("v1.2.3")]
    #[case("1.2.x")]
    #[case("1..3")]
    #[case("+1.2.3")]
    #[case("1.2.3-beta")]
    #[case("99999999999999999999.0.0")]
    fn from_str_rejects_malformed_versions(#[case] input: &str) {
        assert_eq!(
            input.parse::<VersionTriple>(),
            Err(VersionError::Malformed(input.to_string()))
        );
    }

    #[rstest]
    #[case("1.2.4", "1.2.3", true)]
    #[case("1.3.0", "1.2.9", true)]
    #[case("2.0.0", "1.9.9", true)]
    #[case("1.2.3", "1.2.3", false)]
    #[case("1.2.2", "1.2.3", false)]
    #[case("0.9.9", "1.0.0", false)]
    fn is_higher_than_orders_by_major_minor_patch(
        #[case] candidate: &str,
        #[case] current: &str,
        #[case] expected: bool,
    ) {
        let candidate: VersionTriple = candidate.parse().unwrap();
        let current: VersionTriple = current.parse().unwrap();
        assert_eq!(candidate.is_higher_than(&current), expected);
    }
}
