use std::cmp::Ordering;

use semver::Version;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "1" or "4.12" by padding with zeros.
/// A leading 'v' is stripped.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "4.12" -> Version(4, 12, 0)
/// - "v1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.strip_prefix('v').unwrap_or(version);
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Compare two version strings semantically
///
/// Returns None if either side is not a valid (possibly partial) version.
pub fn compare_versions(old: &str, new: &str) -> Option<Ordering> {
    let old = parse_version(old)?;
    let new = parse_version(new)?;
    Some(new.cmp(&old))
}
