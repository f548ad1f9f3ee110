//! Dependency and plugin coordinates
//!
//! Dependency notation: `group:artifact:version[:classifier][@extension]`
//! (e.g. `net.java.dev.jna:jna:5.17.0@aar`).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Reason a coordinate notation was rejected
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("missing {0} segment")]
    MissingSegment(&'static str),

    #[error("empty {0} segment")]
    EmptySegment(&'static str),

    #[error("whitespace in {0} segment")]
    Whitespace(&'static str),

    #[error("separator ':' or '@' in {0} segment")]
    Separator(&'static str),

    #[error("too many segments")]
    TooManySegments,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl DependencyCoordinate {
    /// Build a coordinate from a `group:artifact` module and separate parts
    pub fn from_module(
        module: &str,
        version: &str,
        classifier: Option<&str>,
        extension: Option<&str>,
    ) -> Result<Self, CoordinateError> {
        let mut segments = module.split(':');
        let group_id = segments.next().unwrap_or_default();
        let artifact_id = segments
            .next()
            .ok_or(CoordinateError::MissingSegment("artifact"))?;
        if segments.next().is_some() {
            return Err(CoordinateError::TooManySegments);
        }

        Self::validated(group_id, artifact_id, version, classifier, extension)
    }

    fn validated(
        group_id: &str,
        artifact_id: &str,
        version: &str,
        classifier: Option<&str>,
        extension: Option<&str>,
    ) -> Result<Self, CoordinateError> {
        check_segment("group", group_id)?;
        check_segment("artifact", artifact_id)?;
        check_segment("version", version)?;
        if let Some(classifier) = classifier {
            check_segment("classifier", classifier)?;
        }
        if let Some(extension) = extension {
            check_segment("extension", extension)?;
        }

        Ok(Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            classifier: classifier.map(str::to_string),
            extension: extension.map(str::to_string),
        })
    }

    /// `group:artifact` part of the coordinate
    pub fn module(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

fn check_segment(segment: &'static str, value: &str) -> Result<(), CoordinateError> {
    if value.is_empty() {
        return Err(CoordinateError::EmptySegment(segment));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(CoordinateError::Whitespace(segment));
    }
    if value.contains([':', '@']) {
        return Err(CoordinateError::Separator(segment));
    }
    Ok(())
}

impl FromStr for DependencyCoordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (body, extension) = match s.split_once('@') {
            Some((body, extension)) => {
                if extension.contains('@') {
                    return Err(CoordinateError::TooManySegments);
                }
                (body, Some(extension))
            }
            None => (s, None),
        };

        let segments: Vec<&str> = body.split(':').collect();
        match segments.as_slice() {
            [group, artifact, version] => {
                Self::validated(group, artifact, version, None, extension)
            }
            [group, artifact, version, classifier] => {
                Self::validated(group, artifact, version, Some(classifier), extension)
            }
            [_] => Err(CoordinateError::MissingSegment("artifact")),
            [_, _] => Err(CoordinateError::MissingSegment("version")),
            _ => Err(CoordinateError::TooManySegments),
        }
    }
}

impl fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        if let Some(extension) = &self.extension {
            write!(f, "@{}", extension)?;
        }
        Ok(())
    }
}

/// Build plugin identifier and version (e.g. `com.android.library` 8.2.2)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PluginCoordinate {
    pub id: String,
    pub version: String,
}

impl PluginCoordinate {
    pub fn new(id: &str, version: &str) -> Result<Self, CoordinateError> {
        check_segment("id", id)?;
        check_segment("version", version)?;
        Ok(Self {
            id: id.to_string(),
            version: version.to_string(),
        })
    }
}

impl fmt::Display for PluginCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.version)
    }
}
