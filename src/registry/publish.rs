use serde::Serialize;

/// Group and version a module is published under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishIdentity {
    pub group_id: String,
    pub version_name: String,
}

impl std::fmt::Display for PublishIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.group_id, self.version_name)
    }
}
