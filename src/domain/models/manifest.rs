use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a completed export job-status response.
///
/// Fields this service does not interpret (`transactionTime`, `request`,
/// `error`, ...) are kept in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportManifest {
    #[serde(default)]
    pub requires_access_token: bool,
    pub output: Vec<OutputEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One file listed in an export manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEntry {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExportManifest {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl OutputEntry {
    pub fn new(resource_type: impl Into<String>, url: impl Into<String>, count: u64) -> Self {
        Self {
            resource_type: resource_type.into(),
            url: url.into(),
            count: Some(count),
            extra: Map::new(),
        }
    }
}
