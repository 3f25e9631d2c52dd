use serde::Deserialize;
use serde_json::Value;

/// Placeholder shown for node values that are missing or malformed
pub const UNKNOWN_PLACEHOLDER: &str = "unknown";

/// Raw attribute payload of one node as returned by the search service
///
/// Every field is kept as untyped JSON because node data is reported by the
/// nodes themselves and is frequently partial or malformed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NodeRaw {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub chef_version: Option<Value>,
    #[serde(default)]
    pub os: Option<Value>,
    #[serde(default)]
    pub os_version: Option<Value>,
    #[serde(default)]
    pub cookbooks: Option<Value>,
}

/// One row of the node inventory report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReportItem {
    node_name: String,
    tooling_version: String,
    platform: String,
    cookbooks: Vec<String>,
}

impl NodeReportItem {
    pub fn new(
        node_name: String,
        tooling_version: String,
        platform: String,
        cookbooks: Vec<String>,
    ) -> Self {
        Self {
            node_name,
            tooling_version,
            platform,
            cookbooks,
        }
    }

    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    pub fn tooling_version(&self) -> &str {
        &self.tooling_version
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn cookbooks(&self) -> &[String] {
        &self.cookbooks
    }

    /// Cells of the fixed-width table row
    pub fn to_row(&self) -> [String; 4] {
        let cookbooks = if self.cookbooks.is_empty() {
            "none".to_string()
        } else {
            self.cookbooks.join(" ")
        };
        [
            self.node_name.clone(),
            self.tooling_version.clone(),
            self.platform.clone(),
            cookbooks,
        ]
    }
}
