use async_trait::async_trait;
use cookbook_audit::prelude::*;
use std::collections::HashMap;

/// Mock UsageIndex keyed by `name (version)`
#[derive(Clone, Default)]
pub struct MockUsageIndex {
    usage: HashMap<String, Vec<String>>,
    lookup_errors: HashMap<String, String>,
    nodes: Vec<serde_json::Value>,
    search_error: Option<String>,
}

impl MockUsageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_usage(mut self, name: &str, version: &str, nodes: &[&str]) -> Self {
        self.usage.insert(
            format!("{} ({})", name, version),
            nodes.iter().map(|n| n.to_string()).collect(),
        );
        self
    }

    pub fn with_lookup_error(mut self, name: &str, version: &str, message: &str) -> Self {
        self.lookup_errors
            .insert(format!("{} ({})", name, version), message.to_string());
        self
    }

    /// Adds a raw node payload as returned by node search
    pub fn with_node(mut self, node: serde_json::Value) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_search_error(mut self, message: &str) -> Self {
        self.search_error = Some(message.to_string());
        self
    }
}

#[async_trait]
impl UsageIndex for MockUsageIndex {
    async fn nodes_using(&self, cookbook: &CookbookVersionRef) -> Result<Vec<String>> {
        let key = cookbook.to_string();
        if let Some(message) = self.lookup_errors.get(&key) {
            anyhow::bail!("{}", message);
        }
        Ok(self.usage.get(&key).cloned().unwrap_or_default())
    }

    async fn all_nodes(&self) -> Result<Vec<NodeRaw>> {
        if let Some(message) = &self.search_error {
            anyhow::bail!("{}", message);
        }
        self.nodes
            .iter()
            .map(|node| Ok(serde_json::from_value(node.clone())?))
            .collect()
    }
}
