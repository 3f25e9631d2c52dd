use crate::cookbook_analysis::domain::{NodeRaw, NodeReportItem, UNKNOWN_PLACEHOLDER};
use serde_json::Value;

/// NodeResolver turns raw node search payloads into report rows
///
/// Resolution is best-effort: a node is never dropped because some of its
/// attributes are missing or have an unexpected shape. Such values are
/// replaced by [`UNKNOWN_PLACEHOLDER`].
pub struct NodeResolver;

impl NodeResolver {
    /// Resolves every node and orders the rows by node name
    pub fn resolve_all(raw_nodes: Vec<NodeRaw>) -> Vec<NodeReportItem> {
        let mut items: Vec<NodeReportItem> = raw_nodes.iter().map(Self::resolve).collect();
        items.sort_by(|a, b| a.node_name().cmp(b.node_name()));
        items
    }

    pub fn resolve(raw: &NodeRaw) -> NodeReportItem {
        NodeReportItem::new(
            Self::string_or_placeholder(raw.name.as_ref()),
            Self::string_or_placeholder(raw.chef_version.as_ref()),
            Self::platform(raw),
            Self::cookbooks(raw.cookbooks.as_ref()),
        )
    }

    fn non_empty_str(value: Option<&Value>) -> Option<&str> {
        value
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn string_or_placeholder(value: Option<&Value>) -> String {
        Self::non_empty_str(value)
            .unwrap_or(UNKNOWN_PLACEHOLDER)
            .to_string()
    }

    /// "os version", or just the os when the version is unknown
    fn platform(raw: &NodeRaw) -> String {
        match (
            Self::non_empty_str(raw.os.as_ref()),
            Self::non_empty_str(raw.os_version.as_ref()),
        ) {
            (Some(os), Some(version)) => format!("{} {}", os, version),
            (Some(os), None) => os.to_string(),
            (None, _) => UNKNOWN_PLACEHOLDER.to_string(),
        }
    }

    /// Cookbooks applied on the node's last run, as `name(version)` sorted by name
    ///
    /// The attribute is a map of cookbook name to `{"version": "x.y.z"}`.
    /// Entries whose version can't be read are listed by name only.
    fn cookbooks(value: Option<&Value>) -> Vec<String> {
        let Some(map) = value.and_then(Value::as_object) else {
            return Vec::new();
        };

        let mut cookbooks: Vec<String> = map
            .iter()
            .map(|(name, details)| {
                match Self::non_empty_str(details.get("version")) {
                    Some(version) => format!("{}({})", name, version),
                    None => name.clone(),
                }
            })
            .collect();
        cookbooks.sort();
        cookbooks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> NodeRaw {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_resolve_complete_node() {
        let item = NodeResolver::resolve(&raw(json!({
            "name": "web01.example.com",
            "chef_version": "17.10.0",
            "os": "ubuntu",
            "os_version": "22.04",
            "cookbooks": {
                "ntp": {"version": "3.1.0"},
                "apache2": {"version": "1.0.0"}
            }
        })));

        assert_eq!(item.node_name(), "web01.example.com");
        assert_eq!(item.tooling_version(), "17.10.0");
        assert_eq!(item.platform(), "ubuntu 22.04");
        assert_eq!(item.cookbooks(), &["apache2(1.0.0)", "ntp(3.1.0)"]);
    }

    #[test]
    fn test_resolve_empty_node_uses_placeholders() {
        let item = NodeResolver::resolve(&NodeRaw::default());
        assert_eq!(item.node_name(), UNKNOWN_PLACEHOLDER);
        assert_eq!(item.tooling_version(), UNKNOWN_PLACEHOLDER);
        assert_eq!(item.platform(), UNKNOWN_PLACEHOLDER);
        assert!(item.cookbooks().is_empty());
    }

    #[test]
    fn test_resolve_malformed_values() {
        let item = NodeResolver::resolve(&raw(json!({
            "name": "db01",
            "chef_version": 17,
            "os": ["linux"],
            "os_version": "8",
            "cookbooks": "apache2"
        })));

        assert_eq!(item.node_name(), "db01");
        assert_eq!(item.tooling_version(), UNKNOWN_PLACEHOLDER);
        assert_eq!(item.platform(), UNKNOWN_PLACEHOLDER);
        assert!(item.cookbooks().is_empty());
    }

    #[test]
    fn test_resolve_os_without_version() {
        let item = NodeResolver::resolve(&raw(json!({"name": "win01", "os": "windows"})));
        assert_eq!(item.platform(), "windows");
    }

    #[test]
    fn test_resolve_cookbook_without_version() {
        let item = NodeResolver::resolve(&raw(json!({
            "name": "web02",
            "cookbooks": {"apache2": {}, "ntp": {"version": 3}, "mysql": {"version": "8.0.0"}}
        })));
        assert_eq!(item.cookbooks(), &["apache2", "mysql(8.0.0)", "ntp"]);
    }

    #[test]
    fn test_resolve_blank_name_is_placeholder() {
        let item = NodeResolver::resolve(&raw(json!({"name": "   "})));
        assert_eq!(item.node_name(), UNKNOWN_PLACEHOLDER);
    }

    #[test]
    fn test_resolve_all_sorts_and_keeps_every_node() {
        let items = NodeResolver::resolve_all(vec![
            raw(json!({"name": "web02"})),
            NodeRaw::default(),
            raw(json!({"name": "app01"})),
        ]);
        let names: Vec<&str> = items.iter().map(|i| i.node_name()).collect();
        assert_eq!(names, vec!["app01", UNKNOWN_PLACEHOLDER, "web02"]);
    }
}
