use crate::cookbook_analysis::domain::NodeReportItem;

/// NodeReport - response DTO of the node aggregation use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReport {
    /// One item per discovered node, sorted by node name
    pub items: Vec<NodeReportItem>,
}

impl NodeReport {
    pub fn new(items: Vec<NodeReportItem>) -> Self {
        Self { items }
    }
}
