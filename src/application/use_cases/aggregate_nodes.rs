use crate::application::dto::NodeReport;
use crate::cookbook_analysis::services::NodeResolver;
use crate::ports::outbound::{ProgressReporter, UsageIndex};
use crate::shared::error::ReportError;
use crate::shared::Result;

/// AggregateNodesUseCase - the node aggregation engine
///
/// Emits one `NodeReportItem` for every node the usage index returns.
pub struct AggregateNodesUseCase<U, P> {
    usage_index: U,
    progress_reporter: P,
}

impl<U, P> AggregateNodesUseCase<U, P>
where
    U: UsageIndex,
    P: ProgressReporter,
{
    pub fn new(usage_index: U, progress_reporter: P) -> Self {
        Self {
            usage_index,
            progress_reporter,
        }
    }

    pub async fn execute(&self) -> Result<NodeReport> {
        self.progress_reporter
            .report("🔍 Searching nodes on the Chef Infra Server...");

        let raw_nodes =
            self.usage_index
                .all_nodes()
                .await
                .map_err(|e| ReportError::NodeSearchFailed {
                    details: format!("{:#}", e),
                })?;

        let items = NodeResolver::resolve_all(raw_nodes);
        self.progress_reporter
            .report_completion(&format!("✅ Found {} node(s)", items.len()));
        Ok(NodeReport::new(items))
    }
}
