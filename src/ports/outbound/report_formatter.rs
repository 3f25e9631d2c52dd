use crate::application::dto::{CookbookReport, NodeReport};
use crate::shared::Result;

/// CookbookReportFormatter port for rendering cookbook reports
///
/// Implementations decide layout (summary or detailed, text or CSV) and
/// honour the report's skip-unused setting.
pub trait CookbookReportFormatter {
    /// Renders the displayed records of `report`
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn format(&self, report: &CookbookReport) -> Result<String>;
}

/// NodeReportFormatter port for rendering the node inventory
pub trait NodeReportFormatter {
    fn format(&self, report: &NodeReport) -> Result<String>;
}
