use crate::cookbook_analysis::domain::{CookbookRecord, ErrorSummary};

/// CookbookReport - response DTO of the cookbook aggregation use case
///
/// Holds every record the run produced, sorted by name then version, plus
/// the grouped stage failures. Unused records are kept even when
/// `skip_unused` is set; [`CookbookReport::displayed_records`] applies the
/// filter for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookbookReport {
    pub records: Vec<CookbookRecord>,
    pub error_summary: ErrorSummary,
    pub skip_unused: bool,
}

impl CookbookReport {
    pub fn new(mut records: Vec<CookbookRecord>, skip_unused: bool) -> Self {
        records.sort_by(|a, b| a.cookbook().cmp(b.cookbook()));
        let error_summary = ErrorSummary::from_records(&records);
        Self {
            records,
            error_summary,
            skip_unused,
        }
    }

    /// Records eligible for display under the report's skip-unused setting
    pub fn displayed_records(&self) -> impl Iterator<Item = &CookbookRecord> {
        let skip_unused = self.skip_unused;
        self.records
            .iter()
            .filter(move |record| record.is_displayed(skip_unused))
    }

    pub fn records_with_errors(&self) -> usize {
        self.records.iter().filter(|r| r.has_errors()).count()
    }
}
