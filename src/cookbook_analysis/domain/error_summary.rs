use super::cookbook::CookbookVersionRef;
use super::cookbook_record::CookbookRecord;
use super::stage_error::StageKind;
use std::collections::BTreeMap;

/// One failed stage of one cookbook version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub cookbook: CookbookVersionRef,
    pub message: String,
}

/// All stage failures of a run grouped by stage
///
/// Lets the presentation layer print a consolidated error section without
/// re-scanning the records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSummary {
    by_kind: BTreeMap<StageKind, Vec<ErrorEntry>>,
}

impl ErrorSummary {
    pub fn from_records(records: &[CookbookRecord]) -> Self {
        let mut by_kind: BTreeMap<StageKind, Vec<ErrorEntry>> = BTreeMap::new();
        for record in records {
            for error in record.errors() {
                by_kind.entry(error.kind()).or_default().push(ErrorEntry {
                    cookbook: record.cookbook().clone(),
                    message: error.message().to_string(),
                });
            }
        }
        Self { by_kind }
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }

    /// Entries for one stage, in record order
    pub fn entries(&self, kind: StageKind) -> &[ErrorEntry] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Stages with at least one failure, in pipeline order
    pub fn kinds(&self) -> impl Iterator<Item = StageKind> + '_ {
        self.by_kind.keys().copied()
    }

    pub fn total(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookbook_analysis::domain::StageError;

    fn record(name: &str, error: Option<StageError>) -> CookbookRecord {
        let cookbook = CookbookVersionRef::new(name.to_string(), "1.0.0".to_string()).unwrap();
        let builder = CookbookRecord::builder(cookbook);
        match error {
            Some(e) => builder.failure(e).build(),
            None => builder.build(),
        }
    }

    #[test]
    fn test_empty_when_no_errors() {
        let summary = ErrorSummary::from_records(&[record("apache2", None)]);
        assert!(summary.is_empty());
        assert_eq!(summary.total(), 0);
        assert!(summary.entries(StageKind::Download).is_empty());
    }

    #[test]
    fn test_groups_by_kind() {
        let records = vec![
            record("apache2", Some(StageError::download("404"))),
            record("mysql", Some(StageError::analysis("bad json"))),
            record("nginx", Some(StageError::download("timeout"))),
            record("ntp", None),
        ];
        let summary = ErrorSummary::from_records(&records);

        assert_eq!(summary.total(), 3);
        let downloads = summary.entries(StageKind::Download);
        assert_eq!(downloads.len(), 2);
        assert_eq!(downloads[0].cookbook.name(), "apache2");
        assert_eq!(downloads[1].message, "timeout");
        assert_eq!(summary.entries(StageKind::Analysis).len(), 1);

        let kinds: Vec<StageKind> = summary.kinds().collect();
        assert_eq!(kinds, vec![StageKind::Download, StageKind::Analysis]);
    }

    #[test]
    fn test_record_with_two_failures_listed_under_both() {
        let cookbook = CookbookVersionRef::new("apache2".to_string(), "1.0.0".to_string()).unwrap();
        let record = CookbookRecord::builder(cookbook)
            .failure(StageError::download("404"))
            .failure(StageError::usage_lookup("500"))
            .build();
        let summary = ErrorSummary::from_records(&[record]);
        assert_eq!(summary.entries(StageKind::Download).len(), 1);
        assert_eq!(summary.entries(StageKind::UsageLookup).len(), 1);
    }
}
