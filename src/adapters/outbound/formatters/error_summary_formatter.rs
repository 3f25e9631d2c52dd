use crate::cookbook_analysis::domain::ErrorSummary;

/// Renders the consolidated stage failures printed after a cookbook report
///
/// One block per stage in pipeline order; empty when nothing failed.
pub struct ErrorSummaryFormatter;

impl ErrorSummaryFormatter {
    pub fn format(summary: &ErrorSummary) -> String {
        if summary.is_empty() {
            return String::new();
        }

        let mut output = String::from("* ERROR(s) DETAILS:\n");
        for kind in summary.kinds() {
            for entry in summary.entries(kind) {
                output.push_str(&format!(
                    " - {} ({}): {}\n",
                    entry.cookbook.name(),
                    entry.cookbook.version(),
                    entry.message
                ));
            }
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookbook_analysis::domain::{CookbookRecord, CookbookVersionRef, StageError};

    fn failed(name: &str, error: StageError) -> CookbookRecord {
        CookbookRecord::builder(
            CookbookVersionRef::new(name.to_string(), "1.0.0".to_string()).unwrap(),
        )
        .failure(error)
        .build()
    }

    #[test]
    fn test_format_empty_summary() {
        assert_eq!(ErrorSummaryFormatter::format(&ErrorSummary::default()), "");
    }

    #[test]
    fn test_format_groups_by_stage() {
        let summary = ErrorSummary::from_records(&[
            failed("ntp", StageError::usage_lookup("search returned 500")),
            failed("apache2", StageError::analysis("exit status: 1")),
            failed("mysql", StageError::download("HTTP 404")),
        ]);

        assert_eq!(
            ErrorSummaryFormatter::format(&summary),
            "* ERROR(s) DETAILS:\n \
             - mysql (1.0.0): HTTP 404\n\n \
             - apache2 (1.0.0): exit status: 1\n\n \
             - ntp (1.0.0): search returned 500\n\n"
        );
    }

    #[test]
    fn test_format_lists_every_entry_of_a_stage() {
        let summary = ErrorSummary::from_records(&[
            failed("apache2", StageError::download("HTTP 404")),
            failed("mysql", StageError::download("HTTP 500")),
        ]);

        assert_eq!(
            ErrorSummaryFormatter::format(&summary),
            "* ERROR(s) DETAILS:\n \
             - apache2 (1.0.0): HTTP 404\n \
             - mysql (1.0.0): HTTP 500\n\n"
        );
    }
}
