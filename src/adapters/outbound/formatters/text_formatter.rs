use crate::application::dto::CookbookReport;
use crate::cookbook_analysis::domain::CookbookRecord;
use crate::ports::outbound::CookbookReportFormatter;
use crate::shared::Result;

/// Human readable cookbook report
///
/// The summary layout prints one line per cookbook version; the detailed
/// layout adds the node list and every offense grouped by file.
pub struct TextFormatter {
    detailed: bool,
}

impl TextFormatter {
    pub fn summary() -> Self {
        Self { detailed: false }
    }

    pub fn detailed() -> Self {
        Self { detailed: true }
    }

    fn render_summary(output: &mut String, record: &CookbookRecord) {
        output.push_str(&format!(
            "{} ({}) {} violations, {} auto-correctable, {} nodes affected",
            record.name(),
            record.version(),
            record.num_offenses(),
            record.num_correctable(),
            record.nodes().len()
        ));
    }

    fn render_detailed(output: &mut String, record: &CookbookRecord) {
        output.push_str(&format!(
            "Cookbook: {} ({})\nViolations: {}\nAuto correctable: {}\n",
            record.name(),
            record.version(),
            record.num_offenses(),
            record.num_correctable()
        ));

        output.push_str("Nodes affected: ");
        if record.nodes().is_empty() {
            output.push_str("none");
        } else {
            let nodes: Vec<&str> = record.nodes().iter().map(String::as_str).collect();
            output.push_str(&nodes.join(", "));
        }

        output.push_str("\nFiles and offenses:");
        for file in record.files().iter().filter(|f| !f.offenses().is_empty()) {
            output.push_str(&format!("\n - {}:", file.path()));
            for offense in file.offenses() {
                output.push_str(&format!(
                    "\n\t{} ({}) {}",
                    offense.rule_id(),
                    offense.auto_correctable(),
                    offense.message()
                ));
            }
        }
    }

    /// Inline notice for the earliest failing stage; details go to the error summary
    fn render_notice(output: &mut String, record: &CookbookRecord) {
        if let Some(error) = record.first_error() {
            output.push_str(&format!(
                "\nERROR: {} (see end of report)",
                error.kind().notice()
            ));
        }
    }
}

impl CookbookReportFormatter for TextFormatter {
    fn format(&self, report: &CookbookReport) -> Result<String> {
        let mut output = String::new();
        for record in report.displayed_records() {
            if self.detailed {
                Self::render_detailed(&mut output, record);
            } else {
                Self::render_summary(&mut output, record);
            }
            Self::render_notice(&mut output, record);
            output.push('\n');
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookbook_analysis::domain::{
        CookbookVersionRef, FileOffenses, Offense, StageError,
    };

    fn cookbook(name: &str, version: &str) -> CookbookVersionRef {
        CookbookVersionRef::new(name.to_string(), version.to_string()).unwrap()
    }

    fn create_test_report(skip_unused: bool) -> CookbookReport {
        let apache2 = CookbookRecord::builder(cookbook("apache2", "1.0.0"))
            .files(vec![
                FileOffenses::new(
                    "recipes/default.rb".to_string(),
                    vec![
                        Offense::new(
                            "Chef/Style/UsePlatformHelpers".to_string(),
                            "Use platform? helpers".to_string(),
                            true,
                        ),
                        Offense::new(
                            "Chef/Correctness/InvalidVersionMetadata".to_string(),
                            "Invalid version".to_string(),
                            false,
                        ),
                    ],
                ),
                FileOffenses::new("metadata.rb".to_string(), vec![]),
            ])
            .nodes(vec!["web02".to_string(), "web01".to_string()])
            .build();
        let mysql = CookbookRecord::builder(cookbook("mysql", "8.0.0"))
            .failure(StageError::download("HTTP 404"))
            .build();
        CookbookReport::new(vec![mysql, apache2], skip_unused)
    }

    #[test]
    fn test_format_summary() {
        let output = TextFormatter::summary()
            .format(&create_test_report(false))
            .unwrap();
        assert_eq!(
            output,
            "apache2 (1.0.0) 2 violations, 1 auto-correctable, 2 nodes affected\n\
             mysql (8.0.0) 0 violations, 0 auto-correctable, 0 nodes affected\n\
             ERROR: could not download cookbook (see end of report)\n"
        );
    }

    #[test]
    fn test_format_summary_skip_unused() {
        let output = TextFormatter::summary()
            .format(&create_test_report(true))
            .unwrap();
        assert!(output.contains("apache2 (1.0.0)"));
        assert!(!output.contains("mysql"));
    }

    #[test]
    fn test_format_detailed() {
        let output = TextFormatter::detailed()
            .format(&create_test_report(false))
            .unwrap();

        let expected_apache2 = "Cookbook: apache2 (1.0.0)\n\
             Violations: 2\n\
             Auto correctable: 1\n\
             Nodes affected: web01, web02\n\
             Files and offenses:\n \
             - recipes/default.rb:\n\
             \tChef/Style/UsePlatformHelpers (true) Use platform? helpers\n\
             \tChef/Correctness/InvalidVersionMetadata (false) Invalid version\n";
        assert!(output.starts_with(expected_apache2));
        assert!(!output.contains("metadata.rb"));
        assert!(output.contains("Nodes affected: none\nFiles and offenses:\nERROR: could not download cookbook"));
    }

    #[test]
    fn test_format_detailed_lists_every_file() {
        let record = CookbookRecord::builder(cookbook("ntp", "3.1.0"))
            .files(vec![
                FileOffenses::new(
                    "metadata.rb".to_string(),
                    vec![Offense::new("Chef/Modernize/A".to_string(), "a".to_string(), true)],
                ),
                FileOffenses::new(
                    "recipes/default.rb".to_string(),
                    vec![Offense::new("Chef/Style/B".to_string(), "b".to_string(), false)],
                ),
            ])
            .nodes(vec!["web01".to_string()])
            .build();
        let report = CookbookReport::new(vec![record], false);

        let output = TextFormatter::detailed().format(&report).unwrap();
        assert_eq!(
            output,
            "Cookbook: ntp (3.1.0)\n\
             Violations: 2\n\
             Auto correctable: 1\n\
             Nodes affected: web01\n\
             Files and offenses:\n \
             - metadata.rb:\n\
             \tChef/Modernize/A (true) a\n \
             - recipes/default.rb:\n\
             \tChef/Style/B (false) b\n"
        );
    }

    #[test]
    fn test_format_empty_report() {
        let report = CookbookReport::new(vec![], false);
        assert_eq!(TextFormatter::summary().format(&report).unwrap(), "");
    }
}
