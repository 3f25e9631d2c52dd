use crate::application::dto::{CookbookReport, ReportOptions};
use crate::cookbook_analysis::domain::{
    CookbookRecord, CookbookVersionRef, FileOffenses, StageError, StageKind,
};
use crate::ports::outbound::{CookbookCatalog, ProgressReporter, StaticAnalyzer, UsageIndex};
use crate::shared::error::ReportError;
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::time::Instant;

/// Time limits applied to every stage of one run
#[derive(Debug, Clone, Copy)]
struct StageLimits {
    deadline: Option<Instant>,
    stage_timeout: Option<Duration>,
}

impl StageLimits {
    fn from_options(options: &ReportOptions, started: Instant) -> Self {
        Self {
            deadline: options.deadline.map(|d| started + d),
            stage_timeout: options.stage_timeout,
        }
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// AggregateCookbooksUseCase - the cookbook aggregation engine
///
/// Reconciles the cookbook catalog, the node usage index and the static
/// analyzer into one `CookbookRecord` per cookbook version. A failure of any
/// source for one cookbook is recorded on that cookbook's record; only a
/// failure to list the catalog aborts the run. Catalog entries that are not
/// valid cookbook versions are skipped with a warning.
///
/// # Type Parameters
/// * `C` - CookbookCatalog implementation
/// * `U` - UsageIndex implementation
/// * `A` - StaticAnalyzer implementation
/// * `P` - ProgressReporter implementation
pub struct AggregateCookbooksUseCase<C, U, A, P> {
    catalog: C,
    usage_index: U,
    analyzer: A,
    progress_reporter: P,
}

impl<C, U, A, P> AggregateCookbooksUseCase<C, U, A, P>
where
    C: CookbookCatalog,
    U: UsageIndex,
    A: StaticAnalyzer,
    P: ProgressReporter,
{
    pub fn new(catalog: C, usage_index: U, analyzer: A, progress_reporter: P) -> Self {
        Self {
            catalog,
            usage_index,
            analyzer,
            progress_reporter,
        }
    }

    /// Executes the aggregation
    ///
    /// Always returns exactly one record per distinct cookbook version listed
    /// by the catalog, sorted by name then version.
    pub async fn execute(&self, options: ReportOptions) -> Result<CookbookReport> {
        let started = Instant::now();
        let limits = StageLimits::from_options(&options, started);

        // Step 1: List cookbook versions
        let cookbooks = self.list_cookbooks().await?;
        if cookbooks.is_empty() {
            self.progress_reporter
                .report_completion("No cookbooks found on the server.");
            return Ok(CookbookReport::new(Vec::new(), options.skip_unused));
        }

        // Step 2: Fan out over a run-scoped staging area
        let staging = tempfile::Builder::new()
            .prefix("cookbook-audit-")
            .tempdir()
            .map_err(|e| anyhow::anyhow!("Failed to create staging directory: {}", e))?;
        let records = self
            .process_all(&cookbooks, staging.path(), options.workers, limits)
            .await;

        // Step 3: Assemble the report
        let report = CookbookReport::new(records, options.skip_unused);
        self.report_summary(&report);
        Ok(report)
    }

    async fn list_cookbooks(&self) -> Result<Vec<CookbookVersionRef>> {
        self.progress_reporter
            .report("📚 Listing cookbook versions from the catalog...");

        let entries = self.catalog.list_cookbooks().await.map_err(|e| {
            ReportError::CatalogUnavailable {
                details: format!("{:#}", e),
            }
        })?;

        // An entry that cannot name a cookbook version is reported and skipped
        let mut cookbooks = Vec::with_capacity(entries.len());
        for entry in entries {
            let label = entry.to_string();
            match entry.into_ref() {
                Ok(cookbook) => cookbooks.push(cookbook),
                Err(e) => self
                    .progress_reporter
                    .report_error(&format!("⚠️  Skipping {}: {}", label, e)),
            }
        }
        cookbooks.sort();
        cookbooks.dedup();

        self.progress_reporter
            .report(&format!("✅ Found {} cookbook version(s)", cookbooks.len()));
        Ok(cookbooks)
    }

    async fn process_all(
        &self,
        cookbooks: &[CookbookVersionRef],
        staging: &Path,
        workers: usize,
        limits: StageLimits,
    ) -> Vec<CookbookRecord> {
        let total = cookbooks.len();
        self.progress_reporter.report(&format!(
            "🔍 Analyzing {} cookbook version(s) with {} worker(s)...",
            total, workers
        ));

        let mut in_flight = stream::iter(cookbooks.iter().cloned())
            .map(|cookbook| self.process_one(cookbook, staging, limits))
            .buffer_unordered(workers.max(1));

        let mut records = Vec::with_capacity(total);
        while let Some(record) = in_flight.next().await {
            records.push(record);
            let message = records.last().map(|r| r.cookbook().to_string());
            self.progress_reporter
                .report_progress(records.len(), total, message.as_deref());
        }
        records
    }

    /// Runs the three stages for one cookbook version
    ///
    /// Download and usage lookup are issued together; analysis waits on the download.
    async fn process_one(
        &self,
        cookbook: CookbookVersionRef,
        staging: &Path,
        limits: StageLimits,
    ) -> CookbookRecord {
        let destination = staging.join(cookbook.staging_path());

        let (violations, usage) = tokio::join!(
            self.download_and_analyze(&cookbook, &destination, limits),
            run_stage(StageKind::UsageLookup, limits, || {
                self.usage_index.nodes_using(&cookbook)
            }),
        );

        let mut builder = CookbookRecord::builder(cookbook.clone());
        builder = match violations {
            Ok(files) => builder.files(files),
            Err(error) => builder.failure(error),
        };
        builder = match usage {
            Ok(nodes) => builder.nodes(nodes),
            Err(error) => builder.failure(error),
        };
        builder.build()
    }

    async fn download_and_analyze(
        &self,
        cookbook: &CookbookVersionRef,
        destination: &Path,
        limits: StageLimits,
    ) -> std::result::Result<Vec<FileOffenses>, StageError> {
        let path = run_stage(StageKind::Download, limits, || {
            self.catalog.download(cookbook, destination)
        })
        .await?;

        run_stage(StageKind::Analysis, limits, || self.analyzer.analyze(&path)).await
    }

    fn report_summary(&self, report: &CookbookReport) {
        let failed = report.records_with_errors();
        if failed > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  {} of {} cookbook version(s) had errors ({} stage failure(s))",
                failed,
                report.records.len(),
                report.error_summary.total()
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Processed {} cookbook version(s), {} with errors",
            report.records.len(),
            failed
        ));
    }
}

/// Starts one stage unless the run deadline has passed, bounded by the stage timeout
///
/// The stage future is only created once the deadline check passed.
async fn run_stage<T, F, Fut>(
    kind: StageKind,
    limits: StageLimits,
    start: F,
) -> std::result::Result<T, StageError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if limits.deadline_passed() {
        return Err(StageError::deadline_exceeded(kind));
    }

    let outcome = match limits.stage_timeout {
        Some(limit) => match tokio::time::timeout(limit, start()).await {
            Ok(outcome) => outcome,
            Err(_) => {
                return Err(StageError::new(
                    kind,
                    format!("timed out after {}s", limit.as_secs_f64()),
                ))
            }
        },
        None => start().await,
    };

    outcome.map_err(|e| StageError::new(kind, format!("{:#}", e)))
}
