use crate::shared::error::ReportError;
use crate::shared::Result;
use std::time::Duration;

/// Default number of cookbook versions processed concurrently
pub const DEFAULT_WORKERS: usize = 10;

/// ReportOptions - explicit configuration for one cookbook report run
///
/// Resolved once at the boundary (CLI flags, config file) and handed to the
/// aggregation engine, which never reads ambient configuration itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Unused cookbook versions are omitted from display (never from the data)
    pub skip_unused: bool,
    /// Maximum number of cookbook versions in flight at once
    pub workers: usize,
    /// Run-wide deadline, measured from the start of the run. No stage is
    /// started after it passes; stages already running finish normally.
    pub deadline: Option<Duration>,
    /// Upper bound for any single download, analysis or usage lookup
    pub stage_timeout: Option<Duration>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            skip_unused: false,
            workers: DEFAULT_WORKERS,
            deadline: None,
            stage_timeout: None,
        }
    }
}

impl ReportOptions {
    pub fn builder() -> ReportOptionsBuilder {
        ReportOptionsBuilder::default()
    }
}

/// Builder for [`ReportOptions`] with validation
#[derive(Debug, Default)]
pub struct ReportOptionsBuilder {
    skip_unused: bool,
    workers: Option<usize>,
    deadline: Option<Duration>,
    stage_timeout: Option<Duration>,
}

impl ReportOptionsBuilder {
    pub fn skip_unused(mut self, skip_unused: bool) -> Self {
        self.skip_unused = skip_unused;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn stage_timeout(mut self, stage_timeout: Duration) -> Self {
        self.stage_timeout = Some(stage_timeout);
        self
    }

    /// # Errors
    /// Returns a validation error if `workers` is zero or a timeout is zero
    pub fn build(self) -> Result<ReportOptions> {
        let workers = self.workers.unwrap_or(DEFAULT_WORKERS);
        if workers == 0 {
            return Err(ReportError::Validation {
                message: "workers must be at least 1".to_string(),
            }
            .into());
        }
        if self.stage_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ReportError::Validation {
                message: "stage timeout must be greater than zero".to_string(),
            }
            .into());
        }
        if self.deadline.is_some_and(|t| t.is_zero()) {
            return Err(ReportError::Validation {
                message: "report timeout must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(ReportOptions {
            skip_unused: self.skip_unused,
            workers,
            deadline: self.deadline,
            stage_timeout: self.stage_timeout,
        })
    }
}
