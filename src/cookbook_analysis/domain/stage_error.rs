use std::fmt;
use thiserror::Error;

/// Message recorded for stages that were never started because the run deadline passed
pub const DEADLINE_EXCEEDED_MESSAGE: &str = "not attempted: report deadline exceeded";

/// Pipeline stage of the per-cookbook aggregation
///
/// The declaration order is the order errors are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageKind {
    Download,
    Analysis,
    UsageLookup,
}

impl StageKind {
    /// Notice shown inline next to a record that failed at this stage
    pub fn notice(&self) -> &'static str {
        match self {
            StageKind::Download => "could not download cookbook",
            StageKind::Analysis => "could not run cookstyle",
            StageKind::UsageLookup => "could not look up nodes using this cookbook",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Download => write!(f, "download"),
            StageKind::Analysis => write!(f, "analysis"),
            StageKind::UsageLookup => write!(f, "usage lookup"),
        }
    }
}

/// Failure of one pipeline stage for one cookbook version
///
/// Stage errors live on the record they belong to and never abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} failed: {message}")]
pub struct StageError {
    kind: StageKind,
    message: String,
}

impl StageError {
    pub fn new(kind: StageKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn download(message: impl Into<String>) -> Self {
        Self::new(StageKind::Download, message)
    }

    pub fn analysis(message: impl Into<String>) -> Self {
        Self::new(StageKind::Analysis, message)
    }

    pub fn usage_lookup(message: impl Into<String>) -> Self {
        Self::new(StageKind::UsageLookup, message)
    }

    /// A stage that was skipped because the report deadline had passed
    pub fn deadline_exceeded(kind: StageKind) -> Self {
        Self::new(kind, DEADLINE_EXCEEDED_MESSAGE)
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
