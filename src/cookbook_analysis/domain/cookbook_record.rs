use super::cookbook::CookbookVersionRef;
use super::offense::FileOffenses;
use super::stage_error::{StageError, StageKind};
use std::collections::BTreeSet;

/// Aggregated result for one cookbook version
///
/// Records are assembled once through [`CookbookRecordBuilder`] and are
/// immutable afterwards.
///
/// A download or analysis failure means no violation data is available, so
/// such a record always has empty `files` and contributes zero to the
/// offense counts. A usage lookup failure only leaves `nodes` empty; the
/// violation data gathered for the cookbook is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookbookRecord {
    cookbook: CookbookVersionRef,
    nodes: BTreeSet<String>,
    files: Vec<FileOffenses>,
    download_error: Option<StageError>,
    analysis_error: Option<StageError>,
    usage_lookup_error: Option<StageError>,
}

impl CookbookRecord {
    pub fn builder(cookbook: CookbookVersionRef) -> CookbookRecordBuilder {
        CookbookRecordBuilder::new(cookbook)
    }

    pub fn cookbook(&self) -> &CookbookVersionRef {
        &self.cookbook
    }

    pub fn name(&self) -> &str {
        self.cookbook.name()
    }

    pub fn version(&self) -> &str {
        self.cookbook.version()
    }

    /// Names of the nodes currently applying this version (sorted, deduplicated)
    pub fn nodes(&self) -> &BTreeSet<String> {
        &self.nodes
    }

    pub fn files(&self) -> &[FileOffenses] {
        &self.files
    }

    pub fn download_error(&self) -> Option<&StageError> {
        self.download_error.as_ref()
    }

    pub fn analysis_error(&self) -> Option<&StageError> {
        self.analysis_error.as_ref()
    }

    pub fn usage_lookup_error(&self) -> Option<&StageError> {
        self.usage_lookup_error.as_ref()
    }

    /// All populated error slots in pipeline order
    pub fn errors(&self) -> impl Iterator<Item = &StageError> {
        [
            self.download_error.as_ref(),
            self.analysis_error.as_ref(),
            self.usage_lookup_error.as_ref(),
        ]
        .into_iter()
        .flatten()
    }

    /// The earliest failing stage, which is what inline notices report
    pub fn first_error(&self) -> Option<&StageError> {
        self.errors().next()
    }

    pub fn has_errors(&self) -> bool {
        self.first_error().is_some()
    }

    /// Total number of offenses across all files
    pub fn num_offenses(&self) -> usize {
        self.files.iter().map(|f| f.offenses().len()).sum()
    }

    /// Number of offenses the analyzer can fix automatically
    pub fn num_correctable(&self) -> usize {
        self.files.iter().map(FileOffenses::correctable_count).sum()
    }

    pub fn is_used(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Whether the record should be shown when unused cookbooks are skipped
    pub fn is_displayed(&self, skip_unused: bool) -> bool {
        !skip_unused || self.is_used()
    }
}

/// Builder collecting stage outcomes for one cookbook version
#[derive(Debug)]
pub struct CookbookRecordBuilder {
    cookbook: CookbookVersionRef,
    nodes: BTreeSet<String>,
    files: Vec<FileOffenses>,
    download_error: Option<StageError>,
    analysis_error: Option<StageError>,
    usage_lookup_error: Option<StageError>,
}

impl CookbookRecordBuilder {
    pub fn new(cookbook: CookbookVersionRef) -> Self {
        Self {
            cookbook,
            nodes: BTreeSet::new(),
            files: Vec::new(),
            download_error: None,
            analysis_error: None,
            usage_lookup_error: None,
        }
    }

    pub fn files(mut self, files: Vec<FileOffenses>) -> Self {
        self.files = files;
        self
    }

    pub fn nodes<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.nodes.extend(nodes);
        self
    }

    /// Records a stage failure in the slot matching its kind
    pub fn failure(mut self, error: StageError) -> Self {
        match error.kind() {
            StageKind::Download => self.download_error = Some(error),
            StageKind::Analysis => self.analysis_error = Some(error),
            StageKind::UsageLookup => self.usage_lookup_error = Some(error),
        }
        self
    }

    pub fn build(self) -> CookbookRecord {
        let violations_unavailable =
            self.download_error.is_some() || self.analysis_error.is_some();
        let files = if violations_unavailable {
            Vec::new()
        } else {
            self.files
        };
        let nodes = if self.usage_lookup_error.is_some() {
            BTreeSet::new()
        } else {
            self.nodes
        };

        CookbookRecord {
            cookbook: self.cookbook,
            nodes,
            files,
            download_error: self.download_error,
            analysis_error: self.analysis_error,
            usage_lookup_error: self.usage_lookup_error,
        }
    }
}
