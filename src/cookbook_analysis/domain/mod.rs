pub mod cookbook;
pub mod cookbook_record;
pub mod error_summary;
pub mod node;
pub mod offense;
pub mod stage_error;

pub use cookbook::{CatalogEntry, CookbookName, CookbookVersion, CookbookVersionRef};
pub use cookbook_record::{CookbookRecord, CookbookRecordBuilder};
pub use error_summary::{ErrorEntry, ErrorSummary};
pub use node::{NodeRaw, NodeReportItem, UNKNOWN_PLACEHOLDER};
pub use offense::{FileOffenses, Offense};
pub use stage_error::{StageError, StageKind, DEADLINE_EXCEEDED_MESSAGE};
