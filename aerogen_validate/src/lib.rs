mod checks;
mod error;
mod inventory;
mod report;

pub use checks::{Profile, validate};
pub use error::ValidateError;
pub use inventory::Inventory;
pub use report::{
    AnnotationFinding, CheckOutcome, CheckSummary, ConsistencyIssue, ImageFinding,
    MetadataFinding, ReportSummary, StructureDetails, ValidationReport, load_summary,
};
