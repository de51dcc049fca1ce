pub mod job;
pub mod outcome;
pub mod output_manager;

pub use job::{ExtractionJob, ExtractionProgress};
pub use outcome::FileOutcome;
pub use output_manager::{ExtractionReport, ExtractionSummary, OutputManager};
