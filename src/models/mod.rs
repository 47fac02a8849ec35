pub mod error;
pub mod scan_result;
pub mod tally;

pub use error::ScanError;
pub use scan_result::ScanReport;
pub use tally::{BitTally, FileStreamOutcome};
