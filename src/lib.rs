pub mod config;
pub mod models;
pub mod report;
pub mod scanner;
pub mod utils;

// 重新导出常用模块
pub use config::{Config, ReportFormat};
pub use models::{BitTally, FileStreamOutcome, ScanError, ScanReport};
pub use scanner::{BitAccumulator, Scanner};
