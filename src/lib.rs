pub mod config;
pub mod error;
pub mod fetch;
pub mod process;

pub use config::{Config, FailurePolicy, Mode};
pub use error::ScrapeError;
pub use fetch::{HttpSource, PageSource};
pub use process::{PayrollRecord, RecordSummary};
