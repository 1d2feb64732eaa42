// Service exports
pub mod job_loader;
pub mod score_cell;

pub use job_loader::{JobFileFormat, JobLoader, LoaderError};
pub use score_cell::{parse_score_cell, ParsedCell};
