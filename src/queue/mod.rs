pub mod job;
pub mod reconcile;
pub mod report;
pub mod worker;

pub use job::{BatchJob, collect_inputs};
pub use report::{FileOutcome, FileReport};
pub use worker::{BatchSettings, run_batch};
