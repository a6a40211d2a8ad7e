//! Message processing pipeline.

pub mod processor;
pub mod types;

pub use processor::EmailPipeline;
pub use types::{EmailRecord, Outcome, Stage};
