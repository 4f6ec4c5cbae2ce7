//! Excel reading and writing for the report pipeline

pub mod reader;
pub mod writer;

pub use reader::{SourceSpec, read_table};
pub use writer::write_report;
