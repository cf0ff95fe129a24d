//! Rendering of interface models.

pub mod output;
pub mod writers;

pub use output::{create_writer, open_destination, OutputFormat, OutputWriter};
