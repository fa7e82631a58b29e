pub mod dataset;
pub mod output;
pub mod writers;

pub use dataset::{Dataset, ImageMapping, Subset};
pub use output::{create_writer, OutputFormat, OutputWriter, ReportContext};
