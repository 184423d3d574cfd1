//! Small pure helpers shared across the pipeline.

pub mod text;

pub use text::{normalize, summarize};
