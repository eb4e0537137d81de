//! Benchmark metrics analysis: load a metrics CSV, keep one run
//! configuration, average `total_ms` per execution mode, and report the
//! speculative-over-sequential speedup as text and as a bar chart.

pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod plot;
pub mod report;
pub mod stats;

pub use error::{AnalysisError, Result};
