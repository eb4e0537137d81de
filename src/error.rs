use thiserror::Error;

/// Errors raised while loading, summarising or rendering metrics.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The header lacks one or more required columns.
    #[error("missing columns in CSV: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV record {record}: {source}")]
    Record { record: usize, source: csv::Error },

    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("rendering chart: {0}")]
    Chart(String),

    #[error("encoding chart image: {0}")]
    Image(#[from] image::ImageError),

    #[error("writing JSON summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid colour {hex:?}: {reason}")]
    Color { hex: String, reason: String },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
