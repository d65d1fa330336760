use arrow::error::ArrowError;
use thiserror::Error;

/// Everything a plotting call can fail with.
///
/// Nothing here is recovered from; errors surface to the caller exactly where
/// the underlying lookup, conversion or window creation failed.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("column '{0}' not found in dataset")]
    ColumnNotFound(String),

    #[error("column conversion failed: {0}")]
    Arrow(#[from] ArrowError),

    #[error("level '{level}' never occurs in column '{column}'")]
    MissingLevel { column: String, level: String },

    #[error("column '{column}' has no finite range to bin: [{min}, {max}]")]
    NonFiniteRange { column: String, min: f64, max: f64 },

    /// Window backend failure, as text. `PlotError` must stay `Send + Sync`.
    #[error("could not display figure: {0}")]
    Display(String),
}

pub type Result<T> = std::result::Result<T, PlotError>;
