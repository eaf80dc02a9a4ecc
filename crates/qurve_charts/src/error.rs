//! Chart error types

use thiserror::Error;

/// Configuration errors raised at registration time.
///
/// Degenerate data (empty datasets, non-finite values, zero-width domains)
/// never produces one of these; it resolves to fallback geometry instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("chart is not mounted")]
    NotMounted,

    #[error("invalid chart size {width}x{height}")]
    InvalidSize { width: f32, height: f32 },
}

/// Result type for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;
