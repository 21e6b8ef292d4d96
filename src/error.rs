use thiserror::Error;

/// Loading failures. Every variant degrades to an on-screen banner and an
/// empty dataset; nothing here aborts the process.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network failure, timeout, or non-success HTTP status.
    #[error("could not download stumpage data: {0}")]
    Unavailable(#[from] reqwest::Error),

    /// The payload was fetched but did not parse as CSV.
    #[error("could not parse stumpage data: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV header is missing required columns.
    #[error("stumpage data is missing required column(s): {0}")]
    SchemaMismatch(String),
}
