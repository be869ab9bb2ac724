use thiserror::Error;

/// Validation failures surfaced to the page that triggered them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Column '{0}' is not numeric")]
    NotNumeric(String),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}
