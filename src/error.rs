use thiserror::Error;

pub type Result<T> = std::result::Result<T, GlocError>;

#[derive(Error, Debug)]
pub enum GlocError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid region: {0}")]
    InvalidRegion(String),
    #[error("No data: {0}")]
    EmptyInput(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GlocError {
    pub fn invalid_row(row: usize, reason: impl Into<String>) -> Self {
        GlocError::InvalidRow {
            row,
            reason: reason.into(),
        }
    }
}
