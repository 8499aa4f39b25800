use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapingError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("unparseable value {value:?}: {reason}")]
    Unparseable { value: String, reason: String },

    #[error("datasource {datasource} does not support {activity}")]
    NotSupported { datasource: String, activity: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ScrapingError>;
