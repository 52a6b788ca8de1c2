use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed XML payload: {0}")]
    Xml(String),
    #[error("unrecognized payload format; expected JSON or XML")]
    UnsupportedFormat,
    #[error("document is not an API collection (missing item tree)")]
    NotACollection,
    #[error("canonical import expects a nested document or a schema-description array")]
    UnsupportedCanonicalShape,
}

pub type Result<T> = std::result::Result<T, IngestError>;
