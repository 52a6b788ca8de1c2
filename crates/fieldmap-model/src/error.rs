use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid field path: {0:?}")]
    InvalidFieldPath(String),
    #[error("invalid DTO name: {0:?}")]
    InvalidDtoName(String),
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
