use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to render sheet: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;
