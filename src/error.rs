use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a whole `extract_text` call.
///
/// Per-page and per-chapter failures never show up here; they are absorbed by
/// the format strategies and reported through [`crate::diagnostics::Diagnostics`].
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to extract text from PDF: {0}")]
    PdfLoad(String),

    #[error("Failed to extract text from DOCX: {0}")]
    DocxLoad(String),

    #[error("Failed to parse EPUB: {0}")]
    EpubParse(String),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File is not valid UTF-8 text: {}", path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("Failed to stage temporary file: {0}")]
    Staging(#[source] std::io::Error),

    #[error("Extraction worker failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;

impl From<tokio::task::JoinError> for ExtractError {
    fn from(err: tokio::task::JoinError) -> Self {
        ExtractError::Task(err.to_string())
    }
}
