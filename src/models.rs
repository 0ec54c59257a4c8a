use crate::file::{ByteSource, FsSource, MemorySource};
use crate::utils;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Document formats the extractor knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Markdown,
    PlainText,
    Pdf,
    Docx,
    Epub,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 5] = [
        DocumentFormat::Markdown,
        DocumentFormat::PlainText,
        DocumentFormat::Pdf,
        DocumentFormat::Docx,
        DocumentFormat::Epub,
    ];

    /// Case-insensitive lookup; `None` for anything outside the supported set
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "md" => Some(DocumentFormat::Markdown),
            "txt" => Some(DocumentFormat::PlainText),
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "epub" => Some(DocumentFormat::Epub),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Markdown => "md",
            DocumentFormat::PlainText => "txt",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Epub => "epub",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DocumentFormat::Markdown => "📝",
            DocumentFormat::PlainText => "📄",
            DocumentFormat::Pdf => "📕",
            DocumentFormat::Docx => "📘",
            DocumentFormat::Epub => "📚",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A document handed to the extractor by its host.
///
/// The extractor only reads through `source`; it never mutates or keeps the
/// reference after the call returns.
#[derive(Clone)]
pub struct DocumentReference {
    /// Logical path of the document (vault-relative or absolute)
    pub path: PathBuf,
    /// Lower-cased extension without the dot, empty when the path has none
    pub extension: String,
    /// Byte-level access to the document
    pub source: Arc<dyn ByteSource>,
}

impl DocumentReference {
    pub fn new(path: PathBuf, extension: impl Into<String>, source: Arc<dyn ByteSource>) -> Self {
        Self {
            path,
            extension: extension.into().to_lowercase(),
            source,
        }
    }

    /// Reference a file on the local filesystem
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let extension = utils::get_extension(&path).unwrap_or_default();
        let source = Arc::new(FsSource::new(path.clone()));
        Self::new(path, extension, source)
    }

    /// Reference a document whose bytes are already in memory
    pub fn in_memory(path: impl AsRef<Path>, bytes: impl Into<Vec<u8>>) -> Self {
        let path = path.as_ref().to_path_buf();
        let extension = utils::get_extension(&path).unwrap_or_default();
        let source = Arc::new(MemorySource::new(path.clone(), bytes.into()));
        Self::new(path, extension, source)
    }

    pub fn format(&self) -> Option<DocumentFormat> {
        DocumentFormat::from_extension(&self.extension)
    }
}

impl fmt::Debug for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentReference")
            .field("path", &self.path)
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}
