use crate::diagnostics::Diagnostics;
use crate::extractor::TextExtractor;
use crate::file::types::{DocxFile, EpubFile, PdfFile, TextFile};
use crate::models::DocumentFormat;
use std::path::PathBuf;
use std::sync::Arc;

/// Factory for creating format strategies based on document format
pub struct FileFactory {
    staging_dir: PathBuf,
    diagnostics: Arc<dyn Diagnostics>,
}

impl FileFactory {
    pub fn new(staging_dir: PathBuf, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            staging_dir,
            diagnostics,
        }
    }

    /// Create the strategy for a format
    pub fn create(&self, format: DocumentFormat) -> Arc<dyn TextExtractor> {
        match format {
            DocumentFormat::Markdown | DocumentFormat::PlainText => Arc::new(TextFile::new(format)),
            DocumentFormat::Pdf => Arc::new(PdfFile::new(Arc::clone(&self.diagnostics))),
            DocumentFormat::Docx => Arc::new(DocxFile::new(Arc::clone(&self.diagnostics))),
            DocumentFormat::Epub => Arc::new(EpubFile::new(
                self.staging_dir.clone(),
                Arc::clone(&self.diagnostics),
            )),
        }
    }

    /// Create the strategy for a file extension, `None` when unsupported
    pub fn create_for_extension(&self, extension: &str) -> Option<Arc<dyn TextExtractor>> {
        DocumentFormat::from_extension(extension).map(|format| self.create(format))
    }
}
