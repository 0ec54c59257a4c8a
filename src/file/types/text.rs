use crate::error::{ExtractError, Result};
use crate::extractor::TextExtractor;
use crate::file::ByteSource;
use crate::models::{DocumentFormat, DocumentReference};
use async_trait::async_trait;

/// Markdown and plain-text handler; content is returned verbatim
pub struct TextFile {
    format: DocumentFormat,
}

impl TextFile {
    pub fn new(format: DocumentFormat) -> Self {
        Self { format }
    }

    pub fn markdown() -> Self {
        Self::new(DocumentFormat::Markdown)
    }

    pub fn plain() -> Self {
        Self::new(DocumentFormat::PlainText)
    }
}

#[async_trait]
impl TextExtractor for TextFile {
    async fn extract_bytes(&self, bytes: Vec<u8>) -> Result<String> {
        String::from_utf8(bytes).map_err(|_| ExtractError::InvalidUtf8 {
            path: format!("<{} buffer>", self.format).into(),
        })
    }

    async fn extract(&self, doc: &DocumentReference) -> Result<String> {
        doc.source.read_text().await
    }

    fn format(&self) -> DocumentFormat {
        self.format
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(
            DocumentFormat::from_extension(ext),
            Some(DocumentFormat::Markdown) | Some(DocumentFormat::PlainText)
        )
    }
}
