use crate::error::Result;
use crate::file::ByteSource;
use crate::models::{DocumentFormat, DocumentReference};

/// A format strategy: turns one document into one flat string
#[async_trait::async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract text from raw document bytes
    async fn extract_bytes(&self, bytes: Vec<u8>) -> Result<String>;

    /// Extract text from a document reference (reads its bytes first)
    async fn extract(&self, doc: &DocumentReference) -> Result<String> {
        let bytes = doc.source.read_binary().await?;
        self.extract_bytes(bytes).await
    }

    /// Format handled by this strategy
    fn format(&self) -> DocumentFormat;

    /// Check if this extractor supports the given file extension
    fn supports_extension(&self, ext: &str) -> bool {
        DocumentFormat::from_extension(ext) == Some(self.format())
    }
}
