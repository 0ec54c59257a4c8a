use crate::error::{ExtractError, Result};
use async_trait::async_trait;

/// Byte-level access to a document, supplied by the host
#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Read the raw bytes of the document
    async fn read_binary(&self) -> Result<Vec<u8>>;

    /// Read the document as text; the bytes must be valid UTF-8
    async fn read_text(&self) -> Result<String> {
        let bytes = self.read_binary().await?;
        String::from_utf8(bytes).map_err(|_| ExtractError::InvalidUtf8 {
            path: self.path().to_path_buf(),
        })
    }

    /// Get the logical path of the document
    fn path(&self) -> &std::path::Path;
}
