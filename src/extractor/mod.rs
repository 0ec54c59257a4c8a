//! Extraction dispatcher.
//!
//! `Extractor` is the single entry point hosts call: it checks the document's
//! extension, picks the matching format strategy and hands back one flat
//! string. It holds no per-document state, so one instance can serve any
//! number of concurrent calls.

pub mod r#trait;

pub use r#trait::TextExtractor;

use crate::config::ExtractionConfig;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::{ExtractError, Result};
use crate::file::FileFactory;
use crate::models::{DocumentFormat, DocumentReference};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// Glyph used for anything outside the supported set
const DEFAULT_ICON: &str = "📄";

pub struct Extractor {
    factory: FileFactory,
}

impl Extractor {
    /// Extractor staging into the process temp dir and logging through `tracing`
    pub fn new() -> Self {
        Self::with_parts(std::env::temp_dir(), Arc::new(TracingDiagnostics))
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::with_parts(config.staging_dir(), Arc::new(TracingDiagnostics))
    }

    pub fn with_parts(staging_dir: PathBuf, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            factory: FileFactory::new(staging_dir, diagnostics),
        }
    }

    /// Extract the text of a document.
    ///
    /// Unsupported extensions are rejected before any byte is read.
    pub async fn extract_text(&self, doc: &DocumentReference) -> Result<String> {
        let strategy = self
            .factory
            .create_for_extension(&doc.extension)
            .ok_or_else(|| ExtractError::UnsupportedFormat(doc.extension.clone()))?;

        strategy.extract(doc).await
    }

    /// Check if an extension can be extracted (case-insensitive)
    pub fn is_supported(extension: &str) -> bool {
        DocumentFormat::from_extension(extension).is_some()
    }

    pub fn icon_for(extension: &str) -> &'static str {
        DocumentFormat::from_extension(extension)
            .map(|format| format.icon())
            .unwrap_or(DEFAULT_ICON)
    }

    /// List every supported file under `root`, sorted by path
    pub fn supported_files(root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(Self::is_supported)
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        files
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}
