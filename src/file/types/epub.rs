use crate::diagnostics::Diagnostics;
use crate::error::{ExtractError, Result};
use crate::extractor::TextExtractor;
use crate::file::StagingFile;
use crate::models::DocumentFormat;
use crate::utils;
use async_trait::async_trait;
use epub::doc::EpubDoc;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::task::JoinSet;

const CHAPTER_SEPARATOR: &str = "\n\n";

/// Fetches the HTML body of one chapter by its manifest id
#[async_trait]
pub trait ChapterSource: Send + Sync {
    async fn chapter(&self, id: &str) -> std::result::Result<String, String>;
}

/// `ChapterSource` over a parsed container. The parser needs exclusive access
/// for every read, so fetches share it behind a mutex.
pub struct EpubChapters {
    doc: Arc<Mutex<EpubDoc<BufReader<File>>>>,
}

impl EpubChapters {
    /// Parse the container at `path` and return it with its flow (spine idrefs)
    pub fn open(path: &Path) -> Result<(Self, Vec<String>)> {
        let doc = EpubDoc::new(path).map_err(|e| ExtractError::EpubParse(e.to_string()))?;
        let flow = doc.spine.clone();
        Ok((
            Self {
                doc: Arc::new(Mutex::new(doc)),
            },
            flow,
        ))
    }
}

#[async_trait]
impl ChapterSource for EpubChapters {
    async fn chapter(&self, id: &str) -> std::result::Result<String, String> {
        let doc = Arc::clone(&self.doc);
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let mut doc = doc.lock().map_err(|_| "EPUB reader lock poisoned".to_string())?;
            doc.get_resource_str(&id)
                .map(|(content, _mime)| content)
                .ok_or_else(|| format!("chapter '{}' is missing from the container", id))
        })
        .await
        .map_err(|e| e.to_string())?
    }
}

/// Fetch every chapter of `flow` concurrently and join the cleaned text in
/// flow order, whatever order the fetches complete in. A chapter that fails is
/// reported and left out.
pub async fn collect_chapters(
    source: Arc<dyn ChapterSource>,
    flow: Vec<String>,
    diagnostics: Arc<dyn Diagnostics>,
) -> String {
    if flow.is_empty() {
        return String::new();
    }

    let mut slots: Vec<Option<String>> = vec![None; flow.len()];
    let mut tasks = JoinSet::new();

    for (index, id) in flow.into_iter().enumerate() {
        let source = Arc::clone(&source);
        tasks.spawn(async move {
            let result = source.chapter(&id).await;
            (index, id, result)
        });
    }

    while let Some(task_result) = tasks.join_next().await {
        match task_result {
            Ok((index, _, Ok(html))) => {
                slots[index] = Some(utils::strip_markup(&html));
            }
            Ok((index, id, Err(e))) => {
                diagnostics.error("epub", &format!("Error reading chapter {} ({}): {}", index, id, e));
            }
            Err(join_err) => {
                diagnostics.error("epub", &format!("Chapter task failed: {}", join_err));
            }
        }
    }

    slots
        .into_iter()
        .flatten()
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(CHAPTER_SEPARATOR)
}

/// EPUB file handler. The parser only reads from disk, so the bytes are
/// staged to a temporary file that lives exactly as long as the call.
pub struct EpubFile {
    staging_dir: PathBuf,
    diagnostics: Arc<dyn Diagnostics>,
}

impl EpubFile {
    pub fn new(staging_dir: PathBuf, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            staging_dir,
            diagnostics,
        }
    }
}

#[async_trait]
impl TextExtractor for EpubFile {
    async fn extract_bytes(&self, bytes: Vec<u8>) -> Result<String> {
        let staging_dir = self.staging_dir.clone();
        let diagnostics = Arc::clone(&self.diagnostics);

        let (staged, opened) = tokio::task::spawn_blocking(move || -> Result<_> {
            let staged = StagingFile::create(&staging_dir, ".epub", &bytes, diagnostics)
                .map_err(ExtractError::Staging)?;
            let opened = EpubChapters::open(staged.path());
            Ok((staged, opened))
        })
        .await??;

        let (chapters, flow) = match opened {
            Ok(opened) => opened,
            Err(e) => {
                self.diagnostics.error("epub", &format!("EPUB parsing error: {}", e));
                staged.close();
                return Err(e);
            }
        };

        self.diagnostics
            .info("epub", &format!("Parsed EPUB with {} chapters in flow", flow.len()));
        let text = collect_chapters(Arc::new(chapters), flow, Arc::clone(&self.diagnostics)).await;
        staged.close();

        Ok(text)
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Epub
    }
}
