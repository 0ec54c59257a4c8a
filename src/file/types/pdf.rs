use crate::diagnostics::Diagnostics;
use crate::error::{ExtractError, Result};
use crate::extractor::TextExtractor;
use crate::models::DocumentFormat;
use async_trait::async_trait;
use std::sync::Arc;

const PAGE_SEPARATOR: &str = "\n\n";

/// Page-level view of a loaded PDF
pub trait PageSource {
    /// Number of pages; pages are numbered `1..=page_count()`
    fn page_count(&self) -> u32;

    /// Text runs of one page, in content-stream order
    fn page_runs(&self, page_number: u32) -> std::result::Result<Vec<String>, String>;
}

/// `PageSource` backed by a lopdf document model
pub struct LopdfPages {
    doc: lopdf::Document,
    page_count: u32,
}

impl LopdfPages {
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let doc = lopdf::Document::load_mem(bytes).map_err(|e| ExtractError::PdfLoad(e.to_string()))?;
        let page_count = doc.get_pages().len() as u32;
        Ok(Self { doc, page_count })
    }
}

impl PageSource for LopdfPages {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_runs(&self, page_number: u32) -> std::result::Result<Vec<String>, String> {
        // lopdf ends every text object with a newline, so lines are the runs
        let text = self
            .doc
            .extract_text(&[page_number])
            .map_err(|e| e.to_string())?;
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|run| !run.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Join every readable page in ascending order. Runs inside a page are joined
/// with one space; each page is followed by a blank line. A page that fails is
/// reported and skipped.
pub fn collect_pages(source: &dyn PageSource, diagnostics: &dyn Diagnostics) -> String {
    let mut full_text = String::new();

    for page_number in 1..=source.page_count() {
        match source.page_runs(page_number) {
            Ok(runs) => {
                full_text.push_str(&runs.join(" "));
                full_text.push_str(PAGE_SEPARATOR);
            }
            Err(e) => {
                diagnostics.error("pdf", &format!("Error reading page {}: {}", page_number, e));
            }
        }
    }

    full_text.trim().to_string()
}

/// PDF file handler
pub struct PdfFile {
    diagnostics: Arc<dyn Diagnostics>,
}

impl PdfFile {
    pub fn new(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self { diagnostics }
    }
}

#[async_trait]
impl TextExtractor for PdfFile {
    async fn extract_bytes(&self, bytes: Vec<u8>) -> Result<String> {
        let diagnostics = Arc::clone(&self.diagnostics);
        tokio::task::spawn_blocking(move || -> Result<String> {
            let pages = LopdfPages::load(&bytes)?;
            diagnostics.info("pdf", &format!("Loaded PDF with {} pages", pages.page_count()));
            Ok(collect_pages(&pages, diagnostics.as_ref()))
        })
        .await?
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemoryDiagnostics;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    struct FakePages {
        pages: Vec<std::result::Result<Vec<&'static str>, &'static str>>,
    }

    impl PageSource for FakePages {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn page_runs(&self, page_number: u32) -> std::result::Result<Vec<String>, String> {
            match &self.pages[(page_number - 1) as usize] {
                Ok(runs) => Ok(runs.iter().map(|r| r.to_string()).collect()),
                Err(e) => Err(e.to_string()),
            }
        }
    }

    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_collect_pages_joins_runs_and_separates_pages() {
        let source = FakePages {
            pages: vec![Ok(vec!["Call", "me", "Ishmael."]), Ok(vec!["Some", "years", "ago."])],
        };
        let diagnostics = MemoryDiagnostics::new();
        let text = collect_pages(&source, &diagnostics);
        assert_eq!(text, "Call me Ishmael.\n\nSome years ago.");
        assert!(diagnostics.errors().is_empty());
    }

    #[test]
    fn test_collect_pages_skips_failed_page() {
        let source = FakePages {
            pages: vec![
                Ok(vec!["first"]),
                Err("broken content stream"),
                Ok(vec!["third"]),
            ],
        };
        let diagnostics = MemoryDiagnostics::new();
        let text = collect_pages(&source, &diagnostics);

        assert_eq!(text, "first\n\nthird");
        let errors = diagnostics.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("page 2"));
        assert!(errors[0].message.contains("broken content stream"));
    }

    #[test]
    fn test_collect_pages_zero_pages_is_empty() {
        let source = FakePages { pages: vec![] };
        assert_eq!(collect_pages(&source, &MemoryDiagnostics::new()), "");
    }

    #[test]
    fn test_collect_pages_all_pages_failing_is_empty_not_error() {
        let source = FakePages {
            pages: vec![Err("bad"), Err("worse")],
        };
        let diagnostics = MemoryDiagnostics::new();
        assert_eq!(collect_pages(&source, &diagnostics), "");
        assert_eq!(diagnostics.errors().len(), 2);
    }

    #[tokio::test]
    async fn test_pdf_file_extraction() {
        let bytes = build_pdf(&["Hello World", "Second page"]);
        let diagnostics = Arc::new(MemoryDiagnostics::new());
        let text = PdfFile::new(diagnostics.clone()).extract_bytes(bytes).await.unwrap();

        let hello = text.find("Hello").unwrap();
        let second = text.find("Second").unwrap();
        assert!(hello < second);
        assert!(text.contains("\n\n"));
        assert!(diagnostics.errors().is_empty());
    }

    #[tokio::test]
    async fn test_pdf_without_pages_is_empty() {
        let bytes = build_pdf(&[]);
        let text = PdfFile::new(Arc::new(MemoryDiagnostics::new()))
            .extract_bytes(bytes)
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_garbage_bytes_fail_to_load() {
        let err = PdfFile::new(Arc::new(MemoryDiagnostics::new()))
            .extract_bytes(b"this is not a pdf at all".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::PdfLoad(_)));
        assert!(err.to_string().starts_with("Failed to extract text from PDF"));
    }
}
