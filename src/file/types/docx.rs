use crate::diagnostics::Diagnostics;
use crate::error::{ExtractError, Result};
use crate::extractor::TextExtractor;
use crate::models::DocumentFormat;
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::BTreeSet;
use std::io::{Cursor, Read};
use std::sync::Arc;

const DOCUMENT_PART: &str = "word/document.xml";

/// Raw text projection of a DOCX package plus the converter's warnings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub text: String,
    pub warnings: Vec<String>,
}

/// Convert a DOCX package to plain text.
///
/// Each paragraph is followed by a blank line, tabs become `\t` and breaks
/// become `\n`. Content the converter cannot render as text (pictures,
/// embedded objects, alternate chunks, math) is skipped with a warning.
pub fn convert(bytes: &[u8]) -> Result<Conversion> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractError::DocxLoad(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::DocxLoad(format!("{}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractError::DocxLoad(format!("{}: {}", DOCUMENT_PART, e)))?;

    convert_document_xml(&xml)
}

/// Elements whose content has no plain-text rendering
fn unsupported_label(local_name: &[u8]) -> Option<&'static str> {
    match local_name {
        b"oMath" | b"oMathPara" => Some("math"),
        b"pict" => Some("pict"),
        b"object" => Some("object"),
        b"drawing" => Some("drawing"),
        b"altChunk" => Some("altChunk"),
        _ => None,
    }
}

fn convert_document_xml(xml: &str) -> Result<Conversion> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut skipped = BTreeSet::new();

    let mut run_depth = 0usize;
    let mut in_text = false;
    let mut skip_depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractError::DocxLoad(format!("{} at byte {}", e, reader.buffer_position())))?;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"r" => run_depth += 1,
                b"t" if run_depth > 0 && skip_depth == 0 => in_text = true,
                name => {
                    if let Some(label) = unsupported_label(name) {
                        skip_depth += 1;
                        skipped.insert(label);
                    }
                }
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" if run_depth > 0 && skip_depth == 0 => text.push('\t'),
                b"br" | b"cr" if run_depth > 0 && skip_depth == 0 => text.push('\n'),
                b"p" if skip_depth == 0 => text.push_str("\n\n"),
                name => {
                    if let Some(label) = unsupported_label(name) {
                        skipped.insert(label);
                    }
                }
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                b"p" if skip_depth == 0 => text.push_str("\n\n"),
                name => {
                    if unsupported_label(name).is_some() {
                        skip_depth = skip_depth.saturating_sub(1);
                    }
                }
            },
            Event::Text(t) if in_text => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| ExtractError::DocxLoad(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::CData(t) if in_text => {
                text.push_str(&String::from_utf8_lossy(&t.into_inner()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let warnings = skipped
        .into_iter()
        .map(|element| format!("Unsupported element skipped: {}", element))
        .collect();

    Ok(Conversion { text, warnings })
}

/// DOCX file handler
pub struct DocxFile {
    diagnostics: Arc<dyn Diagnostics>,
}

impl DocxFile {
    pub fn new(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self { diagnostics }
    }
}

#[async_trait]
impl TextExtractor for DocxFile {
    async fn extract_bytes(&self, bytes: Vec<u8>) -> Result<String> {
        let conversion = tokio::task::spawn_blocking(move || convert(&bytes)).await??;

        for warning in &conversion.warnings {
            self.diagnostics.warn("docx", warning);
        }

        Ok(conversion.text)
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }
}
