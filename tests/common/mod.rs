#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// One-font PDF with a single text run per page
pub fn pdf(pages: &[&str]) -> Vec<u8> {
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

/// DOCX package whose body holds the given WordprocessingML fragment
pub fn docx(body: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("[Content_Types].xml", FileOptions::default()).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#,
    )
    .unwrap();
    zip.start_file("word/document.xml", FileOptions::default()).unwrap();
    zip.write_all(document.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

pub struct Chapter<'a> {
    pub id: &'a str,
    pub html: Option<&'a str>,
}

impl<'a> Chapter<'a> {
    pub fn new(id: &'a str, html: &'a str) -> Self {
        Self { id, html: Some(html) }
    }

    /// Listed in the manifest and spine, but missing from the archive
    pub fn missing(id: &'a str) -> Self {
        Self { id, html: None }
    }
}

/// EPUB 2 container with one spine entry per chapter
pub fn epub(chapters: &[Chapter]) -> Vec<u8> {
    let mut manifest = String::from(
        r#"<item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>"#,
    );
    let mut spine = String::new();
    let mut nav_points = String::new();
    for (index, chapter) in chapters.iter().enumerate() {
        manifest.push_str(&format!(
            r#"<item id="{id}" href="{id}.xhtml" media-type="application/xhtml+xml"/>"#,
            id = chapter.id
        ));
        spine.push_str(&format!(r#"<itemref idref="{}"/>"#, chapter.id));
        nav_points.push_str(&format!(
            r#"<navPoint id="nav-{id}" playOrder="{order}"><navLabel><text>{id}</text></navLabel><content src="{id}.xhtml"/></navPoint>"#,
            id = chapter.id,
            order = index + 1
        ));
    }

    let opf = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="BookId">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>Fixture Book</dc:title>
    <dc:identifier id="BookId">urn:uuid:0f4c3a52-7a55-4a3e-9a4f-3f1f0e6b2d11</dc:identifier>
    <dc:language>en</dc:language>
  </metadata>
  <manifest>{}</manifest>
  <spine toc="ncx">{}</spine>
</package>"#,
        manifest, spine
    );

    let ncx = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head><meta name="dtb:uid" content="urn:uuid:0f4c3a52-7a55-4a3e-9a4f-3f1f0e6b2d11"/></head>
  <docTitle><text>Fixture Book</text></docTitle>
  <navMap>{}</navMap>
</ncx>"#,
        nav_points
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file(
        "mimetype",
        FileOptions::default().compression_method(CompressionMethod::Stored),
    )
    .unwrap();
    zip.write_all(b"application/epub+zip").unwrap();

    zip.start_file("META-INF/container.xml", FileOptions::default()).unwrap();
    zip.write_all(
        br#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#,
    )
    .unwrap();

    zip.start_file("OEBPS/content.opf", FileOptions::default()).unwrap();
    zip.write_all(opf.as_bytes()).unwrap();
    zip.start_file("OEBPS/toc.ncx", FileOptions::default()).unwrap();
    zip.write_all(ncx.as_bytes()).unwrap();

    for chapter in chapters {
        if let Some(html) = chapter.html {
            zip.start_file(format!("OEBPS/{}.xhtml", chapter.id), FileOptions::default())
                .unwrap();
            zip.write_all(
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml"><head><meta charset="utf-8"/></head><body>{}</body></html>"#,
                    html
                )
                .as_bytes(),
            )
            .unwrap();
        }
    }

    zip.finish().unwrap().into_inner()
}

/// Number of entries left in a directory
pub fn entries(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}
