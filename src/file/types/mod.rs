pub mod docx;
pub mod epub;
pub mod pdf;
pub mod text;

pub use docx::DocxFile;
pub use epub::EpubFile;
pub use pdf::PdfFile;
pub use text::TextFile;
