pub mod factory;
pub mod source;
pub mod staging;
pub mod r#trait;
pub mod types;

pub use factory::FileFactory;
pub use r#trait::ByteSource;
pub use source::{FsSource, MemorySource};
pub use staging::StagingFile;
pub use types::{DocxFile, EpubFile, PdfFile, TextFile};
