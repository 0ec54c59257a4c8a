pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extractor;
pub mod file;
pub mod models;
pub mod reading;
pub mod utils;

pub use diagnostics::{Diagnostics, MemoryDiagnostics, TracingDiagnostics};
pub use error::ExtractError;
pub use extractor::{Extractor, TextExtractor};
pub use file::ByteSource;
pub use models::{DocumentFormat, DocumentReference};
pub use reading::ReadingStats;
