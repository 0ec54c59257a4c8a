//! Word-level helpers for the reading view: tokenizing extracted text,
//! grouping words into display chunks and pacing them.

use crate::config::ReaderConfig;
use serde::Serialize;
use std::time::Duration;

const NANOS_PER_MINUTE: u64 = 60_000_000_000;

/// Split text into words on any whitespace
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Group words into chunks of `chunk_size` (at least one word each)
pub fn chunk_words(words: &[&str], chunk_size: usize) -> Vec<String> {
    words
        .chunks(chunk_size.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Time each chunk stays on screen
pub fn tick_interval(words_per_minute: u32, chunk_size: usize) -> Duration {
    Duration::from_nanos(NANOS_PER_MINUTE.saturating_mul(chunk_size.max(1) as u64) / u64::from(words_per_minute.max(1)))
}

/// Time needed to read `word_count` words
pub fn estimated_duration(word_count: usize, words_per_minute: u32) -> Duration {
    Duration::from_nanos(NANOS_PER_MINUTE.saturating_mul(word_count as u64) / u64::from(words_per_minute.max(1)))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingStats {
    pub words: usize,
    pub chunks: usize,
    pub words_per_minute: u32,
    pub chunk_size: usize,
    #[serde(with = "duration_secs")]
    pub duration: Duration,
}

impl ReadingStats {
    pub fn compute(text: &str, reader: &ReaderConfig) -> Self {
        let reader = reader.normalized();
        let words = tokenize(text).len();
        let chunks = words.div_ceil(reader.chunk_size);
        Self {
            words,
            chunks,
            words_per_minute: reader.words_per_minute,
            chunk_size: reader.chunk_size,
            duration: tick_interval(reader.words_per_minute, reader.chunk_size) * chunks as u32,
        }
    }

    /// The document had no extractable text
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }
}
