use crate::error::{ExtractError, Result};
use crate::file::ByteSource;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Document stored on the local filesystem
#[derive(Debug, Clone)]
pub struct FsSource {
    path: PathBuf,
}

impl FsSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ByteSource for FsSource {
    async fn read_binary(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| ExtractError::Read {
                path: self.path.clone(),
                source,
            })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// Document whose bytes the host already holds in memory
#[derive(Debug, Clone)]
pub struct MemorySource {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(path: PathBuf, bytes: Vec<u8>) -> Self {
        Self { path, bytes }
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    async fn read_binary(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
