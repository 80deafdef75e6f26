use std::path::Path;

use crate::error::AppError;

pub mod driver;
pub mod paths;

/// What a name currently resolves to beneath the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Absent,
}

/// Whether a write brought a new entry into existence or replaced an existing one.
///
/// Derived from the existence check made before the write, not from file metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Replaced,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    fn root(&self) -> &Path;
    async fn list(&self) -> Result<Vec<String>, AppError>;
    async fn read(&self, name: &str) -> Result<String, AppError>;
    async fn write(&self, name: &str, content: &str) -> Result<WriteOutcome, AppError>;
    async fn delete(&self, name: &str) -> Result<(), AppError>;
}
