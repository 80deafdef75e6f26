use std::path::{Path, PathBuf};

use crate::error::{AppError, MapToAppError};
use crate::storage::paths::PathManager;
use crate::storage::{EntryKind, Storage, WriteOutcome};

use tokio::fs::{metadata, read, read_dir, remove_file, write};
use tokio::io;

pub struct FilesystemStorage {
    path_manager: PathManager,
}

impl FilesystemStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        FilesystemStorage {
            path_manager: PathManager::new(root),
        }
    }

    async fn kind_of(path: &Path) -> Result<EntryKind, AppError> {
        match metadata(path).await {
            Ok(meta) if meta.is_dir() => Ok(EntryKind::Directory),
            Ok(_) => Ok(EntryKind::File),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(EntryKind::Absent),
            Err(err) => Err(err).map_to_io("Could not access file"),
        }
    }

    /// Resolves `name` to an existing regular file, or reports why it can't.
    async fn existing_file(&self, name: &str) -> Result<PathBuf, AppError> {
        let path = self.path_manager.entry_path(name)?;
        match Self::kind_of(&path).await? {
            EntryKind::File => Ok(path),
            EntryKind::Directory => Err(AppError::NotAFile(name.to_string())),
            EntryKind::Absent => Err(AppError::NotFound(name.to_string())),
        }
    }

    #[cfg(test)]
    async fn kind(&self, name: &str) -> Result<EntryKind, AppError> {
        let path = self.path_manager.entry_path(name)?;
        Self::kind_of(&path).await
    }
}

#[async_trait::async_trait]
impl Storage for FilesystemStorage {
    fn root(&self) -> &Path {
        self.path_manager.root_path()
    }

    async fn list(&self) -> Result<Vec<String>, AppError> {
        let mut entries = vec![];
        let mut read_dir = read_dir(self.path_manager.root_path())
            .await
            .map_to_io("Could not list directory")?;
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_to_io("Could not list directory")?
        {
            if let Some(file_name) = entry.file_name().to_str() {
                entries.push(file_name.to_string());
            }
        }
        Ok(entries)
    }

    async fn read(&self, name: &str) -> Result<String, AppError> {
        let path = self.existing_file(name).await?;
        self.path_manager.ensure_contained(name, &path).await?;
        let bytes = read(&path).await.map_to_io("Could not read file")?;
        String::from_utf8(bytes).map_err(|_| AppError::Decode {
            context: "Could not read file",
        })
    }

    async fn write(&self, name: &str, content: &str) -> Result<WriteOutcome, AppError> {
        let path = self.path_manager.entry_path(name)?;
        // Runs before the existence check, which follows links and sees a dangling one as absent.
        self.path_manager.ensure_contained(name, &path).await?;
        let outcome = match Self::kind_of(&path).await? {
            EntryKind::Absent => WriteOutcome::Created,
            EntryKind::File | EntryKind::Directory => WriteOutcome::Replaced,
        };

        // Truncates an existing file; a directory fails here and is reported as an I/O error.
        write(&path, content.as_bytes())
            .await
            .map_to_io("Could not write to file")?;
        Ok(outcome)
    }

    async fn delete(&self, name: &str) -> Result<(), AppError> {
        let path = self.existing_file(name).await?;
        remove_file(&path).await.map_to_io("Could not delete file")
    }
}
