// PathManager maps entry names onto the repository root.
//
// The layout is flat:
//
//	<root>
//	├── <entry>
//	└── <entry>
//
// Names are validated before they are ever joined onto the root, so every path
// handed out here is a direct child of it.

use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::utils::validation::is_valid_entry_name;

#[derive(Clone, Debug)]
pub struct PathManager {
    root_path: PathBuf,
}

impl PathManager {
    pub fn new(root: impl AsRef<Path>) -> Self {
        PathManager {
            root_path: root.as_ref().to_path_buf(),
        }
    }

    /// Returns the repository root, (e.g. `<root>`).
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Returns the path to a single entry, (e.g. `<root>/<name>`).
    pub fn entry_path(&self, name: &str) -> Result<PathBuf, AppError> {
        if !is_valid_entry_name(name) {
            return Err(AppError::InvalidName(name.to_string()));
        }
        Ok(self.root_path.join(name))
    }

    /// Confirms that an entry resolves inside the canonical root.
    ///
    /// A symbolic link placed under the root passes the textual name check but may
    /// point anywhere; such entries are refused, including links whose target does
    /// not exist yet, since a write would follow them.
    pub async fn ensure_contained(&self, name: &str, path: &Path) -> Result<(), AppError> {
        let is_link = matches!(
            tokio::fs::symlink_metadata(path).await,
            Ok(meta) if meta.file_type().is_symlink()
        );
        let root = tokio::fs::canonicalize(&self.root_path).await;
        let resolved = tokio::fs::canonicalize(path).await;
        match (root, resolved) {
            (Ok(root), Ok(resolved)) if resolved.parent() == Some(root.as_path()) => Ok(()),
            (Ok(_), Ok(_)) => Err(AppError::InvalidName(name.to_string())),
            (_, Err(_)) if is_link => Err(AppError::InvalidName(name.to_string())),
            // A missing plain entry is left for the caller's own lookup to report.
            _ => Ok(()),
        }
    }
}
