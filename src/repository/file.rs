//! Local directory holding uploaded files.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::repository::FileStore;
use crate::repository::errors::{RepositoryError, RepositoryResult};

#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileStore for LocalFileStore {
    fn store(&self, source: &Path, extension: &str) -> RepositoryResult<String> {
        fs::create_dir_all(&self.root).map_err(|e| {
            RepositoryError::Unexpected(format!("Failed to create upload directory: {e}"))
        })?;

        let file_name = format!("{}.{extension}", Uuid::new_v4());
        fs::copy(source, self.root.join(&file_name))
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to store file: {e}")))?;

        Ok(file_name)
    }

    fn path_of(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    fn remove(&self, file_name: &str) -> RepositoryResult<()> {
        fs::remove_file(self.path_of(file_name))
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to remove file: {e}")))
    }
}
