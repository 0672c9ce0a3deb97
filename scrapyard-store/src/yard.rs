use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::StoreError;

pub const INDEX_FILE_NAME: &str = ".scrapinfo";
pub const INDEX_TMP_FILE_NAME: &str = ".scrapinfo.tmp";

const RESERVED_NAMES: [&str; 3] = [INDEX_FILE_NAME, INDEX_TMP_FILE_NAME, ".DS_Store"];

#[derive(Clone, Debug)]
pub struct Yard {
    root: PathBuf,
}

impl Yard {
    pub fn resolve() -> Result<Self, StoreError> {
        let root = match dirs::home_dir() {
            Some(home_dir) => home_dir.join(".scrapyard"),
            None => return Err(StoreError::HomeDirectoryNotResolved),
        };

        Ok(Self { root })
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE_NAME)
    }

    pub fn index_tmp_path(&self) -> PathBuf {
        self.root.join(INDEX_TMP_FILE_NAME)
    }

    pub fn entry_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }

    pub async fn ensure_exists(&self) -> Result<(), StoreError> {
        if !self.root.exists() {
            if let Err(error) = fs::create_dir_all(&self.root).await {
                return Err(StoreError::DirectoryCreationFailed(self.root.clone(), error));
            }
        }

        Ok(())
    }
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}
