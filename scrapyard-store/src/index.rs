use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::fs;

use crate::{error::StoreError, yard::Yard};

// One line per trashed entry: "<trashed path>|<origin path>". Lines are
// rewritten as a whole on every update, keeping the newest mapping per name.
#[derive(Debug, Default)]
pub struct Index {
    entries: HashMap<String, PathBuf>,
}

impl Index {
    #[tracing::instrument]
    pub async fn load(yard: &Yard) -> Result<Self, StoreError> {
        let index_path = yard.index_path();
        let content = match fs::read(&index_path).await {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!("index does not exist on path {:?}", index_path);

                return Ok(Self::default());
            }
            Err(error) => return Err(StoreError::IndexReadFailed(index_path, error)),
        };

        tracing::trace!("index read with {} bytes", content.len());

        Ok(Self {
            entries: parse(&content),
        })
    }

    pub async fn save(&self, yard: &Yard) -> Result<(), StoreError> {
        yard.ensure_exists().await?;

        let content = encode(yard, &self.entries)?;

        let tmp_path = yard.index_tmp_path();
        if let Err(error) = fs::write(&tmp_path, &content).await {
            return Err(StoreError::IndexWriteFailed(tmp_path, error));
        }

        let index_path = yard.index_path();
        if let Err(error) = fs::rename(&tmp_path, &index_path).await {
            return Err(StoreError::IndexWriteFailed(index_path, error));
        }

        tracing::trace!("index written with {} bytes", content.len());

        Ok(())
    }

    pub fn origin_of(&self, trashed_name: &str) -> Option<&Path> {
        self.entries.get(trashed_name).map(PathBuf::as_path)
    }

    pub fn record(&mut self, trashed_name: &str, origin: &Path) {
        self.entries
            .insert(trashed_name.to_string(), origin.to_path_buf());
    }

    pub fn retire(&mut self, trashed_name: &str) -> bool {
        self.entries.remove(trashed_name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[tracing::instrument]
pub async fn record_move(yard: &Yard, trashed_name: &str, origin: &Path) -> Result<(), StoreError> {
    let mut index = Index::load(yard).await?;
    index.record(trashed_name, origin);
    index.save(yard).await
}

#[tracing::instrument]
pub async fn retire(yard: &Yard, trashed_name: &str) -> Result<(), StoreError> {
    let mut index = Index::load(yard).await?;
    if !index.retire(trashed_name) {
        tracing::debug!("no index line for {}, nothing to retire", trashed_name);
    }

    index.save(yard).await
}

pub async fn clear(yard: &Yard) -> Result<(), StoreError> {
    Index::default().save(yard).await
}

fn parse(content: &[u8]) -> HashMap<String, PathBuf> {
    let mut entries = HashMap::new();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .flexible(true)
        .has_headers(false)
        .from_reader(content);

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!("skipping unreadable index line: {:?}", error);
                continue;
            }
        };

        let trashed_path = match record.get(0) {
            Some(path) if !path.is_empty() => path,
            _ => continue,
        };

        let origin = match record.get(1) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => {
                tracing::warn!("skipping index line without origin for {}", trashed_path);
                continue;
            }
        };

        let trashed_name = match Path::new(trashed_path).file_name() {
            Some(name) => match name.to_str() {
                Some(name) => name.to_string(),
                None => continue,
            },
            None => continue,
        };

        entries.insert(trashed_name, origin);
    }

    entries
}

fn encode(yard: &Yard, entries: &HashMap<String, PathBuf>) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'|')
        .from_writer(Vec::new());

    for (trashed_name, origin) in entries {
        let trashed_path = yard.entry_path(trashed_name);
        if !trashed_path.exists() {
            continue;
        }

        let origin = match origin.to_str() {
            Some(origin) => origin,
            None => continue,
        };

        if let Some(trashed_path) = trashed_path.to_str() {
            writer.write_record([trashed_path, origin])?;
        }
    }

    match writer.into_inner() {
        Ok(content) => Ok(content),
        Err(error) => Err(StoreError::IndexEncodeFailed(error.into_error().into())),
    }
}
