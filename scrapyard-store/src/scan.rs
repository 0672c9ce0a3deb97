use std::{io::ErrorKind, time::SystemTime};

use tokio::fs;

use crate::{
    index::Index,
    record::TrashRecord,
    yard::{self, Yard},
};

// An incomplete snapshot means the yard or index could not be read in full,
// so an empty listing is ambiguous. Callers decide how loudly to say so.
#[derive(Debug)]
pub struct Snapshot {
    pub complete: bool,
    pub records: Vec<TrashRecord>,
}

impl Snapshot {
    pub fn find(&self, trashed_name: &str) -> Option<&TrashRecord> {
        self.records
            .iter()
            .find(|record| record.trashed_name == trashed_name)
    }
}

#[tracing::instrument]
pub async fn snapshot(yard: &Yard) -> Snapshot {
    let mut complete = true;

    let index = match Index::load(yard).await {
        Ok(index) => index,
        Err(error) => {
            tracing::error!("loading index failed: {:?}", error);

            complete = false;
            Index::default()
        }
    };

    let mut read_dir = match fs::read_dir(yard.root()).await {
        Ok(read_dir) => read_dir,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::debug!("yard {:?} does not exist, listing is empty", yard.root());

            return Snapshot {
                complete,
                records: Vec::new(),
            };
        }
        Err(error) => {
            tracing::error!("reading yard {:?} failed: {:?}", yard.root(), error);

            return Snapshot {
                complete: false,
                records: Vec::new(),
            };
        }
    };

    let mut records = Vec::new();
    loop {
        let entry = match read_dir.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(error) => {
                tracing::error!("enumerating yard {:?} failed: {:?}", yard.root(), error);

                complete = false;
                break;
            }
        };

        let file_name = entry.file_name();
        let trashed_name = match file_name.to_str() {
            Some(name) => name.to_string(),
            None => {
                tracing::warn!("skipping entry with non unicode name {:?}", file_name);

                complete = false;
                continue;
            }
        };

        if yard::is_reserved(&trashed_name) {
            continue;
        }

        let metadata = match entry.metadata().await {
            Ok(metadata) => metadata,
            Err(error) => {
                tracing::warn!("skipping {}: reading metadata failed: {:?}", trashed_name, error);

                complete = false;
                continue;
            }
        };

        let modified = match metadata.modified() {
            Ok(modified) => modified,
            Err(_) => SystemTime::UNIX_EPOCH,
        };

        records.push(TrashRecord {
            is_directory: metadata.is_dir(),
            modified,
            origin: index
                .origin_of(&trashed_name)
                .map(|origin| origin.to_path_buf()),
            size: metadata.len(),
            trashed_name,
            trashed_path: entry.path(),
        });
    }

    records.sort_by(|one, other| {
        one.modified
            .cmp(&other.modified)
            .then_with(|| one.trashed_name.cmp(&other.trashed_name))
    });

    tracing::debug!("snapshot holds {} records", records.len());

    Snapshot { complete, records }
}
