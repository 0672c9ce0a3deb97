use std::path::{Path, PathBuf};

use tokio::fs;

use crate::{error::StoreError, fsops, index, record::TrashRecord, yard::Yard};

#[tracing::instrument]
pub async fn restore(yard: &Yard, record: &TrashRecord) -> Result<PathBuf, StoreError> {
    let origin = match &record.origin {
        Some(origin) => origin,
        None => return Err(StoreError::UnknownOrigin(record.trashed_name.clone())),
    };

    if let Some(parent) = origin.parent() {
        if !parent.exists() {
            if let Err(error) = fs::create_dir_all(parent).await {
                return Err(StoreError::DirectoryCreationFailed(
                    parent.to_path_buf(),
                    error,
                ));
            }
        }
    }

    let destination = resolve_destination(origin);
    if destination != *origin {
        tracing::debug!("origin {:?} is occupied, restoring to {:?}", origin, destination);
    }

    fsops::move_entry(&record.trashed_path, &destination).await?;

    // The entry left the yard, so a failed line removal only leaves a stale
    // line behind. The next index rewrite drops it.
    if let Err(error) = index::retire(yard, &record.trashed_name).await {
        tracing::warn!(
            "index update after restoring {} failed, line is stale: {:?}",
            record.trashed_name,
            error
        );
    }

    Ok(destination)
}

fn resolve_destination(origin: &Path) -> PathBuf {
    if !occupied(origin) {
        return origin.to_path_buf();
    }

    let mut attempt = 1;
    loop {
        let candidate = restored_sibling(origin, attempt);
        if !occupied(&candidate) {
            return candidate;
        }

        attempt += 1;
    }
}

fn occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

fn restored_sibling(origin: &Path, attempt: u32) -> PathBuf {
    let stem = origin
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    let name = match (origin.extension(), attempt) {
        (Some(extension), 1) => format!("{}_restored.{}", stem, extension.to_string_lossy()),
        (Some(extension), attempt) => {
            format!("{}_restored_{}.{}", stem, attempt, extension.to_string_lossy())
        }
        (None, 1) => format!("{}_restored", stem),
        (None, attempt) => format!("{}_restored_{}", stem, attempt),
    };

    origin.with_file_name(name)
}
