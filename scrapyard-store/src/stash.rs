use std::{
    path::{absolute, Path},
    time::{self, SystemTime},
};

use crate::{error::StoreError, fsops, index, yard::Yard};

#[tracing::instrument]
pub async fn stash(yard: &Yard, path: &Path) -> Result<String, StoreError> {
    let source = match absolute(path) {
        Ok(source) => source,
        Err(error) => return Err(StoreError::EntryReadFailed(path.to_path_buf(), error)),
    };

    if yard.contains(&source) {
        return Err(StoreError::SourceInsideYard(source));
    }

    // The index is utf8 text, a path it cannot hold must not be stashed.
    if source.to_str().is_none() {
        return Err(StoreError::NonUnicodePath(source));
    }

    let file_name = match source.file_name().and_then(|name| name.to_str()) {
        Some(name) => name.to_string(),
        None => return Err(StoreError::InvalidSourcePath(source)),
    };

    yard.ensure_exists().await?;

    let trashed_name = next_free_name(yard, &file_name);
    fsops::move_entry(&source, &yard.entry_path(&trashed_name)).await?;

    index::record_move(yard, &trashed_name, &source).await?;

    tracing::info!("stashed {:?} as {}", source, trashed_name);

    Ok(trashed_name)
}

fn next_free_name(yard: &Yard, file_name: &str) -> String {
    let stashed_at = match SystemTime::now().duration_since(time::UNIX_EPOCH) {
        Ok(time) => time.as_millis(),
        Err(_) => 0,
    };

    let mut qualifier = 1;
    loop {
        let candidate = qualified_name(stashed_at, qualifier, file_name);
        if yard.entry_path(&candidate).symlink_metadata().is_err() {
            return candidate;
        }

        qualifier += 1;
    }
}

fn qualified_name(stashed_at: u128, qualifier: u32, file_name: &str) -> String {
    if qualifier < 2 {
        format!("{}-{}", stashed_at, file_name)
    } else {
        format!("{}-{}-{}", stashed_at, qualifier, file_name)
    }
}
