use std::{io::ErrorKind, path::Path};

use tokio::fs;

use crate::error::StoreError;

pub async fn move_entry(from: &Path, to: &Path) -> Result<(), StoreError> {
    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == ErrorKind::CrossesDevices => {
            tracing::debug!("rename of {:?} crossed devices, copying instead", from);

            copy_then_remove(from, to).await
        }
        Err(error) => Err(StoreError::MoveFailed(
            from.to_path_buf(),
            to.to_path_buf(),
            error,
        )),
    }
}

// The source is only removed after the copied tree holds the expected byte
// total. On verification failure both sides are left in place.
pub(crate) async fn copy_then_remove(from: &Path, to: &Path) -> Result<(), StoreError> {
    let expected = copy_recursive(from, to).await?;
    let found = tree_size(to).await?;
    if expected != found {
        return Err(StoreError::CopyVerificationFailed(
            to.to_path_buf(),
            expected,
            found,
        ));
    }

    tracing::debug!("copied {:?} with {} bytes, removing source", from, expected);

    remove_entry(from).await
}

// An entry already gone counts as removed.
pub async fn remove_entry(path: &Path) -> Result<(), StoreError> {
    let metadata = match fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(()),
        Err(error) => return Err(StoreError::EntryReadFailed(path.to_path_buf(), error)),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    };

    match result {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
        Err(error) => Err(StoreError::EntryRemovalFailed(path.to_path_buf(), error)),
    }
}

async fn copy_recursive(from: &Path, to: &Path) -> Result<u64, StoreError> {
    let mut copied = 0;
    let mut pending = vec![(from.to_path_buf(), to.to_path_buf())];

    while let Some((source, target)) = pending.pop() {
        let metadata = match fs::symlink_metadata(&source).await {
            Ok(metadata) => metadata,
            Err(error) => return Err(StoreError::EntryReadFailed(source, error)),
        };

        if metadata.is_dir() {
            if let Err(error) = fs::create_dir_all(&target).await {
                return Err(StoreError::DirectoryCreationFailed(target, error));
            }

            let mut read_dir = match fs::read_dir(&source).await {
                Ok(read_dir) => read_dir,
                Err(error) => return Err(StoreError::EntryReadFailed(source, error)),
            };

            loop {
                let entry = match read_dir.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break,
                    Err(error) => return Err(StoreError::EntryReadFailed(source, error)),
                };

                pending.push((entry.path(), target.join(entry.file_name())));
            }
        } else {
            match fs::copy(&source, &target).await {
                Ok(bytes) => copied += bytes,
                Err(error) => return Err(StoreError::CopyFailed(source, target, error)),
            }
        }
    }

    Ok(copied)
}

async fn tree_size(path: &Path) -> Result<u64, StoreError> {
    let mut size = 0;
    let mut pending = vec![path.to_path_buf()];

    while let Some(current) = pending.pop() {
        let metadata = match fs::symlink_metadata(&current).await {
            Ok(metadata) => metadata,
            Err(error) => return Err(StoreError::EntryReadFailed(current, error)),
        };

        if metadata.is_dir() {
            let mut read_dir = match fs::read_dir(&current).await {
                Ok(read_dir) => read_dir,
                Err(error) => return Err(StoreError::EntryReadFailed(current, error)),
            };

            loop {
                let entry = match read_dir.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break,
                    Err(error) => return Err(StoreError::EntryReadFailed(current, error)),
                };

                pending.push(entry.path());
            }
        } else {
            size += metadata.len();
        }
    }

    Ok(size)
}
