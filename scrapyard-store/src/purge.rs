use std::{future::Future, path::PathBuf};

use tokio::fs;

use crate::{
    error::StoreError,
    fsops,
    index::{self, Index},
    record::TrashRecord,
    yard::{self, Yard},
};

#[derive(Debug, Default)]
pub struct PurgeSummary {
    pub failed: Vec<(String, StoreError)>,
    pub purged: Vec<String>,
}

#[tracing::instrument]
pub async fn purge(yard: &Yard, record: &TrashRecord) -> Result<(), StoreError> {
    fsops::remove_entry(&record.trashed_path).await?;
    index::retire(yard, &record.trashed_name).await?;

    tracing::info!("purged {}", record.trashed_name);

    Ok(())
}

// Failing entries do not stop the batch. Their index lines stay in place so
// the next listing still shows them for another attempt.
#[tracing::instrument]
pub async fn purge_all(yard: &Yard) -> Result<PurgeSummary, StoreError> {
    purge_all_with(yard, |path| async move { fsops::remove_entry(&path).await }).await
}

async fn purge_all_with<F, Fut>(yard: &Yard, remove: F) -> Result<PurgeSummary, StoreError>
where
    F: Fn(PathBuf) -> Fut,
    Fut: Future<Output = Result<(), StoreError>>,
{
    yard.ensure_exists().await?;

    let mut summary = PurgeSummary::default();

    let mut read_dir = match fs::read_dir(yard.root()).await {
        Ok(read_dir) => read_dir,
        Err(error) => {
            return Err(StoreError::EntryReadFailed(
                yard.root().to_path_buf(),
                error,
            ))
        }
    };

    loop {
        let entry = match read_dir.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(error) => {
                return Err(StoreError::EntryReadFailed(
                    yard.root().to_path_buf(),
                    error,
                ))
            }
        };

        let trashed_name = entry.file_name().to_string_lossy().to_string();
        if yard::is_reserved(&trashed_name) {
            continue;
        }

        match remove(entry.path()).await {
            Ok(()) => summary.purged.push(trashed_name),
            Err(error) => {
                tracing::error!("purging {} failed: {:?}", trashed_name, error);

                summary.failed.push((trashed_name, error));
            }
        }
    }

    if summary.failed.is_empty() {
        index::clear(yard).await?;
    } else {
        let mut index = Index::load(yard).await?;
        for trashed_name in &summary.purged {
            index.retire(trashed_name);
        }

        index.save(yard).await?;
    }

    tracing::info!(
        "purged {} entries, {} failed",
        summary.purged.len(),
        summary.failed.len()
    );

    Ok(summary)
}

#[cfg(test)]
mod test {
    use std::{io, path::Path};

    use crate::{error::StoreError, fsops, index::{self, Index}, yard::Yard};

    #[tokio::test]
    async fn purge_all_keeps_index_lines_for_entries_that_fail_removal() {
        let dir = tempfile::tempdir().unwrap();
        let yard = Yard::at(dir.path());
        tokio::fs::write(yard.entry_path("1-a.txt"), "a").await.unwrap();
        tokio::fs::write(yard.entry_path("2-b.txt"), "b").await.unwrap();
        index::record_move(&yard, "1-a.txt", Path::new("/home/u/documents/a.txt"))
            .await
            .unwrap();
        index::record_move(&yard, "2-b.txt", Path::new("/home/u/documents/b.txt"))
            .await
            .unwrap();

        let summary = super::purge_all_with(&yard, |path| async move {
            if path.ends_with("1-a.txt") {
                return Err(StoreError::EntryRemovalFailed(
                    path,
                    io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                ));
            }

            fsops::remove_entry(&path).await
        })
        .await
        .unwrap();

        assert_eq!(vec!["2-b.txt".to_string()], summary.purged);
        assert_eq!(1, summary.failed.len());
        assert_eq!("1-a.txt", summary.failed[0].0);
        assert!(yard.entry_path("1-a.txt").exists());
        assert!(!yard.entry_path("2-b.txt").exists());

        let index = Index::load(&yard).await.unwrap();
        assert_eq!(1, index.len());
        assert_eq!(
            Some(Path::new("/home/u/documents/a.txt")),
            index.origin_of("1-a.txt")
        );
    }
}
