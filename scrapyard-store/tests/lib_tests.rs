use std::{
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use scrapyard_store::{
    error::StoreError,
    index::{self, Index},
    purge, restore, scan, stash,
    yard::Yard,
};

fn write(path: &Path, content: &str) {
    std::fs::write(path, content).unwrap();
}

fn set_modified(path: &Path, modified: SystemTime) {
    let file = std::fs::OpenOptions::new().append(true).open(path).unwrap();
    file.set_modified(modified).unwrap();
}

fn prepared_origin(root: &Path, name: &str, content: &str) -> PathBuf {
    let origin_dir = root.join("home");
    std::fs::create_dir_all(&origin_dir).unwrap();

    let origin = origin_dir.join(name);
    write(&origin, content);

    origin
}

#[tokio::test]
async fn stashed_file_restores_to_its_origin() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path().join("yard"));
    let origin = prepared_origin(dir.path(), "notes.txt", "content");

    let trashed_name = stash::stash(&yard, &origin).await.unwrap();
    assert!(!origin.exists());

    let snapshot = scan::snapshot(&yard).await;
    let record = snapshot.find(&trashed_name).unwrap();
    assert_eq!(Some(origin.clone()), record.origin);
    assert_eq!("notes.txt", record.original_name());

    let restored_to = restore::restore(&yard, record).await.unwrap();
    assert_eq!(origin, restored_to);
    assert_eq!("content", std::fs::read_to_string(&origin).unwrap());

    let snapshot = scan::snapshot(&yard).await;
    assert!(snapshot.find(&trashed_name).is_none());
    assert!(snapshot.records.is_empty());
}

#[tokio::test]
async fn restore_never_overwrites_an_occupied_origin() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path().join("yard"));
    let origin = prepared_origin(dir.path(), "notes.txt", "trashed content");

    let trashed_name = stash::stash(&yard, &origin).await.unwrap();
    write(&origin, "fresh content");

    let snapshot = scan::snapshot(&yard).await;
    let record = snapshot.find(&trashed_name).unwrap();

    let restored_to = restore::restore(&yard, record).await.unwrap();

    assert_eq!(origin.with_file_name("notes_restored.txt"), restored_to);
    assert_eq!(
        "trashed content",
        std::fs::read_to_string(&restored_to).unwrap()
    );
    assert_eq!("fresh content", std::fs::read_to_string(&origin).unwrap());
}

#[tokio::test]
async fn restore_numbers_the_sibling_when_restored_name_is_taken_too() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path().join("yard"));
    let origin = prepared_origin(dir.path(), "notes.txt", "trashed content");

    let trashed_name = stash::stash(&yard, &origin).await.unwrap();
    write(&origin, "fresh content");
    write(&origin.with_file_name("notes_restored.txt"), "older restore");

    let snapshot = scan::snapshot(&yard).await;
    let record = snapshot.find(&trashed_name).unwrap();

    let restored_to = restore::restore(&yard, record).await.unwrap();

    assert_eq!(origin.with_file_name("notes_restored_2.txt"), restored_to);
    assert_eq!(
        "trashed content",
        std::fs::read_to_string(&restored_to).unwrap()
    );
}

#[tokio::test]
async fn unknown_entries_list_and_purge_but_do_not_restore() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path().join("yard"));
    std::fs::create_dir_all(yard.root()).unwrap();
    write(&yard.entry_path("orphan.bin"), "no line for me");

    let snapshot = scan::snapshot(&yard).await;
    assert!(snapshot.complete);

    let record = snapshot.find("orphan.bin").unwrap();
    assert_eq!(None, record.origin);
    assert_eq!("orphan.bin", record.original_name());

    let result = restore::restore(&yard, record).await;
    assert!(matches!(result, Err(StoreError::UnknownOrigin(_))));

    purge::purge(&yard, record).await.unwrap();
    assert!(!record.trashed_path.exists());
}

#[tokio::test]
async fn malformed_index_lines_do_not_poison_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path());
    write(&yard.entry_path("1-a.txt"), "kept alive for the save prune");
    write(
        &yard.index_path(),
        &format!(
            "{}|/home/u/a.txt\nbroken line without separator\n",
            yard.entry_path("1-a.txt").display()
        ),
    );

    let index = Index::load(&yard).await.unwrap();

    assert_eq!(1, index.len());
    assert_eq!(Some(Path::new("/home/u/a.txt")), index.origin_of("1-a.txt"));
}

#[tokio::test]
async fn purge_removes_entry_and_index_line() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path().join("yard"));
    let origin = prepared_origin(dir.path(), "notes.txt", "content");

    let trashed_name = stash::stash(&yard, &origin).await.unwrap();

    let snapshot = scan::snapshot(&yard).await;
    let record = snapshot.find(&trashed_name).unwrap();

    purge::purge(&yard, record).await.unwrap();

    assert!(!record.trashed_path.exists());
    let index = Index::load(&yard).await.unwrap();
    assert_eq!(None, index.origin_of(&trashed_name));
    assert!(index.is_empty());
}

#[tokio::test]
async fn purge_all_on_empty_yard_reports_zero() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path().join("yard"));

    let summary = purge::purge_all(&yard).await.unwrap();
    assert_eq!(0, summary.purged.len());
    assert!(summary.failed.is_empty());
    assert_eq!("", std::fs::read_to_string(yard.index_path()).unwrap());

    let summary = purge::purge_all(&yard).await.unwrap();
    assert_eq!(0, summary.purged.len());
}

#[tokio::test]
async fn purge_all_clears_yard_and_index() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path().join("yard"));
    let first = prepared_origin(dir.path(), "one.txt", "one");
    let second = prepared_origin(dir.path(), "two.txt", "two");

    stash::stash(&yard, &first).await.unwrap();
    stash::stash(&yard, &second).await.unwrap();

    let snapshot = scan::snapshot(&yard).await;
    assert_eq!(2, snapshot.records.len());

    let summary = purge::purge_all(&yard).await.unwrap();
    assert_eq!(2, summary.purged.len());
    assert!(summary.failed.is_empty());

    let snapshot = scan::snapshot(&yard).await;
    assert!(snapshot.records.is_empty());
    assert_eq!("", std::fs::read_to_string(yard.index_path()).unwrap());
}

#[tokio::test]
async fn snapshot_orders_by_modification_time() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path());
    write(&yard.entry_path("c.txt"), "oldest");
    write(&yard.entry_path("a.txt"), "middle");
    write(&yard.entry_path("b.txt"), "newest");

    let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    set_modified(&yard.entry_path("c.txt"), base);
    set_modified(&yard.entry_path("a.txt"), base + Duration::from_secs(60));
    set_modified(&yard.entry_path("b.txt"), base + Duration::from_secs(120));

    let snapshot = scan::snapshot(&yard).await;

    let names: Vec<&str> = snapshot
        .records
        .iter()
        .map(|record| record.trashed_name.as_str())
        .collect();
    assert_eq!(vec!["c.txt", "a.txt", "b.txt"], names);
}

#[tokio::test]
async fn restore_recreates_missing_origin_directories() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path().join("yard"));
    let nested = dir.path().join("deep/nested");
    std::fs::create_dir_all(&nested).unwrap();
    let origin = nested.join("notes.txt");
    write(&origin, "content");

    let trashed_name = stash::stash(&yard, &origin).await.unwrap();
    std::fs::remove_dir_all(dir.path().join("deep")).unwrap();

    let snapshot = scan::snapshot(&yard).await;
    let record = snapshot.find(&trashed_name).unwrap();

    let restored_to = restore::restore(&yard, record).await.unwrap();

    assert_eq!(origin, restored_to);
    assert_eq!("content", std::fs::read_to_string(&origin).unwrap());
}

#[tokio::test]
async fn stashing_equal_names_yields_distinct_entries() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path().join("yard"));

    let first_dir = dir.path().join("one");
    let second_dir = dir.path().join("two");
    std::fs::create_dir_all(&first_dir).unwrap();
    std::fs::create_dir_all(&second_dir).unwrap();
    write(&first_dir.join("notes.txt"), "first");
    write(&second_dir.join("notes.txt"), "second");

    let first = stash::stash(&yard, &first_dir.join("notes.txt")).await.unwrap();
    let second = stash::stash(&yard, &second_dir.join("notes.txt")).await.unwrap();

    assert_ne!(first, second);

    let snapshot = scan::snapshot(&yard).await;
    assert_eq!(2, snapshot.records.len());
    assert_eq!(
        Some(first_dir.join("notes.txt")),
        snapshot.find(&first).unwrap().origin
    );
    assert_eq!(
        Some(second_dir.join("notes.txt")),
        snapshot.find(&second).unwrap().origin
    );
}

#[tokio::test]
async fn origins_with_separator_characters_survive_the_index() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path().join("yard"));
    let odd_dir = dir.path().join("odd|name");
    std::fs::create_dir_all(&odd_dir).unwrap();
    let origin = odd_dir.join("notes.txt");
    write(&origin, "content");

    let trashed_name = stash::stash(&yard, &origin).await.unwrap();

    let snapshot = scan::snapshot(&yard).await;
    let record = snapshot.find(&trashed_name).unwrap();
    assert_eq!(Some(origin.clone()), record.origin);

    let restored_to = restore::restore(&yard, record).await.unwrap();
    assert_eq!(origin, restored_to);
}

#[tokio::test]
async fn stashed_directory_round_trips_with_children() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path().join("yard"));
    let tree = dir.path().join("home/project");
    std::fs::create_dir_all(tree.join("src")).unwrap();
    write(&tree.join("src/main.rs"), "fn main() {}");

    let trashed_name = stash::stash(&yard, &tree).await.unwrap();
    assert!(!tree.exists());

    let snapshot = scan::snapshot(&yard).await;
    let record = snapshot.find(&trashed_name).unwrap();
    assert!(record.is_directory);

    restore::restore(&yard, record).await.unwrap();

    assert_eq!(
        "fn main() {}",
        std::fs::read_to_string(tree.join("src/main.rs")).unwrap()
    );
}

#[tokio::test]
async fn stash_refuses_paths_inside_the_yard() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path().join("yard"));
    std::fs::create_dir_all(yard.root()).unwrap();
    let inside = yard.entry_path("1-already-here.txt");
    write(&inside, "content");

    let result = stash::stash(&yard, &inside).await;

    assert!(matches!(result, Err(StoreError::SourceInsideYard(_))));
    assert!(inside.exists());
}

#[tokio::test]
async fn missing_yard_yields_a_complete_empty_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path().join("never-created"));

    let snapshot = scan::snapshot(&yard).await;

    assert!(snapshot.complete);
    assert!(snapshot.records.is_empty());
}

#[tokio::test]
async fn record_move_updates_an_existing_line() {
    let dir = tempfile::tempdir().unwrap();
    let yard = Yard::at(dir.path());
    write(&yard.entry_path("1-a.txt"), "content");

    index::record_move(&yard, "1-a.txt", Path::new("/home/u/old/a.txt"))
        .await
        .unwrap();
    index::record_move(&yard, "1-a.txt", Path::new("/home/u/new/a.txt"))
        .await
        .unwrap();

    let index = Index::load(&yard).await.unwrap();
    assert_eq!(1, index.len());
    assert_eq!(
        Some(Path::new("/home/u/new/a.txt")),
        index.origin_of("1-a.txt")
    );
}
