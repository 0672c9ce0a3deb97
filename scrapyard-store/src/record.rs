use std::{path::PathBuf, time::SystemTime};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TrashRecord {
    pub is_directory: bool,
    pub modified: SystemTime,
    pub origin: Option<PathBuf>,
    pub size: u64,
    pub trashed_name: String,
    pub trashed_path: PathBuf,
}

impl TrashRecord {
    pub fn original_name(&self) -> &str {
        let origin_name = self
            .origin
            .as_deref()
            .and_then(|origin| origin.file_name())
            .and_then(|name| name.to_str());

        match origin_name {
            Some(name) => name,
            None => &self.trashed_name,
        }
    }
}
