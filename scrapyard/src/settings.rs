use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct Settings {
    pub yard: Option<PathBuf>,
}
