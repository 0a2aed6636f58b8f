use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadSource {
    Archive(String),
    /// No usable link is configured; the run installs in simulation mode.
    Unconfigured,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSpec {
    pub source: DownloadSource,
    pub target_dir: PathBuf,
}

impl DownloadSpec {
    pub fn url(&self) -> Option<&str> {
        match &self.source {
            DownloadSource::Archive(url) => Some(url),
            DownloadSource::Unconfigured => None,
        }
    }

    pub fn is_simulation(&self) -> bool {
        self.source == DownloadSource::Unconfigured
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }
}
