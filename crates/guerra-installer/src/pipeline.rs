use std::fs;
use std::path::Path;

use guerra_core::ProgressEvent;
use reqwest::blocking::Client;
use tempfile::TempDir;

use crate::{
    download_archive, extract_archive, CancelFlag, DownloadSummary, InstallStage, PipelineError,
    ProgressReporter,
};

const ARCHIVE_FILE_NAME: &str = "modpack.zip";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub download: DownloadSummary,
    pub members: usize,
}

/// Downloads the archive at `url` into a scratch directory and unpacks it
/// into `target_dir`. The scratch directory is removed on every exit path.
///
/// `target_dir` is only created once the download has finished.
pub fn run_pipeline(
    client: &Client,
    url: &str,
    target_dir: &Path,
    temp_root: Option<&Path>,
    reporter: &dyn ProgressReporter,
    cancel: &CancelFlag,
) -> Result<PipelineSummary, PipelineError> {
    run_pipeline_stages(client, url, target_dir, temp_root, reporter, cancel, |_| {})
}

pub(crate) fn run_pipeline_stages(
    client: &Client,
    url: &str,
    target_dir: &Path,
    temp_root: Option<&Path>,
    reporter: &dyn ProgressReporter,
    cancel: &CancelFlag,
    mut on_stage: impl FnMut(InstallStage),
) -> Result<PipelineSummary, PipelineError> {
    let scratch = scratch_dir(temp_root)?;
    let archive_path = scratch.path().join(ARCHIVE_FILE_NAME);

    on_stage(InstallStage::Downloading);
    let download = download_archive(client, url, &archive_path, reporter, cancel)?;
    log::info!(
        "downloaded {} bytes (sha256 {})",
        download.bytes_written,
        download.sha256
    );

    on_stage(InstallStage::Extracting);
    reporter.report(ProgressEvent::new("Extracting files...", 100.0));
    let members = extract_archive(&archive_path, target_dir, reporter, cancel)?;

    if let Err(err) = scratch.close() {
        log::warn!("failed to remove download scratch directory: {err}");
    }

    Ok(PipelineSummary { download, members })
}

fn scratch_dir(temp_root: Option<&Path>) -> Result<TempDir, PipelineError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("guerra-download-");
    let created = match temp_root {
        Some(root) => fs::create_dir_all(root).and_then(|()| builder.tempdir_in(root)),
        None => builder.tempdir(),
    };
    created.map_err(|err| {
        PipelineError::io("failed to create temporary download directory", err)
    })
}
