use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use guerra_core::ProgressEvent;
use zip::ZipArchive;

use crate::{CancelFlag, PipelineError, ProgressReporter};

/// Every Nth archive member (counting from zero) emits a progress event.
pub const EXTRACT_REPORT_EVERY: usize = 50;

/// Unpacks every member of `archive_path` under `target_dir`, keeping
/// relative paths. Members that would escape the target are skipped.
///
/// Returns the number of members in the archive.
pub fn extract_archive(
    archive_path: &Path,
    target_dir: &Path,
    reporter: &dyn ProgressReporter,
    cancel: &CancelFlag,
) -> Result<usize, PipelineError> {
    fs::create_dir_all(target_dir).map_err(|err| {
        PipelineError::io(format!("failed to create {}", target_dir.display()), err)
    })?;

    let file = File::open(archive_path).map_err(|err| {
        PipelineError::io(format!("failed to open {}", archive_path.display()), err)
    })?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    let total = archive.len();

    for index in 0..total {
        cancel.check()?;
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();

        match entry.enclosed_name() {
            Some(relative) => {
                let outpath = target_dir.join(relative);
                if entry.is_dir() {
                    fs::create_dir_all(&outpath).map_err(|err| {
                        PipelineError::io(format!("failed to create {}", outpath.display()), err)
                    })?;
                } else {
                    if let Some(parent) = outpath.parent() {
                        fs::create_dir_all(parent).map_err(|err| {
                            PipelineError::io(format!("failed to create {}", parent.display()), err)
                        })?;
                    }
                    let mut outfile = File::create(&outpath).map_err(|err| {
                        PipelineError::io(format!("failed to create {}", outpath.display()), err)
                    })?;
                    io::copy(&mut entry, &mut outfile).map_err(|err| {
                        PipelineError::io(format!("failed to extract {name}"), err)
                    })?;
                    apply_unix_mode(&outpath, entry.unix_mode())?;
                }
            }
            None => log::warn!("skipping archive member outside the install directory: {name}"),
        }

        if index % EXTRACT_REPORT_EVERY == 0 {
            reporter.report(ProgressEvent::new(
                format!("Extracting: {}", member_base_name(&name)),
                index as f64 / total as f64 * 100.0,
            ));
        }
    }

    Ok(total)
}

#[cfg(unix)]
fn apply_unix_mode(path: &Path, mode: Option<u32>) -> Result<(), PipelineError> {
    use std::os::unix::fs::PermissionsExt;

    let Some(mode) = mode else {
        return Ok(());
    };
    // Owner read/write is kept so reinstalls can overwrite the file.
    fs::set_permissions(path, fs::Permissions::from_mode((mode & 0o7777) | 0o600)).map_err(|err| {
        PipelineError::io(format!("failed to set permissions on {}", path.display()), err)
    })
}

#[cfg(not(unix))]
fn apply_unix_mode(_path: &Path, _mode: Option<u32>) -> Result<(), PipelineError> {
    Ok(())
}

fn member_base_name(name: &str) -> &str {
    let trimmed = name.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
