use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use guerra_core::ProgressEvent;
use reqwest::blocking::Client;
use sha2::{Digest, Sha256};

use crate::{CancelFlag, PipelineError, ProgressReporter};

pub const DOWNLOAD_CHUNK_SIZE: usize = 1024;
/// Bytes written between two download progress events.
pub const DOWNLOAD_REPORT_INTERVAL: u64 = 200 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSummary {
    pub bytes_written: u64,
    pub total_bytes: Option<u64>,
    pub sha256: String,
}

/// Streams `url` into `dest`.
///
/// Progress is only reported when the server announces a length; otherwise
/// the download runs silently until it completes.
pub fn download_archive(
    client: &Client,
    url: &str,
    dest: &Path,
    reporter: &dyn ProgressReporter,
    cancel: &CancelFlag,
) -> Result<DownloadSummary, PipelineError> {
    cancel.check()?;
    let mut response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(PipelineError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let total_bytes = response.content_length().filter(|len| *len > 0);
    log::debug!("downloading {url} ({total_bytes:?} bytes announced)");

    let mut file = File::create(dest)
        .map_err(|err| PipelineError::io(format!("failed to create {}", dest.display()), err))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; DOWNLOAD_CHUNK_SIZE];
    let mut written = 0_u64;
    let mut last_reported = 0_u64;

    loop {
        cancel.check()?;
        let read = match response.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => {
                return Err(PipelineError::io(
                    format!("connection interrupted while downloading {url}"),
                    err,
                ))
            }
        };

        let chunk = &buffer[..read];
        file.write_all(chunk)
            .map_err(|err| PipelineError::io(format!("failed to write {}", dest.display()), err))?;
        hasher.update(chunk);
        written += read as u64;

        if let Some(total) = total_bytes {
            if written - last_reported >= DOWNLOAD_REPORT_INTERVAL {
                last_reported = written;
                reporter.report(download_event(written, total));
            }
        }
    }

    file.flush()
        .map_err(|err| PipelineError::io(format!("failed to flush {}", dest.display()), err))?;

    if let Some(total) = total_bytes {
        if last_reported != written {
            reporter.report(download_event(written, total));
        }
    }

    Ok(DownloadSummary {
        bytes_written: written,
        total_bytes,
        sha256: hex::encode(hasher.finalize()),
    })
}

fn download_event(written: u64, total: u64) -> ProgressEvent {
    let percent = written as f64 / total as f64 * 100.0;
    ProgressEvent::new(format!("Downloading... {}%", percent as u64), percent)
}
