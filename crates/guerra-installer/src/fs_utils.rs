use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

pub fn remove_file_if_exists(path: &Path) -> io::Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Writes `bytes` next to `path` and renames over it, so readers never see
/// a half-written file.
pub fn write_replacing(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut staged_name = path.file_name().map(OsString::from).unwrap_or_default();
    staged_name.push(".tmp");
    let staged = path.with_file_name(staged_name);

    remove_file_if_exists(&staged)?;
    if let Err(err) = fs::write(&staged, bytes).and_then(|()| fs::rename(&staged, path)) {
        let _ = remove_file_if_exists(&staged);
        return Err(err);
    }
    Ok(())
}
