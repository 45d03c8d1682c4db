use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("download directory missing or not writable: {0}")]
    DownloadDir(String),
    #[error("refusing filename that is not a bare name: {0}")]
    UnsafeFilename(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the download directory exists; create if missing.
pub fn ensure_download_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::DownloadDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::DownloadDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::DownloadDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::DownloadDir(e.to_string()))?;
    Ok(())
}

/// Atomically write a downloaded file to `{dir}/{filename}` by writing a temp
/// file then renaming. The filename comes from the server and must be a bare
/// name, not a path.
pub fn save_download(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, PersistError> {
    if filename.is_empty()
        || filename.contains(['/', '\\'])
        || filename == "."
        || filename == ".."
    {
        return Err(PersistError::UnsafeFilename(filename.to_string()));
    }

    ensure_download_dir(dir)?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    // Replace an earlier download of the same file.
    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
    Ok(target)
}
