//! Output sinks: rendering report data to bytes and writing them to disk.

mod flat;
mod workbook;

pub use flat::flat_csv_bytes;
pub use workbook::workbook_bytes;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use atomicwrites::{AtomicFile, OverwriteBehavior};

/// Replace `path` with `bytes` in one step, creating missing parent directories.
/// A reader never sees a partially written report.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let path = anchored(path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    AtomicFile::new(&path, OverwriteBehavior::AllowOverwrite)
        .write(|f| {
            f.write_all(bytes)?;
            f.flush()
        })
        .map_err(|err| match err {
            atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => e,
        })
}

/// Bare file names get an explicit `.` parent so the temporary file lands beside them
fn anchored(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => path.to_path_buf(),
        _ => Path::new(".").join(path),
    }
}
