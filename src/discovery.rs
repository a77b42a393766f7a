//! Finding interpreters in search path directories.

use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::interpreter::Interpreter;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Look directly under `dir` (not recursively) for `pythonX.Y` executables.
///
/// Entries whose names do not parse are skipped. Relative directories such as
/// `.` are resolved against `cwd`, so every returned path is absolute.
pub fn scan_dir<F: FileSystem + ?Sized>(fs: &F, dir: &Path, cwd: &Path) -> Result<Vec<Interpreter>> {
    let names = fs.read_dir(dir).map_err(|source| Error::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut found = Vec::new();
    for name in names {
        let path = dir.join(&name);
        match Interpreter::from_path(&path, cwd) {
            Ok(interpreter) => found.push(interpreter),
            Err(err) => trace!(path = %path.display(), %err, "skipping"),
        }
    }
    Ok(found)
}

/// Scan every directory in order and collect everything found.
///
/// The result is not ranked. Fails on the first directory that cannot be read.
pub fn scan_all<F: FileSystem + ?Sized>(fs: &F, dirs: &[PathBuf], cwd: &Path) -> Result<Vec<Interpreter>> {
    let mut interpreters = Vec::new();
    for dir in dirs {
        let found = scan_dir(fs, dir, cwd)?;
        debug!(dir = %dir.display(), count = found.len(), "scanned directory");
        interpreters.extend(found);
    }
    Ok(interpreters)
}
