use std::ffi::OsString;
use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Longest first line read when looking for a shebang.
const MAX_FIRST_LINE: u64 = 4096;

/// The handful of filesystem queries the launcher needs.
///
/// Resolution only ever goes through this trait, so it can be driven by an
/// in-memory tree in tests.
pub trait FileSystem {
    /// Does anything exist at `path`?
    fn exists(&self, path: &Path) -> bool;

    /// Is `path` an existing regular file (not a directory)?
    fn is_file(&self, path: &Path) -> bool;

    /// Base names of the immediate entries of `dir`, in listing order.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<OsString>>;

    /// The first line of the file at `path`, without its line terminator.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    fn first_line(&self, path: &Path) -> io::Result<String>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFs;

impl FileSystem for HostFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn first_line(&self, path: &Path) -> io::Result<String> {
        let mut reader = BufReader::new(fs::File::open(path)?.take(MAX_FIRST_LINE));
        let mut buf = Vec::new();
        reader.read_until(b'\n', &mut buf)?;
        let line = String::from_utf8_lossy(&buf);
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

#[cfg(test)]
pub(crate) mod mem {
    use super::FileSystem;
    use std::collections::BTreeMap;
    use std::ffi::OsString;
    use std::io;
    use std::path::{Path, PathBuf};

    /// Memory-backed tree for resolution tests.
    ///
    /// Adding a file registers it in its parent directory's listing, in
    /// insertion order.
    #[derive(Debug, Default)]
    pub(crate) struct MemFs {
        files: BTreeMap<PathBuf, String>,
        dirs: BTreeMap<PathBuf, Vec<OsString>>,
    }

    impl MemFs {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_file(mut self, path: impl Into<PathBuf>, contents: &str) -> Self {
            let path = path.into();
            self.register(&path);
            self.files.insert(path, contents.to_string());
            self
        }

        pub(crate) fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
            let path = path.into();
            self.register(&path);
            self.dirs.entry(path).or_default();
            self
        }

        fn register(&mut self, path: &Path) {
            let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
                return;
            };
            if parent.as_os_str().is_empty() {
                return;
            }
            self.register(parent);
            let listing = self.dirs.entry(parent.to_path_buf()).or_default();
            if !listing.iter().any(|n| n == name) {
                listing.push(name.to_os_string());
            }
        }
    }

    impl FileSystem for MemFs {
        fn exists(&self, path: &Path) -> bool {
            self.files.contains_key(path) || self.dirs.contains_key(path)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }

        fn read_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
            self.dirs
                .get(dir)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{} not found", dir.display())))
        }

        fn first_line(&self, path: &Path) -> io::Result<String> {
            let contents = self
                .files
                .get(path)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display())))?;
            Ok(contents.lines().next().unwrap_or_default().to_string())
        }
    }
}
