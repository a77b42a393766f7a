use crate::error::Result;
use crate::version::{VersionRequest, VersionTag};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A python interpreter found on disk.
///
/// Only major and minor are tracked because that is how the executables are
/// named (e.g. `/usr/local/bin/python3.9`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    pub version: VersionTag,
    /// Absolute path to the executable.
    pub path: PathBuf,
}

impl Interpreter {
    /// Build an interpreter from a path whose base name is `pythonX.Y`.
    ///
    /// Relative paths are resolved against `cwd` and `.` components dropped,
    /// so `./python3.9` under `/home/me` becomes `/home/me/python3.9`.
    pub fn from_path(path: &Path, cwd: &Path) -> Result<Self> {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        let version = VersionTag::from_file_name(&name)?;
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        };
        let path = path
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        Ok(Self { version, path })
    }

    pub fn major(&self) -> u32 {
        self.version.major
    }

    pub fn minor(&self) -> u32 {
        self.version.minor
    }

    pub fn satisfies(&self, request: &VersionRequest) -> bool {
        request.matches(&self.version)
    }
}

impl fmt::Display for Interpreter {
    /// One line of `py --list` output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t| {}", self.version, self.path.display())
    }
}

/// Sort newest first: major descending, then minor descending.
///
/// The sort is stable, so equal versions found in different directories keep
/// their search path order. Directory listing order is not deterministic and
/// must not decide which interpreter is "latest".
pub fn rank(interpreters: &mut [Interpreter]) {
    interpreters.sort_by(|a, b| b.version.cmp(&a.version));
}

/// Keep only the interpreters satisfying `request`, preserving order.
pub fn filter(interpreters: Vec<Interpreter>, request: &VersionRequest) -> Vec<Interpreter> {
    interpreters
        .into_iter()
        .filter(|i| i.satisfies(request))
        .collect()
}
