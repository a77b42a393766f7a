use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

/// Search path for interpreters.
pub const PATH: &str = "PATH";
/// Set by `activate` scripts to the root of the active virtual environment.
pub const VIRTUAL_ENV: &str = "VIRTUAL_ENV";
/// The default `X.Y` version to launch.
pub const PY_PYTHON: &str = "PY_PYTHON";
/// Any non-empty value turns on debug logging.
pub const PYLAUNCH_DEBUG: &str = "PYLAUNCH_DEBUG";

/// Snapshot of the process environment the launcher resolves against.
///
/// The environment contains:
/// - `vars`: the environment variables, passed on to the launched interpreter.
/// - `current_dir`: the absolute working directory.
///
/// Captured once at startup and passed around by value; nothing in the crate
/// reads `std::env` behind its back.
#[derive(Debug, Clone)]
pub struct Environment {
    pub vars: HashMap<OsString, OsString>,
    pub current_dir: PathBuf,
}

impl Environment {
    pub fn new<I, K, V>(vars: I, current_dir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            current_dir: current_dir.into(),
        }
    }

    /// Capture the current process state.
    ///
    /// Every variable is kept, including ones that are not valid unicode, so
    /// the launched interpreter sees the same environment `py` did.
    pub fn capture() -> io::Result<Self> {
        Ok(Self::new(stdenv::vars_os(), stdenv::current_dir()?))
    }

    /// Get the value of a variable. Empty and non-unicode values count as unset.
    pub fn get_var(&self, key: &str) -> Option<&str> {
        self.vars
            .get(OsStr::new(key))
            .and_then(|v| v.to_str())
            .filter(|v| !v.is_empty())
    }

    /// Set or override a variable.
    pub fn set_var(&mut self, key: impl Into<OsString>, val: impl Into<OsString>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Raw `$PATH`, empty or not. `None` only when it is not set at all.
    pub fn search_path(&self) -> Option<&OsStr> {
        self.vars.get(OsStr::new(PATH)).map(OsString::as_os_str)
    }

    pub fn virtual_env(&self) -> Option<&Path> {
        self.get_var(VIRTUAL_ENV).map(Path::new)
    }

    pub fn default_version(&self) -> Option<&str> {
        self.get_var(PY_PYTHON)
    }

    pub fn debug(&self) -> bool {
        self.get_var(PYLAUNCH_DEBUG).is_some()
    }

    /// Resolve `path` against the working directory unless it is already absolute.
    pub fn absolute(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.current_dir.join(path)
        }
    }
}
