//! Deciding which interpreter to launch.
//!
//! The launcher walks a fixed list of steps, most explicit signal first, and
//! stops at the first one that either picks an interpreter or fails:
//!
//! 1. A version passed on the command line (`-3`, `-3.10`)
//! 2. An activated virtual environment (`$VIRTUAL_ENV`)
//! 3. A `.venv` or `venv` directory in the working directory
//! 4. The shebang of the target file, when there is exactly one argument
//! 5. The `$PY_PYTHON` default version
//! 6. The latest interpreter on `$PATH`

use crate::discovery::scan_all;
use crate::env::{Environment, PY_PYTHON};
use crate::error::{Error, Result};
use crate::fs::{FileSystem, HostFs};
use crate::interpreter::{Interpreter, filter, rank};
use crate::path::search_path_entries;
use crate::shebang::{hint_request, parse_shebang};
use crate::version::{VersionRequest, VersionTag};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Virtual environment directory names looked for in the working directory,
/// in order of preference.
pub const LOCAL_VENV_DIRS: [&str; 2] = [".venv", "venv"];

/// Where the interpreter lives inside a virtual environment.
pub fn venv_python(venv: &Path) -> PathBuf {
    venv.join("bin").join("python")
}

/// Which step of the control flow produced a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    ExplicitVersion,
    ActiveEnvironment,
    LocalEnvironment,
    InterpreterHint,
    DefaultVersion,
    LatestOnPath,
}

const CONTROL_FLOW: [Source; 6] = [
    Source::ExplicitVersion,
    Source::ActiveEnvironment,
    Source::LocalEnvironment,
    Source::InterpreterHint,
    Source::DefaultVersion,
    Source::LatestOnPath,
];

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Source::ExplicitVersion => "version specifier",
            Source::ActiveEnvironment => "active virtual environment",
            Source::LocalEnvironment => "local virtual environment",
            Source::InterpreterHint => "shebang line",
            Source::DefaultVersion => "$PY_PYTHON",
            Source::LatestOnPath => "latest on $PATH",
        };
        f.write_str(s)
    }
}

/// The interpreter to hand off to and the arguments to forward to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: PathBuf,
    pub args: Vec<String>,
    pub source: Source,
}

/// Resolves interpreters against a captured [`Environment`].
///
/// Example
/// ```no_run
/// use py::{Environment, Launcher};
/// let launcher = Launcher::new(Environment::capture().unwrap());
/// let resolution = launcher.resolve(None, vec!["script.py".into()]).unwrap();
/// println!("{}", resolution.path.display());
/// ```
pub struct Launcher<F = HostFs> {
    env: Environment,
    fs: F,
}

impl Launcher<HostFs> {
    /// A launcher backed by the real filesystem.
    pub fn new(env: Environment) -> Self {
        Self::with_fs(env, HostFs)
    }
}

impl<F: FileSystem> Launcher<F> {
    pub fn with_fs(env: Environment, fs: F) -> Self {
        Self { env, fs }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Every interpreter on `$PATH`, newest first.
    pub fn interpreters(&self) -> Result<Vec<Interpreter>> {
        let search_path = self.env.search_path().ok_or(Error::SearchPathUnset)?;
        let dirs: Vec<PathBuf> = search_path_entries(search_path)
            .iter()
            .map(|dir| self.env.absolute(dir))
            .collect();
        debug!(path = ?dirs, "looking through $PATH for python interpreters");
        let mut interpreters = scan_all(&self.fs, &dirs, &self.env.current_dir)?;
        rank(&mut interpreters);
        Ok(interpreters)
    }

    /// The newest interpreter on `$PATH`.
    pub fn latest(&self) -> Result<Interpreter> {
        let interpreters = self.interpreters()?;
        debug!(count = interpreters.len(), "found python interpreters");
        interpreters.into_iter().next().ok_or(Error::NoInterpretersFound)
    }

    /// The newest interpreter on `$PATH` satisfying `request`.
    pub fn find(&self, request: VersionRequest) -> Result<Interpreter> {
        debug!(%request, "searching for matching python");
        let matching = filter(self.interpreters()?, &request);
        debug!(count = matching.len(), "found matching interpreters");
        matching
            .into_iter()
            .next()
            .ok_or(Error::NoMatchingVersion(request))
    }

    /// Run the control flow and pick exactly one interpreter.
    ///
    /// `request` is the version given on the command line, if any. `args` are
    /// forwarded unchanged to whatever is picked.
    pub fn resolve(&self, request: Option<VersionRequest>, args: Vec<String>) -> Result<Resolution> {
        for source in CONTROL_FLOW {
            if let Some(path) = self.step(source, request, &args)? {
                debug!(interpreter = %path.display(), %source, arguments = ?args, "resolved");
                return Ok(Resolution { path, args, source });
            }
        }
        Err(Error::ExhaustedControlFlow)
    }

    fn step(&self, source: Source, request: Option<VersionRequest>, args: &[String]) -> Result<Option<PathBuf>> {
        match source {
            Source::ExplicitVersion => match request {
                Some(request) => self.find(request).map(|i| Some(i.path)),
                None => Ok(None),
            },
            Source::ActiveEnvironment => Ok(self.active_env_python()),
            Source::LocalEnvironment => Ok(self.local_env_python()),
            Source::InterpreterHint => match self.interpreter_hint(args)? {
                Some(request) => self.find(request).map(|i| Some(i.path)),
                None => Ok(None),
            },
            Source::DefaultVersion => match self.default_version()? {
                Some(version) => self.find(version.into()).map(|i| Some(i.path)),
                None => Ok(None),
            },
            Source::LatestOnPath => {
                debug!("falling back to latest python on $PATH");
                self.latest().map(|i| Some(i.path))
            }
        }
    }

    fn active_env_python(&self) -> Option<PathBuf> {
        let venv = self.env.virtual_env()?;
        debug!(virtual_env = %venv.display(), "found $VIRTUAL_ENV");
        let exe = venv_python(&self.env.absolute(venv));
        if self.fs.exists(&exe) {
            Some(exe)
        } else {
            debug!(interpreter = %exe.display(), "activated environment has no interpreter, continuing");
            None
        }
    }

    fn local_env_python(&self) -> Option<PathBuf> {
        debug!(cwd = %self.env.current_dir.display(), "looking for virtual environment in cwd");
        LOCAL_VENV_DIRS
            .iter()
            .map(|dir| venv_python(&self.env.current_dir.join(dir)))
            .find(|exe| self.fs.exists(exe))
    }

    /// The version requested by the first line of the single target file.
    fn interpreter_hint(&self, args: &[String]) -> Result<Option<VersionRequest>> {
        let [target] = args else {
            return Ok(None);
        };
        let target = self.env.absolute(target);
        if !self.fs.is_file(&target) {
            return Ok(None);
        }
        debug!(argument = %target.display(), "argument is a file, checking for a python shebang line");
        let line = self
            .fs
            .first_line(&target)
            .map_err(|source| Error::FileUnreadable { path: target.clone(), source })?;

        let request = hint_request(&line);
        match request {
            Some(request) => debug!(%request, "shebang line refers to version"),
            None => debug!(version = ?parse_shebang(&line), "unrecognised or missing version in shebang line, continuing"),
        }
        Ok(request)
    }

    fn default_version(&self) -> Result<Option<VersionTag>> {
        let Some(value) = self.env.default_version() else {
            return Ok(None);
        };
        debug!(py_python = value, "found $PY_PYTHON");
        value
            .parse()
            .map(Some)
            .map_err(|_| Error::MalformedConfiguration {
                var: PY_PYTHON,
                value: value.to_string(),
            })
    }
}
