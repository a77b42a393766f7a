//! Command line dispatch.
//!
//! Version specifiers such as `-3.10` look like flags to any argument parser,
//! so the arguments are classified by hand first. Only the launcher's own
//! flags are handed to [`argh`].

use crate::version::VersionRequest;
use anyhow::{Result, bail};
use argh::{EarlyExit, FromArgs};

/// Name used in usage output.
pub const PROGRAM: &str = "py";

/// Flags that belong to the launcher itself rather than the interpreter.
const OWN_FLAGS: [&str; 3] = ["--help", "--list", "--version"];

#[derive(FromArgs, Debug)]
/// Python launcher for Unix. Launch your python interpreter the lazy/smart way.
///
/// Finds the python interpreter you most likely want by looking, in order, at:
/// a version passed as an argument, an activated virtual environment, a .venv
/// or venv directory in the current directory, the shebang of the target file,
/// $PY_PYTHON, and finally the latest version of python on $PATH.
#[argh(
    example = "Follow the control flow and launch the python it finds:\n$ py\n\nLaunch the latest python3 on $PATH:\n$ py -3\n\nLaunch a specific version:\n$ py -3.10\n\nUse normal python flags:\n$ py -m venv .venv",
    note = "Environment variables:\n  PY_PYTHON        the version of python to use by default (e.g. \"3.10\")\n  PYLAUNCH_DEBUG   if set to anything, print debug information to stderr"
)]
pub struct Flags {
    #[argh(switch)]
    /// list all found python interpreters on $PATH
    pub list: bool,

    #[argh(switch)]
    /// show py's version info
    pub version: bool,
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print usage text.
    Help(String),
    /// List every interpreter found on `$PATH`.
    List,
    /// Print the launcher's own version.
    Version,
    /// Resolve an interpreter and hand off to it.
    Launch {
        request: Option<VersionRequest>,
        args: Vec<String>,
    },
}

/// Classify the arguments that follow the program name.
///
/// - `--help`, `--list`, `--version` must be the only argument.
/// - `-X` / `-X.Y` as the first argument requests a version; the rest is forwarded.
/// - Anything else is forwarded to the interpreter as-is.
pub fn parse_args(args: &[String]) -> Result<Action> {
    let Some((first, rest)) = args.split_first() else {
        return Ok(Action::Launch {
            request: None,
            args: Vec::new(),
        });
    };

    if OWN_FLAGS.contains(&first.as_str()) {
        if !rest.is_empty() {
            bail!("cannot use {first} with any other arguments");
        }
        return parse_flags(first);
    }

    match VersionRequest::from_specifier(first) {
        Some(request) => Ok(Action::Launch {
            request: Some(request),
            args: rest.to_vec(),
        }),
        None => Ok(Action::Launch {
            request: None,
            args: args.to_vec(),
        }),
    }
}

fn parse_flags(flag: &str) -> Result<Action> {
    match Flags::from_args(&[PROGRAM], &[flag]) {
        Ok(Flags { list: true, .. }) => Ok(Action::List),
        Ok(Flags { version: true, .. }) => Ok(Action::Version),
        Ok(flags) => bail!("unexpected flags: {flags:?}"),
        Err(EarlyExit { output, status }) => match status {
            Ok(()) => Ok(Action::Help(output)),
            Err(()) => bail!("{}", output.trim_end()),
        },
    }
}

/// Output of `py --version`.
pub fn version_text() -> String {
    format!("{PROGRAM} version: {}", env!("CARGO_PKG_VERSION"))
}
