//! Error types for interpreter discovery, resolution and launching.

use crate::version::VersionRequest;
use std::path::PathBuf;
use thiserror::Error;

/// Convenient alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong between reading `$PATH` and handing off
/// to the chosen interpreter.
#[derive(Debug, Error)]
pub enum Error {
    /// A filename or specifier did not carry a valid `X.Y` version.
    ///
    /// Raised per candidate during a directory scan and swallowed there.
    #[error("malformed interpreter version: {0:?}")]
    MalformedVersion(String),

    /// A search path directory could not be listed.
    #[error("could not read contents of {}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested version is not installed anywhere on the search path.
    #[error("no interpreters found supporting version {0}")]
    NoMatchingVersion(VersionRequest),

    /// The search path yielded no interpreters at all.
    #[error("no python interpreters found on $PATH")]
    NoInterpretersFound,

    /// A configuration variable is set but not in the expected form.
    #[error("malformed {var}: {value:?} is not in X.Y format")]
    MalformedConfiguration { var: &'static str, value: String },

    /// `$PATH` is not set at all.
    #[error("could not get $PATH")]
    SearchPathUnset,

    /// The target file exists but its first line could not be read.
    #[error("could not open {}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every step of the control flow fell through.
    #[error("no python interpreters found after executing control flow")]
    ExhaustedControlFlow,

    /// Replacing the process image failed.
    #[error("error launching {}", path.display())]
    Execution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
