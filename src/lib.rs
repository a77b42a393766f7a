//! A Python launcher for Unix.
//!
//! Given the current environment, this crate works out which installed
//! `pythonX.Y` interpreter should run and replaces the current process with
//! it, forwarding any trailing arguments.
//!
//! The main entry point is [`Launcher`], which resolves against an explicitly
//! captured [`Environment`] through a [`FileSystem`] so the whole decision
//! procedure can be exercised without touching the real process state. The
//! [`cli`] module holds the thin argument dispatch used by the `py` binary.

pub mod cli;
pub mod discovery;
pub mod env;
pub mod error;
pub mod fs;
pub mod interpreter;
mod launch;
pub mod path;
pub mod resolve;
pub mod shebang;
pub mod version;

pub use env::Environment;
pub use error::{Error, Result};
pub use fs::{FileSystem, HostFs};
pub use interpreter::Interpreter;
pub use launch::ExitCode;
pub use resolve::{Launcher, Resolution, Source};
pub use version::{VersionRequest, VersionTag};
