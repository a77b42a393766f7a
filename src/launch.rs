use crate::env::Environment;
use crate::error::{Error, Result};
use crate::resolve::Resolution;
use std::process::Command;
#[cfg(not(unix))]
use std::process::ExitStatus;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

impl Resolution {
    /// The process that [`Resolution::launch`] would start.
    ///
    /// `argv[0]` is the interpreter's base name, followed by the forwarded
    /// arguments. The captured environment and working directory are passed
    /// through.
    pub fn command(&self, env: &Environment) -> Command {
        let mut cmd = Command::new(&self.path);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            if let Some(name) = self.path.file_name() {
                cmd.arg0(name);
            }
        }
        cmd.args(&self.args)
            .env_clear()
            .envs(&env.vars)
            .current_dir(&env.current_dir);
        cmd
    }

    /// Replace the current process with the resolved interpreter.
    ///
    /// On success this never returns. It must be an exec rather than a child
    /// process so that the interpreter owns the terminal and signals.
    #[cfg(unix)]
    pub fn launch(&self, env: &Environment) -> Result<ExitCode> {
        use std::os::unix::process::CommandExt;
        let source = self.command(env).exec();
        Err(Error::Execution {
            path: self.path.clone(),
            source,
        })
    }

    /// Run the resolved interpreter to completion and report its exit code.
    #[cfg(not(unix))]
    pub fn launch(&self, env: &Environment) -> Result<ExitCode> {
        let status = self
            .command(env)
            .status()
            .map_err(|source| Error::Execution {
                path: self.path.clone(),
                source,
            })?;
        Ok(exit_code(status))
    }
}

/// Exit code to report for a finished child. A child without one reports -1.
#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> ExitCode {
    status.code().unwrap_or(-1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Source;
    use std::ffi::OsStr;
    use std::path::{Path, PathBuf};

    fn resolution(path: &str, args: &[&str]) -> Resolution {
        Resolution {
            path: PathBuf::from(path),
            args: args.iter().map(|s| s.to_string()).collect(),
            source: Source::LatestOnPath,
        }
    }

    fn env() -> Environment {
        Environment::new([("PY_PYTHON", "3.10")], "/tmp")
    }

    #[test]
    fn command_forwards_arguments_and_environment() {
        let cmd = resolution("/usr/bin/python3.10", &["-m", "http.server"]).command(&env());
        assert_eq!(cmd.get_program(), OsStr::new("/usr/bin/python3.10"));
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec![OsStr::new("-m"), OsStr::new("http.server")]);
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/tmp")));
        let envs: Vec<_> = cmd.get_envs().collect();
        assert!(envs.contains(&(OsStr::new("PY_PYTHON"), Some(OsStr::new("3.10")))));
    }

    #[test]
    #[cfg(unix)]
    fn launching_a_missing_interpreter_fails() {
        let err = resolution("/definitely/not/here/python3.10", &[])
            .launch(&env())
            .unwrap_err();
        match err {
            Error::Execution { path, source } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here/python3.10"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn command_forwards_non_unicode_variables() {
        use std::os::unix::ffi::OsStrExt;
        let mut env = env();
        env.set_var("RAW", OsStr::from_bytes(b"\xff\xfe"));
        let cmd = resolution("/usr/bin/python3.10", &[]).command(&env);
        let envs: Vec<_> = cmd.get_envs().collect();
        assert!(envs.contains(&(OsStr::new("RAW"), Some(OsStr::from_bytes(b"\xff\xfe")))));
    }

    #[test]
    #[cfg(not(unix))]
    fn exit_code_of_finished_process() {
        let status = Command::new("cmd").args(["/C", "exit 3"]).status().unwrap();
        assert_eq!(exit_code(status), 3);
    }
}
