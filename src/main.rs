use anyhow::{Context, Result};
use colored::Colorize;
use py::cli::{self, Action};
use py::{Environment, Error, ExitCode, Launcher};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}: {}", "error".red().bold(), format!("{err:#}").as_str().bold());
            1
        }
    };
    process::exit(code);
}

fn run() -> Result<ExitCode> {
    let env = Environment::capture().context("could not read the process environment")?;
    init_logging(&env);

    let args: Vec<String> = std::env::args().skip(1).collect();
    tracing::debug!(arguments = ?args, "py called");

    let launcher = Launcher::new(env);
    match cli::parse_args(&args)? {
        Action::Help(text) => println!("{text}"),
        Action::Version => println!("{}", cli::version_text()),
        Action::List => {
            let interpreters = launcher.interpreters()?;
            if interpreters.is_empty() {
                return Err(Error::NoInterpretersFound.into());
            }
            for interpreter in interpreters {
                println!("{interpreter}");
            }
        }
        Action::Launch { request, args } => {
            let resolution = launcher.resolve(request, args)?;
            return Ok(resolution.launch(launcher.env())?);
        }
    }
    Ok(0)
}

/// Debug output goes to stderr when `$PYLAUNCH_DEBUG` is set; a valid
/// `RUST_LOG` wins if present.
fn init_logging(env: &Environment) {
    let default = if env.debug() { "debug" } else { "warn" };
    let filter = env
        .get_var("RUST_LOG")
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
