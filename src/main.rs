use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use composer_autoloading::dispatch;
use composer_autoloading::infra::console::Console;

fn main() -> Result<ExitCode> {
    // Diagnostics go to stderr so stdout stays reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut argv = std::env::args();
    let program = argv
        .next()
        .as_deref()
        .map(program_name)
        .unwrap_or_else(|| "autoload-module".to_string());
    let args: Vec<String> = argv.collect();

    let project_dir = std::env::current_dir().context("Unable to determine working directory")?;
    let console = Console::new();

    let code = dispatch::run(&program, &args, &project_dir, &console);
    Ok(ExitCode::from(code as u8))
}

/// Basename of the invoking path, as shown in the usage line.
fn program_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
