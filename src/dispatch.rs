//! Invocation state machine.
//!
//! One pass over a single invocation, ending in a process exit code: help
//! and no-op outcomes exit 0, everything else that goes wrong exits 1.
//! Argument and preflight failures carry the usage text on stderr; runtime
//! failures (manifest, relocation, subprocess) report the message alone,
//! since by then the user's input was already accepted.

use std::path::Path;

use tracing::debug;

use crate::cli::{self, Action, Options, Parsed};
use crate::core::ops::{self, EnableOutcome};
use crate::help::{self, Sink};
use crate::infra::composer::{CommandRunner, Composer};
use crate::infra::console::Console;

/// Run one invocation end to end. The return value is the exit code.
pub fn run(program: &str, args: &[String], project_dir: &Path, console: &Console) -> i32 {
    let parsed = match cli::parse(args, project_dir) {
        Ok(parsed) => parsed,
        Err(err) => {
            console.write_error_message(&err.to_string());
            help::render(program, console, Sink::Stderr);
            return 1;
        }
    };

    let (action, module, options) = match parsed {
        Parsed::Help => {
            help::render(program, console, Sink::Stdout);
            return 0;
        }
        Parsed::Run { action, module, options } => (action, module, options),
    };
    debug!(?action, module = %module, "dispatching");

    // Preflight always runs, even when the outcome turns out to be a no-op
    let composer = Composer::new(options.composer.as_str());
    if let Err(message) = preflight(&composer, &options, &module) {
        console.write_error_message(&message);
        help::render(program, console, Sink::Stderr);
        return 1;
    }

    match action {
        Action::Enable => match ops::enable(&options, &module, &composer) {
            Ok(outcome) => {
                report_enable(console, &module, &outcome);
                0
            }
            Err(err) => {
                console.write_error_message(&format!("{err:#}"));
                1
            }
        },
        Action::Disable => match ops::disable(&options, &module, &composer) {
            Ok(changed) => {
                report_disable(console, &module, changed);
                0
            }
            Err(err) => {
                console.write_error_message(&format!("{err:#}"));
                1
            }
        },
    }
}

/// Environment checks: the composer binary must execute, and both the
/// modules directory and the module itself must exist.
fn preflight(runner: &dyn CommandRunner, options: &Options, module: &str) -> Result<(), String> {
    if !runner.probe() {
        return Err("Unable to determine composer binary".to_string());
    }
    if !options.modules_dir().is_dir() {
        return Err("Unable to determine modules directory".to_string());
    }
    let module_dir = options.module_dir(module);
    if !module_dir.is_dir() {
        return Err(format!(
            "Could not locate module \"{}\" in path \"{}\"",
            module,
            module_dir.display()
        ));
    }
    Ok(())
}

fn report_enable(console: &Console, module: &str, outcome: &EnableOutcome) {
    if !outcome.changed {
        console.write_line(&format!(
            "Autoloading rules already exist for the module \"{module}\""
        ));
        return;
    }
    console.write_line(&format!(
        "<info>Successfully added composer autoloading for the module \"{module}\"</info>"
    ));
    if let Some(moved) = &outcome.moved {
        console.write_line(&format!(
            "Renaming {} to {}",
            moved.from.display(),
            moved.to.display()
        ));
    }
    console.write_line(&format!(
        "You can now safely remove the {module}\\Module::getAutoloaderConfig() implementation."
    ));
}

fn report_disable(console: &Console, module: &str, changed: bool) {
    if changed {
        console.write_line(&format!(
            "<info>Successfully removed composer autoloading for the module \"{module}\"</info>"
        ));
    } else {
        console.write_line(&format!(
            "Autoloading rules already do not exist for the module \"{module}\""
        ));
    }
}
