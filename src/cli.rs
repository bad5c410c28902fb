//! Argument grammar.
//!
//! `<action> [--flag value]... <moduleName>` — the module operand sits in
//! final position and every flag carries a value, so after popping the
//! module an odd remainder is malformed by construction. Filesystem
//! validation (binary probe, directory existence) belongs to the
//! dispatcher's preflight, not here.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::rules::Style;

/// Default composer binary when `--composer` is absent.
pub const DEFAULT_COMPOSER: &str = "composer";

/// Default modules directory when `--modules-path` is absent.
pub const DEFAULT_MODULES_PATH: &str = "module";

/// Requested manifest operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Enable,
    Disable,
}

impl Action {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "enable" => Some(Action::Enable),
            "disable" => Some(Action::Disable),
            _ => None,
        }
    }
}

/// Immutable per-invocation configuration, built once from parsed flags plus
/// defaults and threaded explicitly through the components.
#[derive(Debug, Clone)]
pub struct Options {
    pub project_dir: PathBuf,
    pub composer: String,
    pub modules_path: String,
    pub style: Option<Style>,
}

impl Options {
    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join("composer.json")
    }

    pub fn modules_dir(&self) -> PathBuf {
        self.project_dir.join(&self.modules_path)
    }

    pub fn module_dir(&self, module: &str) -> PathBuf {
        self.modules_dir().join(module)
    }
}

/// Parse outcome: a help request or a runnable invocation.
#[derive(Debug)]
pub enum Parsed {
    Help,
    Run {
        action: Action,
        module: String,
        options: Options,
    },
}

/// User-input errors; the dispatcher reports each with the usage text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("Unknown command \"{0}\" provided")]
    UnknownCommand(String),
    #[error("Invalid module name provided")]
    MissingModule,
    #[error("Invalid arguments")]
    UnbalancedFlags,
    #[error("Unknown argument \"{0}\" provided")]
    UnknownFlag(String),
    #[error("Invalid type provided; must be one of psr0 or psr4")]
    InvalidType,
}

fn is_help_token(token: &str) -> bool {
    matches!(token, "help" | "--help" | "-h")
}

/// Tokenize one invocation.
pub fn parse(args: &[String], project_dir: &Path) -> Result<Parsed, ArgError> {
    let Some(first) = args.first() else {
        return Ok(Parsed::Help);
    };
    if is_help_token(first) {
        return Ok(Parsed::Help);
    }
    let Some(action) = Action::from_token(first) else {
        return Err(ArgError::UnknownCommand(first.clone()));
    };
    // `enable --help` and friends are still help requests
    if args.get(1).is_some_and(|token| is_help_token(token)) {
        return Ok(Parsed::Help);
    }

    let mut rest: Vec<&str> = args[1..].iter().map(String::as_str).collect();
    let module = match rest.pop() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(ArgError::MissingModule),
    };
    if rest.len() % 2 != 0 {
        return Err(ArgError::UnbalancedFlags);
    }

    let mut composer = DEFAULT_COMPOSER.to_string();
    let mut modules_path = DEFAULT_MODULES_PATH.to_string();
    let mut style = None;

    for pair in rest.chunks_exact(2) {
        let (flag, value) = (pair[0], pair[1]);
        match flag {
            "--composer" | "-c" => composer = value.to_string(),
            "--type" | "-t" => style = Some(Style::from_flag(value).ok_or(ArgError::InvalidType)?),
            "--modules-path" | "-p" => modules_path = normalize_modules_path(value),
            _ => return Err(ArgError::UnknownFlag(flag.to_string())),
        }
    }

    Ok(Parsed::Run {
        action,
        module,
        options: Options {
            project_dir: project_dir.to_path_buf(),
            composer,
            modules_path,
            style,
        },
    })
}

/// Windows-style separators become forward slashes; a leading `./` is
/// dropped so the mapping paths written to the manifest stay canonical.
fn normalize_modules_path(raw: &str) -> String {
    let normalized = raw.replace('\\', "/");
    normalized.strip_prefix("./").unwrap_or(&normalized).to_string()
}
