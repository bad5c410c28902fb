//! Legacy bootstrap relocation.
//!
//! Moves a module's top-level `Module.php` under its `src/` tree so the new
//! autoload rule covers it, rewriting the one known sibling-`config`
//! reference for the file's one-level-deeper home. This is a textual rewrite
//! of exactly that idiom, not a general code transform; any other relative
//! path in the file is deliberately left untouched.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

/// Legacy bootstrap file name probed directly under the module directory.
pub const MODULE_CLASS_FILE: &str = "Module.php";

/// Token marking the file as an actual module bootstrap class.
static CLASS_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bclass Module\b").unwrap());

/// The sibling-config idiom: `__DIR__ . '/config/'`.
static CONFIG_DIR_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(__DIR__ \. ')(/config/)").unwrap());

/// Record of a completed relocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedClassFile {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Move `<module>/Module.php` to `<module>/src/Module.php` when safe.
///
/// Returns `None` without touching anything when there is no file to move,
/// the file does not declare the bootstrap class, or a file already sits at
/// the destination.
pub fn relocate(module_path: &Path) -> Result<Option<MovedClassFile>> {
    let from = module_path.join(MODULE_CLASS_FILE);
    if !from.is_file() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&from)
        .with_context(|| format!("Unable to read {}", from.display()))?;
    if !CLASS_TOKEN.is_match(&contents) {
        // Non-standard file; leave it in place
        return Ok(None);
    }

    let to = module_path.join("src").join(MODULE_CLASS_FILE);
    if to.exists() {
        return Ok(None);
    }

    let rewritten = CONFIG_DIR_REF.replace_all(&contents, "${1}/..${2}");
    fs::write(&to, rewritten.as_bytes())
        .with_context(|| format!("Unable to write {}", to.display()))?;
    fs::remove_file(&from).with_context(|| format!("Unable to remove {}", from.display()))?;

    tracing::debug!(from = %from.display(), to = %to.display(), "moved module class file");

    Ok(Some(MovedClassFile { from, to }))
}
