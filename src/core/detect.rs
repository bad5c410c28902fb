//! Autoload style autodetection from the module's directory layout.

use std::path::Path;

use thiserror::Error;

use crate::core::rules::Style;

/// The module tree carries no `src/` directory to infer a style from.
#[derive(Debug, Error)]
#[error("Unable to determine autoloading type; no src directory found in module")]
pub struct Undeterminable;

/// Infer the autoload style for a module.
///
/// `<module>/src/<ModuleName>` is probed before `<module>/src`: a PSR-0
/// layout also contains a plain `src` directory, so the deeper nesting has
/// to win or every PSR-0 module would detect as PSR-4.
pub fn detect(module_path: &Path, module_name: &str) -> Result<Style, Undeterminable> {
    if module_path.join("src").join(module_name).is_dir() {
        return Ok(Style::Psr0);
    }
    if module_path.join("src").is_dir() {
        return Ok(Style::Psr4);
    }
    Err(Undeterminable)
}
