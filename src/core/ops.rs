//! The enable/disable operations.
//!
//! Ordering is part of the contract: the autoload style resolves before the
//! manifest is opened, the rules-exist check decides the no-op outcome
//! before any filesystem mutation, relocation (enable only) completes before
//! the manifest is persisted, and `composer dump-autoload` runs only after a
//! successful write.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::cli::Options;
use crate::core::detect;
use crate::core::manifest::Manifest;
use crate::core::relocate::{self, MovedClassFile};
use crate::core::rules::{self, Style};
use crate::infra::composer::CommandRunner;

/// Result of an enable run.
#[derive(Debug)]
pub struct EnableOutcome {
    /// `false` when the rule already existed and nothing was touched.
    pub changed: bool,
    /// Set when the legacy bootstrap was moved under `src/`.
    pub moved: Option<MovedClassFile>,
}

/// Add the module's autoload rule, relocating the legacy bootstrap first.
pub fn enable(opts: &Options, module: &str, runner: &dyn CommandRunner) -> Result<EnableOutcome> {
    let module_path = opts.module_dir(module);
    let style = resolve_style(opts, &module_path, module)?;
    let manifest_path = opts.manifest_path();
    let mut manifest = Manifest::load(&manifest_path)?;

    let mapping = format!("{}/{}/src/", opts.modules_path, module);
    if rules::enable(&mut manifest, style, module, &mapping) {
        return Ok(EnableOutcome { changed: false, moved: None });
    }

    // A relocation failure aborts here, leaving composer.json untouched
    let moved = relocate::relocate(&module_path)?;

    manifest.save(&manifest_path)?;
    debug!(%style, module, manifest = %manifest_path.display(), "added autoload rule");
    dump_autoload(runner)?;

    Ok(EnableOutcome { changed: true, moved })
}

/// Remove the module's autoload rule.
///
/// Returns `false` for the already-absent no-op. Style autodetection runs
/// even then, so a module without a `src/` tree fails the same way it does
/// on enable.
pub fn disable(opts: &Options, module: &str, runner: &dyn CommandRunner) -> Result<bool> {
    let module_path = opts.module_dir(module);
    let style = resolve_style(opts, &module_path, module)?;
    let manifest_path = opts.manifest_path();
    let mut manifest = Manifest::load(&manifest_path)?;

    if !rules::disable(&mut manifest, style, module) {
        return Ok(false);
    }

    manifest.save(&manifest_path)?;
    debug!(%style, module, manifest = %manifest_path.display(), "removed autoload rule");
    dump_autoload(runner)?;

    Ok(true)
}

fn resolve_style(opts: &Options, module_path: &Path, module: &str) -> Result<Style> {
    match opts.style {
        Some(style) => Ok(style),
        None => Ok(detect::detect(module_path, module)?),
    }
}

fn dump_autoload(runner: &dyn CommandRunner) -> Result<()> {
    // Fire-and-forget: composer reports its own failures on the inherited
    // streams, so only a spawn failure is an error here
    let status = runner
        .run(&["dump-autoload"])
        .context("Unable to execute composer dump-autoload")?;
    debug!(code = status.code(), "composer dump-autoload finished");
    Ok(())
}
