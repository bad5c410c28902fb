//! Autoload rule editing.
//!
//! A rule is identified by (style, namespace prefix) and both editors are
//! idempotent: the returned boolean tells the dispatcher whether the desired
//! state already held, in which case nothing was touched and neither a save
//! nor a dump-autoload run must happen.

use std::fmt;

use crate::core::manifest::Manifest;

/// Composer autoload style for a module mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Namespace repeated as directory segments under the source root
    Psr0,
    /// Namespace prefix mapped directly onto the source root
    Psr4,
}

impl Style {
    /// Key used inside the manifest's `autoload` mapping.
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Psr0 => "psr-0",
            Style::Psr4 => "psr-4",
        }
    }

    /// Parse the `--type` flag spelling (`psr0`/`psr4`).
    pub fn from_flag(raw: &str) -> Option<Self> {
        match raw {
            "psr0" => Some(Style::Psr0),
            "psr4" => Some(Style::Psr4),
            _ => None,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Namespace prefix keying a module's rule: the module name plus a trailing
/// namespace separator.
pub fn namespace_prefix(module: &str) -> String {
    format!("{module}\\")
}

/// Add the module's rule with the given mapping path.
///
/// Returns `true` when the rule already existed; the manifest is left
/// untouched and the caller must neither persist nor relocate.
pub fn enable(manifest: &mut Manifest, style: Style, module: &str, mapping_path: &str) -> bool {
    let prefix = namespace_prefix(module);
    if manifest.has_rule(style, &prefix) {
        return true;
    }
    manifest.insert_rule(style, &prefix, mapping_path);
    false
}

/// Remove the module's rule, pruning empty parent mappings.
///
/// Returns `false` when the rule was already absent (no-op).
pub fn disable(manifest: &mut Manifest, style: Style, module: &str) -> bool {
    manifest.remove_rule(style, &namespace_prefix(module))
}
