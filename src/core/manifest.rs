//! Ordered `composer.json` document handling.
//!
//! The manifest is treated as opaque JSON outside the `autoload` subtree:
//! every other key round-trips byte-for-byte in its original position, which
//! is why the map type must preserve insertion order (serde_json's
//! `preserve_order` feature). Output mirrors the dependency manager's own
//! formatting: 4-space indent, unescaped slashes and non-ASCII, trailing
//! newline.

use std::fs::{self, OpenOptions};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use thiserror::Error;

use crate::core::rules::Style;

/// Top-level key owning the autoload rules subtree.
const AUTOLOAD: &str = "autoload";

/// Manifest load/save failures.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("composer.json file does not exist or is not readable")]
    NotReadable,
    #[error("composer.json file is not writable")]
    NotWritable,
    #[error("Error parsing composer.json file; please check that it is valid")]
    Parse,
    #[error("The composer.json file was empty")]
    Empty,
    #[error("Unable to write composer.json file: {0}")]
    Write(#[source] std::io::Error),
}

/// The parsed manifest: an insertion-ordered JSON object plus accessors for
/// the one subtree this tool is allowed to interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    root: Map<String, Value>,
}

impl Manifest {
    /// Wrap an already-parsed document.
    pub fn from_object(root: Map<String, Value>) -> Self {
        Self { root }
    }

    /// Read and validate the manifest.
    ///
    /// Validation order is fixed: readable, writable, parseable, an actual
    /// object. Writability is probed up front so that an invocation destined
    /// to be a no-op still fails loudly on a read-only manifest.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let raw = fs::read_to_string(path).map_err(|_| ManifestError::NotReadable)?;
        if OpenOptions::new().write(true).open(path).is_err() {
            return Err(ManifestError::NotWritable);
        }

        let parsed: Value = serde_json::from_str(&raw).map_err(|_| ManifestError::Parse)?;
        match parsed {
            Value::Object(root) => Ok(Self { root }),
            // Valid JSON that is not a mapping (null, scalar, array)
            _ => Err(ManifestError::Empty),
        }
    }

    /// Serialize back to disk with the manifest's canonical formatting.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        Value::Object(self.root.clone())
            .serialize(&mut ser)
            .map_err(|err| ManifestError::Write(std::io::Error::other(err)))?;
        buf.push(b'\n');
        fs::write(path, buf).map_err(ManifestError::Write)
    }

    /// Read-only view of the underlying ordered document.
    pub fn as_object(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Is a rule for `prefix` present under the given style?
    pub fn has_rule(&self, style: Style, prefix: &str) -> bool {
        self.style_rules(style)
            .is_some_and(|rules| rules.contains_key(prefix))
    }

    /// Insert `autoload.<style>.<prefix> = path`, creating parents as needed.
    /// Existing keys keep their position; new keys append.
    pub fn insert_rule(&mut self, style: Style, prefix: &str, path: &str) {
        let autoload = object_entry(&mut self.root, AUTOLOAD);
        let rules = object_entry(autoload, style.as_str());
        rules.insert(prefix.to_string(), Value::String(path.to_string()));
    }

    /// Remove `autoload.<style>.<prefix>`, pruning a style mapping that
    /// becomes empty and the `autoload` key itself when it empties in turn.
    /// Returns `false` when no such rule existed.
    pub fn remove_rule(&mut self, style: Style, prefix: &str) -> bool {
        let Some(autoload) = self.root.get_mut(AUTOLOAD).and_then(Value::as_object_mut) else {
            return false;
        };
        let Some(rules) = autoload
            .get_mut(style.as_str())
            .and_then(Value::as_object_mut)
        else {
            return false;
        };
        if rules.shift_remove(prefix).is_none() {
            return false;
        }
        if rules.is_empty() {
            autoload.shift_remove(style.as_str());
        }
        if autoload.is_empty() {
            self.root.shift_remove(AUTOLOAD);
        }
        true
    }

    fn style_rules(&self, style: Style) -> Option<&Map<String, Value>> {
        self.root
            .get(AUTOLOAD)?
            .as_object()?
            .get(style.as_str())?
            .as_object()
    }
}

/// Fetch-or-create the nested object at `key`. A non-object value under the
/// key is replaced, matching the original's dynamic array assignment.
fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    if !map.get(key).is_some_and(Value::is_object) {
        map.insert(key.to_string(), Value::Object(Map::new()));
    }
    map.get_mut(key)
        .and_then(Value::as_object_mut)
        .expect("object was just inserted")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest(value: Value) -> Manifest {
        match value {
            Value::Object(root) => Manifest::from_object(root),
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    fn rendered(manifest: &Manifest) -> String {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("composer.json");
        manifest.save(&path).expect("save");
        fs::read_to_string(&path).expect("read back")
    }

    #[test]
    fn load_rejects_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Manifest::load(&dir.path().join("composer.json")).unwrap_err();
        assert!(matches!(err, ManifestError::NotReadable));
    }

    #[test]
    fn load_rejects_invalid_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("composer.json");
        fs::write(&path, "invalid content").expect("write");
        assert!(matches!(Manifest::load(&path), Err(ManifestError::Parse)));
    }

    #[test]
    fn load_rejects_non_object_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("composer.json");
        for content in ["null", "42", "\"text\"", "[1, 2]"] {
            fs::write(&path, content).expect("write");
            assert!(
                matches!(Manifest::load(&path), Err(ManifestError::Empty)),
                "{content} should read as empty"
            );
        }
    }

    #[test]
    fn save_uses_four_space_indent_and_trailing_newline() {
        let m = manifest(json!({"autoload": {"psr-4": {"App\\": "module/App/src/"}}}));
        assert_eq!(
            rendered(&m),
            "{\n    \"autoload\": {\n        \"psr-4\": {\n            \"App\\\\\": \"module/App/src/\"\n        }\n    }\n}\n"
        );
    }

    #[test]
    fn save_leaves_slashes_and_unicode_unescaped() {
        let m = manifest(json!({"homepage": "https://example.com/", "name": "caf\u{e9}/app"}));
        let out = rendered(&m);
        assert!(out.contains("https://example.com/"));
        assert!(out.contains("caf\u{e9}/app"));
        assert!(!out.contains("\\/"));
    }

    #[test]
    fn insert_appends_new_rule_after_existing_keys() {
        let mut m = manifest(json!({"autoload": {"psr-4": {"Other\\": "path/to/other"}}}));
        m.insert_rule(Style::Psr4, "App\\", "module/App/src/");

        let rules = m.as_object()["autoload"]["psr-4"].as_object().expect("rules");
        let keys: Vec<&str> = rules.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Other\\", "App\\"]);
    }

    #[test]
    fn insert_creates_missing_parents_at_the_end() {
        let mut m = manifest(json!({"name": "acme/app"}));
        m.insert_rule(Style::Psr0, "App\\", "module/App/src/");

        let keys: Vec<&str> = m.as_object().keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "autoload"]);
        assert!(m.has_rule(Style::Psr0, "App\\"));
        assert!(!m.has_rule(Style::Psr4, "App\\"));
    }

    #[test]
    fn remove_keeps_sibling_rules_in_order() {
        let mut m = manifest(json!({"autoload": {"psr-4": {
            "Aaa\\": "a",
            "App\\": "module/App/src/",
            "Zzz\\": "z"
        }}}));
        assert!(m.remove_rule(Style::Psr4, "App\\"));

        let rules = m.as_object()["autoload"]["psr-4"].as_object().expect("rules");
        let keys: Vec<&str> = rules.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Aaa\\", "Zzz\\"]);
    }

    #[test]
    fn remove_prunes_empty_style_and_autoload() {
        let mut m = manifest(json!({
            "name": "acme/app",
            "autoload": {"psr-4": {"App\\": "module/App/src/"}},
            "require": {}
        }));
        assert!(m.remove_rule(Style::Psr4, "App\\"));

        let keys: Vec<&str> = m.as_object().keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "require"]);
    }

    #[test]
    fn remove_keeps_other_styles_alive() {
        let mut m = manifest(json!({"autoload": {
            "psr-0": {"App\\": "x"},
            "psr-4": {"App\\": "y"}
        }}));
        assert!(m.remove_rule(Style::Psr0, "App\\"));
        assert!(!m.has_rule(Style::Psr0, "App\\"));
        assert!(m.has_rule(Style::Psr4, "App\\"));
    }

    #[test]
    fn remove_reports_absent_rule() {
        let mut m = manifest(json!({"autoload": {"psr-4": {"Other\\": "y"}}}));
        assert!(!m.remove_rule(Style::Psr4, "App\\"));
        assert!(m.has_rule(Style::Psr4, "Other\\"));
    }
}
