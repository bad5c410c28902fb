//! Shared test utilities for integration tests
//!
//! Builds throwaway modular-project trees (composer.json, modules directory,
//! per-style module layouts) and an argv-logging stub standing in for the
//! composer binary.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_fs::TempDir;
use assert_fs::prelude::*;

use composer_autoloading::cli::Options;
use composer_autoloading::core::rules::Style;
use composer_autoloading::infra::composer::CommandRunner;

/// Module bootstrap carrying the sibling-config idiom the relocator rewrites.
pub const MODULE_CLASS_TEMPLATE: &str = "<?php

namespace {module};

class Module
{
    public function getConfigDir()
    {
        return __DIR__ . '/config/';
    }
}
";

/// Project root with an (empty) default modules directory.
pub fn project() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    tmp.child("module").create_dir_all().expect("modules dir");
    tmp
}

/// Create `<modulesPath>/<name>` with the layout for the given style:
/// `psr-0` nests `src/<name>`, anything else gets a flat `src`.
pub fn module(root: &TempDir, modules_path: &str, name: &str, style: &str) {
    let src = match style {
        "psr-0" => format!("{modules_path}/{name}/src/{name}"),
        _ => format!("{modules_path}/{name}/src"),
    };
    root.child(src).create_dir_all().expect("module layout");
}

/// Write composer.json with the given raw content, returning its path.
pub fn composer_json(root: &TempDir, content: &str) -> PathBuf {
    let child = root.child("composer.json");
    child.write_str(content).expect("composer.json");
    child.path().to_path_buf()
}

/// Write the module's legacy bootstrap file from the template.
pub fn module_class_file(root: &TempDir, modules_path: &str, name: &str) -> PathBuf {
    let child = root.child(format!("{modules_path}/{name}/Module.php"));
    child
        .write_str(&MODULE_CLASS_TEMPLATE.replace("{module}", name))
        .expect("Module.php");
    child.path().to_path_buf()
}

/// Executable stub standing in for composer. Every invocation appends its
/// arguments (one line per call, the probe logs an empty line) to the
/// returned log file and exits with `exit_code`.
pub fn fake_composer(root: &TempDir, exit_code: i32) -> (PathBuf, PathBuf) {
    let log = root.child("composer-invocations.log").path().to_path_buf();
    let bin = root.child("fake-composer");
    bin.write_str(&format!(
        "#!/bin/sh\nprintf '%s\\n' \"$*\" >> \"{}\"\nexit {}\n",
        log.display(),
        exit_code
    ))
    .expect("fake composer script");

    let path = bin.path().to_path_buf();
    let mut perms = fs::metadata(&path).expect("stat").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod");
    (path, log)
}

/// Lines the stub recorded; empty when it was never invoked.
pub fn recorded_invocations(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Per-invocation options rooted at the fixture project.
pub fn options(root: &TempDir, modules_path: &str, style: Option<Style>) -> Options {
    Options {
        project_dir: root.path().to_path_buf(),
        composer: "composer".to_string(),
        modules_path: modules_path.to_string(),
        style,
    }
}

/// In-process composer stand-in recording every `run` invocation.
#[derive(Default)]
pub struct FakeRunner {
    runs: RefCell<Vec<Vec<String>>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments of every recorded `run` call, in order.
    pub fn runs(&self) -> Vec<Vec<String>> {
        self.runs.borrow().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn probe(&self) -> bool {
        true
    }

    fn run(&self, args: &[&str]) -> io::Result<ExitStatus> {
        self.runs
            .borrow_mut()
            .push(args.iter().map(|arg| arg.to_string()).collect());
        Ok(ExitStatus::from_raw(0))
    }
}
