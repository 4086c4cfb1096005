#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test helper for running coordparse commands with less boilerplate
pub struct CoordTest {
    cmd: Command,
}

pub fn coordparse_command() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("coordparse"))
}

impl CoordTest {
    /// Create a new coordparse command test
    pub fn new() -> Self {
        Self {
            cmd: coordparse_command(),
        }
    }

    /// Add arguments to the command
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    /// Add a single argument to the command
    pub fn arg<S: AsRef<std::ffi::OsStr>>(mut self, arg: S) -> Self {
        self.cmd.arg(arg);
        self
    }

    /// Feed text to stdin
    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    /// Assert the command succeeds
    pub fn assert_success(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().success()
    }

    /// Assert the command succeeds and contains text in stdout
    pub fn assert_success_contains(mut self, text: &str) -> assert_cmd::assert::Assert {
        self.cmd
            .assert()
            .success()
            .stdout(predicate::str::contains(text))
    }

    /// Assert the command fails
    pub fn assert_failure(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().failure()
    }

    /// Assert the command fails with text in stderr
    pub fn assert_failure_contains(mut self, text: &str) -> assert_cmd::assert::Assert {
        self.cmd
            .assert()
            .failure()
            .stderr(predicate::str::contains(text))
    }

    /// Get command output for inspection
    pub fn get_output(mut self) -> std::process::Output {
        self.cmd.output().unwrap()
    }

    /// Stdout of a successful run
    pub fn stdout(mut self) -> String {
        let output = self.cmd.assert().success().get_output().stdout.clone();
        String::from_utf8(output).unwrap()
    }
}

/// Quick helper for a single coordinate in a given format
pub fn parse_with_format(format: &str, coordinate: &str) -> CoordTest {
    CoordTest::new()
        .arg(format!("--format={}", format))
        .arg(coordinate)
}

/// Writes `lines` to a coordinates file inside a fresh temp dir
pub fn coords_file(lines: &[&str]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coords.txt");
    let mut file = File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    (dir, path)
}

/// `@path` argument for a file
pub fn file_arg(path: &PathBuf) -> String {
    format!("@{}", path.display())
}
