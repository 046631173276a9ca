#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Writes an executable `/bin/sh` script standing in for the scaffolder.
#[cfg(unix)]
pub fn fake_binary(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Lines a fake binary appended to `log`, or nothing if it never ran.
pub fn calls(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
