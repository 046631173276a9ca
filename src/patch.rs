//! Literal text patching of generated files.
//!
//! The files produced by the scaffolding binary are treated as an opaque but
//! stable contract: the only anchor a patch may rely on is the exact text the
//! generator wrote. Every primitive here is fail-closed. When the anchor is
//! missing the file is left untouched and [`Error::PatchNotFound`] is returned.
//!
//! All write-backs keep the permission bits of the file being patched.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use regex::Regex;

use crate::error::{Error, Result};

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(Error::IoError)
}

/// Overwrites an existing file, restoring its original permissions afterwards.
pub(crate) fn write_back(path: &Path, content: &str) -> Result<()> {
    let permissions = fs::metadata(path).map_err(Error::IoError)?.permissions();
    fs::write(path, content).map_err(Error::IoError)?;
    fs::set_permissions(path, permissions).map_err(Error::IoError)
}

fn not_found(path: &Path, anchor: &str) -> Error {
    Error::PatchNotFound {
        path: path.display().to_string(),
        anchor: anchor.to_string(),
    }
}

/// Replaces every occurrence of `old` with `new` in the file at `path`.
///
/// # Errors
/// * `Error::PatchNotFound` if `old` is empty or does not occur in the file
/// * `Error::IoError` if the file cannot be read or written
pub fn replace_in_file<P: AsRef<Path>>(path: P, old: &str, new: &str) -> Result<()> {
    let path = path.as_ref();
    let content = read_file(path)?;
    if old.is_empty() || !content.contains(old) {
        return Err(not_found(path, old));
    }
    debug!(
        "Replacing {} occurrence(s) in {}",
        content.matches(old).count(),
        path.display()
    );
    write_back(path, &content.replace(old, new))
}

/// Inserts `payload` right after the first occurrence of `marker`.
///
/// Only the first occurrence is considered; later ones are left alone.
///
/// # Errors
/// * `Error::PatchNotFound` if `marker` does not occur in the file
/// * `Error::IoError` if the file cannot be read or written
pub fn insert_code<P: AsRef<Path>>(path: P, marker: &str, payload: &str) -> Result<()> {
    let path = path.as_ref();
    let content = read_file(path)?;
    let idx = content.find(marker).ok_or_else(|| not_found(path, marker))?;
    let split = idx + marker.len();

    let mut out = String::with_capacity(content.len() + payload.len());
    out.push_str(&content[..split]);
    out.push_str(payload);
    out.push_str(&content[split..]);

    debug!("Inserting {} byte(s) into {}", payload.len(), path.display());
    write_back(path, &out)
}

/// Strips `prefix` from each line of `block` where it occurs in the file.
///
/// `block` is the commented text exactly as the generator wrote it. The
/// first occurrence is uncommented; indentation after the prefix and the
/// text surrounding the block are preserved byte for byte.
///
/// # Errors
/// * `Error::PatchNotFound` if `block` does not occur in the file
/// * `Error::IoError` if the file cannot be read or written
pub fn uncomment_code<P: AsRef<Path>>(path: P, block: &str, prefix: &str) -> Result<()> {
    let path = path.as_ref();
    let content = read_file(path)?;
    let idx = content.find(block).ok_or_else(|| not_found(path, block))?;

    let uncommented = uncomment_lines(block, prefix);
    let mut out = String::with_capacity(content.len());
    out.push_str(&content[..idx]);
    out.push_str(&uncommented);
    out.push_str(&content[idx + block.len()..]);

    debug!("Uncommenting block in {}", path.display());
    write_back(path, &out)
}

/// Removes a single leading `prefix` from every line of `block`.
pub fn uncomment_lines(block: &str, prefix: &str) -> String {
    block
        .split('\n')
        .map(|line| line.strip_prefix(prefix).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replaces every match of `pattern` with `replacement`.
///
/// `replacement` follows the `regex` crate expansion rules, so `$1` or
/// `${name}` refer to capture groups.
///
/// # Errors
/// * `Error::RegexError` if `pattern` does not compile
/// * `Error::PatchNotFound` if nothing in the file matches
/// * `Error::IoError` if the file cannot be read or written
pub fn replace_regex_in_file<P: AsRef<Path>>(
    path: P,
    pattern: &str,
    replacement: &str,
) -> Result<()> {
    let path = path.as_ref();
    let matcher = Regex::new(pattern)?;
    let content = read_file(path)?;
    if !matcher.is_match(&content) {
        return Err(not_found(path, pattern));
    }
    let replaced = matcher.replace_all(&content, replacement);
    write_back(path, &replaced)
}

/// Puts `text` in front of the current content of the file at `path`.
pub fn prepend_to_file<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();
    let content = read_file(path)?;
    debug!("Prepending {} byte(s) to {}", text.len(), path.display());
    write_back(path, &format!("{text}{content}"))
}

/// Writes a file the generator does not scaffold, creating parent
/// directories as needed. An existing file is truncated.
pub fn write_new_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    debug!("Writing file: {}", path.display());
    fs::write(path, content).map_err(Error::IoError)
}

/// One patch operation against a file addressed relative to a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// Replace every occurrence of `old` with `new`.
    Replace {
        path: PathBuf,
        old: String,
        new: String,
    },
    /// Insert `payload` after the first occurrence of `marker`.
    Insert {
        path: PathBuf,
        marker: String,
        payload: String,
    },
    /// Strip `prefix` from every line of the commented `block`.
    Uncomment {
        path: PathBuf,
        block: String,
        prefix: String,
    },
    /// Replace every match of `pattern` with `replacement`.
    ReplaceRegex {
        path: PathBuf,
        pattern: String,
        replacement: String,
    },
}

impl Patch {
    pub fn replace<P, O, N>(path: P, old: O, new: N) -> Self
    where
        P: Into<PathBuf>,
        O: Into<String>,
        N: Into<String>,
    {
        Patch::Replace {
            path: path.into(),
            old: old.into(),
            new: new.into(),
        }
    }

    pub fn insert<P, M, C>(path: P, marker: M, payload: C) -> Self
    where
        P: Into<PathBuf>,
        M: Into<String>,
        C: Into<String>,
    {
        Patch::Insert {
            path: path.into(),
            marker: marker.into(),
            payload: payload.into(),
        }
    }

    /// Uncomments a `#`-prefixed block.
    pub fn uncomment<P, B>(path: P, block: B) -> Self
    where
        P: Into<PathBuf>,
        B: Into<String>,
    {
        Patch::Uncomment {
            path: path.into(),
            block: block.into(),
            prefix: "#".to_string(),
        }
    }

    pub fn replace_regex<P, R, N>(path: P, pattern: R, replacement: N) -> Self
    where
        P: Into<PathBuf>,
        R: Into<String>,
        N: Into<String>,
    {
        Patch::ReplaceRegex {
            path: path.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// Path of the target file, relative to the project root.
    pub fn path(&self) -> &Path {
        match self {
            Patch::Replace { path, .. }
            | Patch::Insert { path, .. }
            | Patch::Uncomment { path, .. }
            | Patch::ReplaceRegex { path, .. } => path,
        }
    }

    /// Applies the patch to the file below `root`.
    pub fn apply<P: AsRef<Path>>(&self, root: P) -> Result<()> {
        let target = root.as_ref().join(self.path());
        debug!("{self}");
        match self {
            Patch::Replace { old, new, .. } => replace_in_file(&target, old, new),
            Patch::Insert { marker, payload, .. } => insert_code(&target, marker, payload),
            Patch::Uncomment { block, prefix, .. } => uncomment_code(&target, block, prefix),
            Patch::ReplaceRegex { pattern, replacement, .. } => {
                replace_regex_in_file(&target, pattern, replacement)
            }
        }
    }
}

/// First line of an anchor, for log messages.
fn headline(text: &str) -> &str {
    text.trim_start_matches('\n').lines().next().unwrap_or_default()
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Patch::Replace { path, old, .. } => {
                write!(f, "replace '{}' in {}", headline(old), path.display())
            }
            Patch::Insert { path, marker, .. } => {
                write!(f, "insert after '{}' in {}", headline(marker), path.display())
            }
            Patch::Uncomment { path, block, .. } => {
                write!(f, "uncomment '{}' in {}", headline(block), path.display())
            }
            Patch::ReplaceRegex { path, pattern, .. } => {
                write!(f, "replace /{}/ in {}", pattern, path.display())
            }
        }
    }
}

/// Applies `patches` in order, stopping at the first failure.
pub fn apply_all<P: AsRef<Path>>(root: P, patches: &[Patch]) -> Result<()> {
    let root = root.as_ref();
    patches.iter().try_for_each(|patch| patch.apply(root))
}
