//! Synchronous subprocess execution bound to a directory and an environment
//! overlay.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use indexmap::IndexMap;
use log::debug;

use crate::error::{Error, Result};

/// Directory and environment in which external tools are run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandContext {
    dir: PathBuf,
    env: IndexMap<String, String>,
}

impl CommandContext {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            env: IndexMap::new(),
        }
    }

    /// Adds one `KEY=value` pair to the environment overlay.
    pub fn with_env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Adds every pair of `env` to the environment overlay, in order.
    pub fn with_envs<I, K, V>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env.extend(env.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn env(&self) -> &IndexMap<String, String> {
        &self.env
    }

    /// Runs `cmd` inside `dir` joined with `segments` and returns its
    /// combined stdout and stderr.
    ///
    /// The effective directory is created when it does not exist yet. The
    /// command inherits the process environment plus the overlay.
    ///
    /// # Errors
    /// * `Error::CommandSpawn` if the program cannot be started
    /// * `Error::CommandFailed` on a non-zero exit, carrying the raw output
    pub fn run(&self, mut cmd: Command, segments: &[&str]) -> Result<String> {
        let dir = segments
            .iter()
            .fold(self.dir.clone(), |dir, segment| dir.join(segment));
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(Error::IoError)?;
        }

        cmd.current_dir(&dir).envs(&self.env);

        let command = command_line(&cmd);
        debug!("running: {command}");

        let output = cmd.output().map_err(|source| Error::CommandSpawn {
            command: command.clone(),
            source,
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command,
                status: output.status.to_string(),
                output: combined,
            });
        }

        Ok(combined)
    }
}

/// Renders a command as a single shell-like line for logs and errors.
pub fn command_line(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
