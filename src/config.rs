//! Configuration handling for samplegen.
//! Loads the optional `samplegen.json` / `samplegen.yml` / `samplegen.yaml`
//! file and merges command line overrides into it.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::cli::Args;
use crate::constants::{
    CONFIG_FILES, DEFAULT_BINARY, DEFAULT_CREATED_AT, DEFAULT_HELM_CHART, DEFAULT_IMAGE_REGISTRY,
    DEFAULT_TESTDATA_DIR,
};
use crate::error::{Error, Result};
use crate::pipeline::go::ScaffoldVersion;

/// Settings shared by every sample pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Scaffolding binary, looked up on `PATH` unless it is a path.
    pub binary: String,
    /// Registry prefix of the operator and bundle images.
    pub image_registry: String,
    /// Extra environment for every command, in order.
    pub env: IndexMap<String, String>,
    pub scaffold_version: ScaffoldVersion,
    /// Chart archive the Helm sample is created from.
    pub helm_chart: PathBuf,
    /// Directory holding the mocks of the advanced molecule sample.
    pub testdata_dir: PathBuf,
    /// Timestamp pinned into the bundle CSV of the Go and Helm samples.
    pub created_at: String,
    pub build_images: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            image_registry: DEFAULT_IMAGE_REGISTRY.to_string(),
            env: IndexMap::new(),
            scaffold_version: ScaffoldVersion::default(),
            helm_chart: PathBuf::from(DEFAULT_HELM_CHART),
            testdata_dir: PathBuf::from(DEFAULT_TESTDATA_DIR),
            created_at: DEFAULT_CREATED_AT.to_string(),
            build_images: false,
        }
    }
}

impl Config {
    /// Makes relative testdata paths absolute against `base`. Scaffolding
    /// commands run inside the project, so relative paths would not resolve.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if self.helm_chart.is_relative() {
            self.helm_chart = base.join(&self.helm_chart);
        }
        if self.testdata_dir.is_relative() {
            self.testdata_dir = base.join(&self.testdata_dir);
        }
        self
    }

    /// Command line flags win over file values.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(binary) = &args.binary {
            self.binary = binary.clone();
        }
        if let Some(version) = args.scaffold_version {
            self.scaffold_version = version;
        }
        if args.build_images {
            self.build_images = true;
        }
    }
}

/// Finds the first configuration file present in `dir`.
///
/// # Returns
/// * `Some((path, content))` for the first of `config_files` that exists
/// * `None` if there is none
pub fn load_config<P: AsRef<Path>>(
    dir: P,
    config_files: &[&str],
) -> Result<Option<(PathBuf, String)>> {
    for file in config_files {
        let config_path = dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path).map_err(Error::IoError)?;
            return Ok(Some((config_path, content)));
        }
    }
    Ok(None)
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither, or has unknown fields
pub fn parse_config(content: &str) -> Result<Config> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Loads the configuration from `explicit` or, when not given, from the
/// first config file found in `search_dir`. No file at all yields the
/// defaults. Relative paths are resolved against the file's directory.
///
/// # Errors
/// * `Error::ConfigError` if `explicit` does not exist or cannot be parsed
pub fn get_config(explicit: Option<&Path>, search_dir: &Path) -> Result<Config> {
    let found = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(Error::ConfigError(format!(
                    "configuration file '{}' does not exist",
                    path.display()
                )));
            }
            let content = std::fs::read_to_string(path).map_err(Error::IoError)?;
            Some((path.to_path_buf(), content))
        }
        None => load_config(search_dir, &CONFIG_FILES)?,
    };

    match found {
        Some((path, content)) => {
            let base = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => search_dir.join(parent),
                _ => search_dir.to_path_buf(),
            };
            Ok(parse_config(&content)?.resolve_paths(&base))
        }
        None => {
            debug!(
                "No configuration file found (tried: {})",
                CONFIG_FILES.join(", ")
            );
            Ok(Config::default().resolve_paths(search_dir))
        }
    }
}
