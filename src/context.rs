//! Identity and location of one generated project.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};
use walkdir::WalkDir;

use crate::command::CommandContext;
use crate::constants::{DEFAULT_DOMAIN, DEFAULT_IMAGE_REGISTRY, GO_MODULE_ENV, IMAGE_TAG};
use crate::error::{Error, Result};
use crate::patch;
use crate::sample::GroupVersionKind;

const RESTRICTIVE_POD_STANDARDS_COMMENT: &str = r#"# TODO(user): For common cases that do not require escalating privileges
        # it is recommended to ensure that all your Pods/Containers are restrictive.
        # More info: https://kubernetes.io/docs/concepts/security/pod-security-standards/#restricted
        # Please uncomment the following code if your project does NOT have to work on old Kubernetes
        # versions < 1.19 or on vendors versions which do NOT support this field by default (i.e. Openshift < 4.11 ).
        # seccompProfile:
        #   type: RuntimeDefault"#;

const RESTRICTIVE_POD_STANDARDS: &str = "seccompProfile:
          type: RuntimeDefault";

const MANIFESTS_INTERACTIVE: &str = "generate kustomize manifests";
const MANIFESTS_NON_INTERACTIVE: &str = "generate kustomize manifests --interactive=false";

/// A project directory plus everything needed to drive the scaffolder in it.
///
/// The directory is owned by a single pipeline run. It is destroyed at the
/// start of a run and left in place afterwards.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    dir: PathBuf,
    domain: String,
    gvk: GroupVersionKind,
    project_name: String,
    image_name: String,
    bundle_image_name: String,
    binary: String,
    runner: CommandContext,
}

impl ProjectContext {
    /// Creates a context for the project at `dir`.
    ///
    /// The project name is the lowercased last segment of `dir` and the
    /// image names are derived from it using the default registry. A
    /// relative `dir` is resolved against the current directory.
    ///
    /// # Errors
    /// * `Error::IoError` if the current directory cannot be determined
    /// * `Error::ConfigError` if `dir` has no final segment to name the project
    pub fn new<B: Into<String>, P: AsRef<Path>>(binary: B, dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            std::env::current_dir().map_err(Error::IoError)?.join(dir)
        };
        let project_name = dir
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                Error::ConfigError(format!("cannot derive a project name from {}", dir.display()))
            })?;

        let runner =
            CommandContext::new(&dir).with_env(GO_MODULE_ENV.0, GO_MODULE_ENV.1);
        let mut ctx = Self {
            dir,
            domain: DEFAULT_DOMAIN.to_string(),
            gvk: GroupVersionKind::new("cache", "v1alpha1", "Memcached"),
            project_name,
            image_name: String::new(),
            bundle_image_name: String::new(),
            binary: binary.into(),
            runner,
        };
        ctx.set_image_registry(DEFAULT_IMAGE_REGISTRY);
        Ok(ctx)
    }

    /// Re-derives both image names under `registry`.
    pub fn with_image_registry(mut self, registry: &str) -> Self {
        self.set_image_registry(registry);
        self
    }

    fn set_image_registry(&mut self, registry: &str) {
        let registry = registry.trim_end_matches('/');
        self.image_name = format!("{registry}/{}:{IMAGE_TAG}", self.project_name);
        self.bundle_image_name = format!("{registry}/{}-bundle:{IMAGE_TAG}", self.project_name);
    }

    pub fn with_gvk(mut self, gvk: GroupVersionKind) -> Self {
        self.gvk = gvk;
        self
    }

    /// Adds `KEY=value` pairs to the environment of every command run here.
    pub fn with_envs<I, K, V>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.runner = self.runner.with_envs(env);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn gvk(&self) -> &GroupVersionKind {
        &self.gvk
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn image_name(&self) -> &str {
        &self.image_name
    }

    pub fn bundle_image_name(&self) -> &str {
        &self.bundle_image_name
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn runner(&self) -> &CommandContext {
        &self.runner
    }

    /// Absolute path of `relative` inside the project.
    pub fn path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.dir.join(relative)
    }

    /// `config/samples/<group>_<version>_<kind>.yaml` for the context's GVK.
    pub fn sample_path(&self) -> PathBuf {
        Path::new("config").join("samples").join(format!(
            "{}_{}_{}.yaml",
            self.gvk.group,
            self.gvk.version,
            self.gvk.kind_lower()
        ))
    }

    /// Creates the project directory.
    pub fn prepare(&self) -> Result<()> {
        debug!("Creating directory: {}", self.dir.display());
        fs::create_dir_all(&self.dir).map_err(Error::IoError)
    }

    /// Removes the project directory. A missing directory is not an error.
    pub fn destroy(&self) -> Result<()> {
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => {
                debug!("Removed directory: {}", self.dir.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::IoError(err)),
        }
    }

    /// Runs `cmd` in the project directory.
    pub fn run(&self, cmd: Command) -> Result<String> {
        self.runner.run(cmd, &[])
    }

    fn run_binary<I, S>(&self, leading: &[&str], args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cmd = Command::new(&self.binary);
        cmd.args(leading);
        cmd.args(args.into_iter().map(|arg| arg.as_ref().to_string()));
        self.run(cmd)
    }

    /// `<binary> init <args>`
    pub fn init<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_binary(&["init"], args)
    }

    /// `<binary> create api <args>`
    pub fn create_api<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_binary(&["create", "api"], args)
    }

    /// `<binary> create webhook <args>`
    pub fn create_webhook<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_binary(&["create", "webhook"], args)
    }

    /// `make <args>`
    pub fn make<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cmd = Command::new("make");
        cmd.args(args.into_iter().map(|arg| arg.as_ref().to_string()));
        self.run(cmd)
    }

    pub fn go_mod_tidy(&self) -> Result<String> {
        let mut cmd = Command::new("go");
        cmd.args(["mod", "tidy"]);
        self.run(cmd)
    }

    /// `go get <module>`; `module` may carry an `@version` suffix.
    pub fn go_get(&self, module: &str) -> Result<String> {
        let mut cmd = Command::new("go");
        cmd.args(["get", module]);
        self.run(cmd)
    }

    /// `make docker-build IMG=<image>`
    pub fn build_image(&self) -> Result<String> {
        self.make([
            "docker-build".to_string(),
            format!("IMG={}", self.image_name),
        ])
    }

    /// `make bundle-build BUNDLE_IMG=<bundle image>`
    pub fn build_bundle_image(&self) -> Result<String> {
        self.make([
            "bundle-build".to_string(),
            format!("BUNDLE_IMG={}", self.bundle_image_name),
        ])
    }

    /// Removes binaries left behind by builds inside the project.
    pub fn remove_bin(&self) -> Result<()> {
        self.remove_path("bin")
    }

    /// Removes a file or directory inside the project. Missing paths are ignored.
    pub fn remove_path<P: AsRef<Path>>(&self, relative: P) -> Result<()> {
        let target = self.path(relative);
        let removed = if target.is_dir() {
            fs::remove_dir_all(&target)
        } else {
            fs::remove_file(&target)
        };
        match removed {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(Error::IoError(err)),
            _ => Ok(()),
        }
    }

    /// Allows APIs from more than one group in the project.
    pub fn allow_project_be_multi_group(&self) -> Result<()> {
        patch::prepend_to_file(self.path("PROJECT"), "multigroup: true\n")
    }

    /// Enables the `seccompProfile` the scaffolder leaves commented out in
    /// the manager deployment.
    pub fn uncomment_restrictive_pod_standards(&self) -> Result<()> {
        patch::replace_in_file(
            self.path("config/manager/manager.yaml"),
            RESTRICTIVE_POD_STANDARDS_COMMENT,
            RESTRICTIVE_POD_STANDARDS,
        )
    }

    /// Makes `make bundle` generate manifests without prompting.
    pub fn disable_manifests_interactive_mode(&self) -> Result<()> {
        patch::replace_in_file(
            self.path("Makefile"),
            MANIFESTS_INTERACTIVE,
            MANIFESTS_NON_INTERACTIVE,
        )
    }

    /// Recursively copies `source` (a file or a directory) to `relative`
    /// inside the project, creating directories as needed.
    pub fn copy_from<S: AsRef<Path>, P: AsRef<Path>>(&self, source: S, relative: P) -> Result<()> {
        let source = source.as_ref();
        let dest = self.path(relative);
        info!("Copying {} to {}", source.display(), dest.display());

        for entry in WalkDir::new(source) {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            let rel = entry
                .path()
                .strip_prefix(source)
                .map_err(|e| Error::IoError(io::Error::other(e)))?;
            let target = if rel.as_os_str().is_empty() {
                dest.clone()
            } else {
                dest.join(rel)
            };

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(Error::IoError)?;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent).map_err(Error::IoError)?;
                }
                fs::copy(entry.path(), &target).map_err(Error::IoError)?;
            }
        }
        Ok(())
    }
}
