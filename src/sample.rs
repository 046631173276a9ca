//! Samples: what kind of example project to scaffold and how to ask the
//! scaffolding binary for it.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use log::info;
use serde::{Deserialize, Serialize};

use crate::command::CommandContext;
use crate::error::Result;

/// One API identity handed to `create api` / `create webhook`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn new<G, V, K>(group: G, version: V, kind: K) -> Self
    where
        G: Into<String>,
        V: Into<String>,
        K: Into<String>,
    {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Lowercased kind, as the generator uses it in file names.
    pub fn kind_lower(&self) -> String {
        self.kind.to_lowercase()
    }

    /// `--group G --version V --kind K`
    pub fn flags(&self) -> Vec<String> {
        vec![
            "--group".to_string(),
            self.group.clone(),
            "--version".to_string(),
            self.version.clone(),
            "--kind".to_string(),
            self.kind.clone(),
        ]
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Kind={}", self.group, self.version, self.kind)
    }
}

/// A project that can be scaffolded by an external binary.
pub trait Sample {
    /// Context the scaffolding commands run in.
    fn command_context(&self) -> &CommandContext;
    fn name(&self) -> &str;
    /// APIs created, in order, by `generate_api` and `generate_webhook`.
    fn gvks(&self) -> &[GroupVersionKind];
    fn domain(&self) -> &str;
    /// Directory the sample is created in.
    fn dir(&self) -> PathBuf {
        self.command_context().dir().join(self.name())
    }
    fn binary(&self) -> &str;
    /// Scaffolds the project with the `init` subcommand.
    fn generate_init(&self) -> Result<()>;
    /// Runs `create api` once per GVK.
    fn generate_api(&self) -> Result<()>;
    /// Runs `create webhook` once per GVK.
    fn generate_webhook(&self) -> Result<()>;
}

/// General purpose [`Sample`] driven entirely by its builder options.
#[derive(Debug, Clone)]
pub struct GenericSample {
    domain: String,
    repo: Option<String>,
    gvks: Vec<GroupVersionKind>,
    command_context: CommandContext,
    name: String,
    binary: String,
    plugins: Vec<String>,
    init_options: Vec<String>,
    api_options: Vec<String>,
    webhook_options: Vec<String>,
}

impl Default for GenericSample {
    fn default() -> Self {
        Self {
            domain: "example.com".to_string(),
            repo: None,
            gvks: vec![GroupVersionKind::new("sample", "v1", "Generic")],
            command_context: CommandContext::default(),
            name: "generic-sample".to_string(),
            binary: "kubebuilder".to_string(),
            plugins: vec!["go/v3".to_string()],
            init_options: Vec::new(),
            api_options: Vec::new(),
            webhook_options: Vec::new(),
        }
    }
}

fn owned<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl GenericSample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain<S: Into<String>>(mut self, domain: S) -> Self {
        self.domain = domain.into();
        self
    }

    /// Sets the `--repo` passed to `init`.
    pub fn with_repository<S: Into<String>>(mut self, repo: S) -> Self {
        self.repo = Some(repo.into());
        self
    }

    pub fn with_gvks<I: IntoIterator<Item = GroupVersionKind>>(mut self, gvks: I) -> Self {
        self.gvks = gvks.into_iter().collect();
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_command_context(mut self, command_context: CommandContext) -> Self {
        self.command_context = command_context;
        self
    }

    pub fn with_binary<S: Into<String>>(mut self, binary: S) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_plugins<I, S>(mut self, plugins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plugins = owned(plugins);
        self
    }

    pub fn with_extra_init_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.init_options = owned(options);
        self
    }

    pub fn with_extra_api_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.api_options = owned(options);
        self
    }

    pub fn with_extra_webhook_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.webhook_options = owned(options);
        self
    }

    /// `--plugins a,b`, passed even when the list is empty.
    fn plugin_flags(&self) -> [String; 2] {
        let plugins = self.plugins.join(",");
        [
            "--plugins".to_string(),
            plugins.trim_end_matches(',').to_string(),
        ]
    }

    /// Arguments of the `init` invocation.
    pub fn init_args(&self) -> Vec<String> {
        let mut args = vec!["init".to_string()];
        args.extend(self.plugin_flags());
        args.extend(["--domain".to_string(), self.domain.clone()]);
        if let Some(repo) = &self.repo {
            args.extend(["--repo".to_string(), repo.clone()]);
        }
        args.extend(self.init_options.iter().cloned());
        args
    }

    /// Arguments of the `create <resource>` invocation for one GVK.
    pub fn create_args(&self, resource: &str, gvk: &GroupVersionKind) -> Vec<String> {
        let mut args = vec!["create".to_string(), resource.to_string()];
        args.extend(self.plugin_flags());
        args.extend(gvk.flags());
        let extra = if resource == "webhook" {
            &self.webhook_options
        } else {
            &self.api_options
        };
        args.extend(extra.iter().cloned());
        args
    }

    fn run_binary(&self, args: Vec<String>) -> Result<String> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args);
        self.command_context.run(cmd, &[self.name.as_str()])
    }

    fn generate_resources(&self, resource: &str) -> Result<()> {
        for gvk in &self.gvks {
            info!("creating {resource} {gvk} for sample {}", self.name);
            self.run_binary(self.create_args(resource, gvk))?;
        }
        Ok(())
    }
}

impl Sample for GenericSample {
    fn command_context(&self) -> &CommandContext {
        &self.command_context
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn gvks(&self) -> &[GroupVersionKind] {
        &self.gvks
    }

    fn domain(&self) -> &str {
        &self.domain
    }

    fn binary(&self) -> &str {
        &self.binary
    }

    fn generate_init(&self) -> Result<()> {
        self.run_binary(self.init_args()).map(|_| ())
    }

    fn generate_api(&self) -> Result<()> {
        self.generate_resources("api")
    }

    fn generate_webhook(&self) -> Result<()> {
        self.generate_resources("webhook")
    }
}
