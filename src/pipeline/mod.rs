//! Ordered, named steps that turn a freshly scaffolded project into a sample.
//!
//! A pipeline is built up front from step groups and only then run, so the
//! full plan of a sample can be listed without touching the disk. Steps run
//! strictly in order; the first failure stops the run and is reported with
//! the name of the step that produced it.

use std::path::Path;

use clap::ValueEnum;
use log::info;

use crate::bundle;
use crate::config::Config;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::patch::{self, Patch};

pub mod advanced_molecule;
pub mod ansible;
pub mod go;
pub mod helm;

/// Body of one pipeline step.
pub type StepFn = Box<dyn Fn(&ProjectContext) -> Result<()>>;

pub struct Step {
    name: String,
    run: StepFn,
}

impl Step {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    pub fn step<S, F>(mut self, name: S, run: F) -> Self
    where
        S: Into<String>,
        F: Fn(&ProjectContext) -> Result<()> + 'static,
    {
        self.steps.push(Step {
            name: name.into(),
            run: Box::new(run),
        });
        self
    }

    /// Appends a step whose output is only logged.
    pub fn command<S, F>(self, name: S, run: F) -> Self
    where
        S: Into<String>,
        F: Fn(&ProjectContext) -> Result<String> + 'static,
    {
        self.step(name, move |ctx| {
            let output = run(ctx)?;
            if !output.trim().is_empty() {
                log::debug!("{}", output.trim_end());
            }
            Ok(())
        })
    }

    /// Appends a step applying `patches` in order against the project root.
    pub fn patches<S: Into<String>>(self, name: S, patches: Vec<Patch>) -> Self {
        self.step(name, move |ctx| patch::apply_all(ctx.dir(), &patches))
    }

    /// Appends every step of `other`.
    pub fn extend(mut self, other: Pipeline) -> Self {
        self.steps.extend(other.steps);
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step against `ctx`.
    ///
    /// # Errors
    /// * `Error::Step` wrapping the first failure
    pub fn run(&self, ctx: &ProjectContext) -> Result<()> {
        let total = self.steps.len();
        for (idx, step) in self.steps.iter().enumerate() {
            info!("[{}/{total}] {}", idx + 1, step.name);
            (step.run)(ctx).map_err(|e| e.in_step(&step.name))?;
        }
        Ok(())
    }
}

/// Starts every sample from an empty directory.
pub fn lifecycle_steps() -> Pipeline {
    Pipeline::new()
        .step("destroying sample directory", ProjectContext::destroy)
        .step("creating sample directory", ProjectContext::prepare)
}

/// Generates and normalizes the OLM bundle. `created_at` pins the CSV
/// timestamp when given.
pub fn bundle_steps(created_at: Option<String>) -> Pipeline {
    let mut pipeline = Pipeline::new()
        .step("generating bundle", bundle::generate_bundle)
        .step("stripping bundle annotations", bundle::strip_bundle_annotations);
    if let Some(timestamp) = created_at {
        pipeline = pipeline.step("setting createdAt annotation", move |ctx| {
            bundle::pin_created_at(ctx, &timestamp)
        });
    }
    pipeline
}

/// Builds the operator and bundle images.
pub fn image_steps() -> Pipeline {
    Pipeline::new()
        .command("building operator image", ProjectContext::build_image)
        .command("building bundle image", ProjectContext::build_bundle_image)
}

/// Samples this tool knows how to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SampleKind {
    /// Go memcached operator
    Go,
    /// Go memcached operator with validating and defaulting webhooks
    GoWebhooks,
    /// Go memcached operator with webhooks and Prometheus metrics
    GoMonitoring,
    /// Helm memcached operator
    Helm,
    /// Ansible memcached operator
    Ansible,
    /// Ansible memcached operator with extra molecule scenarios
    AnsibleMolecule,
    /// Ansible operator exercising many APIs in one project
    AdvancedMolecule,
}

impl SampleKind {
    pub fn all() -> &'static [SampleKind] {
        &[
            SampleKind::Go,
            SampleKind::GoWebhooks,
            SampleKind::GoMonitoring,
            SampleKind::Helm,
            SampleKind::Ansible,
            SampleKind::AnsibleMolecule,
            SampleKind::AdvancedMolecule,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            SampleKind::Go => "go",
            SampleKind::GoWebhooks => "go-webhooks",
            SampleKind::GoMonitoring => "go-monitoring",
            SampleKind::Helm => "helm",
            SampleKind::Ansible => "ansible",
            SampleKind::AnsibleMolecule => "ansible-molecule",
            SampleKind::AdvancedMolecule => "advanced-molecule",
        }
    }
}

/// A project context together with the steps that build it.
pub struct SamplePipeline {
    pub context: ProjectContext,
    pub pipeline: Pipeline,
}

impl SamplePipeline {
    pub fn run(&self) -> Result<()> {
        info!(
            "Generating {} in {}",
            self.context.project_name(),
            self.context.dir().display()
        );
        self.pipeline.run(&self.context)
    }
}

/// Builds the pipeline for `kind`, rooted under `samples_dir`.
///
/// # Errors
/// * `Error::IoError` if the samples directory cannot be resolved
/// * `Error::TemplateError` if a payload cannot be rendered
pub fn for_sample(kind: SampleKind, samples_dir: &Path, config: &Config) -> Result<SamplePipeline> {
    let scaffold = config.scaffold_version;
    match kind {
        SampleKind::Go => go::pipeline(samples_dir, config, go::GoOptions::plain(scaffold)),
        SampleKind::GoWebhooks => {
            go::pipeline(samples_dir, config, go::GoOptions::with_webhooks(scaffold))
        }
        SampleKind::GoMonitoring => {
            go::pipeline(samples_dir, config, go::GoOptions::with_monitoring(scaffold))
        }
        SampleKind::Helm => helm::pipeline(samples_dir, config),
        SampleKind::Ansible => ansible::memcached_pipeline(samples_dir, config),
        SampleKind::AnsibleMolecule => ansible::molecule_pipeline(samples_dir, config),
        SampleKind::AdvancedMolecule => advanced_molecule::pipeline(samples_dir, config),
    }
}

/// Context for the project at `dir` with the registry, binary and extra
/// environment from `config`.
pub(crate) fn project_context(dir: &Path, config: &Config) -> Result<ProjectContext> {
    Ok(ProjectContext::new(&config.binary, dir)?
        .with_image_registry(&config.image_registry)
        .with_envs(config.env.clone()))
}
