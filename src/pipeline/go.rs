//! Memcached sample for the Go plugins.
//!
//! One pipeline covers every Go scaffold generation; the differences between
//! them live in [`ScaffoldVersion`]. Webhooks and monitoring are opt-in groups
//! selected through [`GoOptions`].

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::Config;
use crate::constants::{PROMETHEUS_OPERATOR_MODULE, PROMETHEUS_OPERATOR_VERSION};
use crate::context::ProjectContext;
use crate::error::{Error, Result};
use crate::fragments::go::*;
use crate::patch::{self, Patch};
use crate::pipeline::{
    bundle_steps, image_steps, lifecycle_steps, project_context, Pipeline, SamplePipeline,
};
use crate::renderer::{fragment_context, FragmentRenderer, MiniJinjaRenderer};

const OLD_TEST_COMMAND: &str = "go test ./... -coverprofile cover.out";
const OLD_TEST_COMMAND_V4: &str =
    "go test $$(go list ./... | grep -v /e2e) -coverprofile cover.out";
const TEST_COMMAND: &str =
    "go test $(shell go list ./... | grep -v /test/) -coverprofile cover.out";

/// Generation of the Go project layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ScaffoldVersion {
    #[serde(rename = "v3")]
    #[value(name = "v3")]
    V3,
    #[serde(rename = "v4-alpha")]
    #[value(name = "v4-alpha")]
    V4Alpha,
    #[default]
    #[serde(rename = "v4")]
    #[value(name = "v4")]
    V4,
}

impl ScaffoldVersion {
    pub fn name(self) -> &'static str {
        match self {
            ScaffoldVersion::V3 => "v3",
            ScaffoldVersion::V4Alpha => "v4-alpha",
            ScaffoldVersion::V4 => "v4",
        }
    }

    pub fn plugin(self) -> &'static str {
        match self {
            ScaffoldVersion::V3 => "go/v3",
            ScaffoldVersion::V4Alpha => "go/v4-alpha",
            ScaffoldVersion::V4 => "go/v4",
        }
    }

    pub fn controller_dir(self) -> &'static str {
        match self {
            ScaffoldVersion::V4 => "internal/controller",
            _ => "controllers",
        }
    }

    pub fn main_path(self) -> &'static str {
        match self {
            ScaffoldVersion::V4 => "cmd/main.go",
            _ => "main.go",
        }
    }

    /// Line of the Dockerfile copying the controller sources.
    pub fn dockerfile_anchor(self) -> String {
        let dir = self.controller_dir();
        format!("COPY {dir}/ {dir}/")
    }

    /// Import of the controller package in `main.go`.
    pub fn controllers_import(self) -> String {
        format!("\"{REPOSITORY}/{}\"", self.controller_dir())
    }

    /// Prefix of kubebuilder markers.
    pub fn marker(self) -> &'static str {
        match self {
            ScaffoldVersion::V4 => "// +kubebuilder",
            _ => "//+kubebuilder",
        }
    }

    /// Whether webhook validators also return admission warnings.
    pub fn warnings(self) -> bool {
        self == ScaffoldVersion::V4
    }

    /// Lines of `config/default/kustomization.yaml` enabled for webhooks.
    pub fn default_kustomize_toggles(self) -> &'static [&'static str] {
        match self {
            ScaffoldVersion::V4 => &["#- ../certmanager", "#- ../prometheus"],
            _ => &[
                "#- ../webhook",
                "#- ../certmanager",
                "#- ../prometheus",
                "#- manager_webhook_patch.yaml",
                "#- webhookcainjection_patch.yaml",
            ],
        }
    }

    /// Commented block wiring cert-manager into the default kustomization.
    pub fn cert_block(self) -> &'static str {
        match self {
            ScaffoldVersion::V3 => CERT_VARS,
            _ => CERT_REPLACEMENTS,
        }
    }

    /// Variables of the OLM certificate patch in `config/manifests`.
    fn olm_cert_patch_vars(self) -> serde_json::Value {
        match self {
            ScaffoldVersion::V3 => json!({
                "patches_key": "patchesJson6902",
                "container": 1,
                "blank_line": false,
            }),
            ScaffoldVersion::V4Alpha => json!({
                "patches_key": "patchesJson6902",
                "container": 0,
                "blank_line": false,
            }),
            ScaffoldVersion::V4 => json!({
                "patches_key": "patches",
                "container": 0,
                "blank_line": true,
            }),
        }
    }
}

/// Which optional groups the Go sample gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoOptions {
    pub scaffold: ScaffoldVersion,
    pub webhooks: bool,
    pub monitoring: bool,
}

impl GoOptions {
    pub fn plain(scaffold: ScaffoldVersion) -> Self {
        Self {
            scaffold,
            webhooks: false,
            monitoring: false,
        }
    }

    pub fn with_webhooks(scaffold: ScaffoldVersion) -> Self {
        Self {
            scaffold,
            webhooks: true,
            monitoring: false,
        }
    }

    /// Monitoring is layered on top of the webhook sample.
    pub fn with_monitoring(scaffold: ScaffoldVersion) -> Self {
        Self {
            scaffold,
            webhooks: true,
            monitoring: true,
        }
    }

    /// Directory of the sample below the samples root.
    pub fn sample_dir(&self, samples_dir: &Path) -> PathBuf {
        let base = samples_dir.join("go").join(self.scaffold.name());
        let base = if self.monitoring {
            base.join("monitoring")
        } else if self.webhooks {
            base.join("with-webhooks")
        } else {
            base
        };
        base.join("memcached-operator")
    }
}

/// Payload variables: the project's own plus the scaffold's marker prefix
/// and webhook signature.
fn scaffold_vars(ctx: &ProjectContext, scaffold: ScaffoldVersion) -> serde_json::Value {
    let mut vars = fragment_context(ctx);
    if let Some(map) = vars.as_object_mut() {
        map.insert("marker".to_string(), json!(scaffold.marker()));
        map.insert("warnings".to_string(), json!(scaffold.warnings()));
    }
    vars
}

/// Builds the Go memcached pipeline.
pub fn pipeline(samples_dir: &Path, config: &Config, options: GoOptions) -> Result<SamplePipeline> {
    let context = project_context(&options.sample_dir(samples_dir), config)?;
    let renderer = MiniJinjaRenderer::new()?;
    let vars = scaffold_vars(&context, options.scaffold);

    let mut pipeline = lifecycle_steps()
        .extend(scaffold_steps(options.scaffold))
        .extend(api_steps(&context, &renderer, &vars)?)
        .extend(controller_steps(&context, options.scaffold, &renderer, &vars)?);
    if options.monitoring {
        pipeline = pipeline.extend(monitoring_steps(&context, options.scaffold));
    }
    if options.webhooks {
        pipeline = pipeline
            .extend(webhook_steps(&context, options.scaffold, &renderer, &vars)?)
            .extend(e2e_steps(options.scaffold));
    }
    pipeline = pipeline.command("running go mod tidy", ProjectContext::go_mod_tidy);
    if options.monitoring {
        pipeline = pipeline
            .command("generating metrics documentation", |ctx| ctx.make(["generate-metricsdocs"]));
    }
    pipeline = pipeline
        .extend(bundle_steps(Some(config.created_at.clone())))
        .command("formatting project", |ctx| ctx.make(["fmt"]))
        .step("cleaning up binaries", ProjectContext::remove_bin);
    if config.build_images {
        pipeline = pipeline.extend(image_steps());
    }

    Ok(SamplePipeline { context, pipeline })
}

fn scaffold_steps(scaffold: ScaffoldVersion) -> Pipeline {
    Pipeline::new()
        .command("creating the project", move |ctx| {
            ctx.init([
                "--plugins",
                scaffold.plugin(),
                "--project-version",
                "3",
                "--repo",
                REPOSITORY,
                "--domain",
                ctx.domain(),
            ])
        })
        .command("scaffolding the api", |ctx| {
            let mut args = ctx.gvk().flags();
            args.extend(["--controller", "true", "--resource", "true"].map(String::from));
            ctx.create_api(args)
        })
        .step(
            "enabling restrictive pod standards",
            ProjectContext::uncomment_restrictive_pod_standards,
        )
}

fn types_path(ctx: &ProjectContext) -> PathBuf {
    Path::new("api")
        .join(&ctx.gvk().version)
        .join(format!("{}_types.go", ctx.gvk().kind_lower()))
}

fn api_steps(
    ctx: &ProjectContext,
    renderer: &dyn FragmentRenderer,
    vars: &serde_json::Value,
) -> Result<Pipeline> {
    let types = types_path(ctx);
    Ok(Pipeline::new().patches(
        "implementing the api",
        vec![
            Patch::insert(&types, SPEC_ANCHOR, SPEC_SIZE),
            Patch::insert(&types, STATUS_ANCHOR, STATUS_NODES),
            Patch::insert(&types, renderer.render(SUBRESOURCE_STATUS, vars)?, CSV_OWNED_RESOURCES),
            Patch::replace(ctx.sample_path(), SAMPLE_TODO, SAMPLE_SIZE),
        ],
    ))
}

fn controller_path(ctx: &ProjectContext, scaffold: ScaffoldVersion) -> PathBuf {
    Path::new(scaffold.controller_dir()).join(format!("{}_controller.go", ctx.gvk().kind_lower()))
}

fn controller_steps(
    ctx: &ProjectContext,
    scaffold: ScaffoldVersion,
    renderer: &dyn FragmentRenderer,
    vars: &serde_json::Value,
) -> Result<Pipeline> {
    let controller = controller_path(ctx, scaffold);
    Ok(Pipeline::new().patches(
        "implementing the controller",
        vec![
            Patch::insert(&controller, IMPORT_ANCHOR, CONTROLLER_IMPORTS),
            Patch::insert(&controller, FINALIZERS_RBAC, renderer.render(CONTROLLER_RBAC, vars)?),
            Patch::replace(&controller, LOG_IMPORT, CTRL_LOG_IMPORT),
            Patch::replace(&controller, UNUSED_LOGGER, LOGGER),
            Patch::replace(&controller, RECONCILE_TODO, RECONCILE),
            Patch::insert(&controller, RECONCILE_END, CONTROLLER_FUNCS),
            Patch::replace(&controller, WATCH, WATCH_OWNED_DEPLOYMENTS),
        ],
    ))
}

/// Writes the monitoring package, prefixed with the project's license header.
fn write_monitoring_sources(ctx: &ProjectContext) -> Result<()> {
    let header = fs::read_to_string(ctx.path("hack/boilerplate.go.txt")).map_err(Error::IoError)?;
    patch::write_new_file(ctx.path("monitoring/metrics.go"), &format!("{header}{METRICS}"))?;
    patch::write_new_file(
        ctx.path("monitoring/metricsdocs/metricsdocs.go"),
        &format!("{header}{METRICS_DOCS}"),
    )?;
    fs::create_dir_all(ctx.path("docs/monitoring")).map_err(Error::IoError)
}

fn monitoring_steps(ctx: &ProjectContext, scaffold: ScaffoldVersion) -> Pipeline {
    let controller = controller_path(ctx, scaffold);
    let main = scaffold.main_path();

    Pipeline::new()
        .command("getting the prometheus operator module", |ctx| {
            ctx.go_get(&format!("{PROMETHEUS_OPERATOR_MODULE}@{PROMETHEUS_OPERATOR_VERSION}"))
        })
        .step("implementing metrics", write_monitoring_sources)
        .step("implementing prometheus rbac", |ctx| {
            patch::write_new_file(ctx.path("config/rbac/prometheus_role.yaml"), PROMETHEUS_ROLE)?;
            patch::write_new_file(
                ctx.path("config/rbac/prometheus_role_binding.yaml"),
                PROMETHEUS_ROLE_BINDING,
            )?;
            patch::insert_code(
                ctx.path("config/rbac/kustomization.yaml"),
                LEADER_ELECTION_RBAC,
                PROMETHEUS_RBAC,
            )
        })
        .patches(
            "instrumenting the controller",
            vec![
                Patch::insert(&controller, API_IMPORT, MONITORING_IMPORT),
                Patch::insert(&controller, SIZE_MISMATCH, COUNT_SIZE_MISMATCH),
            ],
        )
        .patches(
            "registering metrics",
            vec![
                Patch::insert(main, scaffold.controllers_import(), MONITORING_IMPORT),
                Patch::insert(main, ADD_TO_SCHEME, REGISTER_METRICS),
            ],
        )
        .patches(
            "customizing Dockerfile and Makefile",
            vec![
                Patch::insert("Dockerfile", scaffold.dockerfile_anchor(), COPY_MONITORING),
                Patch::insert("Makefile", CATALOG_PUSH, METRICS_DOCS_TARGET),
            ],
        )
}

fn webhook_steps(
    ctx: &ProjectContext,
    scaffold: ScaffoldVersion,
    renderer: &dyn FragmentRenderer,
    vars: &serde_json::Value,
) -> Result<Pipeline> {
    let gvk = ctx.gvk();
    let webhook = Path::new("api")
        .join(&gvk.version)
        .join(format!("{}_webhook.go", gvk.kind_lower()));

    let default_kustomization = Path::new("config/default/kustomization.yaml");
    let mut kustomize: Vec<Patch> = scaffold
        .default_kustomize_toggles()
        .iter()
        .map(|line| Patch::uncomment(default_kustomization, *line))
        .collect();
    kustomize.push(Patch::uncomment(default_kustomization, scaffold.cert_block()));
    kustomize.push(Patch::uncomment(
        "config/manifests/kustomization.yaml",
        renderer.render(OLM_CERT_PATCH, &scaffold.olm_cert_patch_vars())?,
    ));

    Ok(Pipeline::new()
        .command("scaffolding webhook", |ctx| {
            let mut args = ctx.gvk().flags();
            args.push("--defaulting".to_string());
            ctx.create_webhook(args)
        })
        .patches(
            "implementing webhooks",
            vec![
                Patch::insert(&webhook, DEFAULTING_END, renderer.render(VALIDATORS, vars)?),
                Patch::replace(&webhook, DEFAULTING_TODO, DEFAULT_SIZE),
                Patch::insert(&webhook, IMPORT_ANCHOR, renderer.render(WEBHOOK_IMPORTS, vars)?),
            ],
        )
        .patches("enabling webhooks and certificates in kustomize", kustomize))
}

fn e2e_steps(scaffold: ScaffoldVersion) -> Pipeline {
    let makefile = match scaffold {
        ScaffoldVersion::V4 => vec![Patch::replace("Makefile", OLD_TEST_COMMAND_V4, TEST_COMMAND)],
        _ => vec![
            Patch::replace("Makefile", OLD_TEST_COMMAND, TEST_COMMAND),
            Patch::insert("Makefile", format!("{TEST_COMMAND}\n"), E2E_TARGET),
        ],
    };

    Pipeline::new()
        .step("implementing e2e tests", |ctx| {
            patch::write_new_file(ctx.path("test/e2e/e2e_suite_test.go"), E2E_SUITE)?;
            patch::write_new_file(ctx.path("test/e2e/e2e_test.go"), E2E_TEST)?;
            patch::write_new_file(ctx.path("test/utils/utils.go"), E2E_UTILS)
        })
        .patches("excluding e2e tests from unit tests", makefile)
}
