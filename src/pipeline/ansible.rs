//! Memcached samples for the Ansible plugin.
//!
//! The molecule sample is the plain memcached sample with more APIs, a
//! finalizer, a blacklisted kind and extra molecule checks on top.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::fragments::ansible::*;
use crate::patch::{self, Patch};
use crate::pipeline::{
    bundle_steps, image_steps, lifecycle_steps, project_context, Pipeline, SamplePipeline,
};
use crate::renderer::{fragment_context, FragmentRenderer, MiniJinjaRenderer};
use crate::sample::GroupVersionKind;

/// `molecule/default/tasks/<kind>_test.yml`
pub(crate) fn molecule_test_path(kind_lower: &str) -> PathBuf {
    Path::new("molecule")
        .join("default")
        .join("tasks")
        .join(format!("{kind_lower}_test.yml"))
}

/// `roles/<role>/tasks/main.yml`
pub(crate) fn role_tasks_path(role: &str) -> PathBuf {
    Path::new("roles").join(role).join("tasks").join("main.yml")
}

/// Builds the plain Ansible memcached pipeline.
pub fn memcached_pipeline(samples_dir: &Path, config: &Config) -> Result<SamplePipeline> {
    let dir = samples_dir.join("ansible").join("memcached-operator");
    let context = project_context(&dir, config)?;
    let pipeline = lifecycle_steps()
        .extend(memcached_steps(&context)?)
        .extend(finish_steps(config));
    Ok(SamplePipeline { context, pipeline })
}

/// Builds the Ansible molecule pipeline.
pub fn molecule_pipeline(samples_dir: &Path, config: &Config) -> Result<SamplePipeline> {
    let dir = samples_dir.join("ansible").join("memcached-molecule-operator");
    let context = project_context(&dir, config)?;
    let pipeline = lifecycle_steps()
        .extend(memcached_steps(&context)?)
        .extend(molecule_steps(&context))
        .extend(finish_steps(config));
    Ok(SamplePipeline { context, pipeline })
}

fn finish_steps(config: &Config) -> Pipeline {
    let pipeline = bundle_steps(None);
    if config.build_images {
        pipeline.extend(image_steps())
    } else {
        pipeline
    }
}

/// Scaffolds the project and customizes the Memcached role, its defaults,
/// the sample CR and its molecule test.
fn memcached_steps(ctx: &ProjectContext) -> Result<Pipeline> {
    let renderer = MiniJinjaRenderer::new()?;
    let gvk = ctx.gvk();
    let role = gvk.kind_lower();

    Ok(Pipeline::new()
        .command("creating the project", |ctx| {
            let mut args = vec!["--plugins".to_string(), "ansible".to_string()];
            args.extend(ctx.gvk().flags());
            args.extend(["--domain".to_string(), ctx.domain().to_string()]);
            args.extend(["--generate-role", "--generate-playbook"].map(String::from));
            ctx.init(args)
        })
        .patches(
            "customizing the sample",
            vec![
                Patch::uncomment("config/default/kustomization.yaml", "#- ../prometheus"),
                Patch::insert(
                    role_tasks_path(&role),
                    format!("# tasks file for {}", gvk.kind),
                    ROLE_TASK,
                ),
                Patch::replace(
                    Path::new("roles").join(&role).join("defaults").join("main.yml"),
                    format!("# defaults file for {}", gvk.kind),
                    ROLE_DEFAULTS,
                ),
                Patch::replace(ctx.sample_path(), "foo: bar", "size: 1"),
            ],
        )
        .patches(
            "adding molecule test for the role",
            vec![Patch::replace(
                molecule_test_path(&role),
                SCAFFOLDED_MOLECULE_TASK,
                renderer.render(MOLECULE_TASK, &fragment_context(ctx))?,
            )],
        ))
}

fn create_api_step(pipeline: Pipeline, gvk: GroupVersionKind) -> Pipeline {
    pipeline.command(format!("creating api {gvk}"), move |ctx| {
        let mut args = gvk.flags();
        args.push("--generate-role".to_string());
        ctx.create_api(args)
    })
}

fn molecule_steps(ctx: &ProjectContext) -> Pipeline {
    let gvk = ctx.gvk();
    let role = gvk.kind_lower();
    let molecule_test = molecule_test_path(&role);

    let pipeline = Pipeline::new()
        .patches(
            "adding molecule checks",
            vec![
                Patch::insert(&molecule_test, DEPLOYMENT_CHECK, CONFIG_MAP_CHECK),
                Patch::insert(&molecule_test, CUSTOM_STATUS_CHECK, SECRET_CHECK),
                Patch::insert(&molecule_test, SECRET_CHECK, FOO_CHECK),
            ],
        )
        .patches(
            "using the development base image",
            vec![Patch::replace_regex(
                "Dockerfile",
                ANSIBLE_OPERATOR_IMAGE,
                ANSIBLE_OPERATOR_DEV_IMAGE,
            )],
        )
        .patches(
            "adding rbac permissions",
            vec![Patch::replace(
                "config/rbac/role.yaml",
                "# +kubebuilder:scaffold:rules",
                BASE_OPERATOR_RULES,
            )],
        )
        .patches(
            "adding task with blacklisted ConfigMap",
            vec![Patch::replace(
                role_tasks_path(&role),
                ROLE_TASK,
                BLACKLIST_ROLE_TASK,
            )],
        );

    let foo = GroupVersionKind::new(&gvk.group, &gvk.version, "Foo");
    let memfin = GroupVersionKind::new(&gvk.group, &gvk.version, "Memfin");
    let pipeline = create_api_step(create_api_step(pipeline, foo), memfin);

    let pipeline = pipeline
        .patches(
            "adding finalizer for Memcached",
            vec![
                Patch::replace(
                    role_tasks_path("memfin"),
                    "# tasks file for Memfin",
                    DELETE_CONFIG_MAP_TASK,
                ),
                Patch::replace(
                    "watches.yaml",
                    "playbook: playbooks/memcached.yml",
                    WATCH_CUSTOMIZATIONS,
                ),
            ],
        )
        .step("allowing multiple groups", ProjectContext::allow_project_be_multi_group);

    create_api_step(pipeline, GroupVersionKind::new("ignore", "v1", "Secret"))
        .patches(
            "watching Secrets in the core group",
            vec![Patch::replace("watches.yaml", "ignore.example.com", "\"\"")],
        )
        .step("removing the Secret molecule test", |ctx| {
            ctx.remove_path(molecule_test_path("secret"))
        })
        .patches(
            "customizing the Secret role",
            vec![
                Patch::replace(role_tasks_path("secret"), SCAFFOLDED_SECRET_TASK, SECRET_TASK),
                Patch::replace("watches.yaml", "role: secret", SECRET_WITHOUT_STATUS),
            ],
        )
        .step("adding WATCH_NAMESPACE to the testing overlay", |ctx| {
            patch::write_new_file(
                ctx.path("config/testing/watch_namespace_patch.yaml"),
                WATCH_NAMESPACE_PATCH,
            )?;
            patch::insert_code(
                ctx.path("config/testing/kustomization.yaml"),
                "patchesStrategicMerge:",
                "\n- watch_namespace_patch.yaml",
            )
        })
        .patches(
            "removing placeholder assertions",
            vec![
                Patch::replace(molecule_test_path("memfin"), FIXME_ASSERT, ""),
                Patch::replace(molecule_test_path("foo"), FIXME_ASSERT, ""),
            ],
        )
}
