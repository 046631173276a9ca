//! Ansible sample exercising many APIs, playbooks and mocks in one project.

use std::path::{Path, PathBuf};

use crate::command::CommandContext;
use crate::config::Config;
use crate::constants::GO_MODULE_ENV;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::fragments::ansible::*;
use crate::generator::Generator;
use crate::patch::Patch;
use crate::pipeline::ansible::{molecule_test_path, role_tasks_path};
use crate::pipeline::{
    bundle_steps, image_steps, lifecycle_steps, project_context, SamplePipeline,
};
use crate::renderer::{fragment_context, FragmentRenderer, MiniJinjaRenderer};
use crate::sample::{GenericSample, GroupVersionKind, Sample};

const NAME: &str = "advanced-molecule-operator";
const GROUP: &str = "test";
const VERSION: &str = "v1alpha1";

/// APIs created after `init`, in order.
pub const KINDS: [&str; 8] = [
    "ArgsTest",
    "CaseTest",
    "CollectionTest",
    "ClusterAnnotationTest",
    "FinalizerConcurrencyTest",
    "ReconciliationTest",
    "SelectorTest",
    "SubresourcesTest",
];

/// Playbooks replacing the scaffolded one, keyed by API.
const PLAYBOOKS: [(&str, &str); 7] = [
    ("argstest", ARGS_PLAYBOOK),
    ("casetest", CASE_PLAYBOOK),
    ("reconciliationtest", RECONCILIATION_PLAYBOOK),
    ("selectortest", SELECTOR_PLAYBOOK),
    ("subresourcestest", SUBRESOURCES_PLAYBOOK),
    ("clusterannotationtest", CLUSTER_ANNOTATION_PLAYBOOK),
    ("finalizerconcurrencytest", FINALIZER_CONCURRENCY_PLAYBOOK),
];

/// Files copied verbatim from the testdata directory: source, then
/// destination inside the project.
const MOCKS: [(&str, &str); 8] = [
    ("ansible.cfg", "ansible.cfg"),
    ("plugins", "plugins"),
    ("fixture_collection", "fixture_collection"),
    ("watches.yaml", "watches.yaml"),
    ("tasks", "molecule/default/tasks"),
    ("secret.yml", "playbooks/secret.yml"),
    ("inventory", "inventory"),
    ("playbooks/finalizerconcurrencyfinalizer.yml", "playbooks/finalizerconcurrencyfinalizer.yml"),
];

/// The generic sample scaffolding the project: `InventoryTest` from `init`
/// plus one API per entry of [`KINDS`], each with a playbook.
pub fn sample(samples_dir: &Path, config: &Config) -> GenericSample {
    let runner = CommandContext::new(samples_dir.join("ansible"))
        .with_env(GO_MODULE_ENV.0, GO_MODULE_ENV.1)
        .with_envs(config.env.clone());
    GenericSample::new()
        .with_binary(&config.binary)
        .with_command_context(runner)
        .with_name(NAME)
        .with_gvks(KINDS.iter().map(|kind| GroupVersionKind::new(GROUP, VERSION, *kind)))
        .with_plugins(["ansible"])
        .with_extra_init_options([
            "--group",
            GROUP,
            "--version",
            VERSION,
            "--kind",
            "InventoryTest",
            "--generate-role",
            "--generate-playbook",
        ])
        .with_extra_api_options(["--generate-playbook"])
}

fn playbook_path(name: &str) -> PathBuf {
    Path::new("playbooks").join(format!("{name}.yml"))
}

/// Builds the advanced molecule pipeline.
pub fn pipeline(samples_dir: &Path, config: &Config) -> Result<SamplePipeline> {
    let generic = sample(samples_dir, config);
    let context = project_context(&generic.dir(), config)?
        .with_gvk(GroupVersionKind::new(GROUP, VERSION, "InventoryTest"));
    let renderer = MiniJinjaRenderer::new()?;
    let leader_election_id = renderer.render(LEADER_ELECTION_ID, &fragment_context(&context))?;
    let testdata = config.testdata_dir.clone();

    let inventory_sample = context.sample_path();
    let mut playbooks: Vec<Patch> = PLAYBOOKS
        .iter()
        .map(|(name, playbook)| Patch::replace(playbook_path(name), SCAFFOLDED_PLAYBOOK, *playbook))
        .collect();
    playbooks.push(Patch::replace(
        playbook_path("inventorytest"),
        SCAFFOLDED_INVENTORY_PLAYBOOK,
        INVENTORY_PLAYBOOK,
    ));

    let mut pipeline = lifecycle_steps()
        .step("generating the sample", move |_| {
            let samples: [&dyn Sample; 1] = [&generic];
            Generator::new().with_no_webhook().generate_samples(&samples)
        })
        .step("allowing multiple groups", ProjectContext::allow_project_be_multi_group)
        .patches(
            "customizing the inventory test",
            vec![
                Patch::replace(
                    role_tasks_path("inventorytest"),
                    "# tasks file for InventoryTest",
                    INVENTORY_ROLE_TASK,
                ),
                Patch::replace(&inventory_sample, "name: inventorytest-sample", INVENTORY_SAMPLE),
                Patch::replace(&inventory_sample, "# TODO(user): Add fields here", "size: 3"),
            ],
        )
        .patches(
            "removing placeholder assertions",
            KINDS
                .iter()
                .map(|kind| {
                    Patch::replace(molecule_test_path(&kind.to_lowercase()), FIXME_ASSERT, "")
                })
                .collect(),
        )
        .patches("updating playbooks", playbooks)
        .step("adding mocks from testdata", move |ctx| {
            MOCKS
                .iter()
                .try_for_each(|(source, dest)| ctx.copy_from(testdata.join(source), dest))
        })
        .patches(
            "updating Dockerfile",
            vec![
                Patch::replace_regex(
                    "Dockerfile",
                    ANSIBLE_OPERATOR_IMAGE,
                    ANSIBLE_OPERATOR_DEV_IMAGE,
                ),
                Patch::insert(
                    "Dockerfile",
                    "COPY playbooks/ ${HOME}/playbooks/",
                    ADVANCED_DOCKERFILE,
                ),
            ],
        )
        .patches(
            "updating config",
            vec![
                Patch::replace(
                    "config/rbac/role.yaml",
                    "#+kubebuilder:scaffold:rules",
                    CONFIG_MAP_RULES,
                ),
                Patch::insert("config/manager/manager.yaml", leader_election_id, VAULT_ARG),
                Patch::insert("config/manager/manager.yaml", "value: explicit", MANAGER_ENV),
                Patch::insert(
                    "config/default/manager_auth_proxy_patch.yaml",
                    "- \"--leader-elect\"",
                    PROXY_VAULT_ARG,
                ),
                Patch::replace(
                    "config/testing/kustomization.yaml",
                    TESTING_IMAGE_PATCH,
                    TESTING_IMAGE_PATCHES,
                ),
            ],
        )
        .extend(bundle_steps(None));
    if config.build_images {
        pipeline = pipeline.extend(image_steps());
    }

    Ok(SamplePipeline { context, pipeline })
}
