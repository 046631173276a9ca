//! Memcached sample for the Helm plugin.

use std::path::Path;

use crate::config::Config;
use crate::constants::BROKEN_KUBECONFIG;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::fragments::helm::*;
use crate::patch::Patch;
use crate::pipeline::{
    bundle_steps, image_steps, lifecycle_steps, project_context, SamplePipeline,
};

/// Builds the Helm memcached pipeline.
///
/// The scaffolder derives RBAC rules from a live cluster when it can reach
/// one. Its `KUBECONFIG` is pointed at nothing so the default rules are
/// generated on every machine.
pub fn pipeline(samples_dir: &Path, config: &Config) -> Result<SamplePipeline> {
    let dir = samples_dir.join("helm").join("memcached-operator");
    let context = project_context(&dir, config)?.with_envs([BROKEN_KUBECONFIG]);
    let chart = config.helm_chart.display().to_string();

    let mut pipeline = lifecycle_steps()
        .command("creating the project", move |ctx| {
            let mut args = vec!["--plugins".to_string(), "helm".to_string()];
            args.extend(["--domain".to_string(), ctx.domain().to_string()]);
            args.extend(ctx.gvk().flags());
            args.extend(["--helm-chart".to_string(), chart.clone()]);
            ctx.init(args)
        })
        .step(
            "enabling restrictive pod standards",
            ProjectContext::uncomment_restrictive_pod_standards,
        )
        .patches(
            "customizing the sample",
            vec![
                Patch::replace(
                    context.sample_path(),
                    SAMPLE_SECURITY_CONTEXT,
                    SAMPLE_SECURITY_CONTEXT_DISABLED,
                ),
                Patch::uncomment("config/default/kustomization.yaml", "#- ../prometheus"),
                Patch::replace("config/rbac/role.yaml", DEFAULT_POD_RULE, POLICY_RULES),
            ],
        )
        .extend(bundle_steps(Some(config.created_at.clone())));
    if config.build_images {
        pipeline = pipeline.extend(image_steps());
    }

    Ok(SamplePipeline { context, pipeline })
}
