//! OLM bundle generation and normalization.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use regex::Regex;

use crate::constants::{MANIFEST_ANNOTATIONS, METADATA_ANNOTATIONS};
use crate::context::ProjectContext;
use crate::error::{Error, Result};
use crate::patch;

/// `bundle/manifests/<project>.clusterserviceversion.yaml`
pub fn bundle_csv_path(ctx: &ProjectContext) -> PathBuf {
    Path::new("bundle")
        .join("manifests")
        .join(format!("{}.clusterserviceversion.yaml", ctx.project_name()))
}

/// `config/manifests/bases/<project>.clusterserviceversion.yaml`
pub fn base_csv_path(ctx: &ProjectContext) -> PathBuf {
    Path::new("config")
        .join("manifests")
        .join("bases")
        .join(format!("{}.clusterserviceversion.yaml", ctx.project_name()))
}

/// Makes manifest generation non-interactive, then runs
/// `make bundle IMG=<image>`.
pub fn generate_bundle(ctx: &ProjectContext) -> Result<()> {
    ctx.disable_manifests_interactive_mode()?;
    ctx.make(["bundle".to_string(), format!("IMG={}", ctx.image_name())])?;
    Ok(())
}

/// Removes the scaffolder's version annotations from bundle metadata and
/// from both ClusterServiceVersions, so samples do not change with every
/// release of the scaffolder.
pub fn strip_bundle_annotations(ctx: &ProjectContext) -> Result<()> {
    let metadata_files = [
        ctx.path("bundle/metadata/annotations.yaml"),
        ctx.path("bundle.Dockerfile"),
    ];
    remove_all_annotation_lines(&METADATA_ANNOTATIONS, &metadata_files)?;

    let manifest_files = [ctx.path(bundle_csv_path(ctx)), ctx.path(base_csv_path(ctx))];
    remove_all_annotation_lines(&MANIFEST_ANNOTATIONS, &manifest_files)
}

/// Deletes every line mentioning one of `annotations` from each of `files`.
///
/// A line matches when the key is preceded and followed by at least one
/// character on that line. Files without any match are rewritten unchanged.
///
/// # Errors
/// * `Error::IoError` if a file is missing or cannot be rewritten
pub fn remove_all_annotation_lines<P: AsRef<Path>>(
    annotations: &[&str],
    files: &[P],
) -> Result<()> {
    let matchers = annotations
        .iter()
        .map(|key| Regex::new(&format!(".+{}.+\n", regex::escape(key))))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    for file in files {
        let file = file.as_ref();
        let original = fs::read_to_string(file).map_err(Error::IoError)?;
        let stripped = matchers.iter().fold(original.clone(), |content, re| {
            re.replace_all(&content, "").into_owned()
        });
        debug!(
            "Stripped {} byte(s) of annotations from {}",
            original.len() - stripped.len(),
            file.display()
        );

        patch::write_back(file, &stripped)?;
    }
    Ok(())
}

/// Pins the `createdAt` annotation of the bundle CSV to `timestamp`.
pub fn pin_created_at(ctx: &ProjectContext, timestamp: &str) -> Result<()> {
    patch::replace_regex_in_file(
        ctx.path(bundle_csv_path(ctx)),
        "createdAt:.*",
        &format!("createdAt: \"{timestamp}\""),
    )
}
