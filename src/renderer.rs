//! Rendering of patch payloads that depend on the project being patched.
//!
//! Payloads are Ansible, Helm and Go sources that already use `{{ }}` and
//! `{% %}` themselves, so placeholders are written as `[[ name ]]`, blocks
//! as `[% ... %]` and comments as `[# ... #]`.

use minijinja::syntax::SyntaxConfig;
use minijinja::Environment;
use serde_json::json;

use crate::context::ProjectContext;
use crate::error::{Error, Result};

/// Trait for payload rendering engines.
pub trait FragmentRenderer {
    /// Renders `fragment` with the given context.
    ///
    /// # Errors
    /// * `Error::TemplateError` if the fragment is malformed or uses an
    ///   undefined variable
    fn render(&self, fragment: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based renderer using bracket delimiters.
#[derive(Debug, Clone)]
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// # Errors
    /// * `Error::TemplateError` if the delimiter configuration is rejected
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_syntax(
            SyntaxConfig::builder()
                .block_delimiters("[%", "%]")
                .variable_delimiters("[[", "]]")
                .comment_delimiters("[#", "#]")
                .build()?,
        );
        env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Ok(Self { env })
    }
}

impl FragmentRenderer for MiniJinjaRenderer {
    fn render(&self, fragment: &str, context: &serde_json::Value) -> Result<String> {
        self.env.render_str(fragment, context).map_err(Error::TemplateError)
    }
}

/// Variables available to payloads: `project_name`, `domain`, `group`,
/// `version`, `kind`, `kind_lower`, `image`.
pub fn fragment_context(ctx: &ProjectContext) -> serde_json::Value {
    let gvk = ctx.gvk();
    json!({
        "project_name": ctx.project_name(),
        "domain": ctx.domain(),
        "group": gvk.group,
        "version": gvk.version,
        "kind": gvk.kind,
        "kind_lower": gvk.kind_lower(),
        "image": ctx.image_name(),
    })
}
