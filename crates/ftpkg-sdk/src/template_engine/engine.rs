//! Template engine wrapping Tera with the artifact filters registered.

use std::fmt;

use tera::{Context, Tera};

use super::filters;
use super::loader::{load_bundled_templates, load_templates_from_dir, LoaderError};
use crate::config::TemplateSource;
use crate::context::PackageContext;

/// The two artifacts rendered per package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactTemplate {
    Refinement,
    GlueMachine,
}

impl ArtifactTemplate {
    pub const ALL: [ArtifactTemplate; 2] =
        [ArtifactTemplate::Refinement, ArtifactTemplate::GlueMachine];

    /// Template identifier.
    pub fn id(self) -> &'static str {
        match self {
            ArtifactTemplate::Refinement => "refinement",
            ArtifactTemplate::GlueMachine => "glue_machine",
        }
    }

    /// File name the template is registered under.
    pub fn file_name(self) -> String {
        format!("{}.tera", self.id())
    }
}

impl fmt::Display for ArtifactTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug)]
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Load templates and register the B filters.
    ///
    /// Fails if either artifact template is missing from the source.
    pub fn load(source: &TemplateSource) -> Result<Self, EngineError> {
        let mut tera = match source {
            TemplateSource::Bundled => load_bundled_templates()?,
            TemplateSource::Dir(dir) => load_templates_from_dir(dir)?,
        };

        tera.register_filter("b_set", filters::b_set);
        tera.register_filter("b_seq", filters::b_seq);
        tera.register_filter("b_ident", filters::b_ident);

        for template in ArtifactTemplate::ALL {
            let name = template.file_name();
            if !tera.get_template_names().any(|n| n == name) {
                return Err(EngineError::MissingTemplate(name));
            }
        }

        tracing::debug!(?source, "Loaded artifact templates");
        Ok(Self { tera })
    }

    /// Render one artifact from a package context.
    pub fn render(
        &self,
        template: ArtifactTemplate,
        ctx: &PackageContext,
    ) -> Result<String, EngineError> {
        let context = Context::from_serialize(ctx).map_err(EngineError::Context)?;
        self.tera
            .render(&template.file_name(), &context)
            .map_err(|e| EngineError::Render {
                template: template.id().to_string(),
                source: e,
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("template load error: {0}")]
    Load(#[from] LoaderError),
    #[error("required template '{0}' not found")]
    MissingTemplate(String),
    #[error("failed to build template context: {0}")]
    Context(#[source] tera::Error),
    #[error("render error for '{template}': {source}")]
    Render {
        template: String,
        source: tera::Error,
    },
}
