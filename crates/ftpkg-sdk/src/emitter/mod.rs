//! Load → validate → build → render → write pipeline.
//!
//! A [`Checker`] compiles the schema once and runs the validation stages. A
//! [`Generator`] adds the loaded templates on top of it. Each operation is a
//! chain of fallible steps that stops at the first error.
//! Both artifacts are rendered before the output directory is touched, so a
//! failure never leaves a partial result on disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::GeneratorConfig;
use crate::context::{build_context, PackageContext};
use crate::model::Package;
use crate::package_parser::{self, ParseError};
use crate::schema::{JsonSchemaValidator, SchemaError, StructuralValidator};
use crate::template_engine::{ArtifactTemplate, EngineError, TemplateEngine};
use crate::validation::{validate_package, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Template(#[from] EngineError),
    #[error("failed to write '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Paths of the two artifacts written by [`Generator::emit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitReport {
    pub refinement_path: PathBuf,
    pub glue_path: PathBuf,
}

impl EmitReport {
    pub fn paths(&self) -> [&Path; 2] {
        [&self.refinement_path, &self.glue_path]
    }
}

/// `FT_PACKAGE_INST_<name>.ref`
pub fn refinement_file_name(package_name: &str) -> String {
    format!("FT_PACKAGE_INST_{package_name}.ref")
}

/// `FT_PACKAGE_GLUE_<name>.mch`
pub fn glue_file_name(package_name: &str) -> String {
    format!("FT_PACKAGE_GLUE_{package_name}.mch")
}

/// Structural and semantic validation. Needs the schema, never the templates.
#[derive(Debug)]
pub struct Checker<V = JsonSchemaValidator> {
    validator: V,
}

impl Checker<JsonSchemaValidator> {
    /// Load the schema named by `config`.
    pub fn new(config: &GeneratorConfig) -> Result<Self, EmitError> {
        let validator = JsonSchemaValidator::load(&config.schema)?;
        Ok(Self { validator })
    }
}

impl<V: StructuralValidator> Checker<V> {
    /// Use a custom structural validator.
    pub fn with_validator(validator: V) -> Self {
        Self { validator }
    }

    /// Parse and fully validate a package file.
    pub fn check(&self, yaml_path: &Path) -> Result<Package, EmitError> {
        tracing::debug!(path = %yaml_path.display(), "Loading package document");
        let document = package_parser::parse_document(yaml_path)?;
        self.check_document(document)
    }

    /// Structural then semantic validation of an already parsed document.
    pub fn check_document(&self, document: serde_yaml::Value) -> Result<Package, EmitError> {
        self.validator.validate(&document)?;
        let pkg = package_parser::into_package(document)?;
        validate_package(&pkg)?;
        Ok(pkg)
    }

    /// Validate a package file and derive its context model.
    pub fn context(&self, yaml_path: &Path) -> Result<PackageContext, EmitError> {
        let pkg = self.check(yaml_path)?;
        Ok(build_context(&pkg))
    }
}

/// A [`Checker`] plus the loaded artifact templates.
#[derive(Debug)]
pub struct Generator<V = JsonSchemaValidator> {
    checker: Checker<V>,
    engine: TemplateEngine,
}

impl Generator<JsonSchemaValidator> {
    /// Load the schema and templates named by `config`.
    pub fn new(config: &GeneratorConfig) -> Result<Self, EmitError> {
        let checker = Checker::new(config)?;
        let engine = TemplateEngine::load(&config.templates)?;
        Ok(Self { checker, engine })
    }
}

impl<V: StructuralValidator> Generator<V> {
    /// Use a custom structural validator.
    pub fn with_validator(validator: V, engine: TemplateEngine) -> Self {
        Self {
            checker: Checker::with_validator(validator),
            engine,
        }
    }

    pub fn checker(&self) -> &Checker<V> {
        &self.checker
    }

    /// See [`Checker::check`].
    pub fn check(&self, yaml_path: &Path) -> Result<Package, EmitError> {
        self.checker.check(yaml_path)
    }

    /// See [`Checker::context`].
    pub fn context(&self, yaml_path: &Path) -> Result<PackageContext, EmitError> {
        self.checker.context(yaml_path)
    }

    /// Render both artifacts for a validated package, in memory.
    pub fn render(&self, pkg: &Package) -> Result<RenderedArtifacts, EmitError> {
        let ctx = build_context(pkg);
        let refinement = self.engine.render(ArtifactTemplate::Refinement, &ctx)?;
        let glue = self.engine.render(ArtifactTemplate::GlueMachine, &ctx)?;
        Ok(RenderedArtifacts {
            package_name: pkg.name.clone(),
            refinement,
            glue,
        })
    }

    /// Run the full pipeline and write both artifacts into `out_dir`.
    pub fn emit(&self, yaml_path: &Path, out_dir: &Path) -> Result<EmitReport, EmitError> {
        let pkg = self.checker.check(yaml_path)?;
        let rendered = self.render(&pkg)?;
        rendered.write_to(out_dir)
    }
}

/// Both artifacts rendered, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    pub package_name: String,
    pub refinement: String,
    pub glue: String,
}

impl RenderedArtifacts {
    /// Create `out_dir` if needed and write both files.
    ///
    /// Both contents are staged in temporary files inside `out_dir` first. If
    /// the glue machine cannot be moved into place, the refinement written
    /// just before it is removed again.
    pub fn write_to(&self, out_dir: &Path) -> Result<EmitReport, EmitError> {
        std::fs::create_dir_all(out_dir).map_err(|e| output_error(out_dir, e))?;

        let refinement_path = out_dir.join(refinement_file_name(&self.package_name));
        let glue_path = out_dir.join(glue_file_name(&self.package_name));

        let staged_refinement = stage(out_dir, &self.refinement)
            .map_err(|e| output_error(&refinement_path, e))?;
        let staged_glue = stage(out_dir, &self.glue).map_err(|e| output_error(&glue_path, e))?;

        staged_refinement
            .persist(&refinement_path)
            .map_err(|e| output_error(&refinement_path, e.error))?;
        if let Err(e) = staged_glue.persist(&glue_path) {
            if let Err(cleanup) = std::fs::remove_file(&refinement_path) {
                tracing::warn!(
                    path = %refinement_path.display(),
                    error = %cleanup,
                    "Failed to remove refinement after glue write failure"
                );
            }
            return Err(output_error(&glue_path, e.error));
        }

        for (path, content) in [(&refinement_path, &self.refinement), (&glue_path, &self.glue)] {
            tracing::info!(path = %path.display(), bytes = content.len(), "Wrote artifact");
        }

        Ok(EmitReport {
            refinement_path,
            glue_path,
        })
    }
}

fn stage(out_dir: &Path, content: &str) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(out_dir)?;
    // Temp files start out owner-only; artifacts get regular file permissions.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn output_error(path: &Path, source: std::io::Error) -> EmitError {
    EmitError::Output {
        path: path.to_path_buf(),
        source,
    }
}
