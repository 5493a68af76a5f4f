//! Load `.tera` artifact templates from the bundled assets or a directory.

use std::path::{Path, PathBuf};

use tera::Tera;

const BUNDLED_TEMPLATES: &[(&str, &str)] = &[
    (
        "refinement.tera",
        include_str!("../../assets/templates/refinement.tera"),
    ),
    (
        "glue_machine.tera",
        include_str!("../../assets/templates/glue_machine.tera"),
    ),
];

/// Load all `.tera` files from a template directory into a Tera instance.
///
/// The templates are registered by their filename (e.g., `refinement.tera`).
pub(crate) fn load_templates_from_dir(template_dir: &Path) -> Result<Tera, LoaderError> {
    if !template_dir.is_dir() {
        return Err(LoaderError::NotADirectory(template_dir.to_path_buf()));
    }
    let glob_pattern = template_dir.join("*.tera").to_string_lossy().to_string();

    Tera::new(&glob_pattern).map_err(|e| LoaderError::Tera {
        dir: template_dir.to_path_buf(),
        source: e,
    })
}

/// Load the templates compiled into this crate.
pub(crate) fn load_bundled_templates() -> Result<Tera, LoaderError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(BUNDLED_TEMPLATES.iter().copied())
        .map_err(LoaderError::Bundled)?;
    Ok(tera)
}

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("template directory {} does not exist", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to load templates from {}: {source}", dir.display())]
    Tera { dir: PathBuf, source: tera::Error },
    #[error("bundled templates failed to parse: {0}")]
    Bundled(#[source] tera::Error),
}
