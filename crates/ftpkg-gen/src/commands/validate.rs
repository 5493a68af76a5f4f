//! `validate`: structural and semantic checks only. Templates are not loaded
//! and nothing is written.

use std::path::Path;

use ftpkg_sdk::{Checker, GeneratorConfig};

use crate::output;

pub(crate) fn handle_validate_command(config: &GeneratorConfig, yaml: &Path) -> anyhow::Result<()> {
    let checker = Checker::new(config)?;
    let package = checker.check(yaml)?;
    tracing::info!(package = %package.name, "Package is consistent");

    output::success("YAML is valid and consistent.");
    Ok(())
}
