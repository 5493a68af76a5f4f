//! `emit-b`: write the refinement and glue machine for a package.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use ftpkg_sdk::{Generator, GeneratorConfig};

use crate::cli_config::{expand_path, CliConfig};
use crate::output;

pub(crate) fn handle_emit_command(
    config: &GeneratorConfig,
    cli_config: &CliConfig,
    yaml: &Path,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let out_dir = resolve_output_dir(out, cli_config)?;
    let generator = Generator::new(config)?;

    let report = generator.emit(yaml, &out_dir)?;
    for path in report.paths() {
        output::plain(path.display());
    }
    Ok(())
}

fn resolve_output_dir(out: Option<PathBuf>, cli_config: &CliConfig) -> anyhow::Result<PathBuf> {
    out.or_else(|| cli_config.default_output_dir.as_deref().map(expand_path))
        .context("no output directory: pass --out or set default-output-dir in .ftpkg-gen.toml")
}
