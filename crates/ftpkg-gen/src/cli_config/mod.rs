//! CLI configuration: default locations for the schema, templates and
//! generated output.
//!
//! Command-line flags win over this file, and the file wins over the assets
//! bundled into `ftpkg-sdk`.

pub(crate) mod loader;

pub(crate) use loader::{expand_path, load_cli_config};

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CliConfig {
    /// Package JSON Schema to validate against instead of the bundled one.
    pub schema_path: Option<String>,

    /// Directory holding `refinement.tera` and `glue_machine.tera`.
    pub template_dir: Option<String>,

    /// Output directory for `emit-b` when `--out` is not given.
    pub default_output_dir: Option<String>,
}
