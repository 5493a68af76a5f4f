//! `context`: print the derived symbol model as pretty JSON.

use std::path::Path;

use ftpkg_sdk::{Checker, GeneratorConfig};

use crate::output;

pub(crate) fn handle_context_command(config: &GeneratorConfig, yaml: &Path) -> anyhow::Result<()> {
    let ctx = Checker::new(config)?.context(yaml)?;
    output::plain(serde_json::to_string_pretty(&ctx)?);
    Ok(())
}
