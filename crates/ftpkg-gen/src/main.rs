//! FeverTokens package → B-method generator CLI.
//!
//! Reads a package description YAML, runs structural and semantic checks and
//! emits the B refinement and glue machine for it.

mod cli_config;
mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ftpkg_sdk::GeneratorConfig;

use crate::cli_config::{expand_path, CliConfig};

#[derive(Debug, Parser)]
#[command(name = "ftpkg-gen")]
#[command(about = "Generate B refinements and glue machines from FeverTokens package YAML")]
#[command(version, styles = output::clap_styles())]
pub(crate) struct Cli {
    /// JSON Schema used for structural validation [default: bundled schema]
    #[arg(long, global = true, env = "FTPKG_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Directory with `refinement.tera` and `glue_machine.tera` [default: bundled templates]
    #[arg(long, global = true, env = "FTPKG_TEMPLATES")]
    pub templates: Option<PathBuf>,

    /// Log pipeline progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Emit B artifacts from YAML
    #[command(name = "emit-b")]
    EmitB {
        /// Package description YAML
        #[arg(long)]
        yaml: PathBuf,

        /// Output directory [default: `default-output-dir` from .ftpkg-gen.toml]
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Validate YAML and run static checks
    Validate {
        /// Package description YAML
        #[arg(long)]
        yaml: PathBuf,
    },

    /// Print the derived symbol model as JSON
    Context {
        /// Package description YAML
        #[arg(long)]
        yaml: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cli_config = cli_config::load_cli_config();

    match run(cli, &cli_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, cli_config: &CliConfig) -> anyhow::Result<()> {
    let config = generator_config(&cli, cli_config);
    tracing::debug!(?config, "Resolved generator config");

    match cli.command {
        Commands::EmitB { yaml, out } => {
            commands::handle_emit_command(&config, cli_config, &yaml, out)
        }
        Commands::Validate { yaml } => commands::handle_validate_command(&config, &yaml),
        Commands::Context { yaml } => commands::handle_context_command(&config, &yaml),
    }
}

/// Flags win over `.ftpkg-gen.toml`, which wins over the bundled assets.
fn generator_config(cli: &Cli, cli_config: &CliConfig) -> GeneratorConfig {
    let schema = cli
        .schema
        .clone()
        .or_else(|| cli_config.schema_path.as_deref().map(expand_path));
    let templates = cli
        .templates
        .clone()
        .or_else(|| cli_config.template_dir.as_deref().map(expand_path));
    GeneratorConfig::from_overrides(schema, templates)
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "ftpkg_sdk=info,ftpkg_gen=info"
    } else {
        "ftpkg_sdk=warn,ftpkg_gen=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
