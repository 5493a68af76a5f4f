//! `.ftpkg-gen.toml` discovery.
//!
//! The working directory is searched before `~/.config/ftpkg-gen.toml`, and
//! only the first file found is read.

use std::path::{Path, PathBuf};

use super::CliConfig;

const LOCAL_FILE: &str = ".ftpkg-gen.toml";
const USER_FILE: &str = ".config/ftpkg-gen.toml";

pub(crate) fn load_cli_config() -> CliConfig {
    config_candidates()
        .into_iter()
        .find(|path| path.is_file())
        .map(|path| read_config(&path))
        .unwrap_or_default()
}

fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(LOCAL_FILE)];
    candidates.extend(home_dir().map(|home| home.join(USER_FILE)));
    candidates
}

/// An unreadable or malformed file logs a warning and yields the defaults.
fn read_config(path: &Path) -> CliConfig {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|raw| toml::from_str::<CliConfig>(&raw).map_err(|e| e.to_string()));

    match parsed {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "Using CLI config");
            config
        }
        Err(reason) => {
            tracing::warn!(path = %path.display(), %reason, "Ignoring CLI config");
            CliConfig::default()
        }
    }
}

/// `~/x` becomes `$HOME/x`; anything else is taken as is.
pub(crate) fn expand_path(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
