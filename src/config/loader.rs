use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{Error, Result};

use super::core::FarmKpiConfig;
use super::validation::validate_config_result;

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".farmkpi.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<FarmKpiConfig> {
    let config = toml::from_str::<FarmKpiConfig>(contents)?;
    validate_config_result(&config)?;
    Ok(config)
}

/// Load a config file the user named explicitly. Any failure is fatal.
pub fn load_config_from_path(path: &Path) -> Result<FarmKpiConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::from_io(e, path))?;
    let config = parse_and_validate_config(&contents).map_err(|e| match e {
        Error::Toml(parse) => Error::Config {
            code: crate::core::ErrorCode::CONFIG_PARSE,
            message: format!("failed to parse {}: {}", path.display(), parse),
            field: None,
        },
        other => other,
    })?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try a discovered config file; problems are logged and the file skipped.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<FarmKpiConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Ignoring invalid config {}: {}",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Per-user config file, e.g. `~/.config/farmkpi/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("farmkpi").join("config.toml"))
}

/// Search `start` and its ancestors, then the user config directory.
pub fn discover_config(start: PathBuf) -> Option<FarmKpiConfig> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .chain(user_config_path())
        .find_map(|path| try_load_config_from_path(&path))
}

/// Resolve the effective configuration.
///
/// An explicit path must load; otherwise the first discovered file wins and
/// built-in defaults are used when none is found.
pub fn load_config(explicit: Option<&Path>) -> Result<FarmKpiConfig> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return Ok(FarmKpiConfig::default());
        }
    };

    Ok(discover_config(current).unwrap_or_else(|| {
        log::debug!(
            "No config found after checking {} directories. Using default config.",
            MAX_TRAVERSAL_DEPTH
        );
        FarmKpiConfig::default()
    }))
}
