//! Style file discovery and loading

use std::path::{Path, PathBuf};

use super::style::StyleConfig;
use crate::error::WeaveError;
use crate::result::Result;

/// Style file names, in lookup priority order
pub const CONFIG_FILE_NAMES: [&str; 5] = [
    ".weaverc.json",
    ".weaverc.toml",
    "weave.yaml",
    "weave.yml",
    "weave.json",
];

/// Loader for discovering and loading style files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a style file by traversing upward from `start_path`.
    ///
    /// Each directory is checked for [`CONFIG_FILE_NAMES`] in order, moving up
    /// until a file is found or the filesystem root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| WeaveError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found style config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load a style file
    pub fn load_from_file(path: &Path) -> Result<StyleConfig> {
        StyleConfig::load(path).map_err(|e| match e {
            WeaveError::ConfigError { message } => WeaveError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                message
            )),
            other => other,
        })
    }

    /// Load from `custom_path`, or auto-discover from `start_dir` (default:
    /// the current directory). No file found means the default style.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<StyleConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(WeaveError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No style config found, using defaults");
                Ok(StyleConfig::default())
            }
        }
    }
}
