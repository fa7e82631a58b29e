use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::MoerankConfig;
use super::scoring::AttributionConfig;
use crate::core::{Error, Result};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".moerank.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse config from a TOML string, replacing an invalid attribution table
/// with defaults
pub fn parse_and_validate_config(contents: &str) -> Result<MoerankConfig> {
    let mut config = toml::from_str::<MoerankConfig>(contents)?;

    if let Err(e) = config.attribution.validate() {
        log::warn!("Invalid attribution settings: {}. Using defaults.", e);
        config.attribution = AttributionConfig::default();
    }

    Ok(config)
}

/// Try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<MoerankConfig> {
    let contents = match read_config_file(config_path) {
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
                "Failed to parse {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Generate directory ancestors up to a depth limit
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

/// Load an explicitly requested config file. Unlike discovery, a missing,
/// malformed or invalid file is an error.
pub fn load_config_from(path: &Path) -> Result<MoerankConfig> {
    let contents = read_config_file(path).map_err(|e| Error::io_at(path, e))?;
    let config = toml::from_str::<MoerankConfig>(&contents)
        .map_err(|e| Error::parse(path, e.to_string()))?;
    config
        .attribution
        .validate()
        .map_err(|e| Error::Configuration(format!("{}: {e}", path.display())))?;
    Ok(config)
}

/// Discover `.moerank.toml` from the working directory upwards.
pub fn load_config() -> MoerankConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return MoerankConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            MoerankConfig::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_invalid_attribution_falls_back_to_defaults() {
        let config = parse_and_validate_config("[attribution]\nmin_support = 0\n").unwrap();
        assert_eq!(config.attribution, AttributionConfig::default());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(parse_and_validate_config("[attribution\n").is_err());
    }

    #[test]
    fn test_directory_ancestors_stops_at_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[attribution]\nnoise_floor = 0.5\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.attribution.noise_floor, 0.5);
    }

    #[test]
    fn test_load_config_from_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[attribution]\nconfidence_cap = 0.0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_load_config_from_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        assert!(load_config_from(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_try_load_ignores_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(try_load_config_from_path(&dir.path().join("nope.toml")).is_none());
    }
}
