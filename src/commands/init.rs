use crate::config::CONFIG_FILE_NAME;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# moerank configuration

[attribution]
# Traits carried by fewer rated characters are ignored
min_support = 3
# Scores with a smaller magnitude are dropped from the ranking
noise_floor = 0.01
# count_factor = clamp(ln(n*m/(n+m)/2 + 1) - confidence_offset, 0, confidence_cap)
confidence_offset = 0.7
confidence_cap = 1.8
score_scale = 10.0

[selection]
subsets = []
image_only = false
# 0 = male, 1 = female, 2 = unknown; empty allows all
genders = []

[session]
# path = "/path/to/session.json"

[output]
default_format = "terminal"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    write_default_config(&config_path, force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}

pub(crate) fn write_default_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_and_validate_config, MoerankConfig};
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, MoerankConfig::default());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "# mine").unwrap();

        assert!(write_default_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        write_default_config(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("[attribution]"));
    }
}
