use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::scoring::AttributionConfig;
use crate::core::{Gender, SubsetId};
use crate::io::output::OutputFormat;

/// Root configuration structure for moerank
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MoerankConfig {
    /// Preference model parameters
    #[serde(default)]
    pub attribution: AttributionConfig,

    /// Which characters are offered for rating
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Where the rating session is stored
    #[serde(default)]
    pub session: SessionConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SelectionConfig {
    /// Subsets to draw characters from
    #[serde(default)]
    pub subsets: Vec<SubsetId>,

    /// Only offer characters that have an image
    #[serde(default)]
    pub image_only: bool,

    /// Allowed genders; empty allows all
    #[serde(default)]
    pub genders: Vec<Gender>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SessionConfig {
    /// Session snapshot file; defaults to the user data directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl SessionConfig {
    const FALLBACK_FILE: &'static str = ".moerank-session.json";

    /// Configured path, else `<data dir>/moerank/session.json`, else a file in
    /// the working directory.
    pub fn resolve_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("moerank").join("session.json"))
                .unwrap_or_else(|| PathBuf::from(Self::FALLBACK_FILE))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_full_document() {
        let config: MoerankConfig = toml::from_str(indoc! {r#"
            [attribution]
            min_support = 4

            [selection]
            subsets = ["classic", "recent"]
            image_only = true
            genders = [1]

            [session]
            path = "/tmp/session.json"

            [output]
            default_format = "json"
        "#})
        .unwrap();

        assert_eq!(config.attribution.min_support, 4);
        assert_eq!(config.selection.subsets.len(), 2);
        assert!(config.selection.image_only);
        assert_eq!(config.selection.genders, vec![Gender::Female]);
        assert_eq!(
            config.session.resolve_path(),
            PathBuf::from("/tmp/session.json")
        );
        assert_eq!(config.output.default_format, OutputFormat::Json);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: MoerankConfig = toml::from_str("").unwrap();
        assert_eq!(config, MoerankConfig::default());
    }
}
