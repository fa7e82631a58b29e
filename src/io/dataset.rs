//! Character, subset and image data consumed by the rating flow.
//!
//! The JSON document mirrors what the data service hands out:
//!
//! ```json
//! {
//!   "characters": { "<id>": { "name": "...", "traits": { "<trait>": ... }, "gender": 1 } },
//!   "subsets":    { "<id>": { "characters": ["<id>", ...], "name": "...", "displayName": "..." } },
//!   "mapping":    { "<id>": ["<image url>", ...] }
//! }
//! ```

use crate::core::{
    deserialize_traits, Catalog, Character, CharacterId, Error, Gender, Result, SubsetId, TraitSet,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subset {
    #[serde(default)]
    pub characters: Vec<CharacterId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Subset {
    pub fn label(&self) -> &str {
        if !self.display_name.is_empty() {
            &self.display_name
        } else {
            &self.name
        }
    }
}

/// Character id -> image URLs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageMapping(BTreeMap<CharacterId, Vec<String>>);

impl ImageMapping {
    pub fn primary_image(&self, id: &str) -> Option<&str> {
        self.0
            .get(id)
            .and_then(|urls| urls.first())
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }

    pub fn has_image(&self, id: &str) -> bool {
        self.primary_image(id).is_some()
    }

    pub fn insert(&mut self, id: CharacterId, urls: Vec<String>) {
        self.0.insert(id, urls);
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CharacterRecord {
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "deserialize_traits")]
    traits: TraitSet,
    #[serde(default)]
    gender: Gender,
}

#[derive(Debug, Deserialize)]
struct DatasetDocument {
    #[serde(default)]
    characters: BTreeMap<CharacterId, CharacterRecord>,
    #[serde(default)]
    subsets: BTreeMap<SubsetId, Subset>,
    #[serde(default)]
    mapping: ImageMapping,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub catalog: Catalog,
    pub subsets: BTreeMap<SubsetId, Subset>,
    pub images: ImageMapping,
}

impl Dataset {
    /// The top level must be a JSON object; any other value is a parse error.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(Error::Json(serde::de::Error::custom(
                "dataset must be a JSON object with a \"characters\" map",
            )));
        }
        let document: DatasetDocument = serde_json::from_value(value)?;
        Ok(document.into())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io_at(path, e))?;
        let dataset = Self::from_json(&contents).map_err(|e| match e {
            Error::Json(inner) => Error::parse(path, inner.to_string()),
            other => other,
        })?;
        log::debug!(
            "Loaded {} characters and {} subsets from {}",
            dataset.catalog.len(),
            dataset.subsets.len(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn subset(&self, id: &str) -> Option<&Subset> {
        self.subsets.get(id)
    }
}

impl From<DatasetDocument> for Dataset {
    fn from(document: DatasetDocument) -> Self {
        let catalog = document
            .characters
            .into_iter()
            .map(|(id, record)| Character {
                id,
                name: record.name,
                traits: record.traits,
                gender: record.gender,
            })
            .collect();
        Dataset {
            catalog,
            subsets: document.subsets,
            images: document.mapping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const DOC: &str = indoc! {r#"
        {
          "characters": {
            "c1": {"name": "Rem", "traits": {"maid": {"link": "x"}, "blue hair": 1}, "gender": 1},
            "c2": {"name": "Subaru", "traits": ["tracksuit"], "gender": 0},
            "c3": {}
          },
          "subsets": {
            "rezero": {"characters": ["c1", "c2"], "name": "rezero", "displayName": "Re:Zero"}
          },
          "mapping": {"c1": ["https://img/rem.png"], "c2": [""]}
        }
    "#};

    #[test]
    fn test_parses_full_document() {
        let dataset = Dataset::from_json(DOC).unwrap();
        assert_eq!(dataset.catalog.len(), 3);

        let rem = dataset.catalog.get("c1").unwrap();
        assert_eq!(rem.name, "Rem");
        assert_eq!(rem.gender, Gender::Female);
        assert!(rem.has_trait(&"maid".into()));

        assert_eq!(dataset.subset("rezero").unwrap().label(), "Re:Zero");
    }

    #[test]
    fn test_primary_image_ignores_empty_url() {
        let dataset = Dataset::from_json(DOC).unwrap();
        assert_eq!(dataset.images.primary_image("c1"), Some("https://img/rem.png"));
        assert!(!dataset.images.has_image("c2"));
        assert!(!dataset.images.has_image("c3"));
    }

    #[test]
    fn test_optional_sections() {
        let dataset = Dataset::from_json(r#"{"characters": {}}"#).unwrap();
        assert!(dataset.catalog.is_empty());
        assert!(dataset.subsets.is_empty());
    }

    #[test]
    fn test_load_reports_path_on_bad_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        for contents in ["[]", "{not json", "42"] {
            std::fs::write(&path, contents).unwrap();
            let err = Dataset::load(&path).unwrap_err();
            assert!(matches!(err, Error::Parse { .. }), "{contents}: {err:?}");
            assert!(err.to_string().contains("data.json"));
        }
    }

    #[test]
    fn test_unknown_or_missing_gender_is_unknown() {
        let dataset = Dataset::from_json(
            r#"{"characters": {"a": {"gender": null}, "b": {"gender": 3}, "c": {"gender": 0}}}"#,
        )
        .unwrap();
        assert_eq!(dataset.catalog.get("a").unwrap().gender, Gender::Unknown);
        assert_eq!(dataset.catalog.get("b").unwrap().gender, Gender::Unknown);
        assert_eq!(dataset.catalog.get("c").unwrap().gender, Gender::Male);
    }
}
