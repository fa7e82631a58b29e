pub mod errors;
pub mod rating;

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub use errors::{Error, Result, ResultExt};
pub use rating::{Rating, RatingHistoryItem, RatingLevel, RatingValue, Score};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a rateable character
    CharacterId
);
string_id!(
    /// Name of a trait tag such as "tsundere"
    TraitId
);
string_id!(
    /// Identifier of a named group of characters
    SubsetId
);

/// Trait membership of one character. Only presence matters for scoring.
pub type TraitSet = BTreeSet<TraitId>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "u8")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

/// Wire codes 0 and 1; `null` and any other code read as unknown.
impl From<Option<i64>> for Gender {
    fn from(code: Option<i64>) -> Self {
        match code {
            Some(0) => Gender::Male,
            Some(1) => Gender::Female,
            _ => Gender::Unknown,
        }
    }
}

impl From<Gender> for u8 {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => 0,
            Gender::Female => 1,
            Gender::Unknown => 2,
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    /// Accepts the wire code or the lowercase name.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "male" => Ok(Gender::Male),
            "1" | "female" => Ok(Gender::Female),
            "2" | "unknown" => Ok(Gender::Unknown),
            other => Err(format!("unknown gender '{other}'")),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_traits")]
    pub traits: TraitSet,
    #[serde(default)]
    pub gender: Gender,
}

impl Character {
    pub fn new(id: impl Into<CharacterId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            traits: TraitSet::new(),
            gender: Gender::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_traits<I, T>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TraitId>,
    {
        self.traits = traits.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn has_trait(&self, trait_id: &TraitId) -> bool {
        self.traits.contains(trait_id)
    }

    /// Display name, falling back to the id for unnamed records
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

/// Accepts either `{"trait": <anything>}` or `["trait", ...]`.
pub(crate) fn deserialize_traits<'de, D>(
    deserializer: D,
) -> std::result::Result<TraitSet, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TraitsRepr {
        Map(BTreeMap<String, serde_json::Value>),
        List(Vec<String>),
    }

    Ok(match TraitsRepr::deserialize(deserializer)? {
        TraitsRepr::Map(map) => map.into_keys().map(TraitId::from).collect(),
        TraitsRepr::List(list) => list.into_iter().map(TraitId::from).collect(),
    })
}

/// Read-only character lookup handed to the scoring pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    characters: BTreeMap<CharacterId, Character>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, character: Character) -> Option<Character> {
        self.characters.insert(character.id.clone(), character)
    }

    pub fn get(&self, id: &str) -> Option<&Character> {
        self.characters.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.characters.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }
}

impl FromIterator<Character> for Catalog {
    fn from_iter<I: IntoIterator<Item = Character>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for character in iter {
            catalog.insert(character);
        }
        catalog
    }
}
