use crate::config::SelectionConfig;
use crate::core::{Character, Gender, SubsetId};
use crate::io::Dataset;
use std::collections::BTreeSet;

/// Restrictions on the candidate pool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolFilter {
    pub subsets: Vec<SubsetId>,
    pub image_only: bool,
    /// Allowed genders; empty allows all.
    pub genders: Vec<Gender>,
}

impl PoolFilter {
    fn allows_gender(&self, gender: Gender) -> bool {
        self.genders.is_empty() || self.genders.contains(&gender)
    }
}

impl From<&SelectionConfig> for PoolFilter {
    fn from(config: &SelectionConfig) -> Self {
        Self {
            subsets: config.subsets.clone(),
            image_only: config.image_only,
            genders: config.genders.clone(),
        }
    }
}

/// Characters of the selected subsets that pass the filter, in subset order
/// without duplicates.
pub fn available_characters<'a>(dataset: &'a Dataset, filter: &PoolFilter) -> Vec<&'a Character> {
    let mut seen = BTreeSet::new();
    let mut pool = Vec::new();

    for subset_id in &filter.subsets {
        let Some(subset) = dataset.subset(subset_id.as_str()) else {
            log::warn!("Unknown subset '{}'", subset_id);
            continue;
        };

        for id in &subset.characters {
            if !seen.insert(id.as_str()) {
                continue;
            }
            let Some(character) = dataset.catalog.get(id.as_str()) else {
                log::warn!("Subset '{}' lists unknown character '{}'", subset_id, id);
                continue;
            };
            if filter.image_only && !dataset.images.has_image(id.as_str()) {
                continue;
            }
            if !filter.allows_gender(character.gender) {
                continue;
            }
            pool.push(character);
        }
    }

    log::debug!(
        "{} characters available from {} subsets",
        pool.len(),
        filter.subsets.len()
    );
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn dataset() -> Dataset {
        Dataset::from_json(indoc! {r#"
            {
              "characters": {
                "a": {"name": "A", "gender": 1},
                "b": {"name": "B", "gender": 0},
                "c": {"name": "C", "gender": 1},
                "d": {"name": "D", "gender": 2}
              },
              "subsets": {
                "one": {"characters": ["c", "a", "ghost"]},
                "two": {"characters": ["a", "b", "d"]}
              },
              "mapping": {"a": ["https://img/a.png"], "b": [""], "d": ["https://img/d.png"]}
            }
        "#})
        .unwrap()
    }

    fn ids(pool: &[&Character]) -> Vec<String> {
        pool.iter().map(|c| c.id.to_string()).collect()
    }

    fn filter(subsets: &[&str]) -> PoolFilter {
        PoolFilter {
            subsets: subsets.iter().map(|s| SubsetId::new(*s)).collect(),
            ..PoolFilter::default()
        }
    }

    #[test]
    fn test_union_keeps_subset_order_without_duplicates() {
        let data = dataset();
        let pool = available_characters(&data, &filter(&["one", "two"]));
        assert_eq!(ids(&pool), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_no_subsets_means_empty_pool() {
        let data = dataset();
        assert!(available_characters(&data, &PoolFilter::default()).is_empty());
    }

    #[test]
    fn test_unknown_subset_is_skipped() {
        let data = dataset();
        let pool = available_characters(&data, &filter(&["missing", "two"]));
        assert_eq!(ids(&pool), vec!["a", "b", "d"]);
    }

    #[test]
    fn test_image_only() {
        let data = dataset();
        let mut f = filter(&["one", "two"]);
        f.image_only = true;
        assert_eq!(ids(&available_characters(&data, &f)), vec!["a", "d"]);
    }

    #[test]
    fn test_gender_filter() {
        let data = dataset();
        let mut f = filter(&["one", "two"]);
        f.genders = vec![Gender::Female];
        assert_eq!(ids(&available_characters(&data, &f)), vec!["c", "a"]);
    }
}
