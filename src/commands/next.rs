use super::AppContext;
use crate::core::{Gender, SubsetId};
use crate::io::Dataset;
use crate::selection::{available_characters, pick_next, unrated_characters, PoolFilter};
use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct NextConfig {
    pub dataset: PathBuf,
    pub subsets: Vec<SubsetId>,
    pub image_only: bool,
    pub genders: Vec<Gender>,
}

impl NextConfig {
    /// Command-line filters replace the configured ones field by field.
    fn pool_filter(&self, app: &AppContext) -> PoolFilter {
        let mut filter = PoolFilter::from(&app.config.selection);
        if !self.subsets.is_empty() {
            filter.subsets = self.subsets.clone();
        }
        if self.image_only {
            filter.image_only = true;
        }
        if !self.genders.is_empty() {
            filter.genders = self.genders.clone();
        }
        filter
    }
}

pub fn suggest_next(app: &AppContext, config: NextConfig) -> Result<()> {
    let dataset = Dataset::load(&config.dataset)
        .with_context(|| format!("Failed to load dataset {}", config.dataset.display()))?;
    let session = app.open_session()?;

    let filter = config.pool_filter(app);
    if filter.subsets.is_empty() {
        anyhow::bail!("No subsets selected. Pass --subset or set [selection] subsets.");
    }

    let pool = available_characters(&dataset, &filter);
    let remaining = unrated_characters(&pool, session.store()).len();

    match pick_next(&pool, session.store(), &mut rand::thread_rng()) {
        Some(character) => {
            println!(
                "{} {}",
                character.display_name().bold(),
                format!("({})", character.id).dimmed()
            );
            if !character.traits.is_empty() {
                let traits: Vec<&str> = character.traits.iter().map(|t| t.as_str()).collect();
                println!("  {}", traits.join(", "));
            }
            if let Some(url) = dataset.images.primary_image(character.id.as_str()) {
                println!("  {url}");
            }
            println!("{remaining} of {} left to rate", pool.len());
        }
        None => println!("{}", "Every character in the pool has been rated.".green()),
    }
    Ok(())
}
