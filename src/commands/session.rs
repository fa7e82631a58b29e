//! Session editing and inspection commands.

use super::AppContext;
use crate::core::{CharacterId, RatingLevel, Score};
use crate::io::Dataset;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use colored::*;
use std::path::Path;

pub fn rate(app: &AppContext, character: String, score: Score) -> Result<()> {
    let mut session = app.open_session()?;
    session.rate(CharacterId::new(character.clone()), score)?;
    println!(
        "Rated {} {} ({})",
        character.bold(),
        score,
        RatingLevel::from_score(score).label()
    );
    Ok(())
}

pub fn skip(app: &AppContext, character: String) -> Result<()> {
    let mut session = app.open_session()?;
    session.skip(CharacterId::new(character.clone()))?;
    println!("Skipped {}", character.bold());
    Ok(())
}

pub fn revert(app: &AppContext) -> Result<()> {
    let mut session = app.open_session()?;
    match session.revert()? {
        Some(id) => println!("Reverted the last action on {}", id.as_str().bold()),
        None => println!("{}", "Nothing to revert.".yellow()),
    }
    Ok(())
}

pub fn clear(app: &AppContext) -> Result<()> {
    let mut session = app.open_session()?;
    session.clear_all()?;
    println!("Cleared all ratings");
    Ok(())
}

pub fn status(app: &AppContext, dataset: Option<&Path>) -> Result<()> {
    let dataset = dataset
        .map(|path| {
            Dataset::load(path)
                .with_context(|| format!("Failed to load dataset {}", path.display()))
        })
        .transpose()?;
    let session = app.open_session()?;
    let store = session.store();

    println!("Session: {}", app.session_path.display());
    println!(
        "Rated: {}  Skipped: {}",
        store.rated_count().to_string().bold(),
        store.skipped_count()
    );
    if store.is_empty() {
        return Ok(());
    }

    println!();
    for item in store.history() {
        let name = dataset
            .as_ref()
            .and_then(|d| d.catalog.get(item.character_id.as_str()))
            .map(|c| c.display_name())
            .unwrap_or(item.character_id.as_str());
        let verdict = match item.score {
            Some(score) => paint_level(score),
            None => "skipped".dimmed().to_string(),
        };
        println!("{}  {:<24} {}", format_timestamp(item.timestamp), name, verdict);
    }
    Ok(())
}

fn paint_level(score: Score) -> String {
    let level = RatingLevel::from_score(score);
    let text = format!("{score:>2} {}", level.label());
    match level {
        RatingLevel::Like => text.green().to_string(),
        RatingLevel::Neutral => text,
        RatingLevel::Dislike => text.red().to_string(),
    }
}

fn format_timestamp(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|t: DateTime<Local>| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".repeat(16))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MoerankConfig;
    use crate::session::{FileSnapshotStore, Session};
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> AppContext {
        AppContext {
            config: MoerankConfig::default(),
            session_path: dir.path().join("session.json"),
        }
    }

    #[test]
    fn test_commands_persist_between_invocations() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        rate(&app, "rem".into(), Score::new(9).unwrap()).unwrap();
        skip(&app, "ram".into()).unwrap();

        let session = Session::open(FileSnapshotStore::new(&app.session_path)).unwrap();
        assert_eq!(session.store().rated_count(), 1);
        assert_eq!(session.store().skipped_count(), 1);

        revert(&app).unwrap();
        clear(&app).unwrap();
        assert!(!app.session_path.exists());
    }

    #[test]
    fn test_revert_on_empty_session_is_ok() {
        let dir = TempDir::new().unwrap();
        revert(&app(&dir)).unwrap();
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(i64::MAX), "-".repeat(16));
    }
}
