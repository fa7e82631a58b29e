// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod scoring;
pub mod selection;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Catalog, Character, CharacterId, Error, Gender, Rating, RatingHistoryItem, RatingLevel,
    RatingValue, Result, Score, SubsetId, TraitId,
};

pub use crate::config::{AttributionConfig, MoerankConfig};

pub use crate::io::{create_writer, Dataset, OutputFormat, OutputWriter, ReportContext};

pub use crate::scoring::{
    calculate_preferences, is_informational, Diagnostic, PreferenceEngine, PreferenceReport,
    TraitAttribution, TraitScore,
};

pub use crate::selection::{available_characters, pick_next, unrated_characters, PoolFilter};

pub use crate::session::{
    FileSnapshotStore, MemorySnapshotStore, RatingStore, Session, SnapshotStore,
};
