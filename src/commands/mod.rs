//! CLI command implementations.
//!
//! Available commands:
//! - **calculate**: rank traits from the current session
//! - **rate** / **skip** / **revert** / **clear**: edit the session
//! - **next**: suggest an unrated character
//! - **status**: list what has been rated
//! - **init**: write a default configuration file

pub mod calculate;
pub mod init;
pub mod next;
pub mod session;

pub use calculate::{calculate, CalculateConfig};
pub use init::init_config;
pub use next::{suggest_next, NextConfig};
pub use session::{clear, rate, revert, skip, status};

use crate::config::{load_config, load_config_from, MoerankConfig};
use crate::session::{FileSnapshotStore, Session};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Settings shared by every command: the loaded configuration and the
/// session file it resolves to.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: MoerankConfig,
    pub session_path: PathBuf,
}

impl AppContext {
    /// Load `config_path` if given, otherwise discover `.moerank.toml`.
    /// `session_override` wins over the configured session path.
    pub fn resolve(config_path: Option<&Path>, session_override: Option<PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(path) => load_config_from(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => load_config(),
        };
        let session_path = session_override.unwrap_or_else(|| config.session.resolve_path());
        Ok(Self {
            config,
            session_path,
        })
    }

    pub fn open_session(&self) -> Result<Session<FileSnapshotStore>> {
        Session::open(FileSnapshotStore::new(&self.session_path)).with_context(|| {
            format!("Failed to open session {}", self.session_path.display())
        })
    }
}
