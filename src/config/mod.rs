// Sub-modules
mod core;
mod loader;
mod scoring;

pub use self::core::{MoerankConfig, OutputConfig, SelectionConfig, SessionConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
pub use scoring::{
    default_confidence_cap, default_confidence_offset, default_min_support, default_noise_floor,
    default_score_scale, AttributionConfig,
};
