//! Which character to offer for rating next.

mod picker;
mod pool;

pub use picker::{pick_next, unrated_characters};
pub use pool::{available_characters, PoolFilter};
