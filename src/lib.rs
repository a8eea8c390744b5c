// Core functionality
pub mod core {
    pub mod config;
    pub mod error;
}

// Index document and loading
pub mod index {
    pub mod http;
    pub mod loader;
    pub mod model;
}

// Query matching and ranking
pub mod search {
    pub mod hit;
    pub mod matcher;
    pub mod normalize;
}

// User interfaces
pub mod ui {
    pub mod cli;
    pub mod debounce;
    pub mod render;
    pub mod tui;
}

// Re-export commonly used types
pub use crate::core::config::{Config, IndexSource};
pub use crate::core::error::{Error, Result};
pub use index::loader::{load, load_for, parse_index, try_load};
pub use index::model::{Component, ComponentLinks, Document, Index, Pattern, ScreenshotRule};
pub use search::hit::{HitItem, HitKind, MatchHit};
pub use search::matcher::{match_query, DocumentRule, EmptyQueryPolicy, MatchOptions};
pub use ui::cli::Cli;
pub use ui::debounce::Debounce;
pub use ui::tui::SearchTui;
