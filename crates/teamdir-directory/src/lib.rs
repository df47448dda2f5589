//! Teamdir Directory - filtering and navigation over a loaded roster
//!
//! This crate provides:
//! - The filter engine (free-text search, stream, role)
//! - Modal carousel navigation with wraparound
//! - Random member selection
//! - Card and page rendering with per-member failure isolation
//! - Search input debouncing
//! - The `Directory` context tying these together

pub mod config;
pub mod criteria;
pub mod debounce;
pub mod directory;
pub mod error;
pub mod filter;
pub mod navigation;
pub mod random;
pub mod render;
pub mod summary;

pub use config::DirectoryConfig;
pub use criteria::FilterCriteria;
pub use debounce::Debouncer;
pub use directory::Directory;
pub use error::{ConfigError, RenderError, RenderResult};
pub use filter::{apply_filters, roles, streams, Matcher};
pub use navigation::{resolve_position, step, Direction, Position};
pub use random::pick_random;
pub use render::{render_cards, CardRenderer, HtmlRenderer, RenderedCard, ViewMode};
pub use summary::Summary;

/// Prelude for common imports
pub mod prelude {
    pub use crate::criteria::FilterCriteria;
    pub use crate::directory::Directory;
    pub use crate::navigation::{Direction, Position};
    pub use crate::render::{CardRenderer, HtmlRenderer, ViewMode};
    pub use crate::summary::Summary;
}
