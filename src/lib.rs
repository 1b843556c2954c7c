// ============================================================================
// filmshelf Library
// ============================================================================

pub mod api;
pub mod config;
pub mod core;
pub mod filter;
pub mod sync;
pub mod view;

// Re-export main types for convenience
pub use api::{HttpMovieApi, InMemoryMovieApi, MovieApi};
pub use config::ClientConfig;
pub use core::{ClientError, MovieDraft, Record, RecordId, Result, ValidationError};
pub use filter::Filter;
pub use sync::{Cache, Confirmation, SyncOp, SyncUpdate, Synchronizer};
pub use view::{Listing, Row, RowAction, render};

/// Render the cache through a filter.
///
/// # Examples
///
/// ```
/// use filmshelf::{Cache, Filter, project};
///
/// let cache = Cache::new();
/// assert!(project(&cache, &Filter::new("dune")).is_empty());
/// ```
pub fn project(cache: &Cache, filter: &Filter) -> Listing {
    render(filter.apply(cache.records()))
}
