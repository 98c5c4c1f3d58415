//! Chart catalog - the user's list of song-chart files and their statuses.
//!
//! [`CatalogStore`] owns the entries and saves them through a
//! [`crate::persistence::CatalogPersistence`] after every change.

mod store;
mod types;

pub use store::CatalogStore;
pub use types::*;
