//! API handlers for the Gazette HTTP surface.

pub mod feeds;
pub mod follows;
pub mod health;
pub mod posts;
pub mod users;

pub use feeds::*;
pub use follows::*;
pub use health::*;
pub use posts::*;
pub use users::*;

use std::sync::Arc;

use crate::db::Database;

/// Shared application state.
pub struct AppState {
    /// Database handle shared with the scheduler.
    pub db: Arc<Database>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}
