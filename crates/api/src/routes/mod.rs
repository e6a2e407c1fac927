//! Route handlers and shared application state.

pub mod auth;
pub mod grievances;
pub mod health;
pub mod metrics;
pub mod schemes;

use domain::{Scheme, Ticket, User, reference_schemes};
use tokio::sync::RwLock;

/// Shared application state accessible from all handlers.
///
/// Collections are in-memory only; restarting the server loses them, which
/// is exactly the behaviour the portal's fallback layer is built around.
pub struct AppState {
    pub users: RwLock<Vec<User>>,
    pub tickets: RwLock<Vec<Ticket>>,
    pub schemes: Vec<Scheme>,
}

impl AppState {
    /// Creates empty state with the static scheme list loaded.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            tickets: RwLock::new(Vec::new()),
            schemes: reference_schemes(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
