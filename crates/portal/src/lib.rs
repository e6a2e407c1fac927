//! Resilient data layer for the Shifa Setu portal.
//!
//! Four feature services share one HTTP client and one persisted store. Each
//! operation tries the remote service first and falls back to local state
//! when it is unavailable, so the portal keeps working offline. The remote's
//! availability is never the caller's problem.

pub mod auth;
pub mod cart;
pub mod error;
pub mod grievances;
pub mod remote;
pub mod schemes;

use std::path::PathBuf;

use local_store::LocalStore;

pub use auth::AuthService;
pub use cart::CartService;
pub use error::{PortalError, Result};
pub use grievances::GrievanceService;
pub use remote::{RemoteClient, RemoteResult, Unavailable};
pub use schemes::SchemeService;

/// Where the portal finds its remote services and its fallback store.
///
/// Reads from environment variables:
/// - `NODE_API_BASE` — account/grievance/scheme API (default: `http://localhost:4000`)
/// - `PY_API_BASE` — recommendation service (default: `http://localhost:5001`)
/// - `PORTAL_STORE` — fallback store file (default: `portal-store.json`)
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub api_base: String,
    pub recommendations_base: String,
    pub store_path: PathBuf,
}

impl PortalConfig {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            api_base: std::env::var("NODE_API_BASE")
                .unwrap_or_else(|_| "http://localhost:4000".to_string()),
            recommendations_base: std::env::var("PY_API_BASE")
                .unwrap_or_else(|_| "http://localhost:5001".to_string()),
            store_path: std::env::var("PORTAL_STORE")
                .unwrap_or_else(|_| "portal-store.json".to_string())
                .into(),
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:4000".to_string(),
            recommendations_base: "http://localhost:5001".to_string(),
            store_path: PathBuf::from("portal-store.json"),
        }
    }
}

/// The assembled portal: one service per feature area.
#[derive(Debug, Clone)]
pub struct Portal {
    pub auth: AuthService,
    pub grievances: GrievanceService,
    pub schemes: SchemeService,
    pub cart: CartService,
}

impl Portal {
    /// Opens the fallback store and wires up the services.
    ///
    /// No remote connection is attempted here; the remote is contacted
    /// lazily, per operation.
    pub fn open(config: PortalConfig) -> Self {
        let store = LocalStore::open(&config.store_path);
        let remote = RemoteClient::new(config.api_base, config.recommendations_base);
        Self {
            auth: AuthService::new(remote.clone(), store.clone()),
            grievances: GrievanceService::new(remote.clone(), store.clone()),
            schemes: SchemeService::new(remote, store.clone()),
            cart: CartService::new(store),
        }
    }
}
