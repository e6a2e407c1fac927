//! File-backed JSON key/value store.
//!
//! This is the fallback store the portal writes to when the remote API is
//! unreachable, and the cache it reads on startup. One file holds a single
//! JSON object mapping string keys to arbitrary JSON values.

pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::LocalStore;

/// Well-known store keys shared by the portal services.
pub mod keys {
    /// Cached session identity (`Session`).
    pub const SESSION_USER: &str = "sessionUser";
    /// Registered users (`Vec<User>`).
    pub const USERS: &str = "users";
    /// Grievance tickets, newest-first (`Vec<Ticket>`).
    pub const TICKETS: &str = "tickets";
    /// Canteen cart line items (`Vec<CartItem>`).
    pub const CART: &str = "cart";
}
