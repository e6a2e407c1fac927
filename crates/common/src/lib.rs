//! Shared value types for the Shifa Setu portal.

pub mod types;

pub use types::{BookingToken, Money, TicketId};
