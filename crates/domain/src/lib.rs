//! Domain layer for the Shifa Setu portal.
//!
//! This crate provides the portal's data model and the two pieces of pure
//! client-side logic:
//! - the canteen cart ledger with derived subtotal/discount/total
//! - the five-step token booking wizard with step-gated validation
//! - field validation shared by the forms

pub mod booking;
pub mod cart;
pub mod types;
pub mod validation;

pub use booking::{BookingData, BookingError, BookingStep, BookingWizard, Confirmation, TimeSlot};
pub use cart::{CartLedger, CartTotals};
pub use types::{
    CartItem, DEFAULT_ROLE, GUEST_OWNER, OPEN_STATUS, PatientInfo, Scheme, Session, Ticket, User,
    reference_schemes,
};
pub use validation::FieldError;
