//! Portal data model.
//!
//! Wire format is camelCase JSON, matching the remote service and the
//! persisted store blobs.

use chrono::{DateTime, Utc};
use common::{Money, TicketId};
use serde::{Deserialize, Serialize};

/// Role assigned when a signup omits one.
pub const DEFAULT_ROLE: &str = "soldier";

/// Owner recorded on tickets submitted without a session.
pub const GUEST_OWNER: &str = "guest";

/// Status every ticket starts in. Tickets are immutable after creation, so
/// this is currently the only status in circulation.
pub const OPEN_STATUS: &str = "Open";

/// Identity of the currently authenticated client.
///
/// Not persisted remotely; cached locally so a session survives reloads.
/// Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub email: String,
    pub role: String,
}

/// A registered user as stored in the fallback user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl User {
    /// Derives the session identity, dropping the password.
    pub fn to_session(&self) -> Session {
        Session {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// A grievance ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub subject: String,
    pub category: String,
    pub priority: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub owner: String,
}

impl Ticket {
    /// Opens a new ticket at `at`, minting its ID from the same timestamp.
    pub fn open(
        subject: impl Into<String>,
        category: impl Into<String>,
        priority: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TicketId::mint(at),
            subject: subject.into(),
            category: category.into(),
            priority: priority.into(),
            description: description.into(),
            status: OPEN_STATUS.to_string(),
            created_at: at,
            owner: owner.into(),
        }
    }
}

/// A benefit/entitlement reference record, matched to users by role tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl Scheme {
    /// Returns true if the scheme carries `role` as a tag.
    pub fn matches_role(&self, role: &str) -> bool {
        self.tags.iter().any(|tag| tag == role)
    }
}

/// Built-in scheme reference list, used by the remote service as its static
/// data and by the portal as the offline fallback.
pub fn reference_schemes() -> Vec<Scheme> {
    let entries = [
        (
            "Education Scholarship A",
            &["education", "family"][..],
            "Scholarship for soldiers' children",
        ),
        (
            "Medical Assistance B",
            &["medical", "veteran"][..],
            "Medical support for veterans",
        ),
        (
            "Housing Subsidy C",
            &["housing", "soldier"][..],
            "Affordable housing scheme",
        ),
        (
            "Pension Support D",
            &["pension", "veteran"][..],
            "Enhanced pension support",
        ),
    ];
    entries
        .into_iter()
        .map(|(name, tags, description)| Scheme {
            name: name.to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            description: description.to_string(),
        })
        .collect()
}

/// One line item of the canteen cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    pub price: Money,
    pub quantity: u32,
}

impl CartItem {
    /// Returns the line total (price × quantity).
    pub fn line_total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

/// Patient details collected in the booking wizard's fourth step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    pub name: String,
    pub service_number: String,
    pub phone: String,
    pub age: String,
}

impl PatientInfo {
    /// Returns true when every field is present (non-empty after trim).
    ///
    /// Format checks are the concern of field-level validation.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.service_number, &self.phone, &self.age]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}
