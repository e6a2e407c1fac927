use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Money amount in paise (minor currency units) to avoid floating point issues.
///
/// Amounts are never negative; subtraction saturates at zero so derived
/// totals cannot underflow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    /// Amount in paise (e.g., 1000 = ₹10.00)
    paise: u64,
}

impl Money {
    /// Creates a new Money amount from paise.
    pub fn from_paise(paise: u64) -> Self {
        Self { paise }
    }

    /// Creates a new Money amount from a whole-rupee value.
    pub fn from_rupees(rupees: u64) -> Self {
        Self {
            paise: rupees * 100,
        }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { paise: 0 }
    }

    /// Returns the amount in paise.
    pub fn paise(&self) -> u64 {
        self.paise
    }

    /// Returns the rupee portion (whole number).
    pub fn rupees(&self) -> u64 {
        self.paise / 100
    }

    /// Returns the paise portion (remainder after rupees).
    pub fn paise_part(&self) -> u64 {
        self.paise % 100
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.paise == 0
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            paise: self.paise * quantity as u64,
        }
    }

    /// Returns `floor(amount × percent / 100)`.
    ///
    /// Floor semantics are load-bearing: the canteen discount is defined as
    /// `floor(subtotal × 0.15)` and numeric-equality tests depend on it.
    pub fn percent_floor(&self, percent: u64) -> Money {
        Money {
            paise: self.paise * percent / 100,
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{}.{:02}", self.rupees(), self.paise_part())
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            paise: self.paise + rhs.paise,
        }
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money {
            paise: self.paise.saturating_sub(rhs.paise),
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.paise += rhs.paise;
    }
}

/// Unique identifier for a grievance ticket.
///
/// Minted as `"T"` followed by the uppercase base-36 encoding of the
/// Unix-millisecond timestamp, matching the remote service's format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Mints a ticket ID from a timestamp.
    pub fn mint(at: DateTime<Utc>) -> Self {
        let millis = at.timestamp_millis().max(0) as u64;
        Self(format!("T{}", to_base36_upper(millis)))
    }

    /// Creates a ticket ID from an existing string (e.g., off the wire).
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TicketId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TicketId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

fn to_base36_upper(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    out.iter().rev().collect()
}

/// Token handed out when a booking is confirmed.
///
/// Format is `T-<digits>` with a number in 100..1100.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingToken(String);

impl BookingToken {
    /// Mints a fresh booking token.
    pub fn mint() -> Self {
        let number: u32 = rand::thread_rng().gen_range(100..1100);
        Self(format!("T-{number}"))
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookingToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn money_from_paise() {
        let money = Money::from_paise(1234);
        assert_eq!(money.paise(), 1234);
        assert_eq!(money.rupees(), 12);
        assert_eq!(money.paise_part(), 34);
    }

    #[test]
    fn money_from_rupees() {
        let money = Money::from_rupees(50);
        assert_eq!(money.paise(), 5000);
        assert_eq!(money.paise_part(), 0);
    }

    #[test]
    fn money_display() {
        assert_eq!(Money::from_paise(1234).to_string(), "₹12.34");
        assert_eq!(Money::from_paise(100).to_string(), "₹1.00");
        assert_eq!(Money::from_paise(5).to_string(), "₹0.05");
    }

    #[test]
    fn money_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!(a.multiply(3).paise(), 3000);
    }

    #[test]
    fn money_subtraction_saturates_at_zero() {
        let small = Money::from_paise(100);
        let large = Money::from_paise(500);
        assert_eq!((small - large).paise(), 0);
    }

    #[test]
    fn money_percent_uses_floor() {
        // 15% of 199 paise is 29.85, which must floor to 29.
        assert_eq!(Money::from_paise(199).percent_floor(15).paise(), 29);
        assert_eq!(Money::from_paise(200).percent_floor(15).paise(), 30);
        assert_eq!(Money::zero().percent_floor(15).paise(), 0);
    }

    #[test]
    fn ticket_id_is_base36_of_millis() {
        let at = Utc.timestamp_millis_opt(36 * 36).unwrap();
        let id = TicketId::mint(at);
        assert_eq!(id.as_str(), "T100");
    }

    #[test]
    fn ticket_id_is_uppercase_and_prefixed() {
        let id = TicketId::mint(Utc::now());
        assert!(id.as_str().starts_with('T'));
        assert!(
            id.as_str()[1..]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn booking_token_matches_pattern() {
        let token = BookingToken::mint();
        let digits = token.as_str().strip_prefix("T-").unwrap();
        let number: u32 = digits.parse().unwrap();
        assert!((100..1100).contains(&number));
    }

    #[test]
    fn money_serialization_is_transparent() {
        let money = Money::from_paise(999);
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "999");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);
    }
}
