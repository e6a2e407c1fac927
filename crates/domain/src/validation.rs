//! Field-level validation for portal forms.
//!
//! Checks run on blur and on submit; a failure carries a single
//! human-readable message and never panics.

use thiserror::Error;

/// A failed field check, carrying the message shown next to the field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("This field is required")]
    Required,

    #[error("Please enter a valid email address")]
    Email,

    #[error("Please enter a valid 10-digit mobile number")]
    Phone,

    #[error("Please enter a valid service number (e.g., IC-12345)")]
    ServiceNumber,
}

/// Requires a non-empty value after trimming; returns the trimmed slice.
pub fn require(value: &str) -> Result<&str, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Required);
    }
    Ok(trimmed)
}

/// Validates `local@domain.tld` shape: non-empty local part, a domain with a
/// dot and non-empty labels around it, no whitespace or extra `@`.
pub fn validate_email(value: &str) -> Result<(), FieldError> {
    if value.chars().any(char::is_whitespace) {
        return Err(FieldError::Email);
    }
    let Some((local, domain)) = value.split_once('@') else {
        return Err(FieldError::Email);
    };
    if local.is_empty() || domain.contains('@') {
        return Err(FieldError::Email);
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return Err(FieldError::Email);
    };
    if host.is_empty() || tld.is_empty() {
        return Err(FieldError::Email);
    }
    Ok(())
}

/// Validates an Indian mobile number: exactly 10 digits, first digit 6–9.
pub fn validate_phone(value: &str) -> Result<(), FieldError> {
    let mut chars = value.chars();
    let valid_first = chars.next().is_some_and(|c| ('6'..='9').contains(&c));
    if !valid_first || value.len() != 10 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::Phone);
    }
    Ok(())
}

/// Validates a service number: 1–3 uppercase letters, optional hyphen,
/// 4–6 digits (e.g., `IC-12345`).
pub fn validate_service_number(value: &str) -> Result<(), FieldError> {
    let letters: String = value.chars().take_while(char::is_ascii_uppercase).collect();
    if !(1..=3).contains(&letters.len()) {
        return Err(FieldError::ServiceNumber);
    }
    let rest = &value[letters.len()..];
    let digits = rest.strip_prefix('-').unwrap_or(rest);
    if !(4..=6).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::ServiceNumber);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_trims_and_rejects_empty() {
        assert_eq!(require("  value  "), Ok("value"));
        assert_eq!(require(""), Err(FieldError::Required));
        assert_eq!(require("   "), Err(FieldError::Required));
    }

    #[test]
    fn valid_emails_pass() {
        for email in ["a@x.com", "first.last@sub.example.org", "x@y.in"] {
            assert_eq!(validate_email(email), Ok(()), "{email}");
        }
    }

    #[test]
    fn invalid_emails_fail() {
        for email in [
            "",
            "plainaddress",
            "@no-local.com",
            "no-domain@",
            "no-tld@domain",
            "dot-at-end@domain.",
            "two@@at.com",
            "spa ce@x.com",
        ] {
            assert_eq!(validate_email(email), Err(FieldError::Email), "{email}");
        }
    }

    #[test]
    fn valid_phones_pass() {
        for phone in ["9876543210", "6000000000", "7123456789", "8999999999"] {
            assert_eq!(validate_phone(phone), Ok(()), "{phone}");
        }
    }

    #[test]
    fn invalid_phones_fail() {
        for phone in ["", "12345", "5876543210", "98765432100", "98765abc10"] {
            assert_eq!(validate_phone(phone), Err(FieldError::Phone), "{phone}");
        }
    }

    #[test]
    fn valid_service_numbers_pass() {
        for sn in ["IC-12345", "A1234", "ABC-123456", "XY9999"] {
            assert_eq!(validate_service_number(sn), Ok(()), "{sn}");
        }
    }

    #[test]
    fn invalid_service_numbers_fail() {
        for sn in [
            "",
            "ic-12345",    // lowercase prefix
            "ABCD-12345",  // four letters
            "IC-123",      // too few digits
            "IC-1234567",  // too many digits
            "IC--12345",   // double hyphen
            "IC-12a45",    // letter in digits
            "12345",       // no letters
        ] {
            assert_eq!(
                validate_service_number(sn),
                Err(FieldError::ServiceNumber),
                "{sn}"
            );
        }
    }
}
