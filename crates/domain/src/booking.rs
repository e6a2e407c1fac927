//! Token booking wizard state machine.

use common::BookingToken;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::PatientInfo;

/// One stage of the linear booking flow.
///
/// ```text
/// Category ──► Department ──► Schedule ──► PatientDetails ──► Confirmation
///     ◄───────────◄──────────────◄───────────────◄
/// ```
///
/// Forward movement is gated by the current step's validator; backward
/// movement is always permitted above the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingStep {
    /// Pick a booking category (general, specialist, emergency, ...).
    #[default]
    Category,

    /// Pick a hospital department.
    Department,

    /// Pick a date and time slot.
    Schedule,

    /// Fill in the patient's details.
    PatientDetails,

    /// Confirmation display (terminal state).
    Confirmation,
}

impl BookingStep {
    /// Returns the 1-based step number shown in the progress indicator.
    pub fn number(&self) -> u8 {
        match self {
            BookingStep::Category => 1,
            BookingStep::Department => 2,
            BookingStep::Schedule => 3,
            BookingStep::PatientDetails => 4,
            BookingStep::Confirmation => 5,
        }
    }

    /// Returns the next step, or None from the terminal step.
    pub fn next(&self) -> Option<BookingStep> {
        match self {
            BookingStep::Category => Some(BookingStep::Department),
            BookingStep::Department => Some(BookingStep::Schedule),
            BookingStep::Schedule => Some(BookingStep::PatientDetails),
            BookingStep::PatientDetails => Some(BookingStep::Confirmation),
            BookingStep::Confirmation => None,
        }
    }

    /// Returns the previous step, or None from the first step.
    pub fn previous(&self) -> Option<BookingStep> {
        match self {
            BookingStep::Category => None,
            BookingStep::Department => Some(BookingStep::Category),
            BookingStep::Schedule => Some(BookingStep::Department),
            BookingStep::PatientDetails => Some(BookingStep::Schedule),
            BookingStep::Confirmation => Some(BookingStep::PatientDetails),
        }
    }

    /// Returns true for the terminal confirmation step.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStep::Confirmation)
    }
}

/// A bookable time slot. Unavailable slots can never be selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub label: String,
    pub available: bool,
}

impl TimeSlot {
    /// An open slot.
    pub fn available(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            available: true,
        }
    }

    /// A slot flagged unavailable.
    pub fn unavailable(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            available: false,
        }
    }
}

/// Selections accumulated while moving through the wizard.
///
/// Transient: rebuilt per booking session, cleared atomically on reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingData {
    pub category: String,
    pub department: String,
    pub date: String,
    pub time_slot: String,
    pub patient_info: Option<PatientInfo>,
}

/// Immutable record produced when the wizard reaches confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub category: String,
    pub department: String,
    pub date: String,
    pub time_slot: String,
    pub patient: PatientInfo,
    pub token: BookingToken,
}

/// Errors raised by wizard selections.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    /// The chosen time slot is flagged unavailable.
    #[error("This time slot is unavailable")]
    SlotUnavailable,
}

/// Five-step booking wizard.
///
/// `advance` only moves forward when the current step's validator passes;
/// entering the confirmation step is the single side-effecting transition:
/// it snapshots the accumulated selections and mints a booking token.
#[derive(Debug, Clone, Default)]
pub struct BookingWizard {
    step: BookingStep,
    data: BookingData,
    confirmation: Option<Confirmation>,
}

impl BookingWizard {
    /// Creates a wizard at step 1 with empty selections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current step.
    pub fn step(&self) -> BookingStep {
        self.step
    }

    /// Returns the accumulated selections.
    pub fn data(&self) -> &BookingData {
        &self.data
    }

    /// Returns the confirmation record, once the terminal step was entered.
    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Records the chosen category.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.data.category = category.into();
    }

    /// Records the chosen department.
    pub fn select_department(&mut self, department: impl Into<String>) {
        self.data.department = department.into();
    }

    /// Records the chosen date.
    pub fn select_date(&mut self, date: impl Into<String>) {
        self.data.date = date.into();
    }

    /// Records the chosen time slot.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::SlotUnavailable` for a slot flagged
    /// unavailable; the previous selection is left untouched.
    pub fn select_time_slot(&mut self, slot: &TimeSlot) -> Result<(), BookingError> {
        if !slot.available {
            return Err(BookingError::SlotUnavailable);
        }
        self.data.time_slot = slot.label.clone();
        Ok(())
    }

    /// Records the patient details for step 4.
    pub fn set_patient_info(&mut self, info: PatientInfo) {
        self.data.patient_info = Some(info);
    }

    /// Returns true if the current step's validator passes.
    pub fn step_is_valid(&self) -> bool {
        match self.step {
            BookingStep::Category => !self.data.category.is_empty(),
            BookingStep::Department => !self.data.department.is_empty(),
            BookingStep::Schedule => !self.data.time_slot.is_empty(),
            BookingStep::PatientDetails => self
                .data
                .patient_info
                .as_ref()
                .is_some_and(PatientInfo::is_complete),
            BookingStep::Confirmation => true,
        }
    }

    /// Moves one step forward if the current step validates; a failing
    /// validator makes this a no-op. Returns the (possibly unchanged) step.
    pub fn advance(&mut self) -> BookingStep {
        if !self.step_is_valid() {
            return self.step;
        }
        let Some(next) = self.step.next() else {
            return self.step;
        };
        self.step = next;
        if next.is_terminal() {
            self.confirmation = self.snapshot();
            if let Some(confirmation) = &self.confirmation {
                tracing::info!(token = %confirmation.token, "booking confirmed");
            }
        }
        self.step
    }

    /// Moves one step backward. Unconditional above step 1; selections are
    /// never cleared.
    pub fn retreat(&mut self) -> BookingStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Resets to step 1 and clears every selection in one assignment, so a
    /// later booking can never observe stale values from an earlier one.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Re-enters the flow for an emergency: a full reset with the emergency
    /// category pre-selected.
    pub fn start_emergency(&mut self) {
        self.reset();
        self.data.category = "emergency".to_string();
    }

    fn snapshot(&self) -> Option<Confirmation> {
        // PatientDetails validated before the transition, so the info is
        // present on every reachable path.
        let patient = self.data.patient_info.clone()?;
        Some(Confirmation {
            category: self.data.category.clone(),
            department: self.data.department.clone(),
            date: self.data.date.clone(),
            time_slot: self.data.time_slot.clone(),
            patient,
            token: BookingToken::mint(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient() -> PatientInfo {
        PatientInfo {
            name: "Ravi Kumar".to_string(),
            service_number: "IC-12345".to_string(),
            phone: "9876543210".to_string(),
            age: "42".to_string(),
        }
    }

    #[test]
    fn advance_without_category_is_noop() {
        let mut wizard = BookingWizard::new();
        assert_eq!(wizard.advance(), BookingStep::Category);
        assert_eq!(wizard.step(), BookingStep::Category);
    }

    #[test]
    fn advance_with_category_moves_to_department() {
        let mut wizard = BookingWizard::new();
        wizard.select_category("general");
        assert_eq!(wizard.advance(), BookingStep::Department);
    }

    #[test]
    fn retreat_returns_without_clearing_selection() {
        let mut wizard = BookingWizard::new();
        wizard.select_category("general");
        wizard.advance();

        assert_eq!(wizard.retreat(), BookingStep::Category);
        assert_eq!(wizard.data().category, "general");
    }

    #[test]
    fn retreat_from_first_step_stays_put() {
        let mut wizard = BookingWizard::new();
        assert_eq!(wizard.retreat(), BookingStep::Category);
    }

    #[test]
    fn unavailable_slot_is_rejected() {
        let mut wizard = BookingWizard::new();
        let err = wizard
            .select_time_slot(&TimeSlot::unavailable("10:00"))
            .unwrap_err();
        assert_eq!(err, BookingError::SlotUnavailable);
        assert_eq!(wizard.data().time_slot, "");

        wizard
            .select_time_slot(&TimeSlot::available("10:30"))
            .unwrap();
        assert_eq!(wizard.data().time_slot, "10:30");
    }

    #[test]
    fn incomplete_patient_details_block_advance() {
        let mut wizard = BookingWizard::new();
        wizard.select_category("general");
        wizard.advance();
        wizard.select_department("cardiology");
        wizard.advance();
        wizard.select_time_slot(&TimeSlot::available("10:00")).unwrap();
        wizard.advance();

        let mut incomplete = patient();
        incomplete.phone = String::new();
        wizard.set_patient_info(incomplete);
        assert_eq!(wizard.advance(), BookingStep::PatientDetails);
        assert!(wizard.confirmation().is_none());
    }

    #[test]
    fn full_flow_produces_confirmation_with_token() {
        let mut wizard = BookingWizard::new();
        wizard.select_category("general");
        wizard.advance();
        wizard.select_department("cardiology");
        wizard.advance();
        wizard.select_date("Mon 12");
        wizard.select_time_slot(&TimeSlot::available("10:00")).unwrap();
        wizard.advance();
        wizard.set_patient_info(patient());
        assert_eq!(wizard.advance(), BookingStep::Confirmation);

        let confirmation = wizard.confirmation().expect("confirmation minted");
        assert_eq!(confirmation.category, "general");
        assert_eq!(confirmation.department, "cardiology");
        assert_eq!(confirmation.time_slot, "10:00");
        assert_eq!(confirmation.patient, patient());

        let digits = confirmation.token.as_str().strip_prefix("T-").unwrap();
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn advance_past_terminal_is_noop() {
        let mut wizard = BookingWizard::new();
        wizard.select_category("general");
        wizard.advance();
        wizard.select_department("cardiology");
        wizard.advance();
        wizard.select_time_slot(&TimeSlot::available("10:00")).unwrap();
        wizard.advance();
        wizard.set_patient_info(patient());
        wizard.advance();

        assert_eq!(wizard.advance(), BookingStep::Confirmation);
    }

    #[test]
    fn reset_clears_everything_at_once() {
        let mut wizard = BookingWizard::new();
        wizard.select_category("general");
        wizard.advance();
        wizard.select_department("cardiology");
        wizard.advance();
        wizard.select_time_slot(&TimeSlot::available("10:00")).unwrap();
        wizard.advance();
        wizard.set_patient_info(patient());
        wizard.advance();

        wizard.reset();
        assert_eq!(wizard.step(), BookingStep::Category);
        assert_eq!(*wizard.data(), BookingData::default());
        assert!(wizard.confirmation().is_none());
    }

    #[test]
    fn emergency_entry_preselects_category() {
        let mut wizard = BookingWizard::new();
        wizard.select_category("general");
        wizard.advance();

        wizard.start_emergency();
        assert_eq!(wizard.step(), BookingStep::Category);
        assert_eq!(wizard.data().category, "emergency");
        assert!(wizard.step_is_valid());
    }

    #[test]
    fn step_numbers_cover_one_to_five() {
        assert_eq!(BookingStep::Category.number(), 1);
        assert_eq!(BookingStep::Department.number(), 2);
        assert_eq!(BookingStep::Schedule.number(), 3);
        assert_eq!(BookingStep::PatientDetails.number(), 4);
        assert_eq!(BookingStep::Confirmation.number(), 5);
        assert!(BookingStep::Confirmation.is_terminal());
        assert!(BookingStep::Confirmation.next().is_none());
    }
}
