//! Structural validation of roster snapshots.
//!
//! Run before a snapshot is applied to a session, so a corrupt or
//! hand-edited import never puts the session into an ambiguous state.
//! Detects:
//! - Duplicate person IDs on the active roster
//! - Blank person names
//! - The same cell recorded twice in the schedule

use std::collections::HashSet;

use crate::store::MonthlySnapshot;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two roster entries share the same person ID.
    DuplicatePersonId,
    /// A roster entry has an empty name.
    BlankName,
    /// The schedule records the same person/date cell twice.
    DuplicateCell,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a snapshot's structural integrity.
///
/// Checks:
/// 1. No duplicate person IDs on the active roster
/// 2. No blank names
/// 3. No duplicate schedule cells
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &MonthlySnapshot) -> ValidationResult {
    let mut errors = Vec::new();

    let mut person_ids = HashSet::new();
    for person in &snapshot.active_roster {
        if !person_ids.insert(person.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePersonId,
                format!("Duplicate person ID: {}", person.id),
            ));
        }
        if person.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankName,
                format!("Person {} has a blank name", person.id),
            ));
        }
    }

    let mut cells = HashSet::new();
    for record in &snapshot.schedule {
        if !cells.insert((record.person, record.date)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCell,
                format!(
                    "Cell for person {} on {} recorded twice",
                    record.person, record.date
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
