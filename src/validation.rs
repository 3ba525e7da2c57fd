//! Structural validation of candidate placement sets.
//!
//! Checks a placement list before it enters the migration flow.
//! Detects:
//! - Weekday indices outside 0–6
//! - Empty institution/shift/slot/class identifiers
//! - Exact duplicate placements
//!
//! All issues are collected and returned together; callers decide
//! whether any of them blocks the edit.

use std::collections::HashSet;

use crate::models::SlotPlacement;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Weekday index greater than 6.
    WeekdayOutOfRange,
    /// An identifier field is empty.
    EmptyIdentifier,
    /// Two placements are structurally identical.
    DuplicatePlacement,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a candidate placement set.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_placements(placements: &[SlotPlacement]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen: HashSet<(u8, &str, &str, &str, &str)> = HashSet::new();

    for (i, p) in placements.iter().enumerate() {
        if p.weekday > 6 {
            errors.push(ValidationError::new(
                ValidationErrorKind::WeekdayOutOfRange,
                format!("Placement #{i} has weekday {} (valid: 0-6)", p.weekday),
            ));
        }

        for (field, value) in [
            ("institution_id", &p.institution_id),
            ("shift_id", &p.shift_id),
            ("slot_id", &p.slot_id),
            ("class_id", &p.class_id),
        ] {
            if value.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyIdentifier,
                    format!("Placement #{i} has empty {field}"),
                ));
            }
        }

        let key = (
            p.weekday,
            p.institution_id.as_str(),
            p.shift_id.as_str(),
            p.slot_id.as_str(),
            p.class_id.as_str(),
        );
        if !seen.insert(key) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePlacement,
                format!(
                    "Duplicate placement: weekday {} {}/{}/{} class {}",
                    p.weekday, p.institution_id, p.shift_id, p.slot_id, p.class_id
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
