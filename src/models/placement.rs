//! Weekly slot placement model.
//!
//! A placement is one recurring lesson position in the weekly grid:
//! a (weekday, shift, slot) coordinate assigned to one class of one
//! institution. A committed schedule version is a flat list of these.
//!
//! # Weekday Convention
//! Weekdays are indexed 0–6 with 0 = Monday, matching
//! `chrono::Weekday::num_days_from_monday`.

use serde::{Deserialize, Serialize};

/// One weekly recurring lesson position.
///
/// Immutable once part of a committed version. A class may have zero
/// or more placements per week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPlacement {
    /// Weekday index (0 = Monday .. 6 = Sunday).
    pub weekday: u8,
    /// Owning institution.
    pub institution_id: String,
    /// Shift within the institution (morning/afternoon).
    pub shift_id: String,
    /// Slot (period) within the shift.
    pub slot_id: String,
    /// Class taught in this position.
    pub class_id: String,
}

impl SlotPlacement {
    /// Creates a new placement.
    pub fn new(
        weekday: u8,
        institution_id: impl Into<String>,
        shift_id: impl Into<String>,
        slot_id: impl Into<String>,
        class_id: impl Into<String>,
    ) -> Self {
        Self {
            weekday,
            institution_id: institution_id.into(),
            shift_id: shift_id.into(),
            slot_id: slot_id.into(),
            class_id: class_id.into(),
        }
    }

    /// Whether this placement covers the given record coordinates.
    ///
    /// This is the orphan test: a dated record matches the weekly grid
    /// iff some placement agrees on institution, class, slot, and the
    /// weekday of the record's date.
    pub fn covers(&self, institution_id: &str, class_id: &str, slot_id: &str, weekday: u8) -> bool {
        self.weekday == weekday
            && self.institution_id == institution_id
            && self.class_id == class_id
            && self.slot_id == slot_id
    }

    /// Sort key for positional pairing: (weekday, slot_id).
    pub fn grid_key(&self) -> (u8, &str) {
        (self.weekday, self.slot_id.as_str())
    }
}

/// Audit description of one class's positional reassignment between
/// two placement sets.
///
/// Derived by positional pairing (see `migration::diff::class_changes`)
/// and never persisted. A `None` side means the class gained or lost a
/// weekly lesson rather than moving one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleChange {
    /// Institution the class belongs to.
    pub institution_id: String,
    /// Affected class.
    pub class_id: String,
    /// Previous position, `None` if the lesson was added.
    pub old_slot: Option<SlotPlacement>,
    /// New position, `None` if the lesson was dropped.
    pub new_slot: Option<SlotPlacement>,
}

impl ScheduleChange {
    /// Creates a change entry for one class.
    pub fn new(
        institution_id: impl Into<String>,
        class_id: impl Into<String>,
        old_slot: Option<SlotPlacement>,
        new_slot: Option<SlotPlacement>,
    ) -> Self {
        Self {
            institution_id: institution_id.into(),
            class_id: class_id.into(),
            old_slot,
            new_slot,
        }
    }

    /// Whether this change moves an existing lesson (both sides present).
    pub fn is_move(&self) -> bool {
        self.old_slot.is_some() && self.new_slot.is_some()
    }
}
