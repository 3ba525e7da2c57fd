//! Slot catalog: institution → shift → slot definitions.
//!
//! The catalog resolves a placement's (institution, shift, slot)
//! coordinates into concrete start/end times. It is read-only input to
//! the migration flow; slot CRUD lives outside this crate.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A named time interval within a shift (class period or break).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDef {
    /// Slot identifier, unique within its shift.
    pub id: String,
    /// Display name ("1st period").
    pub name: String,
    /// Start of the interval.
    pub start_time: NaiveTime,
    /// End of the interval.
    pub end_time: NaiveTime,
}

impl SlotDef {
    /// Creates a slot definition.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_time,
            end_time,
        }
    }
}

/// A shift (morning/afternoon block) holding an ordered slot list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Shift identifier, unique within its institution.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Slots in timetable order.
    pub slots: Vec<SlotDef>,
}

impl Shift {
    /// Creates an empty shift.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slots: Vec::new(),
        }
    }

    /// Adds a slot.
    pub fn with_slot(mut self, slot: SlotDef) -> Self {
        self.slots.push(slot);
        self
    }
}

/// An institution with its shifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    /// Institution identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Shifts operated by this institution.
    pub shifts: Vec<Shift>,
}

impl Institution {
    /// Creates an institution with no shifts.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            shifts: Vec::new(),
        }
    }

    /// Adds a shift.
    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shifts.push(shift);
        self
    }
}

/// Lookup table from placement coordinates to slot time definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotCatalog {
    /// Known institutions.
    pub institutions: Vec<Institution>,
}

impl SlotCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an institution.
    pub fn with_institution(mut self, institution: Institution) -> Self {
        self.institutions.push(institution);
        self
    }

    /// Resolves (institution, shift, slot) to a slot definition.
    ///
    /// Returns `None` when any coordinate is unknown; callers fall
    /// back to the record's own times in that case.
    pub fn resolve(&self, institution_id: &str, shift_id: &str, slot_id: &str) -> Option<&SlotDef> {
        self.institutions
            .iter()
            .find(|i| i.id == institution_id)?
            .shifts
            .iter()
            .find(|s| s.id == shift_id)?
            .slots
            .iter()
            .find(|s| s.id == slot_id)
    }
}
