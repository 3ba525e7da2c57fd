//! Schedule version model.
//!
//! A version is a dated snapshot of the full weekly grid: every slot
//! placement of every institution, active from its effective date until
//! superseded by a later version. Resolution and ordering invariants
//! are enforced by `store::VersionStore`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::SlotPlacement;

/// A dated snapshot of all weekly slot placements.
///
/// Versions are totally ordered by `effective_from`, which is unique
/// across the store. A version's placement list is replaced as a whole
/// (through the migration flow), never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleVersion {
    /// Unique version identifier.
    pub id: String,
    /// First date this version governs.
    pub effective_from: NaiveDate,
    /// Full weekly grid at this version.
    pub placements: Vec<SlotPlacement>,
}

impl ScheduleVersion {
    /// Creates an empty version effective from the given date.
    pub fn new(id: impl Into<String>, effective_from: NaiveDate) -> Self {
        Self {
            id: id.into(),
            effective_from,
            placements: Vec::new(),
        }
    }

    /// Adds one placement.
    pub fn with_placement(mut self, placement: SlotPlacement) -> Self {
        self.placements.push(placement);
        self
    }

    /// Sets the full placement list.
    pub fn with_placements(mut self, placements: Vec<SlotPlacement>) -> Self {
        self.placements = placements;
        self
    }

    /// Placements belonging to one class.
    pub fn placements_for_class<'a>(
        &'a self,
        institution_id: &'a str,
        class_id: &'a str,
    ) -> impl Iterator<Item = &'a SlotPlacement> {
        self.placements
            .iter()
            .filter(move |p| p.institution_id == institution_id && p.class_id == class_id)
    }

    /// Number of placements in this version.
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }
}
