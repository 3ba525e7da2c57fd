//! Ordered schedule version store.
//!
//! Holds all committed versions sorted by effective date and resolves
//! which version governs any calendar date.
//!
//! # Resolution
//! `active_version(d)` returns the version with the greatest
//! `effective_from` ≤ d. Dates before the first version resolve to the
//! earliest version (pre-history fallback), so every date maps to
//! *some* grid once at least one version exists. Resolution is a
//! binary search over the sorted list.

use chrono::NaiveDate;

use crate::error::{Result, TimetableError};
use crate::models::{ScheduleVersion, SlotPlacement};

/// Ordered collection of schedule versions.
///
/// The `legacy` placement list serves the bootstrap state: consumers
/// that predate versioning keep a single flat grid, used by
/// `placements_for` until the first version is committed.
#[derive(Debug, Clone, Default)]
pub struct VersionStore {
    versions: Vec<ScheduleVersion>,
    legacy: Vec<SlotPlacement>,
}

impl VersionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store in the bootstrap state: no versions, one flat
    /// placement list.
    pub fn with_legacy_placements(placements: Vec<SlotPlacement>) -> Self {
        Self {
            versions: Vec::new(),
            legacy: placements,
        }
    }

    /// Inserts a version, keeping the list sorted by effective date.
    ///
    /// Rejects a duplicate `effective_from` before any mutation.
    pub fn insert(&mut self, version: ScheduleVersion) -> Result<()> {
        match self.position_of(version.effective_from) {
            Ok(_) => Err(TimetableError::DuplicateEffectiveFrom(version.effective_from)),
            Err(idx) => {
                self.versions.insert(idx, version);
                Ok(())
            }
        }
    }

    /// Whether a version with this effective date exists.
    pub fn contains_effective_from(&self, effective_from: NaiveDate) -> bool {
        self.position_of(effective_from).is_ok()
    }

    /// The version governing the given date.
    ///
    /// Greatest `effective_from` ≤ `date`; falls back to the earliest
    /// version for pre-history dates. `None` only when the store holds
    /// no versions at all.
    pub fn active_version(&self, date: NaiveDate) -> Option<&ScheduleVersion> {
        let after = self
            .versions
            .partition_point(|v| v.effective_from <= date);
        match after {
            0 => self.versions.first(),
            n => Some(&self.versions[n - 1]),
        }
    }

    /// Placements active on the given date.
    ///
    /// Resolves through `active_version`; in the bootstrap state
    /// (no versions) returns the legacy flat list.
    pub fn placements_for(&self, date: NaiveDate) -> &[SlotPlacement] {
        match self.active_version(date) {
            Some(v) => &v.placements,
            None => &self.legacy,
        }
    }

    /// Looks up a version by id.
    pub fn version(&self, id: &str) -> Option<&ScheduleVersion> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// Replaces a version's placement list in place.
    ///
    /// The version keeps its id and effective date; this is the edit
    /// path, driven by the migration flow.
    pub fn replace_placements(&mut self, id: &str, placements: Vec<SlotPlacement>) -> Result<()> {
        match self.versions.iter_mut().find(|v| v.id == id) {
            Some(v) => {
                v.placements = placements;
                Ok(())
            }
            None => Err(TimetableError::UnknownVersion(id.to_string())),
        }
    }

    /// The most recent version, if any.
    pub fn latest(&self) -> Option<&ScheduleVersion> {
        self.versions.last()
    }

    /// Versions in effective-date order.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduleVersion> {
        self.versions.iter()
    }

    /// Number of committed versions.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether no versions have been committed.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    fn position_of(&self, effective_from: NaiveDate) -> std::result::Result<usize, usize> {
        self.versions
            .binary_search_by(|v| v.effective_from.cmp(&effective_from))
    }
}
