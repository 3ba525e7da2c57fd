//! Reviewer session and transactional commit.
//!
//! A session is the in-memory state of one schedule edit under review:
//! the pending version, the audit change list, the scanned orphans,
//! and one decision per orphan. Decisions start as the mapper's
//! suggestions and can be overridden any number of times with no side
//! effects; dropping the session discards everything. `commit` applies
//! the version and every record mutation together, or nothing at all.
//!
//! The session is plain serializable data, independent of any front
//! end — a dialog, CLI, or batch API can all drive the same object.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::diff;
use super::mapper::{SlotMapper, SuggestionKind};
use super::orphans::{self, OrphanScan, OrphanSource};
use crate::error::{Result, TimetableError};
use crate::models::{
    LessonKind, RecordStatus, ScheduleChange, ScheduleVersion, SlotCatalog, SlotPlacement,
};
use crate::store::{RecordStore, VersionStore};

/// Marker appended to a cancelled event's title on removal.
const CANCELLED_MARKER: &str = " [cancelled]";

/// The version awaiting commit: a brand new snapshot or a replacement
/// placement list for an already committed version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PendingVersion {
    /// A new version to insert.
    New {
        /// Id for the new version.
        id: String,
        /// First date the new version governs.
        effective_from: NaiveDate,
        /// Full placement list.
        placements: Vec<SlotPlacement>,
    },
    /// An edit of an existing version's placement list.
    Edit {
        /// Id of the version being edited.
        version_id: String,
        /// Replacement placement list.
        placements: Vec<SlotPlacement>,
    },
}

impl PendingVersion {
    fn placements(&self) -> &[SlotPlacement] {
        match self {
            PendingVersion::New { placements, .. } | PendingVersion::Edit { placements, .. } => {
                placements
            }
        }
    }
}

/// Reviewer decision for one orphan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Decision {
    /// Move the record to a new date and slot, content untouched.
    Move {
        /// Target date.
        date: NaiveDate,
        /// Target slot.
        slot_id: String,
        /// Target start time.
        start_time: Option<NaiveTime>,
        /// Target end time.
        end_time: Option<NaiveTime>,
    },
    /// Clear the slot reference and leave the record unscheduled,
    /// optionally on a reviewer-chosen date.
    Unscheduled {
        /// Custom date, `None` keeps the original.
        date: Option<NaiveDate>,
    },
    /// Soft-remove the record.
    Remove,
}

impl From<&SuggestionKind> for Decision {
    fn from(kind: &SuggestionKind) -> Self {
        match kind {
            SuggestionKind::Move {
                date,
                slot_id,
                start_time,
                end_time,
            } => Decision::Move {
                date: *date,
                slot_id: slot_id.clone(),
                start_time: *start_time,
                end_time: *end_time,
            },
            SuggestionKind::Unscheduled => Decision::Unscheduled { date: None },
        }
    }
}

/// One schedule edit under review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationSession {
    pending: Option<PendingVersion>,
    effective_from: NaiveDate,
    changes: Vec<ScheduleChange>,
    orphans: OrphanScan,
    decisions: BTreeMap<String, Decision>,
}

impl MigrationSession {
    /// Analyzes a schedule edit and builds the review session.
    ///
    /// Runs the full pipeline: diff the old and new placement sets,
    /// scope to the modified institutions, scan for orphans there, and
    /// seed one decision per orphan from the mapper's suggestions.
    /// For a `New` version the old set is whatever governs the
    /// effective date today; for an `Edit` it is the version's
    /// previously committed list.
    pub fn plan(
        store: &VersionStore,
        records: &RecordStore,
        catalog: &SlotCatalog,
        pending: PendingVersion,
        mapper: &dyn SlotMapper,
    ) -> Result<Self> {
        let (effective_from, old) = match &pending {
            PendingVersion::New { effective_from, .. } => {
                (*effective_from, store.placements_for(*effective_from).to_vec())
            }
            PendingVersion::Edit { version_id, .. } => {
                let version = store
                    .version(version_id)
                    .ok_or_else(|| TimetableError::UnknownVersion(version_id.clone()))?;
                (version.effective_from, version.placements.clone())
            }
        };
        let new = pending.placements();

        let modified = diff::modified_institutions(&old, new);
        let changes = diff::class_changes(&old, new);
        let scan = orphans::scan(records, new, effective_from, &modified);

        let mut decisions = BTreeMap::new();
        for list in [&scan.lessons, &scan.events] {
            for suggestion in mapper.suggest(list, new, catalog, effective_from) {
                decisions.insert(suggestion.orphan.id.clone(), Decision::from(&suggestion.kind));
            }
        }

        tracing::debug!(
            mapper = mapper.name(),
            institutions = modified.len(),
            orphans = scan.total(),
            "migration planned"
        );

        Ok(Self {
            pending: Some(pending),
            effective_from,
            changes,
            orphans: scan,
            decisions,
        })
    }

    /// First date the pending version will govern.
    pub fn effective_from(&self) -> NaiveDate {
        self.effective_from
    }

    /// Audit change list for display.
    pub fn changes(&self) -> &[ScheduleChange] {
        &self.changes
    }

    /// Orphans found by the scan.
    pub fn orphans(&self) -> &OrphanScan {
        &self.orphans
    }

    /// Current decision for a record.
    pub fn decision(&self, record_id: &str) -> Option<&Decision> {
        self.decisions.get(record_id)
    }

    /// All current decisions.
    pub fn decisions(&self) -> &BTreeMap<String, Decision> {
        &self.decisions
    }

    /// Overrides the decision for one orphan.
    ///
    /// May be called any number of times before commit; has no effect
    /// on any store. Fails for ids the scan did not flag.
    pub fn set_decision(&mut self, record_id: &str, decision: Decision) -> Result<()> {
        if self.orphans.find(record_id).is_none() {
            return Err(TimetableError::UnknownRecord(record_id.to_string()));
        }
        self.decisions.insert(record_id.to_string(), decision);
        Ok(())
    }

    /// Applies the pending version and every decision atomically.
    ///
    /// Everything is validated before anything is written: the version
    /// invariants (unique effective date, known version id for edits)
    /// and every decided record's existence. Any failure leaves both
    /// stores exactly as they were.
    pub fn commit(
        mut self,
        store: &mut VersionStore,
        records: &mut RecordStore,
    ) -> Result<CommitSummary> {
        let pending = self
            .pending
            .take()
            .ok_or(TimetableError::MissingPendingVersion)?;

        // Validation phase: no mutation until every check passes.
        match &pending {
            PendingVersion::New { effective_from, .. } => {
                if store.contains_effective_from(*effective_from) {
                    return Err(TimetableError::DuplicateEffectiveFrom(*effective_from));
                }
            }
            PendingVersion::Edit { version_id, .. } => {
                if store.version(version_id).is_none() {
                    return Err(TimetableError::UnknownVersion(version_id.clone()));
                }
            }
        }
        // Every orphan must carry a decision. Mapper strategies are
        // replaceable, so this cannot be assumed from construction.
        for orphan in self.orphans.iter() {
            if !self.decisions.contains_key(&orphan.id) {
                return Err(TimetableError::UndecidedOrphan(orphan.id.clone()));
            }
        }
        for id in self.decisions.keys() {
            let orphan = self
                .orphans
                .find(id)
                .ok_or_else(|| TimetableError::UnknownRecord(id.clone()))?;
            let exists = match orphan.source {
                OrphanSource::Lesson => records.lesson(id).is_some(),
                OrphanSource::Event => records.event(id).is_some(),
            };
            if !exists {
                return Err(TimetableError::UnknownRecord(id.clone()));
            }
        }

        // Apply phase: infallible after validation.
        let mut summary = CommitSummary::default();
        for (id, decision) in &self.decisions {
            let source = self.orphans.find(id).map(|o| o.source);
            match source {
                Some(OrphanSource::Lesson) => {
                    if let Some(lesson) = records.lesson_mut(id) {
                        apply_to_lesson(lesson, decision, &mut summary);
                    }
                }
                Some(OrphanSource::Event) => {
                    if let Some(event) = records.event_mut(id) {
                        apply_to_event(event, decision, &mut summary);
                    }
                }
                None => {}
            }
        }

        let version_id = match pending {
            PendingVersion::New {
                id,
                effective_from,
                placements,
            } => {
                let version =
                    ScheduleVersion::new(id.clone(), effective_from).with_placements(placements);
                store.insert(version)?;
                id
            }
            PendingVersion::Edit {
                version_id,
                placements,
            } => {
                store.replace_placements(&version_id, placements)?;
                version_id
            }
        };
        summary.version_id = version_id;

        tracing::info!(
            version = %summary.version_id,
            moved = summary.moved,
            unscheduled = summary.unscheduled,
            removed = summary.removed,
            "migration committed"
        );
        Ok(summary)
    }
}

/// What a commit did, for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitSummary {
    /// Id of the committed version.
    pub version_id: String,
    /// Records moved to a new date/slot.
    pub moved: usize,
    /// Records left unscheduled.
    pub unscheduled: usize,
    /// Records soft-removed.
    pub removed: usize,
}

fn apply_to_lesson(
    lesson: &mut crate::models::LessonRecord,
    decision: &Decision,
    summary: &mut CommitSummary,
) {
    match decision {
        Decision::Move {
            date,
            slot_id,
            start_time,
            end_time,
        } => {
            lesson.date = *date;
            lesson.slot_id = Some(slot_id.clone());
            lesson.start_time = *start_time;
            lesson.end_time = *end_time;
            summary.moved += 1;
        }
        Decision::Unscheduled { date } => {
            lesson.slot_id = None;
            lesson.kind = LessonKind::Extra;
            if let Some(d) = date {
                lesson.date = *d;
            }
            summary.unscheduled += 1;
        }
        Decision::Remove => {
            lesson.status = RecordStatus::Removed;
            summary.removed += 1;
        }
    }
}

fn apply_to_event(
    event: &mut crate::models::DatedEvent,
    decision: &Decision,
    summary: &mut CommitSummary,
) {
    match decision {
        Decision::Move {
            date,
            slot_id,
            start_time,
            end_time,
        } => {
            event.date = *date;
            event.slot_id = Some(slot_id.clone());
            event.start_time = *start_time;
            event.end_time = *end_time;
            summary.moved += 1;
        }
        Decision::Unscheduled { date } => {
            event.slot_id = None;
            if let Some(d) = date {
                event.date = *d;
            }
            summary.unscheduled += 1;
        }
        Decision::Remove => {
            event.status = RecordStatus::Removed;
            event.title.push_str(CANCELLED_MARKER);
            summary.removed += 1;
        }
    }
}
