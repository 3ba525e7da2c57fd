//! Orphan detection.
//!
//! An orphan is a dated record that, on its own date, no longer
//! matches any placement in the schedule that governs that date. The
//! scan only ever looks at institutions the change detector flagged:
//! records of untouched institutions are invisible to it by
//! construction.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::weekdate::weekday_index;
use crate::models::SlotPlacement;
use crate::store::RecordStore;

/// Which collection an orphan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanSource {
    /// A diary lesson record.
    Lesson,
    /// A slot-bound dated event.
    Event,
}

/// One record flagged by the scan, carrying the coordinates the
/// mapper needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orphan {
    /// Originating collection.
    pub source: OrphanSource,
    /// Record id.
    pub id: String,
    /// Owning institution.
    pub institution_id: String,
    /// Affected class.
    pub class_id: String,
    /// The now-dangling slot reference.
    pub slot_id: String,
    /// Record date.
    pub date: NaiveDate,
    /// Original start time, if recorded.
    pub start_time: Option<NaiveTime>,
    /// Original end time, if recorded.
    pub end_time: Option<NaiveTime>,
}

/// Scan output: lessons and events, detected by the same test but kept
/// apart because their commit mutations differ.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrphanScan {
    /// Orphaned lesson records.
    pub lessons: Vec<Orphan>,
    /// Orphaned slot-bound events.
    pub events: Vec<Orphan>,
}

impl OrphanScan {
    /// Total orphans across both lists.
    pub fn total(&self) -> usize {
        self.lessons.len() + self.events.len()
    }

    /// Whether the scan found nothing.
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty() && self.events.is_empty()
    }

    /// All orphans, lessons first.
    pub fn iter(&self) -> impl Iterator<Item = &Orphan> {
        self.lessons.iter().chain(self.events.iter())
    }

    /// Finds an orphan by record id.
    pub fn find(&self, id: &str) -> Option<&Orphan> {
        self.iter().find(|o| o.id == id)
    }
}

/// Finds records desynchronized from the given placement set.
///
/// A lesson is an orphan iff its date is on or after `effective_from`,
/// it is active, slot-bound (has a slot reference and is not an extra
/// lesson), its institution is in `modified`, and no placement covers
/// its (institution, class, slot, weekday-of-date). Events use the
/// same test and additionally need both class and slot set.
pub fn scan(
    records: &RecordStore,
    placements: &[SlotPlacement],
    effective_from: NaiveDate,
    modified: &BTreeSet<String>,
) -> OrphanScan {
    let mut result = OrphanScan::default();

    for lesson in records.lessons_for_institutions(modified) {
        if lesson.date < effective_from || !lesson.is_slot_bound() {
            continue;
        }
        let slot_id = match &lesson.slot_id {
            Some(s) => s,
            None => continue,
        };
        if !is_covered(
            placements,
            &lesson.institution_id,
            &lesson.class_id,
            slot_id,
            lesson.date,
        ) {
            result.lessons.push(Orphan {
                source: OrphanSource::Lesson,
                id: lesson.id.clone(),
                institution_id: lesson.institution_id.clone(),
                class_id: lesson.class_id.clone(),
                slot_id: slot_id.clone(),
                date: lesson.date,
                start_time: lesson.start_time,
                end_time: lesson.end_time,
            });
        }
    }

    for event in records.events_for_institutions(modified) {
        if event.date < effective_from || !event.is_slot_bound() {
            continue;
        }
        let (class_id, slot_id) = match (&event.class_id, &event.slot_id) {
            (Some(c), Some(s)) => (c, s),
            _ => continue,
        };
        if !is_covered(placements, &event.institution_id, class_id, slot_id, event.date) {
            result.events.push(Orphan {
                source: OrphanSource::Event,
                id: event.id.clone(),
                institution_id: event.institution_id.clone(),
                class_id: class_id.clone(),
                slot_id: slot_id.clone(),
                date: event.date,
                start_time: event.start_time,
                end_time: event.end_time,
            });
        }
    }

    result
}

fn is_covered(
    placements: &[SlotPlacement],
    institution_id: &str,
    class_id: &str,
    slot_id: &str,
    date: NaiveDate,
) -> bool {
    let weekday = weekday_index(date);
    placements
        .iter()
        .any(|p| p.covers(institution_id, class_id, slot_id, weekday))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DatedEvent, LessonKind, LessonRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scope(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    // New grid: 7A on Tuesday slot-1 only.
    fn new_placements() -> Vec<SlotPlacement> {
        vec![SlotPlacement::new(1, "s1", "morning", "slot-1", "7A")]
    }

    #[test]
    fn test_monday_lesson_orphaned() {
        // 2026-02-09 is a Monday; the new grid has no Monday placement.
        let records = RecordStore::new().with_lesson(
            LessonRecord::new("l1", date(2026, 2, 9), "s1", "7A").with_slot("slot-1"),
        );

        let scan = scan(&records, &new_placements(), date(2026, 2, 9), &scope(&["s1"]));
        assert_eq!(scan.lessons.len(), 1);
        assert_eq!(scan.lessons[0].id, "l1");
        assert_eq!(scan.lessons[0].source, OrphanSource::Lesson);
    }

    #[test]
    fn test_matching_lesson_not_orphaned() {
        // 2026-02-10 is a Tuesday and the grid has 7A Tuesday slot-1.
        let records = RecordStore::new().with_lesson(
            LessonRecord::new("l1", date(2026, 2, 10), "s1", "7A").with_slot("slot-1"),
        );

        let scan = scan(&records, &new_placements(), date(2026, 2, 9), &scope(&["s1"]));
        assert!(scan.is_empty());
    }

    #[test]
    fn test_unmodified_institution_never_flagged() {
        // s2 has a hopelessly mismatched record, but is out of scope.
        let records = RecordStore::new().with_lesson(
            LessonRecord::new("l1", date(2026, 2, 9), "s2", "3B").with_slot("slot-9"),
        );

        let scan = scan(&records, &new_placements(), date(2026, 2, 9), &scope(&["s1"]));
        assert!(scan.is_empty());
    }

    #[test]
    fn test_records_before_effective_date_skipped() {
        let records = RecordStore::new().with_lesson(
            LessonRecord::new("l1", date(2026, 2, 2), "s1", "7A").with_slot("slot-1"),
        );

        let scan = scan(&records, &new_placements(), date(2026, 2, 9), &scope(&["s1"]));
        assert!(scan.is_empty());
    }

    #[test]
    fn test_extra_and_unscheduled_lessons_skipped() {
        let records = RecordStore::new()
            .with_lesson(
                LessonRecord::new("extra", date(2026, 2, 9), "s1", "7A")
                    .with_slot("slot-1")
                    .with_kind(LessonKind::Extra),
            )
            .with_lesson(LessonRecord::new("no-slot", date(2026, 2, 9), "s1", "7A"));

        let scan = scan(&records, &new_placements(), date(2026, 2, 9), &scope(&["s1"]));
        assert!(scan.is_empty());
    }

    #[test]
    fn test_event_needs_class_and_slot() {
        let records = RecordStore::new()
            .with_event(DatedEvent::new("free", date(2026, 2, 9), "s1").with_title("Open day"))
            .with_event(
                DatedEvent::new("pinned", date(2026, 2, 9), "s1")
                    .with_slot("7A", "slot-1")
                    .with_title("Test"),
            );

        let scan = scan(&records, &new_placements(), date(2026, 2, 9), &scope(&["s1"]));
        assert_eq!(scan.events.len(), 1);
        assert_eq!(scan.events[0].id, "pinned");
        assert_eq!(scan.events[0].source, OrphanSource::Event);
    }

    #[test]
    fn test_substitution_lessons_scanned() {
        let records = RecordStore::new().with_lesson(
            LessonRecord::new("sub", date(2026, 2, 9), "s1", "7A")
                .with_slot("slot-1")
                .with_kind(LessonKind::Substitution),
        );

        let scan = scan(&records, &new_placements(), date(2026, 2, 9), &scope(&["s1"]));
        assert_eq!(scan.lessons.len(), 1);
    }

    #[test]
    fn test_scan_find_and_total() {
        let records = RecordStore::new()
            .with_lesson(
                LessonRecord::new("l1", date(2026, 2, 9), "s1", "7A").with_slot("slot-1"),
            )
            .with_event(
                DatedEvent::new("e1", date(2026, 2, 9), "s1").with_slot("7A", "slot-1"),
            );

        let scan = scan(&records, &new_placements(), date(2026, 2, 9), &scope(&["s1"]));
        assert_eq!(scan.total(), 2);
        assert!(scan.find("e1").is_some());
        assert!(scan.find("nope").is_none());
    }
}
