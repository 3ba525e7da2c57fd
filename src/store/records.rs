//! In-process record store for lessons and dated events.
//!
//! Flat collections with the query surface the migration flow needs:
//! lookup by id regardless of status, active-only range queries, and
//! institution-scoped views for orphan scanning. Mutation happens only
//! through the migration commit path.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::{DatedEvent, LessonRecord};

/// Flat record collections with denormalized identifiers.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    lessons: Vec<LessonRecord>,
    events: Vec<DatedEvent>,
}

impl RecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a lesson record.
    pub fn with_lesson(mut self, lesson: LessonRecord) -> Self {
        self.lessons.push(lesson);
        self
    }

    /// Adds a dated event.
    pub fn with_event(mut self, event: DatedEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Adds a lesson record.
    pub fn add_lesson(&mut self, lesson: LessonRecord) {
        self.lessons.push(lesson);
    }

    /// Adds a dated event.
    pub fn add_event(&mut self, event: DatedEvent) {
        self.events.push(event);
    }

    /// Looks up a lesson by id, regardless of status.
    pub fn lesson(&self, id: &str) -> Option<&LessonRecord> {
        self.lessons.iter().find(|l| l.id == id)
    }

    /// Looks up an event by id, regardless of status.
    pub fn event(&self, id: &str) -> Option<&DatedEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Active lessons with `from <= date <= to`.
    pub fn lessons_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&LessonRecord> {
        self.lessons
            .iter()
            .filter(|l| l.is_active() && l.date >= from && l.date <= to)
            .collect()
    }

    /// Active events with `from <= date <= to`.
    pub fn events_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&DatedEvent> {
        self.events
            .iter()
            .filter(|e| e.is_active() && e.date >= from && e.date <= to)
            .collect()
    }

    /// Active lessons belonging to the given institutions.
    pub fn lessons_for_institutions(&self, institutions: &BTreeSet<String>) -> Vec<&LessonRecord> {
        self.lessons
            .iter()
            .filter(|l| l.is_active() && institutions.contains(&l.institution_id))
            .collect()
    }

    /// Active events belonging to the given institutions.
    pub fn events_for_institutions(&self, institutions: &BTreeSet<String>) -> Vec<&DatedEvent> {
        self.events
            .iter()
            .filter(|e| e.is_active() && institutions.contains(&e.institution_id))
            .collect()
    }

    /// Number of lesson records, any status.
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    /// Number of events, any status.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn lesson_mut(&mut self, id: &str) -> Option<&mut LessonRecord> {
        self.lessons.iter_mut().find(|l| l.id == id)
    }

    pub(crate) fn event_mut(&mut self, id: &str) -> Option<&mut DatedEvent> {
        self.events.iter_mut().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_store() -> RecordStore {
        RecordStore::new()
            .with_lesson(LessonRecord::new("l1", date(2026, 2, 9), "school-1", "7A"))
            .with_lesson(LessonRecord::new("l2", date(2026, 2, 11), "school-1", "7A"))
            .with_lesson(LessonRecord::new("l3", date(2026, 2, 11), "school-2", "3B"))
            .with_event(DatedEvent::new("e1", date(2026, 2, 10), "school-1"))
    }

    #[test]
    fn test_lookup_by_id() {
        let store = sample_store();
        assert_eq!(store.lesson("l2").unwrap().date, date(2026, 2, 11));
        assert!(store.lesson("l9").is_none());
        assert_eq!(store.event("e1").unwrap().institution_id, "school-1");
    }

    #[test]
    fn test_range_query_excludes_removed() {
        let mut store = sample_store();
        store.lesson_mut("l1").unwrap().status = RecordStatus::Removed;

        let active = store.lessons_in_range(date(2026, 2, 9), date(2026, 2, 15));
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|l| l.id != "l1"));

        // Still retrievable by id after removal.
        assert_eq!(store.lesson("l1").unwrap().status, RecordStatus::Removed);
    }

    #[test]
    fn test_institution_scoped_queries() {
        let store = sample_store();
        let scope: BTreeSet<String> = ["school-1".to_string()].into();

        let lessons = store.lessons_for_institutions(&scope);
        assert_eq!(lessons.len(), 2);
        assert!(lessons.iter().all(|l| l.institution_id == "school-1"));

        let events = store.events_for_institutions(&scope);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let store = sample_store();
        let hits = store.lessons_in_range(date(2026, 2, 11), date(2026, 2, 11));
        assert_eq!(hits.len(), 2);
    }
}
