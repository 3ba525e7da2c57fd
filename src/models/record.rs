//! Dated record models: lesson logs and slot-bound events.
//!
//! A record is one concrete, dated occurrence — a diary entry for a
//! lesson that happened (or is planned), or an assessment/blocking
//! event pinned to a slot. Records carry denormalized institution,
//! class, and slot identifiers so they can be checked against the
//! weekly grid without joins.
//!
//! Records are never physically deleted: removal flips `status` to
//! `Removed` so history stays queryable across migrations.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// How a lesson occurrence relates to the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonKind {
    /// Regular occurrence of a weekly placement.
    Regular,
    /// Unscheduled lesson outside the grid; exempt from orphan scans.
    Extra,
    /// Substitute-taught occurrence of a weekly placement.
    Substitution,
}

/// Soft-delete flag shared by all record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Visible in active views and subject to migration.
    Active,
    /// Soft-removed; retained for history, excluded from active views.
    Removed,
}

/// One dated lesson occurrence (diary log entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRecord {
    /// Unique record identifier.
    pub id: String,
    /// Calendar date of the occurrence.
    pub date: NaiveDate,
    /// Owning institution.
    pub institution_id: String,
    /// Class taught.
    pub class_id: String,
    /// Slot reference into the weekly grid. `None` = unscheduled.
    pub slot_id: Option<String>,
    /// Start time, if recorded.
    pub start_time: Option<NaiveTime>,
    /// End time, if recorded.
    pub end_time: Option<NaiveTime>,
    /// Subject taught.
    pub subject: String,
    /// Topic covered.
    pub topic: String,
    /// Homework assigned.
    pub homework: String,
    /// Relation to the weekly grid.
    pub kind: LessonKind,
    /// Soft-delete flag.
    pub status: RecordStatus,
}

impl LessonRecord {
    /// Creates an active, regular lesson record.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        institution_id: impl Into<String>,
        class_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            institution_id: institution_id.into(),
            class_id: class_id.into(),
            slot_id: None,
            start_time: None,
            end_time: None,
            subject: String::new(),
            topic: String::new(),
            homework: String::new(),
            kind: LessonKind::Regular,
            status: RecordStatus::Active,
        }
    }

    /// Sets the slot reference.
    pub fn with_slot(mut self, slot_id: impl Into<String>) -> Self {
        self.slot_id = Some(slot_id.into());
        self
    }

    /// Sets start and end times.
    pub fn with_times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Sets the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the topic.
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Sets the homework text.
    pub fn with_homework(mut self, homework: impl Into<String>) -> Self {
        self.homework = homework.into();
        self
    }

    /// Sets the lesson kind.
    pub fn with_kind(mut self, kind: LessonKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this record is active (not soft-removed).
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }

    /// Whether this record is tied to the weekly grid and therefore
    /// subject to orphan scanning.
    pub fn is_slot_bound(&self) -> bool {
        self.slot_id.is_some() && self.kind != LessonKind::Extra
    }
}

/// A dated assessment or blocking event.
///
/// Migrated like a lesson record only when both `class_id` and
/// `slot_id` are set, i.e. the event is pinned to a specific recurring
/// slot. Free-floating events (whole-institution dates) are left alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedEvent {
    /// Unique event identifier.
    pub id: String,
    /// Calendar date of the event.
    pub date: NaiveDate,
    /// Owning institution.
    pub institution_id: String,
    /// Affected class, if slot-bound.
    pub class_id: Option<String>,
    /// Slot reference, if slot-bound.
    pub slot_id: Option<String>,
    /// Event title.
    pub title: String,
    /// Start time, if any.
    pub start_time: Option<NaiveTime>,
    /// End time, if any.
    pub end_time: Option<NaiveTime>,
    /// Soft-delete flag.
    pub status: RecordStatus,
}

impl DatedEvent {
    /// Creates an active event.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        institution_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            institution_id: institution_id.into(),
            class_id: None,
            slot_id: None,
            title: String::new(),
            start_time: None,
            end_time: None,
            status: RecordStatus::Active,
        }
    }

    /// Pins the event to a class and slot.
    pub fn with_slot(mut self, class_id: impl Into<String>, slot_id: impl Into<String>) -> Self {
        self.class_id = Some(class_id.into());
        self.slot_id = Some(slot_id.into());
        self
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets start and end times.
    pub fn with_times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Whether this event is active (not soft-removed).
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }

    /// Whether the event is pinned to a recurring slot (both class and
    /// slot set) and therefore subject to migration.
    pub fn is_slot_bound(&self) -> bool {
        self.class_id.is_some() && self.slot_id.is_some()
    }
}
