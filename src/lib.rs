//! Weekly timetable versioning and migration engine.
//!
//! Manages recurring weekly class timetables that change over time and
//! reconciles previously recorded lesson entries with each new version
//! of the grid. The flow: a schedule edit is diffed against the
//! committed grid, affected institutions are scoped, dated records
//! that no longer match ("orphans") are scanned, a deterministic
//! mapper suggests where each should move, and a reviewer's final
//! decisions are committed together with the new version — all or
//! nothing.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `SlotPlacement`, `ScheduleVersion`,
//!   `LessonRecord`, `DatedEvent`, `SlotCatalog`
//! - **`store`**: In-process version and record stores with the query
//!   surface the migration flow needs
//! - **`migration`**: The pipeline — change detection, orphan
//!   scanning, slot mapping, date recalculation, and the reviewer
//!   session with transactional commit
//! - **`validation`**: Structural checks on candidate placement sets
//!
//! # Design
//!
//! The mapper is intentionally a cheap, explainable positional
//! heuristic behind a trait seam ([`migration::SlotMapper`]); no
//! globally-optimal matching is attempted, and every suggestion goes
//! through a human reviewer before commit. Records are soft-removed,
//! never deleted, so history stays queryable across migrations.

pub mod error;
pub mod migration;
pub mod models;
pub mod store;
pub mod validation;

pub use error::{Result, TimetableError};
pub use migration::{
    Decision, MigrationSession, PendingVersion, SequentialMapper, SlotMapper,
};
pub use models::{
    DatedEvent, LessonKind, LessonRecord, RecordStatus, ScheduleChange, ScheduleVersion,
    SlotCatalog, SlotPlacement,
};
pub use store::{RecordStore, VersionStore};
