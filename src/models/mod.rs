//! Timetable domain models.
//!
//! Core data types for weekly recurring timetables and the dated
//! records reconciled against them:
//!
//! | timegrid | School usage |
//! |----------|--------------|
//! | `SlotPlacement` | One weekly lesson position (Mon, 2nd period, 7A) |
//! | `ScheduleVersion` | The full grid as of an effective date |
//! | `LessonRecord` | One logged/planned lesson occurrence |
//! | `DatedEvent` | Assessment or blocking event, optionally slot-bound |
//! | `SlotCatalog` | Institution/shift/slot time definitions |

mod catalog;
mod placement;
mod record;
mod version;

pub use catalog::{Institution, Shift, SlotCatalog, SlotDef};
pub use placement::{ScheduleChange, SlotPlacement};
pub use record::{DatedEvent, LessonKind, LessonRecord, RecordStatus};
pub use version::ScheduleVersion;
