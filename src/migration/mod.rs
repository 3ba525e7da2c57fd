//! Schedule migration pipeline.
//!
//! One schedule edit flows through four stages, each scoped by the
//! previous one:
//!
//! 1. **diff** — which institutions did the edit actually touch, plus
//!    a per-class audit change list;
//! 2. **orphans** — which dated records in those institutions no
//!    longer match the new grid;
//! 3. **mapper** — a default suggestion per orphan (positional
//!    pairing, replaceable via [`SlotMapper`]);
//! 4. **session** — reviewer decisions and the all-or-nothing commit.
//!
//! # Usage
//!
//! ```
//! use timegrid::migration::{MigrationSession, PendingVersion, SequentialMapper};
//! use timegrid::models::{SlotCatalog, SlotPlacement};
//! use timegrid::store::{RecordStore, VersionStore};
//!
//! let mut versions = VersionStore::new();
//! let mut records = RecordStore::new();
//! let catalog = SlotCatalog::new();
//!
//! let pending = PendingVersion::New {
//!     id: "v1".into(),
//!     effective_from: chrono::NaiveDate::from_ymd_opt(2026, 2, 9).unwrap(),
//!     placements: vec![SlotPlacement::new(1, "school-1", "morning", "slot-1", "7A")],
//! };
//! let session = MigrationSession::plan(
//!     &versions, &records, &catalog, pending, &SequentialMapper,
//! ).unwrap();
//! // ... reviewer overrides decisions ...
//! let summary = session.commit(&mut versions, &mut records).unwrap();
//! assert_eq!(summary.version_id, "v1");
//! ```

pub mod diff;
pub mod orphans;
pub mod weekdate;

mod mapper;
mod session;

pub use mapper::{SequentialMapper, SlotMapper, Suggestion, SuggestionKind};
pub use orphans::{Orphan, OrphanScan, OrphanSource};
pub use session::{CommitSummary, Decision, MigrationSession, PendingVersion};
pub use weekdate::{parse_flexible, recalc, recalc_str, weekday_index};
