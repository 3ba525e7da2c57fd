//! In-process stores: ordered versions and flat record collections.
//!
//! Persistence proper lives outside this crate; these stores define
//! the state shape a backing store must reproduce — versions keyed by
//! unique effective date, records carrying denormalized identifiers
//! and a soft-delete status flag.

mod records;
mod versions;

pub use records::RecordStore;
pub use versions::VersionStore;
