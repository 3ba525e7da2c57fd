//! Placement set comparison.
//!
//! Two outputs with different contracts:
//!
//! - [`modified_institutions`] is the *scope gate*: every later step of
//!   a migration is restricted to the institutions it returns, so an
//!   edit to one school can never scan or mutate another.
//! - [`class_changes`] is an *audit view*: per-class positional
//!   reassignments for display. Positional pairing ("the i-th weekly
//!   lesson stays the i-th weekly lesson") is a heuristic, reasonable
//!   when weekly counts are equal or close and approximate otherwise.
//!   It is never treated as ground truth.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{ScheduleChange, SlotPlacement};

/// Institutions whose placements differ between the two sets.
///
/// Grouped by institution; a count mismatch flags the institution
/// immediately, otherwise every old placement must have a structurally
/// identical counterpart (weekday, shift, slot, class) in the new set.
/// Matching is multiset-aware, so duplicated placements pair one-to-one.
pub fn modified_institutions(
    old: &[SlotPlacement],
    new: &[SlotPlacement],
) -> BTreeSet<String> {
    let old_groups = group_by_institution(old);
    let new_groups = group_by_institution(new);

    let mut modified = BTreeSet::new();
    let all_institutions: BTreeSet<&str> = old_groups
        .keys()
        .chain(new_groups.keys())
        .copied()
        .collect();

    for institution in all_institutions {
        let old_set = old_groups.get(institution).map(Vec::as_slice).unwrap_or(&[]);
        let new_set = new_groups.get(institution).map(Vec::as_slice).unwrap_or(&[]);

        if old_set.len() != new_set.len() || !is_permutation(old_set, new_set) {
            modified.insert(institution.to_string());
        }
    }

    modified
}

/// Per-class positional change list for audit/display.
///
/// Both sides of each class are sorted by (weekday, slot_id) and paired
/// positionally; every positional mismatch yields one [`ScheduleChange`].
/// Length differences produce one-sided entries (lesson added/dropped).
pub fn class_changes(old: &[SlotPlacement], new: &[SlotPlacement]) -> Vec<ScheduleChange> {
    let old_groups = group_by_class(old);
    let new_groups = group_by_class(new);

    let all_classes: BTreeSet<(&str, &str)> = old_groups
        .keys()
        .chain(new_groups.keys())
        .copied()
        .collect();

    let mut changes = Vec::new();
    for (institution, class) in all_classes {
        let key = (institution, class);
        let mut old_side: Vec<&SlotPlacement> =
            old_groups.get(&key).map_or_else(Vec::new, Clone::clone);
        let mut new_side: Vec<&SlotPlacement> =
            new_groups.get(&key).map_or_else(Vec::new, Clone::clone);
        old_side.sort_by(|a, b| a.grid_key().cmp(&b.grid_key()));
        new_side.sort_by(|a, b| a.grid_key().cmp(&b.grid_key()));

        let pairs = old_side.len().max(new_side.len());
        for i in 0..pairs {
            let old_slot = old_side.get(i).copied();
            let new_slot = new_side.get(i).copied();
            if old_slot != new_slot {
                changes.push(ScheduleChange::new(
                    institution,
                    class,
                    old_slot.cloned(),
                    new_slot.cloned(),
                ));
            }
        }
    }

    changes
}

fn group_by_institution(placements: &[SlotPlacement]) -> BTreeMap<&str, Vec<&SlotPlacement>> {
    let mut groups: BTreeMap<&str, Vec<&SlotPlacement>> = BTreeMap::new();
    for p in placements {
        groups.entry(p.institution_id.as_str()).or_default().push(p);
    }
    groups
}

fn group_by_class(placements: &[SlotPlacement]) -> BTreeMap<(&str, &str), Vec<&SlotPlacement>> {
    let mut groups: BTreeMap<(&str, &str), Vec<&SlotPlacement>> = BTreeMap::new();
    for p in placements {
        groups
            .entry((p.institution_id.as_str(), p.class_id.as_str()))
            .or_default()
            .push(p);
    }
    groups
}

/// Whether every placement in `old` has an unused structural twin in `new`.
///
/// Caller guarantees equal lengths.
fn is_permutation(old: &[&SlotPlacement], new: &[&SlotPlacement]) -> bool {
    let mut used = vec![false; new.len()];
    'outer: for p in old {
        for (i, q) in new.iter().enumerate() {
            if !used[i] && *q == *p {
                used[i] = true;
                continue 'outer;
            }
        }
        return false;
    }
    true
}
