//! Slot mapping strategies.
//!
//! A mapper turns scanned orphans into default suggestions for the
//! reviewer. The shipped [`SequentialMapper`] pairs orphans with
//! candidate placements positionally within each week; the trait seam
//! exists so a smarter matcher (subject-aware, cost-based) can be
//! swapped in without touching version storage, commit, or decision
//! state.
//!
//! # Score of the positional heuristic
//! Lesson content carries no stable identity across versions, so
//! chronological order within the week is the cheapest reasonable
//! proxy for intent. When a class's weekly lesson count changes, the
//! pairing can mismatch subjects; every suggestion therefore goes
//! through a human reviewer and is never committed silently.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

use super::orphans::Orphan;
use super::weekdate::{recalc, weekday_index};
use crate::models::{SlotCatalog, SlotPlacement};

/// Default proposal for one orphan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The orphan this suggestion is for.
    pub orphan: Orphan,
    /// Proposed default action.
    pub kind: SuggestionKind,
}

/// What the mapper proposes for an orphan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SuggestionKind {
    /// Move to a concrete new date and slot.
    Move {
        /// Target date, same week as the original.
        date: NaiveDate,
        /// Target slot.
        slot_id: String,
        /// Start time from the slot definition, or the orphan's own.
        start_time: Option<NaiveTime>,
        /// End time from the slot definition, or the orphan's own.
        end_time: Option<NaiveTime>,
    },
    /// No anchor to move to; leave unscheduled pending review.
    Unscheduled,
}

/// Strategy producing default suggestions for a set of orphans.
///
/// Implementations must suggest exactly one action per orphan — an
/// orphan with no viable target is reported as `Unscheduled`, never
/// dropped.
pub trait SlotMapper: Debug {
    /// Strategy name for diagnostics.
    fn name(&self) -> &'static str;

    /// Suggests one action per orphan against the new placement set.
    fn suggest(
        &self,
        orphans: &[Orphan],
        placements: &[SlotPlacement],
        catalog: &SlotCatalog,
        effective_from: NaiveDate,
    ) -> Vec<Suggestion>;
}

/// Positional pairing within week-buckets.
///
/// Per (institution, class) group: candidate targets are the class's
/// new placements sorted by (weekday, slot_id); orphans are bucketed
/// by 7-day window relative to the effective date, sorted
/// chronologically within each bucket, and paired index-for-index
/// with the candidates. A suggestion never crosses a week-bucket.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialMapper;

impl SlotMapper for SequentialMapper {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn suggest(
        &self,
        orphans: &[Orphan],
        placements: &[SlotPlacement],
        catalog: &SlotCatalog,
        effective_from: NaiveDate,
    ) -> Vec<Suggestion> {
        let mut groups: BTreeMap<(&str, &str), Vec<&Orphan>> = BTreeMap::new();
        for orphan in orphans {
            groups
                .entry((orphan.institution_id.as_str(), orphan.class_id.as_str()))
                .or_default()
                .push(orphan);
        }

        let mut suggestions = Vec::with_capacity(orphans.len());
        for ((institution, class), group) in groups {
            let mut candidates: Vec<&SlotPlacement> = placements
                .iter()
                .filter(|p| p.institution_id == institution && p.class_id == class)
                .collect();
            candidates.sort_by(|a, b| a.grid_key().cmp(&b.grid_key()));

            if candidates.is_empty() {
                // Class removed from the grid: nothing to anchor to.
                for orphan in group {
                    suggestions.push(Suggestion {
                        orphan: orphan.clone(),
                        kind: SuggestionKind::Unscheduled,
                    });
                }
                continue;
            }

            // Week-buckets relative to the effective date. Floored
            // division keeps pre-effective dates (reachable through
            // direct `suggest` calls) in their own negative buckets.
            let mut buckets: BTreeMap<i64, Vec<&Orphan>> = BTreeMap::new();
            for orphan in group {
                let bucket = (orphan.date - effective_from).num_days().div_euclid(7);
                buckets.entry(bucket).or_default().push(orphan);
            }

            for bucket in buckets.into_values() {
                suggestions.extend(map_bucket(&bucket, &candidates, catalog));
            }
        }

        suggestions
    }
}

/// Pairs one week-bucket of orphans with the candidate list.
fn map_bucket(
    bucket: &[&Orphan],
    candidates: &[&SlotPlacement],
    catalog: &SlotCatalog,
) -> Vec<Suggestion> {
    let mut ordered: Vec<&Orphan> = bucket.to_vec();
    ordered.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, orphan)| {
            let kind = match candidates.get(i) {
                Some(candidate) => move_suggestion(orphan, candidate, catalog),
                // More orphans this week than new placements:
                // reported unmapped, pending an explicit decision.
                None => SuggestionKind::Unscheduled,
            };
            Suggestion {
                orphan: orphan.clone(),
                kind,
            }
        })
        .collect()
}

fn move_suggestion(
    orphan: &Orphan,
    candidate: &SlotPlacement,
    catalog: &SlotCatalog,
) -> SuggestionKind {
    let date = recalc(orphan.date, weekday_index(orphan.date), candidate.weekday);

    let (start_time, end_time) = match catalog.resolve(
        &candidate.institution_id,
        &candidate.shift_id,
        &candidate.slot_id,
    ) {
        Some(slot) => (Some(slot.start_time), Some(slot.end_time)),
        None => {
            tracing::debug!(
                slot = %candidate.slot_id,
                record = %orphan.id,
                "slot definition not found, keeping original times"
            );
            (orphan.start_time, orphan.end_time)
        }
    };

    SuggestionKind::Move {
        date,
        slot_id: candidate.slot_id.clone(),
        start_time,
        end_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::orphans::OrphanSource;
    use crate::models::{Institution, Shift, SlotDef};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn orphan(id: &str, class: &str, d: NaiveDate) -> Orphan {
        Orphan {
            source: OrphanSource::Lesson,
            id: id.into(),
            institution_id: "s1".into(),
            class_id: class.into(),
            slot_id: "slot-1".into(),
            date: d,
            start_time: Some(time(8, 0)),
            end_time: Some(time(8, 45)),
        }
    }

    fn placement(weekday: u8, slot: &str, class: &str) -> SlotPlacement {
        SlotPlacement::new(weekday, "s1", "morning", slot, class)
    }

    fn catalog() -> SlotCatalog {
        SlotCatalog::new().with_institution(
            Institution::new("s1", "School").with_shift(
                Shift::new("morning", "Morning")
                    .with_slot(SlotDef::new("slot-1", "1st", time(8, 0), time(8, 45)))
                    .with_slot(SlotDef::new("slot-2", "2nd", time(8, 55), time(9, 40))),
            ),
        )
    }

    fn move_of(s: &Suggestion) -> (NaiveDate, &str) {
        match &s.kind {
            SuggestionKind::Move { date, slot_id, .. } => (*date, slot_id.as_str()),
            SuggestionKind::Unscheduled => panic!("expected Move for {}", s.orphan.id),
        }
    }

    #[test]
    fn test_monday_wednesday_to_tuesday_thursday() {
        // 7A moves Mon+Wed 08:00 to Tue+Thu 08:00, effective 2026-02-09.
        let eff = date(2026, 2, 9);
        let orphans = vec![
            orphan("fractions", "7A", date(2026, 2, 9)),  // Monday
            orphan("decimals", "7A", date(2026, 2, 11)),  // Wednesday
        ];
        let placements = vec![placement(1, "slot-1", "7A"), placement(3, "slot-1", "7A")];

        let suggestions = SequentialMapper.suggest(&orphans, &placements, &catalog(), eff);
        assert_eq!(suggestions.len(), 2);

        let by_id = |id: &str| suggestions.iter().find(|s| s.orphan.id == id).unwrap();
        assert_eq!(move_of(by_id("fractions")), (date(2026, 2, 10), "slot-1")); // Tuesday
        assert_eq!(move_of(by_id("decimals")), (date(2026, 2, 12), "slot-1")); // Thursday

        match &by_id("fractions").kind {
            SuggestionKind::Move { start_time, .. } => assert_eq!(*start_time, Some(time(8, 0))),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_third_orphan_reported_unscheduled() {
        // 8B had three weekly lessons, the new grid has two.
        let eff = date(2026, 2, 9);
        let orphans = vec![
            orphan("first", "8B", date(2026, 2, 9)),
            orphan("second", "8B", date(2026, 2, 10)),
            orphan("third", "8B", date(2026, 2, 13)),
        ];
        let placements = vec![placement(1, "slot-1", "8B"), placement(3, "slot-2", "8B")];

        let suggestions = SequentialMapper.suggest(&orphans, &placements, &catalog(), eff);
        assert_eq!(suggestions.len(), 3); // never dropped

        let third = suggestions.iter().find(|s| s.orphan.id == "third").unwrap();
        assert_eq!(third.kind, SuggestionKind::Unscheduled);
    }

    #[test]
    fn test_no_candidates_all_unscheduled() {
        let eff = date(2026, 2, 9);
        let orphans = vec![
            orphan("a", "9C", date(2026, 2, 9)),
            orphan("b", "9C", date(2026, 2, 10)),
        ];
        // Grid only knows 7A; class 9C was removed.
        let placements = vec![placement(1, "slot-1", "7A")];

        let suggestions = SequentialMapper.suggest(&orphans, &placements, &catalog(), eff);
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions
            .iter()
            .all(|s| s.kind == SuggestionKind::Unscheduled));
    }

    #[test]
    fn test_buckets_pair_independently() {
        // Two weeks, one orphan each: both pair with the first candidate.
        let eff = date(2026, 2, 9);
        let orphans = vec![
            orphan("week0", "7A", date(2026, 2, 9)),
            orphan("week1", "7A", date(2026, 2, 16)),
        ];
        let placements = vec![placement(1, "slot-1", "7A"), placement(3, "slot-2", "7A")];

        let suggestions = SequentialMapper.suggest(&orphans, &placements, &catalog(), eff);
        let by_id = |id: &str| suggestions.iter().find(|s| s.orphan.id == id).unwrap();

        assert_eq!(move_of(by_id("week0")), (date(2026, 2, 10), "slot-1"));
        assert_eq!(move_of(by_id("week1")), (date(2026, 2, 17), "slot-1"));
    }

    #[test]
    fn test_no_suggestion_crosses_week_bucket() {
        let eff = date(2026, 2, 9);
        let orphans: Vec<Orphan> = (0..4i64)
            .map(|week| {
                orphan(
                    &format!("w{week}"),
                    "7A",
                    eff + chrono::Duration::days(week * 7 + 2), // Wednesdays
                )
            })
            .collect();
        // Monday target: suggested dates shift back two days, same week.
        let placements = vec![placement(0, "slot-1", "7A")];

        let suggestions = SequentialMapper.suggest(&orphans, &placements, &catalog(), eff);
        for s in &suggestions {
            let (target, _) = move_of(s);
            let orig_bucket = (s.orphan.date - eff).num_days() / 7;
            let new_bucket = (target - eff).num_days() / 7;
            assert_eq!(orig_bucket, new_bucket, "orphan {}", s.orphan.id);
        }
    }

    #[test]
    fn test_pre_effective_orphan_keeps_own_week() {
        // Direct callers may feed the mapper records dated before the
        // effective date; days -6..-1 form their own bucket rather
        // than collapsing into week 0.
        let eff = date(2026, 2, 9);
        let orphans = vec![
            orphan("before", "7A", date(2026, 2, 6)), // Friday, prior week
            orphan("after", "7A", date(2026, 2, 9)),  // Monday, week 0
        ];
        let placements = vec![placement(1, "slot-1", "7A")];

        let suggestions = SequentialMapper.suggest(&orphans, &placements, &catalog(), eff);
        let by_id = |id: &str| suggestions.iter().find(|s| s.orphan.id == id).unwrap();

        // Separate buckets: each pairs with the single candidate.
        assert_eq!(move_of(by_id("before")).0, date(2026, 2, 3)); // Tuesday, prior week
        assert_eq!(move_of(by_id("after")).0, date(2026, 2, 10)); // Tuesday, week 0
    }

    #[test]
    fn test_chronological_pairing_within_bucket() {
        // Same date, different times: earlier start pairs with the
        // earlier candidate slot.
        let eff = date(2026, 2, 9);
        let mut late = orphan("late", "7A", date(2026, 2, 9));
        late.start_time = Some(time(10, 0));
        let early = orphan("early", "7A", date(2026, 2, 9));
        let orphans = vec![late, early];

        let placements = vec![placement(1, "slot-1", "7A"), placement(1, "slot-2", "7A")];
        let suggestions = SequentialMapper.suggest(&orphans, &placements, &catalog(), eff);
        let by_id = |id: &str| suggestions.iter().find(|s| s.orphan.id == id).unwrap();

        assert_eq!(move_of(by_id("early")).1, "slot-1");
        assert_eq!(move_of(by_id("late")).1, "slot-2");
    }

    #[test]
    fn test_unknown_slot_falls_back_to_original_times() {
        let eff = date(2026, 2, 9);
        let orphans = vec![orphan("a", "7A", date(2026, 2, 9))];
        // slot-9 has no catalog definition.
        let placements = vec![placement(1, "slot-9", "7A")];

        let suggestions = SequentialMapper.suggest(&orphans, &placements, &catalog(), eff);
        match &suggestions[0].kind {
            SuggestionKind::Move {
                start_time,
                end_time,
                ..
            } => {
                assert_eq!(*start_time, Some(time(8, 0)));
                assert_eq!(*end_time, Some(time(8, 45)));
            }
            _ => panic!("expected Move"),
        }
    }

    #[test]
    fn test_groups_do_not_share_candidates() {
        // 7A and 7B each have one orphan and one candidate; pairing is
        // per class, not global.
        let eff = date(2026, 2, 9);
        let orphans = vec![
            orphan("a", "7A", date(2026, 2, 9)),
            orphan("b", "7B", date(2026, 2, 9)),
        ];
        let placements = vec![placement(1, "slot-1", "7A"), placement(2, "slot-1", "7B")];

        let suggestions = SequentialMapper.suggest(&orphans, &placements, &catalog(), eff);
        let by_id = |id: &str| suggestions.iter().find(|s| s.orphan.id == id).unwrap();

        assert_eq!(move_of(by_id("a")).0, date(2026, 2, 10)); // Tuesday
        assert_eq!(move_of(by_id("b")).0, date(2026, 2, 11)); // Wednesday
    }
}
