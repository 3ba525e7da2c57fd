//! Weekday-preserving date arithmetic.
//!
//! The migration flow moves records between weekdays of the *same*
//! 7-day window: a Monday lesson moving to Thursday shifts forward
//! three days, a Wednesday lesson moving to Tuesday shifts back one.
//! This is "the day in this window with the new weekday", not "the
//! next occurrence", so the result may land earlier than the input.
//!
//! All dates are timezone-naive calendar dates; no UTC conversion
//! happens anywhere, which keeps midnight-adjacent dates stable.
//!
//! # Ingestion boundary
//! The pipeline itself works on typed [`chrono::NaiveDate`] values and
//! calls [`recalc`] directly. [`parse_flexible`] and [`recalc_str`]
//! are the boundary API for callers whose record sources carry string
//! dates (ISO or day/month/year): they normalize on the way in, with
//! local recovery instead of errors, and are not used internally.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Weekday index of a date, 0 = Monday .. 6 = Sunday.
///
/// The single weekday convention used across the crate.
#[inline]
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Shifts `date` from its old weekday to a new weekday within the same
/// 7-day window.
///
/// `delta = new_weekday - old_weekday` is in −6..=6, so the result
/// stays inside the window containing `date`. Two exact properties:
///
/// - `recalc(recalc(d, a, b), b, a) == d` (round trip)
/// - `recalc(d, w, w) == d` (identity)
pub fn recalc(date: NaiveDate, old_weekday: u8, new_weekday: u8) -> NaiveDate {
    let delta = i64::from(new_weekday) - i64::from(old_weekday);
    date + Duration::days(delta)
}

/// Parses a date in ISO (`YYYY-MM-DD`, any time suffix truncated) or
/// day/month/year form (`/`, `.`, or `-` separated).
///
/// Returns `None` for anything else.
pub fn parse_flexible(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    // Truncate "2026-02-09T08:00:00" / "2026-02-09 08:00" to the date part.
    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or(trimmed);

    if let Ok(d) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in ["%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date_part, fmt) {
            return Some(d);
        }
    }
    None
}

/// String-level `recalc` with local recovery.
///
/// Unparseable input falls back to today's date with a diagnostic;
/// one malformed record must not abort the batch it belongs to.
pub fn recalc_str(input: &str, old_weekday: u8, new_weekday: u8) -> NaiveDate {
    let date = match parse_flexible(input) {
        Some(d) => d,
        None => {
            tracing::warn!(input, "unparseable record date, falling back to today");
            Local::now().date_naive()
        }
    };
    recalc(date, old_weekday, new_weekday)
}
