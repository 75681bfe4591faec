//! Scheduling-period date axis.
//!
//! A period for (year, month) runs from the 21st of the prior month
//! through the 20th of the target month. Seven look-back days precede
//! the period start so that rule evaluation can see "yesterday" state
//! on the first editable day; those buffer days are read-only to the
//! auto-fill pass.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of look-back days preceding the editable period.
pub const BUFFER_DAYS: u64 = 7;

/// One day on the scheduling axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEntry {
    /// Calendar date.
    pub date: NaiveDate,
    /// Short display label, `M/D`.
    pub label: String,
    /// Part of the non-editable look-back buffer.
    pub is_buffer: bool,
    /// First editable day of the period.
    pub is_start: bool,
}

/// Builds the ordered date axis for a (year, month) selection.
///
/// Returns entries from `BUFFER_DAYS` before the period start (21st of
/// the prior month) through the period end (20th of the target month),
/// inclusive. The first seven entries are buffer days; the eighth is
/// flagged as the start day.
///
/// An out-of-range month or unrepresentable year yields an empty axis:
/// the caller treats that as "no schedule available", not an error.
pub fn build_period(year: i32, month: u32) -> Vec<DateEntry> {
    let Some((start, end)) = period_bounds(year, month) else {
        return Vec::new();
    };
    let Some(buffer_start) = start.checked_sub_days(Days::new(BUFFER_DAYS)) else {
        return Vec::new();
    };

    let mut axis = Vec::new();
    let mut day = buffer_start;
    while day <= end {
        axis.push(DateEntry {
            date: day,
            label: format!("{}/{}", day.month(), day.day()),
            is_buffer: day < start,
            is_start: day == start,
        });
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    axis
}

/// The editable date range label for a (year, month) selection,
/// e.g. `2026-07-21 ~ 2026-08-20`.
///
/// Returns `None` when the selection does not resolve to a period.
pub fn period_range_label(year: i32, month: u32) -> Option<String> {
    let (start, end) = period_bounds(year, month)?;
    Some(format!("{start} ~ {end}"))
}

/// First and last editable dates of the period, if representable.
fn period_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (prev_year, prev_month) = if month == 1 {
        (year.checked_sub(1)?, 12)
    } else {
        (year, month - 1)
    };
    let start = NaiveDate::from_ymd_opt(prev_year, prev_month, 21)?;
    let end = NaiveDate::from_ymd_opt(year, month, 20)?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_span() {
        // 2026-08 period: 2026-07-21 .. 2026-08-20, plus 7 buffer days.
        let axis = build_period(2026, 8);
        assert_eq!(axis.len(), 7 + 31);
        assert_eq!(axis[0].date, NaiveDate::from_ymd_opt(2026, 7, 14).unwrap());
        assert_eq!(
            axis.last().unwrap().date,
            NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()
        );
    }

    #[test]
    fn test_buffer_and_start_flags() {
        let axis = build_period(2026, 8);
        for entry in &axis[..7] {
            assert!(entry.is_buffer);
            assert!(!entry.is_start);
        }
        assert!(!axis[7].is_buffer);
        assert!(axis[7].is_start);
        assert_eq!(axis[7].date, NaiveDate::from_ymd_opt(2026, 7, 21).unwrap());
        assert!(axis[8..].iter().all(|d| !d.is_buffer && !d.is_start));
    }

    #[test]
    fn test_january_wraps_year() {
        let axis = build_period(2026, 1);
        assert_eq!(axis[7].date, NaiveDate::from_ymd_opt(2025, 12, 21).unwrap());
        assert_eq!(
            axis.last().unwrap().date,
            NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()
        );
    }

    #[test]
    fn test_labels() {
        let axis = build_period(2026, 8);
        assert_eq!(axis[0].label, "7/14");
        assert_eq!(axis[7].label, "7/21");
        assert_eq!(axis.last().unwrap().label, "8/20");
    }

    #[test]
    fn test_invalid_month_yields_empty_axis() {
        assert!(build_period(2026, 0).is_empty());
        assert!(build_period(2026, 13).is_empty());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(build_period(2026, 8), build_period(2026, 8));
    }

    #[test]
    fn test_range_label() {
        assert_eq!(
            period_range_label(2026, 8).unwrap(),
            "2026-07-21 ~ 2026-08-20"
        );
        assert!(period_range_label(2026, 0).is_none());
    }
}
