//! Billing-cycle window calculation
//!
//! Maps a reference date and a cycle-start day-of-month to the one-month
//! billing window containing that date. Consecutive windows for the same
//! start day tile the calendar with no gaps and no overlaps, which is the
//! property cap accounting depends on.
//!
//! A start day beyond a month's length (e.g. 31 in February) clamps to that
//! month's last day. Because of clamping, the window end is derived from the
//! *next* cycle's clamped start rather than from "start + 1 month - 1 day";
//! the naive formula would leave gaps around short months.

use chrono::{Datelike, NaiveDate};

/// A contiguous one-month billing window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleWindow {
    /// First day of the cycle (inclusive)
    pub start: NaiveDate,

    /// Last day of the cycle (inclusive)
    pub end: NaiveDate,
}

impl CycleWindow {
    /// Whether a date falls inside this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Compute the billing cycle containing `reference`
///
/// # Arguments
///
/// * `reference` - The date to locate (a transaction date, or "as of" date)
/// * `cycle_start_day` - Day of month (1-31) the cycle is anchored to
///
/// # Returns
///
/// The [`CycleWindow`] with `start <= reference <= end`. The window starts on
/// the anchor day of the reference month if the reference date is on or after
/// it, otherwise on the anchor day of the previous month. Anchor days beyond
/// a month's length clamp to the month's last day.
pub fn cycle_of(reference: NaiveDate, cycle_start_day: u32) -> CycleWindow {
    let day = cycle_start_day.clamp(1, 31);

    let this_anchor = anchor(reference.year(), reference.month(), day);
    let start = if reference >= this_anchor {
        this_anchor
    } else {
        let (year, month) = previous_month(reference.year(), reference.month());
        anchor(year, month, day)
    };

    // End is the day before the next cycle's clamped anchor. Using the anchor
    // day (not start.day()) keeps tiling intact when start was clamped.
    let (next_year, next_month) = next_month(start.year(), start.month());
    let next_start = anchor(next_year, next_month, day);
    let end = next_start
        .pred_opt()
        .expect("cycle start is never the minimum representable date");

    CycleWindow { start, end }
}

/// Anchor day within a month, clamped to the month's length
fn anchor(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 30))
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 29))
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 28))
        .expect("every month has at least 28 days")
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case::on_anchor(date(2024, 3, 15), 15, date(2024, 3, 15), date(2024, 4, 14))]
    #[case::after_anchor(date(2024, 3, 20), 15, date(2024, 3, 15), date(2024, 4, 14))]
    #[case::before_anchor(date(2024, 3, 10), 15, date(2024, 2, 15), date(2024, 3, 14))]
    #[case::first_of_month_anchor(date(2024, 3, 31), 1, date(2024, 3, 1), date(2024, 3, 31))]
    #[case::year_boundary(date(2024, 1, 3), 10, date(2023, 12, 10), date(2024, 1, 9))]
    fn test_cycle_of(
        #[case] reference: NaiveDate,
        #[case] start_day: u32,
        #[case] expected_start: NaiveDate,
        #[case] expected_end: NaiveDate,
    ) {
        let window = cycle_of(reference, start_day);
        assert_eq!(window.start, expected_start);
        assert_eq!(window.end, expected_end);
    }

    #[rstest]
    // Day 31 clamps to Feb 29 in a leap year; the window ends the day before
    // the next clamped anchor (Mar 31).
    #[case::clamp_february_leap(date(2024, 3, 15), 31, date(2024, 2, 29), date(2024, 3, 30))]
    #[case::clamp_february_non_leap(date(2023, 3, 15), 31, date(2023, 2, 28), date(2023, 3, 30))]
    #[case::clamp_thirty_day_month(date(2024, 5, 10), 31, date(2024, 4, 30), date(2024, 5, 30))]
    #[case::on_clamped_anchor(date(2024, 2, 29), 31, date(2024, 2, 29), date(2024, 3, 30))]
    #[case::just_before_clamped_anchor(date(2024, 2, 28), 31, date(2024, 1, 31), date(2024, 2, 28))]
    fn test_cycle_of_clamps_to_month_length(
        #[case] reference: NaiveDate,
        #[case] start_day: u32,
        #[case] expected_start: NaiveDate,
        #[case] expected_end: NaiveDate,
    ) {
        let window = cycle_of(reference, start_day);
        assert_eq!(window.start, expected_start);
        assert_eq!(window.end, expected_end);
    }

    #[rstest]
    #[case::day_one(1)]
    #[case::mid_month(15)]
    #[case::day_twenty_nine(29)]
    #[case::day_thirty_one(31)]
    fn test_cycles_tile_the_calendar(#[case] start_day: u32) {
        // Walk two years of consecutive days across a leap February; every
        // date must fall in its own window, and windows must join exactly.
        let mut current = date(2023, 6, 1);
        let last = date(2025, 6, 1);

        while current <= last {
            let window = cycle_of(current, start_day);
            assert!(
                window.contains(current),
                "{} not in [{}, {}]",
                current,
                window.start,
                window.end
            );

            let next_window = cycle_of(window.end.succ_opt().unwrap(), start_day);
            assert_eq!(
                next_window.start,
                window.end.succ_opt().unwrap(),
                "gap or overlap after {}",
                window.end
            );

            current = current.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_same_window_for_every_day_inside_it() {
        let window = cycle_of(date(2024, 2, 10), 15);
        let mut day = window.start;
        while day <= window.end {
            assert_eq!(cycle_of(day, 15), window);
            day = day.succ_opt().unwrap();
        }
    }
}
