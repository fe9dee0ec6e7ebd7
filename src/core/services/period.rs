use chrono::{Datelike, Duration, NaiveDate};

/// Recurring report periods, relative to an anchor day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// The anchor day itself.
    Daily,
    /// Monday through Sunday of the anchor's week.
    Weekly,
    /// First through last day of the anchor's month.
    Monthly,
}

impl ReportPeriod {
    /// Inclusive `(start, end)` bounds containing `anchor`.
    pub fn bounds(self, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            ReportPeriod::Daily => (anchor, anchor),
            ReportPeriod::Weekly => week_bounds(anchor),
            ReportPeriod::Monthly => month_bounds(anchor),
        }
    }
}

fn week_bounds(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = anchor - Duration::days(i64::from(anchor.weekday().num_days_from_monday()));
    (monday, monday + Duration::days(6))
}

fn month_bounds(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = first_of_month(anchor);
    // 32 days past the 1st always lands inside the following month.
    let next_first = first_of_month(first + Duration::days(32));
    (first, next_first - Duration::days(1))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn daily_is_the_anchor_day() {
        assert_eq!(ReportPeriod::Daily.bounds(d("2025-11-14")), (d("2025-11-14"), d("2025-11-14")));
    }

    #[test]
    fn week_starts_on_monday() {
        // 2025-11-12 is a Wednesday
        assert_eq!(
            ReportPeriod::Weekly.bounds(d("2025-11-12")),
            (d("2025-11-10"), d("2025-11-16"))
        );
        assert_eq!(
            ReportPeriod::Weekly.bounds(d("2025-11-10")),
            (d("2025-11-10"), d("2025-11-16"))
        );
        assert_eq!(
            ReportPeriod::Weekly.bounds(d("2025-11-16")),
            (d("2025-11-10"), d("2025-11-16"))
        );
    }

    #[test]
    fn week_spanning_month_boundary() {
        // 2025-10-30 is a Thursday
        assert_eq!(
            ReportPeriod::Weekly.bounds(d("2025-10-30")),
            (d("2025-10-27"), d("2025-11-02"))
        );
    }

    #[test]
    fn week_spanning_year_boundary() {
        // 2026-01-01 is a Thursday
        assert_eq!(
            ReportPeriod::Weekly.bounds(d("2026-01-01")),
            (d("2025-12-29"), d("2026-01-04"))
        );
    }

    #[test]
    fn december_month_rolls_into_january() {
        assert_eq!(
            ReportPeriod::Monthly.bounds(d("2025-12-15")),
            (d("2025-12-01"), d("2025-12-31"))
        );
        assert_eq!(
            ReportPeriod::Monthly.bounds(d("2026-01-31")),
            (d("2026-01-01"), d("2026-01-31"))
        );
    }

    #[test]
    fn february_respects_leap_years() {
        assert_eq!(
            ReportPeriod::Monthly.bounds(d("2024-02-10")),
            (d("2024-02-01"), d("2024-02-29"))
        );
        assert_eq!(
            ReportPeriod::Monthly.bounds(d("2025-02-28")),
            (d("2025-02-01"), d("2025-02-28"))
        );
        assert_eq!(
            ReportPeriod::Monthly.bounds(d("2100-02-01")),
            (d("2100-02-01"), d("2100-02-28"))
        );
    }

    #[test]
    fn thirty_day_months() {
        assert_eq!(
            ReportPeriod::Monthly.bounds(d("2025-04-30")),
            (d("2025-04-01"), d("2025-04-30"))
        );
    }
}
