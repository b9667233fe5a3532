use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::ledger::entities::{DayBucket, Nutrition};

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The seven dates Monday..Sunday of the week containing `date`.
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = week_start(date);
    std::array::from_fn(|offset| monday + Duration::days(offset as i64))
}

pub fn weekly_totals(days: &[DayBucket; 7]) -> Nutrition {
    days.iter().map(|day| &day.totals).sum()
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn every_day_of_a_week_maps_to_the_same_dates() {
        // 2024-05-06 is a Monday
        let expected = week_dates(date(2024, 5, 6));
        for day in 6..=12 {
            assert_eq!(week_dates(date(2024, 5, day)), expected);
        }
        assert_eq!(expected[0].weekday(), Weekday::Mon);
        assert_eq!(expected[6], date(2024, 5, 12));
    }

    #[test]
    fn sunday_belongs_to_the_preceding_monday() {
        assert_eq!(week_start(date(2024, 5, 12)), date(2024, 5, 6));
        assert_eq!(week_start(date(2024, 5, 13)), date(2024, 5, 13));
    }

    #[test]
    fn week_crossing_a_year_boundary() {
        // 2025-01-01 is a Wednesday
        assert_eq!(week_start(date(2025, 1, 1)), date(2024, 12, 30));
        assert_eq!(week_dates(date(2025, 1, 1))[6], date(2025, 1, 5));
    }

    #[test]
    fn weekly_totals_sums_every_day() {
        let dates = week_dates(date(2024, 5, 6));
        let days = dates.map(|d| {
            let mut bucket = DayBucket::empty(d);
            bucket.totals = Nutrition::new(100.0, 10.0, 5.0, 12.0);
            bucket
        });

        assert_eq!(weekly_totals(&days), Nutrition::new(700.0, 70.0, 35.0, 84.0));
    }
}
