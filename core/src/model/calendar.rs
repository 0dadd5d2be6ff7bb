use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::time::is_weekend;

/// How a date is treated by the hour rules.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Workday,
    Weekend,
    Holiday,
    BayramEve,
}

/// Public holidays and bayram start dates for hour calculations.
///
/// Bayram eves are never stored: a date is an eve when the next day starts a
/// bayram and the date itself is a weekday.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HolidayCalendar {
    #[serde(default)]
    holidays: BTreeSet<NaiveDate>,
    #[serde(default)]
    bayram_starts: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn new(
        holidays: impl IntoIterator<Item = NaiveDate>,
        bayram_starts: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
            bayram_starts: bayram_starts.into_iter().collect(),
        }
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    /// Marks `date` as the first day of a bayram. The day itself is a holiday.
    pub fn add_bayram_start(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
        self.bayram_starts.insert(date);
    }

    /// Adds the fixed-date national holidays of Turkey for `year`.
    ///
    /// Religious bayrams move every year and must be configured explicitly.
    pub fn add_national_holidays(&mut self, year: i32) {
        let mut fixed = vec![
            (1, 1),   // New Year's Day
            (4, 23),  // National Sovereignty and Children's Day
            (5, 1),   // Labour Day
            (5, 19),  // Commemoration of Atatürk, Youth and Sports Day
            (8, 30),  // Victory Day
            (10, 29), // Republic Day
        ];
        if year >= 2017 {
            fixed.push((7, 15)); // Democracy and National Unity Day
        }
        for (month, day) in fixed {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(date);
            }
        }
    }

    pub fn holidays(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.holidays.iter().copied()
    }

    pub fn bayram_starts(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.bayram_starts.iter().copied()
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    pub fn is_bayram_eve(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && self.bayram_starts.contains(&(date + Duration::days(1)))
    }

    /// Eve beats weekend/holiday, holiday beats weekend.
    pub fn day_kind(&self, date: NaiveDate) -> DayKind {
        if self.is_bayram_eve(date) {
            DayKind::BayramEve
        } else if self.is_holiday(date) {
            DayKind::Holiday
        } else if is_weekend(date) {
            DayKind::Weekend
        } else {
            DayKind::Workday
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_eve_is_derived_from_bayram_start() {
        // Ramazan Bayramı 2024 starts on Wednesday April 10th
        let calendar = HolidayCalendar::new([], [date(2024, 4, 10)]);
        assert!(calendar.is_bayram_eve(date(2024, 4, 9)));
        assert!(!calendar.is_bayram_eve(date(2024, 4, 10)));
        assert!(!calendar.is_bayram_eve(date(2024, 4, 8)));
        assert_eq!(calendar.day_kind(date(2024, 4, 9)), DayKind::BayramEve);
    }

    #[test]
    fn test_weekend_is_never_an_eve() {
        // Monday start puts the eve on a Sunday
        let calendar = HolidayCalendar::new([], [date(2024, 6, 17)]);
        assert!(!calendar.is_bayram_eve(date(2024, 6, 16)));
        assert_eq!(calendar.day_kind(date(2024, 6, 16)), DayKind::Weekend);
    }

    #[test]
    fn test_eve_may_fall_in_previous_month() {
        let calendar = HolidayCalendar::new([], [date(2024, 5, 1)]);
        assert!(calendar.is_bayram_eve(date(2024, 4, 30)));
    }

    #[test]
    fn test_national_holidays() {
        let mut calendar = HolidayCalendar::default();
        calendar.add_national_holidays(2016);
        assert!(calendar.is_holiday(date(2016, 4, 23)));
        assert!(!calendar.is_holiday(date(2016, 7, 15)));

        calendar.add_national_holidays(2024);
        assert!(calendar.is_holiday(date(2024, 7, 15)));
        assert!(calendar.is_holiday(date(2024, 10, 29)));
        assert_eq!(calendar.day_kind(date(2024, 1, 1)), DayKind::Holiday);
    }

    #[test]
    fn test_added_bayram_start_is_a_holiday_with_an_eve() {
        let mut calendar = HolidayCalendar::default();
        calendar.add_bayram_start(date(2024, 4, 10));
        calendar.add_holiday(date(2024, 4, 11));

        assert_eq!(calendar.holidays().collect::<Vec<_>>(), vec![date(2024, 4, 10), date(2024, 4, 11)]);
        assert_eq!(calendar.bayram_starts().collect::<Vec<_>>(), vec![date(2024, 4, 10)]);
        assert_eq!(calendar.day_kind(date(2024, 4, 9)), DayKind::BayramEve);
        assert_eq!(calendar.day_kind(date(2024, 4, 10)), DayKind::Holiday);
    }

    #[test]
    fn test_deserialize_with_missing_keys() {
        let calendar: HolidayCalendar =
            serde_json::from_str(r#"{ "holidays": ["2024-04-23"] }"#).unwrap();
        assert!(calendar.is_holiday(date(2024, 4, 23)));
        assert_eq!(calendar.bayram_starts().count(), 0);
    }
}
