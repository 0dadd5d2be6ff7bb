use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, Local, NaiveDate, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

/// A calendar month, e.g. March 2024.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(anyhow!("Invalid month: {}-{}", year, month));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        // month is validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    pub fn day_count(self) -> u32 {
        self.last_day().day()
    }

    /// Every date of the month, first to last inclusive.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last_day();
        self.first_day().iter_days().take_while(move |d| *d <= last)
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// Monday-first weeks covering the month; days of other months are `None`.
    pub fn weeks(self) -> Vec<[Option<NaiveDate>; 7]> {
        let mut weeks = Vec::new();
        let mut week = [None; 7];
        for date in self.days() {
            let column = date.weekday().num_days_from_monday() as usize;
            week[column] = Some(date);
            if column == 6 {
                weeks.push(week);
                week = [None; 7];
            }
        }
        if week.iter().any(Option::is_some) {
            weeks.push(week);
        }
        weeks
    }

    /// English month title such as `March 2024`.
    pub fn title(self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow!("Expected YYYY-MM, got: {}", s))?;
        let year: i32 = year.parse().map_err(|_| anyhow!("Invalid year: {}", year))?;
        let month: u32 = month.parse().map_err(|_| anyhow!("Invalid month: {}", month))?;
        YearMonth::new(year, month)
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// Parses a day given on the command line, relative to `today`.
pub fn parse_human_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    match input.trim().to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return today.succ_opt().ok_or_else(|| anyhow!("Date out of range: {}", input)),
        "yesterday" => return today.pred_opt().ok_or_else(|| anyhow!("Date out of range: {}", input)),
        _ => {}
    }

    // Relative format (+Nd, -Nd)
    if let Some(rest) = input.strip_prefix('+').or_else(|| input.strip_prefix('-')) {
        if let Some(num_str) = rest.strip_suffix('d') {
            let count: i64 = num_str
                .parse()
                .map_err(|_| anyhow!("Invalid relative format: {}", input))?;
            let offset = if input.starts_with('-') { count.checked_neg() } else { Some(count) };
            return offset
                .and_then(TimeDelta::try_days)
                .and_then(|delta| today.checked_add_signed(delta))
                .ok_or_else(|| anyhow!("Date out of range: {}", input));
        }
    }

    parse_iso_date(input.trim()).ok_or_else(|| anyhow!("Could not parse date: {}", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        let feb = YearMonth::new(2024, 2).unwrap();
        assert_eq!(feb.day_count(), 29);
        assert_eq!(feb.days().count(), 29);
        assert_eq!(feb.last_day(), date(2024, 2, 29));
        assert_eq!(YearMonth::new(2023, 2).unwrap().day_count(), 28);

        let dec = YearMonth::new(2024, 12).unwrap();
        assert_eq!(dec.last_day(), date(2024, 12, 31));
        assert_eq!(dec.next(), YearMonth::new(2025, 1).unwrap());
        assert_eq!(dec.next().previous(), dec);
    }

    #[test]
    fn test_weeks_start_on_monday() {
        // March 2024 starts on a Friday and ends on a Sunday
        let weeks = YearMonth::new(2024, 3).unwrap().weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][..4], [None; 4]);
        assert_eq!(weeks[0][4], Some(date(2024, 3, 1)));
        assert_eq!(weeks[4][6], Some(date(2024, 3, 31)));

        // September 2024 spills into a sixth row
        let weeks = YearMonth::new(2024, 9).unwrap().weeks();
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[5][0], Some(date(2024, 9, 30)));
        assert_eq!(weeks[5][1], None);
    }

    #[test]
    fn test_month_parse_and_display() {
        let m: YearMonth = "2024-03".parse().unwrap();
        assert_eq!(m.to_string(), "2024-03");
        assert_eq!(m.title(), "March 2024");
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("march".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_parse_human_date() {
        let today = date(2024, 3, 31);
        assert_eq!(parse_human_date("today", today).unwrap(), today);
        assert_eq!(parse_human_date("tom", today).unwrap(), date(2024, 4, 1));
        assert_eq!(parse_human_date("+3d", today).unwrap(), date(2024, 4, 3));
        assert_eq!(parse_human_date("-1d", today).unwrap(), date(2024, 3, 30));
        assert_eq!(parse_human_date("2024-02-29", today).unwrap(), date(2024, 2, 29));
        assert!(parse_human_date("2023-02-29", today).is_err());
    }

    #[test]
    fn test_relative_date_out_of_range_is_an_error() {
        let today = date(2024, 3, 31);
        assert!(parse_human_date("+99999999999d", today).is_err());
        assert!(parse_human_date("-99999999999d", today).is_err());
        assert!(parse_human_date("+9223372036854775807d", today).is_err());
        assert_eq!(parse_human_date("+365d", today).unwrap(), date(2025, 3, 31));
        assert!(parse_human_date("tom", NaiveDate::MAX).is_err());
        assert!(parse_human_date("yesterday", NaiveDate::MIN).is_err());
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(date(2024, 3, 2)));
        assert!(is_weekend(date(2024, 3, 3)));
        assert!(!is_weekend(date(2024, 3, 4)));
    }
}
