//! Monthly hour arithmetic over a schedule and a holiday calendar.
//!
//! Two baselines coexist: `expected_hours` is the flat `working_days * 8`
//! headline figure, while overtime is measured against the per-day
//! contracted hours where a bayram eve counts 5 and holidays count 0.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::calendar::{DayKind, HolidayCalendar};
use crate::model::schedule::ScheduleStore;
use crate::model::shift::ShiftType;
use crate::model::stats::{OvertimeResult, ShiftCounts};
use crate::time::{is_weekend, YearMonth};

pub const REGULAR_DAY_HOURS: u32 = 8;
pub const BAYRAM_EVE_HOURS: u32 = 5;

/// Hours owed by the contract on `date`.
pub fn contracted_hours_for(date: NaiveDate, calendar: &HolidayCalendar) -> u32 {
    match calendar.day_kind(date) {
        DayKind::BayramEve => BAYRAM_EVE_HOURS,
        DayKind::Weekend | DayKind::Holiday => 0,
        DayKind::Workday => REGULAR_DAY_HOURS,
    }
}

/// Hours credited on `date`. An eve always counts 5, whatever is assigned;
/// otherwise an assigned shift counts in full, even on weekends and holidays.
pub fn worked_hours_for(date: NaiveDate, shift: Option<ShiftType>, calendar: &HolidayCalendar) -> u32 {
    if calendar.is_bayram_eve(date) {
        return BAYRAM_EVE_HOURS;
    }
    shift.map(ShiftType::hours).unwrap_or(0)
}

pub fn is_working_day(date: NaiveDate, calendar: &HolidayCalendar) -> bool {
    !is_weekend(date) && !calendar.is_holiday(date)
}

/// One line of the per-day hour table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DayHours {
    pub date: NaiveDate,
    pub kind: DayKind,
    pub shift: Option<ShiftType>,
    pub contracted_hours: u32,
    pub worked_hours: u32,
}

pub fn month_breakdown(store: &ScheduleStore, month: YearMonth, calendar: &HolidayCalendar) -> Vec<DayHours> {
    month
        .days()
        .map(|date| {
            let shift = store.get(date);
            DayHours {
                date,
                kind: calendar.day_kind(date),
                shift,
                contracted_hours: contracted_hours_for(date, calendar),
                worked_hours: worked_hours_for(date, shift, calendar),
            }
        })
        .collect()
}

pub fn compute_overtime(store: &ScheduleStore, month: YearMonth, calendar: &HolidayCalendar) -> OvertimeResult {
    let mut worked_hours = 0;
    let mut contracted_hours = 0;
    let mut working_days = 0;

    for date in month.days() {
        worked_hours += worked_hours_for(date, store.get(date), calendar);
        contracted_hours += contracted_hours_for(date, calendar);
        if is_working_day(date, calendar) {
            working_days += 1;
        }
    }

    OvertimeResult {
        worked_hours,
        expected_hours: working_days * REGULAR_DAY_HOURS,
        working_days,
        overtime_hours: worked_hours.saturating_sub(contracted_hours),
        contracted_hours,
    }
}

pub fn counts_by_type(store: &ScheduleStore, month: YearMonth) -> ShiftCounts {
    let mut counts = ShiftCounts::default();
    for (_, shift) in store.entries_in(month) {
        counts.add(shift);
    }
    counts
}
