use serde::{Deserialize, Serialize};

use crate::model::shift::ShiftType;
use crate::model::stats::OvertimeResult;
use crate::service::overtime::DayHours;
use crate::time::YearMonth;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShiftCountDto {
    pub shift: ShiftType,
    pub label: String,
    pub hours: u32,
    pub count: u32,
}

/// Everything the statistics view shows for one month.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthReport {
    pub month: YearMonth,
    pub title: String,
    pub counts: Vec<ShiftCountDto>,
    pub overtime: OvertimeResult,
    pub missing_hours: u32,
    pub days: Vec<DayHours>,
}

impl MonthReport {
    pub fn assigned_days(&self) -> u32 {
        self.counts.iter().map(|c| c.count).sum()
    }
}
