use crate::model::shift::ShiftType;
use anyhow::Result;
use chrono::NaiveDate;

pub trait ScheduleRepository {
    fn load(&self) -> Result<Vec<(NaiveDate, ShiftType)>>;
    fn save(&self, entries: &[(NaiveDate, ShiftType)]) -> Result<()>;
}
