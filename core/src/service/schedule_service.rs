use crate::error::DecodeFormatError;
use crate::model::calendar::HolidayCalendar;
use crate::model::schedule::ScheduleStore;
use crate::model::shift::ShiftType;
use crate::model::stats::{OvertimeResult, ShiftCounts};
use crate::repository::codec;
use crate::repository::ScheduleRepository;
use crate::service::overtime::{self, DayHours};
use crate::time::YearMonth;
use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};

/// Entry point for front-ends: owns the store and knows where it is saved.
pub struct ScheduleService<R: ScheduleRepository> {
    repo: R,
    store: ScheduleStore,
}

impl<R: ScheduleRepository> ScheduleService<R> {
    /// Loads the saved schedule from `repo`.
    pub fn open(repo: R) -> Result<Self> {
        let store = ScheduleStore::from_entries(repo.load()?);
        Ok(Self { repo, store })
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ScheduleStore {
        &mut self.store
    }

    pub fn get(&self, date: NaiveDate) -> Option<ShiftType> {
        self.store.get(date)
    }

    pub fn set(&mut self, date: NaiveDate, shift: Option<ShiftType>) {
        self.store.set(date, shift);
    }

    pub fn compute_overtime(&self, month: YearMonth, calendar: &HolidayCalendar) -> OvertimeResult {
        overtime::compute_overtime(&self.store, month, calendar)
    }

    pub fn counts_by_type(&self, month: YearMonth) -> ShiftCounts {
        overtime::counts_by_type(&self.store, month)
    }

    pub fn month_breakdown(&self, month: YearMonth, calendar: &HolidayCalendar) -> Vec<DayHours> {
        overtime::month_breakdown(&self.store, month, calendar)
    }

    pub fn export(&self) -> String {
        info!("exporting {} days", self.store.len());
        codec::encode(&self.store)
    }

    /// Replaces the schedule with `text`. On error the schedule is unchanged.
    pub fn import(&mut self, text: &str) -> Result<usize, DecodeFormatError> {
        match codec::import_into(&mut self.store, text) {
            Ok(count) => {
                info!("imported {} days", count);
                Ok(count)
            }
            Err(e) => {
                warn!("import rejected: {}", e);
                Err(e)
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.repo.save(&self.store.snapshot())
    }
}
