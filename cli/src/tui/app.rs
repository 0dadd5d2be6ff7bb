use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use nobet_core::service::dto::MonthReport;
use nobet_core::{HolidayCalendar, MonthReportUseCase, ScheduleRepository, ScheduleService, ShiftType, YearMonth};

pub enum InputMode {
    Normal,
    Picking,
}

pub struct App<R: ScheduleRepository> {
    pub service: ScheduleService<R>,
    pub calendar: HolidayCalendar,
    pub month: YearMonth,
    pub selected: NaiveDate,
    pub today: NaiveDate,
    pub input_mode: InputMode,
    pub status: Option<String>,
    dirty: Rc<Cell<bool>>,
}

impl<R: ScheduleRepository> App<R> {
    pub fn new(mut service: ScheduleService<R>, calendar: HolidayCalendar, today: NaiveDate) -> App<R> {
        let dirty = Rc::new(Cell::new(false));
        let flag = Rc::clone(&dirty);
        service.store_mut().subscribe(Box::new(move |_| flag.set(true)));

        App {
            service,
            calendar,
            month: YearMonth::of(today),
            selected: today,
            today,
            input_mode: InputMode::Normal,
            status: None,
            dirty,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn report(&self) -> MonthReport {
        MonthReportUseCase::new(&self.service, &self.calendar).build(self.month)
    }

    pub fn selected_shift(&self) -> Option<ShiftType> {
        self.service.get(self.selected)
    }

    /// Moves the cursor by `days`, following it into other months.
    pub fn move_days(&mut self, days: i64) {
        self.selected += Duration::days(days);
        self.month = YearMonth::of(self.selected);
    }

    pub fn next_month(&mut self) {
        self.jump_to(self.month.next());
    }

    pub fn previous_month(&mut self) {
        self.jump_to(self.month.previous());
    }

    pub fn go_to_today(&mut self) {
        self.selected = self.today;
        self.month = YearMonth::of(self.today);
    }

    // keeps the day of month, clamped to the target month's length
    fn jump_to(&mut self, month: YearMonth) {
        let day = self.selected.day().min(month.day_count());
        self.month = month;
        self.selected = month.first_day() + Duration::days(day as i64 - 1);
    }

    pub fn open_picker(&mut self) {
        self.input_mode = InputMode::Picking;
    }

    pub fn close_picker(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Handles `0`-`5` in picker or normal mode: 1-5 assign, 0 clears.
    pub fn pick(&mut self, key: char) {
        let shift = match key.to_digit(10) {
            Some(0) => None,
            Some(n @ 1..=5) => Some(ShiftType::ALL[n as usize - 1]),
            _ => return,
        };
        self.assign(shift);
        self.close_picker();
    }

    pub fn assign(&mut self, shift: Option<ShiftType>) {
        self.service.set(self.selected, shift);
        self.status = Some(match shift {
            Some(shift) => format!("{}: {} ({})", self.selected, shift.name(), shift.label()),
            None => format!("{}: cleared", self.selected),
        });
    }

    pub fn save(&mut self) -> Result<()> {
        self.service.save()?;
        self.dirty.set(false);
        self.status = Some(format!("Saved {} day(s)", self.service.store().len()));
        Ok(())
    }

    /// Saves, or puts the failure in the status line. Returns whether the save
    /// went through; edits stay in memory either way.
    pub fn try_save(&mut self) -> bool {
        match self.save() {
            Ok(()) => true,
            Err(e) => {
                self.status = Some(format!("Save failed: {:#}", e));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default, Clone)]
    struct MockScheduleRepo {
        saved: Rc<RefCell<Vec<(NaiveDate, ShiftType)>>>,
    }

    impl ScheduleRepository for MockScheduleRepo {
        fn load(&self) -> Result<Vec<(NaiveDate, ShiftType)>> {
            Ok(self.saved.borrow().clone())
        }
        fn save(&self, entries: &[(NaiveDate, ShiftType)]) -> Result<()> {
            *self.saved.borrow_mut() = entries.to_vec();
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app(repo: MockScheduleRepo, today: NaiveDate) -> App<MockScheduleRepo> {
        App::new(ScheduleService::open(repo).unwrap(), HolidayCalendar::default(), today)
    }

    #[test]
    fn test_navigation_follows_months() {
        let mut app = app(MockScheduleRepo::default(), date(2024, 1, 31));

        app.next_month();
        assert_eq!(app.selected, date(2024, 2, 29));
        app.move_days(1);
        assert_eq!(app.month, YearMonth::new(2024, 3).unwrap());
        app.move_days(-7);
        assert_eq!(app.selected, date(2024, 2, 23));
        app.previous_month();
        assert_eq!(app.selected, date(2024, 1, 23));
        app.go_to_today();
        assert_eq!(app.selected, date(2024, 1, 31));
    }

    #[test]
    fn test_pick_assigns_and_marks_dirty() {
        let repo = MockScheduleRepo::default();
        let mut app = app(repo.clone(), date(2024, 3, 4));
        assert!(!app.is_dirty());

        app.open_picker();
        app.pick('3');
        assert_eq!(app.selected_shift(), Some(ShiftType::Full));
        assert!(matches!(app.input_mode, InputMode::Normal));
        assert!(app.is_dirty());

        app.pick('9');
        assert_eq!(app.selected_shift(), Some(ShiftType::Full));

        app.save().unwrap();
        assert!(!app.is_dirty());
        assert_eq!(*repo.saved.borrow(), vec![(date(2024, 3, 4), ShiftType::Full)]);

        app.pick('0');
        assert_eq!(app.selected_shift(), None);
        assert!(app.is_dirty());
    }

    struct ReadOnlyRepo;

    impl ScheduleRepository for ReadOnlyRepo {
        fn load(&self) -> Result<Vec<(NaiveDate, ShiftType)>> {
            Ok(Vec::new())
        }
        fn save(&self, _entries: &[(NaiveDate, ShiftType)]) -> Result<()> {
            Err(anyhow::anyhow!("read-only file system"))
        }
    }

    #[test]
    fn test_failed_save_keeps_edits() {
        let mut app = App::new(
            ScheduleService::open(ReadOnlyRepo).unwrap(),
            HolidayCalendar::default(),
            date(2024, 3, 4),
        );
        app.pick('1');

        assert!(!app.try_save());
        assert!(app.is_dirty());
        assert_eq!(app.selected_shift(), Some(ShiftType::Morning));
        assert!(app.status.as_deref().unwrap_or_default().contains("read-only"));
    }

    #[test]
    fn test_try_save_clears_dirty_flag() {
        let repo = MockScheduleRepo::default();
        let mut app = app(repo.clone(), date(2024, 3, 4));
        app.pick('4');

        assert!(app.try_save());
        assert!(!app.is_dirty());
        assert_eq!(*repo.saved.borrow(), vec![(date(2024, 3, 4), ShiftType::Day16)]);
    }

    #[test]
    fn test_report_tracks_current_month() {
        let mut app = app(MockScheduleRepo::default(), date(2024, 3, 4));
        app.pick('2');
        let report = app.report();
        assert_eq!(report.title, "March 2024");
        assert_eq!(report.overtime.worked_hours, 16);

        app.next_month();
        assert_eq!(app.report().overtime.worked_hours, 0);
    }
}
