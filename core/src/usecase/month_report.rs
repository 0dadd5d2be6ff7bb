use crate::model::calendar::HolidayCalendar;
use crate::repository::ScheduleRepository;
use crate::service::dto::{MonthReport, ShiftCountDto};
use crate::service::schedule_service::ScheduleService;
use crate::time::YearMonth;

pub struct MonthReportUseCase<'a, R: ScheduleRepository> {
    service: &'a ScheduleService<R>,
    calendar: &'a HolidayCalendar,
}

impl<'a, R: ScheduleRepository> MonthReportUseCase<'a, R> {
    pub fn new(service: &'a ScheduleService<R>, calendar: &'a HolidayCalendar) -> Self {
        Self { service, calendar }
    }

    pub fn build(&self, month: YearMonth) -> MonthReport {
        let counts = self
            .service
            .counts_by_type(month)
            .iter()
            .map(|(shift, count)| ShiftCountDto {
                shift,
                label: shift.label().to_string(),
                hours: shift.hours(),
                count,
            })
            .collect();

        let overtime = self.service.compute_overtime(month, self.calendar);

        MonthReport {
            month,
            title: month.title(),
            counts,
            overtime,
            missing_hours: overtime.missing_hours(),
            days: self.service.month_breakdown(month, self.calendar),
        }
    }
}
