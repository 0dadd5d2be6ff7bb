pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use error::DecodeFormatError;
pub use input::{expand_key, parse_assignments, parse_shift_arg};
pub use model::calendar::{DayKind, HolidayCalendar};
pub use model::schedule::{ScheduleChange, ScheduleStore};
pub use model::shift::{Rgb, ShiftType};
pub use model::stats::{OvertimeResult, ShiftCounts};
pub use repository::{FileHolidayRepository, FileScheduleRepository, ScheduleRepository};
pub use service::dto::MonthReport;
pub use service::schedule_service::ScheduleService;
pub use time::{parse_human_date, YearMonth};
pub use usecase::month_report::MonthReportUseCase;
