use chrono::{Datelike, NaiveDate};
use crossterm::style::{self, Stylize};
use nobet_core::service::dto::MonthReport;
use nobet_core::{DayKind, HolidayCalendar, Rgb, ScheduleStore, ShiftType, YearMonth};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use unicode_width::UnicodeWidthStr;

const WEEKDAY_HEADER: &str = " Mo  Tu  We  Th  Fr  Sa  Su";

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Shift")]
    shift: String,
    #[tabled(rename = "Hours")]
    window: String,
    #[tabled(rename = "Days")]
    count: u32,
    #[tabled(rename = "Total (h)")]
    total: u32,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    kind: String,
    #[tabled(rename = "Shift")]
    shift: String,
    #[tabled(rename = "Contracted")]
    contracted: u32,
    #[tabled(rename = "Worked")]
    worked: u32,
}

#[derive(Tabled)]
struct HolidayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
}

fn term_color(rgb: Rgb) -> style::Color {
    style::Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

fn text_on(rgb: Rgb) -> style::Color {
    if rgb.is_dark() {
        style::Color::White
    } else {
        style::Color::Black
    }
}

fn day_cell(date: NaiveDate, store: &ScheduleStore, calendar: &HolidayCalendar, today: NaiveDate) -> String {
    let text = format!(" {:>2} ", date.day());
    let cell = match store.get(date) {
        Some(shift) => text.with(text_on(shift.color())).on(term_color(shift.color())),
        None => match calendar.day_kind(date) {
            DayKind::Weekend | DayKind::Holiday => text.red().bold(),
            DayKind::BayramEve => text.yellow(),
            DayKind::Workday => text.stylize(),
        },
    };
    if date == today {
        cell.underlined().to_string()
    } else {
        cell.to_string()
    }
}

pub fn legend_line() -> String {
    let width = ShiftType::ALL
        .iter()
        .map(|s| UnicodeWidthStr::width(s.label()))
        .max()
        .unwrap_or(0);
    ShiftType::ALL
        .iter()
        .map(|shift| {
            let swatch = "  ".on(term_color(shift.color()));
            format!("{} {:<width$} {:>2}h", swatch, shift.label(), shift.hours(), width = width)
        })
        .collect::<Vec<_>>()
        .join("   ")
}

pub fn print_calendar(store: &ScheduleStore, month: YearMonth, calendar: &HolidayCalendar, today: NaiveDate) {
    let title = month.title();
    let pad = UnicodeWidthStr::width(WEEKDAY_HEADER).saturating_sub(UnicodeWidthStr::width(title.as_str())) / 2;
    println!("{}{}", " ".repeat(pad), title.bold());
    println!("{}", WEEKDAY_HEADER.dark_grey());

    for week in month.weeks() {
        let line: String = week
            .iter()
            .map(|day| match day {
                Some(date) => day_cell(*date, store, calendar, today),
                None => "    ".to_string(),
            })
            .collect();
        println!("{}", line);
    }
    println!();
    println!("{}", legend_line());
}

pub fn print_report(report: &MonthReport, with_days: bool) {
    println!("\n\x1b[1;36m{} Statistics\x1b[0m", report.title);

    let counts: Vec<CountRow> = report
        .counts
        .iter()
        .map(|c| CountRow {
            shift: c.shift.name().to_string(),
            window: c.label.clone(),
            count: c.count,
            total: c.count * c.hours,
        })
        .collect();
    let mut table = Table::new(counts);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);

    let overtime = &report.overtime;
    let summary = vec![
        SummaryRow {
            name: "Total worked",
            value: format!("{} h", overtime.worked_hours),
        },
        SummaryRow {
            name: "Overtime",
            value: format!("{} h", overtime.overtime_hours),
        },
        SummaryRow {
            name: "Missing",
            value: format!("{} h", report.missing_hours),
        },
        SummaryRow {
            name: "Expected",
            value: format!(
                "{} days × 8 h = {} h",
                overtime.working_days, overtime.expected_hours
            ),
        },
        SummaryRow {
            name: "Contracted",
            value: format!("{} h", overtime.contracted_hours),
        },
    ];
    let mut table = Table::new(summary);
    table.with(Style::modern());
    println!("{}", table);

    if with_days {
        let rows: Vec<DayRow> = report
            .days
            .iter()
            .map(|day| DayRow {
                date: day.date.format("%Y-%m-%d %a").to_string(),
                kind: kind_name(day.kind).to_string(),
                shift: day.shift.map(|s| s.name().to_string()).unwrap_or_else(|| "-".to_string()),
                contracted: day.contracted_hours,
                worked: day.worked_hours,
            })
            .collect();
        let mut table = Table::new(rows);
        table
            .with(Style::modern())
            .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
        println!("{}", table);
    }
}

pub fn print_holidays(calendar: &HolidayCalendar, year: i32) {
    let bayram_starts: Vec<NaiveDate> = calendar.bayram_starts().collect();
    let mut rows: Vec<HolidayRow> = calendar
        .holidays()
        .filter(|date| date.year() == year)
        .map(|date| HolidayRow {
            date: date.format("%Y-%m-%d %a").to_string(),
            kind: if bayram_starts.contains(&date) { "bayram start" } else { "holiday" },
        })
        .collect();
    // starts written by hand into holidays.json need not be holidays
    rows.extend(
        bayram_starts
            .iter()
            .filter(|date| date.year() == year && !calendar.is_holiday(**date))
            .map(|date| HolidayRow {
                date: date.format("%Y-%m-%d %a").to_string(),
                kind: "bayram start",
            }),
    );
    rows.sort_by(|a, b| a.date.cmp(&b.date));

    if rows.is_empty() {
        println!("No holidays configured for {}.", year);
        return;
    }
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

pub fn kind_name(kind: DayKind) -> &'static str {
    match kind {
        DayKind::Workday => "workday",
        DayKind::Weekend => "weekend",
        DayKind::Holiday => "holiday",
        DayKind::BayramEve => "bayram eve",
    }
}
