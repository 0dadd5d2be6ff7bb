mod report;
mod tui;

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::{error, info};
use nobet_core::{
    parse_assignments, parse_human_date, parse_shift_arg, FileHolidayRepository, FileScheduleRepository,
    HolidayCalendar, MonthReportUseCase, ScheduleService, YearMonth,
};

const LOG_ENV: &str = "NOBET_LOG";

#[derive(Parser)]
#[command(name = "nobet")]
#[command(about = "Shift calendar with monthly overtime for hospital staff", long_about = None)]
struct Cli {
    /// Directory holding schedule.json and holidays.json (default: ~/.nobet)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Also treat the fixed national public holidays as holidays
    #[arg(long, global = true)]
    national_holidays: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Assign a shift to a day (usage: set 2024-03-04 full)
    Set {
        /// YYYY-MM-DD, today, tom, yesterday, +Nd, -Nd
        date: String,
        /// MORNING, NIGHT, FULL, DAY16, EVENING, a label like 8-24, a prefix, or none
        shift: String,
    },
    /// Assign several days at once (usage: assign 2024-03-04:full 2024-03-05:none)
    Assign {
        #[arg(required = true)]
        pairs: Vec<String>,
    },
    /// Remove the shift of a day
    Clear { date: String },
    /// Print the colour-coded month calendar
    Show { month: Option<YearMonth> },
    /// Print shift counts and worked / overtime / missing hours
    Stats {
        month: Option<YearMonth>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Include the per-day hour table
        #[arg(long)]
        days: bool,
    },
    /// Add a holiday to holidays.json (usage: holiday 2024-04-23, holiday 2024-04-10 --bayram)
    Holiday {
        date: String,
        /// First day of a bayram: a holiday that also makes the weekday before it an eve
        #[arg(long)]
        bayram: bool,
    },
    /// List the configured holidays and bayram starts of a year
    Holidays { year: Option<i32> },
    /// Write the schedule to a JSON file
    Export { path: PathBuf },
    /// Replace the schedule with a JSON file
    Import { path: PathBuf },
    /// Open the interactive calendar
    Tui,
}

fn main() {
    if env::var(LOG_ENV).is_err() {
        env::set_var(LOG_ENV, "warn");
    }
    pretty_env_logger::init_custom_env(LOG_ENV);

    if let Err(e) = run() {
        error!("{:?}", e);
        ::std::process::exit(1);
    }
}

fn load_calendar(cli: &Cli, years: impl IntoIterator<Item = i32>) -> Result<HolidayCalendar> {
    let mut calendar = FileHolidayRepository::new(cli.data_dir.clone())?.load()?;
    if cli.national_holidays {
        for year in years {
            calendar.add_national_holidays(year);
        }
    }
    Ok(calendar)
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let repo = FileScheduleRepository::new(cli.data_dir.clone())?;
    let today = Local::now().date_naive();

    match &cli.command {
        Some(Commands::Set { date, shift }) => {
            let date = parse_human_date(date, today)?;
            let shift = parse_shift_arg(shift)?;
            let mut service = ScheduleService::open(repo)?;
            service.set(date, shift);
            service.save()?;
            match shift {
                Some(shift) => println!("{}: {} ({}, {}h)", date, shift, shift.label(), shift.hours()),
                None => println!("{}: cleared", date),
            }
        }
        Some(Commands::Assign { pairs }) => {
            let assignments = parse_assignments(pairs, today)?;
            let mut service = ScheduleService::open(repo)?;
            for (date, shift) in &assignments {
                service.set(*date, *shift);
            }
            service.save()?;
            println!("Updated {} day(s).", assignments.len());
        }
        Some(Commands::Clear { date }) => {
            let date = parse_human_date(date, today)?;
            let mut service = ScheduleService::open(repo)?;
            service.set(date, None);
            service.save()?;
            println!("{}: cleared", date);
        }
        Some(Commands::Show { month }) => {
            let month = month.unwrap_or_else(YearMonth::current);
            let calendar = load_calendar(&cli, [month.year()])?;
            let service = ScheduleService::open(repo)?;
            report::print_calendar(service.store(), month, &calendar, today);
        }
        Some(Commands::Stats { month, json, days }) => {
            let month = month.unwrap_or_else(YearMonth::current);
            // a bayram starting on the 1st of next month puts its eve in this one
            let calendar = load_calendar(&cli, [month.year(), month.next().year()])?;
            let service = ScheduleService::open(repo)?;
            let month_report = MonthReportUseCase::new(&service, &calendar).build(month);
            if *json {
                println!("{}", serde_json::to_string_pretty(&month_report)?);
            } else {
                report::print_report(&month_report, *days);
            }
        }
        Some(Commands::Holiday { date, bayram }) => {
            let date = parse_human_date(date, today)?;
            let holiday_repo = FileHolidayRepository::new(cli.data_dir.clone())?;
            let mut calendar = holiday_repo.load()?;
            if *bayram {
                calendar.add_bayram_start(date);
            } else {
                calendar.add_holiday(date);
            }
            holiday_repo.save(&calendar)?;
            let eve = date.pred_opt().filter(|day| calendar.is_bayram_eve(*day));
            match (*bayram, eve) {
                (true, Some(eve)) => println!("{}: bayram start, eve on {}", date, eve),
                (true, None) => println!("{}: bayram start, no eve (the day before is a weekend)", date),
                (false, _) => println!("{}: holiday", date),
            }
        }
        Some(Commands::Holidays { year }) => {
            let year = year.unwrap_or_else(|| YearMonth::current().year());
            let calendar = load_calendar(&cli, [year])?;
            report::print_holidays(&calendar, year);
        }
        Some(Commands::Export { path }) => {
            let service = ScheduleService::open(repo)?;
            fs::write(path, service.export())
                .with_context(|| format!("Could not write {}", path.display()))?;
            info!("exported to {}", path.display());
            println!("Exported {} day(s) to {}", service.store().len(), path.display());
        }
        Some(Commands::Import { path }) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Could not read {}", path.display()))?;
            let mut service = ScheduleService::open(repo)?;
            let count = service
                .import(&text)
                .with_context(|| format!("{} was not imported, the schedule is unchanged", path.display()))?;
            service.save()?;
            println!("Imported {} day(s) from {}", count, path.display());
        }
        Some(Commands::Tui) | None => {
            // the TUI pages freely, cover a generous window of years
            let year = YearMonth::current().year();
            let calendar = load_calendar(&cli, (year - 5)..=(year + 5))?;
            tui::run(ScheduleService::open(repo)?, calendar)?;
        }
    }
    Ok(())
}
