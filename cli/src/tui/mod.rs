pub mod app;
pub mod stats;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use nobet_core::{HolidayCalendar, ScheduleRepository, ScheduleService};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::tui::app::{App, InputMode};

pub fn run<R: ScheduleRepository>(service: ScheduleService<R>, calendar: HolidayCalendar) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(service, calendar, Local::now().date_naive());
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend, R: ScheduleRepository>(terminal: &mut Terminal<B>, app: &mut App<R>) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => {
                    // a failed save keeps the screen open so nothing is lost
                    if app.try_save() {
                        return Ok(());
                    }
                }
                KeyCode::Char('Q') => {
                    if app.is_dirty() {
                        warn!("quitting with unsaved changes");
                    }
                    return Ok(());
                }
                KeyCode::Left | KeyCode::Char('h') => app.move_days(-1),
                KeyCode::Right | KeyCode::Char('l') => app.move_days(1),
                KeyCode::Up | KeyCode::Char('k') => app.move_days(-7),
                KeyCode::Down | KeyCode::Char('j') => app.move_days(7),
                KeyCode::Char('n') | KeyCode::Char(']') | KeyCode::PageDown => app.next_month(),
                KeyCode::Char('p') | KeyCode::Char('[') | KeyCode::PageUp => app.previous_month(),
                KeyCode::Char('t') => app.go_to_today(),
                KeyCode::Enter | KeyCode::Char(' ') => app.open_picker(),
                KeyCode::Char('x') | KeyCode::Delete => app.assign(None),
                KeyCode::Char(c @ '0'..='5') => app.pick(c),
                KeyCode::Char('w') => {
                    app.try_save();
                }
                _ => {}
            },
            InputMode::Picking => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => app.close_picker(),
                KeyCode::Char(c @ '0'..='5') => app.pick(c),
                KeyCode::Char('x') => {
                    app.assign(None);
                    app.close_picker();
                }
                _ => {}
            },
        }
    }
}
