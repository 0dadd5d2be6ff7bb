use chrono::Datelike;
use nobet_core::{DayKind, Rgb, ScheduleRepository, ShiftType};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::report::kind_name;
use crate::tui::app::{App, InputMode};
use crate::tui::stats::draw_stats_panel;

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

pub fn text_on(color: Rgb) -> Color {
    if color.is_dark() {
        Color::White
    } else {
        Color::Black
    }
}

pub fn draw<R: ScheduleRepository>(f: &mut Frame, app: &App<R>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    // Header
    let header = Paragraph::new(Line::from(vec![
        Span::styled("NÖBET ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("TAKVİMİM", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Calendar
            Constraint::Length(4), // Selected day
            Constraint::Length(7), // Legend
        ])
        .split(content_chunks[0]);

    let report = app.report();
    draw_calendar(f, app, left_chunks[0]);
    draw_selected_day(f, app, left_chunks[1]);
    draw_legend(f, left_chunks[2]);
    draw_stats_panel(f, &report, content_chunks[1]);

    // Footer
    let footer_text = match &app.status {
        Some(status) => status.clone(),
        None => "←↑↓→/hjkl: Move | n/p: Month | t: Today | Enter: Pick | 1-5: Assign | 0: Clear | w: Save | q: Save & Quit | Q: Quit"
            .to_string(),
    };
    let dirty_mark = if app.is_dirty() { " [modified]" } else { "" };
    let footer = Paragraph::new(format!("{}{}", footer_text, dirty_mark))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);

    if matches!(app.input_mode, InputMode::Picking) {
        draw_picker(f, app, size);
    }
}

fn draw_calendar<R: ScheduleRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let rows: Vec<Row> = app
        .month
        .weeks()
        .into_iter()
        .map(|week| {
            let cells: Vec<Cell> = week
                .iter()
                .map(|day| match day {
                    Some(date) => {
                        let mut style = match app.service.get(*date) {
                            Some(shift) => Style::default().bg(rgb(shift.color())).fg(text_on(shift.color())),
                            None => match app.calendar.day_kind(*date) {
                                DayKind::Weekend | DayKind::Holiday => {
                                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                                }
                                DayKind::BayramEve => Style::default().fg(Color::Yellow),
                                DayKind::Workday => Style::default(),
                            },
                        };
                        if *date == app.today {
                            style = style.add_modifier(Modifier::UNDERLINED);
                        }
                        if *date == app.selected {
                            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                        }
                        Cell::from(format!(" {:>2}", date.day())).style(style)
                    }
                    None => Cell::from(""),
                })
                .collect();
            Row::new(cells).height(2)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(5); 7])
        .header(Row::new(WEEKDAYS.to_vec()).style(Style::default().fg(Color::Yellow)).height(2))
        .column_spacing(1)
        .block(
            Block::default()
                .title(format!(" < {} > ", app.month.title()))
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(table, area);
}

fn draw_selected_day<R: ScheduleRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let date = app.selected;
    let kind = kind_name(app.calendar.day_kind(date));
    let shift_span = match app.selected_shift() {
        Some(shift) => Span::styled(
            format!(" {} {} ({}h) ", shift.name(), shift.label(), shift.hours()),
            Style::default().bg(rgb(shift.color())).fg(text_on(shift.color())),
        ),
        None => Span::styled("no shift", Style::default().fg(Color::DarkGray)),
    };

    let text = vec![Line::from(vec![
        Span::styled(date.format("%Y-%m-%d %A").to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {}  ", kind)),
        shift_span,
    ])];
    let block = Paragraph::new(text).block(
        Block::default()
            .title(" Day ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(block, area);
}

fn draw_legend(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = ShiftType::ALL
        .iter()
        .enumerate()
        .map(|(i, shift)| {
            Line::from(vec![
                Span::styled("  ", Style::default().bg(rgb(shift.color()))),
                Span::raw(format!(" {} {:<8} {:<6} {:>2}h", i + 1, shift.name(), shift.label(), shift.hours())),
            ])
        })
        .collect();
    let legend = Paragraph::new(lines).block(
        Block::default()
            .title(" Legend ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(legend, area);
}

fn draw_picker<R: ScheduleRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let popup = centered_rect(36, 10, area);

    let mut lines: Vec<Line> = ShiftType::ALL
        .iter()
        .enumerate()
        .map(|(i, shift)| {
            let marker = if app.selected_shift() == Some(*shift) { ">" } else { " " };
            Line::from(vec![
                Span::raw(format!("{} {} ", marker, i + 1)),
                Span::styled(
                    format!(" {:<8} {:<6} ", shift.name(), shift.label()),
                    Style::default().bg(rgb(shift.color())).fg(text_on(shift.color())),
                ),
            ])
        })
        .collect();
    lines.push(Line::from("  0  clear"));
    lines.push(Line::from(Span::styled("  Esc: cancel", Style::default().fg(Color::DarkGray))));

    let picker = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" Shift for {} ", app.selected))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(Clear, popup);
    f.render_widget(picker, popup);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
