use nobet_core::service::dto::MonthReport;
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Gauge, Paragraph},
};

use crate::tui::ui::rgb;

// --- THEME ---
struct Theme {
    muted: Color,
    text: Color,
    worked: Color,
    overtime: Color,
    missing: Color,
}

const THEME: Theme = Theme {
    muted: Color::DarkGray,
    text: Color::White,
    worked: Color::Green,
    overtime: Color::Red,
    missing: Color::Yellow,
};

pub fn draw_stats_panel(frame: &mut Frame, report: &MonthReport, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Summary
            Constraint::Min(6),     // Shift counts
            Constraint::Length(3),  // Gauge
        ])
        .split(area);

    draw_summary(frame, report, chunks[0]);
    draw_counts(frame, report, chunks[1]);
    draw_gauge(frame, report, chunks[2]);
}

fn value_line(name: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<11}", name), Style::default().fg(THEME.muted)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn draw_summary(frame: &mut Frame, report: &MonthReport, area: Rect) {
    let overtime = &report.overtime;
    let text = vec![
        Line::from(vec![Span::styled(report.title.clone(), Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(""),
        value_line("Worked:", format!("{} h", overtime.worked_hours), THEME.worked),
        value_line("Overtime:", format!("{} h", overtime.overtime_hours), THEME.overtime),
        value_line("Missing:", format!("{} h", report.missing_hours), THEME.missing),
        value_line(
            "Expected:",
            format!("{} d × 8 = {} h", overtime.working_days, overtime.expected_hours),
            THEME.text,
        ),
        value_line("Contracted:", format!("{} h", overtime.contracted_hours), THEME.text),
        value_line("Assigned:", format!("{} day(s)", report.assigned_days()), THEME.text),
    ];

    let block = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Summary "),
    );
    frame.render_widget(block, area);
}

fn draw_counts(frame: &mut Frame, report: &MonthReport, area: Rect) {
    let bars: Vec<Bar> = report
        .counts
        .iter()
        .map(|count| {
            Bar::default()
                .label(count.label.as_str())
                .value(u64::from(count.count))
                .style(Style::default().fg(rgb(count.shift.color())))
                .text_value(count.count.to_string())
        })
        .collect();

    let max = report.counts.iter().map(|c| u64::from(c.count)).max().unwrap_or(0).max(5);
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted))
                .title(" Shifts "),
        )
        .bar_width(5)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars))
        .max(max);
    frame.render_widget(chart, area);
}

fn draw_gauge(frame: &mut Frame, report: &MonthReport, area: Rect) {
    let overtime = &report.overtime;
    let ratio = if overtime.expected_hours > 0 {
        f64::from(overtime.worked_hours) / f64::from(overtime.expected_hours)
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Worked vs Expected ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted)),
        )
        .gauge_style(Style::default().fg(if ratio > 1.0 { THEME.overtime } else { THEME.worked }))
        .ratio(ratio.min(1.0))
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, area);
}
