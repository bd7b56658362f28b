use std::collections::HashMap;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Sparkline},
    Frame,
};
use revcal_core::calendar::date_at;
use revcal_core::service::dto::format_day;
use revcal_core::{format_money, HeatmapCell, Rgb, WEEKDAY_LABELS};

use crate::tui::app::App;

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    spark: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    spark: Color::Rgb(0x4e, 0x10, 0xa5),
};

const CELL: &str = "■ ";
const EMPTY_CELL: &str = "· ";
const ROW_LABEL_WIDTH: usize = 4;

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),  // Header / year selector
            Constraint::Length(11), // Grid + legend
            Constraint::Min(8),     // Detail
            Constraint::Length(1),  // Footer
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);
    draw_grid(f, app, main_chunks[1]);

    let detail_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Length(1), Constraint::Percentage(55)])
        .split(main_chunks[2]);

    draw_detail(f, app, detail_chunks[0]);
    draw_sparkline(f, app, detail_chunks[2]);
    draw_footer(f, app, main_chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(1), Constraint::Length(30)])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "REVENUE CALENDAR",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    f.render_widget(title, header_layout[0]);

    let arrow_style = |enabled: bool| Style::default().fg(if enabled { THEME.text } else { THEME.muted });
    let nav_text = Line::from(vec![
        Span::styled(" < ", arrow_style(app.view.has_prev)),
        Span::styled(
            format!(" {} ", app.year()),
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" > ", arrow_style(app.view.has_next)),
    ]);
    let nav = Paragraph::new(nav_text)
        .alignment(Alignment::Right)
        .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    f.render_widget(nav, header_layout[2]);

    f.render_widget(
        Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(THEME.muted)),
        area,
    );
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let cells: HashMap<(u32, u32), &HeatmapCell> =
        app.view.cells.iter().map(|c| ((c.week, c.row), c)).collect();

    let mut lines = Vec::with_capacity(9);

    // Week numbers, every other column
    let mut header = " ".repeat(ROW_LABEL_WIDTH);
    for label in &app.view.week_labels {
        match label {
            Some(n) => header.push_str(&format!("{:<2}", n)),
            None => header.push_str("  "),
        }
    }
    lines.push(Line::from(Span::styled(header, Style::default().fg(THEME.muted))));

    for (row, day_label) in WEEKDAY_LABELS.iter().enumerate() {
        let row = row as u32;
        let mut spans = vec![Span::styled(
            format!("{:<width$}", day_label, width = ROW_LABEL_WIDTH),
            Style::default().fg(THEME.muted),
        )];

        for week in 0..app.view.columns {
            let selected = app.cursor.week == week && app.cursor.row == row;
            let span = match (date_at(app.year(), week, row), cells.get(&(week, row))) {
                (None, _) => Span::raw("  "),
                (Some(_), Some(cell)) => Span::styled(CELL, Style::default().fg(rgb(cell.color))),
                (Some(_), None) => Span::styled(EMPTY_CELL, Style::default().fg(THEME.muted)),
            };
            let span = if selected {
                span.patch_style(Style::default().bg(THEME.text).add_modifier(Modifier::BOLD))
            } else {
                span
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    lines.push(legend_line(app));

    let grid = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {} · {} ", app.year(), format_money(app.view.year_total)))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted)),
    );
    f.render_widget(grid, area);
}

fn legend_line(app: &App) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{}Less ", " ".repeat(ROW_LABEL_WIDTH)),
        Style::default().fg(THEME.muted),
    )];
    for entry in &app.view.legend {
        spans.push(Span::styled(CELL, Style::default().fg(rgb(entry.color))));
    }
    spans.push(Span::styled("More", Style::default().fg(THEME.muted)));

    if let Some(max) = app.view.legend.last() {
        spans.push(Span::styled(
            format!("  (0 - {} per day)", format_money(max.value)),
            Style::default().fg(THEME.muted),
        ));
    }
    Line::from(spans)
}

fn draw_detail(f: &mut Frame, app: &App, area: Rect) {
    let label = |s: &'static str| Span::styled(s, Style::default().fg(THEME.muted));

    let text = match (app.selected_date(), app.selected_detail()) {
        (_, Some(detail)) => vec![
            Line::from(Span::styled(detail.day_name, Style::default().fg(THEME.muted))),
            Line::from(Span::styled(
                detail.date_label,
                Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                label("Revenue:    "),
                Span::styled(
                    detail.revenue_label,
                    Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![label("Orders:     "), Span::raw(detail.orders.to_string())]),
            Line::from(vec![label("Avg. qty:   "), Span::raw(detail.avg_quantity_label)]),
            Line::from(vec![label("Avg. price: "), Span::raw(detail.avg_price_label)]),
            Line::from(vec![
                label("Peak hour:  "),
                Span::raw(
                    detail
                        .peak_hour
                        .map(|h| format!("{:02}:00", h))
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ]),
        ],
        (Some(date), None) => vec![
            Line::from(Span::styled(date.format("%A").to_string(), Style::default().fg(THEME.muted))),
            Line::from(Span::styled(
                format_day(date),
                Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(label("No sales on this day")),
        ],
        (None, None) => vec![Line::from(label("No day selected"))],
    };

    let detail = Paragraph::new(text).block(
        Block::default()
            .title(" Day ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted)),
    );
    f.render_widget(detail, area);
}

fn draw_sparkline(f: &mut Frame, app: &App, area: Rect) {
    // Sparkline bars are integers, so draw cents
    let values: Vec<u64> = app
        .selected_sparkline()
        .iter()
        .map(|v| (v.max(0.0) * 100.0).round() as u64)
        .collect();

    let slots = values.len().max(1);
    let title = format!(" Revenue by time of day ({} min) ", 1440 / slots);

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted)),
        )
        .style(Style::default().fg(THEME.spark))
        .data(values);
    f.render_widget(sparkline, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let mut help = vec![
        Span::styled("MOVE: ", Style::default().fg(THEME.muted)),
        Span::styled("←↑↓→/hjkl ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("YEAR: ", Style::default().fg(THEME.muted)),
        Span::styled("[ ] ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ];

    let skipped = app.session.failures().len();
    if skipped > 0 {
        help.push(Span::raw("  "));
        help.push(Span::styled(
            format!("{} rows skipped", skipped),
            Style::default().fg(Color::Yellow),
        ));
    }

    let footer = Paragraph::new(Line::from(help)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}
