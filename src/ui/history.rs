use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use gauntlet::history::HistoryRecord;

use crate::App;

/// Pure presenter for a single past session
pub fn present_row(record: &HistoryRecord) -> Row<'static> {
    let accuracy_color = if record.accuracy >= 90.0 {
        Color::Green
    } else if record.accuracy >= 60.0 {
        Color::Yellow
    } else {
        Color::Red
    };

    let kind = if record.timed {
        format!("{} {} blitz", record.mode, record.direction)
    } else {
        format!("{} {}", record.mode, record.direction)
    };

    let pace = record
        .mean_response_secs
        .map(|secs| format!("{secs:.2}s"))
        .unwrap_or_else(|| "—".to_string());

    Row::new(vec![
        Cell::from(record.date.clone()),
        Cell::from(record.dojo.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(kind),
        Cell::from(format!("{} / {}", record.score, record.attempts)),
        Cell::from(format!("{:.0}%", record.accuracy)).style(Style::default().fg(accuracy_color)),
        Cell::from(record.best_streak.to_string()),
        Cell::from(pace),
        Cell::from(record.sets.clone()),
    ])
}

/// Render the session history screen
pub fn render_history(app: &mut App, f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Instructions
        ])
        .split(area);

    let title = Paragraph::new(format!("Past Sessions ({})", app.history_rows.len()))
        .block(Block::default().borders(Borders::ALL).title("History"))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    if app.history_rows.is_empty() {
        let no_data = Paragraph::new("No sessions recorded yet. Finish a drill to start one.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(no_data, chunks[1]);
    } else {
        let table_height = chunks[1].height.saturating_sub(3) as usize; // borders + header
        let max_scroll = app.history_rows.len().saturating_sub(table_height);
        if app.history_scroll > max_scroll {
            app.history_scroll = max_scroll;
        }

        let header = Row::new(vec![
            Cell::from("Date"),
            Cell::from("Dojo"),
            Cell::from("Kind"),
            Cell::from("Score"),
            Cell::from("Acc"),
            Cell::from("Streak"),
            Cell::from("Pace"),
            Cell::from("Sets"),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = app
            .history_rows
            .iter()
            .skip(app.history_scroll)
            .take(table_height)
            .map(present_row)
            .collect();

        let widths = [
            Constraint::Length(19), // Date
            Constraint::Length(10), // Dojo
            Constraint::Length(20), // Kind
            Constraint::Length(9),  // Score
            Constraint::Length(5),  // Acc
            Constraint::Length(6),  // Streak
            Constraint::Length(6),  // Pace
            Constraint::Min(10),    // Sets
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Sessions"))
            .column_spacing(1);

        f.render_widget(table, chunks[1]);
    }

    let instructions = Paragraph::new("(↑/↓) scroll  (Home) top  (b/esc) back")
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(instructions, chunks[2]);
}
