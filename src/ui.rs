pub mod history;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use gauntlet::{
    challenge::{Direction, Mode},
    engine::ChallengeView,
    session::{FinishReason, Phase},
    util,
};

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

fn badges(view: &ChallengeView) -> Line<'static> {
    let mode = match view.mode {
        Mode::Pick => "pick",
        Mode::Type => "type",
    };
    let direction = match view.direction {
        Direction::Forward => "forward",
        Direction::Reverse => "reverse",
    };
    let badge = Style::default().fg(Color::Black).bg(Color::Cyan);

    let mut spans = vec![
        Span::styled(format!(" {} ", view.dojo_label), badge.add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(format!(" {mode} "), badge),
    ];
    if view.supports_reverse_mode {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {direction} "), badge));
    }
    if !view.selected_sets.is_empty() {
        spans.push(Span::styled(
            format!("  {}", view.selected_sets.join(", ")),
            italic(),
        ));
    }
    Line::from(spans)
}

fn scoreline(view: &ChallengeView) -> String {
    let mut line = format!(
        "score {} / {}   streak {}",
        view.score, view.attempts, view.streak
    );
    if let Some(remaining) = view.remaining {
        line.push_str("   ");
        line.push_str(&util::format_countdown(remaining.as_secs_f64()));
    }
    line
}

fn render_idle(view: &ChallengeView, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(badges(view))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let message = match view.remaining {
        Some(limit) => format!(
            "BLITZ - {} on the clock. Press (enter) to start",
            util::format_countdown(limit.as_secs_f64())
        ),
        None => "Press (enter) to start".to_string(),
    };
    let middle = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(chunks[1]);
    Paragraph::new(Span::styled(
        message,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(middle[1], buf);

    Paragraph::new(Span::styled(
        "(tab) pick/type   (ctrl+r) direction   (esc) quit",
        italic(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);
}

/// Numbered options padded to one column width so the block centers evenly
fn option_lines(view: &ChallengeView) -> Vec<Line<'static>> {
    let width = view
        .options
        .iter()
        .map(|option| option.width())
        .max()
        .unwrap_or(0);
    let picked = view
        .last_verdict
        .as_ref()
        .filter(|verdict| !verdict.correct)
        .map(|verdict| verdict.answer.as_str());

    view.options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let padding = " ".repeat(width.saturating_sub(option.width()));
            let text = format!("{}. {option}{padding}", idx + 1);
            let style = if view.highlight == Some(idx) {
                bold().fg(Color::Green)
            } else if view.phase == Phase::Evaluated && picked == Some(option.as_str()) {
                bold().fg(Color::Red)
            } else if view.phase == Phase::Evaluated {
                dim_bold()
            } else {
                bold()
            };
            Line::from(Span::styled(text, style))
        })
        .collect()
}

fn render_question(app: &App, view: &ChallengeView, area: Rect, buf: &mut Buffer) {
    let body_lines = match view.mode {
        Mode::Pick => view.options.len().max(1) as u16,
        Mode::Type => 1,
    };

    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),          // badges
            Constraint::Length(1),          // score and timer
            Constraint::Min(1),             // spacer
            Constraint::Length(1),          // prompt
            Constraint::Length(1),          // spacer
            Constraint::Length(body_lines), // options or input
            Constraint::Length(1),          // spacer
            Constraint::Length(2),          // feedback
            Constraint::Min(1),             // spacer
            Constraint::Length(1),          // legend
        ])
        .split(area);

    Paragraph::new(badges(view))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(scoreline(view), dim_bold()))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    if let Some(prompt) = &view.prompt {
        Paragraph::new(Span::styled(prompt.clone(), bold().fg(Color::Magenta)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[3], buf);
    }

    match view.mode {
        Mode::Pick => {
            Paragraph::new(option_lines(view))
                .alignment(Alignment::Center)
                .render(chunks[5], buf);
        }
        Mode::Type => {
            let shown = match (&view.last_verdict, view.phase) {
                (Some(verdict), Phase::Evaluated) => verdict.answer.clone(),
                _ => app.input.clone(),
            };
            let line = Line::from(vec![
                Span::styled("> ", dim_bold()),
                Span::styled(shown, bold()),
                Span::styled(
                    if view.phase == Phase::Presenting { "_" } else { "" },
                    Style::default().add_modifier(Modifier::SLOW_BLINK),
                ),
            ]);
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .render(chunks[5], buf);
        }
    }

    if let (Phase::Evaluated, Some(verdict)) = (view.phase, &view.last_verdict) {
        let feedback = if verdict.correct {
            vec![Line::from(Span::styled("Correct!", bold().fg(Color::Green)))]
        } else {
            vec![
                Line::from(Span::styled("Incorrect", bold().fg(Color::Red))),
                Line::from(Span::styled(
                    format!("expected: {}", verdict.expected),
                    bold(),
                )),
            ]
        };
        Paragraph::new(feedback)
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
    }

    let legend = match (view.phase, view.mode) {
        (Phase::Evaluated, _) => {
            "(enter) next   (tab) pick/type   (ctrl+r) direction   (q) finish   (esc) cancel"
        }
        (_, Mode::Pick) => "(1-9) pick   (esc) cancel",
        (_, Mode::Type) => "(enter) submit   (esc) cancel",
    };
    Paragraph::new(Span::styled(legend, italic()))
        .alignment(Alignment::Center)
        .render(chunks[9], buf);
}

fn finish_message(reason: Option<FinishReason>) -> &'static str {
    match reason {
        Some(FinishReason::TimeExpired) => "Time's up!",
        Some(FinishReason::PoolExhausted) => "All questions done",
        Some(FinishReason::Cancelled) => "Session cancelled",
        Some(FinishReason::Stopped) | None => "Session finished",
    }
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let summary = app.challenge.summary();

    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // spacer
            Constraint::Length(1), // title
            Constraint::Length(1), // spacer
            Constraint::Length(1), // score and accuracy
            Constraint::Length(1), // pace
            Constraint::Length(1), // sets
            Constraint::Min(1),    // spacer
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        finish_message(summary.finish_reason),
        bold().fg(Color::Yellow),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!(
            "{} / {}   {:.0}% acc   best streak {}",
            summary.score, summary.attempts, summary.accuracy, summary.best_streak
        ),
        bold(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    let pace = match (summary.mean_response_secs, summary.response_std_dev) {
        (Some(mean), Some(sd)) => format!(
            "{mean:.2}s per answer (sd {sd:.2})   {:.1}s total",
            summary.elapsed_secs
        ),
        (Some(mean), None) => format!("{mean:.2}s per answer   {:.1}s total", summary.elapsed_secs),
        _ => format!("{:.1}s total", summary.elapsed_secs),
    };
    Paragraph::new(Span::styled(pace, dim_bold()))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    let sets = format!(
        "{} · {} · {}{}",
        summary.dojo_label,
        summary.mode,
        summary.direction,
        if summary.selected_sets.is_empty() {
            String::new()
        } else {
            format!(" · {}", summary.selected_sets.join(", "))
        }
    );
    Paragraph::new(Span::styled(
        sets,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(chunks[5], buf);

    Paragraph::new(Span::styled("(r)etry / (h)istory / (esc)ape", italic()))
        .render(chunks[7], buf);
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.challenge.view();

        match (self.state, view.phase) {
            (AppState::Results, _) | (_, Phase::Finished) => render_results(self, area, buf),
            (_, Phase::Idle) => render_idle(&view, area, buf),
            (_, Phase::Presenting | Phase::Evaluated) => render_question(self, &view, area, buf),
        }
    }
}
