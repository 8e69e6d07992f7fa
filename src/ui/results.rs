//! Score screen shown after a submitted attempt.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;

use super::widgets;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = &app.student.result else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let percentage = result.percentage();
    let score = app.student.score().unwrap_or_default();

    let summary = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Natija: {}", score),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", percentage),
            Style::default().fg(widgets::grade_color(percentage)).bold(),
        )),
        Line::from(""),
        Line::from("Sizning javoblaringiz admin paneliga yuborildi.".fg(Color::DarkGray)),
    ];
    let widget = Paragraph::new(summary).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);

    let lines: Vec<Line> = result
        .answers
        .iter()
        .enumerate()
        .map(|(index, answer)| {
            let (symbol, color) = if answer.is_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    widgets::truncate(&answer.question_text, QUESTION_PREVIEW_LENGTH),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("  → {}", answer.option_text),
                    Style::default().fg(color),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(widgets::panel("Javoblaringiz"))
        .scroll((app.student.result_scroll as u16, 0));
    frame.render_widget(widget, chunks[2]);

    frame.render_widget(
        widgets::controls("j/k scroll  ·  n yangi urinish  ·  esc orqaga  ·  q quit"),
        chunks[3],
    );
}
