//! Review of a single submitted attempt.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;

use super::widgets;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(attempt) = app.admin.opened_attempt() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(6), // Summary
        Constraint::Fill(1),   // Answers
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    let percentage = attempt.percentage();
    let summary = vec![
        Line::from(""),
        Line::from(Span::styled(
            attempt.full_name(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(vec![
            Span::styled(
                format!("{}  ({}%)", attempt.score_label(), percentage),
                Style::default().fg(widgets::grade_color(percentage)).bold(),
            ),
            Span::styled(
                format!("   Xato: {}", attempt.incorrect_answers),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(Span::styled(
            widgets::format_date(&attempt.created_at),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(summary).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Color::DarkGray),
        ),
        chunks[0],
    );

    let mut lines: Vec<Line> = Vec::with_capacity(attempt.answers.len() * 3);
    for (index, answer) in attempt.answers.iter().enumerate() {
        let (symbol, status, color) = if answer.is_correct {
            ("+", "To'g'ri", Color::Green)
        } else {
            ("-", "Xato", Color::Red)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(
                format!("{:2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(answer.question_text.as_str(), Style::default().fg(Color::White)),
        ]));
        lines.push(Line::from(vec![
            Span::raw("       Tanlangan: "),
            Span::styled(answer.option_text.as_str(), Style::default().fg(Color::Yellow)),
            Span::styled(format!("  ({})", status), Style::default().fg(color)),
        ]));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Javoblar ro'yxati mavjud emas.",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    let widget = Paragraph::new(lines)
        .block(widgets::panel("Javoblar"))
        .scroll(((app.admin.detail_scroll * 2) as u16, 0));
    frame.render_widget(widget, chunks[1]);

    frame.render_widget(widgets::controls("j/k scroll  ·  esc back"), chunks[2]);
}
