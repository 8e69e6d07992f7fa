//! Small building blocks shared by the screens.

use chrono::{DateTime, Local, Utc};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

pub const TITLE: &str = "TestUZ";

/// Lines of a labelled text input. The focused field shows a cursor.
pub fn text_field<'a>(label: &'a str, value: &'a str, focused: bool, masked: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let shown = if masked {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let marker = if focused { "> " } else { "  " };

    let mut spans = vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{:<14}", label), label_style),
        Span::styled(shown, Style::default().fg(Color::Yellow)),
    ];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

pub fn checkbox<'a>(label: &'a str, checked: bool, focused: bool) -> Line<'a> {
    let style = if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let mark = if checked { "[x] " } else { "[ ] " };
    Line::from(vec![
        Span::styled(if focused { "> " } else { "  " }, style),
        Span::styled(mark, style),
        Span::styled(label, style),
    ])
}

/// Panel with a grey border and a cyan title.
pub fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1))
}

pub fn controls(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray)
}

/// Local date and time of an attempt, e.g. `01 Mar 2025, 14:30`.
pub fn format_date(value: &DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%d %b %Y, %H:%M")
        .to_string()
}

pub fn grade_color(percentage: u32) -> Color {
    match percentage {
        90.. => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

/// A horizontally and vertically centred rectangle inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [_, column, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, cell, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(column);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_text_is_cut_on_char_boundaries() {
        assert_eq!(truncate("o'zbekcha savol", 5), "o'zbe...");
        assert_eq!(truncate("qisqa", 5), "qisqa");
        assert_eq!(truncate("ҳаммаси", 3), "ҳам...");
    }

    #[test]
    fn grade_colors() {
        assert_eq!(grade_color(100), Color::Green);
        assert_eq!(grade_color(75), Color::Cyan);
        assert_eq!(grade_color(50), Color::Yellow);
        assert_eq!(grade_color(0), Color::Red);
    }

    #[test]
    fn masked_field_hides_the_value() {
        let line = text_field("Parol", "secret", false, true);
        let rendered: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(rendered.contains("******"));
        assert!(!rendered.contains("secret"));
    }
}
