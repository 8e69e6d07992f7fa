//! Student screens: name entry and the test itself.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::app::{App, NameField};

use super::widgets::{self, TITLE};

const OPTION_LABELS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

/// Name entry form shown before the test starts.
pub fn render_info(frame: &mut Frame, area: Rect, app: &App) {
    let info = &app.student.info;
    let form_area = widgets::centered(area, 64, 13);

    let status = if app.student.loading {
        Line::from(Span::styled(
            "Savollar yuklanmoqda...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} · Student rejimi", TITLE),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Ism familiyangizni kiriting va testni boshlang.".fg(Color::DarkGray)),
        Line::from(""),
        widgets::text_field(
            "Ism",
            &info.first_name,
            info.focus == NameField::FirstName,
            false,
        ),
        Line::from(""),
        widgets::text_field(
            "Familiya",
            &info.last_name,
            info.focus == NameField::LastName,
            false,
        ),
        Line::from(""),
        status,
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Testni boshlash  ·  [Tab] keyingi maydon  ·  [Esc] orqaga",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).block(widgets::panel("Student"));
    frame.render_widget(widget, form_area);
}

/// One question at a time, with the overall progress on top.
pub fn render_test(frame: &mut Frame, area: Rect, app: &App) {
    let student = &app.student;

    let Some(question) = student.current_question() else {
        let empty = Paragraph::new(vec![
            Line::from(Span::styled(
                "Hozircha savollar yo'q.",
                Style::default().fg(Color::Yellow),
            )),
            Line::from(""),
            Line::from("[Esc] orqaga".fg(Color::DarkGray)),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(empty, widgets::centered(area, 40, 3));
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // Progress
        Constraint::Length(5), // Question text
        Constraint::Fill(1),   // Options
        Constraint::Length(1), // Status
        Constraint::Length(1), // Controls
    ])
    .margin(1)
    .split(area);

    let progress = Line::from(vec![
        Span::styled(
            format!("{} {}", student.info.first_name.trim(), student.info.last_name.trim()),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::styled(
            format!(
                "   Savol {}/{}  ·  javob berildi {}/{}",
                student.current + 1,
                student.questions.len(),
                student.answered_count(),
                student.questions.len()
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(progress), chunks[0]);

    let text = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(text, chunks[1]);

    let chosen = student.answers.get(&question.id).copied();
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);
    for (index, option) in question.options.iter().enumerate() {
        let highlighted = index == student.option_cursor;
        let is_chosen = chosen == Some(option.id);

        let style = if highlighted {
            Style::default().fg(Color::Cyan).bold()
        } else if is_chosen {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if highlighted { ">" } else { " " };
        let radio = if is_chosen { "(•)" } else { "( )" };
        let label = OPTION_LABELS.get(index).copied().unwrap_or('?');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{} ", radio), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.text.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }
    frame.render_widget(
        Paragraph::new(lines).block(widgets::panel("Variantlar")),
        chunks[2],
    );

    let status = if student.loading {
        Span::styled("Javoblar yuborilmoqda...", Style::default().fg(Color::Yellow))
    } else if student.all_answered() {
        Span::styled(
            "Barcha savollarga javob berildi. [S] Javobni yuborish",
            Style::default().fg(Color::Green),
        )
    } else {
        Span::raw("")
    };
    frame.render_widget(
        Paragraph::new(Line::from(status)).alignment(Alignment::Center),
        chunks[3],
    );

    frame.render_widget(
        widgets::controls("j/k variant  ·  space tanlash  ·  ←/→ savol  ·  s yuborish  ·  esc orqaga"),
        chunks[4],
    );
}
