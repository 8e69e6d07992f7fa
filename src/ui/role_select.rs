//! Welcome screen where the user picks a role.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::models::Role;

use super::widgets::{self, TITLE};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .split(area);

    let header = vec![
        Line::from(Span::styled(
            format!("{} platformasiga xush kelibsiz", TITLE),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(
            "Dasturchilar uchun professional test tizimi. Iltimos, o'z rolingizni tanlang."
                .fg(Color::DarkGray),
        ),
        Line::from(format!("Server: {}", app.api_url).fg(Color::DarkGray)),
    ];
    frame.render_widget(
        Paragraph::new(header)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[1],
    );

    let cards = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(34),
        Constraint::Length(2),
        Constraint::Length(34),
        Constraint::Fill(1),
    ])
    .split(chunks[2]);

    render_card(
        frame,
        cards[1],
        "1  Student",
        "Testni bajarish va natijani darhol ko'rish.",
        app.role_cursor == Role::Student,
    );
    render_card(
        frame,
        cards[3],
        "2  Admin",
        "Savollarni boshqarish va Telegram natijalarini kuzatish.",
        app.role_cursor == Role::Admin,
    );

    frame.render_widget(
        widgets::controls("arrows select  ·  enter choose  ·  1/2 shortcut  ·  q quit"),
        chunks[3],
    );
}

fn render_card(frame: &mut Frame, area: Rect, title: &str, description: &str, selected: bool) {
    let border = if selected { Color::Cyan } else { Color::DarkGray };
    let title_style = if selected {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::White)
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(title, title_style)),
        Line::from(""),
        Line::from(description.fg(Color::Gray)),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(widget, area);
}
