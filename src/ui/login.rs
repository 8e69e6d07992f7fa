//! Admin login form.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, LoginField};

use super::widgets::{self, TITLE};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let login = &app.admin.login;
    let form_area = widgets::centered(area, 60, 12);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} · Admin login", TITLE),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        widgets::text_field(
            "Login",
            &login.username,
            login.focus == LoginField::Username,
            false,
        ),
        Line::from(""),
        widgets::text_field(
            "Parol",
            &login.password,
            login.focus == LoginField::Password,
            true,
        ),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Kirish  ·  [Tab] keyingi maydon  ·  [Esc] orqaga",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).block(widgets::panel("Admin"));
    frame.render_widget(widget, form_area);
}
