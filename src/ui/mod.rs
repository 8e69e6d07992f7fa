//! Screen rendering.

mod attempt_detail;
mod dashboard;
mod login;
mod results;
mod role_select;
mod student;
mod widgets;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::app::{App, BannerKind};
use crate::models::Role;

/// Render the whole screen for the current state.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(if app.banner.is_some() { 1 } else { 0 }),
        Constraint::Fill(1),
    ])
    .split(area);

    render_banner(frame, chunks[0], app);

    let body = chunks[1];
    match app.role {
        None => role_select::render(frame, body, app),
        Some(Role::Admin) if app.admin.token.is_none() => login::render(frame, body, app),
        Some(Role::Admin) if app.admin.open_attempt.is_some() => {
            attempt_detail::render(frame, body, app)
        }
        Some(Role::Admin) => dashboard::render(frame, body, app),
        Some(Role::Student) if app.student.result.is_some() => results::render(frame, body, app),
        Some(Role::Student) if app.student.started => student::render_test(frame, body, app),
        Some(Role::Student) => student::render_info(frame, body, app),
    }
}

fn render_banner(frame: &mut Frame, area: Rect, app: &App) {
    let Some(banner) = &app.banner else {
        return;
    };

    let (symbol, color) = match banner.kind {
        BannerKind::Success => ("+", Color::Green),
        BannerKind::Error => ("!", Color::Red),
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", symbol), Style::default().fg(Color::Black).bg(color)),
        Span::styled(format!(" {}", banner.message), Style::default().fg(color).bold()),
        Span::styled("   Ctrl+L yopish", Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
