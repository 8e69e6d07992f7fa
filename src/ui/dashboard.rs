//! Admin dashboard: summary, question bank, forms and attempts.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};

use crate::app::{AdminState, AdminTab, App, MAX_OPTIONS, NotificationField, QuestionField};

use super::widgets::{self, TITLE};

const QUESTION_PREVIEW_LENGTH: usize = 60;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let admin = &app.admin;

    let chunks = Layout::vertical([
        Constraint::Length(3), // Tabs
        Constraint::Fill(1),   // Content
        Constraint::Length(1), // Controls
    ])
    .split(area);

    render_tabs(frame, chunks[0], admin);

    match admin.tab {
        AdminTab::Overview => render_overview(frame, chunks[1], admin),
        AdminTab::Questions => render_questions(frame, chunks[1], admin),
        AdminTab::Compose => render_compose(frame, chunks[1], admin),
        AdminTab::Notification => render_notification(frame, chunks[1], admin),
        AdminTab::Attempts => render_attempts(frame, chunks[1], admin),
    }

    frame.render_widget(widgets::controls(controls_for(admin)), chunks[2]);
}

fn render_tabs(frame: &mut Frame, area: Rect, admin: &AdminState) {
    let selected = AdminTab::ALL
        .iter()
        .position(|tab| *tab == admin.tab)
        .unwrap_or(0);

    let title = if admin.loading {
        format!(" {} · Admin rejimi · yuklanmoqda... ", TITLE)
    } else {
        format!(" {} · Admin rejimi ", TITLE)
    };

    let tabs = Tabs::new(AdminTab::ALL.iter().map(|tab| tab.title()))
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title)
                .title_style(Style::default().fg(Color::Cyan).bold()),
        );
    frame.render_widget(tabs, area);
}

fn controls_for(admin: &AdminState) -> &'static str {
    if admin.pending_delete.is_some() {
        return "y o'chirishni tasdiqlash  ·  boshqa tugma bekor qilish";
    }
    match admin.tab {
        AdminTab::Overview => "tab bo'lim  ·  r yangilash  ·  x chiqish  ·  esc orqaga  ·  q quit",
        AdminTab::Questions => {
            "j/k tanlash  ·  e tahrirlash  ·  d o'chirish  ·  n yangi  ·  r yangilash  ·  tab bo'lim"
        }
        AdminTab::Compose => {
            "↑/↓ maydon  ·  ctrl+t to'g'ri  ·  ctrl+n variant qo'shish  ·  ctrl+d o'chirish  ·  enter saqlash"
        }
        AdminTab::Notification => "↑/↓ maydon  ·  space faollashtirish  ·  enter yangilash  ·  tab bo'lim",
        AdminTab::Attempts => "j/k tanlash  ·  enter batafsil  ·  r yangilash  ·  tab bo'lim",
    }
}

fn render_overview(frame: &mut Frame, area: Rect, admin: &AdminState) {
    let summary = admin.summary();
    let notification = &admin.notification.setting;

    let chunks = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let (status, status_color) = if notification.is_active {
        ("Faol", Color::Green)
    } else {
        ("Faol emas", Color::DarkGray)
    };
    let chat = if notification.admin_chat_id.is_empty() {
        "Chat ID kiritilmagan".to_string()
    } else {
        format!("Chat ID: {}", notification.admin_chat_id)
    };

    let stats = vec![
        stat_line("Savollar", summary.question_count.to_string(), "Faol test banki"),
        Line::from(""),
        stat_line("Urinishlar", summary.total_attempts.to_string(), "Oxirgi 25 ta"),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{:<12}", "Aniqlik"), Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:>5}%", summary.accuracy),
                Style::default()
                    .fg(widgets::grade_color(summary.accuracy))
                    .bold(),
            ),
            Span::styled("  O'rtacha muvaffaqiyat", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{:<12}", "Telegram"), Style::default().fg(Color::Gray)),
            Span::styled(status, Style::default().fg(status_color).bold()),
            Span::styled(format!("  {}", chat), Style::default().fg(Color::DarkGray)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(stats).block(widgets::panel("Test boshqaruvi")),
        chunks[0],
    );

    let latest = match summary.latest_attempt {
        Some(attempt) => vec![
            Line::from(vec![
                Span::styled("Ishtirokchi  ", Style::default().fg(Color::Gray)),
                Span::styled(attempt.full_name(), Style::default().fg(Color::White).bold()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Natija       ", Style::default().fg(Color::Gray)),
                Span::styled(
                    attempt.score_label(),
                    Style::default()
                        .fg(widgets::grade_color(attempt.percentage()))
                        .bold(),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Sana         ", Style::default().fg(Color::Gray)),
                Span::styled(
                    widgets::format_date(&attempt.created_at),
                    Style::default().fg(Color::White),
                ),
            ]),
        ],
        None => vec![Line::from(Span::styled(
            "Hozircha urinish mavjud emas.",
            Style::default().fg(Color::DarkGray).italic(),
        ))],
    };
    frame.render_widget(
        Paragraph::new(latest).block(widgets::panel("So'nggi urinish")),
        chunks[1],
    );
}

fn stat_line(label: &str, value: String, hint: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::Gray)),
        Span::styled(format!("{:>6}", value), Style::default().fg(Color::White).bold()),
        Span::styled(format!("  {}", hint), Style::default().fg(Color::DarkGray)),
    ])
}

fn render_questions(frame: &mut Frame, area: Rect, admin: &AdminState) {
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0;

    for (index, question) in admin.questions.iter().enumerate() {
        let is_selected = index == admin.question_cursor;
        if is_selected {
            selected_line = lines.len();
        }
        let pending = admin.pending_delete == Some(question.id);

        let text_style = if pending {
            Style::default().fg(Color::Red).bold()
        } else if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(if is_selected { "> " } else { "  " }, text_style),
            Span::styled(
                format!("Q{:<3} ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                widgets::truncate(&question.text, QUESTION_PREVIEW_LENGTH),
                text_style,
            ),
            Span::styled(
                if pending { "  o'chirilsinmi? (y/n)" } else { "" },
                Style::default().fg(Color::Red),
            ),
        ]));

        let mut pills = vec![Span::raw("        ")];
        for option in &question.options {
            let style = if option.is_correct == Some(true) {
                Style::default().fg(Color::Green).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            pills.push(Span::styled(format!("[{}]", option.text), style));
            pills.push(Span::raw(" "));
        }
        lines.push(Line::from(pills));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Hozircha savollar yo'q.",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    // Keep the highlighted question visible.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (selected_line + 2).saturating_sub(visible);

    let title = format!("Savol banki · {} ta", admin.questions.len());
    let widget = Paragraph::new(lines)
        .block(widgets::panel(&title))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn render_compose(frame: &mut Frame, area: Rect, admin: &AdminState) {
    let form = &admin.question_form;

    let heading = match form.editing {
        Some(id) => format!("Savolni tahrirlash #{} · esc bekor qilish", id),
        None => "Yangi savol".to_string(),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(heading, Style::default().fg(Color::White).bold()),
            Span::styled(
                format!("   {} variant", form.options.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        widgets::text_field("Savol matni", &form.text, form.focus == QuestionField::Text, false),
        Line::from(""),
    ];

    for (index, option) in form.options.iter().enumerate() {
        let focused = form.focus == QuestionField::Option(index);
        let mut line = widgets::text_field("", &option.text, focused, false);
        let label_style = line.spans[1].style;
        line.spans[1] = Span::styled(format!("Variant {:<6}", index + 1), label_style);
        let (mark, color) = if option.is_correct {
            ("  [x] To'g'ri", Color::Green)
        } else {
            ("  [ ] To'g'ri", Color::DarkGray)
        };
        line.spans.push(Span::styled(mark, Style::default().fg(color)));
        lines.push(line);
    }

    lines.push(Line::from(""));
    if form.options.len() < MAX_OPTIONS {
        lines.push(Line::from(Span::styled(
            "  ctrl+n Variant qo'shish",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Har bir savolga kamida ikki variant kiriting, to'g'ri javoblar belgilanadi va natijalar avtomatik hisoblanadi.",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(widgets::panel("Savol formasi"));
    frame.render_widget(widget, area);
}

fn render_notification(frame: &mut Frame, area: Rect, admin: &AdminState) {
    let form = &admin.notification;
    let setting = &form.setting;

    let (status, color) = if setting.is_active {
        ("Faol", Color::Green)
    } else {
        ("Faol emas", Color::DarkGray)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Notif sozlamalari  ", Style::default().fg(Color::White).bold()),
            Span::styled(status, Style::default().fg(color).bold()),
        ]),
        Line::from(""),
        widgets::text_field(
            "Bot token",
            &setting.bot_token,
            form.focus == NotificationField::BotToken,
            false,
        ),
        Line::from(""),
        widgets::text_field(
            "Admin chat ID",
            &setting.admin_chat_id,
            form.focus == NotificationField::ChatId,
            false,
        ),
        Line::from(""),
        widgets::checkbox(
            "Faollashtirish",
            setting.is_active,
            form.focus == NotificationField::Active,
        ),
    ];

    let widget = Paragraph::new(lines).block(widgets::panel("Telegram"));
    frame.render_widget(widget, area);
}

fn render_attempts(frame: &mut Frame, area: Rect, admin: &AdminState) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("  {:<28}{:<12}{:<8}{}", "Ismi", "Natija", "%", "Sana"),
            Style::default().fg(Color::DarkGray).bold(),
        )),
        Line::from(""),
    ];

    for (index, attempt) in admin.attempts.iter().enumerate() {
        let is_selected = index == admin.attempt_cursor;
        let name_style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::White)
        };
        let percentage = attempt.percentage();

        lines.push(Line::from(vec![
            Span::styled(if is_selected { "> " } else { "  " }, name_style),
            Span::styled(
                format!("{:<28}", widgets::truncate(&attempt.full_name(), 25)),
                name_style,
            ),
            Span::styled(
                format!("{:<12}", attempt.score_label()),
                Style::default().fg(widgets::grade_color(percentage)),
            ),
            Span::styled(
                format!("{:<8}", format!("{}%", percentage)),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                widgets::format_date(&attempt.created_at),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    if admin.attempts.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Hozircha natijalar mavjud emas.",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (admin.attempt_cursor + 3).saturating_sub(visible);

    let title = format!("Oxirgi natijalar · {} urinish", admin.attempts.len());
    let widget = Paragraph::new(lines)
        .block(widgets::panel(&title))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}
