//! Keyboard handling.
//!
//! Maps key presses onto [`App`] actions for whichever screen is showing.
//! Screens with text fields reserve plain characters for typing, so their
//! actions sit on Enter, arrows and Ctrl chords.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{AdminTab, App, Command, LoginField, NameField};
use crate::models::Role;

/// Handle one key press. Returns the command the press triggered, if any.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => {
                app.quit();
                return None;
            }
            KeyCode::Char('l') => {
                app.dismiss_banner();
                return None;
            }
            _ => {}
        }
    }

    match app.role {
        None => {
            handle_role_selection(app, key.code);
            None
        }
        Some(Role::Admin) if app.admin.token.is_none() => handle_login(app, key.code),
        Some(Role::Admin) => handle_dashboard(app, key),
        Some(Role::Student) => handle_student(app, key.code),
    }
}

fn handle_role_selection(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up
        | KeyCode::Down
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Tab
        | KeyCode::Char('j')
        | KeyCode::Char('k') => app.toggle_role_cursor(),
        KeyCode::Enter => app.choose_highlighted_role(),
        KeyCode::Char('1') | KeyCode::Char('s') | KeyCode::Char('S') => {
            app.choose_role(Role::Student)
        }
        KeyCode::Char('2') | KeyCode::Char('a') | KeyCode::Char('A') => {
            app.choose_role(Role::Admin)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        _ => {}
    }
}

fn handle_login(app: &mut App, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Esc => app.back_to_role_selection(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.admin.login.toggle_focus()
        }
        KeyCode::Enter if app.admin.login.focus == LoginField::Username => {
            app.admin.login.toggle_focus()
        }
        KeyCode::Enter => return app.submit_login(),
        KeyCode::Backspace => app.admin.login.pop_char(),
        KeyCode::Char(c) => app.admin.login.push_char(c),
        _ => {}
    }
    None
}

fn handle_dashboard(app: &mut App, key: KeyEvent) -> Option<Command> {
    if app.admin.open_attempt.is_some() {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.scroll_detail_down(),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_detail_up(),
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_attempt(),
            _ => {}
        }
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Tab => {
            app.next_tab();
            return None;
        }
        KeyCode::BackTab => {
            app.previous_tab();
            return None;
        }
        KeyCode::F(5) => return app.refresh_dashboard(),
        KeyCode::Char('r') if ctrl => return app.refresh_dashboard(),
        _ => {}
    }

    match app.admin.tab {
        AdminTab::Compose => handle_compose(app, key.code, ctrl),
        AdminTab::Notification => handle_notification(app, key.code),
        tab => handle_admin_lists(app, tab, key.code),
    }
}

fn handle_admin_lists(app: &mut App, tab: AdminTab, key: KeyCode) -> Option<Command> {
    if app.admin.pending_delete.is_some() {
        return match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            _ => {
                app.cancel_delete();
                None
            }
        };
    }

    match key {
        KeyCode::Char('r') => return app.refresh_dashboard(),
        KeyCode::Char('x') => return Some(app.logout()),
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => app.back_to_role_selection(),
        _ => {}
    }

    match (tab, key) {
        (AdminTab::Questions, KeyCode::Down | KeyCode::Char('j')) => app.select_next_question(),
        (AdminTab::Questions, KeyCode::Up | KeyCode::Char('k')) => app.select_previous_question(),
        (AdminTab::Questions, KeyCode::Char('e') | KeyCode::Enter) => app.edit_selected_question(),
        (AdminTab::Questions, KeyCode::Char('d') | KeyCode::Delete) => {
            app.request_delete_selected()
        }
        (AdminTab::Questions, KeyCode::Char('n')) => {
            app.cancel_question_edit();
            app.admin.tab = AdminTab::Compose;
        }
        (AdminTab::Attempts, KeyCode::Down | KeyCode::Char('j')) => app.select_next_attempt(),
        (AdminTab::Attempts, KeyCode::Up | KeyCode::Char('k')) => app.select_previous_attempt(),
        (AdminTab::Attempts, KeyCode::Enter) => app.open_selected_attempt(),
        _ => {}
    }
    None
}

fn handle_compose(app: &mut App, key: KeyCode, ctrl: bool) -> Option<Command> {
    let form = &mut app.admin.question_form;
    if ctrl {
        match key {
            KeyCode::Char('t') => form.toggle_focused_correct(),
            KeyCode::Char('n') => form.add_option(),
            KeyCode::Char('d') => form.remove_focused_option(),
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Enter => return app.submit_question(),
        KeyCode::Esc if form.editing.is_some() => app.cancel_question_edit(),
        KeyCode::Esc => app.back_to_role_selection(),
        KeyCode::Down => form.focus_next(),
        KeyCode::Up => form.focus_previous(),
        KeyCode::Backspace => form.pop_char(),
        KeyCode::Char(c) => form.push_char(c),
        _ => {}
    }
    None
}

fn handle_notification(app: &mut App, key: KeyCode) -> Option<Command> {
    let form = &mut app.admin.notification;
    match key {
        KeyCode::Enter => return app.submit_notification(),
        KeyCode::Esc => app.back_to_role_selection(),
        KeyCode::Down => form.focus_next(),
        KeyCode::Up => form.focus_previous(),
        KeyCode::Backspace => form.pop_char(),
        KeyCode::Char(c) => form.push_char(c),
        _ => {}
    }
    None
}

fn handle_student(app: &mut App, key: KeyCode) -> Option<Command> {
    if app.student.result.is_some() {
        match key {
            KeyCode::Down | KeyCode::Char('j') => app.scroll_result_down(),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_result_up(),
            KeyCode::Char('n') | KeyCode::Char('N') => app.new_attempt(),
            KeyCode::Esc | KeyCode::Char('b') => app.back_to_role_selection(),
            KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
            _ => {}
        }
        return None;
    }

    if app.student.started {
        match key {
            KeyCode::Down | KeyCode::Char('j') => app.highlight_next_option(),
            KeyCode::Up | KeyCode::Char('k') => app.highlight_previous_option(),
            KeyCode::Enter | KeyCode::Char(' ') => app.select_highlighted_answer(),
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => app.next_question(),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => app.previous_question(),
            KeyCode::Char('s') | KeyCode::Char('S') => return app.submit_test(),
            KeyCode::Esc => app.back_to_role_selection(),
            KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
            _ => {}
        }
        return None;
    }

    match key {
        KeyCode::Esc => app.back_to_role_selection(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.student.info.toggle_focus()
        }
        KeyCode::Enter if app.student.info.focus == NameField::FirstName => {
            app.student.info.toggle_focus()
        }
        KeyCode::Enter => return app.start_test(),
        KeyCode::Backspace => app.student.info.pop_char(),
        KeyCode::Char(c) => app.student.info.push_char(c),
        _ => {}
    }
    None
}
