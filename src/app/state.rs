//! Application state.
//!
//! `App` never performs I/O. User actions return the [`Command`] the runtime
//! should execute, and the runtime feeds each finished request back through
//! [`App::apply`] as an [`Outcome`].

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::api::DashboardData;
use crate::error::Error;
use crate::models::{
    AttemptResponse, AttemptSubmission, NotificationSetting, Question, QuestionPayload, Role,
    TestAttempt,
};

use super::forms::{LoginForm, NotificationForm, QuestionForm, StudentInfo};
use super::summary::AdminSummary;

pub const MSG_LOGGED_IN: &str = "Admin sifatida tizimga kirdingiz.";
pub const MSG_QUESTION_ADDED: &str = "Savol muvaffaqiyatli qo'shildi.";
pub const MSG_QUESTION_UPDATED: &str = "Savol yangilandi.";
pub const MSG_QUESTION_DELETED: &str = "Savol o'chirildi.";
pub const MSG_NOTIFICATION_SAVED: &str = "Telegram sozlamalari yangilandi.";
pub const MSG_NAMES_REQUIRED: &str = "Ism va familiyani kiriting.";
pub const MSG_ANSWER_ALL: &str = "Har bir savolga javob bering.";
pub const MSG_ATTEMPT_SAVED: &str = "Natijalar saqlandi va adminlarga yuborildi.";
pub const MSG_LOGIN_REQUIRED: &str = "Login va parolni kiriting.";
pub const MSG_SESSION_EXPIRED: &str = "Sessiya muddati tugadi. Qaytadan kiring.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// The single status message shown above every screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }
}

/// Work the runtime must carry out on behalf of the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    /// Persist the token, or forget it when `None`.
    StoreToken(Option<String>),
    LoadDashboard { token: String },
    SaveQuestion {
        token: String,
        id: Option<u64>,
        payload: QuestionPayload,
    },
    DeleteQuestion { token: String, id: u64 },
    SaveNotification {
        token: String,
        setting: NotificationSetting,
    },
    LoadStudentQuestions,
    SubmitAttempt(AttemptSubmission),
}

/// Result of a finished [`Command`].
#[derive(Debug)]
pub enum Outcome {
    LoggedIn(Result<String, Error>),
    /// `token` is the one the load was issued with.
    DashboardLoaded {
        token: String,
        result: Result<DashboardData, Error>,
    },
    QuestionSaved {
        updated: bool,
        result: Result<Question, Error>,
    },
    QuestionDeleted(Result<(), Error>),
    NotificationSaved(Result<NotificationSetting, Error>),
    StudentQuestionsLoaded(Result<Vec<Question>, Error>),
    AttemptSubmitted(Result<TestAttempt, Error>),
}

/// Sections of the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Overview,
    Questions,
    Compose,
    Notification,
    Attempts,
}

impl AdminTab {
    pub const ALL: [AdminTab; 5] = [
        AdminTab::Overview,
        AdminTab::Questions,
        AdminTab::Compose,
        AdminTab::Notification,
        AdminTab::Attempts,
    ];

    pub fn title(self) -> &'static str {
        match self {
            AdminTab::Overview => "Umumiy",
            AdminTab::Questions => "Savollar",
            AdminTab::Compose => "Savol formasi",
            AdminTab::Notification => "Telegram",
            AdminTab::Attempts => "Natijalar",
        }
    }

    /// Whether the tab contains text fields that swallow typed characters.
    pub fn is_form(self) -> bool {
        matches!(self, AdminTab::Compose | AdminTab::Notification)
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdminState {
    pub token: Option<String>,
    pub login: LoginForm,
    pub questions: Vec<Question>,
    pub notification: NotificationForm,
    pub attempts: Vec<TestAttempt>,
    pub question_form: QuestionForm,
    pub loading: bool,
    pub tab: AdminTab,
    pub question_cursor: usize,
    pub attempt_cursor: usize,
    /// Index into `attempts` of the attempt opened for review.
    pub open_attempt: Option<usize>,
    pub detail_scroll: usize,
    /// Question awaiting delete confirmation.
    pub pending_delete: Option<u64>,
    /// A reload was requested while another load was in flight.
    pub reload_pending: bool,
}

impl AdminState {
    pub fn summary(&self) -> AdminSummary<'_> {
        AdminSummary::compute(&self.questions, &self.attempts)
    }

    pub fn opened_attempt(&self) -> Option<&TestAttempt> {
        self.open_attempt.and_then(|index| self.attempts.get(index))
    }

    pub fn selected_question(&self) -> Option<&Question> {
        self.questions.get(self.question_cursor)
    }

    fn clamp_cursors(&mut self) {
        self.question_cursor = self
            .question_cursor
            .min(self.questions.len().saturating_sub(1));
        self.attempt_cursor = self
            .attempt_cursor
            .min(self.attempts.len().saturating_sub(1));
        if self.open_attempt.is_some_and(|i| i >= self.attempts.len()) {
            self.open_attempt = None;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StudentState {
    pub info: StudentInfo,
    pub questions: Vec<Question>,
    /// Selected option id per question id.
    pub answers: HashMap<u64, u64>,
    pub result: Option<TestAttempt>,
    pub loading: bool,
    pub started: bool,
    /// Index of the question on screen.
    pub current: usize,
    /// Highlighted option of the question on screen.
    pub option_cursor: usize,
    pub result_scroll: usize,
}

impl StudentState {
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .count()
    }

    pub fn all_answered(&self) -> bool {
        self.questions.iter().all(|q| self.answers.contains_key(&q.id))
    }

    /// `correct/total` of the submitted attempt.
    pub fn score(&self) -> Option<String> {
        self.result.as_ref().map(TestAttempt::score_label)
    }

    fn sync_option_cursor(&mut self) {
        let Some(question) = self.current_question() else {
            self.option_cursor = 0;
            return;
        };
        let selected = self
            .answers
            .get(&question.id)
            .and_then(|option_id| question.options.iter().position(|o| o.id == *option_id));
        self.option_cursor = selected.unwrap_or(0);
    }

    /// Back to the name form with a clean slate. Names are kept.
    pub fn reset(&mut self) {
        self.questions.clear();
        self.answers.clear();
        self.result = None;
        self.loading = false;
        self.started = false;
        self.current = 0;
        self.option_cursor = 0;
        self.result_scroll = 0;
    }
}

pub struct App {
    pub role: Option<Role>,
    pub banner: Option<Banner>,
    /// Highlighted card on the role selection screen.
    pub role_cursor: Role,
    pub admin: AdminState,
    pub student: StudentState,
    pub api_url: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            role: None,
            banner: None,
            role_cursor: Role::Student,
            admin: AdminState::default(),
            student: StudentState::default(),
            api_url: api_url.into(),
            should_quit: false,
        }
    }

    // ---- shared ----

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    fn fail(&mut self, err: &Error) {
        warn!(error = %err, "operation failed");
        self.banner = Some(Banner::error(err.to_string()));
    }

    pub fn toggle_role_cursor(&mut self) {
        self.role_cursor = match self.role_cursor {
            Role::Student => Role::Admin,
            Role::Admin => Role::Student,
        };
    }

    pub fn choose_role(&mut self, role: Role) {
        info!(?role, "role selected");
        self.role = Some(role);
    }

    pub fn choose_highlighted_role(&mut self) {
        self.choose_role(self.role_cursor);
    }

    pub fn back_to_role_selection(&mut self) {
        if self.role == Some(Role::Student) {
            self.student.reset();
        }
        self.admin.open_attempt = None;
        self.admin.pending_delete = None;
        self.role = None;
    }

    // ---- admin ----

    /// Adopt a token found on disk at start-up.
    pub fn restore_session(&mut self, token: String) -> Command {
        self.set_token(token)
    }

    fn set_token(&mut self, token: String) -> Command {
        self.admin.token = Some(token.clone());
        self.admin.loading = true;
        Command::LoadDashboard { token }
    }

    pub fn submit_login(&mut self) -> Option<Command> {
        let login = &self.admin.login;
        if !login.is_complete() {
            self.banner = Some(Banner::error(MSG_LOGIN_REQUIRED));
            return None;
        }
        Some(Command::Login {
            username: login.username.clone(),
            password: login.password.clone(),
        })
    }

    pub fn refresh_dashboard(&mut self) -> Option<Command> {
        let token = self.admin.token.clone()?;
        if self.admin.loading {
            return None;
        }
        self.admin.loading = true;
        Some(Command::LoadDashboard { token })
    }

    /// Reload after a change on the server, or queue one behind the load in flight.
    fn reload_after_change(&mut self) -> Vec<Command> {
        if self.admin.loading {
            self.admin.reload_pending = true;
            return Vec::new();
        }
        self.refresh_dashboard().into_iter().collect()
    }

    pub fn logout(&mut self) -> Command {
        info!("admin logged out");
        self.admin.token = None;
        self.admin.questions.clear();
        self.admin.attempts.clear();
        self.admin.login.password.clear();
        self.admin.open_attempt = None;
        self.admin.pending_delete = None;
        self.admin.loading = false;
        self.admin.reload_pending = false;
        self.admin.clamp_cursors();
        self.role = None;
        Command::StoreToken(None)
    }

    pub fn next_tab(&mut self) {
        self.admin.tab = self.admin.tab.next();
        self.admin.pending_delete = None;
    }

    pub fn previous_tab(&mut self) {
        self.admin.tab = self.admin.tab.previous();
        self.admin.pending_delete = None;
    }

    pub fn submit_question(&mut self) -> Option<Command> {
        let token = self.admin.token.clone()?;
        if self.admin.loading {
            return None;
        }
        match self.admin.question_form.payload() {
            Ok(payload) => Some(Command::SaveQuestion {
                token,
                id: self.admin.question_form.editing,
                payload,
            }),
            Err(message) => {
                self.banner = Some(Banner::error(message));
                None
            }
        }
    }

    /// Load the highlighted question of the bank into the form.
    pub fn edit_selected_question(&mut self) {
        if let Some(question) = self.admin.selected_question() {
            self.admin.question_form = QuestionForm::edit(question);
            self.admin.tab = AdminTab::Compose;
        }
    }

    pub fn cancel_question_edit(&mut self) {
        self.admin.question_form = QuestionForm::default();
    }

    /// First press arms the delete, a confirmation issues it.
    pub fn request_delete_selected(&mut self) {
        self.admin.pending_delete = self.admin.selected_question().map(|q| q.id);
    }

    pub fn confirm_delete(&mut self) -> Option<Command> {
        if self.admin.loading {
            return None;
        }
        let id = self.admin.pending_delete.take()?;
        let token = self.admin.token.clone()?;
        Some(Command::DeleteQuestion { token, id })
    }

    pub fn cancel_delete(&mut self) {
        self.admin.pending_delete = None;
    }

    pub fn submit_notification(&mut self) -> Option<Command> {
        let token = self.admin.token.clone()?;
        if self.admin.loading {
            return None;
        }
        let setting = &self.admin.notification.setting;
        Some(Command::SaveNotification {
            token,
            setting: NotificationSetting {
                bot_token: setting.bot_token.clone(),
                admin_chat_id: setting.admin_chat_id.clone(),
                is_active: setting.is_active,
            },
        })
    }

    pub fn select_next_question(&mut self) {
        let len = self.admin.questions.len();
        if len > 0 {
            self.admin.question_cursor = (self.admin.question_cursor + 1).min(len - 1);
        }
        self.admin.pending_delete = None;
    }

    pub fn select_previous_question(&mut self) {
        self.admin.question_cursor = self.admin.question_cursor.saturating_sub(1);
        self.admin.pending_delete = None;
    }

    pub fn select_next_attempt(&mut self) {
        let len = self.admin.attempts.len();
        if len > 0 {
            self.admin.attempt_cursor = (self.admin.attempt_cursor + 1).min(len - 1);
        }
    }

    pub fn select_previous_attempt(&mut self) {
        self.admin.attempt_cursor = self.admin.attempt_cursor.saturating_sub(1);
    }

    pub fn open_selected_attempt(&mut self) {
        if self.admin.attempt_cursor < self.admin.attempts.len() {
            self.admin.open_attempt = Some(self.admin.attempt_cursor);
            self.admin.detail_scroll = 0;
        }
    }

    pub fn close_attempt(&mut self) {
        self.admin.open_attempt = None;
    }

    pub fn scroll_detail_down(&mut self) {
        if let Some(attempt) = self.admin.opened_attempt() {
            let max_scroll = attempt.answers.len().saturating_sub(1);
            self.admin.detail_scroll = (self.admin.detail_scroll + 1).min(max_scroll);
        }
    }

    pub fn scroll_detail_up(&mut self) {
        self.admin.detail_scroll = self.admin.detail_scroll.saturating_sub(1);
    }

    // ---- student ----

    pub fn start_test(&mut self) -> Option<Command> {
        if self.student.loading {
            return None;
        }
        if self.student.info.trimmed().is_none() {
            self.banner = Some(Banner::error(MSG_NAMES_REQUIRED));
            return None;
        }
        self.student.result = None;
        self.student.loading = true;
        Some(Command::LoadStudentQuestions)
    }

    /// Record `option_id` as the answer to `question_id`, replacing any
    /// earlier choice.
    pub fn select_answer(&mut self, question_id: u64, option_id: u64) {
        self.student.answers.insert(question_id, option_id);
    }

    /// Answer the question on screen with the highlighted option.
    pub fn select_highlighted_answer(&mut self) {
        let choice = self.student.current_question().and_then(|question| {
            question
                .options
                .get(self.student.option_cursor)
                .map(|option| (question.id, option.id))
        });
        if let Some((question_id, option_id)) = choice {
            self.select_answer(question_id, option_id);
        }
    }

    pub fn highlight_next_option(&mut self) {
        if let Some(question) = self.student.current_question() {
            let len = question.options.len();
            if len > 0 {
                self.student.option_cursor = (self.student.option_cursor + 1) % len;
            }
        }
    }

    pub fn highlight_previous_option(&mut self) {
        if let Some(question) = self.student.current_question() {
            let len = question.options.len();
            if len > 0 {
                self.student.option_cursor = (self.student.option_cursor + len - 1) % len;
            }
        }
    }

    pub fn next_question(&mut self) {
        if self.student.current + 1 < self.student.questions.len() {
            self.student.current += 1;
            self.student.sync_option_cursor();
        }
    }

    pub fn previous_question(&mut self) {
        if self.student.current > 0 {
            self.student.current -= 1;
            self.student.sync_option_cursor();
        }
    }

    pub fn submit_test(&mut self) -> Option<Command> {
        let student = &self.student;
        if student.questions.is_empty() || student.loading {
            return None;
        }
        if !student.all_answered() {
            self.banner = Some(Banner::error(MSG_ANSWER_ALL));
            return None;
        }
        let (first_name, last_name) = match student.info.trimmed() {
            Some(names) => names,
            None => {
                self.banner = Some(Banner::error(MSG_NAMES_REQUIRED));
                return None;
            }
        };

        let responses = student
            .questions
            .iter()
            .filter_map(|question| {
                student.answers.get(&question.id).map(|option| AttemptResponse {
                    question: question.id,
                    option: *option,
                })
            })
            .collect();

        self.student.loading = true;
        Some(Command::SubmitAttempt(AttemptSubmission {
            first_name,
            last_name,
            responses,
        }))
    }

    pub fn new_attempt(&mut self) {
        self.student.reset();
    }

    pub fn scroll_result_down(&mut self) {
        if let Some(result) = &self.student.result {
            let max_scroll = result.answers.len().saturating_sub(1);
            self.student.result_scroll = (self.student.result_scroll + 1).min(max_scroll);
        }
    }

    pub fn scroll_result_up(&mut self) {
        self.student.result_scroll = self.student.result_scroll.saturating_sub(1);
    }

    // ---- outcomes ----

    /// Fold a finished request into the state. Returns follow-up commands.
    pub fn apply(&mut self, outcome: Outcome) -> Vec<Command> {
        match outcome {
            Outcome::LoggedIn(Ok(token)) => {
                info!("admin logged in");
                self.admin.login.password.clear();
                self.banner = Some(Banner::success(MSG_LOGGED_IN));
                let load = self.set_token(token.clone());
                vec![Command::StoreToken(Some(token)), load]
            }
            Outcome::LoggedIn(Err(err)) => {
                self.fail(&err);
                Vec::new()
            }

            Outcome::DashboardLoaded { token, result } => {
                // Dropped after a logout, or when a newer login replaced the token.
                if self.admin.token.as_deref() != Some(token.as_str()) {
                    debug!("dropping dashboard data of a previous session");
                    return Vec::new();
                }
                self.admin.loading = false;
                match result {
                    Ok(data) => {
                        self.admin.questions = data.questions;
                        self.admin.notification.setting = data.notification;
                        self.admin.attempts = data.attempts;
                        self.admin.clamp_cursors();
                    }
                    Err(err) if err.is_unauthorized() => {
                        warn!(error = %err, "stored admin token rejected");
                        let forget = self.logout();
                        self.role = Some(Role::Admin);
                        self.banner = Some(Banner::error(MSG_SESSION_EXPIRED));
                        return vec![forget];
                    }
                    Err(err) => self.fail(&err),
                }
                if std::mem::take(&mut self.admin.reload_pending) {
                    return self.refresh_dashboard().into_iter().collect();
                }
                Vec::new()
            }

            Outcome::QuestionSaved { updated, result } => match result {
                Ok(question) => {
                    info!(id = question.id, updated, "question saved");
                    self.admin.question_form = QuestionForm::default();
                    let message = if updated {
                        MSG_QUESTION_UPDATED
                    } else {
                        MSG_QUESTION_ADDED
                    };
                    self.banner = Some(Banner::success(message));
                    self.reload_after_change()
                }
                Err(err) => {
                    self.fail(&err);
                    Vec::new()
                }
            },

            Outcome::QuestionDeleted(result) => match result {
                Ok(()) => {
                    self.banner = Some(Banner::success(MSG_QUESTION_DELETED));
                    self.reload_after_change()
                }
                Err(err) => {
                    self.fail(&err);
                    Vec::new()
                }
            },

            Outcome::NotificationSaved(result) => {
                match result {
                    Ok(setting) => {
                        self.admin.notification.setting = setting;
                        self.banner = Some(Banner::success(MSG_NOTIFICATION_SAVED));
                    }
                    Err(err) => self.fail(&err),
                }
                Vec::new()
            }

            Outcome::StudentQuestionsLoaded(_) | Outcome::AttemptSubmitted(_)
                if self.role != Some(Role::Student) =>
            {
                debug!("dropping student result after leaving the test");
                Vec::new()
            }

            Outcome::StudentQuestionsLoaded(result) => {
                self.student.loading = false;
                match result {
                    Ok(questions) => {
                        info!(count = questions.len(), "test started");
                        self.student.questions = questions;
                        self.student.answers.clear();
                        self.student.current = 0;
                        self.student.option_cursor = 0;
                        self.student.started = true;
                    }
                    Err(err) => self.fail(&err),
                }
                Vec::new()
            }

            Outcome::AttemptSubmitted(result) => {
                self.student.loading = false;
                match result {
                    Ok(attempt) => {
                        info!(id = attempt.id, score = %attempt.score_label(), "attempt submitted");
                        self.student.result = Some(attempt);
                        self.student.result_scroll = 0;
                        self.banner = Some(Banner::success(MSG_ATTEMPT_SAVED));
                    }
                    Err(err) => self.fail(&err),
                }
                Vec::new()
            }
        }
    }
}
