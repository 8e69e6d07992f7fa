//! Editable forms and their client-side validation.

use crate::models::{NotificationSetting, OptionPayload, Question, QuestionPayload};

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 5;

const MAX_NAME_LENGTH: usize = 120;
const MAX_OPTION_LENGTH: usize = 255;

/// Append a typed character, ignoring it once `limit` characters are reached.
fn push_limited(target: &mut String, c: char, limit: usize) {
    if target.chars().count() < limit {
        target.push(c);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
}

impl LoginForm {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            LoginField::Username => self.username.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameField {
    #[default]
    FirstName,
    LastName,
}

/// The student's identifying information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentInfo {
    pub first_name: String,
    pub last_name: String,
    pub focus: NameField,
}

impl StudentInfo {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            NameField::FirstName => NameField::LastName,
            NameField::LastName => NameField::FirstName,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            NameField::FirstName => push_limited(&mut self.first_name, c, MAX_NAME_LENGTH),
            NameField::LastName => push_limited(&mut self.last_name, c, MAX_NAME_LENGTH),
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            NameField::FirstName => self.first_name.pop(),
            NameField::LastName => self.last_name.pop(),
        };
    }

    /// Trimmed first and last name, or `None` if either is blank.
    pub fn trimmed(&self) -> Option<(String, String)> {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        if first.is_empty() || last.is_empty() {
            return None;
        }
        Some((first.to_string(), last.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionDraft {
    pub text: String,
    pub is_correct: bool,
}

/// Which part of the question form receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionField {
    #[default]
    Text,
    Option(usize),
}

/// Draft of a new question, or of an edit to an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionForm {
    pub text: String,
    pub options: Vec<OptionDraft>,
    pub focus: QuestionField,
    /// Id of the question being edited; `None` creates a new one.
    pub editing: Option<u64>,
}

impl Default for QuestionForm {
    fn default() -> Self {
        Self {
            text: String::new(),
            options: vec![OptionDraft::default(); MIN_OPTIONS],
            focus: QuestionField::Text,
            editing: None,
        }
    }
}

impl QuestionForm {
    /// Prefill the form from a question of the bank.
    pub fn edit(question: &Question) -> Self {
        let mut options: Vec<OptionDraft> = question
            .options
            .iter()
            .take(MAX_OPTIONS)
            .map(|option| OptionDraft {
                text: option.text.clone(),
                is_correct: option.is_correct.unwrap_or(false),
            })
            .collect();
        options.resize(options.len().max(MIN_OPTIONS), OptionDraft::default());

        Self {
            text: question.text.clone(),
            options,
            focus: QuestionField::Text,
            editing: Some(question.id),
        }
    }

    pub fn can_add_option(&self) -> bool {
        self.options.len() < MAX_OPTIONS
    }

    pub fn can_remove_option(&self) -> bool {
        self.options.len() > MIN_OPTIONS
    }

    /// Append an empty option and focus it. No-op at the maximum.
    pub fn add_option(&mut self) {
        if !self.can_add_option() {
            return;
        }
        self.options.push(OptionDraft::default());
        self.focus = QuestionField::Option(self.options.len() - 1);
    }

    /// Remove the option at `index`. No-op at the minimum.
    pub fn remove_option(&mut self, index: usize) {
        if !self.can_remove_option() || index >= self.options.len() {
            return;
        }
        self.options.remove(index);
        if let QuestionField::Option(focused) = self.focus {
            if focused >= self.options.len() {
                self.focus = QuestionField::Option(self.options.len() - 1);
            }
        }
    }

    pub fn remove_focused_option(&mut self) {
        if let QuestionField::Option(index) = self.focus {
            self.remove_option(index);
        }
    }

    pub fn toggle_correct(&mut self, index: usize) {
        if let Some(option) = self.options.get_mut(index) {
            option.is_correct = !option.is_correct;
        }
    }

    pub fn toggle_focused_correct(&mut self) {
        if let QuestionField::Option(index) = self.focus {
            self.toggle_correct(index);
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            QuestionField::Text => QuestionField::Option(0),
            QuestionField::Option(i) if i + 1 < self.options.len() => QuestionField::Option(i + 1),
            QuestionField::Option(_) => QuestionField::Text,
        };
    }

    pub fn focus_previous(&mut self) {
        self.focus = match self.focus {
            QuestionField::Text => QuestionField::Option(self.options.len() - 1),
            QuestionField::Option(0) => QuestionField::Text,
            QuestionField::Option(i) => QuestionField::Option(i - 1),
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            QuestionField::Text => self.text.push(c),
            QuestionField::Option(i) => {
                if let Some(option) = self.options.get_mut(i) {
                    push_limited(&mut option.text, c, MAX_OPTION_LENGTH);
                }
            }
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            QuestionField::Text => {
                self.text.pop();
            }
            QuestionField::Option(i) => {
                if let Some(option) = self.options.get_mut(i) {
                    option.text.pop();
                }
            }
        }
    }

    /// Build the request body, or explain what is missing.
    pub fn payload(&self) -> Result<QuestionPayload, &'static str> {
        if self.text.trim().is_empty() {
            return Err("Savol matnini kiriting.");
        }
        if self.options.len() < MIN_OPTIONS {
            return Err("Kamida ikkita javob varianti kerak.");
        }
        if self.options.iter().any(|option| option.text.trim().is_empty()) {
            return Err("Barcha variantlarni to'ldiring.");
        }
        if !self.options.iter().any(|option| option.is_correct) {
            return Err("Kamida bitta to'g'ri javob bo'lishi kerak.");
        }

        Ok(QuestionPayload {
            text: self.text.clone(),
            options: self
                .options
                .iter()
                .map(|option| OptionPayload {
                    text: option.text.clone(),
                    is_correct: option.is_correct,
                })
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationField {
    #[default]
    BotToken,
    ChatId,
    Active,
}

/// Local copy of the notification settings while the admin edits them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationForm {
    pub setting: NotificationSetting,
    pub focus: NotificationField,
}

impl NotificationForm {
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            NotificationField::BotToken => NotificationField::ChatId,
            NotificationField::ChatId => NotificationField::Active,
            NotificationField::Active => NotificationField::BotToken,
        };
    }

    pub fn focus_previous(&mut self) {
        self.focus = match self.focus {
            NotificationField::BotToken => NotificationField::Active,
            NotificationField::ChatId => NotificationField::BotToken,
            NotificationField::Active => NotificationField::ChatId,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            NotificationField::BotToken => self.setting.bot_token.push(c),
            NotificationField::ChatId => self.setting.admin_chat_id.push(c),
            NotificationField::Active => {
                if c == ' ' {
                    self.toggle_active();
                }
            }
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            NotificationField::BotToken => {
                self.setting.bot_token.pop();
            }
            NotificationField::ChatId => {
                self.setting.admin_chat_id.pop();
            }
            NotificationField::Active => {}
        }
    }

    pub fn toggle_active(&mut self) {
        self.setting.is_active = !self.setting.is_active;
    }
}
