//! Types exchanged with the TestUZ REST API.

mod attempt;
mod auth;
mod notification;
mod question;

pub use attempt::{AttemptAnswer, AttemptResponse, AttemptSubmission, TestAttempt};
pub(crate) use attempt::rounded_percentage;
pub use auth::{LoginRequest, TokenResponse};
pub use notification::NotificationSetting;
pub use question::{AnswerOption, OptionPayload, Question, QuestionPayload};

/// Which side of the platform the user is acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Admin,
}
