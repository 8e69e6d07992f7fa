//! Client state: role, banner, forms and the two flows.

mod forms;
mod state;
mod summary;

pub use forms::{
    LoginField, LoginForm, MAX_OPTIONS, MIN_OPTIONS, NameField, NotificationField,
    NotificationForm, OptionDraft, QuestionField, QuestionForm, StudentInfo,
};
pub use state::{
    AdminState, AdminTab, App, Banner, BannerKind, Command, Outcome, StudentState,
};
pub use summary::AdminSummary;
