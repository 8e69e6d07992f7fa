//! # testuz
//!
//! Terminal client for the TestUZ assessment service.
//!
//! Students enter their name, answer the published multiple-choice test and
//! see their score. Admins log in with a token, maintain the question bank,
//! configure Telegram notifications and review recent attempts.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use testuz::{ApiClient, Config};
//!
//! # async fn demo() -> testuz::Result<()> {
//! let config = Config::default();
//! let api = ApiClient::from_config(&config)?;
//! let questions = api.list_questions(None).await?;
//! println!("{} questions published", questions.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod runtime;
pub mod session;
pub mod terminal;
mod ui;

pub use api::{ApiClient, DashboardData};
pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
pub use session::TokenStore;
