//! Terminal event loop.
//!
//! The loop owns the [`App`]. Requests run on background tasks and report
//! back over a channel, so the screen keeps redrawing while they are in
//! flight.

mod input;

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::app::{App, Banner, Command, Outcome};
use crate::config::Config;
use crate::error::Result;
use crate::session::TokenStore;
use crate::terminal::{self, AppTerminal};
use crate::ui;

pub use input::handle_key;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the client until the user quits.
pub async fn run(config: Config) -> Result<()> {
    let api = ApiClient::from_config(&config)?;
    let tokens = TokenStore::new(config.token_file.clone());
    info!(api_url = api.base_url(), token_file = %tokens.path().display(), "starting client");

    let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();
    let dispatcher = Dispatcher { api, tokens, tx };
    let mut app = App::new(config.api_url.clone());

    match dispatcher.tokens.load() {
        Ok(Some(token)) => {
            info!("restoring saved admin session");
            let command = app.restore_session(token);
            dispatcher.dispatch(&mut app, command);
        }
        Ok(None) => {}
        Err(err) => warn!(error = %err, "could not read saved admin token"),
    }

    let mut terminal = terminal::init()?;
    let result = event_loop(&mut terminal, &mut app, &dispatcher, &mut rx).await;
    terminal::restore()?;
    info!("client stopped");
    result
}

async fn event_loop(
    terminal: &mut AppTerminal,
    app: &mut App,
    dispatcher: &Dispatcher,
    outcomes: &mut mpsc::UnboundedReceiver<Outcome>,
) -> Result<()> {
    loop {
        while let Ok(outcome) = outcomes.try_recv() {
            for command in app.apply(outcome) {
                dispatcher.dispatch(app, command);
            }
        }

        if app.should_quit {
            return Ok(());
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle input with timeout
        if event::poll(INPUT_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = handle_key(app, key) {
                    dispatcher.dispatch(app, command);
                }
            }
        } else {
            tokio::task::yield_now().await;
        }
    }
}

/// Executes [`Command`]s: token persistence inline, requests on tasks.
struct Dispatcher {
    api: ApiClient,
    tokens: TokenStore,
    tx: mpsc::UnboundedSender<Outcome>,
}

impl Dispatcher {
    fn dispatch(&self, app: &mut App, command: Command) {
        debug!(command = command_name(&command), "dispatching");

        let api = self.api.clone();
        let tx = self.tx.clone();
        match command {
            Command::StoreToken(token) => {
                let stored = match &token {
                    Some(token) => self.tokens.save(token),
                    None => self.tokens.clear(),
                };
                if let Err(err) = stored {
                    warn!(error = %err, "could not persist admin token");
                    app.banner = Some(Banner::error(err.to_string()));
                }
            }
            Command::Login { username, password } => {
                tokio::spawn(async move {
                    let result = api.login(&username, &password).await;
                    let _ = tx.send(Outcome::LoggedIn(result));
                });
            }
            Command::LoadDashboard { token } => {
                tokio::spawn(async move {
                    let result = api.load_dashboard(&token).await;
                    let _ = tx.send(Outcome::DashboardLoaded { token, result });
                });
            }
            Command::SaveQuestion { token, id, payload } => {
                tokio::spawn(async move {
                    let result = match id {
                        Some(id) => api.update_question(&token, id, &payload).await,
                        None => api.create_question(&token, &payload).await,
                    };
                    let _ = tx.send(Outcome::QuestionSaved {
                        updated: id.is_some(),
                        result,
                    });
                });
            }
            Command::DeleteQuestion { token, id } => {
                tokio::spawn(async move {
                    let result = api.delete_question(&token, id).await;
                    let _ = tx.send(Outcome::QuestionDeleted(result));
                });
            }
            Command::SaveNotification { token, setting } => {
                tokio::spawn(async move {
                    let result = api.update_notification(&token, &setting).await;
                    let _ = tx.send(Outcome::NotificationSaved(result));
                });
            }
            Command::LoadStudentQuestions => {
                tokio::spawn(async move {
                    let result = api.list_questions(None).await;
                    let _ = tx.send(Outcome::StudentQuestionsLoaded(result));
                });
            }
            Command::SubmitAttempt(submission) => {
                tokio::spawn(async move {
                    let result = api.submit_attempt(&submission).await;
                    let _ = tx.send(Outcome::AttemptSubmitted(result));
                });
            }
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Login { .. } => "login",
        Command::StoreToken(_) => "store_token",
        Command::LoadDashboard { .. } => "load_dashboard",
        Command::SaveQuestion { .. } => "save_question",
        Command::DeleteQuestion { .. } => "delete_question",
        Command::SaveNotification { .. } => "save_notification",
        Command::LoadStudentQuestions => "load_student_questions",
        Command::SubmitAttempt(_) => "submit_attempt",
    }
}
