//! # simulado
//!
//! Multiple-choice quiz authoring and practice in the terminal.
//!
//! Questions are written as plain text with an answer key, parsed into
//! [`QuestionRecord`]s, saved in a JSON [`RecordStore`] and replayed as an
//! interactive quiz with scoring and review.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use simulado::{Quiz, QuizError, RecordStore};
//!
//! fn main() -> Result<(), QuizError> {
//!     let mut store = RecordStore::open("questions.json");
//!     store.import_block(
//!         "Pergunta: What is 2+2?\na) 3\nb) 4\nc) 5\nd) 6\ne) 7\nGabarito: b",
//!     )?;
//!
//!     Quiz::shuffled(store.questions())?.run()?;
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
mod data;
pub mod logging;
mod models;
mod parser;
mod session;
pub mod terminal;
mod ui;

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;
use tracing::debug;

pub use app::App;
pub use config::Config;
pub use data::{
    AddOutcome, DEFAULT_STORE_FILE, ImportSummary, RecordId, RecordStore, StoreError, StoredRecord,
};
pub use models::{
    AppState, NUM_OPTIONS, OptionLabel, QuestionEdit, QuestionRecord, RecordError,
};
pub use parser::{ParseError, normalize_whitespace, parse_block};
pub use session::{QuizSession, ReviewEntry, SessionOutcome};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("there are no saved questions")]
    NoQuestions,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Quiz over `records` in the given order.
    pub fn new(records: Vec<QuestionRecord>) -> Result<Self, QuizError> {
        Ok(Self::from_session(QuizSession::new(records)?))
    }

    /// Quiz over `records` in random order.
    pub fn shuffled(records: Vec<QuestionRecord>) -> Result<Self, QuizError> {
        Ok(Self::from_session(QuizSession::shuffled(records)?))
    }

    pub fn from_session(session: QuizSession) -> Self {
        Self {
            app: App::new(session),
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal until the user quits and returns the outcome
    /// of the session as it stood at that point.
    pub fn run(mut self) -> Result<SessionOutcome, QuizError> {
        debug!(session = %self.app.session().id(), "starting quiz");

        let mut guard = terminal::TerminalGuard::enter()?;
        run_event_loop(guard.terminal(), &mut self.app)?;
        drop(guard);

        Ok(self.app.session().outcome())
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::QuizTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
        return true;
    }

    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Question => handle_question_input(app, key),
        AppState::Feedback => handle_feedback_input(app, key),
        AppState::Result => handle_result_input(app, key),
        AppState::Review => handle_review_input(app, key),
    }

    false
}

fn handle_welcome_input(app: &mut App, key: KeyCode) {
    if key == KeyCode::Enter {
        app.start_quiz();
    }
}

fn handle_question_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_answer(),
        KeyCode::Char(c) => {
            if let Some(label) = OptionLabel::from_char(c) {
                app.select_option(label.index());
            }
        }
        _ => {}
    }
}

fn handle_feedback_input(app: &mut App, key: KeyCode) {
    if matches!(key, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right) {
        app.next_question();
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.start_review(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.restart(),
        _ => {}
    }
}

fn handle_review_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_review_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_review_up(),
        KeyCode::Esc | KeyCode::Backspace => app.close_review(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let records = parse_block(
            "Pergunta: One?\na) 1\nb) 2\nc) 3\nd) 4\ne) 5\n\
             Pergunta: Two?\na) 1\nb) 2\nc) 3\nd) 4\ne) 5\n\
             Gabarito: c a",
        )
        .unwrap();
        Quiz::new(records).unwrap().app
    }

    #[test]
    fn test_keyboard_run() {
        let mut app = app();
        assert!(!handle_input(&mut app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Question);

        handle_input(&mut app, KeyCode::Char('c'));
        assert_eq!(app.session().selected_option(), 2);
        handle_input(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::Feedback);
        handle_input(&mut app, KeyCode::Enter);

        handle_input(&mut app, KeyCode::Char('j'));
        handle_input(&mut app, KeyCode::Char(' '));
        handle_input(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::Result);

        let outcome = app.session().outcome();
        assert_eq!(outcome.correct, 1);
        assert_eq!(outcome.choices, vec![Some(2), Some(1)]);

        handle_input(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state, AppState::Review);
        handle_input(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Result);
    }

    #[test]
    fn test_quit_from_any_screen() {
        let mut app = app();
        assert!(handle_input(&mut app, KeyCode::Char('q')));
        app.start_quiz();
        assert!(handle_input(&mut app, KeyCode::Char('Q')));
    }

    #[test]
    fn test_no_questions() {
        assert!(matches!(Quiz::new(Vec::new()), Err(QuizError::NoQuestions)));
    }
}
