use crate::models::AppState;
use crate::session::QuizSession;
use crate::ui::review::LINES_PER_ENTRY;

/// Screen state of the terminal quiz around a [`QuizSession`].
pub struct App {
    pub state: AppState,
    session: QuizSession,
    result_scroll: usize,
    review_scroll: usize,
    review_height: usize,
}

impl App {
    pub fn new(session: QuizSession) -> Self {
        Self {
            state: AppState::Welcome,
            session,
            result_scroll: 0,
            review_scroll: 0,
            review_height: 0,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn review_scroll(&self) -> usize {
        self.review_scroll
    }

    pub fn start_quiz(&mut self) {
        self.state = AppState::Question;
    }

    pub fn select_next_option(&mut self) {
        self.session.select_next_option();
    }

    pub fn select_previous_option(&mut self) {
        self.session.select_previous_option();
    }

    pub fn select_option(&mut self, index: usize) {
        self.session.select_option(index);
    }

    pub fn submit_answer(&mut self) {
        if self.session.submit_answer().is_some() {
            self.state = AppState::Feedback;
        }
    }

    /// Leave the feedback screen for the next question or the result.
    pub fn next_question(&mut self) {
        self.state = if self.session.advance() {
            AppState::Result
        } else {
            AppState::Question
        };
    }

    pub fn scroll_results_down(&mut self) {
        let max = self.session.total_questions().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn start_review(&mut self) {
        self.review_scroll = 0;
        self.review_height = self.session.total_questions() * LINES_PER_ENTRY;
        self.state = AppState::Review;
    }

    pub fn close_review(&mut self) {
        self.state = AppState::Result;
    }

    pub fn scroll_review_down(&mut self) {
        let max = self.review_height.saturating_sub(1);
        self.review_scroll = (self.review_scroll + 1).min(max);
    }

    /// Rows the review takes on screen, as laid out by the last draw.
    pub(crate) fn set_review_height(&mut self, rows: usize) {
        self.review_height = rows;
        self.review_scroll = self.review_scroll.min(rows.saturating_sub(1));
    }

    pub fn scroll_review_up(&mut self) {
        self.review_scroll = self.review_scroll.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.state = AppState::Welcome;
        self.result_scroll = 0;
        self.review_scroll = 0;
        self.review_height = 0;
    }
}
