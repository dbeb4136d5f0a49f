//! One run through a list of questions.
//!
//! A session shows one question at a time, records the option picked for
//! each, and keeps the trail for scoring and review. Records are never
//! modified.

use uuid::Uuid;

use crate::QuizError;
use crate::models::{NUM_OPTIONS, QuestionRecord};

pub struct QuizSession {
    id: Uuid,
    records: Vec<QuestionRecord>,
    current_index: usize,
    selected_option: usize,
    answers: Vec<Option<usize>>,
    finished: bool,
}

/// Final tally of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub correct: usize,
    pub total: usize,
    /// Option picked for each question, in session order.
    pub choices: Vec<Option<usize>>,
}

impl SessionOutcome {
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.correct as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// A question replayed with the choice made for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewEntry<'a> {
    /// 1-based position in the session.
    pub number: usize,
    pub record: &'a QuestionRecord,
    pub choice: Option<usize>,
    pub is_correct: bool,
}

impl QuizSession {
    /// Start a session over `records` in the given order.
    pub fn new(records: Vec<QuestionRecord>) -> Result<Self, QuizError> {
        if records.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        let num_questions = records.len();
        Ok(Self {
            id: Uuid::new_v4(),
            records,
            current_index: 0,
            selected_option: 0,
            answers: vec![None; num_questions],
            finished: false,
        })
    }

    /// Start a session over `records` in random order.
    pub fn shuffled(mut records: Vec<QuestionRecord>) -> Result<Self, QuizError> {
        records.sort_by_cached_key(|_| Uuid::new_v4());
        Self::new(records)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn current_record(&self) -> &QuestionRecord {
        &self.records[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.records.len()
    }

    /// Questions answered so far.
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn current_choice(&self) -> Option<usize> {
        self.answers[self.current_index]
    }

    pub fn is_current_answered(&self) -> bool {
        self.current_choice().is_some()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.records.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn select_next_option(&mut self) {
        if !self.is_current_answered() {
            self.selected_option = (self.selected_option + 1) % NUM_OPTIONS;
        }
    }

    pub fn select_previous_option(&mut self) {
        if !self.is_current_answered() {
            self.selected_option = (self.selected_option + NUM_OPTIONS - 1) % NUM_OPTIONS;
        }
    }

    /// Jump straight to an option; out-of-range indexes are ignored.
    pub fn select_option(&mut self, index: usize) {
        if index < NUM_OPTIONS && !self.is_current_answered() {
            self.selected_option = index;
        }
    }

    /// Lock in the selected option for the current question.
    ///
    /// Returns whether it was correct, or `None` if the question had
    /// already been answered.
    pub fn submit_answer(&mut self) -> Option<bool> {
        if self.finished || self.is_current_answered() {
            return None;
        }

        let choice = self.selected_option;
        self.answers[self.current_index] = Some(choice);
        Some(self.current_record().is_correct(choice))
    }

    /// Move past an answered question. Returns true once the session is
    /// finished.
    pub fn advance(&mut self) -> bool {
        if !self.finished && self.is_current_answered() {
            if self.is_last_question() {
                self.finished = true;
            } else {
                self.current_index += 1;
                self.selected_option = 0;
            }
        }

        self.finished
    }

    pub fn correct_count(&self) -> usize {
        self.answers
            .iter()
            .zip(self.records.iter())
            .filter(|(answer, record)| **answer == Some(record.correct_index))
            .count()
    }

    pub fn outcome(&self) -> SessionOutcome {
        SessionOutcome {
            correct: self.correct_count(),
            total: self.records.len(),
            choices: self.answers.clone(),
        }
    }

    pub fn review(&self) -> Vec<ReviewEntry<'_>> {
        self.records
            .iter()
            .zip(self.answers.iter())
            .enumerate()
            .map(|(index, (record, choice))| ReviewEntry {
                number: index + 1,
                record,
                choice: *choice,
                is_correct: choice.is_some_and(|c| record.is_correct(c)),
            })
            .collect()
    }

    /// Clear every answer and go back to the first question, same order.
    pub fn restart(&mut self) {
        self.current_index = 0;
        self.selected_option = 0;
        self.answers = vec![None; self.records.len()];
        self.finished = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, correct_index: usize) -> QuestionRecord {
        QuestionRecord {
            question_text: text.to_string(),
            options: ["a", "b", "c", "d", "e"].map(String::from),
            correct_index,
            explanation: String::new(),
        }
    }

    fn session() -> QuizSession {
        QuizSession::new(vec![record("one", 0), record("two", 3), record("three", 4)]).unwrap()
    }

    #[test]
    fn test_empty_session_is_rejected() {
        assert!(matches!(QuizSession::new(Vec::new()), Err(QuizError::NoQuestions)));
        assert!(matches!(QuizSession::shuffled(Vec::new()), Err(QuizError::NoQuestions)));
    }

    #[test]
    fn test_option_navigation_wraps() {
        let mut session = session();
        session.select_previous_option();
        assert_eq!(session.selected_option(), 4);
        session.select_next_option();
        assert_eq!(session.selected_option(), 0);
        session.select_option(2);
        assert_eq!(session.selected_option(), 2);
        session.select_option(7);
        assert_eq!(session.selected_option(), 2);
    }

    #[test]
    fn test_full_run() {
        let mut session = session();

        assert_eq!(session.submit_answer(), Some(true));
        assert_eq!(session.submit_answer(), None);
        assert!(!session.advance());

        session.select_option(1);
        assert_eq!(session.submit_answer(), Some(false));
        assert!(!session.advance());

        assert!(session.is_last_question());
        session.select_option(4);
        assert_eq!(session.submit_answer(), Some(true));
        assert!(session.advance());
        assert!(session.is_finished());

        let outcome = session.outcome();
        assert_eq!(outcome.correct, 2);
        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.choices, vec![Some(0), Some(1), Some(4)]);
        assert!((outcome.percentage() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_cannot_advance_unanswered() {
        let mut session = session();
        assert!(!session.advance());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_selection_locked_after_answer() {
        let mut session = session();
        session.submit_answer();
        session.select_next_option();
        assert_eq!(session.selected_option(), 0);
    }

    #[test]
    fn test_review_and_restart() {
        let mut session = session();
        session.submit_answer();
        session.advance();
        session.select_option(3);
        session.submit_answer();

        let review = session.review();
        assert_eq!(review.len(), 3);
        assert_eq!(review[0].number, 1);
        assert!(review[0].is_correct);
        assert_eq!(review[1].choice, Some(3));
        assert!(review[1].is_correct);
        assert_eq!(review[2].choice, None);
        assert!(!review[2].is_correct);

        session.restart();
        assert_eq!(session.answered_count(), 0);
        assert_eq!(session.current_question_number(), 1);
        assert!(!session.is_finished());
    }

    #[test]
    fn test_shuffle_keeps_every_record() {
        let records: Vec<_> = (0..20).map(|i| record(&i.to_string(), i % 5)).collect();
        let session = QuizSession::shuffled(records.clone()).unwrap();

        let mut texts: Vec<_> = session.records().iter().map(|r| r.question_text.clone()).collect();
        let mut expected: Vec<_> = records.into_iter().map(|r| r.question_text).collect();
        texts.sort();
        expected.sort();
        assert_eq!(texts, expected);
    }
}
