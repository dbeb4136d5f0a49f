use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::normalize_whitespace;

/// Number of options every question carries.
pub const NUM_OPTIONS: usize = 5;

/// Option label `a` through `e`.
///
/// Shared by the option markers of a question block and the letters of the
/// answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
    E,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; NUM_OPTIONS] = [
        OptionLabel::A,
        OptionLabel::B,
        OptionLabel::C,
        OptionLabel::D,
        OptionLabel::E,
    ];

    /// Case-insensitive lookup; anything outside `a..e` is `None`.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(Self::A),
            'b' => Some(Self::B),
            'c' => Some(Self::C),
            'd' => Some(Self::D),
            'e' => Some(Self::E),
            _ => None,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'a',
            Self::B => 'b',
            Self::C => 'c',
            Self::D => 'd',
            Self::E => 'e',
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Why a record breaks the question invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("question text must not be empty")]
    EmptyQuestion,

    #[error("option {0}) must not be empty")]
    EmptyOption(OptionLabel),

    #[error("correct index {0} is out of range 0..=4")]
    AnswerOutOfRange(usize),
}

/// A parsed multiple-choice question.
///
/// Serialized with the field names the stored question list has always
/// used (`question`, `options`, `answer`, `explanation`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "question")]
    pub question_text: String,
    pub options: [String; NUM_OPTIONS],
    #[serde(rename = "answer")]
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionRecord {
    pub fn correct_label(&self) -> Option<OptionLabel> {
        OptionLabel::from_index(self.correct_index)
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }

    /// Checks the invariants the parser guarantees, for records that reach
    /// the store by other routes (edits, hand-written files).
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.question_text.trim().is_empty() {
            return Err(RecordError::EmptyQuestion);
        }

        if let Some(label) = self
            .options
            .iter()
            .position(|opt| opt.trim().is_empty())
            .and_then(OptionLabel::from_index)
        {
            return Err(RecordError::EmptyOption(label));
        }

        if self.correct_index >= NUM_OPTIONS {
            return Err(RecordError::AnswerOutOfRange(self.correct_index));
        }

        Ok(())
    }
}

/// Field changes for a stored question. Fields left `None` are kept.
///
/// Text is whitespace-normalized the same way parsed blocks are, so an
/// edited record fingerprints like one imported with the same content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionEdit {
    pub question_text: Option<String>,
    pub options: Vec<(OptionLabel, String)>,
    pub answer: Option<OptionLabel>,
    pub explanation: Option<String>,
}

impl QuestionEdit {
    pub fn is_empty(&self) -> bool {
        self.question_text.is_none()
            && self.options.is_empty()
            && self.answer.is_none()
            && self.explanation.is_none()
    }

    /// Apply the changes; later entries for the same option win.
    pub fn apply_to(&self, record: &mut QuestionRecord) {
        if let Some(text) = &self.question_text {
            record.question_text = normalize_whitespace(text);
        }
        for (label, text) in &self.options {
            record.options[label.index()] = normalize_whitespace(text);
        }
        if let Some(label) = self.answer {
            record.correct_index = label.index();
        }
        if let Some(explanation) = &self.explanation {
            record.explanation = normalize_whitespace(explanation);
        }
    }
}
