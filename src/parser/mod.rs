//! Parser for pasted question blocks.
//!
//! ```text
//! Pergunta: <prompt, may span lines>
//! a) <option>
//! b) <option>
//! c) <option>
//! d) <option>
//! e) <option>
//! Justificativa: <optional>
//! Pergunta: ...
//! Gabarito: b a
//! ```
//!
//! Keywords and option markers are matched case-insensitively. The answer
//! key is located and cut out first, the remaining text is split on
//! `Pergunta:`, and each question block is sliced between its option
//! markers. The i-th answer letter answers the i-th question in source order.

mod error;
mod scanner;

use std::ops::Range;

pub use error::ParseError;

use crate::models::{NUM_OPTIONS, OptionLabel, QuestionRecord};
use scanner::{
    ANSWER_KEY_KEYWORD, JUSTIFICATION_KEYWORD, QUESTION_KEYWORD, find_blank_line, find_keyword,
    find_marker, keyword_positions,
};

/// Parse a whole block into question records, in source order.
///
/// Either every question parses and matches the answer key, or an error is
/// returned and nothing is produced.
pub fn parse_block(text: &str) -> Result<Vec<QuestionRecord>, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let text = normalize_line_endings(text);
    let text = text.trim();

    let key = AnswerKey::locate(text)?;
    let remaining = key.cut_from(text);

    let questions = split_questions(&remaining)
        .into_iter()
        .map(parse_question)
        .collect::<Result<Vec<_>, _>>()?;

    if questions.len() != key.letters.len() {
        return Err(ParseError::CountMismatch {
            parsed: questions.len(),
            key: key.letters.len(),
        });
    }

    questions
        .into_iter()
        .zip(key.letters)
        .map(|(question, letter)| {
            OptionLabel::from_char(letter)
                .map(|label| question.answered_by(label))
                .ok_or(ParseError::InvalidAnswerLetter(letter))
        })
        .collect()
}

/// Collapse every run of whitespace to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// The `Gabarito:` section: its letters and where it sits in the block.
struct AnswerKey {
    letters: Vec<char>,
    span: Range<usize>,
}

impl AnswerKey {
    /// The letters run from the keyword up to the next `Pergunta:` or
    /// `Justificativa:` keyword, or the first blank line after the first
    /// letter, whichever comes first. Text after such a blank line up to
    /// the next keyword is a closing note and is cut out with the key.
    fn locate(text: &str) -> Result<Self, ParseError> {
        let start = find_keyword(text, ANSWER_KEY_KEYWORD, 0).ok_or(ParseError::MissingAnswerKey)?;
        let body_start = start + ANSWER_KEY_KEYWORD.len();

        let next_keyword = [QUESTION_KEYWORD, JUSTIFICATION_KEYWORD]
            .into_iter()
            .filter_map(|keyword| find_keyword(text, keyword, body_start))
            .min()
            .unwrap_or(text.len());

        let letters_end = text[body_start..]
            .find(|c: char| !c.is_whitespace())
            .and_then(|offset| find_blank_line(text, body_start + offset))
            .map_or(next_keyword, |blank| blank.min(next_keyword));

        let letters: Vec<char> = text[body_start..letters_end]
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        if letters.is_empty() {
            return Err(ParseError::MissingAnswerKey);
        }

        Ok(Self {
            letters,
            span: start..next_keyword,
        })
    }

    fn cut_from(&self, text: &str) -> String {
        format!("{}\n{}", &text[..self.span.start], &text[self.span.end..])
    }
}

/// Split on `Pergunta:`, dropping the keyword and blank blocks.
///
/// Text before the first keyword, such as a title line, is ignored.
fn split_questions(text: &str) -> Vec<&str> {
    let positions = keyword_positions(text, QUESTION_KEYWORD);

    positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            let end = positions.get(i + 1).copied().unwrap_or(text.len());
            text[pos + QUESTION_KEYWORD.len()..end].trim()
        })
        .filter(|block| !block.is_empty())
        .collect()
}

/// A question block before its answer letter is applied.
struct ParsedQuestion {
    question_text: String,
    options: [String; NUM_OPTIONS],
    explanation: String,
}

impl ParsedQuestion {
    fn answered_by(self, label: OptionLabel) -> QuestionRecord {
        QuestionRecord {
            question_text: self.question_text,
            options: self.options,
            correct_index: label.index(),
            explanation: self.explanation,
        }
    }
}

fn parse_question(block: &str) -> Result<ParsedQuestion, ParseError> {
    let first = find_marker(block, OptionLabel::A, 0).ok_or(ParseError::MissingPromptDelimiter)?;

    let question_text = normalize_whitespace(&block[..first.start]);
    if question_text.is_empty() {
        return Err(ParseError::EmptyPrompt);
    }

    let justification = find_keyword(block, JUSTIFICATION_KEYWORD, first.content_start);
    let options_end = justification.unwrap_or(block.len());
    let options_region = &block[..options_end];

    let mut markers = vec![first];
    for label in &OptionLabel::ALL[1..] {
        let from = markers.last().map_or(0, |marker| marker.content_start);
        let marker = find_marker(options_region, *label, from)
            .ok_or(ParseError::MissingOptionMarker(label.as_char()))?;
        markers.push(marker);
    }

    let mut options: [String; NUM_OPTIONS] = Default::default();
    for (i, marker) in markers.iter().enumerate() {
        let end = markers.get(i + 1).map_or(options_end, |next| next.start);
        let text = normalize_whitespace(strip_bullet(&block[marker.content_start..end]));
        if text.is_empty() {
            return Err(ParseError::EmptyOption(marker.label.as_char()));
        }
        options[marker.label.index()] = text;
    }

    let explanation = justification
        .map(|pos| normalize_whitespace(&block[pos + JUSTIFICATION_KEYWORD.len()..]))
        .unwrap_or_default();

    Ok(ParsedQuestion {
        question_text,
        options,
        explanation,
    })
}

/// Drop a leading `-`, `–` or `—` bullet written after an option marker,
/// as in `a) - Paris`. A dash glued to the text (`a) -3`) is kept.
fn strip_bullet(text: &str) -> &str {
    let trimmed = text.trim_start();
    match trimmed.strip_prefix(['-', '–', '—']) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest,
        _ => trimmed,
    }
}
