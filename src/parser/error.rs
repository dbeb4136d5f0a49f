use thiserror::Error;

/// Reasons a block of questions is rejected.
///
/// Every variant aborts the whole block; no records are produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("the text is empty")]
    EmptyInput,

    #[error("answer key ('Gabarito:') is missing or has no letters")]
    MissingAnswerKey,

    #[error("option {0}) is missing")]
    MissingOptionMarker(char),

    #[error("option a) was not found at the start of a line, so the question text has no end")]
    MissingPromptDelimiter,

    #[error("question text before option a) is empty")]
    EmptyPrompt,

    #[error("option {0}) has no text")]
    EmptyOption(char),

    #[error("found {parsed} questions but the answer key has {key} letters")]
    CountMismatch { parsed: usize, key: usize },

    #[error("invalid letter '{0}' in the answer key (expected a to e)")]
    InvalidAnswerLetter(char),
}

impl ParseError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::EmptyInput => "empty_input",
            ParseError::MissingAnswerKey => "missing_answer_key",
            ParseError::MissingOptionMarker(_) => "missing_option_marker",
            ParseError::MissingPromptDelimiter => "missing_prompt_delimiter",
            ParseError::EmptyPrompt => "empty_prompt",
            ParseError::EmptyOption(_) => "empty_option",
            ParseError::CountMismatch { .. } => "count_mismatch",
            ParseError::InvalidAnswerLetter(_) => "invalid_answer_letter",
        }
    }
}
