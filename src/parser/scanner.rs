//! Left-to-right keyword and marker location.
//!
//! All keywords and markers are ASCII, so every match offset is a valid
//! char boundary even when the surrounding text is not.

use crate::models::OptionLabel;

pub const QUESTION_KEYWORD: &str = "Pergunta:";
pub const ANSWER_KEY_KEYWORD: &str = "Gabarito:";
pub const JUSTIFICATION_KEYWORD: &str = "Justificativa:";

/// An option marker such as `c)` found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionMarker {
    pub label: OptionLabel,
    /// Offset of the letter.
    pub start: usize,
    /// Offset just past the `)`.
    pub content_start: usize,
}

/// Case-insensitive search for `keyword` at or after `from`.
pub fn find_keyword(text: &str, keyword: &str, from: usize) -> Option<usize> {
    let haystack = text.as_bytes();
    let needle = keyword.as_bytes();

    if from > haystack.len() || needle.len() > haystack.len() - from {
        return None;
    }

    (from..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Offsets of every occurrence of `keyword`, in order.
pub fn keyword_positions(text: &str, keyword: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut from = 0;

    while let Some(pos) = find_keyword(text, keyword, from) {
        positions.push(pos);
        from = pos + keyword.len();
    }

    positions
}

/// First `label)` marker on a line starting at or after `from`.
///
/// The marker may be indented by spaces or tabs and matches either case.
pub fn find_marker(text: &str, label: OptionLabel, from: usize) -> Option<OptionMarker> {
    let bytes = text.as_bytes();
    let letter = label.as_char() as u8;

    line_starts(text)
        .filter(|&line_start| line_start >= from)
        .find_map(|line_start| {
            let line = &text[line_start..];
            let indent = line.len() - line.trim_start_matches([' ', '\t']).len();
            let start = line_start + indent;

            let is_marker = bytes.get(start).is_some_and(|b| b.eq_ignore_ascii_case(&letter))
                && bytes.get(start + 1) == Some(&b')');

            is_marker.then_some(OptionMarker {
                label,
                start,
                content_start: start + 2,
            })
        })
}

/// Offset of the first line break after `from` that opens a
/// whitespace-only line.
pub fn find_blank_line(text: &str, from: usize) -> Option<usize> {
    text[from..]
        .match_indices('\n')
        .map(|(i, _)| from + i)
        .find(|&newline| {
            let next_line = text[newline + 1..].split('\n').next().unwrap_or("");
            next_line.trim().is_empty()
        })
}

fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(0).chain(text.match_indices('\n').map(|(i, _)| i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_keyword_ignores_case() {
        assert_eq!(find_keyword("x PERGUNTA: y", QUESTION_KEYWORD, 0), Some(2));
        assert_eq!(find_keyword("gabarito: a", ANSWER_KEY_KEYWORD, 0), Some(0));
        assert_eq!(find_keyword("gabarito: a", ANSWER_KEY_KEYWORD, 1), None);
        assert_eq!(find_keyword("short", JUSTIFICATION_KEYWORD, 0), None);
        assert_eq!(find_keyword("abc", "abc", 10), None);
    }

    #[test]
    fn test_find_keyword_after_multibyte_text() {
        let text = "Questão é: Pergunta: ok";
        let pos = find_keyword(text, QUESTION_KEYWORD, 0).unwrap();
        assert_eq!(&text[pos..pos + QUESTION_KEYWORD.len()], "Pergunta:");
    }

    #[test]
    fn test_keyword_positions() {
        let text = "Pergunta: a\npergunta: b\nPERGUNTA: c";
        assert_eq!(keyword_positions(text, QUESTION_KEYWORD), vec![0, 12, 24]);
        assert!(keyword_positions("nothing here", QUESTION_KEYWORD).is_empty());
    }

    #[test]
    fn test_find_marker_at_line_start_only() {
        let text = "What (a) is this?\n  A) first\nb) second";
        let a = find_marker(text, OptionLabel::A, 0).unwrap();
        assert_eq!(a.start, 20);
        assert_eq!(&text[a.content_start..a.content_start + 6], " first");

        let b = find_marker(text, OptionLabel::B, a.content_start).unwrap();
        assert_eq!(&text[b.start..b.content_start], "b)");

        assert!(find_marker(text, OptionLabel::C, 0).is_none());
    }

    #[test]
    fn test_find_blank_line() {
        let text = "a b\nc\n  \t\nnote";
        assert_eq!(find_blank_line(text, 0), Some(5));
        assert_eq!(find_blank_line(text, 6), None);
        assert_eq!(find_blank_line("a\nb", 0), None);
    }

    #[test]
    fn test_find_marker_respects_from() {
        let text = "a) one\nb) two\na) again";
        let second = find_marker(text, OptionLabel::A, 1).unwrap();
        assert_eq!(second.start, 14);
    }
}
