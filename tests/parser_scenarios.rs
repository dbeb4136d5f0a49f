//! End-to-end parsing scenarios for pasted question blocks.

use simulado::{ParseError, parse_block};

const ARITHMETIC: &str = "Pergunta: What is 2+2?\na) 3\nb) 4\nc) 5\nd) 6\ne) 7\n";

fn question(prompt: &str) -> String {
    format!("Pergunta: {prompt}\na) alpha\nb) beta\nc) gamma\nd) delta\ne) epsilon\n")
}

#[test]
fn single_question_without_justification() {
    let records = parse_block(&format!("{ARITHMETIC}Gabarito: b")).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].question_text, "What is 2+2?");
    assert_eq!(records[0].options, ["3", "4", "5", "6", "7"]);
    assert_eq!(records[0].correct_index, 1);
    assert_eq!(records[0].explanation, "");
}

#[test]
fn single_question_with_justification() {
    let text = format!("{ARITHMETIC}Justificativa: Basic arithmetic.\nGabarito: b");
    let records = parse_block(&text).unwrap();

    assert_eq!(records[0].explanation, "Basic arithmetic.");
}

#[test]
fn justification_spanning_lines() {
    let text = format!("{ARITHMETIC}Justificativa: Two plus\n   two is\nfour.\n{}Gabarito: b a", question("Next?"));
    let records = parse_block(&text).unwrap();

    assert_eq!(records[0].explanation, "Two plus two is four.");
    assert_eq!(records[1].explanation, "");
}

#[test]
fn two_questions_keep_source_order() {
    let text = format!("{}{}Gabarito: a b", question("First?"), question("Second?"));
    let records = parse_block(&text).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].question_text, "First?");
    assert_eq!(records[0].correct_index, 0);
    assert_eq!(records[1].question_text, "Second?");
    assert_eq!(records[1].correct_index, 1);
}

#[test]
fn short_answer_key_is_a_count_mismatch() {
    let text = format!("{}{}Gabarito: a", question("First?"), question("Second?"));

    assert_eq!(
        parse_block(&text),
        Err(ParseError::CountMismatch { parsed: 2, key: 1 })
    );
}

#[test]
fn three_questions_two_letters() {
    let text = format!(
        "{}{}{}Gabarito: a b",
        question("One?"),
        question("Two?"),
        question("Three?")
    );
    let err = parse_block(&text).unwrap_err();

    assert_eq!(err, ParseError::CountMismatch { parsed: 3, key: 2 });
    assert_eq!(err.code(), "count_mismatch");
}

#[test]
fn missing_option_is_named() {
    let text = "Pergunta: Q?\na) 1\nb) 2\nd) 4\ne) 5\nGabarito: a";
    assert_eq!(parse_block(text), Err(ParseError::MissingOptionMarker('c')));

    let text = "Pergunta: Q?\na) 1\nb) 2\nc) 3\ne) 5\nGabarito: a";
    assert_eq!(parse_block(text), Err(ParseError::MissingOptionMarker('d')));
}

#[test]
fn whitespace_only_input_is_empty() {
    assert_eq!(parse_block("   \n  "), Err(ParseError::EmptyInput));
}

#[test]
fn key_letter_outside_range() {
    let text = format!("{ARITHMETIC}Gabarito: f");
    assert_eq!(parse_block(&text), Err(ParseError::InvalidAnswerLetter('f')));
}

#[test]
fn no_answer_key() {
    assert_eq!(parse_block(ARITHMETIC), Err(ParseError::MissingAnswerKey));
}

#[test]
fn key_position_does_not_change_order() {
    let at_end = format!("{}{}Gabarito: d e", question("First?"), question("Second?"));
    let at_start = format!("Gabarito: d e\n{}{}", question("First?"), question("Second?"));

    assert_eq!(parse_block(&at_end).unwrap(), parse_block(&at_start).unwrap());
}

#[test]
fn keyword_case_does_not_matter() {
    let mixed = format!("{}Gabarito: b a", question("First?") + &question("Second?"));
    let upper = mixed.replace("Pergunta:", "PERGUNTA:").replace("Gabarito: b a", "GABARITO: B A");
    let lower = mixed.replace("Pergunta:", "pergunta:").replace("Gabarito:", "gabarito:");

    let expected = parse_block(&mixed).unwrap();
    assert_eq!(parse_block(&upper).unwrap(), expected);
    assert_eq!(parse_block(&lower).unwrap(), expected);
}

#[test]
fn trailing_text_after_last_option_stays_in_it() {
    let text = "Pergunta: Q?\na) 1\nb) 2\nc) 3\nd) 4\ne) 5\n\nsome trailing note\nGabarito: e";
    let records = parse_block(text).unwrap();

    assert_eq!(records[0].options[4], "5 some trailing note");
}
