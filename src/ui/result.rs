use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let outcome = app.session().outcome();
    let pct = outcome.percentage();
    let grade_color = get_grade_color(pct);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(
        frame,
        chunks[1],
        outcome.correct,
        outcome.total,
        pct,
        grade_color,
    );
    render_question_breakdown(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(
    frame: &mut Frame,
    area: Rect,
    correct: usize,
    total: usize,
    percentage: f64,
    grade_color: Color,
) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Correct: {} / {}  ({:.0}%)", correct, total, percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .session()
        .review()
        .into_iter()
        .map(|entry| {
            let (symbol, color) = if entry.is_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", entry.number),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_question(&entry.record.question_text),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((super::scroll_offset(app.result_scroll()), 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    if text.chars().count() > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r review  ·  n restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("short"), "short");
        let long = "é".repeat(QUESTION_PREVIEW_LENGTH + 5);
        let truncated = truncate_question(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
    }

    #[test]
    fn test_grade_color() {
        assert_eq!(get_grade_color(100.0), Color::Green);
        assert_eq!(get_grade_color(75.0), Color::Cyan);
        assert_eq!(get_grade_color(50.0), Color::Yellow);
        assert_eq!(get_grade_color(10.0), Color::Red);
    }
}
