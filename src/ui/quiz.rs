use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{AppState, OptionLabel, QuestionRecord};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let record = session.current_record();
    let show_feedback = app.state == AppState::Feedback;

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(12),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], chunks[1], app);
    render_question_text(frame, chunks[2], &record.question_text);
    render_options(frame, chunks[3], record, session.selected_option(), session.current_choice());

    if show_feedback {
        render_feedback(frame, chunks[4], record, session.current_choice());
    }

    render_controls(frame, chunks[5], show_feedback, session.is_last_question());
}

fn render_progress(frame: &mut Frame, label_area: Rect, bar_area: Rect, app: &App) {
    let session = app.session();
    let answered = session.answered_count();
    let total = session.total_questions();

    let label = Paragraph::new(format!(
        "Question {} of {}",
        session.current_question_number(),
        total
    ))
    .alignment(Alignment::Right)
    .fg(Color::DarkGray);
    frame.render_widget(label, label_area);

    let ratio = if total > 0 {
        answered as f64 / total as f64
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .label(format!("{} / {}", answered, total))
        .ratio(ratio.clamp(0.0, 1.0));
    frame.render_widget(gauge, bar_area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    record: &QuestionRecord,
    selected: usize,
    choice: Option<usize>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(record.options.len() * 2);

    for (label, option) in OptionLabel::ALL.iter().zip(record.options.iter()) {
        let index = label.index();
        let (marker, style) = match choice {
            None if index == selected => (">", Style::default().fg(Color::Cyan).bold()),
            None => (" ", Style::default().fg(Color::Gray)),
            Some(_) if record.is_correct(index) => ("+", Style::default().fg(Color::Green).bold()),
            Some(picked) if picked == index => ("-", Style::default().fg(Color::Red).bold()),
            Some(_) => (" ", Style::default().fg(Color::DarkGray)),
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}) ", label), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn render_feedback(frame: &mut Frame, area: Rect, record: &QuestionRecord, choice: Option<usize>) {
    let is_correct = choice.is_some_and(|c| record.is_correct(c));
    let (verdict, color) = if is_correct {
        ("Correct!".to_string(), Color::Green)
    } else {
        let answer = record
            .correct_label()
            .map(|label| format!("Wrong. Answer: {})", label))
            .unwrap_or_else(|| "Wrong.".to_string());
        (answer, Color::Red)
    };

    let mut lines = vec![Line::from(Span::styled(
        verdict,
        Style::default().fg(color).bold(),
    ))];

    if !record.explanation.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Explanation: ", Style::default().fg(Color::Cyan)),
            Span::styled(record.explanation.as_str(), Style::default().fg(Color::Gray)),
        ]));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, show_feedback: bool, is_last: bool) {
    let text = match (show_feedback, is_last) {
        (false, _) => "j/k navigate  ·  a-e pick  ·  enter select  ·  q quit",
        (true, false) => "enter next  ·  q quit",
        (true, true) => "enter finish  ·  q quit",
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
