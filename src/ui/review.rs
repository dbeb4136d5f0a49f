//! Walk-through of every question after the session, with the correct
//! option and the user's pick marked.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{NUM_OPTIONS, OptionLabel};
use crate::session::ReviewEntry;

/// Lines one entry takes before wrapping: prompt, options, explanation and
/// a blank separator.
pub(crate) const LINES_PER_ENTRY: usize = NUM_OPTIONS + 3;

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    let lines: Vec<Line> = app
        .session()
        .review()
        .iter()
        .flat_map(entry_lines)
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Review ")
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));
    let height = wrapped_height(&lines, block.inner(chunks[0]).width);
    let scroll = app.review_scroll().min(height.saturating_sub(1));

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block)
        .scroll((super::scroll_offset(scroll), 0));
    frame.render_widget(widget, chunks[0]);
    app.set_review_height(height);

    let controls = Paragraph::new("j/k scroll  ·  esc back  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[1]);
}

/// Rows the lines take when wrapped at `width`, counting every line at
/// least once.
fn wrapped_height(lines: &[Line], width: u16) -> usize {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}

fn entry_lines<'a>(entry: &ReviewEntry<'a>) -> Vec<Line<'a>> {
    let record = entry.record;
    let mut lines = Vec::with_capacity(LINES_PER_ENTRY);

    lines.push(Line::from(Span::styled(
        format!("Question {}: {}", entry.number, record.question_text),
        Style::default().fg(Color::White).bold(),
    )));

    for (label, option) in OptionLabel::ALL.iter().zip(record.options.iter()) {
        let index = label.index();
        let picked = entry.choice == Some(index);

        let style = if record.is_correct(index) {
            Style::default().fg(Color::Green).bold()
        } else if picked {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };

        lines.push(Line::from(vec![
            Span::styled(if picked { " > " } else { "   " }, style),
            Span::styled(format!("{}) ", label), style),
            Span::styled(option.as_str(), style),
        ]));
    }

    let explanation = if record.explanation.is_empty() {
        "(none)"
    } else {
        record.explanation.as_str()
    };
    lines.push(Line::from(vec![
        Span::styled("Explanation: ", Style::default().fg(Color::DarkGray)),
        Span::styled(explanation, Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(""));

    lines
}
