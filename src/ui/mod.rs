mod quiz;
mod result;
pub(crate) mod review;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::AppState;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::Welcome => welcome::render(frame, area, app),
        AppState::Question | AppState::Feedback => quiz::render(frame, area, app),
        AppState::Result => result::render(frame, area, app),
        AppState::Review => review::render(frame, area, app),
    }
}

/// Paragraph scroll offsets are `u16`; larger positions stick to the end.
fn scroll_offset(position: usize) -> u16 {
    u16::try_from(position).unwrap_or(u16::MAX)
}
