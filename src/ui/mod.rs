mod detail;
mod help;
mod list;
pub mod preview;

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
};

pub use detail::{close_control_area, panel_area};
pub use list::{results_offset, screen_chunks};

/// Top-level render dispatch: the browse screen, then the detail overlay and
/// help popup layered above it.
pub fn render(app: &App, frame: &mut Frame) {
    list::render(app, frame);

    if app.overlay.is_open() {
        detail::render(app, frame);
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }

    // While a reload is armed the whole frame dims.
    if app.reload_pending() {
        let area = frame.area();
        frame
            .buffer_mut()
            .set_style(area, Style::default().add_modifier(Modifier::DIM));
    }
}

/// Create a centered rectangle using percentage of parent area.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
