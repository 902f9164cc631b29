use crate::app::App;
use crate::ui::centered_rect;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// The overlay's content panel for a given screen size. Pure, so the mouse
/// handler can recompute it and treat clicks outside as backdrop clicks.
pub fn panel_area(area: Rect) -> Rect {
    centered_rect(70, 80, area)
}

/// The " [x] " control in the panel's top-right border.
pub fn close_control_area(panel: Rect) -> Rect {
    Rect {
        x: panel.x + panel.width.saturating_sub(6),
        y: panel.y,
        width: 5.min(panel.width),
        height: 1,
    }
}

pub fn render(app: &App, frame: &mut Frame) {
    let Some(content) = app.overlay.content() else {
        return;
    };

    let area = panel_area(frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            content.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Genres: {}", content.genre_tags.join(", ")),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            content.updated_line.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if !content.image.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Cover: {}", content.image),
            Style::default().fg(Color::Blue),
        )));
    }
    lines.push(Line::from(""));
    for text_line in content.description.lines() {
        lines.push(Line::from(text_line.to_string()));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        content.seasons_heading.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    for season in &content.season_cards {
        lines.push(Line::from(Span::styled(
            format!("  {}", season.title),
            Style::default().fg(Color::White),
        )));
        lines.push(Line::from(Span::styled(
            format!("    {}", season.episode_line),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let close_style = if app.overlay.close_focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.overlay.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Podcast ")
                .title(Line::from(Span::styled(" [x] ", close_style)).alignment(Alignment::Right))
                .title_bottom(
                    Line::from(" ↑↓/PgUp/PgDn Scroll  x/Esc Close ")
                        .style(Style::default().fg(Color::DarkGray))
                        .alignment(Alignment::Right),
                ),
        );
    frame.render_widget(panel, area);
}
