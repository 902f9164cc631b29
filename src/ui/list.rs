use crate::app::{App, InputMode};
use crate::ui::preview::{self, CARD_HEIGHT};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

/// Vertical layout: header(3) + search(3) + selectors(3) + results(min) +
/// status(1). Shared with the mouse handler so click targets line up with
/// what was drawn.
pub fn screen_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area)
}

/// The list offset ratatui derives when the state is rebuilt each frame:
/// zero until the selection no longer fits, then just enough to keep the
/// selected card fully visible. Used to map a clicked row back to a card.
pub fn results_offset(selected: usize, inner_height: u16) -> usize {
    let fits = (inner_height / CARD_HEIGHT) as usize;
    if fits == 0 || selected < fits {
        0
    } else {
        selected + 1 - fits
    }
}

pub fn render(app: &App, frame: &mut Frame) {
    let chunks = screen_chunks(frame.area());

    // ── Header ──
    let header_text = format!(" Podshelf   [{} podcasts]", app.results.len());
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, chunks[0]);

    // ── Search bar ──
    let search_style = match app.controls.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let search_label = if app.controls.input_mode == InputMode::Editing {
        " 🔍 Search (Enter to apply, Esc to close): "
    } else {
        " 🔍 Search (/): "
    };
    let search_text = format!("{}{}", search_label, app.controls.search);
    let search_bar = Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(search_style)
            .title(" Search "),
    );
    frame.render_widget(search_bar, chunks[1]);

    // Set cursor position when editing
    if app.controls.input_mode == InputMode::Editing {
        let text_width =
            UnicodeWidthStr::width(search_label) + UnicodeWidthStr::width(app.controls.search.as_str());
        let cursor_x = chunks[1].x + 1 + text_width as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    // ── Genre / sort selectors ──
    let selector_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let genre_value = Paragraph::new(format!(" {}", app.controls.genre.selected_label()))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Genre (Tab) "),
        );
    frame.render_widget(genre_value, selector_chunks[0]);

    let sort_value = Paragraph::new(format!(" {}", app.controls.sort.selected_label()))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Sort (s) "),
        );
    frame.render_widget(sort_value, selector_chunks[1]);

    // ── Results ──
    let shown_info = format!(
        " {} of {} ",
        app.results.len(),
        app.catalog.podcasts.len()
    );
    let results_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Podcasts ")
        .title_bottom(Line::from(shown_info).alignment(Alignment::Right));

    if app.cards.is_empty() {
        let placeholder = Paragraph::new("No podcasts found.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(results_block);
        frame.render_widget(placeholder, chunks[3]);
    } else {
        // Width inside the borders and the highlight symbol.
        let card_width = chunks[3].width.saturating_sub(4);
        let items: Vec<ListItem> = app
            .cards
            .iter()
            .map(|attrs| ListItem::new(preview::card_lines(attrs, card_width)))
            .collect();

        let list_widget = List::new(items)
            .block(results_block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");

        let mut list_state = ListState::default();
        list_state.select(Some(app.list_selected));
        frame.render_stateful_widget(list_widget, chunks[3], &mut list_state);
    }

    // ── Status bar ──
    let status_line = Line::from(vec![
        Span::styled(
            " ↑↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Navigate  "),
        Span::styled(
            "/",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Search  "),
        Span::styled(
            "Tab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Genre  "),
        Span::styled(
            "s",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Sort  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Detail  "),
        Span::styled(
            "?",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Help  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[4]);
}
