use crate::ui::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Global", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("    ?         ", Style::default().fg(Color::Yellow)),
            Span::raw("Toggle this help"),
        ]),
        Line::from(vec![
            Span::styled("    q         ", Style::default().fg(Color::Yellow)),
            Span::raw("Quit application"),
        ]),
        Line::from(vec![
            Span::styled("    r         ", Style::default().fg(Color::Yellow)),
            Span::raw("Reload the catalog"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Browse", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("    ↑/k ↓/j   ", Style::default().fg(Color::Yellow)),
            Span::raw("Navigate up/down"),
        ]),
        Line::from(vec![
            Span::styled("    g/G       ", Style::default().fg(Color::Yellow)),
            Span::raw("Jump to first/last podcast"),
        ]),
        Line::from(vec![
            Span::styled("    Enter     ", Style::default().fg(Color::Yellow)),
            Span::raw("Open podcast detail"),
        ]),
        Line::from(vec![
            Span::styled("    Tab/S-Tab ", Style::default().fg(Color::Yellow)),
            Span::raw("Cycle genre filter"),
        ]),
        Line::from(vec![
            Span::styled("    s/S       ", Style::default().fg(Color::Yellow)),
            Span::raw("Cycle sort order (Recently Updated / Newest / Most Popular)"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Search", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("    /         ", Style::default().fg(Color::Yellow)),
            Span::raw("Focus the search bar (filters as you type)"),
        ]),
        Line::from(vec![
            Span::styled("    Enter     ", Style::default().fg(Color::Yellow)),
            Span::raw("Apply and leave the search bar"),
        ]),
        Line::from(vec![
            Span::styled("    Esc       ", Style::default().fg(Color::Yellow)),
            Span::raw("Leave the search bar; clears the query when unfocused"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Detail Overlay", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("    ↑/↓       ", Style::default().fg(Color::Yellow)),
            Span::raw("Scroll content"),
        ]),
        Line::from(vec![
            Span::styled("    PgUp/PgDn ", Style::default().fg(Color::Yellow)),
            Span::raw("Scroll page up/down"),
        ]),
        Line::from(vec![
            Span::styled("    x/Esc/q   ", Style::default().fg(Color::Yellow)),
            Span::raw("Close the overlay"),
        ]),
        Line::from(vec![
            Span::styled("    Enter     ", Style::default().fg(Color::Yellow)),
            Span::raw("Activate the close control"),
        ]),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help — Keybindings ")
                .title_bottom(Line::from(" Press any key to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
