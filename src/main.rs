mod app;
mod catalog;
mod data;
mod logging;
mod overlay;
mod ui;

use app::{App, InputMode};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use data::CatalogSource;
use ratatui::layout::{Margin, Rect, Size};
use std::path::PathBuf;
use std::time::Instant;
use ui::preview::CARD_HEIGHT;

/// TUI browser for a podcast catalog: search, genre filters, sorting, and
/// per-show season detail
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a catalog JSON file (defaults to ./catalog.json if present,
    /// else a bundled sample catalog)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Log filter, e.g. "podshelf=trace" (overrides RUST_LOG)
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The UI still works without file logging.
    if let Err(e) = logging::init(cli.log_filter.as_deref()) {
        eprintln!("Warning: file logging disabled: {e}");
    }

    let source = CatalogSource::resolve(cli.data);
    let mut app = App::new(source)?;

    // Init terminal
    let mut terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if event::poll(std::time::Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    handle_mouse(app, mouse, size);
                }
                _ => {}
            }
        }

        // Fires the armed reload once its delay has passed.
        app.tick(Instant::now());
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Help toggle (global, outside of text entry and the overlay)
    if key.code == KeyCode::Char('?')
        && app.controls.input_mode == InputMode::Normal
        && !app.overlay.is_open()
    {
        app.toggle_help();
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.controls.input_mode == InputMode::Editing {
        handle_search_input(app, key);
        return;
    }

    // While the overlay is open it swallows all list keys.
    if app.overlay.is_open() {
        handle_overlay_key(app, key);
        return;
    }

    handle_browse_key(app, key);
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.search_submit(),
        KeyCode::Esc => app.collapse_search(),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.search_push(c),
        _ => {}
    }
}

fn handle_overlay_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('x') => app.overlay.close(),
        KeyCode::Enter => {
            if app.overlay.close_focused {
                app.overlay.close();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => app.overlay.scroll_down(1),
        KeyCode::Up | KeyCode::Char('k') => app.overlay.scroll_up(1),
        KeyCode::PageDown => app.overlay.scroll_down(20),
        KeyCode::PageUp => app.overlay.scroll_up(20),
        _ => {}
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Down | KeyCode::Char('j') => app.list_next(),
        KeyCode::Up | KeyCode::Char('k') => app.list_prev(),
        KeyCode::Char('g') => app.list_first(),
        KeyCode::Char('G') => app.list_last(),
        KeyCode::Tab => app.cycle_genre_next(),
        KeyCode::BackTab => app.cycle_genre_prev(),
        KeyCode::Char('s') => app.cycle_sort_next(),
        KeyCode::Char('S') => app.cycle_sort_prev(),
        KeyCode::Char('r') => app.request_reload(),
        KeyCode::Enter => app.activate_selected(),
        KeyCode::Esc => app.clear_search(),
        _ => {}
    }
}

// Helper: check if (col, row) is inside a Rect
fn hit(rect: Rect, col: u16, row: u16) -> bool {
    rect.width > 0
        && rect.height > 0
        && col >= rect.x
        && col < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, size: Size) {
    let screen = Rect::new(0, 0, size.width, size.height);
    let (col, row) = (mouse.column, mouse.row);

    // Front to back: help popup, detail overlay, then the browse screen.
    if app.show_help {
        if matches!(mouse.kind, MouseEventKind::Down(_)) {
            app.show_help = false;
        }
        return;
    }

    if app.overlay.is_open() {
        let panel = ui::panel_area(screen);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Close control, or anywhere on the backdrop.
                if hit(ui::close_control_area(panel), col, row) || !hit(panel, col, row) {
                    app.overlay.close();
                }
            }
            MouseEventKind::ScrollDown => app.overlay.scroll_down(3),
            MouseEventKind::ScrollUp => app.overlay.scroll_up(3),
            _ => {}
        }
        return;
    }

    let chunks = ui::screen_chunks(screen);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // A click outside the bar leaves text entry.
            if app.controls.input_mode == InputMode::Editing && !hit(chunks[1], col, row) {
                app.collapse_search();
            }

            if hit(chunks[0], col, row) {
                // Clicking the header arms a reload, like 'r'.
                app.request_reload();
            } else if hit(chunks[1], col, row) {
                app.start_search();
            } else if hit(chunks[2], col, row) {
                if col < chunks[2].x + chunks[2].width / 2 {
                    app.cycle_genre_next();
                } else {
                    app.cycle_sort_next();
                }
            } else if hit(chunks[3], col, row) {
                let inner = chunks[3].inner(Margin::new(1, 1));
                if hit(inner, col, row) {
                    let offset = ui::results_offset(app.list_selected, inner.height);
                    let index = offset + ((row - inner.y) / CARD_HEIGHT) as usize;
                    app.activate_card(index);
                }
            }
        }
        MouseEventKind::ScrollDown => app.list_next(),
        MouseEventKind::ScrollUp => app.list_prev(),
        _ => {}
    }
}
