use std::time::{Duration, Instant};

use crate::catalog::{FilterCriteria, SortKey, filter_podcasts, parse_selector_label, seasons_for};
use crate::data::{Catalog, CatalogError, CatalogSource, Genre, Podcast, load_catalog};
use crate::overlay::DetailOverlay;
use crate::ui::preview::{PreviewAttrs, SelectionEvent};

/// Delay between arming a reload and performing it. Fire-once, not
/// cancellable; frames render dimmed while armed.
pub const RELOAD_DELAY: Duration = Duration::from_millis(400);

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// A dropdown-style control: visible option labels and a selected index.
/// Consumers read the selected *label text* and parse it, never an index
/// derived value.
#[derive(Debug, Clone)]
pub struct Selector {
    pub options: Vec<String>,
    pub selected: usize,
}

impl Selector {
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            selected: 0,
        }
    }

    pub fn selected_label(&self) -> &str {
        self.options
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }
}

/// The UI control surface: search input plus the two selectors.
#[derive(Debug, Clone)]
pub struct Controls {
    pub search: String,
    pub input_mode: InputMode,
    pub genre: Selector,
    pub sort: Selector,
}

impl Controls {
    pub fn for_genres(genres: &[Genre]) -> Self {
        let mut genre_options = vec!["All Genres".to_string()];
        genre_options.extend(genres.iter().map(|genre| genre.title.clone()));

        Controls {
            search: String::new(),
            input_mode: InputMode::Normal,
            genre: Selector::new(genre_options),
            sort: Selector::new(vec![
                "Recently Updated".to_string(),
                "Newest".to_string(),
                "Most Popular".to_string(),
            ]),
        }
    }
}

/// Main application state.
pub struct App {
    pub source: CatalogSource,
    pub catalog: Catalog,
    pub should_quit: bool,
    pub show_help: bool,

    pub controls: Controls,

    // Current filter pass output; cards are rebuilt from scratch each pass.
    pub results: Vec<Podcast>,
    pub cards: Vec<PreviewAttrs>,
    pub list_selected: usize,

    pub overlay: DetailOverlay,

    // Armed reload: the instant at which the catalog reloads.
    pub pending_reload: Option<Instant>,

    // Status message
    pub status_msg: String,
}

impl App {
    pub fn new(source: CatalogSource) -> Result<Self, CatalogError> {
        let catalog = load_catalog(&source)?;
        Ok(Self::from_catalog(source, catalog))
    }

    pub fn from_catalog(source: CatalogSource, catalog: Catalog) -> Self {
        tracing::info!(
            podcasts = catalog.podcasts.len(),
            genres = catalog.genres.len(),
            seasons = catalog.seasons.len(),
            source = %source.describe(),
            "catalog loaded"
        );
        let dropped = catalog.unresolved_genre_ids();
        if !dropped.is_empty() {
            tracing::warn!(ids = ?dropped, "genre ids without a catalog entry");
        }

        let controls = Controls::for_genres(&catalog.genres);
        let mut app = Self {
            source,
            catalog,
            should_quit: false,
            show_help: false,
            controls,
            results: Vec::new(),
            cards: Vec::new(),
            list_selected: 0,
            overlay: DetailOverlay::new(),
            pending_reload: None,
            status_msg: String::new(),
        };
        app.apply_filters();
        app
    }

    /// Run a filter pass from the current control values and rebuild the
    /// rendered cards. Called on every keystroke and selector change.
    pub fn apply_filters(&mut self) {
        let query = self.controls.search.trim().to_string();
        let criteria = FilterCriteria {
            query,
            genre: parse_selector_label(self.controls.genre.selected_label()),
            sort: SortKey::from_label(self.controls.sort.selected_label()),
        };

        self.results = filter_podcasts(&self.catalog.podcasts, &self.catalog.genres, &criteria);
        self.cards = self
            .results
            .iter()
            .map(|podcast| PreviewAttrs::from_podcast(podcast, &self.catalog.genres))
            .collect();
        self.list_selected = self
            .list_selected
            .min(self.results.len().saturating_sub(1));

        tracing::debug!(
            query = %criteria.query,
            genre = ?criteria.genre,
            sort = ?criteria.sort,
            shown = self.results.len(),
            "filter pass"
        );
        self.status_msg = format!(
            "{} podcasts for \"{}\"",
            self.results.len(),
            if criteria.query.is_empty() {
                "all"
            } else {
                &criteria.query
            }
        );
    }

    // ── List navigation ──

    pub fn list_next(&mut self) {
        if !self.results.is_empty() && self.list_selected + 1 < self.results.len() {
            self.list_selected += 1;
        }
    }

    pub fn list_prev(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    pub fn list_first(&mut self) {
        self.list_selected = 0;
    }

    pub fn list_last(&mut self) {
        self.list_selected = self.results.len().saturating_sub(1);
    }

    // ── Selection / detail overlay ──

    /// Activate the currently selected card.
    pub fn activate_selected(&mut self) {
        if let Some(attrs) = self.cards.get(self.list_selected) {
            let event = attrs.activate();
            self.handle_selection(&event);
        }
    }

    /// Activate the card at `index`, from a mouse click.
    pub fn activate_card(&mut self, index: usize) {
        if index < self.cards.len() {
            self.list_selected = index;
            self.activate_selected();
        }
    }

    /// Resolve a selection event against the rendered collection and open
    /// the detail overlay on the match. An id that is no longer rendered is
    /// dropped.
    pub fn handle_selection(&mut self, event: &SelectionEvent) {
        let Some(podcast) = self
            .results
            .iter()
            .find(|podcast| podcast.id == event.podcast_id)
            .cloned()
        else {
            tracing::warn!(id = %event.podcast_id, "selection for a podcast not rendered");
            return;
        };

        tracing::debug!(id = %podcast.id, title = %podcast.title, "opening detail");
        let seasons = seasons_for(&podcast.id, &self.catalog.seasons);
        self.overlay.open(&podcast, &self.catalog.genres, seasons);
    }

    // ── Search bar ──

    pub fn start_search(&mut self) {
        self.controls.input_mode = InputMode::Editing;
    }

    pub fn search_push(&mut self, c: char) {
        self.controls.search.push(c);
        self.apply_filters();
    }

    pub fn search_backspace(&mut self) {
        self.controls.search.pop();
        self.apply_filters();
    }

    /// Enter: apply and collapse. The text stays visible for reference.
    pub fn search_submit(&mut self) {
        self.controls.input_mode = InputMode::Normal;
        self.apply_filters();
    }

    /// Collapse without clearing, also used for a click outside the bar.
    pub fn collapse_search(&mut self) {
        self.controls.input_mode = InputMode::Normal;
    }

    /// Esc in normal mode: drop the query entirely.
    pub fn clear_search(&mut self) {
        if !self.controls.search.is_empty() {
            self.controls.search.clear();
            self.apply_filters();
        }
    }

    // ── Selectors ──

    pub fn cycle_genre_next(&mut self) {
        self.controls.genre.select_next();
        self.apply_filters();
    }

    pub fn cycle_genre_prev(&mut self) {
        self.controls.genre.select_prev();
        self.apply_filters();
    }

    pub fn cycle_sort_next(&mut self) {
        self.controls.sort.select_next();
        self.apply_filters();
    }

    pub fn cycle_sort_prev(&mut self) {
        self.controls.sort.select_prev();
        self.apply_filters();
    }

    // ── Help / quit ──

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ── Reload ──

    /// Arm the delayed reload. A second press while armed does nothing; the
    /// timer cannot be cancelled.
    pub fn request_reload(&mut self) {
        if self.pending_reload.is_none() {
            self.pending_reload = Some(Instant::now() + RELOAD_DELAY);
            self.status_msg = "Reloading...".to_string();
            tracing::debug!("reload armed");
        }
    }

    pub fn reload_pending(&self) -> bool {
        self.pending_reload.is_some()
    }

    pub fn reload_due(&self, now: Instant) -> bool {
        self.pending_reload.is_some_and(|at| now >= at)
    }

    /// Called each loop pass; fires the reload once its instant passes.
    pub fn tick(&mut self, now: Instant) {
        if self.reload_due(now) {
            self.perform_reload();
        }
    }

    /// Reload the catalog from its source and reset the whole UI, the
    /// in-terminal equivalent of a page reload. A failed load keeps the
    /// current catalog.
    fn perform_reload(&mut self) {
        self.pending_reload = None;
        match load_catalog(&self.source) {
            Ok(catalog) => {
                tracing::info!(source = %self.source.describe(), "catalog reloaded");
                self.catalog = catalog;
                self.controls = Controls::for_genres(&self.catalog.genres);
                self.overlay.close();
                self.show_help = false;
                self.list_selected = 0;
                self.apply_filters();
            }
            Err(err) => {
                tracing::warn!(error = %err, "reload failed, keeping current catalog");
                self.status_msg = format!("Reload failed: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SeasonDetail, SeasonRecord};

    fn catalog() -> Catalog {
        Catalog {
            podcasts: vec![
                Podcast {
                    id: "a".into(),
                    title: "Foo".into(),
                    image: String::new(),
                    description: "About foo.".into(),
                    genres: vec![1],
                    seasons: 2,
                    updated: "2024-01-01T00:00:00.000Z".into(),
                    created: None,
                    popularity: None,
                },
                Podcast {
                    id: "b".into(),
                    title: "Bar".into(),
                    image: String::new(),
                    description: String::new(),
                    genres: vec![2],
                    seasons: 1,
                    updated: "2024-06-01T00:00:00.000Z".into(),
                    created: None,
                    popularity: Some(9.0),
                },
            ],
            genres: vec![
                Genre {
                    id: 1,
                    title: "Comedy".into(),
                },
                Genre {
                    id: 2,
                    title: "News".into(),
                },
            ],
            seasons: vec![SeasonRecord {
                id: "a".into(),
                season_details: vec![SeasonDetail {
                    title: "Season 1".into(),
                    episodes: 4,
                }],
            }],
        }
    }

    fn app() -> App {
        App::from_catalog(CatalogSource::Builtin, catalog())
    }

    #[test]
    fn initial_pass_renders_all_podcasts_most_recent_first() {
        let app = app();
        let ids: Vec<&str> = app.results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(app.cards.len(), 2);
        assert_eq!(app.controls.genre.selected_label(), "All Genres");
        assert_eq!(app.controls.sort.selected_label(), "Recently Updated");
    }

    #[test]
    fn each_keystroke_refilters_live() {
        let mut app = app();
        app.start_search();
        app.search_push('f');
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.results[0].id, "a");
        app.search_backspace();
        assert_eq!(app.results.len(), 2);
    }

    #[test]
    fn no_match_leaves_zero_cards() {
        let mut app = app();
        app.start_search();
        for c in "zzz".chars() {
            app.search_push(c);
        }
        assert!(app.results.is_empty());
        assert!(app.cards.is_empty());
        assert_eq!(app.list_selected, 0);
    }

    #[test]
    fn submit_collapses_but_keeps_text() {
        let mut app = app();
        app.start_search();
        app.search_push('f');
        app.search_submit();
        assert_eq!(app.controls.input_mode, InputMode::Normal);
        assert_eq!(app.controls.search, "f");
        assert_eq!(app.results.len(), 1);

        app.clear_search();
        assert!(app.controls.search.is_empty());
        assert_eq!(app.results.len(), 2);
    }

    #[test]
    fn genre_selector_cycles_and_refilters() {
        let mut app = app();
        assert_eq!(app.controls.genre.options, ["All Genres", "Comedy", "News"]);

        app.cycle_genre_next();
        assert_eq!(app.controls.genre.selected_label(), "Comedy");
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.results[0].id, "a");

        app.cycle_genre_prev();
        assert_eq!(app.controls.genre.selected_label(), "All Genres");
        assert_eq!(app.results.len(), 2);

        // Wraps past the end back to the first option.
        app.cycle_genre_prev();
        assert_eq!(app.controls.genre.selected_label(), "News");
    }

    #[test]
    fn sort_selector_drives_the_order() {
        let mut app = app();
        app.cycle_sort_next();
        assert_eq!(app.controls.sort.selected_label(), "Newest");
        let ids: Vec<&str> = app.results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);

        app.cycle_sort_next();
        assert_eq!(app.controls.sort.selected_label(), "Most Popular");
        let ids: Vec<&str> = app.results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn selection_opens_overlay_with_resolved_content() {
        let mut app = app();
        app.list_last();
        app.activate_selected();
        let content = app.overlay.content().unwrap();
        assert_eq!(content.title, "Foo");
        assert_eq!(content.seasons_heading, "Seasons (1)");
        assert_eq!(content.season_cards[0].episode_line, "4 episodes");
    }

    #[test]
    fn reopening_replaces_overlay_content() {
        let mut app = app();
        app.activate_card(0);
        assert_eq!(app.overlay.content().unwrap().title, "Bar");
        app.activate_card(1);
        assert_eq!(app.overlay.content().unwrap().title, "Foo");
    }

    #[test]
    fn selection_outside_rendered_results_is_dropped() {
        let mut app = app();
        app.start_search();
        app.search_push('f');
        // "b" is filtered out, so its event resolves to nothing.
        app.handle_selection(&SelectionEvent {
            podcast_id: "b".into(),
        });
        assert!(!app.overlay.is_open());
    }

    #[test]
    fn navigation_clamps_to_result_bounds() {
        let mut app = app();
        app.list_prev();
        assert_eq!(app.list_selected, 0);
        app.list_next();
        assert_eq!(app.list_selected, 1);
        app.list_next();
        assert_eq!(app.list_selected, 1);
        app.list_first();
        assert_eq!(app.list_selected, 0);
        app.list_last();
        assert_eq!(app.list_selected, 1);
    }

    #[test]
    fn reload_arms_once_and_fires_after_the_delay() {
        let mut app = app();
        app.start_search();
        app.search_push('f');
        app.activate_card(0);

        app.request_reload();
        let armed = app.pending_reload.unwrap();
        app.request_reload();
        assert_eq!(app.pending_reload.unwrap(), armed);

        assert!(!app.reload_due(armed - Duration::from_millis(1)));
        assert!(app.reload_due(armed));

        app.tick(armed + Duration::from_millis(1));
        // Reload resets the whole UI from the builtin source.
        assert!(app.pending_reload.is_none());
        assert!(app.controls.search.is_empty());
        assert!(!app.overlay.is_open());
        assert!(!app.results.is_empty());
    }
}
