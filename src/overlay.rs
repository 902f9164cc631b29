//! Detail overlay state machine.
//!
//! The overlay is the only piece of UI state mutated from more than one
//! place, so all transitions go through [`DetailOverlay::open`] and
//! [`DetailOverlay::close`]. While open it holds the background list's
//! navigation keys locked; the lock is a plain bool so opening on top of an
//! already-open overlay leaves it simply "locked".

use crate::catalog::dates::format_date;
use crate::catalog::genre_names;
use crate::data::{Genre, Podcast, SeasonDetail};

/// Everything the detail panel renders, resolved up front so the draw pass
/// stays lookup-free.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailContent {
    pub title: String,
    pub image: String,
    pub description: String,
    pub genre_tags: Vec<String>,
    pub updated_line: String,
    pub seasons_heading: String,
    pub season_cards: Vec<SeasonCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonCard {
    pub title: String,
    pub episode_line: String,
}

fn episode_line(count: u32) -> String {
    if count == 1 {
        "1 episode".to_string()
    } else {
        format!("{count} episodes")
    }
}

impl DetailContent {
    pub fn build(podcast: &Podcast, genres: &[Genre], seasons: &[SeasonDetail]) -> Self {
        let description = if podcast.description.is_empty() {
            "No description available.".to_string()
        } else {
            podcast.description.clone()
        };

        // Heading count prefers the per-season records; the declared total is
        // only a fallback for podcasts without detail data.
        let season_count = if seasons.is_empty() {
            podcast.seasons as usize
        } else {
            seasons.len()
        };

        DetailContent {
            title: podcast.title.clone(),
            image: podcast.image.clone(),
            description,
            genre_tags: genre_names(&podcast.genres, genres),
            updated_line: format!("Last updated: {}", format_date(&podcast.updated)),
            seasons_heading: format!("Seasons ({season_count})"),
            season_cards: seasons
                .iter()
                .map(|season| SeasonCard {
                    title: season.title.clone(),
                    episode_line: episode_line(season.episodes),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum OverlayState {
    #[default]
    Closed,
    Open(DetailContent),
}

#[derive(Debug, Clone, Default)]
pub struct DetailOverlay {
    state: OverlayState,
    pub scroll_locked: bool,
    pub scroll: u16,
    pub close_focused: bool,
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open on `podcast`, replacing whatever was shown before. Scroll resets
    /// and focus lands on the close control.
    pub fn open(&mut self, podcast: &Podcast, genres: &[Genre], seasons: &[SeasonDetail]) {
        self.state = OverlayState::Open(DetailContent::build(podcast, genres, seasons));
        self.scroll_locked = true;
        self.scroll = 0;
        self.close_focused = true;
    }

    /// Idempotent: closing a closed overlay is a no-op.
    pub fn close(&mut self) {
        self.state = OverlayState::Closed;
        self.scroll_locked = false;
        self.scroll = 0;
        self.close_focused = false;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Open(_))
    }

    pub fn content(&self) -> Option<&DetailContent> {
        match &self.state {
            OverlayState::Open(content) => Some(content),
            OverlayState::Closed => None,
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn podcast(title: &str, description: &str, declared_seasons: u32) -> Podcast {
        Podcast {
            id: "p1".into(),
            title: title.into(),
            image: "https://example.invalid/cover.jpg".into(),
            description: description.into(),
            genres: vec![1, 2],
            seasons: declared_seasons,
            updated: "2024-11-01T07:00:00.000Z".into(),
            created: None,
            popularity: None,
        }
    }

    fn genres() -> Vec<Genre> {
        vec![
            Genre {
                id: 1,
                title: "Comedy".into(),
            },
            Genre {
                id: 2,
                title: "News".into(),
            },
        ]
    }

    fn season(title: &str, episodes: u32) -> SeasonDetail {
        SeasonDetail {
            title: title.into(),
            episodes,
        }
    }

    #[test]
    fn open_builds_resolved_content() {
        let mut overlay = DetailOverlay::new();
        overlay.open(
            &podcast("Midnight Signal", "Late night radio.", 2),
            &genres(),
            &[season("Season 1", 1), season("Season 2", 10)],
        );

        let content = overlay.content().unwrap();
        assert_eq!(content.title, "Midnight Signal");
        assert_eq!(content.genre_tags, ["Comedy", "News"]);
        assert_eq!(content.updated_line, "Last updated: November 1, 2024");
        assert_eq!(content.seasons_heading, "Seasons (2)");
        assert_eq!(content.season_cards[0].episode_line, "1 episode");
        assert_eq!(content.season_cards[1].episode_line, "10 episodes");
        assert!(overlay.is_open());
        assert!(overlay.close_focused);
    }

    #[test]
    fn empty_description_gets_placeholder() {
        let content = DetailContent::build(&podcast("Silent", "", 1), &genres(), &[]);
        assert_eq!(content.description, "No description available.");
    }

    #[test]
    fn heading_falls_back_to_declared_count_without_detail_records() {
        let content = DetailContent::build(&podcast("Sparse", "x", 9), &genres(), &[]);
        assert_eq!(content.seasons_heading, "Seasons (9)");
        assert!(content.season_cards.is_empty());
    }

    #[test]
    fn zero_episodes_pluralizes() {
        assert_eq!(episode_line(0), "0 episodes");
        assert_eq!(episode_line(1), "1 episode");
        assert_eq!(episode_line(2), "2 episodes");
    }

    #[test]
    fn close_is_idempotent_and_open_twice_replaces() {
        let mut overlay = DetailOverlay::new();
        overlay.close();
        assert!(!overlay.is_open());
        assert!(!overlay.scroll_locked);

        overlay.open(&podcast("First", "a", 1), &genres(), &[]);
        overlay.scroll_down(7);
        overlay.open(&podcast("Second", "b", 1), &genres(), &[]);

        let content = overlay.content().unwrap();
        assert_eq!(content.title, "Second");
        assert_eq!(overlay.scroll, 0);
        assert!(overlay.scroll_locked);

        overlay.close();
        overlay.close();
        assert!(overlay.content().is_none());
        assert!(!overlay.scroll_locked);
    }

    #[test]
    fn scroll_lock_is_a_plain_bool_across_reopens() {
        let mut overlay = DetailOverlay::new();
        overlay.open(&podcast("A", "a", 1), &genres(), &[]);
        overlay.open(&podcast("B", "b", 1), &genres(), &[]);
        assert!(overlay.scroll_locked);
        overlay.close();
        assert!(!overlay.scroll_locked);
    }

    #[test]
    fn scroll_saturates_at_zero() {
        let mut overlay = DetailOverlay::new();
        overlay.open(&podcast("A", "a", 1), &genres(), &[]);
        overlay.scroll_up(3);
        assert_eq!(overlay.scroll, 0);
        overlay.scroll_down(2);
        overlay.scroll_up(5);
        assert_eq!(overlay.scroll, 0);
    }
}
