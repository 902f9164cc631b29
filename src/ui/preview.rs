use crate::catalog::dates::format_date;
use crate::catalog::genre_names;
use crate::data::{Genre, Podcast};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Rendered height of one preview card, in terminal rows. Fixed so mouse
/// hit-testing can divide a click row straight into a card index.
pub const CARD_HEIGHT: u16 = 6;

/// The attribute set a preview card is rendered from. Everything arrives
/// pre-resolved as display text: genre ids are already names (carried in
/// serialized form), the date is already formatted. A card render is a pure
/// function of these fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewAttrs {
    pub podcast_id: String,
    pub title: String,
    pub cover: String,
    /// Serialized genre-name list, parsed leniently by [`parse_genres`].
    pub genres: String,
    pub seasons: u32,
    pub updated: String,
}

/// Emitted when a card is activated; carries only the podcast id. The
/// receiver resolves it against the currently rendered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub podcast_id: String,
}

impl PreviewAttrs {
    pub fn from_podcast(podcast: &Podcast, genres: &[Genre]) -> Self {
        let names = genre_names(&podcast.genres, genres);
        PreviewAttrs {
            podcast_id: podcast.id.clone(),
            title: podcast.title.clone(),
            cover: podcast.image.clone(),
            genres: serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string()),
            seasons: podcast.seasons,
            updated: format_date(&podcast.updated),
        }
    }

    pub fn activate(&self) -> SelectionEvent {
        SelectionEvent {
            podcast_id: self.podcast_id.clone(),
        }
    }
}

/// Parse a serialized genre list without ever failing: a JSON array yields
/// its elements stringified, any other JSON value yields a single-element
/// list, and non-JSON input falls back to comma splitting with empty
/// segments dropped.
pub fn parse_genres(raw: &str) -> Vec<String> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Ok(serde_json::Value::String(s)) => vec![s],
        Ok(other) => vec![other.to_string()],
        Err(_) => raw
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

fn seasons_text(count: u32) -> String {
    if count == 1 {
        "1 season".to_string()
    } else {
        format!("{count} seasons")
    }
}

/// Build the card's lines for a given content width. Deterministic: equal
/// attributes and width always produce equal lines.
pub fn card_lines(attrs: &PreviewAttrs, width: u16) -> Vec<Line<'static>> {
    let width = width as usize;
    let genre_tags = parse_genres(&attrs.genres).join(", ");

    vec![
        Line::from(Span::styled(
            truncate_display(&attrs.title, width),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        // Cover URL stands in for the artwork; empty covers keep the row so
        // every card stays CARD_HEIGHT tall.
        Line::from(Span::styled(
            truncate_display(&attrs.cover, width),
            Style::default().fg(Color::Blue),
        )),
        Line::from(Span::styled(
            truncate_display(&genre_tags, width),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            seasons_text(attrs.seasons),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            format!("Updated: {}", attrs.updated),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ]
}

/// Truncate to `max_width` terminal columns, appending "…" when cut. Width
/// aware, so double-width characters never overflow the card.
pub fn truncate_display(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let limit = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > limit {
            break;
        }
        result.push(ch);
        used += w;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs() -> PreviewAttrs {
        PreviewAttrs {
            podcast_id: "5001".into(),
            title: "Midnight Signal".into(),
            cover: "https://example.invalid/cover.jpg".into(),
            genres: r#"["Comedy","News"]"#.into(),
            seasons: 3,
            updated: "November 1, 2024".into(),
        }
    }

    #[test]
    fn parse_genres_handles_arrays_scalars_and_junk() {
        assert_eq!(parse_genres(r#"["Comedy","News"]"#), ["Comedy", "News"]);
        assert_eq!(parse_genres(r#""History""#), ["History"]);
        assert_eq!(parse_genres("42"), ["42"]);
        assert_eq!(parse_genres(r#"[1,"Kids"]"#), ["1", "Kids"]);
        // Not JSON: comma fallback with trimming and empty segments dropped.
        assert_eq!(parse_genres("Comedy, News , ,History"), ["Comedy", "News", "History"]);
        assert_eq!(parse_genres(""), Vec::<String>::new());
        assert_eq!(parse_genres("[]"), Vec::<String>::new());
    }

    #[test]
    fn from_podcast_serializes_resolved_names() {
        let podcast = Podcast {
            id: "p9".into(),
            title: "Counterweight".into(),
            image: String::new(),
            description: String::new(),
            genres: vec![2, 1],
            seasons: 1,
            updated: "2024-03-05T00:00:00.000Z".into(),
            created: None,
            popularity: None,
        };
        let genres = vec![
            Genre {
                id: 1,
                title: "Comedy".into(),
            },
            Genre {
                id: 2,
                title: "News".into(),
            },
        ];

        let attrs = PreviewAttrs::from_podcast(&podcast, &genres);
        assert_eq!(attrs.genres, r#"["News","Comedy"]"#);
        assert_eq!(parse_genres(&attrs.genres), ["News", "Comedy"]);
        assert_eq!(attrs.updated, "March 5, 2024");
    }

    #[test]
    fn activation_carries_the_podcast_id() {
        assert_eq!(attrs().activate().podcast_id, "5001");
    }

    #[test]
    fn card_render_is_deterministic() {
        let a = attrs();
        assert_eq!(card_lines(&a, 40), card_lines(&a, 40));
        assert_eq!(card_lines(&a, 40).len() as u16, CARD_HEIGHT);
    }

    #[test]
    fn card_shows_the_cover_url_or_a_blank_row() {
        let lines = card_lines(&attrs(), 60);
        assert_eq!(lines[1].spans[0].content, "https://example.invalid/cover.jpg");

        let mut coverless = attrs();
        coverless.cover = String::new();
        let lines = card_lines(&coverless, 60);
        assert_eq!(lines[1].spans[0].content, "");
        assert_eq!(lines.len() as u16, CARD_HEIGHT);
    }

    #[test]
    fn seasons_count_pluralizes() {
        assert_eq!(seasons_text(1), "1 season");
        assert_eq!(seasons_text(0), "0 seasons");
        assert_eq!(seasons_text(4), "4 seasons");
    }

    #[test]
    fn truncation_is_width_aware() {
        assert_eq!(truncate_display("short", 10), "short");
        assert_eq!(truncate_display("exactly ten", 11), "exactly ten");
        assert_eq!(truncate_display("much too long title", 8), "much to…");
        // Double-width CJK counts two columns per char.
        assert_eq!(truncate_display("写字楼写字楼", 5), "写字…");
    }
}
