use crate::data::Genre;
use regex::Regex;
use std::sync::LazyLock;

/// What the genre selector currently means, parsed from its visible label.
///
/// The selector's displayed text is the source of truth for filtering, not
/// an index or a hidden value. `parse_selector_label` is the one place that
/// text is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreSelection {
    #[default]
    All,
    Id(u32),
    Name(String),
}

static GENRE_ID_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)genre\s*(\d+)").expect("genre label pattern"));

/// Map genre ids to their display titles, preserving input order and silently
/// dropping ids with no match.
pub fn genre_names(genre_ids: &[u32], genres: &[Genre]) -> Vec<String> {
    genre_ids
        .iter()
        .filter_map(|id| genres.iter().find(|g| g.id == *id))
        .map(|g| g.title.clone())
        .collect()
}

/// Parse the visible text of a genre selector option into a filter selection.
///
/// An empty label or any label containing "all" (case-insensitive substring)
/// means no genre filter. A label containing "genre" followed by digits
/// (optional whitespace between, case-insensitive) selects that genre id.
/// Anything else filters by the trimmed label as a genre name.
pub fn parse_selector_label(label: &str) -> GenreSelection {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return GenreSelection::All;
    }
    if trimmed.to_lowercase().contains("all") {
        return GenreSelection::All;
    }
    if let Some(caps) = GENRE_ID_LABEL.captures(trimmed) {
        // Digits too large for a genre id fall through to a name filter
        // rather than failing.
        if let Ok(id) = caps[1].parse::<u32>() {
            return GenreSelection::Id(id);
        }
    }
    GenreSelection::Name(trimmed.to_string())
}
