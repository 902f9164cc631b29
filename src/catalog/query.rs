use crate::catalog::dates::parse_when;
use crate::catalog::genres::{GenreSelection, genre_names};
use crate::data::{Genre, Podcast};
use chrono::NaiveDateTime;

/// One of the three total sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recently updated first.
    #[default]
    Recent,
    /// Ascending by created-or-updated date (oldest first), composed as a
    /// descending sort followed by a full reversal. Pinned by test; do not
    /// "simplify" to a plain descending order.
    Newest,
    /// Highest popularity first, missing popularity counted as zero.
    Popular,
}

impl SortKey {
    /// Parse the visible text of a sort selector option. Unrecognized labels
    /// fall back to `Recent`, the default order.
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("recent") {
            SortKey::Recent
        } else if lower.contains("newest") {
            SortKey::Newest
        } else if lower.contains("popular") {
            SortKey::Popular
        } else {
            SortKey::Recent
        }
    }
}

/// A query against the catalog, built fresh on every user interaction and
/// discarded after producing a result.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub query: String,
    pub genre: GenreSelection,
    pub sort: SortKey,
}

fn created_or_updated(podcast: &Podcast) -> Option<NaiveDateTime> {
    let raw = podcast
        .created
        .as_deref()
        .filter(|created| !created.is_empty())
        .unwrap_or(&podcast.updated);
    parse_when(raw)
}

/// Filter and sort the catalog. Operates on a copy of `podcasts`, never
/// mutating the inputs, and never fails: empty or unrecognized criteria
/// fields mean "no filter" and the default `Recent` order.
///
/// The filters compose in order: text match (title or space-joined genre
/// names, case-insensitive substring), then genre (id membership or
/// case-insensitive exact name), then exactly one sort. Sorting is stable, so
/// ties keep their prior relative order.
pub fn filter_podcasts(
    podcasts: &[Podcast],
    genres: &[Genre],
    criteria: &FilterCriteria,
) -> Vec<Podcast> {
    let mut filtered: Vec<Podcast> = podcasts.to_vec();

    let query = criteria.query.trim().to_lowercase();
    if !query.is_empty() {
        filtered.retain(|podcast| {
            let title_match = podcast.title.to_lowercase().contains(&query);
            title_match
                || genre_names(&podcast.genres, genres)
                    .join(" ")
                    .to_lowercase()
                    .contains(&query)
        });
    }

    match &criteria.genre {
        GenreSelection::All => {}
        GenreSelection::Id(id) => filtered.retain(|podcast| podcast.genres.contains(id)),
        GenreSelection::Name(name) => {
            let wanted = name.to_lowercase();
            filtered.retain(|podcast| {
                genre_names(&podcast.genres, genres)
                    .iter()
                    .any(|title| title.to_lowercase() == wanted)
            });
        }
    }

    match criteria.sort {
        SortKey::Recent => {
            // Unparseable dates order last.
            filtered.sort_by(|a, b| parse_when(&b.updated).cmp(&parse_when(&a.updated)));
        }
        SortKey::Newest => {
            filtered.sort_by(|a, b| created_or_updated(b).cmp(&created_or_updated(a)));
            filtered.reverse();
        }
        SortKey::Popular => {
            filtered.sort_by(|a, b| {
                b.popularity
                    .unwrap_or(0.0)
                    .total_cmp(&a.popularity.unwrap_or(0.0))
            });
        }
    }

    filtered
}
