use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One show in the catalog. Everything except `id` and `title` is optional in
/// the source data and defaults to an empty/absent value.
#[derive(Debug, Clone, Deserialize)]
pub struct Podcast {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genres: Vec<u32>,
    #[serde(default)]
    pub seasons: u32,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

/// A named category referenced by podcasts via integer id.
#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub title: String,
}

/// Detailed per-season breakdown for one podcast. Shows without a record fall
/// back to their declared `seasons` count.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonRecord {
    pub id: String,
    #[serde(default, alias = "seasonDetails")]
    pub season_details: Vec<SeasonDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonDetail {
    pub title: String,
    #[serde(default)]
    pub episodes: u32,
}

/// The three read-only collections, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub podcasts: Vec<Podcast>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub seasons: Vec<SeasonRecord>,
}

impl Catalog {
    /// Genre ids referenced by podcasts that do not resolve against the genre
    /// table. Display code drops these silently; the caller may want to log
    /// them once at startup.
    pub fn unresolved_genre_ids(&self) -> Vec<u32> {
        let mut missing: Vec<u32> = self
            .podcasts
            .iter()
            .flat_map(|p| p.genres.iter().copied())
            .filter(|id| !self.genres.iter().any(|g| g.id == *id))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }
}

/// Where the catalog came from. Kept around so a reload re-reads the same
/// source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Builtin,
}

impl CatalogSource {
    /// Resolve the source for this run: an explicit `--data` path wins, then
    /// `./catalog.json` if present, then the compiled-in sample.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        if let Some(path) = explicit {
            return CatalogSource::File(path);
        }
        let local = Path::new("catalog.json");
        if local.exists() {
            CatalogSource::File(local.to_path_buf())
        } else {
            CatalogSource::Builtin
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Builtin => "built-in sample catalog".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("bundled sample catalog is malformed: {0}")]
    Builtin(#[source] serde_json::Error),
}

const SAMPLE_CATALOG: &str = include_str!("../data/catalog.json");

/// Load the catalog from its source. This is the only fallible step of
/// startup; once loaded the collections never change (a reload constructs a
/// fresh `Catalog` from the same source).
pub fn load_catalog(source: &CatalogSource) -> Result<Catalog, CatalogError> {
    match source {
        CatalogSource::File(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.clone(),
                source,
            })
        }
        CatalogSource::Builtin => {
            serde_json::from_str(SAMPLE_CATALOG).map_err(CatalogError::Builtin)
        }
    }
}
