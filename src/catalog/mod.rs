//! Pure catalog logic: genre resolution, season lookup, date formatting, and
//! the filter/sort engine. Nothing in here touches the terminal, raises, or
//! mutates the collections it is handed.

pub mod dates;
pub mod genres;
pub mod query;
pub mod seasons;

pub use genres::{GenreSelection, genre_names, parse_selector_label};
pub use query::{FilterCriteria, SortKey, filter_podcasts};
pub use seasons::seasons_for;
