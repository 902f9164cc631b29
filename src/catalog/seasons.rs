use crate::data::{SeasonDetail, SeasonRecord};

/// Detailed seasons for one podcast: the `season_details` of the first record
/// whose id matches, or the empty slice. Callers fall back to the podcast's
/// declared season count when no record exists.
pub fn seasons_for<'a>(podcast_id: &str, seasons: &'a [SeasonRecord]) -> &'a [SeasonDetail] {
    seasons
        .iter()
        .find(|record| record.id == podcast_id)
        .map(|record| record.season_details.as_slice())
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<SeasonRecord> {
        vec![
            SeasonRecord {
                id: "p1".into(),
                season_details: vec![
                    SeasonDetail {
                        title: "Season 1".into(),
                        episodes: 8,
                    },
                    SeasonDetail {
                        title: "Season 2".into(),
                        episodes: 10,
                    },
                ],
            },
            SeasonRecord {
                id: "p2".into(),
                season_details: vec![],
            },
        ]
    }

    #[test]
    fn finds_details_by_podcast_id() {
        let records = records();
        let details = seasons_for("p1", &records);
        assert_eq!(details.len(), 2);
        assert_eq!(details[1].title, "Season 2");
    }

    #[test]
    fn unknown_id_yields_empty_slice() {
        let records = records();
        assert!(seasons_for("nope", &records).is_empty());
        assert!(seasons_for("p1", &[]).is_empty());
    }

    #[test]
    fn record_with_no_details_yields_empty_slice() {
        let records = records();
        assert!(seasons_for("p2", &records).is_empty());
    }
}
