use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use podium_core::PlayerResult;
use serde::{Deserialize, Serialize};

/// One clustering input row: a player's aggregate result over one event
/// day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerFeature {
    pub event_date: NaiveDate,
    pub player_id: String,
    pub team: String,
    /// Sum of the player's raw scores across that day's events.
    pub aggregate_score: f64,
    /// Events the player scored in, over the distinct events held that day.
    pub participation_fraction: f64,
}

/// Builds one [`PlayerFeature`] row per (event date, player, team) from
/// disaggregated rows, in group first-appearance order.
///
/// The participation fraction divides by the number of distinct events
/// observed on the row's date; a date with no events cannot occur (every
/// row names its event), so the divisor is always positive.
#[must_use]
pub fn player_features(rows: &[PlayerResult]) -> Vec<PlayerFeature> {
    let mut events_per_day: HashMap<NaiveDate, HashSet<&str>> = HashMap::new();
    for row in rows {
        events_per_day
            .entry(row.event_date)
            .or_default()
            .insert(&row.event_game);
    }

    let mut features: Vec<PlayerFeature> = Vec::new();
    let mut played: Vec<usize> = Vec::new();
    let mut index: HashMap<(NaiveDate, &str, &str), usize> = HashMap::new();
    for row in rows {
        let key = (row.event_date, row.player_id.as_str(), row.team.as_str());
        let at = match index.get(&key) {
            Some(&at) => at,
            None => {
                index.insert(key, features.len());
                played.push(0);
                features.push(PlayerFeature {
                    event_date: row.event_date,
                    player_id: row.player_id.clone(),
                    team: row.team.clone(),
                    aggregate_score: 0.0,
                    participation_fraction: 0.0,
                });
                features.len() - 1
            }
        };
        features[at].aggregate_score += f64::from(row.score());
        if row.medal.played() {
            played[at] += 1;
        }
    }

    for (feature, played) in features.iter_mut().zip(played) {
        let day_events = events_per_day
            .get(&feature.event_date)
            .map_or(0, HashSet::len);
        if day_events > 0 {
            #[expect(clippy::cast_precision_loss)]
            let fraction = played as f64 / day_events as f64;
            feature.participation_fraction = fraction;
        }
    }

    features
}

/// Extracts the 2-D matrix `{aggregate_score, participation_fraction}`
/// fitted by the clustering engine.
#[must_use]
pub fn feature_matrix(features: &[PlayerFeature]) -> Vec<[f64; 2]> {
    features
        .iter()
        .map(|f| [f.aggregate_score, f.participation_fraction])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn row(player: &str, game: &str, team: &str, score: u8) -> PlayerResult {
        PlayerResult::from_raw_score(player, date(), game, team, score).unwrap()
    }

    #[test]
    fn aggregates_scores_per_player_day() {
        let rows = [
            row("p1", "A", "reds", 3),
            row("p1", "B", "reds", 2),
            row("p2", "A", "reds", 0),
            row("p2", "B", "reds", 1),
        ];
        let features = player_features(&rows);
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].player_id, "p1");
        assert_eq!(features[0].aggregate_score, 5.0);
        assert_eq!(features[0].participation_fraction, 1.0);
        assert_eq!(features[1].aggregate_score, 1.0);
        assert_eq!(features[1].participation_fraction, 0.5);
    }

    #[test]
    fn participation_counts_distinct_events_per_day() {
        let other_day = NaiveDate::from_ymd_opt(2024, 7, 2).unwrap();
        let mut rows = vec![
            row("p1", "A", "reds", 1),
            row("p1", "B", "reds", 0),
            row("p1", "C", "reds", 0),
        ];
        rows.push(
            PlayerResult::from_raw_score("p1", other_day, "A", "reds", 2).unwrap(),
        );
        let features = player_features(&rows);
        assert_eq!(features.len(), 2);
        // Three events on day one, one played.
        assert!((features[0].participation_fraction - 1.0 / 3.0).abs() < 1e-12);
        // A single event on day two.
        assert_eq!(features[1].participation_fraction, 1.0);
    }

    #[test]
    fn matrix_pairs_score_and_participation() {
        let rows = [row("p1", "A", "reds", 3), row("p2", "A", "reds", 0)];
        let matrix = feature_matrix(&player_features(&rows));
        assert_eq!(matrix, vec![[3.0, 1.0], [0.0, 0.0]]);
    }

    #[test]
    fn empty_rows_build_no_features() {
        assert!(player_features(&[]).is_empty());
    }
}
