use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{medal::MedalTier, result::PlayerResult};

/// One row of the pre-aggregated score table: the summed raw score over a
/// single (event date, event game, team, medal tier) group.
///
/// By construction `acc_w_score` is always an exact multiple of the tier's
/// weight, since every contributing row carries exactly that weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamEventMedalAggregate {
    pub event_date: NaiveDate,
    pub event_game: String,
    pub team: String,
    pub medal: MedalTier,
    /// Accumulated weighted score over the group.
    pub acc_w_score: u32,
}

/// Groups disaggregated rows into the (event, team, medal) sum table.
///
/// Output rows appear in group first-appearance order; `NotPlayed` groups
/// are kept (with a zero sum) as the participation baseline of their team.
/// An empty input produces an empty table.
#[must_use]
pub fn aggregate(rows: &[PlayerResult]) -> Vec<TeamEventMedalAggregate> {
    let mut grouped: Vec<TeamEventMedalAggregate> = Vec::new();
    let mut index: HashMap<(NaiveDate, &str, &str, MedalTier), usize> = HashMap::new();

    for row in rows {
        let key = (
            row.event_date,
            row.event_game.as_str(),
            row.team.as_str(),
            row.medal,
        );
        match index.get(&key) {
            Some(&at) => grouped[at].acc_w_score += row.score(),
            None => {
                index.insert(key, grouped.len());
                grouped.push(TeamEventMedalAggregate {
                    event_date: row.event_date,
                    event_game: row.event_game.clone(),
                    team: row.team.clone(),
                    medal: row.medal,
                    acc_w_score: row.score(),
                });
            }
        }
    }

    grouped
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
    fn sums_scores_per_group() {
        let rows = [
            row("p1", "A", "reds", 3),
            row("p2", "A", "reds", 3),
            row("p3", "A", "reds", 1),
            row("p4", "A", "blues", 2),
        ];
        let table = aggregate(&rows);
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].medal, MedalTier::Gold);
        assert_eq!(table[0].acc_w_score, 6);
        assert_eq!(table[1].acc_w_score, 1);
        assert_eq!(table[2].team, "blues");
    }

    #[test]
    fn keeps_not_played_groups_with_zero_sum() {
        let rows = [row("p1", "A", "reds", 0), row("p2", "A", "reds", 0)];
        let table = aggregate(&rows);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].medal, MedalTier::NotPlayed);
        assert_eq!(table[0].acc_w_score, 0);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn sum_is_multiple_of_tier_weight() {
        let rows = [
            row("p1", "A", "reds", 2),
            row("p2", "A", "reds", 2),
            row("p3", "A", "reds", 2),
        ];
        let table = aggregate(&rows);
        assert_eq!(table[0].acc_w_score % table[0].medal.weight(), 0);
    }
}
