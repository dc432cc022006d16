use std::collections::HashMap;

use chrono::NaiveDate;
use podium_core::{FirstSeen, MedalTier, PlayerResult, Team, TeamEventMedalAggregate};
use serde::{Deserialize, Serialize};

/// A [`TeamEventMedalAggregate`] row annotated with the seven derived
/// metric columns.
///
/// Invariant: the enriched table holds exactly one row per observed
/// (event, team, medal tier) triple, `not_played` included as the team's
/// participation baseline; enrichment never drops or duplicates rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedAggregate {
    pub event_date: NaiveDate,
    pub event_game: String,
    pub team: String,
    pub medal: MedalTier,
    /// Accumulated weighted score over the (event, team, medal) group.
    pub acc_w_score: u32,
    /// Number of medals of this tier: `acc_w_score / weight(medal)`, 0 for
    /// `not_played`.
    pub medal_abs_frequence: u32,
    /// Team share of all active players, in percent.
    pub team_relative_size: f64,
    /// Share of the team's players that scored in this event, in percent.
    pub team_participation_ratio: f64,
    /// Medal count relative to team size, in percent (2 decimals).
    pub medal_rel_frequence: f64,
    /// `medal_rel_frequence * (acc_w_score / medal_abs_frequence)`; 0 when
    /// the medal count is 0.
    pub perform_score: f64,
    /// Sum of `acc_w_score` over all tiers of this (event, team) group.
    pub acc_w_score_total: u32,
    /// Sum of `perform_score` over all tiers of this (event, team) group.
    pub perform_score_total: f64,
}

impl EnrichedAggregate {
    /// Derivation step 1: lifts a base aggregate row, computing the absolute
    /// medal count and zeroing the later columns.
    fn from_base(base: &TeamEventMedalAggregate) -> Self {
        let weight = base.medal.weight();
        let medal_abs_frequence = if weight == 0 {
            0
        } else {
            base.acc_w_score / weight
        };
        Self {
            event_date: base.event_date,
            event_game: base.event_game.clone(),
            team: base.team.clone(),
            medal: base.medal,
            acc_w_score: base.acc_w_score,
            medal_abs_frequence,
            team_relative_size: 0.0,
            team_participation_ratio: 0.0,
            medal_rel_frequence: 0.0,
            perform_score: 0.0,
            acc_w_score_total: 0,
            perform_score_total: 0.0,
        }
    }
}

/// Errors from table enrichment.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PipelineError {
    /// A join key present in one table is absent from its counterpart. This
    /// indicates inconsistent upstream state and is not recoverable here.
    #[display("team '{team}' appears in the score tables but not in the team list")]
    SchemaMismatch { team: String },
    /// The active-flag list is not parallel to `teams[1..]`.
    #[display("expected {expected} active flags for {teams} teams, got {flags}")]
    ActiveFlagsLength {
        teams: usize,
        expected: usize,
        flags: usize,
    },
}

/// Runs the full enrichment over the pre-aggregated score table.
///
/// `active_rest` is parallel to `teams[1..]`; the first team is always part
/// of the session. A team also counts as active only while its roster is
/// non-empty. If either input table is empty the pipeline is a no-op: base
/// rows are returned with every derived column at zero, and the caller must
/// check for that before rendering.
///
/// The output preserves the input row count and orders rows canonically:
/// events and teams by first appearance in the disaggregated table, medals
/// by tier.
///
/// # Errors
///
/// [`PipelineError::SchemaMismatch`] when a team referenced by either table
/// is missing from `teams`; [`PipelineError::ActiveFlagsLength`] when the
/// flag list is not parallel to `teams[1..]`.
pub fn enrich(
    aggregated: &[TeamEventMedalAggregate],
    disaggregated: &[PlayerResult],
    teams: &[Team],
    active_rest: &[bool],
) -> Result<Vec<EnrichedAggregate>, PipelineError> {
    if aggregated.is_empty() || disaggregated.is_empty() {
        return Ok(aggregated.iter().map(EnrichedAggregate::from_base).collect());
    }
    let session = Session::new(disaggregated, teams, active_rest)?;
    session.check_aggregate_teams(aggregated)?;

    let rows = aggregated.iter().map(EnrichedAggregate::from_base).collect();
    let rows = session.sorted_canonically(rows);
    let rows = session.with_team_relative_size(rows);
    let rows = session.with_participation_ratio(rows, disaggregated);
    let rows = session.with_medal_rel_frequence(rows);
    let rows = with_perform_score(rows);
    Ok(with_totals(rows))
}

/// Percentage of `part` in `total`, rounded to 2 decimals; a zero
/// denominator resolves to 0 rather than an undefined value.
fn ratio_pct(total: usize, part: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[expect(clippy::cast_precision_loss)]
    let pct = 100.0 * part as f64 / total as f64;
    round2(pct)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Session-fixed context shared by the derivation steps: canonical
/// orderings, active rosters, and player counts.
struct Session {
    event_order: FirstSeen<(NaiveDate, String)>,
    team_order: FirstSeen<String>,
    /// Roster size per team name (all listed teams).
    roster_sizes: HashMap<String, usize>,
    /// Teams counted into the session-wide player total.
    active: HashMap<String, bool>,
    total_active_players: usize,
}

impl Session {
    fn new(
        disaggregated: &[PlayerResult],
        teams: &[Team],
        active_rest: &[bool],
    ) -> Result<Self, PipelineError> {
        if active_rest.len() + 1 != teams.len().max(1) {
            return Err(PipelineError::ActiveFlagsLength {
                teams: teams.len(),
                expected: teams.len().saturating_sub(1),
                flags: active_rest.len(),
            });
        }

        let mut roster_sizes = HashMap::new();
        let mut active = HashMap::new();
        let mut total_active_players = 0;
        for (i, team) in teams.iter().enumerate() {
            let is_active = (i == 0 || active_rest[i - 1]) && !team.is_empty();
            roster_sizes.insert(team.name().to_owned(), team.len());
            active.insert(team.name().to_owned(), is_active);
            if is_active {
                total_active_players += team.len();
            }
        }

        for row in disaggregated {
            if !roster_sizes.contains_key(row.team.as_str()) {
                return Err(PipelineError::SchemaMismatch {
                    team: row.team.clone(),
                });
            }
        }

        Ok(Self {
            event_order: disaggregated
                .iter()
                .map(|row| (row.event_date, row.event_game.clone()))
                .collect(),
            team_order: disaggregated.iter().map(|row| row.team.clone()).collect(),
            roster_sizes,
            active,
            total_active_players,
        })
    }

    fn check_aggregate_teams(
        &self,
        aggregated: &[TeamEventMedalAggregate],
    ) -> Result<(), PipelineError> {
        for row in aggregated {
            if !self.roster_sizes.contains_key(row.team.as_str()) {
                return Err(PipelineError::SchemaMismatch {
                    team: row.team.clone(),
                });
            }
        }
        Ok(())
    }

    /// Derivation step 2: stable sort by (event, team, medal) under the
    /// canonical orderings. Values unseen in the disaggregated table sort
    /// last.
    fn sorted_canonically(&self, mut rows: Vec<EnrichedAggregate>) -> Vec<EnrichedAggregate> {
        rows.sort_by_key(|row| {
            (
                self.event_order
                    .rank(&(row.event_date, row.event_game.clone()))
                    .unwrap_or(usize::MAX),
                self.team_order.rank(&row.team).unwrap_or(usize::MAX),
                row.medal,
            )
        });
        rows
    }

    /// Derivation step 3: team size relative to all active players.
    fn with_team_relative_size(&self, rows: Vec<EnrichedAggregate>) -> Vec<EnrichedAggregate> {
        rows.into_iter()
            .map(|mut row| {
                let counted = self.active.get(row.team.as_str()).copied().unwrap_or(false);
                let size = self.roster_sizes.get(row.team.as_str()).copied();
                row.team_relative_size = match (counted, size) {
                    (true, Some(size)) => ratio_pct(self.total_active_players, size),
                    _ => 0.0,
                };
                row
            })
            .collect()
    }

    /// Derivation step 4: per (team, event) share of roster players that
    /// scored, from the disaggregated rows.
    fn with_participation_ratio(
        &self,
        rows: Vec<EnrichedAggregate>,
        disaggregated: &[PlayerResult],
    ) -> Vec<EnrichedAggregate> {
        let mut played: HashMap<(NaiveDate, &str, &str), usize> = HashMap::new();
        for row in disaggregated {
            if row.medal.played() {
                *played
                    .entry((row.event_date, row.event_game.as_str(), row.team.as_str()))
                    .or_insert(0) += 1;
            }
        }

        rows.into_iter()
            .map(|mut row| {
                let participants = played
                    .get(&(row.event_date, row.event_game.as_str(), row.team.as_str()))
                    .copied()
                    .unwrap_or(0);
                let roster = self.roster_sizes.get(row.team.as_str()).copied().unwrap_or(0);
                row.team_participation_ratio = ratio_pct(roster, participants);
                row
            })
            .collect()
    }

    /// Derivation step 5: medal count relative to team size.
    fn with_medal_rel_frequence(&self, rows: Vec<EnrichedAggregate>) -> Vec<EnrichedAggregate> {
        rows.into_iter()
            .map(|mut row| {
                let roster = self.roster_sizes.get(row.team.as_str()).copied().unwrap_or(0);
                row.medal_rel_frequence = ratio_pct(roster, row.medal_abs_frequence as usize);
                row
            })
            .collect()
    }
}

/// Derivation step 6: frequency-weighted performance score. The
/// score-per-medal ratio resolves to 0 when the medal count is 0, so
/// `not_played` rows always contribute 0.
fn with_perform_score(rows: Vec<EnrichedAggregate>) -> Vec<EnrichedAggregate> {
    rows.into_iter()
        .map(|mut row| {
            row.perform_score = if row.medal_abs_frequence == 0 {
                0.0
            } else {
                row.medal_rel_frequence
                    * (f64::from(row.acc_w_score) / f64::from(row.medal_abs_frequence))
            };
            row
        })
        .collect()
}

/// Derivation step 7: per-(event, team) sums of both scores, broadcast back
/// onto every tier row of the group.
fn with_totals(rows: Vec<EnrichedAggregate>) -> Vec<EnrichedAggregate> {
    let mut totals: HashMap<(NaiveDate, &str, &str), (u32, f64)> = HashMap::new();
    for row in &rows {
        let entry = totals
            .entry((row.event_date, row.event_game.as_str(), row.team.as_str()))
            .or_insert((0, 0.0));
        entry.0 += row.acc_w_score;
        entry.1 += row.perform_score;
    }
    let totals: HashMap<(NaiveDate, String, String), (u32, f64)> = totals
        .into_iter()
        .map(|((date, game, team), sums)| ((date, game.to_owned(), team.to_owned()), sums))
        .collect();

    rows.into_iter()
        .map(|mut row| {
            if let Some(&(acc, perform)) =
                totals.get(&(row.event_date, row.event_game.clone(), row.team.clone()))
            {
                row.acc_w_score_total = acc;
                row.perform_score_total = perform;
            }
            row
        })
        .collect()
}
