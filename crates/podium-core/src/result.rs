use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::medal::{InvalidScore, MedalTier};

/// One immutable per-player, per-event contest result.
///
/// Many of these compose a team's disaggregated table; the medal tier is
/// derived from the raw score at construction and the raw score is
/// recoverable as [`MedalTier::weight`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerResult {
    pub player_id: String,
    pub event_date: NaiveDate,
    pub event_game: String,
    pub team: String,
    pub medal: MedalTier,
}

impl PlayerResult {
    /// Builds a result row from a raw score in `{0, 1, 2, 3}`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidScore`] for scores above 3.
    pub fn from_raw_score(
        player_id: impl Into<String>,
        event_date: NaiveDate,
        event_game: impl Into<String>,
        team: impl Into<String>,
        score: u8,
    ) -> Result<Self, InvalidScore> {
        Ok(Self {
            player_id: player_id.into(),
            event_date,
            event_game: event_game.into(),
            team: team.into(),
            medal: MedalTier::from_score(score)?,
        })
    }

    /// Raw score of this row.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.medal.weight()
    }
}

/// A named team with its ordered player roster, fixed for the session.
///
/// Player order is first-appearance order; duplicates collapse to the first
/// occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    name: String,
    players: Vec<String>,
}

impl Team {
    #[must_use]
    pub fn new(name: impl Into<String>, players: impl IntoIterator<Item = String>) -> Self {
        let mut seen = Vec::new();
        for player in players {
            if !seen.contains(&player) {
                seen.push(player);
            }
        }
        Self {
            name: name.into(),
            players: seen,
        }
    }

    /// Collects the roster of `name` from disaggregated rows, in player
    /// first-appearance order.
    #[must_use]
    pub fn from_rows(name: &str, rows: &[PlayerResult]) -> Self {
        Self::new(
            name,
            rows.iter()
                .filter(|row| row.team == name)
                .map(|row| row.player_id.clone()),
        )
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Number of players on the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
