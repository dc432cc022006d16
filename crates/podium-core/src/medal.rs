use serde::{Deserialize, Serialize};

/// Ordinal medal category mapped from a raw score in `{0, 1, 2, 3}`.
///
/// The ordering is significant and used by every downstream sort:
/// `NotPlayed < Bronze < Silver < Gold`. A `NotPlayed` row is not dropped
/// from the tables; it is the participation baseline for its team.
///
/// # Example
///
/// ```
/// use podium_core::MedalTier;
///
/// let tier = MedalTier::from_score(3).unwrap();
/// assert_eq!(tier, MedalTier::Gold);
/// assert_eq!(tier.weight(), 3);
/// assert!(MedalTier::NotPlayed < MedalTier::Bronze);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum MedalTier {
    /// The player did not score in this event (raw score 0).
    #[display("not_played")]
    NotPlayed,
    /// Raw score 1.
    #[display("bronze")]
    Bronze,
    /// Raw score 2.
    #[display("silver")]
    Silver,
    /// Raw score 3.
    #[display("gold")]
    Gold,
}

/// Error for raw scores outside `{0, 1, 2, 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("raw score {score} is outside the valid range 0..=3")]
pub struct InvalidScore {
    /// The rejected raw score.
    pub score: u8,
}

impl MedalTier {
    /// All tiers in ascending order.
    pub const ALL: [MedalTier; 4] = [
        MedalTier::NotPlayed,
        MedalTier::Bronze,
        MedalTier::Silver,
        MedalTier::Gold,
    ];

    /// Maps a raw score to its medal tier.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidScore`] for scores above 3.
    pub fn from_score(score: u8) -> Result<Self, InvalidScore> {
        match score {
            0 => Ok(MedalTier::NotPlayed),
            1 => Ok(MedalTier::Bronze),
            2 => Ok(MedalTier::Silver),
            3 => Ok(MedalTier::Gold),
            _ => Err(InvalidScore { score }),
        }
    }

    /// Score weight of this tier, equal to the raw score it maps from.
    ///
    /// `NotPlayed` weighs 0, so accumulated scores for its rows are always 0
    /// and any per-medal division by weight resolves to a zero count rather
    /// than a division error.
    #[must_use]
    pub fn weight(self) -> u32 {
        match self {
            MedalTier::NotPlayed => 0,
            MedalTier::Bronze => 1,
            MedalTier::Silver => 2,
            MedalTier::Gold => 3,
        }
    }

    /// Whether this tier represents actual participation in the event.
    #[must_use]
    pub fn played(self) -> bool {
        self != MedalTier::NotPlayed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_round_trips_through_weight() {
        for score in 0..=3 {
            let tier = MedalTier::from_score(score).unwrap();
            assert_eq!(tier.weight(), u32::from(score));
        }
    }

    #[test]
    fn out_of_range_score_is_rejected() {
        assert_eq!(MedalTier::from_score(4), Err(InvalidScore { score: 4 }));
    }

    #[test]
    fn tiers_order_by_value() {
        let mut tiers = vec![
            MedalTier::Gold,
            MedalTier::NotPlayed,
            MedalTier::Silver,
            MedalTier::Bronze,
        ];
        tiers.sort();
        assert_eq!(tiers, MedalTier::ALL);
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&MedalTier::NotPlayed).unwrap();
        assert_eq!(json, "\"not_played\"");
        let tier: MedalTier = serde_json::from_str("\"gold\"").unwrap();
        assert_eq!(tier, MedalTier::Gold);
    }
}
