//! Metrics derivation and winner selection
//!
//! This crate turns the pre-aggregated (event, team, medal) score table into
//! the fully annotated [`pipeline::EnrichedAggregate`] table consumed by the
//! dashboard, and ranks teams per event under the two scoring methods.
//!
//! # Derivation order
//!
//! The pipeline adds seven derived columns in a fixed order, each step a
//! pure function from the previous table to a new one:
//!
//! 1. absolute medal count (`medal_abs_frequence`)
//! 2. canonical row ordering (first-appearance teams/events, ordinal medals)
//! 3. team relative size
//! 4. team/event participation ratio
//! 5. medal relative frequency
//! 6. performance score
//! 7. per-(event, team) score totals, broadcast onto every tier row
//!
//! Row count is preserved throughout: one row per observed
//! (event, team, medal tier), including `not_played` baseline rows.

pub mod pipeline;
pub mod winners;

pub use self::{
    pipeline::{EnrichedAggregate, PipelineError, enrich},
    winners::{RankedEntry, ScoreMethod, event_rankings, event_winners},
};
