//! Core data model for the Podium scoring study
//!
//! This crate holds the types shared by every stage of the pipeline:
//!
//! - [`medal::MedalTier`]: the ordinal medal category derived from a raw score
//! - [`result::PlayerResult`] / [`result::Team`]: disaggregated contest rows
//!   and session-scoped team rosters
//! - [`aggregate`]: grouped summation producing the per
//!   (event, team, medal) score table that the metrics pipeline enriches
//! - [`order::FirstSeen`]: canonical first-appearance orderings used by all
//!   downstream sorts
//! - [`cache::MemoCache`]: fingerprint + TTL memoization for session-scoped
//!   recomputation
//!
//! # Data Flow
//!
//! ```text
//! Vec<PlayerResult>  (disaggregated, one row per player per event)
//!     │
//!     ├─ aggregate::aggregate ──► Vec<TeamEventMedalAggregate>
//!     │                               (one row per event/team/medal)
//!     └─ order::FirstSeen ──► canonical team and event orderings
//! ```
//!
//! Downstream crates never mutate these tables in place; every derivation
//! builds a new value.

pub mod aggregate;
pub mod cache;
pub mod medal;
pub mod order;
pub mod result;

pub use self::{
    aggregate::{TeamEventMedalAggregate, aggregate},
    medal::MedalTier,
    order::FirstSeen,
    result::{PlayerResult, Team},
};
