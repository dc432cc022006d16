//! Unsupervised player segmentation
//!
//! This crate builds a two-dimensional feature space from disaggregated
//! contest rows and fits a clustering over it, model-selecting the cluster
//! count by mean silhouette.
//!
//! # Workflow
//!
//! 1. **Feature construction** ([`features::player_features`]): one row per
//!    (event date, player, team) with the day's aggregate score and
//!    participation fraction
//! 2. **Candidate sweep** ([`sweep::sweep`]): for every k in `2..=n-1`, fit
//!    a center-based partition ([`kmeans::KMeans`] behind the
//!    [`kmeans::PartitionFit`] seam) and score it by silhouette
//! 3. **Selection**: the recommended k is the smallest k attaining the
//!    maximum mean silhouette; any swept k remains selectable
//! 4. **Background sampling** ([`contour::contour_grid`]): margin-padded
//!    ranges over the feature space for the contour visualization layer
//!
//! All fits are seeded, so a sweep is a pure function of its inputs and can
//! be memoized by input fingerprint.

pub mod contour;
pub mod features;
pub mod kmeans;
pub mod silhouette;
pub mod sweep;

pub use self::{
    contour::{ContourConfig, ContourGrid, contour_grid},
    features::{PlayerFeature, feature_matrix, player_features},
    kmeans::{KMeans, Partition, PartitionFit},
    silhouette::{Silhouette, silhouette},
    sweep::{ClusterCandidate, SegmentationError, SegmentationSweep, sweep},
};
