use serde::{Deserialize, Serialize};

use crate::{
    kmeans::PartitionFit,
    silhouette::silhouette,
};

/// One fitted and scored cluster-count candidate. Ephemeral: recomputed on
/// every data refresh, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterCandidate {
    pub k: usize,
    pub labels: Vec<usize>,
    pub centers: Vec<[f64; 2]>,
    pub silhouette_samples: Vec<f64>,
    pub mean_silhouette: f64,
    pub inertia: f64,
}

/// Result of the exhaustive cluster-count sweep.
///
/// The recommended candidate maximizes mean silhouette (ties resolve to
/// the smallest k), but every swept k stays available for selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationSweep {
    pub candidates: Vec<ClusterCandidate>,
    pub recommended_k: usize,
    pub best_mean_silhouette: f64,
}

impl SegmentationSweep {
    /// The candidate selected by the silhouette criterion.
    #[must_use]
    pub fn recommended(&self) -> &ClusterCandidate {
        // recommended_k is always one of the swept candidates
        self.candidates
            .iter()
            .find(|c| c.k == self.recommended_k)
            .unwrap()
    }
}

/// Errors from the segmentation sweep.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SegmentationError {
    /// Every feature point is identical; no meaningful partition exists and
    /// silhouette is undefined below two distinct samples.
    #[display("all {points} feature points are identical, no meaningful partition")]
    DegenerateFeatureSpace { points: usize },
    /// The candidate range `2..=n-1` is empty.
    #[display("{points} feature points leave no cluster count to sweep (need at least 3)")]
    NotEnoughSamples { points: usize },
}

/// Sweeps every candidate cluster count `k = 2..=n-1`, fitting each with
/// `fitter` and scoring it by silhouette.
///
/// Candidates are independent of each other; only the final selection
/// compares them.
///
/// # Errors
///
/// [`SegmentationError::DegenerateFeatureSpace`] when the points hold
/// fewer than two distinct values, [`SegmentationError::NotEnoughSamples`]
/// when fewer than three points are available.
pub fn sweep<F>(points: &[[f64; 2]], fitter: &F) -> Result<SegmentationSweep, SegmentationError>
where
    F: PartitionFit,
{
    if distinct_points(points) < 2 {
        return Err(SegmentationError::DegenerateFeatureSpace {
            points: points.len(),
        });
    }
    if points.len() < 3 {
        return Err(SegmentationError::NotEnoughSamples {
            points: points.len(),
        });
    }

    let mut candidates = Vec::with_capacity(points.len() - 2);
    for k in 2..points.len() {
        let partition = fitter.fit(points, k);
        let scored = silhouette(points, &partition.labels);
        candidates.push(ClusterCandidate {
            k,
            labels: partition.labels,
            centers: partition.centers,
            silhouette_samples: scored.samples,
            mean_silhouette: scored.mean,
            inertia: partition.inertia,
        });
    }

    // Smallest k attaining the maximum mean silhouette: strict "greater
    // than" keeps the earlier (smaller) k on ties.
    let mut best = &candidates[0];
    for candidate in &candidates[1..] {
        if candidate.mean_silhouette > best.mean_silhouette {
            best = candidate;
        }
    }

    Ok(SegmentationSweep {
        recommended_k: best.k,
        best_mean_silhouette: best.mean_silhouette,
        candidates,
    })
}

fn distinct_points(points: &[[f64; 2]]) -> usize {
    let mut sorted: Vec<[u64; 2]> = points
        .iter()
        .map(|p| [p[0].to_bits(), p[1].to_bits()])
        .collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}

#[cfg(test)]
mod tests {
    use crate::kmeans::KMeans;

    use super::*;

    fn three_blobs() -> Vec<[f64; 2]> {
        vec![
            [0.0, 0.0],
            [0.2, 0.1],
            [0.1, 0.2],
            [5.0, 5.0],
            [5.2, 5.1],
            [5.1, 4.9],
            [10.0, 0.0],
            [10.2, 0.1],
            [10.1, 0.2],
        ]
    }

    #[test]
    fn sweeps_every_candidate_count() {
        let points = three_blobs();
        let result = sweep(&points, &KMeans::default()).unwrap();
        let ks: Vec<_> = result.candidates.iter().map(|c| c.k).collect();
        assert_eq!(ks, (2..points.len()).collect::<Vec<_>>());
        for candidate in &result.candidates {
            assert_eq!(candidate.labels.len(), points.len());
            assert_eq!(candidate.silhouette_samples.len(), points.len());
        }
    }

    #[test]
    fn recommends_the_silhouette_maximum() {
        let result = sweep(&three_blobs(), &KMeans::default()).unwrap();
        assert_eq!(result.recommended_k, 3);
        for candidate in &result.candidates {
            assert!(candidate.mean_silhouette <= result.best_mean_silhouette);
        }
        assert_eq!(
            result.recommended().mean_silhouette,
            result.best_mean_silhouette
        );
    }

    #[test]
    fn identical_points_are_degenerate() {
        let points = vec![[2.0, 0.5]; 4];
        let err = sweep(&points, &KMeans::default()).unwrap_err();
        assert_eq!(err, SegmentationError::DegenerateFeatureSpace { points: 4 });
    }

    #[test]
    fn empty_and_tiny_inputs_report_errors() {
        let fitter = KMeans::default();
        assert_eq!(
            sweep(&[], &fitter).unwrap_err(),
            SegmentationError::DegenerateFeatureSpace { points: 0 }
        );
        let two = vec![[0.0, 0.0], [1.0, 1.0]];
        assert_eq!(
            sweep(&two, &fitter).unwrap_err(),
            SegmentationError::NotEnoughSamples { points: 2 }
        );
    }

    #[test]
    fn ties_resolve_to_the_smallest_k() {
        struct ConstantFit;
        impl PartitionFit for ConstantFit {
            fn fit(&self, points: &[[f64; 2]], k: usize) -> crate::kmeans::Partition {
                // Round-robin labels, ignoring geometry.
                crate::kmeans::Partition {
                    labels: (0..points.len()).map(|i| i % k).collect(),
                    centers: vec![[0.0, 0.0]; k],
                    inertia: 0.0,
                }
            }
        }

        // The exact scores do not matter, only that equal maxima keep the
        // lower k.
        let points = vec![[0.0, 0.0], [0.0, 0.0], [9.0, 9.0], [9.0, 9.0]];
        let result = sweep(&points, &ConstantFit).unwrap();
        let best = result.best_mean_silhouette;
        let smallest_best = result
            .candidates
            .iter()
            .find(|c| (c.mean_silhouette - best).abs() < 1e-12)
            .unwrap()
            .k;
        assert_eq!(result.recommended_k, smallest_best);
    }
}
