use serde::{Deserialize, Serialize};

/// Per-point silhouette widths and their mean for one labeled partition.
///
/// Each width is `(separation - cohesion) / max(separation, cohesion)`,
/// in `[-1, 1]`: cohesion is the mean distance to the point's own cluster,
/// separation the smallest mean distance to any other cluster. Points in
/// singleton clusters score 0 by convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Silhouette {
    pub samples: Vec<f64>,
    pub mean: f64,
}

/// Computes silhouette widths over a labeled 2-D partition.
///
/// Callers guarantee at least two clusters and `labels.len() ==
/// points.len()`; silhouette is undefined below two clusters or two
/// samples, which the sweep rules out before calling.
#[must_use]
pub fn silhouette(points: &[[f64; 2]], labels: &[usize]) -> Silhouette {
    let cluster_count = labels.iter().copied().max().map_or(0, |max| max + 1);
    let mut cluster_sizes = vec![0usize; cluster_count];
    for &label in labels {
        cluster_sizes[label] += 1;
    }

    let samples: Vec<f64> = points
        .iter()
        .zip(labels)
        .map(|(point, &own)| {
            if cluster_sizes[own] <= 1 {
                return 0.0;
            }

            // Mean distance from this point to every cluster.
            let mut dist_sums = vec![0.0; cluster_count];
            for (other, &label) in points.iter().zip(labels) {
                dist_sums[label] += distance(point, other);
            }

            #[expect(clippy::cast_precision_loss)]
            let cohesion = dist_sums[own] / (cluster_sizes[own] - 1) as f64;
            #[expect(clippy::cast_precision_loss)]
            let separation = dist_sums
                .iter()
                .enumerate()
                .filter(|&(label, _)| label != own && cluster_sizes[label] > 0)
                .map(|(label, sum)| sum / cluster_sizes[label] as f64)
                .fold(f64::INFINITY, f64::min);

            let denom = cohesion.max(separation);
            if denom > 0.0 {
                (separation - cohesion) / denom
            } else {
                0.0
            }
        })
        .collect();

    #[expect(clippy::cast_precision_loss)]
    let mean = if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    };

    Silhouette { samples, mean }
}

fn distance(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tight_separated_blobs_score_near_one() {
        let points = vec![
            [0.0, 0.0],
            [0.1, 0.0],
            [0.0, 0.1],
            [10.0, 10.0],
            [10.1, 10.0],
            [10.0, 10.1],
        ];
        let labels = vec![0, 0, 0, 1, 1, 1];
        let result = silhouette(&points, &labels);
        assert!(result.mean > 0.95);
        assert!(result.samples.iter().all(|&s| (-1.0..=1.0).contains(&s)));
    }

    #[test]
    fn widths_match_hand_computation() {
        let points = vec![[0.0, 0.0], [1.0, 0.0], [5.0, 0.0], [6.0, 0.0]];
        let labels = vec![0, 0, 1, 1];
        let result = silhouette(&points, &labels);
        // For [0, 0]: cohesion 1, separation (5 + 6) / 2 = 5.5.
        assert!((result.samples[0] - 4.5 / 5.5).abs() < 1e-12);
        // For [1, 0]: cohesion 1, separation (4 + 5) / 2 = 4.5.
        assert!((result.samples[1] - 3.5 / 4.5).abs() < 1e-12);
        let expected_mean = (2.0 * (4.5 / 5.5) + 2.0 * (3.5 / 4.5)) / 4.0;
        assert!((result.mean - expected_mean).abs() < 1e-12);
    }

    #[test]
    fn bad_assignment_scores_negative() {
        // Pairs split across clusters: each point sits nearer the other
        // cluster's members than its own.
        let points = vec![[0.0, 0.0], [10.0, 0.0], [0.1, 0.0], [10.1, 0.0]];
        let labels = vec![0, 0, 1, 1];
        let result = silhouette(&points, &labels);
        assert!(result.mean < 0.0);
    }

    #[test]
    fn singleton_cluster_scores_zero() {
        let points = vec![[0.0, 0.0], [5.0, 0.0], [5.1, 0.0]];
        let labels = vec![0, 1, 1];
        let result = silhouette(&points, &labels);
        assert_eq!(result.samples[0], 0.0);
    }
}
