use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

/// A fitted center-based partition of the feature space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    /// Cluster index per input point.
    pub labels: Vec<usize>,
    /// Cluster centers.
    pub centers: Vec<[f64; 2]>,
    /// Sum of squared distances from points to their assigned center.
    pub inertia: f64,
}

/// Narrow fitting seam: anything that partitions 2-D points into `k`
/// clusters minimizing within-cluster squared distance. Keeps the concrete
/// clustering algorithm swappable under the sweep.
pub trait PartitionFit {
    /// Fits `k` clusters over `points`.
    ///
    /// Callers guarantee `1 <= k <= points.len()`.
    fn fit(&self, points: &[[f64; 2]], k: usize) -> Partition;
}

/// Lloyd's k-means with k-means++ initialization and seeded multi-restart.
///
/// Every restart runs from a deterministically derived seed and the best
/// partition by inertia wins, which makes a fit a pure function of
/// (points, k, seed) while damping initialization sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeans {
    /// Independent restarts per fit.
    pub restarts: u64,
    /// Lloyd iteration cap per restart.
    pub max_iters: usize,
    /// Base seed; restart `r` runs from `seed + r`.
    pub seed: u64,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            restarts: 8,
            max_iters: 100,
            seed: 0,
        }
    }
}

impl PartitionFit for KMeans {
    fn fit(&self, points: &[[f64; 2]], k: usize) -> Partition {
        let mut best: Option<Partition> = None;
        for restart in 0..self.restarts.max(1) {
            let mut rng = Pcg64Mcg::seed_from_u64(self.seed.wrapping_add(restart));
            let fitted = self.fit_once(points, k, &mut rng);
            if best.as_ref().is_none_or(|b| fitted.inertia < b.inertia) {
                best = Some(fitted);
            }
        }
        // restarts.max(1) guarantees at least one fit
        best.unwrap()
    }
}

impl KMeans {
    fn fit_once<R>(&self, points: &[[f64; 2]], k: usize, rng: &mut R) -> Partition
    where
        R: Rng + ?Sized,
    {
        let mut centers = plus_plus_init(points, k, rng);
        let mut labels = vec![0; points.len()];

        for _ in 0..self.max_iters {
            let mut changed = false;
            for (i, point) in points.iter().enumerate() {
                let nearest = nearest_center(point, &centers);
                if labels[i] != nearest {
                    labels[i] = nearest;
                    changed = true;
                }
            }
            recompute_centers(points, &labels, &mut centers);
            if !changed {
                break;
            }
        }

        let inertia = points
            .iter()
            .zip(&labels)
            .map(|(point, &label)| squared_distance(point, &centers[label]))
            .sum();
        Partition {
            labels,
            centers,
            inertia,
        }
    }
}

fn squared_distance(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    dx * dx + dy * dy
}

fn nearest_center(point: &[f64; 2], centers: &[[f64; 2]]) -> usize {
    let mut nearest = 0;
    let mut nearest_dist = f64::INFINITY;
    for (i, center) in centers.iter().enumerate() {
        let dist = squared_distance(point, center);
        if dist < nearest_dist {
            nearest = i;
            nearest_dist = dist;
        }
    }
    nearest
}

/// k-means++ seeding: the first center uniform, each further center drawn
/// with probability proportional to its squared distance from the nearest
/// chosen center. Falls back to a uniform draw when every remaining point
/// coincides with a center.
fn plus_plus_init<R>(points: &[[f64; 2]], k: usize, rng: &mut R) -> Vec<[f64; 2]>
where
    R: Rng + ?Sized,
{
    let mut centers = Vec::with_capacity(k);
    centers.push(points[rng.random_range(0..points.len())]);

    while centers.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|point| {
                centers
                    .iter()
                    .map(|center| squared_distance(point, center))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = weights.iter().sum();
        let chosen = if total > 0.0 {
            let mut draw = rng.random::<f64>() * total;
            let mut chosen = points.len() - 1;
            for (i, weight) in weights.iter().enumerate() {
                if draw < *weight {
                    chosen = i;
                    break;
                }
                draw -= weight;
            }
            chosen
        } else {
            rng.random_range(0..points.len())
        };
        centers.push(points[chosen]);
    }
    centers
}

/// Moves each center to the mean of its assigned points. A cluster left
/// empty is re-seeded on the point farthest from its current center so the
/// partition always uses all `k` clusters.
fn recompute_centers(points: &[[f64; 2]], labels: &[usize], centers: &mut [[f64; 2]]) {
    let mut sums = vec![[0.0; 2]; centers.len()];
    let mut counts = vec![0usize; centers.len()];
    for (point, &label) in points.iter().zip(labels) {
        sums[label][0] += point[0];
        sums[label][1] += point[1];
        counts[label] += 1;
    }
    for (i, center) in centers.iter_mut().enumerate() {
        if counts[i] > 0 {
            #[expect(clippy::cast_precision_loss)]
            let n = counts[i] as f64;
            *center = [sums[i][0] / n, sums[i][1] / n];
        } else if let Some(farthest) = points.iter().max_by(|a, b| {
            squared_distance(a, center).total_cmp(&squared_distance(b, center))
        }) {
            *center = *farthest;
        }
    }
}
