use serde::{Deserialize, Serialize};

/// Smallest step used when an observed range has zero span, so every axis
/// always yields at least one sample.
const MIN_STEP: f64 = 1e-9;

/// Margins and mesh density for the background sampling grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourConfig {
    /// Padding added on both sides of the score (x) axis.
    pub h_margin: f64,
    /// Padding added on both sides of the participation (y) axis.
    pub v_margin: f64,
    /// Step along the x axis; the y and z steps are derived from the x
    /// sample count so the grid keeps a matching density.
    pub mesh_size: f64,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            h_margin: 0.35,
            v_margin: 0.35,
            mesh_size: 0.1,
        }
    }
}

/// Axis samples for one contour background layer. Pure range construction;
/// no fitting happens here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

/// Builds the sampling grid around the observed feature ranges.
///
/// `points` is the fitted 2-D feature matrix (score first, participation
/// second); `depth` is the z source, usually cluster labels or silhouette
/// samples. Empty inputs produce an empty grid.
#[must_use]
pub fn contour_grid(points: &[[f64; 2]], depth: &[f64], config: &ContourConfig) -> ContourGrid {
    let Some((x_min, x_max)) = axis_bounds(points.iter().map(|p| p[0])) else {
        return ContourGrid {
            x: vec![],
            y: vec![],
            z: vec![],
        };
    };
    let Some((y_min, y_max)) = axis_bounds(points.iter().map(|p| p[1])) else {
        unreachable!("both axes come from the same points");
    };
    let (z_min, z_max) = axis_bounds(depth.iter().copied()).unwrap_or((0.0, 0.0));

    let x = arange(
        x_min - config.h_margin,
        x_max + config.h_margin,
        config.mesh_size,
    );

    #[expect(clippy::cast_precision_loss)]
    let x_len = x.len().max(1) as f64;
    let y_start = y_min - config.v_margin;
    let y_end = y_max + config.v_margin;
    let y = arange(y_start, y_end, (y_end - y_start) / x_len);
    let z = arange(z_min, z_max, (z_max - z_min) / x_len);

    ContourGrid { x, y, z }
}

fn axis_bounds<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(None, |bounds, value| {
        let (min, max) = bounds.unwrap_or((value, value));
        Some((min.min(value), max.max(value)))
    })
}

/// Half-open range sampling with a positive-step guard.
fn arange(start: f64, end: f64, step: f64) -> Vec<f64> {
    let step = if step > MIN_STEP { step } else { MIN_STEP };
    let mut values = Vec::new();
    let mut count = 0.0_f64;
    let mut value = start;
    while value < end {
        values.push(value);
        count += 1.0;
        value = start + step * count;
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_padded_by_the_margins() {
        let points = vec![[0.0, 0.0], [2.0, 1.0]];
        let grid = contour_grid(&points, &[0.0, 1.0], &ContourConfig::default());
        assert!((grid.x[0] - -0.35).abs() < 1e-12);
        assert!(*grid.x.last().unwrap() < 2.35);
        assert!((grid.y[0] - -0.35).abs() < 1e-12);
        assert!(*grid.y.last().unwrap() < 1.35);
    }

    #[test]
    fn y_and_z_density_follows_x() {
        let points = vec![[0.0, 0.0], [4.0, 2.0]];
        let grid = contour_grid(&points, &[0.0, 3.0], &ContourConfig::default());
        // Derived steps divide their span by the x sample count, so the
        // axis lengths stay within one step of it.
        assert!(grid.y.len().abs_diff(grid.x.len()) <= 1);
        assert!(grid.z.len().abs_diff(grid.x.len()) <= 1);
    }

    #[test]
    fn zero_span_axis_still_yields_samples() {
        let points = vec![[1.0, 0.5], [1.0, 0.5], [1.0, 0.5]];
        let grid = contour_grid(&points, &[2.0, 2.0, 2.0], &ContourConfig::default());
        assert!(!grid.x.is_empty());
        assert!(!grid.y.is_empty());
        // z has a zero span and no margin, so it may stay a single sample,
        // but never diverges or panics.
        assert!(grid.z.len() <= 1);
    }

    #[test]
    fn empty_points_give_an_empty_grid() {
        let grid = contour_grid(&[], &[], &ContourConfig::default());
        assert!(grid.x.is_empty() && grid.y.is_empty() && grid.z.is_empty());
    }
}
