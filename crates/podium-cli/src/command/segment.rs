use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use podium_segment::{
    ContourConfig, KMeans, contour_grid, feature_matrix, player_features, sweep,
};

use crate::data;

#[derive(Debug, Clone, Args)]
pub(crate) struct SegmentArg {
    /// Path to the disaggregated results CSV
    pub csv: PathBuf,

    /// Base seed for the k-means restarts
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Restarts per candidate cluster count
    #[arg(long, default_value_t = 8)]
    restarts: u64,

    /// Print every swept candidate, not only the recommended one
    #[arg(long)]
    full: bool,

    /// Directory to write JSON snapshots into
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
}

pub(crate) fn run(arg: &SegmentArg) -> anyhow::Result<()> {
    let rows = data::load_results(&arg.csv)?;
    let features = player_features(&rows);
    let points = feature_matrix(&features);

    let fitter = KMeans {
        restarts: arg.restarts,
        seed: arg.seed,
        ..KMeans::default()
    };
    let result = sweep(&points, &fitter)
        .with_context(|| format!("cannot segment {} player features", features.len()))?;

    println!(
        "Swept k = 2..={} over {} player features.",
        points.len() - 1,
        points.len()
    );
    if arg.full {
        println!("{:>3} {:>12} {:>12}", "k", "silhouette", "inertia");
        for candidate in &result.candidates {
            println!(
                "{:>3} {:>12.4} {:>12.4}",
                candidate.k, candidate.mean_silhouette, candidate.inertia
            );
        }
    }
    println!(
        "Recommended k = {} (mean silhouette {:.4}).",
        result.recommended_k, result.best_mean_silhouette
    );

    let recommended = result.recommended();
    for cluster in 0..recommended.k {
        let members = recommended
            .labels
            .iter()
            .filter(|&&label| label == cluster)
            .count();
        println!("- cluster {cluster}: {members} players");
    }

    if let Some(dir) = &arg.snapshot_dir {
        #[expect(clippy::cast_precision_loss)]
        let depth: Vec<f64> = recommended.labels.iter().map(|&label| label as f64).collect();
        let grid = contour_grid(&points, &depth, &ContourConfig::default());
        data::write_snapshot(dir, "clust_features", &features)?;
        data::write_snapshot(dir, "clust_sweep", &result)?;
        data::write_snapshot(dir, "clust_contour", &grid)?;
        println!("Snapshots written to {}.", dir.display());
    }

    Ok(())
}
