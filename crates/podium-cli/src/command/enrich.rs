use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use podium_core::aggregate;
use podium_metrics::enrich;

use crate::data;

#[derive(Debug, Clone, Args)]
pub(crate) struct EnrichArg {
    /// Path to the disaggregated results CSV
    pub csv: PathBuf,

    /// Teams to deselect from the session (comma-separated); the first
    /// observed team always stays
    #[arg(long, value_delimiter = ',')]
    pub deselect: Vec<String>,

    /// Directory to write JSON table snapshots into
    #[arg(long)]
    pub snapshot_dir: Option<PathBuf>,
}

pub(crate) fn run(arg: &EnrichArg) -> anyhow::Result<()> {
    let rows = data::load_results(&arg.csv)?;
    if rows.is_empty() {
        bail!("{} holds no result rows", arg.csv.display());
    }
    let teams = data::teams_from_rows(&rows);
    let flags = data::active_flags(&teams, &arg.deselect);
    let aggregated = aggregate(&rows);
    let table = enrich(&aggregated, &rows, &teams, &flags)?;

    println!(
        "{:<12} {:<10} {:<12} {:>4} {:>5} {:>7} {:>7} {:>8} {:>9} {:>7} {:>8}",
        "event", "team", "medal", "acc", "count", "size%", "part%", "medal%", "perform", "acc_t", "perf_t"
    );
    for row in &table {
        println!(
            "{:<12} {:<10} {:<12} {:>4} {:>5} {:>7.2} {:>7.2} {:>8.2} {:>9.2} {:>7} {:>8.2}",
            row.event_game,
            row.team,
            row.medal.to_string(),
            row.acc_w_score,
            row.medal_abs_frequence,
            row.team_relative_size,
            row.team_participation_ratio,
            row.medal_rel_frequence,
            row.perform_score,
            row.acc_w_score_total,
            row.perform_score_total,
        );
    }

    if let Some(dir) = &arg.snapshot_dir {
        data::write_snapshot(dir, "teams_disagg", &rows)?;
        data::write_snapshot(dir, "teams_agg", &aggregated)?;
        data::write_snapshot(dir, "teams_agg_metrics", &table)?;
        println!("Snapshots written to {}.", dir.display());
    }

    Ok(())
}
