use std::path::PathBuf;

use clap::Args;
use podium_core::aggregate;
use podium_metrics::{ScoreMethod, enrich, event_rankings, event_winners};

use crate::data;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
enum Method {
    Accumulative,
    Performance,
}

impl From<Method> for ScoreMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Accumulative => ScoreMethod::Accumulative,
            Method::Performance => ScoreMethod::Performance,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct WinnersArg {
    /// Path to the disaggregated results CSV
    pub csv: PathBuf,

    /// Scoring method: accumulative or performance
    #[arg(long, default_value = "accumulative")]
    method: Method,

    /// Print the full per-event ranking instead of winners only
    #[arg(long)]
    full: bool,
}

pub(crate) fn run(arg: &WinnersArg) -> anyhow::Result<()> {
    let rows = data::load_results(&arg.csv)?;
    let teams = data::teams_from_rows(&rows);
    let flags = data::active_flags(&teams, &[]);
    let table = enrich(&aggregate(&rows), &rows, &teams, &flags)?;
    if table.is_empty() {
        println!("No rows to rank.");
        return Ok(());
    }

    let method = ScoreMethod::from(arg.method);
    let entries = if arg.full {
        event_rankings(&table, method)
    } else {
        event_winners(&table, method)
    };

    println!("Ranking by {method} score:");
    for entry in &entries {
        println!(
            "- {} {}: {} ({}) total {:.2}, tier {:.2}, participation {:.2}%",
            entry.event_date,
            entry.event_game,
            entry.team,
            entry.medal,
            entry.total_score,
            entry.tier_score,
            entry.team_participation_ratio,
        );
    }
    Ok(())
}
