use clap::{Parser, Subcommand};

use self::{enrich::EnrichArg, segment::SegmentArg, winners::WinnersArg};

mod enrich;
mod segment;
mod winners;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Contest scoring metrics and player segmentation", long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Derive the enriched metrics table from raw result rows
    Enrich(#[clap(flatten)] EnrichArg),
    /// Rank teams per event under a scoring method
    Winners(#[clap(flatten)] WinnersArg),
    /// Sweep cluster counts over the player feature space
    Segment(#[clap(flatten)] SegmentArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Enrich(arg) => enrich::run(&arg)?,
        Mode::Winners(arg) => winners::run(&arg)?,
        Mode::Segment(arg) => segment::run(&arg)?,
    }
    Ok(())
}
