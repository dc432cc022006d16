use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::NaiveDate;
use podium_core::{FirstSeen, PlayerResult, Team};
use serde::Deserialize;

/// One raw input line: `player_id,event_date,event_game,team,score`.
#[derive(Debug, Clone, Deserialize)]
struct RawRecord {
    player_id: String,
    event_date: NaiveDate,
    event_game: String,
    team: String,
    score: u8,
}

/// Loads disaggregated result rows from a CSV file.
pub fn load_results<P>(path: P) -> anyhow::Result<Vec<PlayerResult>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for (line, record) in reader.deserialize::<RawRecord>().enumerate() {
        let record =
            record.with_context(|| format!("failed to parse {} row {}", path.display(), line + 1))?;
        let row = PlayerResult::from_raw_score(
            record.player_id,
            record.event_date,
            record.event_game,
            record.team,
            record.score,
        )
        .with_context(|| format!("invalid row {} in {}", line + 1, path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Derives session team rosters from the rows, in team first-appearance
/// order.
pub fn teams_from_rows(rows: &[PlayerResult]) -> Vec<Team> {
    let order: FirstSeen<&str> = rows.iter().map(|row| row.team.as_str()).collect();
    order
        .values()
        .iter()
        .map(|name| Team::from_rows(name, rows))
        .collect()
}

/// Active flags parallel to `teams[1..]`: a team stays active unless
/// deselected by name. The first team is always part of the session.
pub fn active_flags(teams: &[Team], deselected: &[String]) -> Vec<bool> {
    teams
        .iter()
        .skip(1)
        .map(|team| !deselected.iter().any(|name| name == team.name()))
        .collect()
}

/// Writes one table snapshot as `<dir>/<name>.json`, last-write-wins.
///
/// Snapshots are independent flat files keyed by table name; there is no
/// cross-table transactional guarantee.
pub fn write_snapshot<T>(dir: &Path, name: &str, value: &T) -> anyhow::Result<PathBuf>
where
    T: serde::Serialize,
{
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create snapshot dir {}", dir.display()))?;
    let path = dir.join(format!("{name}.json"));
    let file = File::create(&path)
        .with_context(|| format!("failed to create snapshot {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("failed to write snapshot {}", path.display()))?;
    Ok(path)
}
