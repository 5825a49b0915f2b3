use super::{read_json, to_json};
use crate::cli::OutputFormat;
use crate::config::EngineConfig;
use crate::ranking::{rank_all, CohortScore, Leaderboard};
use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::path::Path;

/// Rank every cohort in a score file, keeping the top `top` entries each.
pub fn rank_cohorts(
    cohort_path: &Path,
    updated_at: DateTime<Utc>,
    top: Option<usize>,
    config: &EngineConfig,
) -> Result<Vec<Leaderboard>> {
    let members: Vec<CohortScore> = read_json(cohort_path, "cohort scores")?;
    let mut boards = rank_all(members, updated_at, &config.parallel);
    if let Some(n) = top {
        for board in &mut boards {
            board.entries.truncate(n);
        }
    }
    Ok(boards)
}

pub fn render(boards: &[Leaderboard], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&boards),
        OutputFormat::Table => Ok(render_table(boards)),
    }
}

/// One table per cohort, followed by its summary line.
pub fn render_table(boards: &[Leaderboard]) -> String {
    let mut out = String::new();
    for board in boards {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Rank", "Person", "Score", "Percentile"]);

        for entry in &board.entries {
            table.add_row(vec![
                Cell::new(entry.rank).set_alignment(CellAlignment::Right),
                Cell::new(&entry.person_id),
                Cell::new(format!("{:.1}", entry.score)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.1}", entry.percentile)).set_alignment(CellAlignment::Right),
            ]);
        }

        let stats = &board.statistics;
        out.push_str(&format!("Cohort {}\n{table}\n", board.cohort_key));
        out.push_str(&format!(
            "{} members, average {:.1}, median {:.1}, range {:.1}-{:.1}\n\n",
            stats.size, stats.average, stats.median, stats.min, stats.max
        ));
    }
    out
}
