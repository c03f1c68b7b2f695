use anyhow::Result;
use colored::Colorize;

use crate::domain::{RankingRow, RankingScope, Season};

/// Prints a stored ranking, either as a colored table or as JSON for
/// machine consumption.
pub fn print_ranking(
    season: Season,
    scope: RankingScope,
    rows: &[RankingRow],
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No ranking stored for season {season} scope {scope}");
        return Ok(());
    }

    println!("Ranking {scope} — season {season}");
    println!("{:>4}  {:>10}  {:>12}  {:>6}  {:>10}", "rank", "team", "points", "Δpos", "Δpoints");
    for row in rows {
        println!(
            "{:>4}  {:>10}  {:>12.1}  {:>6}  {:>10}",
            row.rank,
            row.team_id,
            row.weighted_points,
            format_position_change(row.position_change),
            format_points_change(row.points_change),
        );
    }
    Ok(())
}

fn format_position_change(change: i32) -> String {
    if change > 0 {
        format!("+{change}").as_str().green().to_string()
    } else if change < 0 {
        change.to_string().as_str().red().to_string()
    } else {
        "=".dimmed().to_string()
    }
}

fn format_points_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{change:.1}").as_str().green().to_string()
    } else if change < 0.0 {
        format!("{change:.1}").as_str().red().to_string()
    } else {
        "0.0".dimmed().to_string()
    }
}
