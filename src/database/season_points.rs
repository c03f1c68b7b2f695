use std::collections::BTreeMap;

use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::{Category, CategoryTotals, Season, SeasonPoints};

/// Overwrites the season's whole cache in one transaction. The cache is
/// derived data: it is replaced, never patched, so a rerun on identical
/// results leaves identical rows.
pub fn replace_for_season(
    conn: &mut DbConn,
    season: Season,
    rows: &[SeasonPoints],
) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "DELETE FROM season_points WHERE season = ?1",
        params![season.label()],
    )?;

    for row in rows {
        for (category, totals) in &row.totals {
            tx.execute(
                "INSERT INTO season_points (team_id, season, category, points, tournaments_played, best_position) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    row.team_id,
                    season.label(),
                    category.as_str(),
                    totals.points,
                    totals.tournaments_played,
                    totals.best_position
                ],
            )?;
        }
    }

    tx.commit().context("Failed to replace season points")?;
    Ok(())
}

/// Reassembles per-team rows from the flat (team, category) storage.
pub fn list_by_season(conn: &mut DbConn, season: Season) -> Result<Vec<SeasonPoints>> {
    let sql = "SELECT team_id, category, points, tournaments_played, best_position FROM season_points WHERE season = ?1 ORDER BY team_id, category";

    let mut stmt = conn.prepare(sql)?;
    let flat = stmt
        .query_map(params![season.label()], |row| {
            let category: String = row.get(1)?;
            Ok((
                row.get::<_, i64>(0)?,
                category,
                CategoryTotals {
                    points: row.get(2)?,
                    tournaments_played: row.get(3)?,
                    best_position: row.get(4)?,
                },
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut by_team: BTreeMap<i64, BTreeMap<Category, CategoryTotals>> = BTreeMap::new();
    for (team_id, category, totals) in flat {
        let category: Category = category
            .parse()
            .context("Stored season_points row has an unknown category")?;
        by_team.entry(team_id).or_default().insert(category, totals);
    }

    Ok(by_team
        .into_iter()
        .map(|(team_id, totals)| SeasonPoints {
            team_id,
            season,
            totals,
        })
        .collect())
}
