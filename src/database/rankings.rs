use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::{RankingRow, RankingScope, Season};

/// Overwrites one scope's snapshot for a season in a single transaction.
/// The snapshot table is the only shared mutable resource in the
/// pipeline; wholesale replacement keeps recomputation idempotent.
pub fn replace_scope(
    conn: &mut DbConn,
    season: Season,
    scope: RankingScope,
    rows: &[RankingRow],
) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "DELETE FROM season_rankings WHERE season = ?1 AND scope = ?2",
        params![season.label(), scope.as_key()],
    )?;

    for row in rows {
        tx.execute(
            "INSERT INTO season_rankings (team_id, season, scope, rank, weighted_points, position_change, points_change) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                row.team_id,
                season.label(),
                scope.as_key(),
                row.rank,
                row.weighted_points,
                row.position_change,
                row.points_change
            ],
        )?;
    }

    tx.commit().context("Failed to replace ranking snapshot")?;
    Ok(())
}

/// Reads a persisted snapshot, best rank first. An absent season or
/// scope is an empty snapshot, not an error.
pub fn list_scope(
    conn: &mut DbConn,
    season: Season,
    scope: RankingScope,
) -> Result<Vec<RankingRow>> {
    let sql = "SELECT team_id, rank, weighted_points, position_change, points_change FROM season_rankings WHERE season = ?1 AND scope = ?2 ORDER BY rank, team_id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![season.label(), scope.as_key()], parse_ranking_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_ranking_row(row: &rusqlite::Row) -> rusqlite::Result<RankingRow> {
    Ok(RankingRow {
        team_id: row.get(0)?,
        rank: row.get(1)?,
        weighted_points: row.get(2)?,
        position_change: row.get(3)?,
        points_change: row.get(4)?,
    })
}
