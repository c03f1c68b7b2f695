use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::{RawResult, Season};

pub fn insert_result(conn: &mut DbConn, result: &RawResult) -> Result<()> {
    let sql = "INSERT INTO results (team_id, tournament_id, tier, year, surface, modality, position, points) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

    conn.execute(
        sql,
        params![
            result.team_id,
            result.tournament_id,
            result.tier.as_str(),
            result.year,
            result.surface.as_str(),
            result.modality.as_str(),
            result.position,
            result.awarded_points
        ],
    )
    .context("Failed to insert result")?;

    Ok(())
}

/// All finishing-position facts whose tournament year belongs to the
/// season. Ordered by row id so repeated reads are stable.
pub fn list_by_season(conn: &mut DbConn, season: Season) -> Result<Vec<RawResult>> {
    let sql = "SELECT team_id, tournament_id, tier, year, surface, modality, position, points FROM results WHERE year = ?1 ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![season.start_year()], parse_result_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_result_row(row: &rusqlite::Row) -> rusqlite::Result<RawResult> {
    let tier: String = row.get(2)?;
    let surface: String = row.get(4)?;
    let modality: String = row.get(5)?;

    Ok(RawResult {
        team_id: row.get(0)?,
        tournament_id: row.get(1)?,
        tier: tier.parse().map_err(|_| rusqlite::Error::InvalidQuery)?,
        year: row.get(3)?,
        surface: surface.parse().map_err(|_| rusqlite::Error::InvalidQuery)?,
        modality: modality.parse().map_err(|_| rusqlite::Error::InvalidQuery)?,
        position: row.get(6)?,
        awarded_points: row.get(7)?,
    })
}
