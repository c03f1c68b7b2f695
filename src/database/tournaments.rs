use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use super::models::Tournament;
use crate::domain::{Category, Season, Tier};

pub fn upsert_tournament(
    conn: &mut DbConn,
    id: i64,
    name: &str,
    tier: Tier,
    year: i32,
    category: Category,
    completed: bool,
) -> Result<Tournament> {
    if let Some(existing) = find_by_id(conn, id)? {
        if !existing.completed && completed {
            return mark_completed(conn, id);
        }
        return Ok(existing);
    }

    insert_new_tournament(conn, id, name, tier, year, category, completed)
}

fn insert_new_tournament(
    conn: &mut DbConn,
    id: i64,
    name: &str,
    tier: Tier,
    year: i32,
    category: Category,
    completed: bool,
) -> Result<Tournament> {
    let sql = "INSERT INTO tournaments (id, name, tier, year, surface, modality, completed) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id, name, tier, year, surface, modality, completed, created_at";

    conn.query_row(
        sql,
        params![
            id,
            name,
            tier.as_str(),
            year,
            category.surface().as_str(),
            category.modality().as_str(),
            completed
        ],
        parse_tournament_row,
    )
    .context("Failed to insert new tournament")
}

fn mark_completed(conn: &mut DbConn, id: i64) -> Result<Tournament> {
    let sql = "UPDATE tournaments SET completed = 1 WHERE id = ?1 RETURNING id, name, tier, year, surface, modality, completed, created_at";

    conn.query_row(sql, params![id], parse_tournament_row)
        .context("Failed to mark tournament completed")
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<Tournament> {
    let tier: String = row.get(2)?;
    let surface: String = row.get(4)?;
    let modality: String = row.get(5)?;

    Ok(Tournament {
        id: row.get(0)?,
        name: row.get(1)?,
        tier: tier.parse().map_err(|_| rusqlite::Error::InvalidQuery)?,
        year: row.get(3)?,
        surface: surface.parse().map_err(|_| rusqlite::Error::InvalidQuery)?,
        modality: modality.parse().map_err(|_| rusqlite::Error::InvalidQuery)?,
        completed: row.get(6)?,
        created_at: row.get(7)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<Tournament>> {
    let sql = "SELECT id, name, tier, year, surface, modality, completed, created_at FROM tournaments WHERE id = ?1";

    conn.query_row(sql, params![id], parse_tournament_row)
        .optional()
        .context("Failed to query tournament by id")
}

/// Completed top-tier tournament count for one category in one season,
/// the lifecycle detector's only input besides persisted state.
pub fn count_completed(
    conn: &mut DbConn,
    season: Season,
    category: Category,
    tier: Tier,
) -> Result<u32> {
    let sql = "SELECT COUNT(*) FROM tournaments WHERE year = ?1 AND surface = ?2 AND modality = ?3 AND tier = ?4 AND completed = 1";

    conn.query_row(
        sql,
        params![
            season.start_year(),
            category.surface().as_str(),
            category.modality().as_str(),
            tier.as_str()
        ],
        |row| row.get(0),
    )
    .context("Failed to count completed tournaments")
}
