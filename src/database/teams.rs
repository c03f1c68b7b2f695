use std::collections::HashSet;

use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use super::models::Team;

pub fn upsert_team(
    conn: &mut DbConn,
    id: i64,
    name: &str,
    region_code: Option<&str>,
) -> Result<Team> {
    if let Some(existing) = find_by_id(conn, id)? {
        return Ok(existing);
    }

    insert_new_team(conn, id, name, region_code)
}

fn insert_new_team(
    conn: &mut DbConn,
    id: i64,
    name: &str,
    region_code: Option<&str>,
) -> Result<Team> {
    let sql = "INSERT INTO teams (id, name, region_code) VALUES (?1, ?2, ?3) RETURNING id, name, region_code, created_at";

    conn.query_row(sql, params![id, name, region_code], parse_team_row)
        .context("Failed to insert new team")
}

fn parse_team_row(row: &rusqlite::Row) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        region_code: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub fn find_by_id(conn: &mut DbConn, id: i64) -> Result<Option<Team>> {
    let sql = "SELECT id, name, region_code, created_at FROM teams WHERE id = ?1";

    conn.query_row(sql, params![id], parse_team_row)
        .optional()
        .context("Failed to query team by id")
}

/// The directory of resolvable team ids, used to detect dangling
/// references during aggregation.
pub fn list_ids(conn: &mut DbConn) -> Result<HashSet<i64>> {
    let sql = "SELECT id FROM teams";

    let mut stmt = conn.prepare(sql)?;
    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<HashSet<i64>>>()?;

    Ok(ids)
}

pub fn list_ids_by_region(conn: &mut DbConn, region_code: &str) -> Result<HashSet<i64>> {
    let sql = "SELECT id FROM teams WHERE region_code = ?1";

    let mut stmt = conn.prepare(sql)?;
    let ids = stmt
        .query_map(params![region_code], |row| row.get(0))?
        .collect::<rusqlite::Result<HashSet<i64>>>()?;

    Ok(ids)
}
