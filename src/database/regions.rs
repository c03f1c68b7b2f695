use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use super::models::Region;
use crate::ranking::RegionConfig;

/// Writes a region's coefficient configuration, rejecting malformed
/// bounds here so calculation never has to.
pub fn upsert_region(
    conn: &mut DbConn,
    code: &str,
    name: &str,
    config: RegionConfig,
) -> Result<Region> {
    config
        .validate()
        .context("Rejected malformed region configuration")?;

    let sql = "INSERT INTO regions (code, name, floor, ceiling, increment) VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(code) DO UPDATE SET name = ?2, floor = ?3, ceiling = ?4, increment = ?5 RETURNING code, name, floor, ceiling, increment";

    conn.query_row(
        sql,
        params![code, name, config.floor, config.ceiling, config.increment],
        parse_region_row,
    )
    .context("Failed to upsert region")
}

pub fn find_by_code(conn: &mut DbConn, code: &str) -> Result<Option<Region>> {
    let sql = "SELECT code, name, floor, ceiling, increment FROM regions WHERE code = ?1";

    conn.query_row(sql, params![code], parse_region_row)
        .optional()
        .context("Failed to query region by code")
}

fn parse_region_row(row: &rusqlite::Row) -> rusqlite::Result<Region> {
    Ok(Region {
        code: row.get(0)?,
        name: row.get(1)?,
        config: RegionConfig {
            floor: row.get(2)?,
            ceiling: row.get(3)?,
            increment: row.get(4)?,
        },
    })
}
