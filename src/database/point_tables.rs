use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::Tier;
use crate::ranking::{PointTable, PointTableSet};

/// Replaces one tier's table wholesale. Validation happens here, at
/// write time: the calculators downstream assume a well-formed table.
pub fn replace_table(conn: &mut DbConn, tier: Tier, points: &[u32]) -> Result<()> {
    let table = PointTable::new(tier, points.to_vec())
        .context("Rejected malformed point table configuration")?;

    let tx = conn.transaction()?;
    tx.execute(
        "DELETE FROM point_tables WHERE tier = ?1",
        params![tier.as_str()],
    )?;
    for (idx, value) in table.values().iter().enumerate() {
        tx.execute(
            "INSERT INTO point_tables (tier, position, points) VALUES (?1, ?2, ?3)",
            params![tier.as_str(), idx as u32 + 1, value],
        )?;
    }
    tx.commit().context("Failed to replace point table")?;

    Ok(())
}

/// Loads every configured tier into a resolver set. Rows are trusted to
/// be well-formed because writes validate; a corrupted table still fails
/// loudly here rather than resolving garbage.
pub fn load_tables(conn: &mut DbConn) -> Result<PointTableSet> {
    let mut set = PointTableSet::new();

    for tier in Tier::ALL {
        let points = load_tier_points(conn, tier)?;
        if points.is_empty() {
            continue;
        }
        let table = PointTable::new(tier, points)
            .with_context(|| format!("Stored point table for {tier} is malformed"))?;
        set.insert(table);
    }

    Ok(set)
}

fn load_tier_points(conn: &mut DbConn, tier: Tier) -> Result<Vec<u32>> {
    let sql = "SELECT points FROM point_tables WHERE tier = ?1 ORDER BY position";

    let mut stmt = conn.prepare(sql)?;
    let points = stmt
        .query_map(params![tier.as_str()], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<u32>>>()?;

    Ok(points)
}
