use anyhow::{Context, Result};

use super::connection::DbConn;

/// Drops and recreates the whole schema. Raw results are the source of
/// truth, so this is only for bootstrapping a fresh database, never part
/// of a recomputation run.
pub fn init_database(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");

    let tx = conn.transaction()?;
    for (idx, statement) in split_sql_statements(schema_sql).iter().enumerate() {
        tx.execute(statement, [])
            .with_context(|| format!("Failed to execute schema statement {}", idx + 1))?;
    }
    tx.commit()?;

    log::info!("Database schema initialized");
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
