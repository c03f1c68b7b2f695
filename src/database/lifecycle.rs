use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::{LifecycleState, Notification, Season};

/// Reads a season's persisted lifecycle flags; a season never seen
/// before starts with everything pending.
pub fn get_state(conn: &mut DbConn, season: Season) -> Result<LifecycleState> {
    let sql = "SELECT sub1_complete, sub2_complete, sub3_complete, sub4_complete FROM lifecycle WHERE season = ?1";

    let stored = conn
        .query_row(sql, params![season.label()], |row| {
            Ok([
                row.get::<_, bool>(0)?,
                row.get::<_, bool>(1)?,
                row.get::<_, bool>(2)?,
                row.get::<_, bool>(3)?,
            ])
        })
        .optional()
        .context("Failed to query lifecycle state")?;

    Ok(match stored {
        Some(completed) => LifecycleState { season, completed },
        None => LifecycleState::pending(season),
    })
}

/// Persists advanced lifecycle flags together with their transition
/// notifications in one transaction. Flags must never land without
/// their notifications: a crash between the two would make the next
/// detector run skip the transition and lose the notification for good.
///
/// Notifications are keyed by season+subseason+kind and inserted with
/// OR IGNORE, so replays are safe. Returns, per notification, whether
/// this call recorded it or an earlier run already had.
pub fn commit_transition(
    conn: &mut DbConn,
    state: &LifecycleState,
    notifications: &[Notification],
) -> Result<Vec<bool>> {
    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO lifecycle (season, sub1_complete, sub2_complete, sub3_complete, sub4_complete) VALUES (?1, ?2, ?3, ?4, ?5) ON CONFLICT(season) DO UPDATE SET sub1_complete = ?2, sub2_complete = ?3, sub3_complete = ?4, sub4_complete = ?5",
        params![
            state.season.label(),
            state.completed[0],
            state.completed[1],
            state.completed[2],
            state.completed[3]
        ],
    )
    .context("Failed to save lifecycle state")?;

    let mut recorded = Vec::with_capacity(notifications.len());
    for notification in notifications {
        let inserted = tx
            .execute(
                "INSERT OR IGNORE INTO notifications (key, season, message) VALUES (?1, ?2, ?3)",
                params![
                    notification.key(),
                    notification.season.label(),
                    notification.describe()
                ],
            )
            .context("Failed to record notification")?;
        recorded.push(inserted > 0);
    }

    tx.commit().context("Failed to commit lifecycle transition")?;
    Ok(recorded)
}
