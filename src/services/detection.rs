use std::collections::BTreeMap;

use anyhow::Result;
use log::info;

use crate::config::AppConfig;
use crate::database::{self, DbConn};
use crate::domain::{Category, LifecycleState, Season, Tier};
use crate::ranking;

use super::database_path;

/// Observes completed top-tier tournament counts and advances the
/// season's lifecycle state. Only decides readiness: consolidation
/// stays an explicit administrator-triggered `process` run.
pub struct DetectionService {
    config: AppConfig,
}

impl DetectionService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, season: Season) -> Result<LifecycleState> {
        let pool = database::create_pool(&database_path())?;
        let mut conn = database::get_connection(&pool)?;

        info!("=== Detecting lifecycle for season {} ===", season);
        let state = self.detect(&mut conn, season)?;
        info!(
            "Season {}: sub-seasons complete {:?}, season complete: {}",
            season,
            state.completed,
            state.season_complete()
        );
        Ok(state)
    }

    fn detect(&self, conn: &mut DbConn, season: Season) -> Result<LifecycleState> {
        let counts = self.count_completed_ce1(conn, season)?;
        let stored = database::lifecycle::get_state(conn, season)?;

        let (next, notifications) = ranking::advance_lifecycle(
            &stored,
            &counts,
            &self.config.ranking.expected_ce1_tournaments,
        );

        // One transaction: flags must never persist without their
        // notifications, or a crash in between loses the transition.
        let recorded = database::lifecycle::commit_transition(conn, &next, &notifications)?;

        for (notification, inserted) in notifications.iter().zip(recorded) {
            if inserted {
                info!("  → {}", notification.describe());
            } else {
                info!("  → Already notified: {}", notification.key());
            }
        }

        Ok(next)
    }

    fn count_completed_ce1(
        &self,
        conn: &mut DbConn,
        season: Season,
    ) -> Result<BTreeMap<Category, u32>> {
        let mut counts = BTreeMap::new();
        for category in Category::ALL {
            let count = database::tournaments::count_completed(conn, season, category, Tier::Ce1)?;
            counts.insert(category, count);
        }
        Ok(counts)
    }
}
