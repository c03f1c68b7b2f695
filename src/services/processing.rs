use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::AppConfig;
use crate::database::{self, DbConn};
use crate::domain::{RankingScope, Season, SeasonPoints};
use crate::ranking;

use super::database_path;

/// Runs the aggregate -> rank -> delta pipeline for one season. Each
/// stage's output is replaced wholesale, so re-running a season is
/// idempotent and independent of every other season.
pub struct ProcessingService {
    config: AppConfig,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, season: Season) -> Result<()> {
        let pool = database::create_pool(&database_path())?;
        let mut conn = database::get_connection(&pool)?;

        info!("=== Processing season {} ===", season);
        self.process_season(&mut conn, season)?;
        info!("=== Season {} processed ===", season);
        Ok(())
    }

    /// Historical recomputation, oldest season first so each season's
    /// delta baseline is already refreshed when its successor runs.
    /// Seasons are independent; a failed run resumes from the season
    /// that broke.
    pub fn rebuild(&self, from: Season, to: Season) -> Result<()> {
        if from > to {
            anyhow::bail!("Rebuild range is inverted: {} > {}", from, to);
        }

        let pool = database::create_pool(&database_path())?;
        let mut conn = database::get_connection(&pool)?;

        let mut season = from;
        while season <= to {
            info!("=== Rebuilding season {} ===", season);
            self.process_season(&mut conn, season)
                .with_context(|| format!("Rebuild stopped at season {season}"))?;
            season = season.next();
        }

        info!("=== Rebuild complete ({} through {}) ===", from, to);
        Ok(())
    }

    fn process_season(&self, conn: &mut DbConn, season: Season) -> Result<()> {
        let rows = self.aggregate(conn, season)?;
        database::season_points::replace_for_season(conn, season, &rows)?;
        info!("  → Replaced season_points cache ({} teams)", rows.len());

        let history = self.load_window(conn, season, rows)?;
        self.rank_all_scopes(conn, season, &history)?;
        info!("  → Replaced ranking snapshots for all scopes");

        Ok(())
    }

    fn aggregate(&self, conn: &mut DbConn, season: Season) -> Result<Vec<SeasonPoints>> {
        let tables = database::point_tables::load_tables(conn)?;
        let known_teams = database::teams::list_ids(conn)?;
        let results = database::results::list_by_season(conn, season)?;
        info!("  → Loaded {} results for season {}", results.len(), season);

        let mut diagnostics = Vec::new();
        let rows = ranking::aggregate_season(season, &results, &known_teams, &tables, &mut diagnostics);

        for diagnostic in &diagnostics {
            warn!("  {diagnostic}");
        }

        Ok(rows)
    }

    /// Assembles the fixed 4-season window: the freshly aggregated
    /// reference season plus its three predecessors as cached.
    fn load_window(
        &self,
        conn: &mut DbConn,
        season: Season,
        reference_rows: Vec<SeasonPoints>,
    ) -> Result<[Vec<SeasonPoints>; 4]> {
        let window = season.window();
        Ok([
            reference_rows,
            database::season_points::list_by_season(conn, window[1])?,
            database::season_points::list_by_season(conn, window[2])?,
            database::season_points::list_by_season(conn, window[3])?,
        ])
    }

    fn rank_all_scopes(
        &self,
        conn: &mut DbConn,
        season: Season,
        history: &[Vec<SeasonPoints>; 4],
    ) -> Result<()> {
        for scope in RankingScope::all() {
            let mut rows = ranking::compute_ranking(season, scope, history, &self.config.ranking);

            // Deltas come from the stored snapshot only; the previous
            // season's window was fixed when it was computed.
            let previous = database::rankings::list_scope(conn, season.prev(), scope)?;
            ranking::apply_deltas(&mut rows, &previous);

            database::rankings::replace_scope(conn, season, scope, &rows)?;
        }
        Ok(())
    }
}
