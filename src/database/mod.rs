pub mod connection;
pub mod lifecycle;
pub mod models;
pub mod point_tables;
pub mod rankings;
pub mod regions;
pub mod results;
pub mod season_points;
pub mod setup;
pub mod teams;
pub mod tournaments;

pub use connection::{DbConn, DbPool, create_pool, get_connection};
pub use models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Category, LifecycleState, Notification, NotificationKind, RankingRow, RankingScope,
        RawResult, Season, SubSeason, Tier,
    };
    use crate::ranking::RegionConfig;
    use r2d2_sqlite::SqliteConnectionManager;

    // Single-connection pool so every call sees the same in-memory db.
    fn test_pool() -> DbPool {
        let manager = SqliteConnectionManager::memory();
        let pool = r2d2::Pool::builder().max_size(1).build(manager).unwrap();
        let mut conn = pool.get().unwrap();
        setup::init_database(&mut conn).unwrap();
        pool
    }

    #[test]
    fn ranking_snapshot_replace_and_read_back() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();
        let season = Season::new(2024);
        let scope = RankingScope::Category(Category::BeachMixed);

        let rows = vec![
            RankingRow {
                team_id: 2,
                rank: 1,
                weighted_points: 1680.0,
                position_change: 1,
                points_change: 120.0,
            },
            RankingRow {
                team_id: 1,
                rank: 2,
                weighted_points: 900.0,
                position_change: -1,
                points_change: -50.0,
            },
        ];

        rankings::replace_scope(&mut conn, season, scope, &rows).unwrap();
        let loaded = rankings::list_scope(&mut conn, season, scope).unwrap();
        assert_eq!(loaded, rows);

        // Replacement is wholesale: a second write leaves no stale rows.
        rankings::replace_scope(&mut conn, season, scope, &rows[..1]).unwrap();
        let loaded = rankings::list_scope(&mut conn, season, scope).unwrap();
        assert_eq!(loaded.len(), 1);

        // Other scopes are untouched and simply empty.
        let other = rankings::list_scope(&mut conn, season, RankingScope::Global).unwrap();
        assert!(other.is_empty());
    }

    #[test]
    fn results_round_trip_by_season() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();

        teams::upsert_team(&mut conn, 1, "Madrid Ultimate", None).unwrap();
        let tournament = tournaments::upsert_tournament(
            &mut conn,
            5,
            "CE1 Beach Mixed",
            Tier::Ce1,
            2024,
            Category::BeachMixed,
            true,
        )
        .unwrap();
        assert!(tournament.completed);
        assert_eq!(
            tournaments::count_completed(&mut conn, Season::new(2024), Category::BeachMixed, Tier::Ce1)
                .unwrap(),
            1
        );

        let result = RawResult {
            team_id: 1,
            tournament_id: 5,
            tier: Tier::Ce1,
            year: 2024,
            surface: crate::domain::Surface::Beach,
            modality: crate::domain::Modality::Mixed,
            position: 1,
            awarded_points: 1000,
        };

        results::insert_result(&mut conn, &result).unwrap();
        let loaded = results::list_by_season(&mut conn, Season::new(2024)).unwrap();
        assert_eq!(loaded, vec![result]);

        let other = results::list_by_season(&mut conn, Season::new(2023)).unwrap();
        assert!(other.is_empty());
    }

    #[test]
    fn point_table_write_validates() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();

        assert!(point_tables::replace_table(&mut conn, Tier::Ce1, &[1000, 1000]).is_err());

        point_tables::replace_table(&mut conn, Tier::Ce1, &[1000, 850, 725]).unwrap();
        let tables = point_tables::load_tables(&mut conn).unwrap();
        assert_eq!(tables.resolve(Tier::Ce1, 2), 850);
        assert_eq!(tables.resolve(Tier::Ce1, 9), 0);
    }

    #[test]
    fn region_write_validates() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();

        let bad = RegionConfig {
            floor: 1.2,
            ceiling: 0.8,
            increment: 0.01,
        };
        assert!(regions::upsert_region(&mut conn, "MAD", "Madrid", bad).is_err());

        let good = RegionConfig {
            floor: 0.8,
            ceiling: 1.2,
            increment: 0.01,
        };
        let region = regions::upsert_region(&mut conn, "MAD", "Madrid", good).unwrap();
        assert_eq!(region.config, good);

        let found = regions::find_by_code(&mut conn, "MAD").unwrap().unwrap();
        assert_eq!(found.config.floor, 0.8);
    }

    #[test]
    fn lifecycle_transition_commits_flags_with_notifications() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();
        let season = Season::new(2024);

        let fresh = lifecycle::get_state(&mut conn, season).unwrap();
        assert_eq!(fresh, LifecycleState::pending(season));

        let mut state = fresh;
        state.completed[0] = true;
        let notification = Notification {
            season,
            kind: NotificationKind::SubSeasonComplete(SubSeason::First),
        };

        let recorded =
            lifecycle::commit_transition(&mut conn, &state, std::slice::from_ref(&notification))
                .unwrap();
        assert_eq!(recorded, vec![true]);
        assert_eq!(lifecycle::get_state(&mut conn, season).unwrap(), state);

        // Replaying the same transition leaves state intact and the
        // notification deduplicated, never re-emitted.
        let recorded =
            lifecycle::commit_transition(&mut conn, &state, std::slice::from_ref(&notification))
                .unwrap();
        assert_eq!(recorded, vec![false]);
        assert_eq!(lifecycle::get_state(&mut conn, season).unwrap(), state);
    }
}
