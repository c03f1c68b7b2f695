use std::collections::HashMap;

use crate::domain::RankingRow;

/// Fills in signed position and points changes on a freshly computed
/// ranking by joining it against the previous season's persisted
/// snapshot for the same scope. Positive position change means the team
/// rose. Teams with no previous row keep both deltas at 0.
///
/// The previous ranking is always the stored snapshot, never re-derived:
/// its weighting window was fixed when it was computed and must not
/// drift if older raw data is edited later.
pub fn apply_deltas(current: &mut [RankingRow], previous: &[RankingRow]) {
    let baseline: HashMap<i64, (u32, f64)> = previous
        .iter()
        .map(|row| (row.team_id, (row.rank, row.weighted_points)))
        .collect();

    for row in current.iter_mut() {
        match baseline.get(&row.team_id) {
            Some(&(prev_rank, prev_points)) => {
                row.position_change = prev_rank as i32 - row.rank as i32;
                row.points_change = row.weighted_points - prev_points;
            }
            None => {
                row.position_change = 0;
                row.points_change = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(team_id: i64, rank: u32, points: f64) -> RankingRow {
        RankingRow {
            team_id,
            rank,
            weighted_points: points,
            position_change: 0,
            points_change: 0.0,
        }
    }

    #[test]
    fn rising_team_gets_positive_change() {
        let mut current = vec![row(1, 3, 1500.0)];
        let previous = vec![row(1, 5, 1200.0)];

        apply_deltas(&mut current, &previous);

        assert_eq!(current[0].position_change, 2);
        assert_eq!(current[0].points_change, 300.0);
    }

    #[test]
    fn falling_team_gets_negative_change() {
        let mut current = vec![row(1, 8, 900.0)];
        let previous = vec![row(1, 2, 1600.0)];

        apply_deltas(&mut current, &previous);

        assert_eq!(current[0].position_change, -6);
        assert_eq!(current[0].points_change, -700.0);
    }

    #[test]
    fn new_entrant_shows_no_change() {
        let mut current = vec![row(42, 1, 2000.0)];
        let previous = vec![row(1, 1, 1800.0)];

        apply_deltas(&mut current, &previous);

        assert_eq!(current[0].position_change, 0);
        assert_eq!(current[0].points_change, 0.0);
    }

    #[test]
    fn empty_previous_snapshot_zeroes_everything() {
        let mut current = vec![row(1, 1, 1000.0), row(2, 2, 800.0)];

        apply_deltas(&mut current, &[]);

        for r in &current {
            assert_eq!(r.position_change, 0);
            assert_eq!(r.points_change, 0.0);
        }
    }
}
