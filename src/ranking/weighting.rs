use std::collections::BTreeMap;

use log::info;

use crate::config::RankingSettings;
use crate::domain::{Category, RankingRow, RankingScope, Season, SeasonPoints};

/// Combines up to four seasons of base points into one ordered ranking
/// for the given scope. `history[k]` holds the season_points rows of the
/// season k seasons older than the reference; a team absent from a
/// season simply contributes 0 for it.
///
/// Ties on weighted points break by ascending team identifier, so reruns
/// are stable. Rank is dense, starting at 1; teams whose whole window
/// sums to zero are omitted.
pub fn compute_ranking(
    reference: Season,
    scope: RankingScope,
    history: &[Vec<SeasonPoints>; 4],
    settings: &RankingSettings,
) -> Vec<RankingRow> {
    let mut weighted: BTreeMap<i64, f64> = BTreeMap::new();

    for (age, rows) in history.iter().enumerate() {
        let decay = settings.decay[age];
        for row in rows {
            let base = base_points(row, scope);
            if base > 0 {
                *weighted.entry(row.team_id).or_insert(0.0) += f64::from(base) * decay;
            }
        }
    }

    let mut entries: Vec<(i64, f64)> = weighted
        .into_iter()
        .filter(|&(_, points)| points > 0.0)
        .collect();

    // Descending points; ascending team id settles ties deterministically.
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let rows = assign_dense_ranks(entries);
    info!(
        "Ranked {} teams for season {} scope {}",
        rows.len(),
        reference,
        scope
    );
    rows
}

/// Base points a season_points row contributes under a scope: one
/// category, all six, or the cumulative categories published up to a
/// sub-update checkpoint.
fn base_points(row: &SeasonPoints, scope: RankingScope) -> u32 {
    match scope {
        RankingScope::Category(category) => row.points_in(category),
        RankingScope::Global => row.total_points(),
        RankingScope::SubUpdate(sub) => scope_categories_through(sub.number())
            .map(|category| row.points_in(category))
            .sum(),
    }
}

/// Categories covered by sub-updates 1..=n, in sub-season order.
fn scope_categories_through(n: u8) -> impl Iterator<Item = Category> {
    crate::domain::SubSeason::ALL
        .into_iter()
        .filter(move |sub| sub.number() <= n)
        .flat_map(|sub| sub.categories().iter().copied())
}

fn assign_dense_ranks(entries: Vec<(i64, f64)>) -> Vec<RankingRow> {
    let mut rows = Vec::with_capacity(entries.len());
    let mut rank = 0u32;
    let mut last_points: Option<f64> = None;

    for (team_id, weighted_points) in entries {
        if last_points != Some(weighted_points) {
            rank += 1;
            last_points = Some(weighted_points);
        }
        rows.push(RankingRow {
            team_id,
            rank,
            weighted_points,
            position_change: 0,
            points_change: 0.0,
        });
    }

    rows
}
