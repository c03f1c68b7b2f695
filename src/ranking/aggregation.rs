use std::collections::{BTreeMap, HashSet};

use log::info;

use crate::domain::{Category, CategoryTotals, RawResult, Season, SeasonPoints};

use super::points::PointTableSet;
use super::types::Diagnostic;

/// Folds one season's raw finishing positions into per-team, per-category
/// totals. Pure and deterministic: identical input yields byte-identical
/// output, so the season_points cache can be rebuilt at any time.
///
/// Rows referencing a team outside the directory are skipped with a
/// diagnostic. Stored awarded points that disagree with the configured
/// point table are still summed as stored but flagged for audit.
pub fn aggregate_season(
    season: Season,
    results: &[RawResult],
    known_teams: &HashSet<i64>,
    tables: &PointTableSet,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<SeasonPoints> {
    let mut by_team: BTreeMap<i64, BTreeMap<Category, CategoryTotals>> = BTreeMap::new();

    for result in results {
        if !known_teams.contains(&result.team_id) {
            diagnostics.push(Diagnostic::UnknownTeam {
                team_id: result.team_id,
                tournament_id: result.tournament_id,
            });
            continue;
        }

        audit_awarded_points(result, tables, diagnostics);

        let totals = by_team
            .entry(result.team_id)
            .or_default()
            .entry(result.category())
            .or_insert(CategoryTotals {
                points: 0,
                tournaments_played: 0,
                best_position: u32::MAX,
            });

        totals.points += result.awarded_points;
        totals.tournaments_played += 1;
        totals.best_position = totals.best_position.min(result.position);
    }

    let rows: Vec<SeasonPoints> = by_team
        .into_iter()
        .map(|(team_id, totals)| SeasonPoints {
            team_id,
            season,
            totals,
        })
        .collect();

    info!(
        "Aggregated {} results into {} team rows for season {}",
        results.len(),
        rows.len(),
        season
    );

    rows
}

fn audit_awarded_points(
    result: &RawResult,
    tables: &PointTableSet,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let resolved = tables.resolve(result.tier, result.position);
    if resolved != result.awarded_points {
        diagnostics.push(Diagnostic::PointsMismatch {
            team_id: result.team_id,
            tournament_id: result.tournament_id,
            tier: result.tier,
            position: result.position,
            stored: result.awarded_points,
            resolved,
        });
    }
}
