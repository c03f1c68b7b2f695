use std::collections::HashSet;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::domain::RawResult;

/// Per-region coefficient bounds, owned as administrative configuration.
/// Validated when written; the calculator assumes a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub floor: f64,
    pub ceiling: f64,
    pub increment: f64,
}

impl RegionConfig {
    /// Write-time validation. `floor < ceiling` and a positive increment
    /// are preconditions of the calculator, never re-checked there.
    pub fn validate(&self) -> Result<()> {
        if self.floor >= self.ceiling {
            bail!(
                "Region floor {} must be below ceiling {}",
                self.floor,
                self.ceiling
            );
        }
        if self.increment <= 0.0 {
            bail!("Region increment must be positive, got {}", self.increment);
        }
        Ok(())
    }
}

/// Sums a region's national-tier (CE1+CE2) points for a season.
/// REGIONAL results are excluded: they measure the within-region
/// strength this coefficient corrects for.
pub fn aggregate_national_points(results: &[RawResult], region_teams: &HashSet<i64>) -> u32 {
    results
        .iter()
        .filter(|r| r.tier.is_national() && region_teams.contains(&r.team_id))
        .map(|r| r.awarded_points)
        .sum()
}

/// Maps aggregate national points to a strength multiplier: one
/// increment per full step of points above zero, clamped to the
/// configured bounds. Monotonic non-decreasing by construction.
pub fn compute_coefficient(config: &RegionConfig, aggregate_points: u32, points_per_step: u32) -> f64 {
    let steps = aggregate_points / points_per_step.max(1);
    let raw = config.floor + f64::from(steps) * config.increment;
    raw.min(config.ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Modality, Surface, Tier};

    fn config() -> RegionConfig {
        RegionConfig {
            floor: 0.8,
            ceiling: 1.2,
            increment: 0.01,
        }
    }

    fn result(team_id: i64, tier: Tier, points: u32) -> RawResult {
        RawResult {
            team_id,
            tournament_id: 1,
            tier,
            year: 2024,
            surface: Surface::Grass,
            modality: Modality::Open,
            position: 1,
            awarded_points: points,
        }
    }

    #[test]
    fn zero_aggregate_yields_exact_floor() {
        assert_eq!(compute_coefficient(&config(), 0, 500), 0.8);
    }

    #[test]
    fn huge_aggregate_clamps_to_exact_ceiling() {
        assert_eq!(compute_coefficient(&config(), u32::MAX, 500), 1.2);
    }

    #[test]
    fn coefficient_is_monotonic_in_aggregate() {
        let cfg = config();
        let mut last = 0.0;
        for points in (0..20_000).step_by(250) {
            let value = compute_coefficient(&cfg, points, 500);
            assert!(value >= last);
            assert!((cfg.floor..=cfg.ceiling).contains(&value));
            last = value;
        }
    }

    #[test]
    fn steps_accumulate_below_ceiling() {
        // 1250 points at 500 per step is two full steps.
        let value = compute_coefficient(&config(), 1250, 500);
        assert!((value - 0.82).abs() < 1e-9);
    }

    #[test]
    fn regional_results_do_not_count() {
        let region: HashSet<i64> = [1, 2].into_iter().collect();
        let results = vec![
            result(1, Tier::Ce1, 1000),
            result(2, Tier::Ce2, 400),
            result(1, Tier::Regional, 9999),
            result(3, Tier::Ce1, 850), // not in region
        ];
        assert_eq!(aggregate_national_points(&results, &region), 1400);
    }

    #[test]
    fn rejects_malformed_config() {
        let inverted = RegionConfig {
            floor: 1.2,
            ceiling: 0.8,
            increment: 0.01,
        };
        assert!(inverted.validate().is_err());

        let flat = RegionConfig {
            floor: 1.0,
            ceiling: 1.0,
            increment: 0.01,
        };
        assert!(flat.validate().is_err());

        let negative = RegionConfig {
            floor: 0.8,
            ceiling: 1.2,
            increment: -0.5,
        };
        assert!(negative.validate().is_err());
    }
}
