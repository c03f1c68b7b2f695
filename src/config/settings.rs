use std::collections::BTreeMap;

use crate::domain::Category;

pub struct RankingSettings {
    /// Per-season-age multipliers; index 0 is the reference season.
    /// Contributions older than the window length are ignored entirely.
    pub decay: [f64; 4],
    /// Completed CE1 tournaments each category needs before its
    /// sub-season can close. The national calendar runs one per
    /// category; a category missing from the map expects 1.
    pub expected_ce1_tournaments: BTreeMap<Category, u32>,
    /// Aggregate CE1+CE2 points per coefficient increment step.
    pub coefficient_points_per_step: u32,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            decay: [1.0, 0.8, 0.5, 0.2],
            expected_ce1_tournaments: Category::ALL.into_iter().map(|c| (c, 1)).collect(),
            coefficient_points_per_step: 500,
        }
    }
}

pub struct AppConfig {
    pub ranking: RankingSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            ranking: RankingSettings::default(),
        }
    }
}
