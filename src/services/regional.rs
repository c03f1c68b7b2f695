use anyhow::{Context, Result};
use log::info;

use crate::config::AppConfig;
use crate::database;
use crate::domain::Season;
use crate::ranking;

use super::database_path;

/// Computes a region's strength coefficient for one season from its
/// teams' national-tier results.
pub struct RegionalService {
    config: AppConfig,
}

impl RegionalService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn coefficient(&self, region_code: &str, season: Season) -> Result<f64> {
        let pool = database::create_pool(&database_path())?;
        let mut conn = database::get_connection(&pool)?;

        let region = database::regions::find_by_code(&mut conn, region_code)?
            .with_context(|| format!("No configuration for region {region_code}"))?;

        let region_teams = database::teams::list_ids_by_region(&mut conn, region_code)?;
        let results = database::results::list_by_season(&mut conn, season)?;

        let aggregate = ranking::coefficient::aggregate_national_points(&results, &region_teams);
        let value = ranking::compute_coefficient(
            &region.config,
            aggregate,
            self.config.ranking.coefficient_points_per_step,
        );

        info!(
            "Region {} season {}: {} national points from {} teams → coefficient {:.2}",
            region.code,
            season,
            aggregate,
            region_teams.len(),
            value
        );

        Ok(value)
    }
}
