pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod ranking;
pub mod services;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::domain::{Category, RankingScope, RawResult, Season, Tier};
use crate::ranking::RegionConfig;
use crate::services::database_path;
use crate::services::detection::DetectionService;
use crate::services::processing::ProcessingService;
use crate::services::regional::RegionalService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_init() -> Result<()> {
    let pool = database::create_pool(&database_path())?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::init_database(&mut conn)
}

pub fn handle_process(season: &str) -> Result<()> {
    let season: Season = season.parse()?;
    let service = ProcessingService::new(AppConfig::new());
    service.run(season)
}

pub fn handle_rebuild(from: &str, to: &str) -> Result<()> {
    let from: Season = from.parse()?;
    let to: Season = to.parse()?;
    let service = ProcessingService::new(AppConfig::new());
    service.rebuild(from, to)
}

pub fn handle_rank(season: &str, scope: &str, json: bool) -> Result<()> {
    let season: Season = season.parse()?;
    let scope: RankingScope = scope.parse()?;

    let pool = database::create_pool(&database_path())?;
    let mut conn = database::get_connection(&pool)?;
    let rows = database::rankings::list_scope(&mut conn, season, scope)?;

    services::reporting::print_ranking(season, scope, &rows, json)
}

pub fn handle_coefficient(region: &str, season: &str) -> Result<()> {
    let season: Season = season.parse()?;
    let service = RegionalService::new(AppConfig::new());
    let value = service.coefficient(region, season)?;
    println!("{value:.2}");
    Ok(())
}

pub fn handle_detect(season: &str) -> Result<()> {
    let season: Season = season.parse()?;
    let service = DetectionService::new(AppConfig::new());
    let state = service.run(season)?;

    for sub in crate::domain::SubSeason::ALL {
        let status = if state.is_complete(sub) { "complete" } else { "pending" };
        println!("subseason_{}: {status}", sub.number());
    }
    println!(
        "season: {}",
        if state.season_complete() { "complete" } else { "pending" }
    );
    Ok(())
}

pub fn handle_set_points(tier: &str, points: &[u32]) -> Result<()> {
    let tier: Tier = tier.parse()?;
    let pool = database::create_pool(&database_path())?;
    let mut conn = database::get_connection(&pool)?;
    database::point_tables::replace_table(&mut conn, tier, points)
}

pub fn handle_set_region(
    code: &str,
    name: &str,
    floor: f64,
    ceiling: f64,
    increment: f64,
) -> Result<()> {
    let pool = database::create_pool(&database_path())?;
    let mut conn = database::get_connection(&pool)?;
    let config = RegionConfig {
        floor,
        ceiling,
        increment,
    };
    database::regions::upsert_region(&mut conn, code, name, config)?;
    Ok(())
}

pub fn handle_add_team(id: i64, name: &str, region: Option<&str>) -> Result<()> {
    let pool = database::create_pool(&database_path())?;
    let mut conn = database::get_connection(&pool)?;
    database::teams::upsert_team(&mut conn, id, name, region)?;
    Ok(())
}

pub fn handle_add_tournament(
    id: i64,
    name: &str,
    tier: &str,
    year: i32,
    category: &str,
    completed: bool,
) -> Result<()> {
    let tier: Tier = tier.parse()?;
    let category: Category = category.parse()?;

    let pool = database::create_pool(&database_path())?;
    let mut conn = database::get_connection(&pool)?;
    database::tournaments::upsert_tournament(&mut conn, id, name, tier, year, category, completed)?;
    Ok(())
}

/// Records a finishing position; awarded points resolve from the
/// configured table at entry time and are stored redundantly on the row.
pub fn handle_record_result(team: i64, tournament: i64, position: u32) -> Result<()> {
    if position == 0 {
        bail!("Finishing positions are 1-based; got 0");
    }

    let pool = database::create_pool(&database_path())?;
    let mut conn = database::get_connection(&pool)?;

    let tournament = database::tournaments::find_by_id(&mut conn, tournament)?
        .with_context(|| format!("Unknown tournament: {tournament}"))?;
    let tables = database::point_tables::load_tables(&mut conn)?;

    let result = RawResult {
        team_id: team,
        tournament_id: tournament.id,
        tier: tournament.tier,
        year: tournament.year,
        surface: tournament.surface,
        modality: tournament.modality,
        position,
        awarded_points: tables.resolve(tournament.tier, position),
    };

    database::results::insert_result(&mut conn, &result)
}
