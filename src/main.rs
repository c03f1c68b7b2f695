use anyhow::Result;

use ultimate_ranking::cli::Command;
use ultimate_ranking::{
    handle_add_team, handle_add_tournament, handle_coefficient, handle_detect, handle_init,
    handle_process, handle_rank, handle_rebuild, handle_record_result, handle_set_points,
    handle_set_region, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Init => handle_init(),
        Command::Process { season } => handle_process(season),
        Command::Rebuild { from, to } => handle_rebuild(from, to),
        Command::Rank { season, scope, json } => handle_rank(season, scope, *json),
        Command::Coefficient { region, season } => handle_coefficient(region, season),
        Command::Detect { season } => handle_detect(season),
        Command::SetPoints { tier, points } => handle_set_points(tier, points),
        Command::SetRegion {
            code,
            name,
            floor,
            ceiling,
            increment,
        } => handle_set_region(code, name, *floor, *ceiling, *increment),
        Command::AddTeam { id, name, region } => handle_add_team(*id, name, region.as_deref()),
        Command::AddTournament {
            id,
            name,
            tier,
            year,
            category,
            completed,
        } => handle_add_tournament(*id, name, tier, *year, category, *completed),
        Command::RecordResult {
            team,
            tournament,
            position,
        } => handle_record_result(*team, *tournament, *position),
    }
}
