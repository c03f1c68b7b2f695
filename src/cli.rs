use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "national ultimate ranking engine")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Initialize a fresh database schema (destroys existing data)
    Init,
    /// Run the full pipeline for one season: aggregate, rank, deltas
    Process {
        /// Season label, e.g. 2024-25
        #[arg(short, long)]
        season: String,
    },
    /// Recompute a range of seasons, oldest first
    Rebuild {
        /// First season to recompute, e.g. 2021-22
        #[arg(long)]
        from: String,
        /// Last season to recompute, e.g. 2024-25
        #[arg(long)]
        to: String,
    },
    /// Print a stored ranking snapshot
    Rank {
        /// Season label, e.g. 2024-25
        #[arg(short, long)]
        season: String,
        /// Scope: a category (beach_mixed), global, or subupdate_1..4
        #[arg(short = 'c', long, default_value = "global")]
        scope: String,
        /// Emit JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Compute a region's strength coefficient for a season
    Coefficient {
        /// Region code, e.g. MAD
        #[arg(short, long)]
        region: String,
        /// Season label, e.g. 2024-25
        #[arg(short, long)]
        season: String,
    },
    /// Run the season/sub-season lifecycle detector
    Detect {
        /// Season label, e.g. 2024-25
        #[arg(short, long)]
        season: String,
    },
    /// Replace the points-per-position table for a tier
    SetPoints {
        /// Tier: CE1, CE2 or REGIONAL
        #[arg(short, long)]
        tier: String,
        /// Points for positions 1..N, strictly decreasing
        #[arg(required = true)]
        points: Vec<u32>,
    },
    /// Create or update a region's coefficient configuration
    SetRegion {
        /// Region code, e.g. MAD
        #[arg(short, long)]
        code: String,
        /// Region display name
        #[arg(short, long)]
        name: String,
        #[arg(long)]
        floor: f64,
        #[arg(long)]
        ceiling: f64,
        #[arg(long)]
        increment: f64,
    },
    /// Register a team in the directory
    AddTeam {
        #[arg(long)]
        id: i64,
        #[arg(short, long)]
        name: String,
        /// Region code the team belongs to
        #[arg(short, long)]
        region: Option<String>,
    },
    /// Register a tournament on the calendar
    AddTournament {
        #[arg(long)]
        id: i64,
        #[arg(short, long)]
        name: String,
        /// Tier: CE1, CE2 or REGIONAL
        #[arg(short, long)]
        tier: String,
        /// Starting calendar year of the season
        #[arg(short, long)]
        year: i32,
        /// Category, e.g. beach_mixed
        #[arg(short, long)]
        category: String,
        /// Mark the tournament as completed
        #[arg(long, default_value_t = false)]
        completed: bool,
    },
    /// Record one team's finishing position in a tournament
    RecordResult {
        #[arg(long)]
        team: i64,
        #[arg(long)]
        tournament: i64,
        /// Finishing position, 1-based
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        position: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_result_rejects_position_zero() {
        let parsed = Cli::try_parse_from([
            "ultimate_ranking",
            "record-result",
            "--team",
            "1",
            "--tournament",
            "5",
            "--position",
            "0",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn record_result_accepts_first_place() {
        let parsed = Cli::try_parse_from([
            "ultimate_ranking",
            "record-result",
            "--team",
            "1",
            "--tournament",
            "5",
            "--position",
            "1",
        ])
        .unwrap();
        assert_eq!(
            parsed.command,
            Command::RecordResult {
                team: 1,
                tournament: 5,
                position: 1,
            }
        );
    }
}
