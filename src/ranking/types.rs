use std::fmt;

use crate::domain::Tier;

/// Soft failure collected during a computation. None of these abort a
/// run; the affected row is skipped or kept as-is and the pipeline
/// continues with partial results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A result references a team the directory cannot resolve.
    UnknownTeam { team_id: i64, tournament_id: i64 },
    /// Stored awarded points disagree with the configured point table.
    PointsMismatch {
        team_id: i64,
        tournament_id: i64,
        tier: Tier,
        position: u32,
        stored: u32,
        resolved: u32,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownTeam {
                team_id,
                tournament_id,
            } => write!(
                f,
                "Result in tournament {tournament_id} references unknown team {team_id}; row skipped"
            ),
            Diagnostic::PointsMismatch {
                team_id,
                tournament_id,
                tier,
                position,
                stored,
                resolved,
            } => write!(
                f,
                "Team {team_id} in tournament {tournament_id}: stored {stored} points \
                 but {tier} table resolves position {position} to {resolved}"
            ),
        }
    }
}
