pub mod detection;
pub mod processing;
pub mod regional;
pub mod reporting;

/// Single database file shared by every command, overridable for tests
/// and deployments.
pub fn database_path() -> String {
    std::env::var("DATABASE_PATH").unwrap_or_else(|_| "ultimate_ranking.db".to_string())
}
