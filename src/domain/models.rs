use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use super::season::Season;

/// Tournament level. CE1/CE2 are the national divisions; REGIONAL events
/// only measure within-region strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Ce1,
    Ce2,
    Regional,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Ce1, Tier::Ce2, Tier::Regional];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Ce1 => "CE1",
            Tier::Ce2 => "CE2",
            Tier::Regional => "REGIONAL",
        }
    }

    /// National divisions feed the regional strength coefficient.
    pub fn is_national(&self) -> bool {
        matches!(self, Tier::Ce1 | Tier::Ce2)
    }
}

impl FromStr for Tier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_uppercase().as_str() {
            "CE1" => Ok(Tier::Ce1),
            "CE2" => Ok(Tier::Ce2),
            "REGIONAL" => Ok(Tier::Regional),
            other => bail!("Unknown tier: {other}"),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Surface {
    Beach,
    Grass,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Beach => "BEACH",
            Surface::Grass => "GRASS",
        }
    }
}

impl FromStr for Surface {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_uppercase().as_str() {
            "BEACH" => Ok(Surface::Beach),
            "GRASS" => Ok(Surface::Grass),
            other => bail!("Unknown surface: {other}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    Open,
    Women,
    Mixed,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Open => "OPEN",
            Modality::Women => "WOMEN",
            Modality::Mixed => "MIXED",
        }
    }
}

impl FromStr for Modality {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_uppercase().as_str() {
            "OPEN" => Ok(Modality::Open),
            "WOMEN" => Ok(Modality::Women),
            "MIXED" => Ok(Modality::Mixed),
            other => bail!("Unknown modality: {other}"),
        }
    }
}

/// The six competition categories: surface x modality. A closed
/// enumeration, never a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BeachOpen,
    BeachWomen,
    BeachMixed,
    GrassOpen,
    GrassWomen,
    GrassMixed,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::BeachOpen,
        Category::BeachWomen,
        Category::BeachMixed,
        Category::GrassOpen,
        Category::GrassWomen,
        Category::GrassMixed,
    ];

    pub fn new(surface: Surface, modality: Modality) -> Self {
        match (surface, modality) {
            (Surface::Beach, Modality::Open) => Category::BeachOpen,
            (Surface::Beach, Modality::Women) => Category::BeachWomen,
            (Surface::Beach, Modality::Mixed) => Category::BeachMixed,
            (Surface::Grass, Modality::Open) => Category::GrassOpen,
            (Surface::Grass, Modality::Women) => Category::GrassWomen,
            (Surface::Grass, Modality::Mixed) => Category::GrassMixed,
        }
    }

    pub fn surface(&self) -> Surface {
        match self {
            Category::BeachOpen | Category::BeachWomen | Category::BeachMixed => Surface::Beach,
            Category::GrassOpen | Category::GrassWomen | Category::GrassMixed => Surface::Grass,
        }
    }

    pub fn modality(&self) -> Modality {
        match self {
            Category::BeachOpen | Category::GrassOpen => Modality::Open,
            Category::BeachWomen | Category::GrassWomen => Modality::Women,
            Category::BeachMixed | Category::GrassMixed => Modality::Mixed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BeachOpen => "beach_open",
            Category::BeachWomen => "beach_women",
            Category::BeachMixed => "beach_mixed",
            Category::GrassOpen => "grass_open",
            Category::GrassWomen => "grass_women",
            Category::GrassMixed => "grass_mixed",
        }
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "beach_open" => Ok(Category::BeachOpen),
            "beach_women" => Ok(Category::BeachWomen),
            "beach_mixed" => Ok(Category::BeachMixed),
            "grass_open" => Ok(Category::GrassOpen),
            "grass_women" => Ok(Category::GrassWomen),
            "grass_mixed" => Ok(Category::GrassMixed),
            other => bail!("Unknown category: {other}"),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four fixed publication phases within a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubSeason {
    First,
    Second,
    Third,
    Fourth,
}

impl SubSeason {
    pub const ALL: [SubSeason; 4] = [
        SubSeason::First,
        SubSeason::Second,
        SubSeason::Third,
        SubSeason::Fourth,
    ];

    pub fn number(&self) -> u8 {
        match self {
            SubSeason::First => 1,
            SubSeason::Second => 2,
            SubSeason::Third => 3,
            SubSeason::Fourth => 4,
        }
    }

    pub fn from_number(n: u8) -> anyhow::Result<Self> {
        match n {
            1 => Ok(SubSeason::First),
            2 => Ok(SubSeason::Second),
            3 => Ok(SubSeason::Third),
            4 => Ok(SubSeason::Fourth),
            other => bail!("Sub-season number out of range: {other}"),
        }
    }

    pub fn index(&self) -> usize {
        self.number() as usize - 1
    }

    /// Categories whose top-tier calendar must close for this sub-season
    /// to complete. Multi-category sub-seasons require all of them.
    pub fn categories(&self) -> &'static [Category] {
        match self {
            SubSeason::First => &[Category::BeachMixed],
            SubSeason::Second => &[Category::BeachOpen, Category::BeachWomen],
            SubSeason::Third => &[Category::GrassMixed],
            SubSeason::Fourth => &[Category::GrassOpen, Category::GrassWomen],
        }
    }
}

/// One team's finishing position in one tournament. Immutable once the
/// tournament is closed; awarded points are stored redundantly for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    pub team_id: i64,
    pub tournament_id: i64,
    pub tier: Tier,
    pub year: i32,
    pub surface: Surface,
    pub modality: Modality,
    pub position: u32,
    pub awarded_points: u32,
}

impl RawResult {
    pub fn category(&self) -> Category {
        Category::new(self.surface, self.modality)
    }

    pub fn season(&self) -> Season {
        Season::new(self.year)
    }
}

/// Per-category accumulation within one team's season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub points: u32,
    pub tournaments_played: u32,
    pub best_position: u32,
}

/// Materialized per-team season totals, one entry per category the team
/// actually played. Fully derived from RawResult, replaced wholesale on
/// every aggregation, never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonPoints {
    pub team_id: i64,
    pub season: Season,
    pub totals: BTreeMap<Category, CategoryTotals>,
}

impl SeasonPoints {
    pub fn points_in(&self, category: Category) -> u32 {
        self.totals.get(&category).map_or(0, |t| t.points)
    }

    /// Sum across all six categories, the base for the global ranking.
    pub fn total_points(&self) -> u32 {
        self.totals.values().map(|t| t.points).sum()
    }
}

/// The unit a ranking is computed for: one category, the combined global
/// ranking, or one of the four incremental global sub-updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RankingScope {
    Category(Category),
    Global,
    SubUpdate(SubSeason),
}

impl RankingScope {
    /// All scopes recomputed per season: six categories, the global
    /// ranking, and the four sub-update snapshots.
    pub fn all() -> Vec<RankingScope> {
        let mut scopes: Vec<RankingScope> = Category::ALL
            .into_iter()
            .map(RankingScope::Category)
            .collect();
        scopes.push(RankingScope::Global);
        scopes.extend(SubSeason::ALL.into_iter().map(RankingScope::SubUpdate));
        scopes
    }

    pub fn as_key(&self) -> String {
        match self {
            RankingScope::Category(c) => c.as_str().to_string(),
            RankingScope::Global => "global".to_string(),
            RankingScope::SubUpdate(s) => format!("subupdate_{}", s.number()),
        }
    }
}

impl FromStr for RankingScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        if s.eq_ignore_ascii_case("global") {
            return Ok(RankingScope::Global);
        }
        if let Some(n) = s.strip_prefix("subupdate_") {
            let number: u8 = n.parse()?;
            return Ok(RankingScope::SubUpdate(SubSeason::from_number(number)?));
        }
        Ok(RankingScope::Category(s.parse()?))
    }
}

impl fmt::Display for RankingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}

/// One row of a computed ranking. Rank is dense, 1 = best. Deltas are
/// signed against the previous season's persisted snapshot for the same
/// scope; new entrants carry zero change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub team_id: i64,
    pub rank: u32,
    pub weighted_points: f64,
    pub position_change: i32,
    pub points_change: f64,
}

/// Completion flags for the four sub-seasons of one season. Advances
/// forward only; reverting is an explicit administrative action handled
/// outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleState {
    pub season: Season,
    pub completed: [bool; 4],
}

impl LifecycleState {
    pub fn pending(season: Season) -> Self {
        Self {
            season,
            completed: [false; 4],
        }
    }

    pub fn is_complete(&self, sub: SubSeason) -> bool {
        self.completed[sub.index()]
    }

    pub fn season_complete(&self) -> bool {
        self.completed.iter().all(|&c| c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    SubSeasonComplete(SubSeason),
    SeasonComplete,
}

/// Consolidation invitation emitted on a forward lifecycle transition.
/// The key is stable across detector runs so storage can deduplicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub season: Season,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn key(&self) -> String {
        match self.kind {
            NotificationKind::SubSeasonComplete(sub) => {
                format!("{}:subseason_{}:complete", self.season, sub.number())
            }
            NotificationKind::SeasonComplete => format!("{}:season:complete", self.season),
        }
    }

    pub fn describe(&self) -> String {
        match self.kind {
            NotificationKind::SubSeasonComplete(sub) => format!(
                "Sub-season {} of {} is complete and ready for consolidation",
                sub.number(),
                self.season
            ),
            NotificationKind::SeasonComplete => {
                format!("Season {} is complete and ready for consolidation", self.season)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_covers_surface_modality_product() {
        for category in Category::ALL {
            assert_eq!(Category::new(category.surface(), category.modality()), category);
        }
    }

    #[test]
    fn category_parses_from_key() {
        assert_eq!("beach_mixed".parse::<Category>().unwrap(), Category::BeachMixed);
        assert!("beach_junior".parse::<Category>().is_err());
    }

    #[test]
    fn subseason_category_map_is_fixed() {
        assert_eq!(SubSeason::First.categories(), &[Category::BeachMixed]);
        assert_eq!(
            SubSeason::Second.categories(),
            &[Category::BeachOpen, Category::BeachWomen]
        );
        assert_eq!(SubSeason::Third.categories(), &[Category::GrassMixed]);
        assert_eq!(
            SubSeason::Fourth.categories(),
            &[Category::GrassOpen, Category::GrassWomen]
        );
    }

    #[test]
    fn scope_keys_round_trip() {
        for scope in RankingScope::all() {
            let parsed: RankingScope = scope.as_key().parse().unwrap();
            assert_eq!(parsed, scope);
        }
    }

    #[test]
    fn notification_keys_are_stable() {
        let season = Season::new(2024);
        let sub = Notification {
            season,
            kind: NotificationKind::SubSeasonComplete(SubSeason::Second),
        };
        assert_eq!(sub.key(), "2024-25:subseason_2:complete");

        let full = Notification {
            season,
            kind: NotificationKind::SeasonComplete,
        };
        assert_eq!(full.key(), "2024-25:season:complete");
    }
}
