use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// A competitive season, labeled by its starting calendar year ("2024-25").
///
/// Seasons order totally by starting year; the 4-element decay window for a
/// reference season is the season itself plus its three predecessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Season {
    start_year: i32,
}

impl Season {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn label(&self) -> String {
        format!("{}-{:02}", self.start_year, (self.start_year + 1) % 100)
    }

    pub fn prev(&self) -> Season {
        Season::new(self.start_year - 1)
    }

    pub fn next(&self) -> Season {
        Season::new(self.start_year + 1)
    }

    /// The fixed 4-season decay window: index 0 is the season itself,
    /// index k is k seasons older.
    pub fn window(&self) -> [Season; 4] {
        [
            *self,
            Season::new(self.start_year - 1),
            Season::new(self.start_year - 2),
            Season::new(self.start_year - 3),
        ]
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Season {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once('-')
            .with_context(|| format!("Invalid season label: {s}"))?;

        let start_year: i32 = start
            .parse()
            .with_context(|| format!("Invalid season start year: {start}"))?;
        let end_suffix: i32 = end
            .parse()
            .with_context(|| format!("Invalid season end year: {end}"))?;

        if end_suffix != (start_year + 1) % 100 {
            bail!("Season label {s} does not span consecutive years");
        }

        Ok(Season::new(start_year))
    }
}

impl TryFrom<String> for Season {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Season> for String {
    fn from(season: Season) -> String {
        season.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trips() {
        let season: Season = "2024-25".parse().unwrap();
        assert_eq!(season.start_year(), 2024);
        assert_eq!(season.label(), "2024-25");
    }

    #[test]
    fn century_boundary_label() {
        assert_eq!(Season::new(1999).label(), "1999-00");
        assert_eq!("1999-00".parse::<Season>().unwrap(), Season::new(1999));
    }

    #[test]
    fn rejects_non_consecutive_years() {
        assert!("2024-26".parse::<Season>().is_err());
        assert!("2024".parse::<Season>().is_err());
    }

    #[test]
    fn window_spans_four_seasons() {
        let window = Season::new(2024).window();
        assert_eq!(
            window,
            [
                Season::new(2024),
                Season::new(2023),
                Season::new(2022),
                Season::new(2021),
            ]
        );
    }
}
