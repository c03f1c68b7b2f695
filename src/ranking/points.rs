use std::collections::BTreeMap;

use anyhow::{Result, bail};

use crate::domain::Tier;

/// Points-per-position table for one tournament tier. Index 0 holds the
/// points for 1st place; positions beyond the table resolve to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointTable {
    tier: Tier,
    points: Vec<u32>,
}

impl PointTable {
    /// Builds a table, rejecting malformed configuration: the table must
    /// be non-empty and strictly decreasing in position.
    pub fn new(tier: Tier, points: Vec<u32>) -> Result<Self> {
        if points.is_empty() {
            bail!("Point table for {tier} is empty");
        }
        for pair in points.windows(2) {
            if pair[1] >= pair[0] {
                bail!(
                    "Point table for {tier} is not strictly decreasing: {} then {}",
                    pair[0],
                    pair[1]
                );
            }
        }
        Ok(Self { tier, points })
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Bounds-safe lookup: position 0 or anything past the configured
    /// range resolves to 0 points, never an error.
    pub fn resolve(&self, position: u32) -> u32 {
        if position == 0 {
            return 0;
        }
        self.points
            .get(position as usize - 1)
            .copied()
            .unwrap_or(0)
    }

    pub fn values(&self) -> &[u32] {
        &self.points
    }
}

/// One validated table per configured tier.
#[derive(Debug, Clone, Default)]
pub struct PointTableSet {
    tables: BTreeMap<Tier, PointTable>,
}

impl PointTableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: PointTable) {
        self.tables.insert(table.tier(), table);
    }

    pub fn get(&self, tier: Tier) -> Option<&PointTable> {
        self.tables.get(&tier)
    }

    /// A tier with no configured table resolves every position to 0.
    pub fn resolve(&self, tier: Tier, position: u32) -> u32 {
        self.tables.get(&tier).map_or(0, |t| t.resolve(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ce1_table() -> PointTable {
        PointTable::new(Tier::Ce1, vec![1000, 850, 725]).unwrap()
    }

    #[test]
    fn resolves_configured_positions() {
        let table = ce1_table();
        assert_eq!(table.resolve(1), 1000);
        assert_eq!(table.resolve(2), 850);
        assert_eq!(table.resolve(3), 725);
    }

    #[test]
    fn position_beyond_table_resolves_to_zero() {
        let table = ce1_table();
        assert_eq!(table.resolve(4), 0);
        assert_eq!(table.resolve(100), 0);
        assert_eq!(table.resolve(0), 0);
    }

    #[test]
    fn rejects_non_decreasing_table() {
        assert!(PointTable::new(Tier::Ce2, vec![500, 500, 400]).is_err());
        assert!(PointTable::new(Tier::Ce2, vec![500, 600]).is_err());
        assert!(PointTable::new(Tier::Ce2, vec![]).is_err());
    }

    #[test]
    fn unconfigured_tier_resolves_to_zero() {
        let mut set = PointTableSet::new();
        set.insert(ce1_table());
        assert_eq!(set.resolve(Tier::Ce1, 1), 1000);
        assert_eq!(set.resolve(Tier::Regional, 1), 0);
    }
}
