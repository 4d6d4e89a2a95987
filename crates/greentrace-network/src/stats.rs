//! Dashboard counters over the record set.

use std::collections::HashSet;

use crate::TreeRecord;

/// Records per covered area in the coarse coverage heuristic.
pub const TREES_PER_AREA: usize = 10;

/// Summary counters shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkStats {
    pub total_trees: usize,
    pub species_count: usize,
    pub user_contributions: usize,
    pub areas_covered: usize,
}

impl NetworkStats {
    /// Compute counters, attributing contributions to `user` if given.
    pub fn compute(records: &[TreeRecord], user: Option<&str>) -> Self {
        let species: HashSet<&str> = records.iter().map(|r| r.species()).collect();
        let user_contributions = user
            .map(|u| records.iter().filter(|r| r.submitted_by() == u).count())
            .unwrap_or(0);

        Self {
            total_trees: records.len(),
            species_count: species.len(),
            user_contributions,
            areas_covered: areas_covered(records.len()),
        }
    }
}

/// floor(total / 10) + 1
///
/// Not a spatial clustering. Kept as-is for compatibility with existing
/// dashboards.
pub const fn areas_covered(total_trees: usize) -> usize {
    total_trees / TREES_PER_AREA + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConservationStatus, GeoPoint};

    fn tree(id: &str, species: &str, owner: &str) -> TreeRecord {
        TreeRecord::new(id, species, GeoPoint::ORIGIN, owner, ConservationStatus::Stable)
    }

    #[test]
    fn empty_set() {
        let stats = NetworkStats::compute(&[], Some("alice"));
        assert_eq!(
            stats,
            NetworkStats {
                total_trees: 0,
                species_count: 0,
                user_contributions: 0,
                areas_covered: 1,
            }
        );
    }

    #[test]
    fn counts_species_and_contributions() {
        let records = [
            tree("1", "Mango", "alice"),
            tree("2", "Mango", "community"),
            tree("3", "Neem", "alice"),
            tree("4", "Baobab", "bob"),
        ];
        let stats = NetworkStats::compute(&records, Some("alice"));
        assert_eq!(stats.total_trees, 4);
        assert_eq!(stats.species_count, 3);
        assert_eq!(stats.user_contributions, 2);

        let anonymous = NetworkStats::compute(&records, None);
        assert_eq!(anonymous.user_contributions, 0);
    }

    #[test]
    fn areas_heuristic() {
        assert_eq!(areas_covered(0), 1);
        assert_eq!(areas_covered(9), 1);
        assert_eq!(areas_covered(10), 2);
        assert_eq!(areas_covered(25), 3);
    }
}
