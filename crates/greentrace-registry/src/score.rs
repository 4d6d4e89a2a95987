//! Contributor score card.

use serde::Serialize;

/// Contributions between milestones.
pub const MILESTONE_STEP: usize = 5;

/// Recognition level for a contributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    NewMapper,
    Seedling,
    TreeMapper,
    TreeChampion,
    ForestGuardian,
}

impl Badge {
    /// Badge earned with `count` documented trees.
    pub const fn for_count(count: usize) -> Self {
        if count >= 50 {
            Self::ForestGuardian
        } else if count >= 25 {
            Self::TreeChampion
        } else if count >= 10 {
            Self::TreeMapper
        } else if count >= 5 {
            Self::Seedling
        } else {
            Self::NewMapper
        }
    }

    pub const fn title(&self) -> &'static str {
        match self {
            Self::NewMapper => "New Mapper",
            Self::Seedling => "Seedling",
            Self::TreeMapper => "Tree Mapper",
            Self::TreeChampion => "Tree Champion",
            Self::ForestGuardian => "Forest Guardian",
        }
    }
}

/// A contributor's progress relative to the community.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContributorScore {
    pub user_trees: usize,
    pub community_trees: usize,
    pub badge: Badge,
    pub next_milestone: usize,
    /// Percentage of all trees, rounded
    pub share_percent: u32,
}

impl ContributorScore {
    pub fn compute(user_trees: usize, community_trees: usize) -> Self {
        Self {
            user_trees,
            community_trees,
            badge: Badge::for_count(user_trees),
            next_milestone: next_milestone(user_trees),
            share_percent: share_percent(user_trees, community_trees),
        }
    }
}

/// ceil(count / 5) × 5
pub const fn next_milestone(count: usize) -> usize {
    count.div_ceil(MILESTONE_STEP) * MILESTONE_STEP
}

/// round(user / total × 100), 0 for an empty community.
pub fn share_percent(user: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (user as f64 / total as f64 * 100.0).round() as u32
}
