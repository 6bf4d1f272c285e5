use log::trace;

use super::{find_connected_groups, EffectResult, GridEffect};
use crate::core::{Achievements, BlockGrid};
use crate::types::{Achievement, GridReference, DEFAULT_MINIMUM_MATCH_COUNT};

/// Explodes every connected same-colour group of at least the minimum size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveMatchedBlocksEffect {
    minimum_match_count: usize,
}

impl RemoveMatchedBlocksEffect {
    pub fn new(minimum_match_count: usize) -> Self {
        Self {
            minimum_match_count,
        }
    }

    pub fn minimum_match_count(&self) -> usize {
        self.minimum_match_count
    }
}

impl Default for RemoveMatchedBlocksEffect {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_MATCH_COUNT)
    }
}

impl GridEffect for RemoveMatchedBlocksEffect {
    fn name(&self) -> &'static str {
        "remove-matched-blocks"
    }

    fn apply(&self, grid: &mut BlockGrid) -> EffectResult {
        let groups = find_connected_groups(grid, self.minimum_match_count);
        if groups.is_empty() {
            return EffectResult::default();
        }

        let mut achievements = Achievements::new();
        for group in &groups {
            if group.len() >= 20 {
                achievements.increment(Achievement::Match20);
            } else if group.len() >= 10 {
                achievements.increment(Achievement::Match10);
            }
        }
        achievements.add(Achievement::ColourMatchGroup, groups.len() as u32);

        let targets: Vec<GridReference> = groups.into_iter().flatten().collect();
        let removed = grid.remove_blocks(&targets);
        achievements.add(Achievement::ColourMatch, removed.len() as u32);
        let jewels = removed.iter().filter(|p| p.block.is_jewel()).count();
        achievements.add(Achievement::Jewel, jewels as u32);

        trace!("{}: {} blocks exploded", self.name(), removed.len());
        EffectResult {
            removed,
            moved: Vec::new(),
            achievements,
        }
    }
}
