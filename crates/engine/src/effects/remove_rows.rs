use std::collections::HashSet;

use log::trace;

use super::{find_connected_groups, EffectResult, GridEffect};
use crate::core::{Achievements, BlockGrid};
use crate::types::{Achievement, GridReference, DEFAULT_MINIMUM_MATCH_COUNT};

/// Clears full rows together with any colour groups found in the same pass
///
/// The removal set is the union of both, so a block in a full row and a group
/// is removed once. Walls in a full row stay. Achievements:
///
/// - one row bucket for the number of rows cleared (four or more share `FourRows`)
/// - `ExplodedBlock` for each block removed only because of a colour group
/// - `Jewel` for each jewel removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveRowsEffect {
    minimum_match_count: usize,
}

impl RemoveRowsEffect {
    pub fn new(minimum_match_count: usize) -> Self {
        Self {
            minimum_match_count,
        }
    }

    pub fn minimum_match_count(&self) -> usize {
        self.minimum_match_count
    }
}

impl Default for RemoveRowsEffect {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_MATCH_COUNT)
    }
}

impl GridEffect for RemoveRowsEffect {
    fn name(&self) -> &'static str {
        "remove-rows"
    }

    fn apply(&self, grid: &mut BlockGrid) -> EffectResult {
        let mut targets: Vec<GridReference> = Vec::new();
        let mut in_rows: HashSet<GridReference> = HashSet::new();
        let mut rows_cleared = 0;

        for row in grid.full_rows() {
            let removable: Vec<GridReference> = (0..grid.columns() as i32)
                .map(|column| GridReference::new(row as i32, column))
                .filter(|r| grid.block_at(*r).is_some_and(|b| b.is_movable()))
                .collect();
            // a row of walls is never cleared
            if removable.is_empty() {
                continue;
            }
            rows_cleared += 1;
            in_rows.extend(removable.iter().copied());
            targets.extend(removable);
        }

        let mut exploded = 0;
        for group in find_connected_groups(grid, self.minimum_match_count) {
            for reference in group {
                if !in_rows.contains(&reference) {
                    exploded += 1;
                    targets.push(reference);
                }
            }
        }

        if targets.is_empty() {
            return EffectResult::default();
        }

        let removed = grid.remove_blocks(&targets);
        let mut achievements = Achievements::new();
        if let Some(bucket) = Achievement::for_rows(rows_cleared) {
            achievements.increment(bucket);
        }
        achievements.add(Achievement::ExplodedBlock, exploded);
        let jewels = removed.iter().filter(|p| p.block.is_jewel()).count();
        achievements.add(Achievement::Jewel, jewels as u32);

        trace!(
            "{}: {} rows, {} exploded, {} removed",
            self.name(),
            rows_cleared,
            exploded,
            removed.len()
        );
        EffectResult {
            removed,
            moved: Vec::new(),
            achievements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_full_rows() {
        let mut grid = BlockGrid::from_tokens(&[
            [".", "X4", ".", "."],
            ["X0", "X1", "X2", "X3"],
            ["X3", "X2", "X1", "X0"],
        ])
        .unwrap();
        let result = RemoveRowsEffect::default().apply(&mut grid);

        assert_eq!(result.removed.len(), 2 * grid.columns());
        assert_eq!(result.achievements.get(Achievement::TwoRows), 1);
        assert_eq!(result.achievements.get(Achievement::OneRow), 0);
        assert_eq!(grid.block_count(), 1);
    }

    #[test]
    fn test_walls_in_full_row_stay() {
        let mut grid = BlockGrid::from_tokens(&[["W", "X1", "J2", "W"]]).unwrap();
        let result = RemoveRowsEffect::default().apply(&mut grid);

        assert_eq!(result.removed.len(), 2);
        assert_eq!(result.achievements.get(Achievement::OneRow), 1);
        assert_eq!(result.achievements.get(Achievement::Jewel), 1);
        assert_eq!(grid.block_count(), 2);

        // nothing left to clear
        let again = RemoveRowsEffect::default().apply(&mut grid);
        assert!(!again.is_material());
        assert!(again.achievements.is_empty());
    }

    #[test]
    fn test_group_overlapping_row_is_removed_once() {
        let mut grid = BlockGrid::from_tokens(&[
            ["X1", ".", "."],
            ["X1", ".", "."],
            ["X1", "X2", "X3"],
        ])
        .unwrap();
        let result = RemoveRowsEffect::new(3).apply(&mut grid);

        assert_eq!(result.removed.len(), 5);
        assert_eq!(result.achievements.get(Achievement::OneRow), 1);
        assert_eq!(result.achievements.get(Achievement::ExplodedBlock), 2);
        assert_eq!(grid.block_count(), 0);
    }
}
