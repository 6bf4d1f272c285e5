use log::trace;

use super::{drop_blocks, EffectResult, GridEffect};
use crate::core::BlockGrid;
use crate::types::GridReference;

/// Per-column gravity: loose blocks fall into the gaps below them
///
/// Drop distances are all taken from the layout before anything moves, so a
/// stack over several gaps falls the whole way in one pass. Walls and
/// active-shape blocks never move and hold up whatever sits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GravityEffect;

/// The per-column gravity effect under its other name
pub type DropBlocksEffect = GravityEffect;

impl GravityEffect {
    pub fn new() -> Self {
        GravityEffect
    }

    /// `(reference, rows to fall)` for every movable block in `column`
    fn column_drops(grid: &BlockGrid, column: usize) -> Vec<(GridReference, i32)> {
        let gaps = grid.get_column_gaps(column);
        let mut floor = -1;
        let mut drops = Vec::new();
        for reference in grid.column_references(column) {
            let Some(block) = grid.block_at(reference) else {
                continue;
            };
            if !block.is_movable() {
                floor = reference.row;
                continue;
            }
            let distance: usize = gaps
                .iter()
                .filter(|gap| gap.min_row() > floor && gap.max_row() < reference.row)
                .map(|gap| gap.len())
                .sum();
            drops.push((reference, distance as i32));
        }
        drops
    }
}

impl GridEffect for GravityEffect {
    fn name(&self) -> &'static str {
        "gravity"
    }

    fn apply(&self, grid: &mut BlockGrid) -> EffectResult {
        let drops: Vec<(GridReference, i32)> = (0..grid.columns())
            .flat_map(|column| Self::column_drops(grid, column))
            .collect();
        let moved = drop_blocks(grid, &drops);
        if !moved.is_empty() {
            trace!("{}: {} blocks fell", self.name(), moved.len());
        }
        EffectResult {
            moved,
            ..EffectResult::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GridReference as R;

    #[test]
    fn test_stack_falls_through_several_gaps() {
        // one column, bottom to top: X . X . X . .
        let mut grid = BlockGrid::from_tokens(&[
            ["."],
            ["."],
            ["X3"],
            ["."],
            ["X2"],
            ["."],
            ["X1"],
        ])
        .unwrap();
        let result = GravityEffect.apply(&mut grid);

        assert_eq!(result.moved.len(), 2);
        assert!(grid.block_at(R::new(0, 0)).is_some());
        assert_eq!(grid.block_at(R::new(1, 0)).map(|b| b.colour().index()), Some(2));
        assert_eq!(grid.block_at(R::new(2, 0)).map(|b| b.colour().index()), Some(3));
        assert!(grid.block_at(R::new(4, 0)).is_none());
        assert!(!GravityEffect.apply(&mut grid).is_material());
    }

    #[test]
    fn test_walls_hold_blocks_up() {
        let mut grid = BlockGrid::from_tokens(&[["X1"], ["."], ["W"], ["."], ["X2"]]).unwrap();
        let result = GravityEffect.apply(&mut grid);

        assert_eq!(result.moved.len(), 1);
        assert!(grid.block_at(R::new(3, 0)).is_some());
        assert!(grid.block_at(R::new(2, 0)).is_some_and(|b| b.is_wall()));
        assert!(grid.block_at(R::new(0, 0)).is_some());
    }

    #[test]
    fn test_active_shape_is_left_alone() {
        let mut grid = BlockGrid::from_tokens(&[["P1"], ["."], ["X1"]]).unwrap();
        assert!(!GravityEffect.apply(&mut grid).is_material());
        assert_eq!(grid.player_origin(), Some(R::new(2, 0)));
    }
}
