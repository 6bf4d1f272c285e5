use log::trace;

use super::{drop_blocks, EffectResult, GridEffect};
use crate::core::BlockGrid;
use crate::types::GridReference;

/// Collapses the board over fully empty rows
///
/// Unlike [`GravityEffect`](super::GravityEffect) this shifts whole rows: a block
/// falls by the number of empty rows beneath it, so partially filled rows keep
/// their holes. Walls and active-shape blocks stay put and support the blocks
/// above them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropIntoEmptyRowsEffect;

impl DropIntoEmptyRowsEffect {
    pub fn new() -> Self {
        DropIntoEmptyRowsEffect
    }
}

impl GridEffect for DropIntoEmptyRowsEffect {
    fn name(&self) -> &'static str {
        "drop-into-empty-rows"
    }

    fn apply(&self, grid: &mut BlockGrid) -> EffectResult {
        let empty_rows: Vec<i32> = grid.empty_rows().into_iter().map(|r| r as i32).collect();
        if empty_rows.is_empty() {
            return EffectResult::default();
        }

        let mut drops: Vec<(GridReference, i32)> = Vec::new();
        for column in 0..grid.columns() {
            let mut floor = -1;
            for reference in grid.column_references(column) {
                let movable = grid.block_at(reference).is_some_and(|b| b.is_movable());
                if !movable {
                    floor = reference.row;
                    continue;
                }
                let distance = empty_rows
                    .iter()
                    .filter(|&&row| row > floor && row < reference.row)
                    .count();
                drops.push((reference, distance as i32));
            }
        }

        let moved = drop_blocks(grid, &drops);
        if !moved.is_empty() {
            trace!("{}: {} blocks shifted", self.name(), moved.len());
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
    fn test_rows_collapse_keeping_holes() {
        let mut grid = BlockGrid::from_tokens(&[
            ["X1", ".", "."],
            [".", ".", "."],
            [".", "X2", "."],
            [".", ".", "."],
            ["X3", ".", "X3"],
        ])
        .unwrap();
        let result = DropIntoEmptyRowsEffect.apply(&mut grid);

        assert_eq!(result.moved.len(), 2);
        assert_eq!(
            grid.to_tokens(),
            vec![
                vec![".", ".", "."],
                vec![".", ".", "."],
                vec!["X1", ".", "."],
                vec![".", "X2", "."],
                vec!["X3", ".", "X3"],
            ]
        );
        assert!(!DropIntoEmptyRowsEffect.apply(&mut grid).is_material());
    }

    #[test]
    fn test_partial_rows_do_not_fall_into_holes() {
        let mut grid = BlockGrid::from_tokens(&[["X1", "."], [".", "X2"]]).unwrap();
        assert!(!DropIntoEmptyRowsEffect.apply(&mut grid).is_material());
        assert!(grid.block_at(R::new(1, 0)).is_some());
    }
}
