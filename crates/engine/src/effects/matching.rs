//! Connected same-colour group search
//!
//! Shared by the row and match removal effects. Adjacency is 4-directional;
//! walls and active-shape blocks never take part.

use std::collections::{HashSet, VecDeque};

use crate::core::{Block, BlockGrid};
use crate::types::{Direction, GridReference};

fn matchable(grid: &BlockGrid, reference: GridReference) -> Option<&Block> {
    grid.block_at(reference)
        .filter(|block| !block.is_wall() && !block.is_shape())
}

fn same_colour(grid: &BlockGrid, block: &Block, neighbour: GridReference) -> bool {
    matchable(grid, neighbour).is_some_and(|other| other.matches(block))
}

/// Groups of at least `minimum_match_count` connected same-colour blocks
///
/// A search only starts from an ungrouped block whose right or lower neighbour
/// matches it; every group of two or more has such a block. Groups come back in
/// scan order (bottom row first, left to right) and each group in search order.
pub fn find_connected_groups(
    grid: &BlockGrid,
    minimum_match_count: usize,
) -> Vec<Vec<GridReference>> {
    let mut grouped: HashSet<GridReference> = HashSet::new();
    let mut groups = Vec::new();

    for row in 0..grid.rows() as i32 {
        for column in 0..grid.columns() as i32 {
            let seed = GridReference::new(row, column);
            if grouped.contains(&seed) {
                continue;
            }
            let Some(block) = matchable(grid, seed) else {
                continue;
            };
            if !same_colour(grid, block, seed.right()) && !same_colour(grid, block, seed.below()) {
                continue;
            }

            let mut group = vec![seed];
            let mut queue = VecDeque::from([seed]);
            grouped.insert(seed);
            while let Some(current) = queue.pop_front() {
                for direction in Direction::ALL {
                    let next = current.adjacent(direction);
                    if !grouped.contains(&next) && same_colour(grid, block, next) {
                        grouped.insert(next);
                        group.push(next);
                        queue.push_back(next);
                    }
                }
            }

            if group.len() >= minimum_match_count {
                groups.push(group);
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plus() -> BlockGrid {
        BlockGrid::from_tokens(&[
            [".", ".", ".", "."],
            [".", "X2", ".", "."],
            ["X2", "X2", "X2", "."],
            [".", "X2", ".", "X2"],
        ])
        .unwrap()
    }

    #[test]
    fn test_plus_shape_forms_one_group() {
        let grid = plus();
        let groups = find_connected_groups(&grid, 5);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 5);
        assert!(find_connected_groups(&grid, 6).is_empty());
    }

    #[test]
    fn test_colours_must_match() {
        let grid = BlockGrid::from_tokens(&[["X1", "X2", "X1", "X1"]]).unwrap();
        let groups = find_connected_groups(&grid, 2);
        assert_eq!(groups, vec![vec![GridReference::new(0, 2), GridReference::new(0, 3)]]);
    }

    #[test]
    fn test_walls_and_shape_blocks_never_match() {
        let grid = BlockGrid::from_tokens(&[["W1", "W1", "P1", "S1"], ["X1", "X1", ".", "."]])
            .unwrap();
        let groups = find_connected_groups(&grid, 2);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_diagonals_do_not_connect() {
        let grid = BlockGrid::from_tokens(&[["X3", "."], [".", "X3"]]).unwrap();
        assert!(find_connected_groups(&grid, 2).is_empty());
    }
}
