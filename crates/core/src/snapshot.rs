//! Plain-data grid snapshots for save and restore
//!
//! Cells are stored as the text layout tokens, top row first, with the ghost
//! cells listed beside them. The active shape, if any, is stored separately so
//! its name, orientation, kicks and rotatability come back.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::grid::{BlockGrid, GridError};
use crate::shape::{KickTable, Shape};
use crate::types::{BlockColour, GridOffset, GridReference, Orientation, ShapeName};

/// Saved active shape, references in grid coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    pub name: ShapeName,
    pub references: Vec<GridReference>,
    pub colours: Vec<BlockColour>,
    pub origin: GridReference,
    pub orientation: Orientation,
    pub can_be_rotated: bool,
    /// Kick lists indexed Up, Right, Down, Left
    pub kicks: [Vec<GridOffset>; 4],
}

impl ShapeSnapshot {
    pub fn of(shape: &Shape) -> Self {
        Self {
            name: shape.name(),
            references: shape.references().to_vec(),
            colours: shape.colours().to_vec(),
            origin: shape.origin(),
            orientation: shape.orientation(),
            can_be_rotated: shape.can_be_rotated(),
            kicks: shape.kick_table().to_lists(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Vec<String>>,
    /// Cells whose block is flagged as a ghost
    #[serde(default)]
    pub ghosts: Vec<GridReference>,
    pub shape: Option<ShapeSnapshot>,
}

impl BlockGrid {
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            rows: self.rows(),
            columns: self.columns(),
            cells: self.to_tokens(),
            ghosts: self
                .blocks()
                .filter(|(_, block)| block.is_ghost())
                .map(|(reference, _)| reference)
                .collect(),
            shape: self.shape().map(ShapeSnapshot::of),
        }
    }

    /// Rebuild a grid from a snapshot
    ///
    /// Block identities are fresh; everything else matches the saved grid.
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<BlockGrid, GridError> {
        let mut grid = BlockGrid::from_tokens(&snapshot.cells)?;
        if grid.rows() != snapshot.rows || grid.columns() != snapshot.columns {
            return Err(GridError::InvalidDimensions {
                rows: snapshot.rows,
                columns: snapshot.columns,
            });
        }

        match (&snapshot.shape, grid.shape()) {
            (None, None) => {}
            (Some(saved), Some(placed)) => {
                let expected: HashSet<&GridReference> = saved.references.iter().collect();
                let found: HashSet<&GridReference> = placed.references().iter().collect();
                if expected != found || placed.origin() != saved.origin {
                    return Err(GridError::ShapeMismatch);
                }
                let [up, right, down, left] = &saved.kicks;
                let kicks = KickTable::new([
                    up.as_slice(),
                    right.as_slice(),
                    down.as_slice(),
                    left.as_slice(),
                ])?;
                let shape = Shape::restore(
                    saved.name,
                    &saved.references,
                    saved.colours.clone(),
                    saved.origin,
                    saved.orientation,
                    kicks,
                    saved.can_be_rotated,
                )?;
                grid.install_shape(shape);
            }
            _ => return Err(GridError::ShapeMismatch),
        }

        for &reference in &snapshot.ghosts {
            if !grid.set_ghost(reference, true) {
                return Err(GridError::MissingGhostBlock(reference));
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::types::MoveDirection;

    fn r(row: i32, column: i32) -> GridReference {
        GridReference::new(row, column)
    }

    #[test]
    fn test_snapshot_restores_named_shape() {
        let mut grid = BlockGrid::new(8, 6).unwrap();
        grid.add_shape(Shape::standard(ShapeName::I, BlockColour::Blue), None);
        grid.rotate_shape();
        grid.move_player(MoveDirection::Down);

        let snapshot = grid.snapshot();
        let restored = BlockGrid::from_snapshot(&snapshot).unwrap();
        let shape = restored.shape().unwrap();
        assert_eq!(shape.name(), ShapeName::I);
        assert_eq!(shape.orientation(), Orientation::Right);
        assert_eq!(restored.player_origin(), grid.player_origin());
        assert_eq!(restored.to_tokens(), grid.to_tokens());
    }

    #[test]
    fn test_snapshot_shape_must_match_cells() {
        let mut grid = BlockGrid::new(6, 6).unwrap();
        let shape = Shape::standard(ShapeName::O, BlockColour::Red);
        grid.add_shape(shape, Some(GridReference::ORIGIN));
        let mut snapshot = grid.snapshot();
        snapshot.shape = None;
        assert_eq!(
            BlockGrid::from_snapshot(&snapshot).unwrap_err(),
            GridError::ShapeMismatch
        );
    }

    #[test]
    fn test_snapshot_dimensions_are_checked() {
        let grid = BlockGrid::new(3, 3).unwrap();
        let mut snapshot = grid.snapshot();
        snapshot.rows = 4;
        assert!(matches!(
            BlockGrid::from_snapshot(&snapshot),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_rotation_rules_and_ghosts() {
        let mut grid = BlockGrid::new(6, 5).unwrap();
        let pillar = Shape::new(
            ShapeName::Custom,
            vec![r(-1, 0), r(0, 0), r(1, 0)],
            vec![BlockColour::Green; 3],
            KickTable::none(),
            false,
        )
        .unwrap();
        assert!(grid.add_shape(pillar, Some(r(3, 2))));
        assert!(grid.add_block(Block::ordinary(BlockColour::Red), r(0, 0)));
        assert!(grid.set_ghost(r(0, 0), true));

        let json = serde_json::to_string(&grid.snapshot()).unwrap();
        let snapshot: GridSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.ghosts, vec![r(0, 0)]);

        let mut restored = BlockGrid::from_snapshot(&snapshot).unwrap();
        let shape = restored.shape().unwrap();
        assert!(!shape.can_be_rotated());
        assert_eq!(shape.kick_table(), &KickTable::none());
        assert!(restored.block_at(r(0, 0)).unwrap().is_ghost());
        assert_eq!(restored.snapshot(), grid.snapshot());

        // the saved grid refuses to turn the pillar, so must the restored one
        assert!(!grid.rotate_shape());
        assert!(!restored.rotate_shape());
    }

    #[test]
    fn test_ghost_without_block_is_rejected() {
        let grid = BlockGrid::new(4, 4).unwrap();
        let mut snapshot = grid.snapshot();
        snapshot.ghosts.push(r(2, 2));
        assert_eq!(
            BlockGrid::from_snapshot(&snapshot).unwrap_err(),
            GridError::MissingGhostBlock(r(2, 2))
        );
    }
}
