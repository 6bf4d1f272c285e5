//! Core grid module - pure, deterministic, and testable
//!
//! This crate holds the board model: blocks, shapes, the grid that owns them,
//! and the rules for moving shapes around it. It has **zero dependencies** on
//! rendering, input or storage:
//!
//! - **Deterministic**: every random choice takes an explicit `rand::Rng`
//! - **Atomic**: a rejected operation leaves the grid exactly as it was
//! - **Observable**: changes are reported to a [`GridDelegate`], one call per batch
//!
//! # Module Structure
//!
//! - [`block`]: a single cell's content with a stable identity
//! - [`achievements`]: per-kind counters that feed scoring
//! - [`shape`]: polyomino templates, clockwise rotation and wall kick tables
//! - [`grid`]: the board, collision queries, move/rotate/drop, column gaps
//! - [`delegate`]: change notifications plus a recording observer
//! - [`layout`]: the text layout used to build fixtures
//! - [`snapshot`]: plain-data save/restore
//! - [`rng`]: seeded LCG and random shape generation
//!
//! # Example
//!
//! ```
//! use blockfall_core::{BlockGrid, Shape};
//! use blockfall_core::types::{BlockColour, BlockType, MoveDirection, ShapeName};
//!
//! let mut grid = BlockGrid::new(20, 10).unwrap();
//! assert!(grid.add_shape(Shape::standard(ShapeName::L, BlockColour::Red), None));
//!
//! grid.move_player(MoveDirection::Left);
//! grid.rotate_shape();
//! let fallen = grid.drop_player().unwrap();
//! assert!(fallen > 0);
//!
//! // the landed shape becomes part of the board
//! grid.replace_player_with_blocks_of_type(BlockType::Ordinary);
//! assert_eq!(grid.block_count(), 4);
//! assert!(grid.shape().is_none());
//! ```

pub mod achievements;
pub mod block;
pub mod delegate;
pub mod grid;
pub mod layout;
pub mod rng;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use achievements::Achievements;
pub use block::{Block, BlockId, MovedBlock, PlacedBlock};
pub use delegate::{EventLog, GridDelegate, GridEvent};
pub use grid::{BlockGrid, GridCell, GridError};
pub use rng::{random_shape, ShapeColouring, ShapeQueue, SimpleRng};
pub use shape::{KickTable, Shape, ShapeError};
pub use snapshot::{GridSnapshot, ShapeSnapshot};
