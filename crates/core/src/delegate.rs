//! Change notifications for grid observers
//!
//! A grid holds at most one [`GridDelegate`]. Each callback fires once per logical
//! operation, after the mutation it describes is committed: a batch of blocks
//! moved together is one `blocks_moved` call, never one call per block.

use std::cell::RefCell;
use std::rc::Rc;

use crate::block::{Block, MovedBlock, PlacedBlock};
use crate::shape::Shape;
use crate::types::{BlockType, GridOffset, GridReference, MoveDirection, Orientation, ShapeName};

/// Observer of grid state changes; every method defaults to a no-op
pub trait GridDelegate {
    fn shape_added(&mut self, _shape: &Shape) {}

    fn shape_moved(&mut self, _shape: &Shape, _direction: MoveDirection) {}

    fn shape_rotated(&mut self, _shape: &Shape, _kick: GridOffset) {}

    fn shape_dropped(&mut self, _shape: &Shape, _rows: u32) {}

    /// The active shape left the grid; `replaced_with` is the role its blocks
    /// took on, or `None` when they were deleted
    fn shape_removed(&mut self, _shape: &Shape, _replaced_with: Option<BlockType>) {}

    fn block_added(&mut self, _block: &Block, _at: GridReference) {}

    fn blocks_added(&mut self, _blocks: &[PlacedBlock]) {}

    fn block_moved(&mut self, _movement: &MovedBlock) {}

    fn blocks_moved(&mut self, _movements: &[MovedBlock]) {}

    fn block_removed(&mut self, _block: &Block, _from: GridReference) {}

    fn blocks_removed(&mut self, _blocks: &[PlacedBlock]) {}
}

/// Recorded form of a delegate callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    ShapeAdded {
        name: ShapeName,
        origin: GridReference,
    },
    ShapeMoved {
        direction: MoveDirection,
        origin: GridReference,
    },
    ShapeRotated {
        orientation: Orientation,
        kick: GridOffset,
    },
    ShapeDropped {
        rows: u32,
        origin: GridReference,
    },
    ShapeRemoved {
        replaced_with: Option<BlockType>,
    },
    BlockAdded(PlacedBlock),
    BlocksAdded(Vec<PlacedBlock>),
    BlockMoved(MovedBlock),
    BlocksMoved(Vec<MovedBlock>),
    BlockRemoved(PlacedBlock),
    BlocksRemoved(Vec<PlacedBlock>),
}

/// Shared recorder of grid events
///
/// Clones share the same log, so one clone can be handed to the grid while
/// another is kept for polling.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GridEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<GridEvent> {
        self.events.borrow().clone()
    }

    /// Drain the log
    pub fn take(&self) -> Vec<GridEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn push(&self, event: GridEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl GridDelegate for EventLog {
    fn shape_added(&mut self, shape: &Shape) {
        self.push(GridEvent::ShapeAdded {
            name: shape.name(),
            origin: shape.origin(),
        });
    }

    fn shape_moved(&mut self, shape: &Shape, direction: MoveDirection) {
        self.push(GridEvent::ShapeMoved {
            direction,
            origin: shape.origin(),
        });
    }

    fn shape_rotated(&mut self, shape: &Shape, kick: GridOffset) {
        self.push(GridEvent::ShapeRotated {
            orientation: shape.orientation(),
            kick,
        });
    }

    fn shape_dropped(&mut self, shape: &Shape, rows: u32) {
        self.push(GridEvent::ShapeDropped {
            rows,
            origin: shape.origin(),
        });
    }

    fn shape_removed(&mut self, _shape: &Shape, replaced_with: Option<BlockType>) {
        self.push(GridEvent::ShapeRemoved { replaced_with });
    }

    fn block_added(&mut self, block: &Block, at: GridReference) {
        self.push(GridEvent::BlockAdded(PlacedBlock {
            block: *block,
            reference: at,
        }));
    }

    fn blocks_added(&mut self, blocks: &[PlacedBlock]) {
        self.push(GridEvent::BlocksAdded(blocks.to_vec()));
    }

    fn block_moved(&mut self, movement: &MovedBlock) {
        self.push(GridEvent::BlockMoved(*movement));
    }

    fn blocks_moved(&mut self, movements: &[MovedBlock]) {
        self.push(GridEvent::BlocksMoved(movements.to_vec()));
    }

    fn block_removed(&mut self, block: &Block, from: GridReference) {
        self.push(GridEvent::BlockRemoved(PlacedBlock {
            block: *block,
            reference: from,
        }));
    }

    fn blocks_removed(&mut self, blocks: &[PlacedBlock]) {
        self.push(GridEvent::BlocksRemoved(blocks.to_vec()));
    }
}
