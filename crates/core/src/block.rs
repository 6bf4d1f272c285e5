//! Block module - the content of a single grid cell
//!
//! Every block carries an opaque identity so the same logical block can be
//! followed across moves. Identities are allocated from a process-wide counter
//! and never reused.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::types::{BlockColour, BlockType, GridReference};

static NEXT_BLOCK_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque block identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(u64);

impl BlockId {
    /// Allocate a fresh identity
    pub fn next() -> Self {
        BlockId(NEXT_BLOCK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A single block: colour, role and identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    id: BlockId,
    colour: BlockColour,
    kind: BlockType,
    ghost: bool,
}

impl Block {
    /// Create a block with a fresh identity
    pub fn new(colour: BlockColour, kind: BlockType) -> Self {
        Self {
            id: BlockId::next(),
            colour,
            kind,
            ghost: false,
        }
    }

    pub fn ordinary(colour: BlockColour) -> Self {
        Self::new(colour, BlockType::Ordinary)
    }

    pub fn wall(colour: BlockColour) -> Self {
        Self::new(colour, BlockType::Wall)
    }

    pub fn jewel(colour: BlockColour) -> Self {
        Self::new(colour, BlockType::Jewel)
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn colour(&self) -> BlockColour {
        self.colour
    }

    pub fn kind(&self) -> BlockType {
        self.kind
    }

    pub fn is_ghost(&self) -> bool {
        self.ghost
    }

    /// Change the role, keeping identity and colour
    pub fn set_kind(&mut self, kind: BlockType) {
        self.kind = kind;
    }

    pub fn set_ghost(&mut self, ghost: bool) {
        self.ghost = ghost;
    }

    /// Two blocks match iff their colours are equal
    pub fn matches(&self, other: &Block) -> bool {
        self.colour == other.colour
    }

    pub fn is_wall(&self) -> bool {
        self.kind == BlockType::Wall
    }

    pub fn is_shape(&self) -> bool {
        self.kind == BlockType::Shape
    }

    pub fn is_jewel(&self) -> bool {
        self.kind == BlockType::Jewel
    }

    /// Effects may move or remove this block
    pub fn is_movable(&self) -> bool {
        self.kind.is_movable()
    }
}

/// A block together with the cell it occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedBlock {
    pub block: Block,
    pub reference: GridReference,
}

/// A block that moved from one cell to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovedBlock {
    pub block: Block,
    pub from: GridReference,
    pub to: GridReference,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identities_are_unique() {
        let a = Block::ordinary(BlockColour::Red);
        let b = Block::ordinary(BlockColour::Red);
        assert_ne!(a.id(), b.id());
        assert!(a.matches(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_set_kind_keeps_identity() {
        let mut block = Block::new(BlockColour::Blue, BlockType::Shape);
        let id = block.id();
        block.set_kind(BlockType::Ordinary);
        assert_eq!(block.id(), id);
        assert_eq!(block.colour(), BlockColour::Blue);
        assert!(block.is_movable());
    }
}
