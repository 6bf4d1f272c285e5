//! Effects module - post-landing consequences resolved on the grid
//!
//! Each effect detects one kind of consequence and resolves it in a single grid
//! operation:
//!
//! | Effect | Detects | Resolves with |
//! |--------|---------|---------------|
//! | [`RemoveRowsEffect`] | full rows and colour groups | one `remove_blocks` |
//! | [`RemoveMatchedBlocksEffect`] | colour groups | one `remove_blocks` |
//! | [`GravityEffect`] | column gaps | one `move_blocks` |
//! | [`DropIntoEmptyRowsEffect`] | empty rows | one `move_blocks` |
//!
//! Applying an effect to a grid it has nothing to do on is harmless and reports
//! a non-material result.

mod drop_rows;
mod gravity;
pub mod matching;
mod remove_matched;
mod remove_rows;

pub use drop_rows::DropIntoEmptyRowsEffect;
pub use gravity::{DropBlocksEffect, GravityEffect};
pub use matching::find_connected_groups;
pub use remove_matched::RemoveMatchedBlocksEffect;
pub use remove_rows::RemoveRowsEffect;

use crate::core::{Achievements, BlockGrid, MovedBlock, PlacedBlock};

/// What a single effect application changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectResult {
    pub removed: Vec<PlacedBlock>,
    pub moved: Vec<MovedBlock>,
    pub achievements: Achievements,
}

impl EffectResult {
    /// Anything removed or moved
    pub fn is_material(&self) -> bool {
        !self.removed.is_empty() || !self.moved.is_empty()
    }
}

/// A transformation applied to the grid after a shape lands
pub trait GridEffect {
    fn name(&self) -> &'static str;

    fn apply(&self, grid: &mut BlockGrid) -> EffectResult;
}

impl std::fmt::Debug for dyn GridEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Move the given blocks down by their drop distance in one grid operation
///
/// `drops` pairs a source reference with a row count; zero distances are skipped.
pub(crate) fn drop_blocks(
    grid: &mut BlockGrid,
    drops: &[(crate::types::GridReference, i32)],
) -> Vec<MovedBlock> {
    let (from, to): (Vec<_>, Vec<_>) = drops
        .iter()
        .filter(|(_, distance)| *distance > 0)
        .map(|(r, distance)| (*r, r.offset_by(-distance, 0)))
        .unzip();
    if from.is_empty() {
        return Vec::new();
    }
    let moved = from
        .iter()
        .zip(&to)
        .filter_map(|(source, destination)| {
            grid.block_at(*source).map(|block| MovedBlock {
                block: *block,
                from: *source,
                to: *destination,
            })
        })
        .collect();
    grid.move_blocks(&from, &to);
    moved
}
