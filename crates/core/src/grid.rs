//! Grid module - the block board and its movement rules
//!
//! The grid is a `rows x columns` array of optional blocks indexed `[row][column]`,
//! row 0 at the bottom. It owns every block placed on it and at most one active
//! shape. The active shape is kept in grid coordinates, so its origin reference
//! is the player origin.
//!
//! Rejected operations return `false`/`None` and leave the grid untouched.
//! Construction problems return a [`GridError`].

use std::collections::HashSet;
use std::fmt;

use log::trace;

use crate::block::{Block, MovedBlock, PlacedBlock};
use crate::delegate::GridDelegate;
use crate::shape::{Shape, ShapeError};
use crate::types::{BlockType, Direction, GridOffset, GridRange, GridReference, MoveDirection};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {rows}x{columns})")]
    InvalidDimensions { rows: usize, columns: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid layout token {token:?} at line {line}, column {column}")]
    InvalidToken {
        token: String,
        line: usize,
        column: usize,
    },
    #[error("shape blocks present without a `P` origin token")]
    MissingOrigin,
    #[error("more than one `P` origin token")]
    MultipleOrigins,
    #[error("saved shape does not match the shape blocks on the grid")]
    ShapeMismatch,
    #[error("ghost flag saved for {0:?}, which holds no block")]
    MissingGhostBlock(GridReference),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Result of looking up a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell<'a> {
    pub block: Option<&'a Block>,
    pub inside: bool,
    pub reference: GridReference,
}

impl GridCell<'_> {
    /// Inside the grid and holding no block
    pub fn is_empty(&self) -> bool {
        self.inside && self.block.is_none()
    }
}

/// The block board
pub struct BlockGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Option<Block>>>,
    shape: Option<Shape>,
    delegate: Option<Box<dyn GridDelegate>>,
}

impl BlockGrid {
    /// Create an empty grid
    pub fn new(rows: usize, columns: usize) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::InvalidDimensions { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            cells: vec![vec![None; columns]; rows],
            shape: None,
            delegate: None,
        })
    }

    /// Create from rows of cells, bottom row first
    ///
    /// Blocks with the `Shape` role are kept as they are but no active shape is
    /// set; use the text layout to build a grid with an active shape.
    pub fn from_rows(rows: Vec<Vec<Option<Block>>>) -> Result<Self, GridError> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || columns == 0 {
            return Err(GridError::InvalidDimensions {
                rows: rows.len(),
                columns,
            });
        }
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
            return Err(GridError::RaggedRows {
                row,
                expected: columns,
                found: cells.len(),
            });
        }
        Ok(Self {
            rows: rows.len(),
            columns,
            cells: rows,
            shape: None,
            delegate: None,
        })
    }

    pub(crate) fn install_shape(&mut self, shape: Shape) {
        self.shape = Some(shape);
    }

    /// Attach the observer that receives change notifications
    pub fn set_delegate(&mut self, delegate: impl GridDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    pub fn take_delegate(&mut self) -> Option<Box<dyn GridDelegate>> {
        self.delegate.take()
    }

    fn notify(&mut self, f: impl FnOnce(&mut dyn GridDelegate)) {
        if let Some(delegate) = self.delegate.as_deref_mut() {
            f(delegate);
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn index(&self, reference: GridReference) -> Option<(usize, usize)> {
        if reference.row < 0
            || reference.column < 0
            || reference.row as usize >= self.rows
            || reference.column as usize >= self.columns
        {
            return None;
        }
        Some((reference.row as usize, reference.column as usize))
    }

    pub fn contains(&self, reference: GridReference) -> bool {
        self.index(reference).is_some()
    }

    /// Look up a cell; out-of-bounds references report `inside == false`
    pub fn get(&self, reference: GridReference) -> GridCell<'_> {
        match self.index(reference) {
            Some((row, column)) => GridCell {
                block: self.cells[row][column].as_ref(),
                inside: true,
                reference,
            },
            None => GridCell {
                block: None,
                inside: false,
                reference,
            },
        }
    }

    pub fn block_at(&self, reference: GridReference) -> Option<&Block> {
        self.get(reference).block
    }

    /// Inside the grid and empty
    pub fn is_empty_at(&self, reference: GridReference) -> bool {
        self.get(reference).is_empty()
    }

    /// The neighbouring cell of `reference` in `direction`
    pub fn adjacent(&self, reference: GridReference, direction: Direction) -> GridCell<'_> {
        self.get(reference.adjacent(direction))
    }

    fn take(&mut self, reference: GridReference) -> Option<Block> {
        let (row, column) = self.index(reference)?;
        self.cells[row][column].take()
    }

    fn put(&mut self, reference: GridReference, block: Block) -> bool {
        match self.index(reference) {
            Some((row, column)) => {
                self.cells[row][column] = Some(block);
                true
            }
            None => false,
        }
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> Option<&[Option<Block>]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    /// Every block with its reference, bottom row first
    pub fn blocks(&self) -> impl Iterator<Item = (GridReference, &Block)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(column, cell)| {
                cell.as_ref()
                    .map(|block| (GridReference::new(row as i32, column as i32), block))
            })
        })
    }

    pub fn block_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// References of the occupied cells in `column`, bottom first
    pub fn column_references(&self, column: usize) -> Vec<GridReference> {
        if column >= self.columns {
            return Vec::new();
        }
        (0..self.rows)
            .filter(|&row| self.cells[row][column].is_some())
            .map(|row| GridReference::new(row as i32, column as i32))
            .collect()
    }

    /// True if the row has no empty cells
    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells
            .get(row)
            .map(|cells| cells.iter().all(Option::is_some))
            .unwrap_or(false)
    }

    /// True if the row has no blocks
    pub fn is_row_empty(&self, row: usize) -> bool {
        self.cells
            .get(row)
            .map(|cells| cells.iter().all(Option::is_none))
            .unwrap_or(false)
    }

    /// Full rows, bottom first
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.rows).filter(|&row| self.is_row_full(row)).collect()
    }

    /// Empty rows, bottom first
    pub fn empty_rows(&self) -> Vec<usize> {
        (0..self.rows).filter(|&row| self.is_row_empty(row)).collect()
    }

    /// Maximal empty runs in `column` that something above could fall into
    ///
    /// A run counts when it is bounded below by the floor or a block and above by
    /// a block. The open run at the top of a column is not a gap.
    pub fn get_column_gaps(&self, column: usize) -> Vec<GridRange> {
        let mut gaps = Vec::new();
        if column >= self.columns {
            return gaps;
        }
        let mut run_start: Option<usize> = None;
        for row in 0..self.rows {
            if self.cells[row][column].is_none() {
                run_start.get_or_insert(row);
            } else if let Some(start) = run_start.take() {
                gaps.push(GridRange::vertical(
                    GridReference::new(start as i32, column as i32),
                    row - start,
                ));
            }
        }
        gaps
    }

    /// True if `reference` is one of the active shape's cells
    fn is_player_cell(&self, reference: GridReference) -> bool {
        self.shape
            .as_ref()
            .map_or(false, |shape| shape.references().contains(&reference))
    }

    fn can_place(&self, references: &[GridReference]) -> bool {
        let mut seen = HashSet::with_capacity(references.len());
        references
            .iter()
            .all(|r| self.is_empty_at(*r) && seen.insert(*r))
    }

    /// Place blocks atomically
    ///
    /// Succeeds only if the lengths match and every destination is in bounds,
    /// empty and distinct; otherwise nothing is placed.
    pub fn add_blocks(&mut self, blocks: Vec<Block>, references: &[GridReference]) -> bool {
        if blocks.is_empty() || blocks.len() != references.len() || !self.can_place(references) {
            return false;
        }
        let mut placed = Vec::with_capacity(blocks.len());
        for (block, &reference) in blocks.into_iter().zip(references) {
            self.put(reference, block);
            placed.push(PlacedBlock { block, reference });
        }
        self.notify(|d| d.blocks_added(&placed));
        true
    }

    /// Place a single block into an empty in-bounds cell
    pub fn add_block(&mut self, block: Block, reference: GridReference) -> bool {
        if !self.is_empty_at(reference) {
            return false;
        }
        self.put(reference, block);
        self.notify(|d| d.block_added(&block, reference));
        true
    }

    /// Remove whatever blocks sit at `references` as one operation
    ///
    /// Empty, out-of-bounds and active-shape references are skipped. Returns the
    /// removed blocks.
    pub fn remove_blocks(&mut self, references: &[GridReference]) -> Vec<PlacedBlock> {
        let mut seen = HashSet::with_capacity(references.len());
        let targets: Vec<GridReference> = references
            .iter()
            .copied()
            .filter(|r| !self.is_player_cell(*r) && seen.insert(*r))
            .collect();
        let removed: Vec<PlacedBlock> = targets
            .into_iter()
            .filter_map(|reference| {
                self.take(reference)
                    .map(|block| PlacedBlock { block, reference })
            })
            .collect();
        if !removed.is_empty() {
            self.notify(|d| d.blocks_removed(&removed));
        }
        removed
    }

    /// Remove one block; the active shape's cells are left alone
    pub fn remove_block(&mut self, reference: GridReference) -> Option<Block> {
        if self.is_player_cell(reference) {
            return None;
        }
        let block = self.take(reference)?;
        self.notify(|d| d.block_removed(&block, reference));
        Some(block)
    }

    /// Mark or unmark the block at `reference` as a ghost
    pub fn set_ghost(&mut self, reference: GridReference, ghost: bool) -> bool {
        let Some((row, column)) = self.index(reference) else {
            return false;
        };
        match self.cells[row][column].as_mut() {
            Some(block) => {
                block.set_ghost(ghost);
                true
            }
            None => false,
        }
    }

    /// Whether the blocks at `from` could move to `to`
    ///
    /// Every destination must be in bounds and either empty or one of the sources,
    /// so a shape may pass through its own footprint.
    pub fn can_move(&self, from: &[GridReference], to: &[GridReference]) -> bool {
        if from.len() != to.len() {
            return false;
        }
        let sources: HashSet<GridReference> = from.iter().copied().collect();
        to.iter().all(|r| {
            let cell = self.get(*r);
            cell.inside && (cell.block.is_none() || sources.contains(r))
        })
    }

    /// Lift every source first, then write each lifted block to its destination
    fn relocate(&mut self, from: &[GridReference], to: &[GridReference]) -> Vec<MovedBlock> {
        let lifted: Vec<Option<Block>> = from.iter().map(|r| self.take(*r)).collect();
        let mut moved = Vec::with_capacity(lifted.len());
        for ((block, &source), &destination) in lifted.into_iter().zip(from).zip(to) {
            if let Some(block) = block {
                if self.put(destination, block) {
                    moved.push(MovedBlock {
                        block,
                        from: source,
                        to: destination,
                    });
                }
            }
        }
        moved
    }

    /// Move blocks by identity from `from[i]` to `to[i]`
    ///
    /// Sources and destinations may overlap. Legality is not checked here; call
    /// [`BlockGrid::can_move`] first when it matters. Pairs touching the active
    /// shape are skipped; the shape moves only through the player operations.
    /// Returns false only for empty or mismatched input.
    pub fn move_blocks(&mut self, from: &[GridReference], to: &[GridReference]) -> bool {
        if from.is_empty() || from.len() != to.len() {
            return false;
        }
        let (from, to): (Vec<GridReference>, Vec<GridReference>) = from
            .iter()
            .zip(to)
            .filter(|(f, t)| !self.is_player_cell(**f) && !self.is_player_cell(**t))
            .map(|(f, t)| (*f, *t))
            .unzip();
        let moved = self.relocate(&from, &to);
        if !moved.is_empty() {
            self.notify(|d| d.blocks_moved(&moved));
        }
        true
    }

    /// Move one block into an empty cell; not for the active shape's cells
    pub fn move_block(&mut self, from: GridReference, to: GridReference) -> bool {
        if self.block_at(from).is_none()
            || self.is_player_cell(from)
            || !self.can_move(&[from], &[to])
        {
            return false;
        }
        if let Some(movement) = self.relocate(&[from], &[to]).pop() {
            self.notify(|d| d.block_moved(&movement));
        }
        true
    }

    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }

    /// Where the active shape's rotation origin currently sits
    pub fn player_origin(&self) -> Option<GridReference> {
        self.shape.as_ref().map(Shape::origin)
    }

    /// Default spawn origin: middle column, topmost block on the top row
    ///
    /// On grids too narrow for the middle column the origin shifts sideways so
    /// the shape still fits, where it can.
    pub fn spawn_origin(&self, shape: &Shape) -> GridReference {
        let offsets: Vec<GridOffset> = shape.relative_references().collect();
        let top = offsets.iter().map(|o| o.row_delta).max().unwrap_or(0);
        let left = offsets.iter().map(|o| o.column_delta).min().unwrap_or(0);
        let right = offsets.iter().map(|o| o.column_delta).max().unwrap_or(0);

        let mut column = (self.columns / 2) as i32;
        let (lowest, highest) = (-left, self.columns as i32 - 1 - right);
        if lowest <= highest {
            column = column.clamp(lowest, highest);
        }
        GridReference::new(self.rows as i32 - 1 - top, column)
    }

    /// Place `shape` as the active shape with its origin at `origin`
    /// (default: [`BlockGrid::spawn_origin`])
    pub fn add_shape(&mut self, mut shape: Shape, origin: Option<GridReference>) -> bool {
        if self.shape.is_some() {
            return false;
        }
        let origin = origin.unwrap_or_else(|| self.spawn_origin(&shape));
        shape.move_to(origin);
        if !self.can_place(shape.references()) {
            trace!("shape {:?} does not fit at {:?}", shape.name(), origin);
            return false;
        }
        for (reference, colour) in shape.blocks() {
            self.put(reference, Block::new(colour, BlockType::Shape));
        }
        self.shape = Some(shape);
        if let (Some(delegate), Some(shape)) = (self.delegate.as_deref_mut(), self.shape.as_ref()) {
            delegate.shape_added(shape);
        }
        true
    }

    fn player_translation(
        &self,
        direction: MoveDirection,
    ) -> Option<(Vec<GridReference>, Vec<GridReference>)> {
        let shape = self.shape.as_ref()?;
        let offset = direction.direction().offset();
        let from = shape.references().to_vec();
        let to = from.iter().map(|r| r.offset(offset)).collect();
        Some((from, to))
    }

    pub fn can_move_player(&self, direction: MoveDirection) -> bool {
        self.player_translation(direction)
            .map(|(from, to)| self.can_move(&from, &to))
            .unwrap_or(false)
    }

    /// Translate the active shape one cell
    pub fn move_player(&mut self, direction: MoveDirection) -> bool {
        let Some((from, to)) = self.player_translation(direction) else {
            return false;
        };
        if !self.can_move(&from, &to) {
            trace!("player move {} rejected", direction.as_str());
            return false;
        }
        self.relocate(&from, &to);
        if let Some(shape) = self.shape.as_mut() {
            shape.move_in(direction.direction());
        }
        if let (Some(delegate), Some(shape)) = (self.delegate.as_deref_mut(), self.shape.as_ref()) {
            delegate.shape_moved(shape, direction);
        }
        true
    }

    /// Rotate the active shape clockwise using the first legal kick
    pub fn rotate_shape(&mut self) -> bool {
        let Some(shape) = self.shape.as_ref() else {
            return false;
        };
        if !shape.can_be_rotated() {
            return false;
        }
        let from = shape.references().to_vec();
        let found = shape.current_kicks().iter().find_map(|&kick| {
            let to = shape.rotation_with_kick(kick);
            self.can_move(&from, &to).then_some((kick, to))
        });
        let Some((kick, to)) = found else {
            trace!("rotation of {:?} rejected, no legal kick", shape.name());
            return false;
        };

        self.relocate(&from, &to);
        if let Some(shape) = self.shape.as_mut() {
            shape.rotate(kick);
        }
        if let (Some(delegate), Some(shape)) = (self.delegate.as_deref_mut(), self.shape.as_ref()) {
            delegate.shape_rotated(shape, kick);
        }
        true
    }

    /// Rows the active shape can fall, checking one row at a time
    fn drop_distance(&self, shape: &Shape) -> u32 {
        let from = shape.references();
        let lowest = from.iter().map(|r| r.row).min().unwrap_or(0);
        let mut distance = 0;
        for depth in 1..=lowest {
            let to: Vec<GridReference> = from.iter().map(|r| r.offset_by(-depth, 0)).collect();
            if !self.can_move(from, &to) {
                break;
            }
            distance = depth as u32;
        }
        distance
    }

    /// Origin the active shape would have after dropping
    pub fn shape_can_drop_to(&self) -> Option<GridReference> {
        let shape = self.shape.as_ref()?;
        let distance = self.drop_distance(shape);
        Some(shape.origin().offset_by(-(distance as i32), 0))
    }

    /// Cells the active shape would occupy after dropping (the ghost)
    pub fn ghost_references(&self) -> Option<Vec<GridReference>> {
        let shape = self.shape.as_ref()?;
        let distance = self.drop_distance(shape) as i32;
        Some(
            shape
                .references()
                .iter()
                .map(|r| r.offset_by(-distance, 0))
                .collect(),
        )
    }

    /// Drop the active shape as far as it goes in one move
    ///
    /// Returns the distance fallen, or `None` without an active shape.
    pub fn drop_player(&mut self) -> Option<u32> {
        let shape = self.shape.as_ref()?;
        let distance = self.drop_distance(shape);
        if distance == 0 {
            return Some(0);
        }
        let from = shape.references().to_vec();
        let to: Vec<GridReference> = from
            .iter()
            .map(|r| r.offset_by(-(distance as i32), 0))
            .collect();

        self.relocate(&from, &to);
        if let Some(shape) = self.shape.as_mut() {
            shape.move_by(GridOffset::new(-(distance as i32), 0));
        }
        if let (Some(delegate), Some(shape)) = (self.delegate.as_deref_mut(), self.shape.as_ref()) {
            delegate.shape_dropped(shape, distance);
        }
        Some(distance)
    }

    /// Turn the active shape's blocks into `kind` in place; the grid no longer has
    /// an active shape afterwards
    pub fn replace_player_with_blocks_of_type(&mut self, kind: BlockType) -> bool {
        let Some(shape) = self.shape.take() else {
            return false;
        };
        for reference in shape.references() {
            if let Some((row, column)) = self.index(*reference) {
                if let Some(block) = self.cells[row][column].as_mut() {
                    block.set_kind(kind);
                }
            }
        }
        self.notify(|d| d.shape_removed(&shape, Some(kind)));
        true
    }

    /// Delete the active shape and its blocks
    pub fn remove_player(&mut self) -> bool {
        let Some(shape) = self.shape.take() else {
            return false;
        };
        for reference in shape.references() {
            self.take(*reference);
        }
        self.notify(|d| d.shape_removed(&shape, None));
        true
    }

    /// Remove every block, walls included, and forget the active shape
    pub fn clear(&mut self) {
        self.shape = None;
        let all: Vec<GridReference> = self.blocks().map(|(r, _)| r).collect();
        self.remove_blocks(&all);
    }
}

impl fmt::Debug for BlockGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockGrid")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("blocks", &self.block_count())
            .field("shape", &self.shape)
            .field("delegate", &self.delegate.is_some())
            .finish()
    }
}
