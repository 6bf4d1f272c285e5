//! Grid geometry primitives
//!
//! Coordinates are `(row, column)` with row 0 at the bottom of the grid and
//! column 0 on the left. Everything here is a plain `Copy` value type.

use std::ops::{Add, Neg, Sub};

/// Offset between two grid references, used for wall kicks and translations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOffset {
    pub row_delta: i32,
    pub column_delta: i32,
}

impl GridOffset {
    pub const ZERO: GridOffset = GridOffset::new(0, 0);

    pub const fn new(row_delta: i32, column_delta: i32) -> Self {
        Self {
            row_delta,
            column_delta,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.row_delta == 0 && self.column_delta == 0
    }
}

impl Add for GridOffset {
    type Output = GridOffset;

    fn add(self, rhs: GridOffset) -> GridOffset {
        GridOffset::new(
            self.row_delta + rhs.row_delta,
            self.column_delta + rhs.column_delta,
        )
    }
}

impl Neg for GridOffset {
    type Output = GridOffset;

    fn neg(self) -> GridOffset {
        GridOffset::new(-self.row_delta, -self.column_delta)
    }
}

/// One of the four cardinal neighbours of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
    Top,
    Bottom,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Top,
        Direction::Bottom,
    ];

    /// Unit offset for one step in this direction
    pub fn offset(&self) -> GridOffset {
        match self {
            Direction::Left => GridOffset::new(0, -1),
            Direction::Right => GridOffset::new(0, 1),
            Direction::Top => GridOffset::new(1, 0),
            Direction::Bottom => GridOffset::new(-1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
        }
    }
}

/// Directions the player may move the active shape in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    /// Grid direction for this move (`Down` is the bottom neighbour)
    pub fn direction(&self) -> Direction {
        match self {
            MoveDirection::Left => Direction::Left,
            MoveDirection::Right => Direction::Right,
            MoveDirection::Down => Direction::Bottom,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Some(MoveDirection::Left),
            "right" | "r" => Some(MoveDirection::Right),
            "down" | "d" => Some(MoveDirection::Down),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveDirection::Left => "left",
            MoveDirection::Right => "right",
            MoveDirection::Down => "down",
        }
    }
}

/// A cell position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridReference {
    pub row: i32,
    pub column: i32,
}

impl GridReference {
    pub const ORIGIN: GridReference = GridReference::new(0, 0);

    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    pub fn offset(&self, offset: GridOffset) -> GridReference {
        GridReference::new(self.row + offset.row_delta, self.column + offset.column_delta)
    }

    pub fn offset_by(&self, rows: i32, columns: i32) -> GridReference {
        GridReference::new(self.row + rows, self.column + columns)
    }

    /// The neighbouring reference one step in `direction`
    pub fn adjacent(&self, direction: Direction) -> GridReference {
        self.offset(direction.offset())
    }

    pub fn left(&self) -> GridReference {
        self.adjacent(Direction::Left)
    }

    pub fn right(&self) -> GridReference {
        self.adjacent(Direction::Right)
    }

    pub fn above(&self) -> GridReference {
        self.adjacent(Direction::Top)
    }

    pub fn below(&self) -> GridReference {
        self.adjacent(Direction::Bottom)
    }

    /// Offset that takes `self` to `other`
    pub fn offset_to(&self, other: GridReference) -> GridOffset {
        GridOffset::new(other.row - self.row, other.column - self.column)
    }

    /// True if `other` is one of the four cardinal neighbours
    pub fn is_adjacent_to(&self, other: GridReference) -> bool {
        (self.row - other.row).abs() + (self.column - other.column).abs() == 1
    }
}

impl Add<GridOffset> for GridReference {
    type Output = GridReference;

    fn add(self, rhs: GridOffset) -> GridReference {
        self.offset(rhs)
    }
}

impl Sub<GridReference> for GridReference {
    type Output = GridOffset;

    fn sub(self, rhs: GridReference) -> GridOffset {
        rhs.offset_to(self)
    }
}

/// Orientation of a [`GridRange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridRangeOrientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridRangeError {
    #[error("range ends {start:?} and {end:?} share neither a row nor a column")]
    NotAligned {
        start: GridReference,
        end: GridReference,
    },
}

/// An inclusive run of cells along a single row or column
///
/// A range whose ends coincide is a single cell and reports itself as vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridRange {
    start: GridReference,
    end: GridReference,
}

impl GridRange {
    pub fn new(start: GridReference, end: GridReference) -> Result<Self, GridRangeError> {
        if start.row != end.row && start.column != end.column {
            return Err(GridRangeError::NotAligned { start, end });
        }
        Ok(Self { start, end })
    }

    /// Vertical range covering `length` cells upwards from `start`
    ///
    /// `length` must be at least 1.
    pub fn vertical(start: GridReference, length: usize) -> Self {
        let end = start.offset_by(length.max(1) as i32 - 1, 0);
        Self { start, end }
    }

    pub fn start(&self) -> GridReference {
        self.start
    }

    pub fn end(&self) -> GridReference {
        self.end
    }

    pub fn orientation(&self) -> GridRangeOrientation {
        if self.start.column == self.end.column {
            GridRangeOrientation::Vertical
        } else {
            GridRangeOrientation::Horizontal
        }
    }

    /// Number of cells covered, counting both ends
    pub fn len(&self) -> usize {
        let span = match self.orientation() {
            GridRangeOrientation::Vertical => (self.end.row - self.start.row).abs(),
            GridRangeOrientation::Horizontal => (self.end.column - self.start.column).abs(),
        };
        span as usize + 1
    }

    /// Always false: a range covers at least one cell
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, reference: GridReference) -> bool {
        let (row_lo, row_hi) = min_max(self.start.row, self.end.row);
        let (col_lo, col_hi) = min_max(self.start.column, self.end.column);
        (row_lo..=row_hi).contains(&reference.row) && (col_lo..=col_hi).contains(&reference.column)
    }

    /// Lowest row covered (for vertical ranges, the bottom of the run)
    pub fn min_row(&self) -> i32 {
        self.start.row.min(self.end.row)
    }

    /// Highest row covered
    pub fn max_row(&self) -> i32 {
        self.start.row.max(self.end.row)
    }

    /// Every reference in the range, from `start` to `end`
    pub fn references(&self) -> impl Iterator<Item = GridReference> + '_ {
        let step = GridOffset::new(
            (self.end.row - self.start.row).signum(),
            (self.end.column - self.start.column).signum(),
        );
        let start = self.start;
        (0..self.len() as i32).map(move |i| {
            start.offset_by(step.row_delta * i, step.column_delta * i)
        })
    }
}

fn min_max(a: i32, b: i32) -> (i32, i32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
