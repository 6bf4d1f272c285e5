//! Shapes module - polyomino templates, rotation and wall kick tables
//!
//! A shape is a set of block references plus a designated origin, the pivot for
//! rotation. Rotation is 90° clockwise about the origin: each reference is made
//! origin-relative, mapped `(r, c) -> (-c, r)` and translated back. Kick tables
//! are keyed by the orientation being rotated *from* and tried in order.
//!
//! Shapes know nothing about grids; legality is the grid's business.

use arrayvec::ArrayVec;

use crate::types::{
    BlockColour, Direction, GridOffset, GridReference, Orientation, ShapeName, MAX_KICKS,
};

/// Candidate kicks for one orientation
pub type KickList = ArrayVec<GridOffset, MAX_KICKS>;

/// Kick offsets as (row, column)
type KickRows = [[(i32, i32); MAX_KICKS]; 4];

/// Default kick table (shared by L, J, S and Z)
const DEFAULT_KICKS: KickRows = [
    // Up -> Right
    [(0, 0), (0, -1), (1, -1), (-2, 0), (-2, -1)],
    // Right -> Down
    [(0, 0), (0, 1), (-1, 1), (2, 0), (2, 1)],
    // Down -> Left
    [(0, 0), (0, 1), (1, 1), (-2, 0), (-2, 1)],
    // Left -> Up
    [(0, 0), (0, -1), (-1, -1), (2, 0), (2, -1)],
];

/// I shape kick table (wider than the default)
const I_KICKS: KickRows = [
    // Up -> Right
    [(0, 0), (0, -2), (0, 1), (-1, -2), (2, 1)],
    // Right -> Down
    [(0, 0), (0, -1), (0, 2), (2, -1), (-1, 2)],
    // Down -> Left
    [(0, 0), (0, 2), (0, -1), (1, 2), (-2, -1)],
    // Left -> Up
    [(0, 0), (0, 1), (0, -2), (-2, 1), (1, -2)],
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("shape has no blocks")]
    Empty,
    #[error("shape references do not include the (0, 0) origin")]
    MissingOrigin,
    #[error("shape has {references} references but {colours} colours")]
    ColourCountMismatch { references: usize, colours: usize },
    #[error("shape reference {0:?} appears more than once")]
    DuplicateReference(GridReference),
    #[error("{count} kicks given for {orientation:?}, at most {MAX_KICKS} allowed")]
    TooManyKicks { orientation: Orientation, count: usize },
}

/// Ordered kick candidates for each orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KickTable {
    kicks: [KickList; 4],
}

impl KickTable {
    /// Build a table from per-orientation lists, indexed Up, Right, Down, Left
    pub fn new(table: [&[GridOffset]; 4]) -> Result<Self, ShapeError> {
        let mut kicks: [KickList; 4] = Default::default();
        let slots = kicks.iter_mut().zip(table);
        for (orientation, (slot, list)) in Orientation::ALL.iter().zip(slots) {
            slot.try_extend_from_slice(list)
                .map_err(|_| ShapeError::TooManyKicks {
                    orientation: *orientation,
                    count: list.len(),
                })?;
        }
        Ok(Self { kicks })
    }

    /// A single zero kick for every orientation
    pub fn none() -> Self {
        let mut kicks: [KickList; 4] = Default::default();
        for slot in kicks.iter_mut() {
            slot.push(GridOffset::ZERO);
        }
        Self { kicks }
    }

    pub fn standard() -> Self {
        Self::from_rows(&DEFAULT_KICKS)
    }

    pub fn for_i() -> Self {
        Self::from_rows(&I_KICKS)
    }

    /// The table a named shape uses
    pub fn for_shape(name: ShapeName) -> Self {
        match name {
            ShapeName::I => Self::for_i(),
            ShapeName::O => Self::none(),
            _ => Self::standard(),
        }
    }

    fn from_rows(rows: &KickRows) -> Self {
        let mut kicks: [KickList; 4] = Default::default();
        for (slot, row) in kicks.iter_mut().zip(rows.iter()) {
            for &(r, c) in row {
                slot.push(GridOffset::new(r, c));
            }
        }
        Self { kicks }
    }

    /// Candidates tried when rotating clockwise out of `from`
    pub fn kicks(&self, from: Orientation) -> &[GridOffset] {
        &self.kicks[from.index()]
    }

    /// Owned copies of the four lists, indexed Up, Right, Down, Left
    pub fn to_lists(&self) -> [Vec<GridOffset>; 4] {
        Orientation::ALL.map(|orientation| self.kicks(orientation).to_vec())
    }
}

/// Template references (row, column) for a named shape, origin at (0, 0)
pub fn template(name: ShapeName) -> &'static [(i32, i32)] {
    match name {
        ShapeName::I => &[(0, -1), (0, 0), (0, 1), (0, 2)],
        ShapeName::O => &[(0, 0), (0, 1), (1, 0), (1, 1)],
        ShapeName::L => &[(0, -1), (0, 0), (0, 1), (1, 1)],
        ShapeName::J => &[(1, -1), (0, -1), (0, 0), (0, 1)],
        ShapeName::S => &[(0, -1), (0, 0), (1, 0), (1, 1)],
        ShapeName::Z => &[(1, -1), (1, 0), (0, 0), (0, 1)],
        ShapeName::Custom => &[(0, 0)],
    }
}

/// A polyomino: references, per-block colours, orientation and kicks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    name: ShapeName,
    references: Vec<GridReference>,
    origin_index: usize,
    colours: Vec<BlockColour>,
    orientation: Orientation,
    can_be_rotated: bool,
    kicks: KickTable,
}

impl Shape {
    /// Build a shape; `references` must contain `(0, 0)` and match `colours` in length
    pub fn new(
        name: ShapeName,
        references: Vec<GridReference>,
        colours: Vec<BlockColour>,
        kicks: KickTable,
        can_be_rotated: bool,
    ) -> Result<Self, ShapeError> {
        if references.is_empty() {
            return Err(ShapeError::Empty);
        }
        if references.len() != colours.len() {
            return Err(ShapeError::ColourCountMismatch {
                references: references.len(),
                colours: colours.len(),
            });
        }
        for (i, r) in references.iter().enumerate() {
            if references[..i].contains(r) {
                return Err(ShapeError::DuplicateReference(*r));
            }
        }
        let origin_index = references
            .iter()
            .position(|r| *r == GridReference::ORIGIN)
            .ok_or(ShapeError::MissingOrigin)?;

        Ok(Self {
            name,
            references,
            origin_index,
            colours,
            orientation: Orientation::Up,
            can_be_rotated,
            kicks,
        })
    }

    /// A named template in a single colour
    pub fn standard(name: ShapeName, colour: BlockColour) -> Self {
        let count = template(name).len();
        Self::from_template(name, vec![colour; count])
    }

    /// A named template with one colour per block
    pub fn standard_with_colours(
        name: ShapeName,
        colours: Vec<BlockColour>,
    ) -> Result<Self, ShapeError> {
        let count = template(name).len();
        if colours.len() != count {
            return Err(ShapeError::ColourCountMismatch {
                references: count,
                colours: colours.len(),
            });
        }
        Ok(Self::from_template(name, colours))
    }

    fn from_template(name: ShapeName, colours: Vec<BlockColour>) -> Self {
        let cells = template(name);
        let references: Vec<GridReference> = cells
            .iter()
            .map(|&(r, c)| GridReference::new(r, c))
            .collect();
        let origin_index = cells.iter().position(|&c| c == (0, 0)).unwrap_or(0);
        Self {
            name,
            references,
            origin_index,
            colours,
            orientation: Orientation::Up,
            can_be_rotated: name != ShapeName::O,
            kicks: KickTable::for_shape(name),
        }
    }

    /// Rebuild a placed shape from saved data
    ///
    /// `references` are absolute and `origin` must be one of them.
    pub fn restore(
        name: ShapeName,
        references: &[GridReference],
        colours: Vec<BlockColour>,
        origin: GridReference,
        orientation: Orientation,
        kicks: KickTable,
        can_be_rotated: bool,
    ) -> Result<Self, ShapeError> {
        let relative = references
            .iter()
            .map(|r| GridReference::ORIGIN.offset(origin.offset_to(*r)))
            .collect();
        let mut shape = Self::new(name, relative, colours, kicks, can_be_rotated)?;
        shape.move_to(origin);
        shape.orientation = orientation;
        Ok(shape)
    }

    pub fn name(&self) -> ShapeName {
        self.name
    }

    pub fn references(&self) -> &[GridReference] {
        &self.references
    }

    pub fn colours(&self) -> &[BlockColour] {
        &self.colours
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    /// Current position of the rotation origin
    pub fn origin(&self) -> GridReference {
        self.references[self.origin_index]
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn can_be_rotated(&self) -> bool {
        self.can_be_rotated
    }

    pub fn kick_table(&self) -> &KickTable {
        &self.kicks
    }

    pub fn kicks_for(&self, orientation: Orientation) -> &[GridOffset] {
        self.kicks.kicks(orientation)
    }

    /// Kicks tried when rotating out of the current orientation
    pub fn current_kicks(&self) -> &[GridOffset] {
        self.kicks.kicks(self.orientation)
    }

    /// References relative to the origin
    pub fn relative_references(&self) -> impl Iterator<Item = GridOffset> + '_ {
        let origin = self.origin();
        self.references.iter().map(move |r| origin.offset_to(*r))
    }

    /// `(reference, colour)` for every block
    pub fn blocks(&self) -> impl Iterator<Item = (GridReference, BlockColour)> + '_ {
        self.references
            .iter()
            .copied()
            .zip(self.colours.iter().copied())
    }

    pub fn move_by(&mut self, offset: GridOffset) {
        for r in self.references.iter_mut() {
            *r = r.offset(offset);
        }
    }

    /// Translate so the origin lands on `reference`
    pub fn move_to(&mut self, reference: GridReference) {
        let offset = self.origin().offset_to(reference);
        self.move_by(offset);
    }

    pub fn move_in(&mut self, direction: Direction) {
        self.move_by(direction.offset());
    }

    /// References after a clockwise rotation with `kick`, without changing the shape
    pub fn rotation_with_kick(&self, kick: GridOffset) -> Vec<GridReference> {
        let origin = self.origin();
        let pivot = origin.offset(kick);
        self.references
            .iter()
            .map(|r| {
                let rel = origin.offset_to(*r);
                pivot.offset(GridOffset::new(-rel.column_delta, rel.row_delta))
            })
            .collect()
    }

    /// Translate by `kick`, rotate clockwise about the origin, advance orientation
    pub fn rotate(&mut self, kick: GridOffset) {
        self.references = self.rotation_with_kick(kick);
        self.orientation = self.orientation.rotate_cw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(shape: &Shape) -> Vec<(i32, i32)> {
        shape.references().iter().map(|r| (r.row, r.column)).collect()
    }

    #[test]
    fn test_new_requires_origin() {
        let err = Shape::new(
            ShapeName::Custom,
            vec![GridReference::new(0, 1), GridReference::new(1, 1)],
            vec![BlockColour::Red; 2],
            KickTable::standard(),
            true,
        );
        assert_eq!(err, Err(ShapeError::MissingOrigin));
    }

    #[test]
    fn test_new_requires_matching_colours() {
        let err = Shape::new(
            ShapeName::Custom,
            vec![GridReference::ORIGIN, GridReference::new(0, 1)],
            vec![BlockColour::Red],
            KickTable::standard(),
            true,
        );
        assert!(matches!(err, Err(ShapeError::ColourCountMismatch { .. })));
    }

    #[test]
    fn test_rotation_is_clockwise_with_row_up() {
        let mut shape = Shape::standard(ShapeName::I, BlockColour::Blue);
        shape.rotate(GridOffset::ZERO);
        // horizontal bar (0,-1)..(0,2) becomes vertical, right-hand cell goes below
        assert_eq!(refs(&shape), vec![(1, 0), (0, 0), (-1, 0), (-2, 0)]);
        assert_eq!(shape.orientation(), Orientation::Right);
    }

    #[test]
    fn test_rotation_with_kick_is_pure() {
        let shape = Shape::standard(ShapeName::L, BlockColour::Red);
        let before = shape.clone();
        let rotated = shape.rotation_with_kick(GridOffset::new(0, -1));
        assert_eq!(shape, before);
        assert!(rotated.contains(&GridReference::new(0, -1)));
    }

    #[test]
    fn test_o_shape_does_not_rotate() {
        let shape = Shape::standard(ShapeName::O, BlockColour::Yellow);
        assert!(!shape.can_be_rotated());
        assert_eq!(shape.current_kicks(), &[GridOffset::ZERO]);
    }

    #[test]
    fn test_i_kicks_differ_from_default() {
        let i = Shape::standard(ShapeName::I, BlockColour::Red);
        let l = Shape::standard(ShapeName::L, BlockColour::Red);
        assert_ne!(i.kick_table(), l.kick_table());
        assert_eq!(
            l.kick_table(),
            Shape::standard(ShapeName::Z, BlockColour::Green).kick_table()
        );
    }

    #[test]
    fn test_move_to_places_origin() {
        let mut shape = Shape::standard(ShapeName::S, BlockColour::Green);
        shape.move_to(GridReference::new(10, 4));
        assert_eq!(shape.origin(), GridReference::new(10, 4));
        assert!(shape.references().contains(&GridReference::new(11, 5)));
    }

    #[test]
    fn test_kick_table_capacity() {
        let too_many = [GridOffset::ZERO; MAX_KICKS + 1];
        let err = KickTable::new([&too_many[..], &[], &[], &[]]);
        assert!(matches!(err, Err(ShapeError::TooManyKicks { .. })));
    }
}
