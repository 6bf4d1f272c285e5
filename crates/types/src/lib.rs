//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental value types used throughout the engine.
//! Everything here is plain data with no behaviour beyond parsing and simple
//! arithmetic, so it can be shared by the grid, the effects pipeline and any
//! presentation layer.
//!
//! # Grid Coordinates
//!
//! - **Rows** count upwards from the floor: row 0 is the bottom row
//! - **Columns** count from the left: column 0 is the leftmost column
//! - Default board is 20 rows x 10 columns
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ROW_POINTS` | 0/40/100/300/1200 | Classic points per simultaneous row count |
//! | `EXPLODED_BLOCK_POINTS` | 10 | Points per block exploded by a colour match |
//! | `COLOUR_MATCH_POINTS` | 300 | Flat points for a colour match of minimum size |
//! | `COLOUR_MATCH_OVERFLOW_POINTS` | 100 | Points per block above the minimum |
//!
//! # Drop Intervals by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 800ms |
//! | 3 | 650ms |
//! | 4 | 500ms |
//! | 5 | 400ms |
//! | 6 | 320ms |
//! | 7 | 250ms |
//! | 8 | 200ms |
//! | 9 | 160ms |
//! | 10+ | 120ms floor |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{BlockColour, Orientation, ShapeName, GridReference, Direction};
//!
//! let name = ShapeName::from_str("l").unwrap();
//! assert_eq!(name, ShapeName::L);
//!
//! assert_eq!(Orientation::Up.rotate_cw(), Orientation::Right);
//! assert_eq!(BlockColour::from_index(1), Some(BlockColour::Orange));
//!
//! let r = GridReference::new(0, 4);
//! assert_eq!(r.adjacent(Direction::Top), GridReference::new(1, 4));
//! ```

pub mod geometry;

pub use geometry::{
    Direction, GridOffset, GridRange, GridRangeError, GridRangeOrientation, GridReference,
    MoveDirection,
};

/// Default grid height in rows
pub const DEFAULT_ROWS: usize = 20;

/// Default grid width in columns
pub const DEFAULT_COLUMNS: usize = 10;

/// Default number of levels in a game
pub const DEFAULT_LEVELS: usize = 10;

/// Smallest connected same-colour group that counts as a match
pub const DEFAULT_MINIMUM_MATCH_COUNT: usize = 9;

/// Maximum number of wall-kick candidates per orientation
pub const MAX_KICKS: usize = 5;

/// Classic points for clearing N rows at once (before the level multiplier)
pub const ROW_POINTS: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points for each block exploded by a colour match (doubled on hard drop)
pub const EXPLODED_BLOCK_POINTS: u32 = 10;

/// Flat points for one colour match of the minimum size
pub const COLOUR_MATCH_POINTS: u32 = 300;

/// Points for each matched block beyond the minimum size
pub const COLOUR_MATCH_OVERFLOW_POINTS: u32 = 100;

/// Jewel rows are worth `JEWEL_ROW_UNIT * T(n)` where `T` is the triangular number
pub const JEWEL_ROW_UNIT: u32 = 100;

/// Jewel collection bonus before decay
pub const JEWEL_BONUS_BASE: u32 = 1000;

/// Bonus lost per row removed (on average) for each jewel collected
pub const JEWEL_BONUS_DECAY: u32 = 100;

/// Drop intervals by level (milliseconds per row), index 0 = level 1
pub const DROP_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Drop interval once the table is exhausted
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// The fixed block palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockColour {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl BlockColour {
    pub const ALL: [BlockColour; 6] = [
        BlockColour::Red,
        BlockColour::Orange,
        BlockColour::Yellow,
        BlockColour::Green,
        BlockColour::Blue,
        BlockColour::Purple,
    ];

    /// Palette lookup by index (0..=5)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            BlockColour::Red => 0,
            BlockColour::Orange => 1,
            BlockColour::Yellow => 2,
            BlockColour::Green => 3,
            BlockColour::Blue => 4,
            BlockColour::Purple => 5,
        }
    }

    /// Parse colour from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(BlockColour::Red),
            "orange" => Some(BlockColour::Orange),
            "yellow" => Some(BlockColour::Yellow),
            "green" => Some(BlockColour::Green),
            "blue" => Some(BlockColour::Blue),
            "purple" => Some(BlockColour::Purple),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockColour::Red => "red",
            BlockColour::Orange => "orange",
            BlockColour::Yellow => "yellow",
            BlockColour::Green => "green",
            BlockColour::Blue => "blue",
            BlockColour::Purple => "purple",
        }
    }
}

/// Role of a block on the grid
///
/// - **Ordinary**: a landed block, subject to every effect
/// - **Shape**: part of the active falling shape
/// - **Wall**: permanent terrain, never moved or removed
/// - **Jewel**: behaves like an ordinary block; collecting it is a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockType {
    Ordinary,
    Shape,
    Wall,
    Jewel,
}

impl BlockType {
    /// First character of a text-layout token
    pub fn token_char(&self) -> char {
        match self {
            BlockType::Ordinary => 'X',
            BlockType::Shape => 'S',
            BlockType::Wall => 'W',
            BlockType::Jewel => 'J',
        }
    }

    /// Role selected by a text-layout token character (`P` marks a shape origin)
    pub fn from_token_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'X' => Some(BlockType::Ordinary),
            'S' | 'P' => Some(BlockType::Shape),
            'W' => Some(BlockType::Wall),
            'J' => Some(BlockType::Jewel),
            _ => None,
        }
    }

    /// Whether effects may move this block
    pub fn is_movable(&self) -> bool {
        matches!(self, BlockType::Ordinary | BlockType::Jewel)
    }
}

/// Names of the polyomino templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeName {
    L,
    J,
    I,
    O,
    S,
    Z,
    /// Shape built from an arbitrary reference set (text fixtures)
    Custom,
}

impl ShapeName {
    /// The six named templates a game draws from
    pub const STANDARD: [ShapeName; 6] = [
        ShapeName::L,
        ShapeName::J,
        ShapeName::I,
        ShapeName::O,
        ShapeName::S,
        ShapeName::Z,
    ];

    /// Parse shape name from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeName;
    ///
    /// assert_eq!(ShapeName::from_str("i"), Some(ShapeName::I));
    /// assert_eq!(ShapeName::from_str("Z"), Some(ShapeName::Z));
    /// assert_eq!(ShapeName::from_str("t"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "l" => Some(ShapeName::L),
            "j" => Some(ShapeName::J),
            "i" => Some(ShapeName::I),
            "o" => Some(ShapeName::O),
            "s" => Some(ShapeName::S),
            "z" => Some(ShapeName::Z),
            "custom" => Some(ShapeName::Custom),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeName::L => "l",
            ShapeName::J => "j",
            ShapeName::I => "i",
            ShapeName::O => "o",
            ShapeName::S => "s",
            ShapeName::Z => "z",
            ShapeName::Custom => "custom",
        }
    }
}

/// Orientation of a shape; `Up` is the spawn orientation
///
/// The clockwise cycle is: Up → Right → Down → Left → Up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
    ];

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Orientation;
    ///
    /// assert_eq!(Orientation::Up.rotate_cw(), Orientation::Right);
    /// assert_eq!(Orientation::Left.rotate_cw(), Orientation::Up);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Orientation::Up => Orientation::Right,
            Orientation::Right => Orientation::Down,
            Orientation::Down => Orientation::Left,
            Orientation::Left => Orientation::Up,
        }
    }

    pub fn rotate_ccw(&self) -> Self {
        match self {
            Orientation::Up => Orientation::Left,
            Orientation::Left => Orientation::Down,
            Orientation::Down => Orientation::Right,
            Orientation::Right => Orientation::Up,
        }
    }

    /// Position in the clockwise cycle, `Up` = 0
    pub fn index(&self) -> usize {
        match self {
            Orientation::Up => 0,
            Orientation::Right => 1,
            Orientation::Down => 2,
            Orientation::Left => 3,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Orientation::Up),
            "right" | "r" => Some(Orientation::Right),
            "down" | "d" => Some(Orientation::Down),
            "left" | "l" => Some(Orientation::Left),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Up => "up",
            Orientation::Right => "right",
            Orientation::Down => "down",
            Orientation::Left => "left",
        }
    }
}

/// Categories of in-game accomplishment counted by effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Achievement {
    OneRow,
    TwoRows,
    ThreeRows,
    FourRows,
    ExplodedBlock,
    Match10,
    Match20,
    ColourMatch,
    ColourMatchGroup,
    Jewel,
}

impl Achievement {
    pub const COUNT: usize = 10;

    pub const ALL: [Achievement; Achievement::COUNT] = [
        Achievement::OneRow,
        Achievement::TwoRows,
        Achievement::ThreeRows,
        Achievement::FourRows,
        Achievement::ExplodedBlock,
        Achievement::Match10,
        Achievement::Match20,
        Achievement::ColourMatch,
        Achievement::ColourMatchGroup,
        Achievement::Jewel,
    ];

    /// Row-clear buckets in order of multiplicity
    pub const ROWS: [Achievement; 4] = [
        Achievement::OneRow,
        Achievement::TwoRows,
        Achievement::ThreeRows,
        Achievement::FourRows,
    ];

    pub fn index(&self) -> usize {
        match self {
            Achievement::OneRow => 0,
            Achievement::TwoRows => 1,
            Achievement::ThreeRows => 2,
            Achievement::FourRows => 3,
            Achievement::ExplodedBlock => 4,
            Achievement::Match10 => 5,
            Achievement::Match20 => 6,
            Achievement::ColourMatch => 7,
            Achievement::ColourMatchGroup => 8,
            Achievement::Jewel => 9,
        }
    }

    /// Bucket for `rows` simultaneously cleared rows; four or more share the top bucket
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Achievement;
    ///
    /// assert_eq!(Achievement::for_rows(0), None);
    /// assert_eq!(Achievement::for_rows(2), Some(Achievement::TwoRows));
    /// assert_eq!(Achievement::for_rows(6), Some(Achievement::FourRows));
    /// ```
    pub fn for_rows(rows: usize) -> Option<Self> {
        match rows {
            0 => None,
            1 => Some(Achievement::OneRow),
            2 => Some(Achievement::TwoRows),
            3 => Some(Achievement::ThreeRows),
            _ => Some(Achievement::FourRows),
        }
    }

    /// Number of rows a row-clear bucket stands for (0 for other kinds)
    pub fn row_count(&self) -> u32 {
        match self {
            Achievement::OneRow => 1,
            Achievement::TwoRows => 2,
            Achievement::ThreeRows => 3,
            Achievement::FourRows => 4,
            _ => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Achievement::OneRow => "oneRow",
            Achievement::TwoRows => "twoRows",
            Achievement::ThreeRows => "threeRows",
            Achievement::FourRows => "fourRows",
            Achievement::ExplodedBlock => "explodedBlock",
            Achievement::Match10 => "match10",
            Achievement::Match20 => "match20",
            Achievement::ColourMatch => "colourMatch",
            Achievement::ColourMatchGroup => "colourMatchGroup",
            Achievement::Jewel => "jewel",
        }
    }
}

/// The rule sets a game can be played with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameVariant {
    /// Classic line clearing
    Tetris,
    /// Same-colour groups explode, loose blocks fall per column
    ColourMatcher,
    /// Line clearing with per-column gravity afterwards
    GravityMatcher,
    /// Clear the rows holding the jewels
    Jewel,
}

impl GameVariant {
    pub const ALL: [GameVariant; 4] = [
        GameVariant::Tetris,
        GameVariant::ColourMatcher,
        GameVariant::GravityMatcher,
        GameVariant::Jewel,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            GameVariant::Tetris => "Tetris",
            GameVariant::ColourMatcher => "Colour Matcher",
            GameVariant::GravityMatcher => "Gravity Matcher",
            GameVariant::Jewel => "Jewel Collector",
        }
    }

    pub fn genre(&self) -> &'static str {
        match self {
            GameVariant::Tetris | GameVariant::GravityMatcher => "line clear",
            GameVariant::ColourMatcher => "colour match",
            GameVariant::Jewel => "collection",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tetris" | "classic" => Some(GameVariant::Tetris),
            "colour" | "color" | "colourmatcher" => Some(GameVariant::ColourMatcher),
            "gravity" | "gravitymatcher" => Some(GameVariant::GravityMatcher),
            "jewel" | "jewels" => Some(GameVariant::Jewel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameVariant::Tetris => "tetris",
            GameVariant::ColourMatcher => "colour",
            GameVariant::GravityMatcher => "gravity",
            GameVariant::Jewel => "jewel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_indices_are_dense() {
        for (i, kind) in Achievement::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_colour_index_roundtrip() {
        for colour in BlockColour::ALL {
            assert_eq!(BlockColour::from_index(colour.index()), Some(colour));
        }
        assert_eq!(BlockColour::from_index(6), None);
    }

    #[test]
    fn test_token_chars() {
        assert_eq!(BlockType::from_token_char('x'), Some(BlockType::Ordinary));
        assert_eq!(BlockType::from_token_char('P'), Some(BlockType::Shape));
        assert_eq!(BlockType::from_token_char('?'), None);
        assert!(!BlockType::Wall.is_movable());
        assert!(BlockType::Jewel.is_movable());
    }

    #[test]
    fn test_orientation_cycle() {
        let mut o = Orientation::Up;
        for _ in 0..4 {
            assert_eq!(o.rotate_cw().rotate_ccw(), o);
            o = o.rotate_cw();
        }
        assert_eq!(o, Orientation::Up);
    }

    #[test]
    fn test_drop_interval_table() {
        assert_eq!(DROP_INTERVALS[0], 1000);
        assert_eq!(DROP_INTERVALS[8], 160);
        assert!(DROP_INTERVAL_FLOOR_MS < DROP_INTERVALS[8]);
    }
}
