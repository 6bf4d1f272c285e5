//! Level rules per game variant
//!
//! | Variant | Effects | Progress | Goal |
//! |---------|---------|----------|------|
//! | Tetris | remove rows, drop into empty rows | weighted rows | 5 x number lines |
//! | Colour matcher | remove matched blocks, gravity | match groups | number + 2 matches |
//! | Gravity matcher | remove rows, gravity | weighted rows | 5 x number lines |
//! | Jewel | remove rows, drop into empty rows | jewels | number + 2 jewels |
//!
//! Weighted rows count a single clear as 1, a double as 3, a triple as 5 and
//! four or more as 8.

use std::fmt;

use rand::{Rng, RngCore};

use crate::core::rng::random_colour;
use crate::core::{Achievements, Block, PlacedBlock, ShapeColouring};
use crate::effects::{
    DropIntoEmptyRowsEffect, GravityEffect, GridEffect, RemoveMatchedBlocksEffect,
    RemoveRowsEffect,
};
use crate::scoring;
use crate::types::{Achievement, GameVariant, GridReference, DEFAULT_MINIMUM_MATCH_COUNT};

/// What a level asks the player to reach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub value: u32,
    pub unit: &'static str,
    pub description: String,
}

impl Goal {
    fn new(value: u32, unit: &'static str, verb: &str) -> Self {
        Self {
            value,
            unit,
            description: format!("{verb} {value} {unit}"),
        }
    }
}

/// Rules for one level of a game
pub trait Level: fmt::Debug {
    fn variant(&self) -> GameVariant;

    /// 1-based level number
    fn number(&self) -> u32;

    fn goal(&self) -> Goal;

    /// Progress towards the goal for the achievements gathered in this level
    fn progress(&self, achievements: &Achievements) -> u32;

    fn goal_achieved(&self, achievements: &Achievements) -> bool {
        self.progress(achievements) >= self.goal().value
    }

    /// Effects run after every landing, in order
    fn effects(&self) -> Vec<Box<dyn GridEffect>>;

    /// Points for one move's achievements
    ///
    /// `level_achievements` are those gathered earlier in the level, for rules
    /// that depend on the level so far.
    fn points_for(
        &self,
        achievements: &Achievements,
        level_achievements: Option<&Achievements>,
        hard_drop: bool,
    ) -> u64;

    fn drop_interval_ms(&self) -> u32 {
        scoring::drop_interval_ms(self.number())
    }

    fn shape_colouring(&self) -> ShapeColouring {
        ShapeColouring::Uniform
    }

    /// Blocks placed on the empty grid when the level starts
    fn initial_blocks(
        &self,
        _rng: &mut dyn RngCore,
        _rows: usize,
        _columns: usize,
    ) -> Vec<PlacedBlock> {
        Vec::new()
    }
}

fn weighted_rows(achievements: &Achievements) -> u32 {
    achievements.get(Achievement::OneRow)
        + 3 * achievements.get(Achievement::TwoRows)
        + 5 * achievements.get(Achievement::ThreeRows)
        + 8 * achievements.get(Achievement::FourRows)
}

/// Classic line clearing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TetrisLevel {
    number: u32,
}

impl TetrisLevel {
    pub fn new(number: u32) -> Self {
        Self { number }
    }
}

impl Level for TetrisLevel {
    fn variant(&self) -> GameVariant {
        GameVariant::Tetris
    }

    fn number(&self) -> u32 {
        self.number
    }

    fn goal(&self) -> Goal {
        Goal::new(5 * self.number, "lines", "Clear")
    }

    fn progress(&self, achievements: &Achievements) -> u32 {
        weighted_rows(achievements)
    }

    fn effects(&self) -> Vec<Box<dyn GridEffect>> {
        vec![
            Box::new(RemoveRowsEffect::new(DEFAULT_MINIMUM_MATCH_COUNT)),
            Box::new(DropIntoEmptyRowsEffect),
        ]
    }

    fn points_for(
        &self,
        achievements: &Achievements,
        _level: Option<&Achievements>,
        hard_drop: bool,
    ) -> u64 {
        scoring::row_points(achievements, self.number)
            + scoring::exploded_block_points(achievements, hard_drop)
    }
}

/// Line clearing where loose blocks fall per column afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityMatcherLevel {
    number: u32,
}

impl GravityMatcherLevel {
    pub fn new(number: u32) -> Self {
        Self { number }
    }
}

impl Level for GravityMatcherLevel {
    fn variant(&self) -> GameVariant {
        GameVariant::GravityMatcher
    }

    fn number(&self) -> u32 {
        self.number
    }

    fn goal(&self) -> Goal {
        Goal::new(5 * self.number, "lines", "Clear")
    }

    fn progress(&self, achievements: &Achievements) -> u32 {
        weighted_rows(achievements)
    }

    fn effects(&self) -> Vec<Box<dyn GridEffect>> {
        vec![
            Box::new(RemoveRowsEffect::new(DEFAULT_MINIMUM_MATCH_COUNT)),
            Box::new(GravityEffect),
        ]
    }

    fn points_for(
        &self,
        achievements: &Achievements,
        _level: Option<&Achievements>,
        hard_drop: bool,
    ) -> u64 {
        scoring::row_points(achievements, self.number)
            + scoring::exploded_block_points(achievements, hard_drop)
    }
}

/// Same-colour groups explode; shapes come in mixed colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColourMatcherLevel {
    number: u32,
    minimum_match_count: usize,
}

impl ColourMatcherLevel {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            minimum_match_count: DEFAULT_MINIMUM_MATCH_COUNT,
        }
    }

    pub fn with_minimum_match_count(mut self, minimum_match_count: usize) -> Self {
        self.minimum_match_count = minimum_match_count;
        self
    }

    pub fn minimum_match_count(&self) -> usize {
        self.minimum_match_count
    }
}

impl Level for ColourMatcherLevel {
    fn variant(&self) -> GameVariant {
        GameVariant::ColourMatcher
    }

    fn number(&self) -> u32 {
        self.number
    }

    fn goal(&self) -> Goal {
        Goal::new(self.number + 2, "matches", "Make")
    }

    fn progress(&self, achievements: &Achievements) -> u32 {
        achievements.get(Achievement::ColourMatchGroup)
    }

    fn effects(&self) -> Vec<Box<dyn GridEffect>> {
        vec![
            Box::new(RemoveMatchedBlocksEffect::new(self.minimum_match_count)),
            Box::new(GravityEffect),
        ]
    }

    fn points_for(
        &self,
        achievements: &Achievements,
        _level: Option<&Achievements>,
        _hard_drop: bool,
    ) -> u64 {
        scoring::colour_match_points(
            achievements.get(Achievement::ColourMatch),
            self.minimum_match_count,
        )
    }

    fn shape_colouring(&self) -> ShapeColouring {
        ShapeColouring::PerBlock
    }
}

/// Clear the rows holding the jewels seeded at the start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JewelLevel {
    number: u32,
}

impl JewelLevel {
    pub fn new(number: u32) -> Self {
        Self { number }
    }

    pub fn jewel_count(&self) -> u32 {
        self.number + 2
    }
}

impl Level for JewelLevel {
    fn variant(&self) -> GameVariant {
        GameVariant::Jewel
    }

    fn number(&self) -> u32 {
        self.number
    }

    fn goal(&self) -> Goal {
        Goal::new(self.jewel_count(), "jewels", "Collect")
    }

    fn progress(&self, achievements: &Achievements) -> u32 {
        achievements.get(Achievement::Jewel)
    }

    fn effects(&self) -> Vec<Box<dyn GridEffect>> {
        vec![
            Box::new(RemoveRowsEffect::new(DEFAULT_MINIMUM_MATCH_COUNT)),
            Box::new(DropIntoEmptyRowsEffect),
        ]
    }

    fn points_for(
        &self,
        achievements: &Achievements,
        level: Option<&Achievements>,
        hard_drop: bool,
    ) -> u64 {
        scoring::jewel_row_points(achievements, self.number)
            + scoring::exploded_block_points(achievements, hard_drop)
            + scoring::jewel_bonus(achievements, level)
    }

    /// Jewels at random cells of the lower third, never completing a row
    fn initial_blocks(
        &self,
        rng: &mut dyn RngCore,
        rows: usize,
        columns: usize,
    ) -> Vec<PlacedBlock> {
        let band = (rows / 3).max(1);
        let mut free: Vec<GridReference> = (0..band)
            .flat_map(|row| {
                (0..columns).map(move |column| GridReference::new(row as i32, column as i32))
            })
            .collect();
        let mut per_row = vec![0usize; band];
        let mut placed = Vec::new();

        while placed.len() < self.jewel_count() as usize && !free.is_empty() {
            let reference = free.swap_remove(rng.gen_range(0..free.len()));
            let row = reference.row as usize;
            if per_row[row] + 1 >= columns {
                continue;
            }
            per_row[row] += 1;
            placed.push(PlacedBlock {
                block: Block::jewel(random_colour(rng)),
                reference,
            });
        }
        placed
    }
}

/// `count` levels of `variant`, numbered from 1
pub fn levels_for(
    variant: GameVariant,
    count: usize,
    minimum_match_count: usize,
) -> Vec<Box<dyn Level>> {
    (1..=count as u32)
        .map(|number| -> Box<dyn Level> {
            match variant {
                GameVariant::Tetris => Box::new(TetrisLevel::new(number)),
                GameVariant::GravityMatcher => Box::new(GravityMatcherLevel::new(number)),
                GameVariant::ColourMatcher => Box::new(
                    ColourMatcherLevel::new(number).with_minimum_match_count(minimum_match_count),
                ),
                GameVariant::Jewel => Box::new(JewelLevel::new(number)),
            }
        })
        .collect()
}
