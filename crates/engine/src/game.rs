//! Game module - level progression and scoring around one grid
//!
//! A turn goes: spawn a shape, move/rotate/drop it, then [`Game::land_shape`]
//! turns it into ordinary blocks, runs the level's effects to a fixed point and
//! scores the result. Reaching a level's goal does not advance automatically;
//! the driver calls [`Game::advance_level`] and [`Game::start_level`].

use log::{debug, info, warn};
use rand::RngCore;

use crate::config::GameConfig;
use crate::core::rng::random_shape;
use crate::core::{Achievements, BlockGrid, GridDelegate, GridError, PlacedBlock, Shape};
use crate::level::{levels_for, Level};
use crate::runner::{EffectView, EffectsRunner};
use crate::snapshot::GameSnapshot;
use crate::types::{BlockType, GameVariant, GridReference, MoveDirection};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("a game needs at least one level")]
    NoLevels,
    #[error("level index {index} out of range for {levels} levels")]
    LevelOutOfRange { index: usize, levels: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// What landing a shape produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    pub achievements: Achievements,
    pub points: u64,
    /// Score after this turn
    pub score: u64,
    pub goal_achieved: bool,
}

#[derive(Debug)]
pub struct Game {
    variant: GameVariant,
    config: GameConfig,
    grid: BlockGrid,
    levels: Vec<Box<dyn Level>>,
    level_index: usize,
    score: u64,
    level_achievements: Achievements,
    total_achievements: Achievements,
    runner: EffectsRunner,
    game_over: bool,
}

impl Game {
    pub fn new(variant: GameVariant, config: GameConfig) -> Result<Self, GameError> {
        let levels = levels_for(variant, config.levels, config.minimum_match_count);
        let Some(first) = levels.first() else {
            return Err(GameError::NoLevels);
        };
        let runner = EffectsRunner::new(first.effects());
        let grid = BlockGrid::new(config.rows, config.columns)?;
        Ok(Self {
            variant,
            config,
            grid,
            levels,
            level_index: 0,
            score: 0,
            level_achievements: Achievements::new(),
            total_achievements: Achievements::new(),
            runner,
            game_over: false,
        })
    }

    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    pub fn title(&self) -> &'static str {
        self.variant.title()
    }

    pub fn genre(&self) -> &'static str {
        self.variant.genre()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &BlockGrid {
        &self.grid
    }

    /// Direct grid access for drivers and fixtures
    pub fn grid_mut(&mut self) -> &mut BlockGrid {
        &mut self.grid
    }

    pub fn set_delegate(&mut self, delegate: impl GridDelegate + 'static) {
        self.grid.set_delegate(delegate);
    }

    pub fn levels(&self) -> &[Box<dyn Level>] {
        &self.levels
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn current_level(&self) -> &dyn Level {
        self.levels[self.level_index].as_ref()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level_achievements(&self) -> &Achievements {
        &self.level_achievements
    }

    pub fn total_achievements(&self) -> &Achievements {
        &self.total_achievements
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn goal_achieved(&self) -> bool {
        self.current_level().goal_achieved(&self.level_achievements)
    }

    /// Last level reached and its goal met
    pub fn is_complete(&self) -> bool {
        self.level_index + 1 == self.levels.len() && self.goal_achieved()
    }

    /// Reset the grid for the current level and seed its initial blocks
    pub fn start_level<R: RngCore>(&mut self, rng: &mut R) {
        self.grid.clear();
        self.level_achievements.reset();
        self.game_over = false;

        let level = self.levels[self.level_index].as_ref();
        let seeded = level.initial_blocks(rng, self.grid.rows(), self.grid.columns());
        seed_blocks(&mut self.grid, &seeded);
        self.runner.set_effects(level.effects());
        info!(
            "{} level {} started: {}",
            self.variant.title(),
            level.number(),
            level.goal().description
        );
    }

    /// Place `shape` as the active shape at the spawn point
    ///
    /// A shape that does not fit ends the game.
    pub fn spawn(&mut self, shape: Shape) -> bool {
        if self.game_over || self.grid.shape().is_some() {
            return false;
        }
        let name = shape.name();
        if self.grid.add_shape(shape, None) {
            debug!("spawned {}", name.as_str());
            true
        } else {
            self.game_over = true;
            info!("game over at level {}, score {}", self.current_level().number(), self.score);
            false
        }
    }

    /// Spawn a random shape coloured the way the current level wants
    pub fn spawn_shape<R: RngCore>(&mut self, rng: &mut R) -> bool {
        let shape = random_shape(rng, self.current_level().shape_colouring());
        self.spawn(shape)
    }

    pub fn move_player(&mut self, direction: MoveDirection) -> bool {
        !self.game_over && self.grid.move_player(direction)
    }

    pub fn rotate_shape(&mut self) -> bool {
        !self.game_over && self.grid.rotate_shape()
    }

    pub fn drop_player(&mut self) -> Option<u32> {
        if self.game_over {
            return None;
        }
        self.grid.drop_player()
    }

    /// Land the active shape where it is, resolve effects and score the turn
    pub fn land_shape(&mut self, hard_drop: bool) -> Option<TurnOutcome> {
        self.land_shape_with_view(hard_drop, &mut crate::runner::NoView)
    }

    /// [`Game::land_shape`] with every material effect result shown to `view`
    pub fn land_shape_with_view(
        &mut self,
        hard_drop: bool,
        view: &mut dyn EffectView,
    ) -> Option<TurnOutcome> {
        if self.game_over || !self.grid.replace_player_with_blocks_of_type(BlockType::Ordinary) {
            return None;
        }

        let achievements = self.runner.run(&mut self.grid, true, view);
        let level = self.levels[self.level_index].as_ref();
        let points = level.points_for(&achievements, Some(&self.level_achievements), hard_drop);
        self.score += points;
        self.level_achievements.merge(&achievements);
        self.total_achievements.merge(&achievements);
        let goal_achieved = level.goal_achieved(&self.level_achievements);

        if points > 0 {
            debug!("turn scored {} (total {})", points, self.score);
        }
        Some(TurnOutcome {
            achievements,
            points,
            score: self.score,
            goal_achieved,
        })
    }

    /// Move to the next level; call [`Game::start_level`] afterwards
    ///
    /// Returns false on the last level. The score carries over.
    pub fn advance_level(&mut self) -> bool {
        if self.level_index + 1 >= self.levels.len() {
            return false;
        }
        self.level_index += 1;
        self.level_achievements.reset();
        self.runner.set_effects(self.current_level().effects());
        info!("advanced to level {}", self.current_level().number());
        true
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            variant: self.variant,
            level_number: self.current_level().number(),
            level_index: self.level_index,
            score: self.score,
            level_achievements: self.level_achievements,
            total_achievements: self.total_achievements,
            game_over: self.game_over,
            grid: self.grid.snapshot(),
        }
    }

    /// Rebuild a game from a snapshot; `config` supplies the level list
    pub fn restore(snapshot: &GameSnapshot, config: GameConfig) -> Result<Self, GameError> {
        let mut game = Game::new(snapshot.variant, config)?;
        if snapshot.level_index >= game.levels.len() {
            return Err(GameError::LevelOutOfRange {
                index: snapshot.level_index,
                levels: game.levels.len(),
            });
        }
        game.grid = BlockGrid::from_snapshot(&snapshot.grid)?;
        game.level_index = snapshot.level_index;
        game.score = snapshot.score;
        game.level_achievements = snapshot.level_achievements;
        game.total_achievements = snapshot.total_achievements;
        game.game_over = snapshot.game_over;
        game.runner.set_effects(game.current_level().effects());
        Ok(game)
    }
}

/// Place a level's initial blocks; all of them or, with a warning, none
fn seed_blocks(grid: &mut BlockGrid, seeded: &[PlacedBlock]) -> bool {
    if seeded.is_empty() {
        return true;
    }
    let references: Vec<GridReference> = seeded.iter().map(|p| p.reference).collect();
    let blocks = seeded.iter().map(|p| p.block).collect();
    if grid.add_blocks(blocks, &references) {
        return true;
    }
    warn!(
        "{} initial blocks rejected by the {}x{} grid",
        seeded.len(),
        grid.rows(),
        grid.columns()
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Block, SimpleRng};
    use crate::types::{Achievement, BlockColour, ShapeName};

    fn small() -> GameConfig {
        GameConfig::default().with_size(6, 4).with_levels(2)
    }

    #[test]
    fn test_new_requires_levels() {
        let err = Game::new(GameVariant::Tetris, small().with_levels(0)).unwrap_err();
        assert_eq!(err, GameError::NoLevels);
        let err = Game::new(GameVariant::Tetris, small().with_size(0, 4)).unwrap_err();
        assert!(matches!(err, GameError::Grid(GridError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_seed_blocks_is_all_or_nothing() {
        let mut grid = BlockGrid::new(4, 4).unwrap();
        let jewel = |row, column| PlacedBlock {
            block: Block::jewel(BlockColour::Blue),
            reference: GridReference::new(row, column),
        };

        assert!(!seed_blocks(&mut grid, &[jewel(0, 0), jewel(0, 0)]));
        assert!(!seed_blocks(&mut grid, &[jewel(0, 1), jewel(0, 4)]));
        assert_eq!(grid.block_count(), 0);

        assert!(seed_blocks(&mut grid, &[]));
        assert!(seed_blocks(&mut grid, &[jewel(0, 1), jewel(1, 1)]));
        assert_eq!(grid.block_count(), 2);
    }

    #[test]
    fn test_landing_a_row_scores() {
        let mut game = Game::new(GameVariant::Tetris, small()).unwrap();
        game.start_level(&mut SimpleRng::new(1));
        assert!(game.spawn(Shape::standard(ShapeName::I, BlockColour::Red)));
        assert_eq!(game.drop_player(), Some(5));

        let outcome = game.land_shape(true).unwrap();
        assert_eq!(outcome.achievements.get(Achievement::OneRow), 1);
        assert_eq!(outcome.points, 40);
        assert_eq!(game.score(), 40);
        assert_eq!(game.grid().block_count(), 0);
        assert!(!outcome.goal_achieved);
        assert!(game.land_shape(false).is_none());
    }

    #[test]
    fn test_blocked_spawn_ends_the_game() {
        let mut game = Game::new(GameVariant::Tetris, small()).unwrap();
        game.start_level(&mut SimpleRng::new(1));
        // landed shapes collapse onto each other; distinct colours avoid matches
        for colour in [BlockColour::Red, BlockColour::Green, BlockColour::Yellow] {
            assert!(game.spawn(Shape::standard(ShapeName::O, colour)));
            game.land_shape(false);
        }
        assert!(!game.spawn(Shape::standard(ShapeName::O, BlockColour::Blue)));
        assert!(game.is_game_over());
        assert!(!game.move_player(MoveDirection::Left));
    }

    #[test]
    fn test_advance_keeps_score_and_resets_level() {
        let mut game = Game::new(GameVariant::Tetris, small()).unwrap();
        game.start_level(&mut SimpleRng::new(1));
        game.spawn(Shape::standard(ShapeName::I, BlockColour::Red));
        game.drop_player();
        game.land_shape(false);

        assert!(game.advance_level());
        assert_eq!(game.current_level().number(), 2);
        assert_eq!(game.score(), 40);
        assert!(game.level_achievements().is_empty());
        assert_eq!(game.total_achievements().get(Achievement::OneRow), 1);
        assert!(!game.advance_level());
    }
}
