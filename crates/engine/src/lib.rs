//! Engine module - effects, fixed-point resolution and level rules
//!
//! Builds on the grid model in `blockfall-core`:
//!
//! - [`effects`]: row clears, colour-match clears, gravity and row collapse
//! - [`runner`]: drives a level's effects until a full pass changes nothing
//! - [`scoring`]: achievements to points
//! - [`level`]: per-variant goals, effect lists and scoring
//! - [`game`]: level progression, score and achievement totals
//! - [`config`]: board size, level count, match size and seed
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Game, GameConfig};
//! use blockfall_engine::core::SimpleRng;
//! use blockfall_engine::types::GameVariant;
//!
//! let mut rng = SimpleRng::new(7);
//! let mut game = Game::new(GameVariant::Tetris, GameConfig::default()).unwrap();
//! game.start_level(&mut rng);
//!
//! assert!(game.spawn_shape(&mut rng));
//! game.drop_player();
//! let outcome = game.land_shape(true).unwrap();
//! assert_eq!(outcome.points, 0);
//! assert_eq!(game.grid().block_count(), 4);
//! ```

pub mod config;
pub mod effects;
pub mod game;
pub mod level;
pub mod runner;
pub mod scoring;
pub mod snapshot;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::GameConfig;
pub use effects::{
    find_connected_groups, DropBlocksEffect, DropIntoEmptyRowsEffect, EffectResult, GravityEffect,
    GridEffect, RemoveMatchedBlocksEffect, RemoveRowsEffect,
};
pub use game::{Game, GameError, TurnOutcome};
pub use level::{
    levels_for, ColourMatcherLevel, Goal, GravityMatcherLevel, JewelLevel, Level, TetrisLevel,
};
pub use runner::{EffectView, EffectsRunner, NoView, RunnerState, RunnerStep};
pub use snapshot::GameSnapshot;
