//! Game tests - turns, scoring, level progression and game over

use blockfall::core::{Block, KickTable, Shape, SimpleRng};
use blockfall::engine::{Game, GameConfig, GameError};
use blockfall::types::{
    Achievement, BlockColour, BlockType, GameVariant, GridReference, MoveDirection, ShapeName,
};

fn small_config() -> GameConfig {
    GameConfig::default().with_size(6, 4).with_levels(2)
}

fn single_block() -> Shape {
    Shape::new(
        ShapeName::Custom,
        vec![GridReference::ORIGIN],
        vec![BlockColour::Purple],
        KickTable::none(),
        false,
    )
    .unwrap()
}

/// Spawn an I bar, hard drop it and land; on a 4-wide board that clears a row
fn clear_row(game: &mut Game) -> u64 {
    assert!(game.spawn(Shape::standard(ShapeName::I, BlockColour::Red)));
    game.drop_player();
    game.land_shape(true).unwrap().points
}

#[test]
fn test_new_game_state() {
    let game = Game::new(GameVariant::GravityMatcher, small_config()).unwrap();
    assert_eq!(game.title(), "Gravity Matcher");
    assert_eq!(game.level_index(), 0);
    assert_eq!(game.current_level().number(), 1);
    assert_eq!(game.score(), 0);
    assert_eq!(game.levels().len(), 2);
    assert_eq!(game.grid().rows(), 6);
    assert!(!game.is_game_over());
}

#[test]
fn test_zero_levels_is_an_error() {
    let err = Game::new(GameVariant::Tetris, small_config().with_levels(0)).unwrap_err();
    assert_eq!(err, GameError::NoLevels);
}

#[test]
fn test_landing_a_row_scores_it() {
    let mut game = Game::new(GameVariant::Tetris, small_config()).unwrap();
    let points = clear_row(&mut game);

    assert_eq!(points, 40);
    assert_eq!(game.score(), 40);
    assert_eq!(game.level_achievements().get(Achievement::OneRow), 1);
    assert_eq!(game.grid().block_count(), 0);
    assert!(game.grid().shape().is_none());
}

#[test]
fn test_landing_without_clears_scores_nothing() {
    let mut game = Game::new(GameVariant::Tetris, small_config()).unwrap();
    assert!(game.spawn(Shape::standard(ShapeName::O, BlockColour::Green)));
    assert!(game.move_player(MoveDirection::Left));
    game.drop_player();
    let outcome = game.land_shape(false).unwrap();

    assert_eq!(outcome.points, 0);
    assert!(outcome.achievements.is_empty());
    assert!(!outcome.goal_achieved);
    assert!(game
        .grid()
        .blocks()
        .all(|(_, block)| block.kind() == BlockType::Ordinary));
}

#[test]
fn test_land_without_shape_does_nothing() {
    let mut game = Game::new(GameVariant::Tetris, small_config()).unwrap();
    assert!(game.land_shape(false).is_none());
    assert_eq!(game.score(), 0);
}

#[test]
fn test_goal_then_advance() {
    let mut rng = SimpleRng::new(3);
    let mut game = Game::new(GameVariant::Tetris, small_config()).unwrap();
    game.start_level(&mut rng);

    for _ in 0..4 {
        clear_row(&mut game);
        assert!(!game.goal_achieved());
    }
    clear_row(&mut game);
    assert!(game.goal_achieved());
    assert!(!game.is_complete());
    assert_eq!(game.score(), 200);

    assert!(game.advance_level());
    game.start_level(&mut rng);
    assert_eq!(game.current_level().number(), 2);
    assert!(game.level_achievements().is_empty());
    assert_eq!(game.total_achievements().get(Achievement::OneRow), 5);
    assert_eq!(game.score(), 200);

    // level two doubles the row table
    assert_eq!(clear_row(&mut game), 80);
    assert_eq!(game.score(), 280);
    assert!(!game.advance_level());
}

#[test]
fn test_blocked_spawn_ends_the_game() {
    let mut game = Game::new(GameVariant::Tetris, small_config()).unwrap();
    game.grid_mut()
        .add_block(Block::wall(BlockColour::Red), GridReference::new(5, 1));

    assert!(!game.spawn(Shape::standard(ShapeName::I, BlockColour::Blue)));
    assert!(game.is_game_over());
    assert!(!game.move_player(MoveDirection::Left));
    assert!(!game.rotate_shape());
    assert_eq!(game.drop_player(), None);
    assert!(game.land_shape(false).is_none());

    let mut rng = SimpleRng::new(1);
    game.start_level(&mut rng);
    assert!(!game.is_game_over());
    assert!(game.spawn_shape(&mut rng));
}

#[test]
fn test_colour_matcher_turn() {
    let config = small_config().with_minimum_match_count(4);
    let mut game = Game::new(GameVariant::ColourMatcher, config).unwrap();
    assert!(game.spawn(Shape::standard(ShapeName::O, BlockColour::Blue)));
    game.drop_player();
    let outcome = game.land_shape(false).unwrap();

    assert_eq!(outcome.achievements.get(Achievement::ColourMatchGroup), 1);
    assert_eq!(outcome.achievements.get(Achievement::ColourMatch), 4);
    assert_eq!(outcome.points, 300);
    assert_eq!(game.grid().block_count(), 0);
}

#[test]
fn test_jewel_turn_earns_collection_bonus() {
    let mut game = Game::new(GameVariant::Jewel, small_config()).unwrap();
    let grid = game.grid_mut();
    grid.add_block(Block::jewel(BlockColour::Red), GridReference::new(0, 0));
    grid.add_block(Block::ordinary(BlockColour::Orange), GridReference::new(0, 1));
    grid.add_block(Block::ordinary(BlockColour::Yellow), GridReference::new(0, 2));
    assert!(grid.add_shape(single_block(), Some(GridReference::new(5, 3))));

    assert_eq!(game.drop_player(), Some(5));
    let outcome = game.land_shape(false).unwrap();
    assert_eq!(outcome.achievements.get(Achievement::Jewel), 1);
    assert_eq!(outcome.points, 100 + 900);
}

#[test]
fn test_jewel_levels_seed_jewels_low_down() {
    let mut rng = SimpleRng::new(11);
    let mut game = Game::new(GameVariant::Jewel, GameConfig::default()).unwrap();
    game.start_level(&mut rng);

    let jewels: Vec<GridReference> = game
        .grid()
        .blocks()
        .filter(|(_, block)| block.is_jewel())
        .map(|(reference, _)| reference)
        .collect();
    assert_eq!(jewels.len(), 3);
    assert!(jewels.iter().all(|r| r.row < (game.grid().rows() / 3) as i32));
    assert!(game.grid().full_rows().is_empty());
}

#[test]
fn test_score_never_decreases() {
    let mut rng = SimpleRng::new(21);
    let mut game = Game::new(GameVariant::GravityMatcher, GameConfig::default()).unwrap();
    game.start_level(&mut rng);

    let mut last = 0;
    for _ in 0..40 {
        if !game.spawn_shape(&mut rng) {
            break;
        }
        game.drop_player();
        let outcome = game.land_shape(true).unwrap();
        assert!(outcome.score >= last);
        last = outcome.score;
    }
}
