//! Headless game runner (default binary).
//!
//! Plays a seeded game with a simple placement policy and prints the final
//! board, level and score. Usage: `blockfall [tetris|colour|gravity|jewel]`;
//! board size, level count, match size and seed come from `BLOCKFALL_*`
//! environment variables.

use std::env;

use anyhow::{anyhow, Result};

use blockfall::core::{BlockGrid, SimpleRng};
use blockfall::engine::{Game, GameConfig};
use blockfall::types::{GameVariant, MoveDirection};

/// Upper bound on shapes played in one run
const MAX_SHAPES: usize = 2_000;

/// Rotations then a horizontal shift, applied before dropping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    rotations: usize,
    shift: i32,
}

fn main() -> Result<()> {
    let variant = match env::args().nth(1) {
        Some(arg) => GameVariant::from_str(&arg)
            .ok_or_else(|| anyhow!("unknown variant {arg:?}"))?,
        None => GameVariant::Tetris,
    };
    let config = GameConfig::from_env();
    let mut rng = SimpleRng::new(config.seed);
    let mut game = Game::new(variant, config)?;
    game.start_level(&mut rng);

    let mut shapes = 0;
    while shapes < MAX_SHAPES && game.spawn_shape(&mut rng) {
        shapes += 1;
        if let Some(placement) = choose_placement(game.grid()) {
            apply_placement(&mut game, placement);
        }
        game.drop_player();

        let Some(outcome) = game.land_shape(true) else {
            break;
        };
        if outcome.goal_achieved {
            if !game.advance_level() {
                break;
            }
            game.start_level(&mut rng);
        }
    }

    println!("{} ({})", game.title(), game.genre());
    print!("{}", game.grid());
    let level = game.current_level();
    println!(
        "level {} | goal {} ({}/{}) | score {} | shapes {}{}",
        level.number(),
        level.goal().description,
        level.progress(game.level_achievements()),
        level.goal().value,
        game.score(),
        shapes,
        if game.is_game_over() { " | game over" } else { "" },
    );
    for (kind, count) in game.total_achievements().iter() {
        println!("  {:<18} {}", kind.as_str(), count);
    }
    Ok(())
}

fn shift_direction(shift: i32) -> MoveDirection {
    if shift < 0 {
        MoveDirection::Left
    } else {
        MoveDirection::Right
    }
}

/// Try a placement on a copy of the grid; `(highest row, row sum)` of the
/// landed shape, lower is better
fn evaluate(grid: &BlockGrid, placement: Placement) -> Option<(i32, i32)> {
    let mut trial = BlockGrid::from_snapshot(&grid.snapshot()).ok()?;
    for _ in 0..placement.rotations {
        if !trial.rotate_shape() {
            return None;
        }
    }
    for _ in 0..placement.shift.unsigned_abs() {
        if !trial.move_player(shift_direction(placement.shift)) {
            return None;
        }
    }
    let landed = trial.ghost_references()?;
    let highest = landed.iter().map(|r| r.row).max()?;
    let sum = landed.iter().map(|r| r.row).sum();
    Some((highest, sum))
}

fn choose_placement(grid: &BlockGrid) -> Option<Placement> {
    let width = grid.columns() as i32;
    let mut best: Option<((i32, i32), Placement)> = None;
    for rotations in 0..4 {
        for shift in -width..=width {
            let placement = Placement { rotations, shift };
            let Some(cost) = evaluate(grid, placement) else {
                continue;
            };
            if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                best = Some((cost, placement));
            }
        }
    }
    best.map(|(_, placement)| placement)
}

fn apply_placement(game: &mut Game, placement: Placement) {
    for _ in 0..placement.rotations {
        game.rotate_shape();
    }
    for _ in 0..placement.shift.unsigned_abs() {
        game.move_player(shift_direction(placement.shift));
    }
}
