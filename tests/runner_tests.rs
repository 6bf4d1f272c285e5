//! Effects runner tests - cascades to a fixed point, views and stability

use blockfall::core::{Achievements, BlockGrid, EventLog};
use blockfall::engine::{
    EffectResult, EffectView, EffectsRunner, GravityEffect, NoView, RemoveMatchedBlocksEffect,
    RemoveRowsEffect, RunnerState,
};
use blockfall::types::Achievement;

#[derive(Default)]
struct RecordingView {
    applied: Vec<usize>,
    finished: Option<Achievements>,
}

impl EffectView for RecordingView {
    fn effect_applied(&mut self, result: &EffectResult) {
        self.applied.push(result.removed.len() + result.moved.len());
    }

    fn effects_finished(&mut self, achievements: &Achievements) {
        self.finished = Some(*achievements);
    }
}

fn row_runner() -> EffectsRunner {
    EffectsRunner::new(vec![
        Box::new(RemoveRowsEffect::default()),
        Box::new(GravityEffect),
    ])
}

#[test]
fn test_gravity_completes_a_second_row() {
    let mut grid = BlockGrid::from_tokens(&[
        [".", "X5", "."],
        ["X3", ".", "X4"],
        ["X0", "X1", "X2"],
    ])
    .unwrap();
    let mut runner = row_runner();
    let mut view = RecordingView::default();
    let achievements = runner.run(&mut grid, true, &mut view);

    assert_eq!(achievements.get(Achievement::OneRow), 2);
    assert_eq!(achievements.rows_removed(), 2);
    assert_eq!(grid.block_count(), 0);
    assert_eq!(runner.pass(), 3);
    assert_eq!(runner.state(), RunnerState::Done);

    // remove, fall, remove; the last gravity run found nothing
    assert_eq!(view.applied, vec![3, 3, 3]);
    assert_eq!(view.finished, Some(achievements));
}

#[test]
fn test_colour_match_cascade() {
    let mut grid = BlockGrid::from_tokens(&[
        ["X2", ".", "."],
        ["X1", ".", "."],
        ["X1", ".", "."],
        ["X1", "X2", "X2"],
    ])
    .unwrap();
    let mut runner = EffectsRunner::new(vec![
        Box::new(RemoveMatchedBlocksEffect::new(3)),
        Box::new(GravityEffect),
    ]);
    let achievements = runner.apply_effects(&mut grid, true);

    assert_eq!(achievements.get(Achievement::ColourMatchGroup), 2);
    assert_eq!(achievements.get(Achievement::ColourMatch), 6);
    assert_eq!(grid.block_count(), 0);
}

#[test]
fn test_row_clear_then_match_settles_for_good() {
    let mut grid = BlockGrid::from_tokens(&[
        ["X1", ".", "."],
        ["X1", ".", "."],
        ["X2", "X3", "X4"],
        ["X1", ".", "."],
    ])
    .unwrap();
    let mut runner = EffectsRunner::new(vec![
        Box::new(RemoveRowsEffect::new(3)),
        Box::new(GravityEffect),
    ]);

    // the row clear drops two X1 onto the third
    let first = runner.apply_effects(&mut grid, true);
    assert_eq!(first.get(Achievement::OneRow), 1);
    assert_eq!(first.get(Achievement::ExplodedBlock), 3);
    assert_eq!(grid.block_count(), 0);

    let log = EventLog::new();
    grid.set_delegate(log.clone());
    let second = runner.apply_effects(&mut grid, true);
    assert!(second.is_empty());
    assert!(log.is_empty());
}

#[test]
fn test_stable_grid_is_left_alone() {
    let mut grid = BlockGrid::from_tokens(&[
        [".", ".", "."],
        ["X1", ".", "."],
        ["X2", "X3", "."],
    ])
    .unwrap();
    let log = EventLog::new();
    grid.set_delegate(log.clone());
    let before = grid.to_tokens();

    let mut runner = row_runner();
    let achievements = runner.run(&mut grid, true, &mut NoView);

    assert!(achievements.is_empty());
    assert_eq!(runner.pass(), 1);
    assert_eq!(grid.to_tokens(), before);
    assert!(log.is_empty());
}

#[test]
fn test_each_material_effect_notifies_once() {
    let mut grid = BlockGrid::from_tokens(&[
        [".", "X5", "."],
        ["X3", ".", "X4"],
        ["X0", "X1", "X2"],
    ])
    .unwrap();
    let log = EventLog::new();
    grid.set_delegate(log.clone());

    row_runner().apply_effects(&mut grid, true);
    // two removals and one batched fall
    assert_eq!(log.len(), 3);
}

#[test]
fn test_runner_can_be_reused() {
    let mut runner = row_runner();
    let mut grid = BlockGrid::from_tokens(&[["X0", "X1"]]).unwrap();
    assert_eq!(
        runner.apply_effects(&mut grid, true).get(Achievement::OneRow),
        1
    );

    let mut grid = BlockGrid::from_tokens(&[["X0", "X1"], ["X2", "X3"]]).unwrap();
    let totals = runner.apply_effects(&mut grid, false);
    assert_eq!(totals.get(Achievement::OneRow), 1);
    assert_eq!(totals.get(Achievement::TwoRows), 1);
    assert_eq!(totals.rows_removed(), 3);
}
