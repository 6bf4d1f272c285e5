//! Effects runner - drives a list of effects to a fixed point
//!
//! ```text
//! Idle --begin--> ApplyingEffect(0)
//! ApplyingEffect(i) --material-----> AwaitingView(i) --view_completed--> next
//! ApplyingEffect(i) --no change----> next
//! next = ApplyingEffect(i + 1), or Rechecking after the last effect
//! Rechecking --pass changed something--> ApplyingEffect(0)
//! Rechecking --pass changed nothing----> Done
//! ```
//!
//! A change anywhere in a pass re-runs the whole list, since one effect can
//! create work for another (a drop can complete a row, a match can open a gap).
//! Termination holds because effects only ever remove blocks or lower them.
//!
//! Callers that animate changes use [`EffectsRunner::step`] and call
//! [`EffectsRunner::view_completed`] when the animation for an `Applied` step
//! ends. Everyone else uses [`EffectsRunner::run`] or
//! [`EffectsRunner::apply_effects`].

use log::debug;

use crate::core::{Achievements, BlockGrid};
use crate::effects::{EffectResult, GridEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunnerState {
    #[default]
    Idle,
    ApplyingEffect(usize),
    /// A material result was handed out and the view has not finished with it
    AwaitingView(usize),
    Rechecking,
    Done,
}

/// Outcome of one [`EffectsRunner::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerStep {
    /// Effect `index` changed the grid; the runner waits for `view_completed`
    Applied { index: usize, result: EffectResult },
    Unchanged { index: usize },
    /// The previous pass changed something, so the list starts over
    PassRestarted { pass: usize },
    /// Fixed point reached; carries the merged achievements of the run
    Finished(Achievements),
    /// Nothing to do until `begin` or `view_completed` is called
    Waiting,
}

/// Receives the runner's material results
pub trait EffectView {
    fn effect_applied(&mut self, _result: &EffectResult) {}

    fn effects_finished(&mut self, _achievements: &Achievements) {}
}

/// A view that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoView;

impl EffectView for NoView {}

#[derive(Debug, Default)]
pub struct EffectsRunner {
    effects: Vec<Box<dyn GridEffect>>,
    state: RunnerState,
    achievements: Achievements,
    pass: usize,
    pass_changed: bool,
}

impl EffectsRunner {
    pub fn new(effects: Vec<Box<dyn GridEffect>>) -> Self {
        Self {
            effects,
            ..Self::default()
        }
    }

    /// Replace the effect list; the runner returns to `Idle`
    pub fn set_effects(&mut self, effects: Vec<Box<dyn GridEffect>>) {
        self.effects = effects;
        self.state = RunnerState::Idle;
    }

    pub fn effects(&self) -> &[Box<dyn GridEffect>] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Achievements merged so far
    pub fn achievements(&self) -> &Achievements {
        &self.achievements
    }

    /// Passes started in the current run
    pub fn pass(&self) -> usize {
        self.pass
    }

    /// Start a run; achievements carry over from earlier runs unless `reset_achievements`
    pub fn begin(&mut self, reset_achievements: bool) {
        if reset_achievements {
            self.achievements.reset();
        }
        self.pass = 1;
        self.pass_changed = false;
        self.state = self.first_state();
    }

    fn first_state(&self) -> RunnerState {
        if self.effects.is_empty() {
            RunnerState::Rechecking
        } else {
            RunnerState::ApplyingEffect(0)
        }
    }

    fn after(&self, index: usize) -> RunnerState {
        if index + 1 < self.effects.len() {
            RunnerState::ApplyingEffect(index + 1)
        } else {
            RunnerState::Rechecking
        }
    }

    /// Advance the machine by one transition
    pub fn step(&mut self, grid: &mut BlockGrid) -> RunnerStep {
        match self.state {
            RunnerState::Idle | RunnerState::AwaitingView(_) => RunnerStep::Waiting,
            RunnerState::Done => RunnerStep::Finished(self.achievements),
            RunnerState::ApplyingEffect(index) => {
                let result = self.effects[index].apply(grid);
                self.achievements.merge(&result.achievements);
                if result.is_material() {
                    self.pass_changed = true;
                    self.state = RunnerState::AwaitingView(index);
                    RunnerStep::Applied { index, result }
                } else {
                    self.state = self.after(index);
                    RunnerStep::Unchanged { index }
                }
            }
            RunnerState::Rechecking => {
                if self.pass_changed {
                    self.pass += 1;
                    self.pass_changed = false;
                    self.state = self.first_state();
                    debug!("effects changed the grid, starting pass {}", self.pass);
                    RunnerStep::PassRestarted { pass: self.pass }
                } else {
                    self.state = RunnerState::Done;
                    debug!("effects settled after {} passes", self.pass);
                    RunnerStep::Finished(self.achievements)
                }
            }
        }
    }

    /// The view finished with the last `Applied` result; returns false if the
    /// runner was not waiting
    pub fn view_completed(&mut self) -> bool {
        match self.state {
            RunnerState::AwaitingView(index) => {
                self.state = self.after(index);
                true
            }
            _ => false,
        }
    }

    /// Run to the fixed point, handing every material result to `view`
    pub fn run(
        &mut self,
        grid: &mut BlockGrid,
        reset_achievements: bool,
        view: &mut dyn EffectView,
    ) -> Achievements {
        self.begin(reset_achievements);
        loop {
            match self.step(grid) {
                RunnerStep::Applied { result, .. } => {
                    view.effect_applied(&result);
                    self.view_completed();
                }
                RunnerStep::Unchanged { .. } | RunnerStep::PassRestarted { .. } => {}
                RunnerStep::Finished(achievements) => {
                    view.effects_finished(&achievements);
                    return achievements;
                }
                RunnerStep::Waiting => return self.achievements,
            }
        }
    }

    /// Run to the fixed point without a view
    pub fn apply_effects(
        &mut self,
        grid: &mut BlockGrid,
        reset_achievements: bool,
    ) -> Achievements {
        self.run(grid, reset_achievements, &mut NoView)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{GravityEffect, RemoveMatchedBlocksEffect};
    use crate::types::Achievement;

    fn cascade() -> BlockGrid {
        // removing the 1s lets the 2 above them fall next to the other 2
        BlockGrid::from_tokens(&[["X2", "."], ["X1", "."], ["X1", "X2"]])
        .unwrap()
    }

    fn runner() -> EffectsRunner {
        EffectsRunner::new(vec![
            Box::new(RemoveMatchedBlocksEffect::new(2)),
            Box::new(GravityEffect),
        ])
    }

    #[test]
    fn test_step_walks_the_machine() {
        let mut grid = cascade();
        let mut runner = runner();
        assert_eq!(runner.step(&mut grid), RunnerStep::Waiting);

        runner.begin(true);
        assert!(matches!(runner.step(&mut grid), RunnerStep::Applied { index: 0, .. }));
        assert_eq!(runner.state(), RunnerState::AwaitingView(0));
        assert_eq!(runner.step(&mut grid), RunnerStep::Waiting);

        assert!(runner.view_completed());
        assert!(matches!(runner.step(&mut grid), RunnerStep::Applied { index: 1, .. }));
        runner.view_completed();
        assert_eq!(runner.step(&mut grid), RunnerStep::PassRestarted { pass: 2 });

        let mut finished = None;
        for _ in 0..20 {
            match runner.step(&mut grid) {
                RunnerStep::Applied { .. } => {
                    runner.view_completed();
                }
                RunnerStep::Finished(achievements) => {
                    finished = Some(achievements);
                    break;
                }
                _ => {}
            }
        }
        let achievements = finished.unwrap();
        assert_eq!(achievements.get(Achievement::ColourMatchGroup), 2);
        assert_eq!(runner.state(), RunnerState::Done);
        assert_eq!(grid.block_count(), 0);
    }

    #[test]
    fn test_achievements_carry_over_unless_reset() {
        let mut grid = cascade();
        let mut runner = runner();
        runner.apply_effects(&mut grid, true);
        assert_eq!(runner.achievements().get(Achievement::ColourMatch), 4);

        let carried = runner.apply_effects(&mut grid, false);
        assert_eq!(carried.get(Achievement::ColourMatch), 4);
        let fresh = runner.apply_effects(&mut grid, true);
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_empty_list_finishes_at_once() {
        let mut grid = cascade();
        let mut runner = EffectsRunner::default();
        assert!(runner.apply_effects(&mut grid, true).is_empty());
        assert_eq!(runner.state(), RunnerState::Done);
    }
}
