//! Composite actions: parallel groups, sequences and repeats

use super::action::{Action, FrameState};

/// Parallel combinator
///
/// Every unfinished child advances once per frame. The group completes once
/// the last (slowest) child has.
#[derive(Clone, Debug)]
pub struct Group {
    actions: Vec<Action>,
    completed: usize,
}

impl Group {
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            actions,
            completed: 0,
        }
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Action] {
        &mut self.actions
    }

    pub fn duration(&self) -> f32 {
        self.actions.iter().map(Action::duration).fold(0.0, f32::max)
    }

    /// True once every child has completed
    pub fn advance(&mut self, dt: f32) -> bool {
        for action in self.actions.iter_mut().filter(|a| !a.is_completed()) {
            if action.next_frame(dt) == FrameState::Completed {
                self.completed += 1;
            }
        }
        self.completed >= self.actions.len()
    }

    pub fn rewind(&mut self) {
        self.completed = 0;
        // Last to first, so the first child's captured start wins on shared targets
        self.actions.iter_mut().rev().for_each(Action::rewind);
    }

    pub fn reset(&mut self) {
        self.completed = 0;
        self.actions.iter_mut().for_each(Action::reset);
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.actions.iter().map(Action::reversed).collect())
    }
}

/// Runs children one at a time in order
///
/// A child that completes hands over on the next frame; leftover time is
/// not carried into the following child.
#[derive(Clone, Debug)]
pub struct Sequence {
    actions: Vec<Action>,
    index: usize,
}

impl Sequence {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions, index: 0 }
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Action] {
        &mut self.actions
    }

    /// Position of the running child
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn duration(&self) -> f32 {
        self.actions.iter().map(Action::duration).sum()
    }

    pub fn advance(&mut self, dt: f32) -> bool {
        if let Some(action) = self.actions.get_mut(self.index) {
            if action.next_frame(dt) == FrameState::Completed {
                self.index += 1;
            }
        }
        self.index >= self.actions.len()
    }

    pub fn rewind(&mut self) {
        self.index = 0;
        self.actions.iter_mut().rev().for_each(Action::rewind);
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.actions.iter_mut().for_each(Action::reset);
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.actions.iter().rev().map(Action::reversed).collect())
    }
}

/// Replays one child a fixed number of times, or forever when `times` is `None`
#[derive(Clone, Debug)]
pub struct Repeat {
    action: Box<Action>,
    times: Option<u32>,
    done: u32,
}

impl Repeat {
    pub fn new(action: Action, times: Option<u32>) -> Self {
        Self {
            action: Box::new(action),
            times,
            done: 0,
        }
    }

    pub(crate) fn child_mut(&mut self) -> &mut Action {
        &mut self.action
    }

    /// Completed runs so far
    pub fn count(&self) -> u32 {
        self.done
    }

    pub fn duration(&self) -> f32 {
        match self.times {
            Some(times) => self.action.duration() * times as f32,
            None => f32::INFINITY,
        }
    }

    pub fn advance(&mut self, dt: f32) -> bool {
        if self.times == Some(0) {
            return true;
        }
        if self.action.next_frame(dt) != FrameState::Completed {
            return false;
        }
        self.done += 1;
        if self.times.is_some_and(|times| self.done >= times) {
            return true;
        }
        self.action.rewind();
        false
    }

    pub fn rewind(&mut self) {
        self.done = 0;
        self.action.rewind();
    }

    pub fn reset(&mut self) {
        self.done = 0;
        self.action.reset();
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.action.reversed(), self.times)
    }
}
