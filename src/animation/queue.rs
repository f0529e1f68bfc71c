//! FIFO action driver
//!
//! Only the head action advances; the next one starts after the head
//! completes and has been removed.

use std::collections::VecDeque;

use super::action::{Action, FrameState};

/// Run state imposed by the owning player
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayerState {
    #[default]
    Running,
    Paused,
    Stopped,
}

/// Called once after its action completes and has left the queue
pub type Completion = Box<dyn FnOnce(&mut DispatchQueue)>;

struct Entry {
    action: Action,
    on_complete: Option<Completion>,
    /// Enqueue order, for diagnostics
    position: usize,
}

/// FIFO of actions with optional completion callbacks
#[derive(Default)]
pub struct DispatchQueue {
    entries: VecDeque<Entry>,
    enqueued: usize,
}

impl DispatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action; `None` is rejected and leaves the queue untouched
    pub fn enqueue_action(&mut self, action: Option<Action>, on_complete: Option<Completion>) -> bool {
        let Some(action) = action else {
            tracing::warn!("rejected null action");
            return false;
        };
        self.enqueued += 1;
        tracing::debug!(action = action.name(), position = self.enqueued, "enqueue action");
        self.entries.push_back(Entry {
            action,
            on_complete,
            position: self.enqueued,
        });
        true
    }

    pub fn num_actions(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The action currently advancing
    pub fn head(&self) -> Option<&Action> {
        self.entries.front().map(|e| &e.action)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.action.name() == name)
    }

    /// Drop every queued action named `name` without running callbacks
    pub fn remove_action(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.action.name() != name);
        before != self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Advance the head action by one tick
    ///
    /// Running advances (and resumes) it, Paused holds it, Stopped rewinds
    /// it. A completed head is removed before its callback runs. Returns
    /// false if the queue was empty.
    pub fn update(&mut self, state: PlayerState, dt: f32) -> bool {
        let Some(head) = self.entries.front_mut() else {
            return false;
        };

        let frame = match state {
            PlayerState::Running => head.action.next_frame(dt),
            PlayerState::Paused => {
                head.action.pause();
                FrameState::Paused
            }
            PlayerState::Stopped => {
                head.action.rewind();
                FrameState::Playing
            }
        };

        if frame == FrameState::Completed {
            if let Some(entry) = self.entries.pop_front() {
                tracing::debug!(
                    action = entry.action.name(),
                    position = entry.position,
                    "action finished"
                );
                if let Some(callback) = entry.on_complete {
                    callback(self);
                }
            }
        }
        true
    }
}
