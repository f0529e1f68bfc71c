//! Action player - drives a set of dispatch queues from the main loop

use crate::shared::config::ActionConfig;

use super::action::Action;
use super::easing::Easing;
use super::queue::{Completion, DispatchQueue, PlayerState};

/// Owns the queues for one scene or object group
///
/// Call [`update`](Self::update) once per tick. Each queue advances its head
/// action. The default queue serves [`enqueue_action`](Self::enqueue_action)
/// and lives as long as the player; queues started by
/// [`run_action`](Self::run_action) are dropped once they run dry.
pub struct ActionPlayer {
    default: DispatchQueue,
    queues: Vec<DispatchQueue>,
    state: PlayerState,
    /// Global time scale
    speed: f32,
    /// Timing curve given to actions that have none
    easing: Easing,
}

impl Default for ActionPlayer {
    fn default() -> Self {
        Self {
            default: DispatchQueue::new(),
            queues: Vec::new(),
            state: PlayerState::Running,
            speed: 1.0,
            easing: Easing::Linear,
        }
    }
}

impl ActionPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time scale and default easing from the `[actions]` section
    pub fn with_config(config: &ActionConfig) -> Self {
        let mut player = Self {
            easing: config.easing(),
            ..Self::default()
        };
        player.set_speed(config.speed);
        player
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() && speed >= 0.0 {
            self.speed = speed;
        } else {
            tracing::warn!(speed, "invalid player speed, keeping {}", self.speed);
        }
    }

    fn prepare(&self, mut action: Action) -> Action {
        action.apply_default_easing(self.easing);
        action
    }

    /// Start `action` on its own queue so it runs alongside everything else
    pub fn run_action(&mut self, action: Option<Action>, on_complete: Option<Completion>) -> bool {
        let Some(action) = action else {
            tracing::warn!("rejected null action");
            return false;
        };
        let mut queue = DispatchQueue::new();
        queue.enqueue_action(Some(self.prepare(action)), on_complete);
        self.queues.push(queue);
        true
    }

    /// Append `action` to the default queue; it starts when the actions
    /// queued before it have finished
    ///
    /// Actions started with [`run_action`](Self::run_action) never hold it up.
    pub fn enqueue_action(&mut self, action: Option<Action>, on_complete: Option<Completion>) -> bool {
        let Some(action) = action else {
            tracing::warn!("rejected null action");
            return false;
        };
        let action = self.prepare(action);
        self.default.enqueue_action(Some(action), on_complete)
    }

    fn all_queues(&self) -> impl Iterator<Item = &DispatchQueue> {
        std::iter::once(&self.default).chain(self.queues.iter())
    }

    /// Actions queued across all queues
    pub fn num_actions(&self) -> usize {
        self.all_queues().map(DispatchQueue::num_actions).sum()
    }

    /// Number of queues holding actions
    pub fn num_queues(&self) -> usize {
        self.all_queues().filter(|q| !q.is_empty()).count()
    }

    /// Whether an action named `name` is queued or running
    pub fn action_running(&self, name: &str) -> bool {
        self.all_queues().any(|q| q.contains(name))
    }

    /// Remove every action named `name`; completion callbacks do not fire
    pub fn remove_action(&mut self, name: &str) -> bool {
        let mut removed = self.default.remove_action(name);
        for queue in &mut self.queues {
            removed |= queue.remove_action(name);
        }
        self.queues.retain(|q| !q.is_empty());
        removed
    }

    pub fn clear_actions(&mut self) {
        tracing::debug!(actions = self.num_actions(), "clearing actions");
        self.default.clear();
        self.queues.clear();
    }

    pub fn pause(&mut self) {
        self.state = PlayerState::Paused;
    }

    pub fn resume(&mut self) {
        self.state = PlayerState::Running;
    }

    /// Rewind the running actions and hold them at their start
    pub fn stop(&mut self) {
        self.state = PlayerState::Stopped;
    }

    /// Advance every queue by `dt` seconds (scaled by the player speed)
    ///
    /// Returns true while any action remains.
    pub fn update(&mut self, dt: f32) -> bool {
        let dt = dt.max(0.0) * self.speed;
        self.default.update(self.state, dt);
        for queue in &mut self.queues {
            queue.update(self.state, dt);
        }
        self.queues.retain(|q| !q.is_empty());
        !self.default.is_empty() || !self.queues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::geom::{Point, Size};
    use crate::render::Color;
    use crate::sprite::{Sprite, Transformable};

    fn sprite() -> Rc<RefCell<Sprite>> {
        Rc::new(RefCell::new(Sprite::new(
            "s",
            Point::new(0, 0),
            Size::new(10, 10),
            Color::WHITE,
        )))
    }

    #[test]
    fn test_run_action_is_parallel() {
        let mut player = ActionPlayer::new();
        player.run_action(Some(Action::wait(1.0).with_name("a")), None);
        player.run_action(Some(Action::wait(1.0).with_name("b")), None);
        assert_eq!(player.num_queues(), 2);

        assert!(!player.update(1.0));
        assert_eq!(player.num_actions(), 0);
    }

    #[test]
    fn test_enqueue_action_is_serial() {
        let mut player = ActionPlayer::new();
        player.enqueue_action(Some(Action::wait(1.0).with_name("a")), None);
        player.enqueue_action(Some(Action::wait(1.0).with_name("b")), None);
        assert_eq!(player.num_queues(), 1);

        assert!(player.update(1.0));
        assert!(!player.action_running("a"));
        assert!(player.action_running("b"));
        assert!(!player.update(1.0));
    }

    #[test]
    fn test_enqueue_does_not_wait_for_parallel_actions() {
        let mut player = ActionPlayer::new();
        player.run_action(Some(Action::wait(10.0).with_name("long_parallel")), None);
        player.enqueue_action(Some(Action::wait(0.5).with_name("short")), None);
        player.enqueue_action(Some(Action::wait(0.5).with_name("after_short")), None);
        assert_eq!(player.num_queues(), 2);

        player.update(1.0);
        assert!(!player.action_running("short"));
        assert!(player.action_running("after_short"));
        assert!(player.action_running("long_parallel"));

        // The default queue survives draining and keeps serving enqueue_action
        player.update(1.0);
        assert_eq!(player.num_queues(), 1);
        player.run_action(Some(Action::wait(10.0).with_name("second_parallel")), None);
        player.enqueue_action(Some(Action::wait(0.5).with_name("late")), None);
        player.update(1.0);
        assert!(!player.action_running("late"));
        assert_eq!(player.num_actions(), 2);
    }

    #[test]
    fn test_null_rejected() {
        let mut player = ActionPlayer::new();
        assert!(!player.run_action(None, None));
        assert!(!player.enqueue_action(None, None));
        assert_eq!(player.num_actions(), 0);
    }

    #[test]
    fn test_pause_resume_stop() {
        let s = sprite();
        let mut player = ActionPlayer::new();
        player.run_action(Some(Action::move_by(s.clone(), 10, 0, 1.0)), None);

        player.update(0.5);
        assert_eq!(s.borrow().position(), Point::new(5, 0));

        player.pause();
        player.update(0.5);
        assert_eq!(s.borrow().position(), Point::new(5, 0));

        player.stop();
        player.update(0.0);
        assert_eq!(s.borrow().position(), Point::new(0, 0));

        player.resume();
        player.update(1.0);
        assert_eq!(s.borrow().position(), Point::new(10, 0));
        assert_eq!(player.num_actions(), 0);
    }

    #[test]
    fn test_speed_and_default_easing_from_config() {
        let config = ActionConfig {
            speed: 2.0,
            easing: "quad_in".to_string(),
        };
        let s = sprite();
        let mut player = ActionPlayer::with_config(&config);
        player.run_action(Some(Action::move_by(s.clone(), 100, 0, 1.0)), None);

        // Half a second at double speed is the whole action
        player.update(0.25);
        assert_eq!(s.borrow().position(), Point::new(25, 0));
        player.update(0.25);
        assert_eq!(s.borrow().position(), Point::new(100, 0));

        player.set_speed(-1.0);
        assert_eq!(player.speed(), 2.0);
    }

    #[test]
    fn test_remove_and_clear() {
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        let mut player = ActionPlayer::new();
        player.run_action(
            Some(Action::wait(1.0).with_name("blink")),
            Some(Box::new(move |_: &mut DispatchQueue| f.set(true))),
        );
        player.run_action(Some(Action::wait(1.0).with_name("slide")), None);

        assert!(player.remove_action("blink"));
        assert!(!player.action_running("blink"));
        assert_eq!(player.num_queues(), 1);

        player.clear_actions();
        assert_eq!(player.num_actions(), 0);
        assert!(!fired.get());
    }
}
