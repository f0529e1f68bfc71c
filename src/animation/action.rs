//! Actions - timed mutators with a uniform frame-driven interface
//!
//! [`Action`] is a closed set of kinds. Primitives (move, fade, scale,
//! wait, callback) mutate a target directly; composites (group, sequence,
//! repeat) own child actions and forward every control call to them.
//!
//! State machine: `Playing -> (Paused <-> Playing) -> Completed`. A
//! completed action must not be advanced again; rewinding re-arms it.

use std::fmt;
use std::rc::Rc;

use crate::geom::{Point, Size};

use super::composite::{Group, Repeat, Sequence};
use super::easing::Easing;
use super::tween::{Goal, Property, Target, Tween, Wait};

/// Result of advancing an action by one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
    Playing,
    Paused,
    Completed,
}

pub(crate) type CallbackFn = Rc<dyn Fn()>;

#[derive(Clone)]
pub(crate) enum ActionKind {
    Tween(Tween),
    Wait(Wait),
    Callback(CallbackFn),
    Group(Group),
    Sequence(Sequence),
    Repeat(Repeat),
}

/// A timed mutation
#[derive(Clone)]
pub struct Action {
    name: String,
    pub(crate) kind: ActionKind,
    speed: f32,
    /// `None` until set explicitly; players may supply a default
    easing: Option<Easing>,
    state: FrameState,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("speed", &self.speed)
            .field("easing", &self.easing)
            .field("state", &self.state)
            .finish()
    }
}

impl Action {
    fn new(name: &str, kind: ActionKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            speed: 1.0,
            easing: None,
            state: FrameState::Playing,
        }
    }

    fn tween(name: &str, target: Target, property: Property, goal: Goal, duration: f32) -> Self {
        Self::new(name, ActionKind::Tween(Tween::new(target, property, goal, duration)))
    }

    /// Move to an absolute position
    pub fn move_to(target: Target, position: Point, duration: f32) -> Self {
        let goal = Goal::To([position.x as f32, position.y as f32]);
        Self::tween("move_to", target, Property::Position, goal, duration)
    }

    /// Move by a relative offset
    pub fn move_by(target: Target, dx: i32, dy: i32, duration: f32) -> Self {
        let goal = Goal::By([dx as f32, dy as f32]);
        Self::tween("move_by", target, Property::Position, goal, duration)
    }

    /// Fade to an absolute alpha
    pub fn fade_to(target: Target, alpha: u8, duration: f32) -> Self {
        let goal = Goal::To([alpha as f32, 0.0]);
        Self::tween("fade_to", target, Property::Alpha, goal, duration)
    }

    /// Fade by a relative alpha delta; the result is clamped to 0..=255
    pub fn fade_by(target: Target, delta: i16, duration: f32) -> Self {
        let goal = Goal::By([delta as f32, 0.0]);
        Self::tween("fade_by", target, Property::Alpha, goal, duration)
    }

    /// Resize to an absolute size
    pub fn scale_to(target: Target, size: Size, duration: f32) -> Self {
        let goal = Goal::To([size.width as f32, size.height as f32]);
        Self::tween("scale_to", target, Property::Size, goal, duration)
    }

    /// Multiply the size by `factor`
    pub fn scale_by(target: Target, factor: f32, duration: f32) -> Self {
        Self::tween("scale_by", target, Property::Size, Goal::Times(factor), duration)
    }

    /// Do nothing for `duration` seconds
    pub fn wait(duration: f32) -> Self {
        Self::new("wait", ActionKind::Wait(Wait::new(duration)))
    }

    /// Run `f` once and complete in the same frame
    pub fn callback(f: impl Fn() + 'static) -> Self {
        Self::new("callback", ActionKind::Callback(Rc::new(f)))
    }

    /// Run all `actions` in parallel; completes with the slowest
    pub fn group(actions: Vec<Action>) -> Self {
        Self::new("group", ActionKind::Group(Group::new(actions)))
    }

    /// Run `actions` one after another
    pub fn sequence(actions: Vec<Action>) -> Self {
        Self::new("sequence", ActionKind::Sequence(Sequence::new(actions)))
    }

    /// Play `action` `times` times, rewinding between runs
    pub fn repeat(action: Action, times: u32) -> Self {
        Self::new("repeat", ActionKind::Repeat(Repeat::new(action, Some(times))))
    }

    /// Play `action` until removed
    pub fn repeat_forever(action: Action) -> Self {
        Self::new("repeat_forever", ActionKind::Repeat(Repeat::new(action, None)))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.set_speed(speed);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.set_easing(easing);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == FrameState::Completed
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Effective timing curve
    pub fn easing(&self) -> Easing {
        self.easing.unwrap_or_default()
    }

    pub fn has_easing(&self) -> bool {
        self.easing.is_some()
    }

    /// Nominal length in seconds at unit speed; infinite for repeat-forever
    pub fn duration(&self) -> f32 {
        let base = match &self.kind {
            ActionKind::Tween(t) => t.duration(),
            ActionKind::Wait(w) => w.duration(),
            ActionKind::Callback(_) => 0.0,
            ActionKind::Group(g) => g.duration(),
            ActionKind::Sequence(s) => s.duration(),
            ActionKind::Repeat(r) => r.duration(),
        };
        base / self.speed.max(f32::EPSILON)
    }

    /// Set the playback multiplier; composites forward it to every child
    pub fn set_speed(&mut self, speed: f32) {
        let speed = if speed.is_finite() && speed >= 0.0 {
            speed
        } else {
            tracing::warn!(action = %self.name, speed, "invalid action speed, using 0");
            0.0
        };
        self.speed = speed;
        self.for_each_child(|child| child.set_speed(speed));
    }

    /// Set the timing curve; composites forward it to every child
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = Some(easing);
        self.for_each_child(|child| child.set_easing(easing));
    }

    /// Give `easing` to this action and any descendant that has none
    pub(crate) fn apply_default_easing(&mut self, easing: Easing) {
        if self.easing.is_none() {
            self.easing = Some(easing);
        }
        self.for_each_child(|child| child.apply_default_easing(easing));
    }

    fn for_each_child(&mut self, mut f: impl FnMut(&mut Action)) {
        match &mut self.kind {
            ActionKind::Group(g) => g.children_mut().iter_mut().for_each(&mut f),
            ActionKind::Sequence(s) => s.children_mut().iter_mut().for_each(&mut f),
            ActionKind::Repeat(r) => f(r.child_mut()),
            ActionKind::Tween(_) | ActionKind::Wait(_) | ActionKind::Callback(_) => {}
        }
    }

    /// Advance by `dt` seconds
    ///
    /// Primitives scale `dt` by their own speed; composites pass it through
    /// unscaled since their children carry the propagated speed. A paused
    /// action resumes.
    pub fn next_frame(&mut self, dt: f32) -> FrameState {
        debug_assert!(
            self.state != FrameState::Completed,
            "next_frame on completed action {}",
            self.name
        );
        if self.state == FrameState::Completed {
            return FrameState::Completed;
        }
        self.state = FrameState::Playing;

        let easing = self.easing();
        let scaled = dt.max(0.0) * self.speed;
        let done = match &mut self.kind {
            ActionKind::Tween(t) => t.advance(scaled, &easing),
            ActionKind::Wait(w) => w.advance(scaled),
            ActionKind::Callback(f) => {
                f();
                true
            }
            ActionKind::Group(g) => g.advance(dt),
            ActionKind::Sequence(s) => s.advance(dt),
            ActionKind::Repeat(r) => r.advance(dt),
        };

        if done {
            tracing::trace!(action = %self.name, "action completed");
            self.state = FrameState::Completed;
        }
        self.state
    }

    /// Hold the action (and its children) in place
    pub fn pause(&mut self) {
        if self.state == FrameState::Completed {
            return;
        }
        self.state = FrameState::Paused;
        self.for_each_child(|child| child.pause());
    }

    pub fn resume(&mut self) {
        if self.state != FrameState::Paused {
            return;
        }
        self.state = FrameState::Playing;
        self.for_each_child(|child| child.resume());
    }

    /// Restore the target to where the action found it and re-arm for replay
    pub fn rewind(&mut self) {
        self.state = FrameState::Playing;
        match &mut self.kind {
            ActionKind::Tween(t) => t.rewind(),
            ActionKind::Wait(w) => w.reset(),
            ActionKind::Callback(_) => {}
            ActionKind::Group(g) => g.rewind(),
            ActionKind::Sequence(s) => s.rewind(),
            ActionKind::Repeat(r) => r.rewind(),
        }
    }

    /// Re-arm without touching any target
    pub(crate) fn reset(&mut self) {
        self.state = FrameState::Playing;
        match &mut self.kind {
            ActionKind::Tween(t) => t.reset(),
            ActionKind::Wait(w) => w.reset(),
            ActionKind::Callback(_) => {}
            ActionKind::Group(g) => g.reset(),
            ActionKind::Sequence(s) => s.reset(),
            ActionKind::Repeat(r) => r.reset(),
        }
    }

    /// Fresh copy that plays backwards
    ///
    /// Relative actions invert their delta, absolute ones return to their
    /// captured start, sequences run in reverse order, groups and repeats
    /// reverse each child.
    pub fn reversed(&self) -> Action {
        let kind = match &self.kind {
            ActionKind::Tween(t) => ActionKind::Tween(t.reversed()),
            ActionKind::Wait(w) => {
                let mut w = *w;
                w.reset();
                ActionKind::Wait(w)
            }
            ActionKind::Callback(f) => ActionKind::Callback(Rc::clone(f)),
            ActionKind::Group(g) => ActionKind::Group(g.reversed()),
            ActionKind::Sequence(s) => ActionKind::Sequence(s.reversed()),
            ActionKind::Repeat(r) => ActionKind::Repeat(r.reversed()),
        };
        Action {
            name: self.name.clone(),
            kind,
            speed: self.speed,
            easing: self.easing,
            state: FrameState::Playing,
        }
    }
}
