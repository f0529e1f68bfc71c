//! Primitive timed mutations: move, fade, scale
//!
//! A tween captures its start value from the target on its first frame and
//! writes an absolute value every frame after that, so rounding never
//! accumulates. The final frame writes the exact end value.
//!
//! Copies made with `clone` or [`Tween::reversed`] share one origin cell: the
//! start value most recently captured by a forward copy. A reversed absolute
//! tween plays from wherever the target is back to that origin.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::geom::{Point, Size};
use crate::sprite::Transformable;

use super::easing::Easing;

/// Shared handle to the object an action mutates
pub type Target = Rc<RefCell<dyn Transformable>>;

/// Which property of the target a tween drives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Property {
    Position,
    Alpha,
    Size,
}

/// Where a tween ends relative to where it starts
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Goal {
    /// Absolute end value
    To([f32; 2]),
    /// End = start + delta
    By([f32; 2]),
    /// End = start * factor
    Times(f32),
}

impl Goal {
    fn end(&self, start: [f32; 2]) -> [f32; 2] {
        match *self {
            Goal::To(end) => end,
            Goal::By([dx, dy]) => [start[0] + dx, start[1] + dy],
            Goal::Times(f) => [start[0] * f, start[1] * f],
        }
    }
}

#[derive(Clone)]
pub struct Tween {
    target: Target,
    property: Property,
    goal: Goal,
    duration: f32,
    elapsed: f32,
    /// Captured on the first frame
    start: Option<[f32; 2]>,
    /// Start of the latest forward run, shared with reversed copies
    origin: Rc<Cell<Option<[f32; 2]>>>,
    /// Head back to `origin` instead of toward the goal
    backwards: bool,
}

impl Tween {
    pub fn new(target: Target, property: Property, goal: Goal, duration: f32) -> Self {
        Self {
            target,
            property,
            goal,
            duration: duration.max(0.0),
            elapsed: 0.0,
            start: None,
            origin: Rc::new(Cell::new(None)),
            backwards: false,
        }
    }

    pub fn property(&self) -> Property {
        self.property
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Advance by `dt` (already speed-scaled); true once finished
    pub fn advance(&mut self, dt: f32, easing: &Easing) -> bool {
        let start = match self.start {
            Some(start) => start,
            None => {
                let start = self.read();
                self.start = Some(start);
                if !self.backwards {
                    self.origin.set(Some(start));
                }
                start
            }
        };
        let end = self.end(start);

        self.elapsed += dt.max(0.0);
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            self.write(end);
            return true;
        }

        let progress = easing.ease(self.elapsed / self.duration);
        self.write([
            start[0] + (end[0] - start[0]) * progress,
            start[1] + (end[1] - start[1]) * progress,
        ]);
        false
    }

    fn end(&self, start: [f32; 2]) -> [f32; 2] {
        if !self.backwards {
            return self.goal.end(start);
        }
        match self.origin.get() {
            Some(origin) => origin,
            None => {
                // The forward copy never ran, so there is nowhere to return to
                tracing::debug!(property = ?self.property, "reversed tween has no origin");
                start
            }
        }
    }

    /// Put the target back where this tween found it and re-arm
    pub fn rewind(&mut self) {
        if let Some(start) = self.start.take() {
            self.write(start);
        }
        self.elapsed = 0.0;
    }

    /// Re-arm without touching the target
    pub fn reset(&mut self) {
        self.start = None;
        self.elapsed = 0.0;
    }

    /// Inverted copy
    ///
    /// Relative goals invert their delta or factor; absolute goals play
    /// from the target's current value back to the origin captured by the
    /// forward copy.
    pub fn reversed(&self) -> Self {
        let mut tween = self.clone();
        tween.reset();
        match self.goal {
            Goal::To(_) => tween.backwards = !self.backwards,
            Goal::By([dx, dy]) => tween.goal = Goal::By([-dx, -dy]),
            Goal::Times(f) if f != 0.0 => tween.goal = Goal::Times(1.0 / f),
            Goal::Times(_) => {
                tracing::warn!("cannot invert a zero scale factor");
            }
        }
        tween
    }

    fn read(&self) -> [f32; 2] {
        let target = self.target.borrow();
        match self.property {
            Property::Position => {
                let p = target.position();
                [p.x as f32, p.y as f32]
            }
            Property::Size => {
                let s = target.size();
                [s.width as f32, s.height as f32]
            }
            Property::Alpha => [target.alpha() as f32, 0.0],
        }
    }

    fn write(&self, value: [f32; 2]) {
        let mut target = self.target.borrow_mut();
        match self.property {
            Property::Position => {
                target.set_position(Point::new(value[0].round() as i32, value[1].round() as i32));
            }
            Property::Size => {
                target.set_size(Size::new(value[0].round() as i32, value[1].round() as i32));
            }
            Property::Alpha => target.set_alpha(value[0].round().clamp(0.0, 255.0) as u8),
        }
    }
}

/// Elapsed-time countdown with no side effects
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wait {
    duration: f32,
    elapsed: f32,
}

impl Wait {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        self.elapsed >= self.duration
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;
    use crate::sprite::Sprite;

    fn sprite() -> Rc<RefCell<Sprite>> {
        Rc::new(RefCell::new(Sprite::new(
            "s",
            Point::new(0, 0),
            Size::new(10, 10),
            Color::WHITE,
        )))
    }

    #[test]
    fn test_move_by_interpolates_and_lands_exactly() {
        let s = sprite();
        let mut tween = Tween::new(s.clone(), Property::Position, Goal::By([100.0, 10.0]), 1.0);

        assert!(!tween.advance(0.25, &Easing::Linear));
        assert_eq!(s.borrow().position(), Point::new(25, 3));
        assert!(tween.advance(1.0, &Easing::Linear));
        assert_eq!(s.borrow().position(), Point::new(100, 10));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let s = sprite();
        let mut tween = Tween::new(s.clone(), Property::Alpha, Goal::To([0.0, 0.0]), 0.0);
        assert!(tween.advance(0.0, &Easing::Linear));
        assert_eq!(s.borrow().alpha(), 0);
    }

    #[test]
    fn test_fade_clamps_to_byte() {
        let s = sprite();
        let mut tween = Tween::new(s.clone(), Property::Alpha, Goal::By([100.0, 0.0]), 1.0);
        tween.advance(2.0, &Easing::Linear);
        assert_eq!(s.borrow().alpha(), 255);
    }

    #[test]
    fn test_rewind_restores_start() {
        let s = sprite();
        let mut tween = Tween::new(s.clone(), Property::Size, Goal::Times(2.0), 1.0);
        tween.advance(0.5, &Easing::Linear);
        assert_eq!(s.borrow().size(), Size::new(15, 15));
        tween.rewind();
        assert_eq!(s.borrow().size(), Size::new(10, 10));
    }

    #[test]
    fn test_reversed_goals() {
        let s = sprite();
        let by = Tween::new(s.clone(), Property::Position, Goal::By([4.0, -2.0]), 1.0);
        assert_eq!(by.reversed().goal, Goal::By([-4.0, 2.0]));

        let times = Tween::new(s.clone(), Property::Size, Goal::Times(4.0), 1.0);
        assert_eq!(times.reversed().goal, Goal::Times(0.25));

    }

    #[test]
    fn test_reversed_to_returns_to_forward_origin() {
        let s = sprite();
        s.borrow_mut().set_position(Point::new(8, 4));
        let mut forward = Tween::new(s.clone(), Property::Position, Goal::To([40.0, 0.0]), 1.0);
        let mut back = forward.reversed();

        assert!(forward.advance(1.0, &Easing::Linear));
        assert_eq!(s.borrow().position(), Point::new(40, 0));

        assert!(!back.advance(0.5, &Easing::Linear));
        assert_eq!(s.borrow().position(), Point::new(24, 2));
        assert!(back.advance(0.5, &Easing::Linear));
        assert_eq!(s.borrow().position(), Point::new(8, 4));
    }

    #[test]
    fn test_reversed_to_without_forward_run_stays_put() {
        let s = sprite();
        s.borrow_mut().set_position(Point::new(5, 5));
        let forward = Tween::new(s.clone(), Property::Position, Goal::To([40.0, 0.0]), 1.0);
        let mut back = forward.reversed();

        assert!(!back.advance(0.0, &Easing::Linear));
        assert_eq!(s.borrow().position(), Point::new(5, 5));
        assert!(back.advance(1.0, &Easing::Linear));
        assert_eq!(s.borrow().position(), Point::new(5, 5));
    }

    #[test]
    fn test_wait() {
        let mut wait = Wait::new(1.0);
        assert!(!wait.advance(0.5));
        assert!(wait.advance(0.5));
        wait.reset();
        assert!(!wait.advance(0.1));
    }
}
