//! Timing curves
//!
//! An easing maps normalized elapsed time in `[0, 1]` to eased progress.
//! Every curve satisfies `ease(0) == 0` and `ease(1) == 1`; back and
//! elastic curves overshoot in between.

use std::f32::consts::PI;

/// Timing curve applied by primitive actions
#[derive(Debug, Clone, Copy, Default)]
pub enum Easing {
    /// Linear interpolation (no easing)
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    CircIn,
    CircOut,
    CircInOut,
    /// Pulls back before moving forward
    BackIn,
    BackOut,
    BackInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    /// Custom cubic bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
    /// Caller-supplied curve; compares equal only to the same function address
    Custom(fn(f32) -> f32),
}

impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Easing::CubicBezier(a, b, c, d), Easing::CubicBezier(e, f, g, h)) => {
                (a, b, c, d) == (e, f, g, h)
            }
            (Easing::Custom(a), Easing::Custom(b)) => *a as usize == *b as usize,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

const BACK: f32 = 1.70158;
const BACK_IN_OUT: f32 = BACK * 1.525;

impl Easing {
    /// Standard easing presets (CSS-like)
    pub const EASE: Easing = Easing::CubicBezier(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: Easing = Easing::CubicBezier(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Easing = Easing::CubicBezier(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Easing = Easing::CubicBezier(0.42, 0.0, 0.58, 1.0);

    /// Parse easing from string name
    ///
    /// Accepts `ease_in_out_quad`, `quad_in_out`, `ease-out-back` and the
    /// CSS names. Unknown names fall back to [`Easing::Linear`].
    pub fn from_name(name: &str) -> Self {
        let key = name.trim().to_lowercase().replace('-', "_");
        let key = key.strip_prefix("ease_").unwrap_or(&key);
        match key {
            "linear" => Easing::Linear,
            "ease" => Easing::EASE,
            "in" => Easing::EASE_IN,
            "out" => Easing::EASE_OUT,
            "in_out" => Easing::EASE_IN_OUT,
            "in_quad" | "quad_in" => Easing::QuadIn,
            "out_quad" | "quad_out" => Easing::QuadOut,
            "in_out_quad" | "quad_in_out" => Easing::QuadInOut,
            "in_cubic" | "cubic_in" => Easing::CubicIn,
            "out_cubic" | "cubic_out" => Easing::CubicOut,
            "in_out_cubic" | "cubic_in_out" => Easing::CubicInOut,
            "in_quart" | "quart_in" => Easing::QuartIn,
            "out_quart" | "quart_out" => Easing::QuartOut,
            "in_out_quart" | "quart_in_out" => Easing::QuartInOut,
            "in_quint" | "quint_in" => Easing::QuintIn,
            "out_quint" | "quint_out" => Easing::QuintOut,
            "in_out_quint" | "quint_in_out" => Easing::QuintInOut,
            "in_sine" | "sine_in" => Easing::SineIn,
            "out_sine" | "sine_out" => Easing::SineOut,
            "in_out_sine" | "sine_in_out" => Easing::SineInOut,
            "in_expo" | "expo_in" => Easing::ExpoIn,
            "out_expo" | "expo_out" => Easing::ExpoOut,
            "in_out_expo" | "expo_in_out" => Easing::ExpoInOut,
            "in_circ" | "circ_in" => Easing::CircIn,
            "out_circ" | "circ_out" => Easing::CircOut,
            "in_out_circ" | "circ_in_out" => Easing::CircInOut,
            "in_back" | "back_in" => Easing::BackIn,
            "out_back" | "back_out" => Easing::BackOut,
            "in_out_back" | "back_in_out" => Easing::BackInOut,
            "in_bounce" | "bounce_in" => Easing::BounceIn,
            "out_bounce" | "bounce_out" => Easing::BounceOut,
            "in_out_bounce" | "bounce_in_out" => Easing::BounceInOut,
            "in_elastic" | "elastic_in" => Easing::ElasticIn,
            "out_elastic" | "elastic_out" => Easing::ElasticOut,
            "in_out_elastic" | "elastic_in_out" => Easing::ElasticInOut,
            _ => {
                tracing::warn!(name, "unknown easing, using linear");
                Easing::Linear
            }
        }
    }

    /// Calculate the eased value for a given progress (0.0 to 1.0)
    pub fn ease(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t).powi(2),
            Easing::QuadInOut => in_out(t, |t| t * t),
            Easing::CubicIn => t.powi(3),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => in_out(t, |t| t.powi(3)),
            Easing::QuartIn => t.powi(4),
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
            Easing::QuartInOut => in_out(t, |t| t.powi(4)),
            Easing::QuintIn => t.powi(5),
            Easing::QuintOut => 1.0 - (1.0 - t).powi(5),
            Easing::QuintInOut => in_out(t, |t| t.powi(5)),
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::ExpoIn => expo_in(t),
            Easing::ExpoOut => 1.0 - expo_in(1.0 - t),
            Easing::ExpoInOut => in_out(t, expo_in),
            Easing::CircIn => 1.0 - (1.0 - t * t).sqrt(),
            Easing::CircOut => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Easing::CircInOut => in_out(t, |t| 1.0 - (1.0 - t * t).sqrt()),
            Easing::BackIn => back_in(t, BACK),
            Easing::BackOut => 1.0 - back_in(1.0 - t, BACK),
            Easing::BackInOut => in_out(t, |t| back_in(t, BACK_IN_OUT)),
            Easing::BounceIn => 1.0 - bounce_out(1.0 - t),
            Easing::BounceOut => bounce_out(t),
            Easing::BounceInOut => in_out(t, |t| 1.0 - bounce_out(1.0 - t)),
            Easing::ElasticIn => elastic_in(t),
            Easing::ElasticOut => 1.0 - elastic_in(1.0 - t),
            Easing::ElasticInOut => in_out(t, elastic_in),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
            Easing::Custom(f) => f(t),
        }
    }
}

/// Build an in-out curve from its "in" half
#[inline]
fn in_out(t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    if t < 0.5 {
        ease_in(t * 2.0) / 2.0
    } else {
        1.0 - ease_in((1.0 - t) * 2.0) / 2.0
    }
}

fn expo_in(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else {
        2f32.powf(10.0 * t - 10.0)
    }
}

fn back_in(t: f32, s: f32) -> f32 {
    t * t * ((s + 1.0) * t - s)
}

fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

fn elastic_in(t: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }
    let c = 2.0 * PI / 3.0;
    -(2f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * c).sin()
}

/// Cubic bezier interpolation
/// Based on WebKit's implementation
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Find s such that x(s) = t with Newton-Raphson, then return y(s)
    let mut s = t;

    for _ in 0..8 {
        let x = bezier_sample(s, x1, x2) - t;
        if x.abs() < 0.0001 {
            break;
        }
        let dx = bezier_derivative(s, x1, x2);
        if dx.abs() < 0.0001 {
            break;
        }
        s -= x / dx;
    }

    bezier_sample(s.clamp(0.0, 1.0), y1, y2)
}

/// Sample a 1D bezier curve at parameter s
#[inline]
fn bezier_sample(s: f32, p1: f32, p2: f32) -> f32 {
    // B(s) = 3(1-s)^2 s p1 + 3(1-s) s^2 p2 + s^3
    let one_minus_s = 1.0 - s;
    3.0 * one_minus_s * one_minus_s * s * p1 + 3.0 * one_minus_s * s * s * p2 + s * s * s
}

/// Derivative of 1D bezier curve at parameter s
#[inline]
fn bezier_derivative(s: f32, p1: f32, p2: f32) -> f32 {
    let one_minus_s = 1.0 - s;
    3.0 * one_minus_s * one_minus_s * p1 + 6.0 * one_minus_s * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[Easing] = &[
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuartIn,
        Easing::QuartOut,
        Easing::QuartInOut,
        Easing::QuintIn,
        Easing::QuintOut,
        Easing::QuintInOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::ExpoIn,
        Easing::ExpoOut,
        Easing::ExpoInOut,
        Easing::CircIn,
        Easing::CircOut,
        Easing::CircInOut,
        Easing::BackIn,
        Easing::BackOut,
        Easing::BackInOut,
        Easing::BounceIn,
        Easing::BounceOut,
        Easing::BounceInOut,
        Easing::ElasticIn,
        Easing::ElasticOut,
        Easing::ElasticInOut,
        Easing::EASE,
        Easing::EASE_IN_OUT,
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert!(easing.ease(0.0).abs() < 0.001, "{:?} at 0", easing);
            assert!((easing.ease(1.0) - 1.0).abs() < 0.001, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_in_out_midpoint() {
        for easing in [Easing::QuadInOut, Easing::CubicInOut, Easing::SineInOut, Easing::BounceInOut] {
            assert!((easing.ease(0.5) - 0.5).abs() < 0.001, "{:?}", easing);
        }
    }

    #[test]
    fn test_input_clamped() {
        assert_eq!(Easing::Linear.ease(-1.0), 0.0);
        assert_eq!(Easing::Linear.ease(2.0), 1.0);
    }

    #[test]
    fn test_quad_shape() {
        assert!((Easing::QuadIn.ease(0.5) - 0.25).abs() < 0.0001);
        assert!((Easing::QuadOut.ease(0.5) - 0.75).abs() < 0.0001);
    }

    #[test]
    fn test_back_overshoots() {
        assert!(Easing::BackIn.ease(0.2) < 0.0);
        assert!(Easing::BackOut.ease(0.8) > 1.0);
    }

    #[test]
    fn test_bezier_linear_control_points() {
        let easing = Easing::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((easing.ease(t) - t).abs() < 0.01);
        }
    }

    #[test]
    fn test_custom() {
        fn step(t: f32) -> f32 {
            if t < 1.0 {
                0.0
            } else {
                1.0
            }
        }
        fn ramp(t: f32) -> f32 {
            t
        }
        let easing = Easing::Custom(step);
        assert_eq!(easing.ease(0.9), 0.0);
        assert_eq!(easing.ease(1.0), 1.0);
        assert_ne!(easing, Easing::Custom(ramp));
        assert_ne!(easing, Easing::Linear);
    }

    #[test]
    fn test_equality() {
        assert_eq!(Easing::EASE, Easing::CubicBezier(0.25, 0.1, 0.25, 1.0));
        assert_ne!(Easing::EASE, Easing::EASE_IN);
        assert_eq!(Easing::QuadIn, Easing::QuadIn);
        assert_ne!(Easing::QuadIn, Easing::QuadOut);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Easing::from_name("linear"), Easing::Linear);
        assert_eq!(Easing::from_name("ease_in_out_quad"), Easing::QuadInOut);
        assert_eq!(Easing::from_name("quad-in-out"), Easing::QuadInOut);
        assert_eq!(Easing::from_name("Ease-Out-Back"), Easing::BackOut);
        assert_eq!(Easing::from_name("ease"), Easing::EASE);
        assert_eq!(Easing::from_name("wobble"), Easing::Linear);
    }
}
