//! Easing functions for animation interpolation.
//!
//! Every curve family is available in ease-in, ease-out, and ease-in-out
//! variants. Out variants are the point reflection of the in variant
//! (`out(t) = 1 - in(1 - t)`); in-out variants split `t` at 0.5, applying
//! the in curve to the first half and the out curve to the second, each
//! contributing exactly half the output range.
//!
//! All curves satisfy `f(0) = 0` and `f(1) = 1`. Terminal inputs short-cut
//! to the exact endpoint so a tween's final frame never drifts.

use serde::{Deserialize, Serialize};

/// Which end(s) of the curve the easing is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EasingInterpolationMode {
    /// Slow start, fast end.
    EaseIn,
    /// Fast start, slow end.
    EaseOut,
    /// In curve over the first half, out curve over the second.
    EaseInOut,
}

/// Easing curve families.
///
/// Shape parameters use the conventional defaults exposed by the
/// `back()`, `bounce()`, and `elastic()` constructors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EasingFunction {
    /// Quadratic curve: `in(t) = t²`.
    Quadratic,
    /// Cubic curve with overshoot: `in(t) = t²·((a+1)·t − a)`.
    /// An amplitude of 0 degenerates to the plain cubic `t³`.
    Back {
        /// Overshoot amplitude. Default 1.70158.
        amplitude: f32,
    },
    /// Decaying-parabola bounce.
    Bounce {
        /// Number of bounces before the final approach. Default 3.
        bounces: u32,
        /// Height ratio between successive bounces. Must exceed 1;
        /// values at or below 1 are clamped. Default 2.0.
        bounciness: f32,
    },
    /// Exponentially growing spring oscillation.
    Elastic {
        /// Number of full oscillations. Default 3.
        oscillations: u32,
        /// Exponential growth rate; 0 grows linearly. Default 3.0.
        springiness: f32,
    },
}

impl EasingFunction {
    /// Default overshoot amplitude for [`EasingFunction::Back`].
    pub const DEFAULT_BACK_AMPLITUDE: f32 = 1.70158;
    /// Default bounce count for [`EasingFunction::Bounce`].
    pub const DEFAULT_BOUNCES: u32 = 3;
    /// Default bounciness for [`EasingFunction::Bounce`].
    pub const DEFAULT_BOUNCINESS: f32 = 2.0;
    /// Default oscillation count for [`EasingFunction::Elastic`].
    pub const DEFAULT_OSCILLATIONS: u32 = 3;
    /// Default springiness for [`EasingFunction::Elastic`].
    pub const DEFAULT_SPRINGINESS: f32 = 3.0;

    /// Back curve with the default 1.70158 overshoot.
    #[must_use]
    pub const fn back() -> Self {
        Self::Back {
            amplitude: Self::DEFAULT_BACK_AMPLITUDE,
        }
    }

    /// Plain cubic curve (back with zero overshoot).
    #[must_use]
    pub const fn cubic() -> Self {
        Self::Back { amplitude: 0.0 }
    }

    /// Bounce curve with default bounce count and bounciness.
    #[must_use]
    pub const fn bounce() -> Self {
        Self::Bounce {
            bounces: Self::DEFAULT_BOUNCES,
            bounciness: Self::DEFAULT_BOUNCINESS,
        }
    }

    /// Elastic curve with default oscillations and springiness.
    #[must_use]
    pub const fn elastic() -> Self {
        Self::Elastic {
            oscillations: Self::DEFAULT_OSCILLATIONS,
            springiness: Self::DEFAULT_SPRINGINESS,
        }
    }

    /// The ease-in form of this curve.
    ///
    /// Terminal inputs return exactly 0 or 1.
    #[must_use]
    pub fn ease_in(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            Self::Quadratic => t * t,
            Self::Back { amplitude } => {
                t * t * ((amplitude + 1.0) * t - amplitude)
            }
            Self::Bounce {
                bounces,
                bounciness,
            } => bounce_in(f64::from(t), bounces, f64::from(bounciness)) as f32,
            Self::Elastic {
                oscillations,
                springiness,
            } => {
                elastic_in(f64::from(t), oscillations, f64::from(springiness))
                    as f32
            }
        }
    }

    /// The ease-out form: `1 - in(1 - t)`.
    #[must_use]
    pub fn ease_out(&self, t: f32) -> f32 {
        1.0 - self.ease_in(1.0 - t)
    }
}

/// Bounce ease-in: a train of parabolic arcs whose heights grow by
/// `bounciness` per arc, the last (unit-height) arc peaking at t = 1.
///
/// Computed in f64; the closed form is exact at both endpoints for any
/// parameter pair.
fn bounce_in(t: f64, bounces: u32, bounciness: f64) -> f64 {
    let bounces = f64::from(bounces);
    let bounciness = if bounciness <= 1.0 { 1.001 } else { bounciness };

    // Total span in "unit" time, where each arc is `bounciness` times
    // longer than the previous and the final arc is a half arc.
    let pow = bounciness.powf(bounces);
    let one_minus = 1.0 - bounciness;
    let sum_units = (1.0 - pow) / one_minus + pow * 0.5;

    // Which arc `t` lands in.
    let unit_at_t = t * sum_units;
    let arc = ((-unit_at_t).mul_add(one_minus, 1.0).ln()
        / bounciness.ln())
    .floor();

    let start_time = (1.0 - bounciness.powf(arc)) / (one_minus * sum_units);
    let end_time =
        (1.0 - bounciness.powf(arc + 1.0)) / (one_minus * sum_units);
    let mid_time = (start_time + end_time) * 0.5;

    let distance = t - mid_time;
    let radius = mid_time - start_time;
    let amplitude = (1.0 / bounciness).powf(bounces - arc);
    (-amplitude / (radius * radius)) * (distance - radius) * (distance + radius)
}

/// Elastic ease-in: exponentially growing oscillation ending at 1.
fn elastic_in(t: f64, oscillations: u32, springiness: f64) -> f64 {
    let oscillations = f64::from(oscillations);
    let expo = if springiness == 0.0 {
        t
    } else {
        ((springiness * t).exp() - 1.0) / (springiness.exp() - 1.0)
    };
    let phase = std::f64::consts::TAU * oscillations
        + std::f64::consts::FRAC_PI_2;
    expo * (phase * t).sin()
}

/// A curve family paired with an interpolation mode, evaluated per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Easing {
    /// The curve family.
    pub function: EasingFunction,
    /// Which end(s) the curve is applied to.
    pub mode: EasingInterpolationMode,
}

impl Easing {
    /// Pair a curve family with an interpolation mode.
    #[must_use]
    pub const fn new(
        function: EasingFunction,
        mode: EasingInterpolationMode,
    ) -> Self {
        Self { function, mode }
    }

    /// Quadratic curve in the given mode.
    #[must_use]
    pub const fn quadratic(mode: EasingInterpolationMode) -> Self {
        Self::new(EasingFunction::Quadratic, mode)
    }

    /// Back curve (default overshoot) in the given mode.
    #[must_use]
    pub const fn back(mode: EasingInterpolationMode) -> Self {
        Self::new(EasingFunction::back(), mode)
    }

    /// Bounce curve (default parameters) in the given mode.
    #[must_use]
    pub const fn bounce(mode: EasingInterpolationMode) -> Self {
        Self::new(EasingFunction::bounce(), mode)
    }

    /// Elastic curve (default parameters) in the given mode.
    #[must_use]
    pub const fn elastic(mode: EasingInterpolationMode) -> Self {
        Self::new(EasingFunction::elastic(), mode)
    }

    /// Evaluate the eased progress at raw progress `t`.
    ///
    /// The in-out mode uses the exact halving rule: `0.5·in(2t)` for
    /// `t ≤ 0.5` and `0.5 + 0.5·out(2t − 1)` for `t > 0.5`.
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        match self.mode {
            EasingInterpolationMode::EaseIn => self.function.ease_in(t),
            EasingInterpolationMode::EaseOut => self.function.ease_out(t),
            EasingInterpolationMode::EaseInOut => {
                if t <= 0.5 {
                    0.5 * self.function.ease_in(2.0 * t)
                } else {
                    0.5 + 0.5 * self.function.ease_out(2.0 * t - 1.0)
                }
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::quadratic(EasingInterpolationMode::EaseOut)
    }
}
