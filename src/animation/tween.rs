//! Tween: a time-bounded interpolation of one property between two values.

use std::time::{Duration, Instant};

use crate::easing::Easing;
use crate::sink::{ElementId, PropertySink};
use crate::value::{AnimationValue, PropertyKey};

use super::StopState;

/// Interpolates one property from its captured base value to a target
/// value over a fixed duration.
///
/// The base value is captured once, when the tween is constructed, by
/// reading the property's current value. Replaying a constructed tween
/// reuses that original base value.
pub struct TweenAnimation {
    element: ElementId,
    property: PropertyKey,
    duration: Duration,
    start_delay: Duration,
    easing: Option<Easing>,
    base: AnimationValue,
    target: AnimationValue,
    start_time: Option<Instant>,
    delay_until: Option<Instant>,
}

impl TweenAnimation {
    /// Create a tween toward `target`, capturing the property's current
    /// value as the base.
    ///
    /// # Panics
    ///
    /// A missing property, or a target whose kind differs from the
    /// captured base, is caller misuse and fails fast here.
    #[allow(clippy::panic)] // missing property is caller misuse; fail fast
    #[must_use]
    pub fn new(
        sink: &dyn PropertySink,
        element: ElementId,
        property: PropertyKey,
        duration: Duration,
        target: impl Into<AnimationValue>,
    ) -> Self {
        let target = target.into();
        let Some(base) = sink.get(element, property) else {
            panic!("tween property '{property}' has no value on element {element:?}");
        };
        assert!(
            base.kind() == target.kind(),
            "tween property '{property}' is {:?} but target is {:?}",
            base.kind(),
            target.kind()
        );
        Self {
            element,
            property,
            duration,
            start_delay: Duration::ZERO,
            easing: None,
            base,
            target,
            start_time: None,
            delay_until: None,
        }
    }

    /// Delay the first frame; duration is measured from the delay's end.
    ///
    /// Applies once per play, not on repeats.
    #[must_use]
    pub fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    /// Ease non-terminal frames through the given curve.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// The captured base value.
    #[must_use]
    pub const fn base(&self) -> AnimationValue {
        self.base
    }

    /// The target value.
    #[must_use]
    pub const fn target(&self) -> AnimationValue {
        self.target
    }

    /// Total interpolation duration (excluding the start delay).
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// The element this tween writes to.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        self.element
    }

    /// The property this tween writes to.
    #[must_use]
    pub const fn property(&self) -> PropertyKey {
        self.property
    }

    pub(crate) fn begin(&mut self, now: Instant) {
        self.start_time = Some(now);
        self.delay_until = if self.start_delay.is_zero() {
            None
        } else {
            Some(now + self.start_delay)
        };
    }

    /// Advance to `now`. Returns true when the pass in the current
    /// direction has reached its terminal frame.
    pub(crate) fn progress(
        &mut self,
        now: Instant,
        reversed: bool,
        sink: &mut dyn PropertySink,
    ) -> bool {
        if let Some(until) = self.delay_until {
            if now < until {
                return false;
            }
            // Duration is measured from the delay's end.
            self.delay_until = None;
            self.start_time = Some(now);
        }
        let Some(start) = self.start_time else {
            debug_assert!(false, "tween progressed before begin");
            return false;
        };

        let raw = if self.duration.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(start).as_secs_f32()
                / self.duration.as_secs_f32())
            .min(1.0)
        };
        let frame = if reversed { 1.0 - raw } else { raw };
        self.apply_frame(frame, sink);
        raw >= 1.0
    }

    pub(crate) fn finalize(
        &mut self,
        completed: bool,
        stop_state: StopState,
        sink: &mut dyn PropertySink,
    ) {
        if completed {
            // Natural completion already wrote the exact terminal frame.
            return;
        }
        match stop_state {
            StopState::Complete => self.apply_frame(1.0, sink),
            StopState::Revert => self.apply_frame(0.0, sink),
            StopState::Abort => {}
        }
    }

    /// Fresh start timestamp for a repeat or reverse pass. The start delay
    /// is not re-armed.
    pub(crate) fn repeat(&mut self, now: Instant) {
        self.start_time = Some(now);
        self.delay_until = None;
    }

    /// Write the interpolated value for `frame`. Terminal frames bypass
    /// the easing function so endpoint values are exact.
    fn apply_frame(&self, frame: f32, sink: &mut dyn PropertySink) {
        let eased = if frame == 0.0 || frame == 1.0 {
            frame
        } else {
            self.easing.map_or(frame, |e| e.evaluate(frame))
        };
        sink.set(self.element, self.property, self.base.lerp(&self.target, eased));
    }
}

impl std::fmt::Debug for TweenAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenAnimation")
            .field("element", &self.element)
            .field("property", &self.property)
            .field("duration", &self.duration)
            .field("base", &self.base)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
