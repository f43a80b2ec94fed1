//! Reusable visual effects over the animation engine.
//!
//! An [`Effect`] composes a [`ProceduralAnimation`] for one of two
//! directions: Forward applies the effect to an element, Reverse restores
//! what the forward pass changed. Effects read current property values
//! through the sink at compose time, so a transition interrupted mid-flight
//! resumes from wherever the property actually is.
//!
//! [`TransitionHost`] pairs effects with the scheduler for the common
//! enter/leave pattern: playing a direction first aborts whatever the
//! previous transition on that element was still doing.

use std::time::{Duration, Instant};

use glam::Vec2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::animation::{ProceduralAnimation, StopState, TweenAnimation};
use crate::easing::Easing;
use crate::scheduler::{AnimationHandle, AnimationScheduler};
use crate::sink::{ElementId, PropertySink};
use crate::value::{AnimationValue, Color, PropertyKey};

/// Property animated by [`FadeEffect`].
pub const OPACITY: PropertyKey = PropertyKey::new("opacity");
/// Property animated by [`MoveEffect`].
pub const POSITION: PropertyKey = PropertyKey::new("position");
/// Property animated by [`ColorFillEffect`].
pub const FILL_COLOR: PropertyKey = PropertyKey::new("fill-color");

/// Which way an effect plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectDirection {
    /// Apply the effect.
    Forward,
    /// Undo the forward pass.
    Reverse,
}

impl EffectDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// Shared timing knobs for effects, loadable from presets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectTiming {
    /// How long each composed tween runs.
    pub duration: Duration,
    /// Delay before the first frame is written.
    pub delay: Duration,
    /// Interpolation curve; `None` plays linearly.
    pub easing: Option<Easing>,
}

impl EffectTiming {
    /// Timing with the given duration and no delay or easing.
    #[must_use]
    pub const fn with_duration(duration: Duration) -> Self {
        Self {
            duration,
            delay: Duration::ZERO,
            easing: None,
        }
    }

    fn shape(self, tween: TweenAnimation) -> TweenAnimation {
        let tween = tween.with_start_delay(self.delay);
        match self.easing {
            Some(easing) => tween.with_easing(easing),
            None => tween,
        }
    }
}

impl Default for EffectTiming {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            delay: Duration::ZERO,
            easing: Some(Easing::default()),
        }
    }
}

/// A directional, replayable visual effect.
///
/// `compose` builds a fresh animation each time it is called; effects may
/// keep state across calls (typically the original value captured on the
/// first forward pass, so Reverse knows what to restore).
pub trait Effect {
    /// Build the animation for one direction against one element.
    fn compose(
        &mut self,
        direction: EffectDirection,
        sink: &dyn PropertySink,
        element: ElementId,
    ) -> ProceduralAnimation;
}

/// Fades an element's opacity toward a target, and back.
///
/// Forward captures the element's current opacity and fades to
/// `faded_opacity`; Reverse fades back to the captured value. Reverse
/// before any forward pass restores full opacity.
#[derive(Debug)]
pub struct FadeEffect {
    timing: EffectTiming,
    faded_opacity: f32,
    original: Option<f32>,
}

impl FadeEffect {
    /// A fade toward the given opacity.
    #[must_use]
    pub const fn new(timing: EffectTiming, faded_opacity: f32) -> Self {
        Self {
            timing,
            faded_opacity,
            original: None,
        }
    }

    /// A fade to fully transparent.
    #[must_use]
    pub const fn fade_out(timing: EffectTiming) -> Self {
        Self::new(timing, 0.0)
    }
}

impl Effect for FadeEffect {
    fn compose(
        &mut self,
        direction: EffectDirection,
        sink: &dyn PropertySink,
        element: ElementId,
    ) -> ProceduralAnimation {
        let target = match direction {
            EffectDirection::Forward => {
                if self.original.is_none() {
                    self.original = sink
                        .get(element, OPACITY)
                        .and_then(|value| value.as_scalar());
                }
                self.faded_opacity
            }
            EffectDirection::Reverse => self.original.unwrap_or(1.0),
        };
        let tween = TweenAnimation::new(
            sink,
            element,
            OPACITY,
            self.timing.duration,
            target,
        );
        ProceduralAnimation::tween(self.timing.shape(tween))
    }
}

/// Translates an element's position by a fixed offset, and back.
#[derive(Debug)]
pub struct MoveEffect {
    timing: EffectTiming,
    offset: Vec2,
    origin: Option<Vec2>,
}

impl MoveEffect {
    /// A move by the given offset.
    #[must_use]
    pub const fn new(timing: EffectTiming, offset: Vec2) -> Self {
        Self {
            timing,
            offset,
            origin: None,
        }
    }
}

impl Effect for MoveEffect {
    fn compose(
        &mut self,
        direction: EffectDirection,
        sink: &dyn PropertySink,
        element: ElementId,
    ) -> ProceduralAnimation {
        let current = sink
            .get(element, POSITION)
            .and_then(|value| value.as_point())
            .unwrap_or(Vec2::ZERO);
        let target = match direction {
            EffectDirection::Forward => {
                let origin = *self.origin.get_or_insert(current);
                origin + self.offset
            }
            EffectDirection::Reverse => self.origin.unwrap_or(current),
        };
        let tween = TweenAnimation::new(
            sink,
            element,
            POSITION,
            self.timing.duration,
            target,
        );
        ProceduralAnimation::tween(self.timing.shape(tween))
    }
}

/// Blends an element's fill color toward a highlight color, and back.
#[derive(Debug)]
pub struct ColorFillEffect {
    timing: EffectTiming,
    fill: Color,
    original: Option<Color>,
}

impl ColorFillEffect {
    /// A blend toward the given fill color.
    #[must_use]
    pub const fn new(timing: EffectTiming, fill: Color) -> Self {
        Self {
            timing,
            fill,
            original: None,
        }
    }
}

impl Effect for ColorFillEffect {
    fn compose(
        &mut self,
        direction: EffectDirection,
        sink: &dyn PropertySink,
        element: ElementId,
    ) -> ProceduralAnimation {
        let current = sink
            .get(element, FILL_COLOR)
            .and_then(|value| value.as_color());
        let target = match direction {
            EffectDirection::Forward => {
                if self.original.is_none() {
                    self.original = current;
                }
                self.fill
            }
            EffectDirection::Reverse => {
                self.original.or(current).unwrap_or(self.fill)
            }
        };
        let tween = TweenAnimation::new(
            sink,
            element,
            FILL_COLOR,
            self.timing.duration,
            target,
        );
        ProceduralAnimation::tween(self.timing.shape(tween))
    }
}

/// Runs effects as interruptible transitions.
///
/// At most one transition plays per element: starting a new direction
/// aborts the previous one in place, so the fresh animation picks up from
/// the property's current value without any visual snap.
#[derive(Debug, Default)]
pub struct TransitionHost {
    last: FxHashMap<ElementId, AnimationHandle>,
}

impl TransitionHost {
    /// Create a host with no transitions in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Play an effect in the given direction against an element.
    pub fn transition(
        &mut self,
        effect: &mut dyn Effect,
        direction: EffectDirection,
        element: ElementId,
        scheduler: &mut AnimationScheduler,
        now: Instant,
        sink: &mut dyn PropertySink,
    ) -> AnimationHandle {
        if let Some(previous) = self.last.remove(&element) {
            if scheduler.stop(previous, StopState::Abort, sink) {
                log::debug!("interrupted transition on {element:?}");
            }
        }
        let animation = effect.compose(direction, sink, element);
        let handle = scheduler.play(animation, element, now, sink);
        let _ = self.last.insert(element, handle);
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use std::cell::Cell;
    use std::rc::Rc;

    const ELEMENT: ElementId = ElementId::new(7);

    fn timing(millis: u64) -> EffectTiming {
        EffectTiming::with_duration(Duration::from_millis(millis))
    }

    fn opacity_of(sink: &MemorySink) -> f32 {
        sink.get(ELEMENT, OPACITY).and_then(|v| v.as_scalar()).unwrap()
    }

    #[test]
    fn test_fade_forward_then_reverse_restores_original() {
        let mut sink = MemorySink::new();
        sink.insert(ELEMENT, OPACITY, AnimationValue::Scalar(0.8));
        let mut scheduler = AnimationScheduler::new();
        let mut effect = FadeEffect::fade_out(timing(100));
        let start = Instant::now();

        let out = effect.compose(EffectDirection::Forward, &sink, ELEMENT);
        let _ = scheduler.play(out, ELEMENT, start, &mut sink);
        let _ = scheduler.tick(start + Duration::from_millis(100), &mut sink);
        assert_eq!(opacity_of(&sink), 0.0);

        let back = effect.compose(EffectDirection::Reverse, &sink, ELEMENT);
        let resume = start + Duration::from_millis(200);
        let _ = scheduler.play(back, ELEMENT, resume, &mut sink);
        let _ = scheduler.tick(resume + Duration::from_millis(100), &mut sink);
        assert_eq!(opacity_of(&sink), 0.8);
    }

    #[test]
    fn test_reverse_without_forward_restores_full_opacity() {
        let mut sink = MemorySink::new();
        sink.insert(ELEMENT, OPACITY, AnimationValue::Scalar(0.3));
        let mut scheduler = AnimationScheduler::new();
        let mut effect = FadeEffect::fade_out(timing(100));
        let start = Instant::now();

        let back = effect.compose(EffectDirection::Reverse, &sink, ELEMENT);
        let _ = scheduler.play(back, ELEMENT, start, &mut sink);
        let _ = scheduler.tick(start + Duration::from_millis(100), &mut sink);
        assert_eq!(opacity_of(&sink), 1.0);
    }

    #[test]
    fn test_transition_host_interrupts_without_snapping() {
        let mut sink = MemorySink::new();
        sink.insert(ELEMENT, OPACITY, AnimationValue::Scalar(1.0));
        let mut scheduler = AnimationScheduler::new();
        let mut host = TransitionHost::new();
        let mut effect = FadeEffect::fade_out(timing(100));
        let start = Instant::now();

        let _ = host.transition(
            &mut effect,
            EffectDirection::Forward,
            ELEMENT,
            &mut scheduler,
            start,
            &mut sink,
        );
        let mid = start + Duration::from_millis(50);
        let _ = scheduler.tick(mid, &mut sink);
        assert_eq!(opacity_of(&sink), 0.5);

        // Reversing mid-flight aborts the fade-out where it is and tweens
        // from 0.5 back up, landing on the remembered original.
        let _ = host.transition(
            &mut effect,
            EffectDirection::Reverse,
            ELEMENT,
            &mut scheduler,
            mid,
            &mut sink,
        );
        assert_eq!(scheduler.active_count(ELEMENT), 1);
        assert_eq!(opacity_of(&sink), 0.5);
        let _ = scheduler.tick(mid + Duration::from_millis(50), &mut sink);
        assert_eq!(opacity_of(&sink), 0.75);
        let _ = scheduler.tick(mid + Duration::from_millis(100), &mut sink);
        assert_eq!(opacity_of(&sink), 1.0);
    }

    #[test]
    fn test_move_effect_round_trip() {
        let mut sink = MemorySink::new();
        sink.insert(
            ELEMENT,
            POSITION,
            AnimationValue::Point(Vec2::new(10.0, 20.0)),
        );
        let mut scheduler = AnimationScheduler::new();
        let mut effect =
            MoveEffect::new(timing(100), Vec2::new(5.0, -5.0));
        let start = Instant::now();

        let out = effect.compose(EffectDirection::Forward, &sink, ELEMENT);
        let _ = scheduler.play(out, ELEMENT, start, &mut sink);
        let _ = scheduler.tick(start + Duration::from_millis(100), &mut sink);
        let moved =
            sink.get(ELEMENT, POSITION).and_then(|v| v.as_point()).unwrap();
        assert_eq!(moved, Vec2::new(15.0, 15.0));

        let back = effect.compose(EffectDirection::Reverse, &sink, ELEMENT);
        let resume = start + Duration::from_millis(200);
        let _ = scheduler.play(back, ELEMENT, resume, &mut sink);
        let _ = scheduler.tick(resume + Duration::from_millis(100), &mut sink);
        let restored =
            sink.get(ELEMENT, POSITION).and_then(|v| v.as_point()).unwrap();
        assert_eq!(restored, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_color_fill_remembers_original() {
        let mut sink = MemorySink::new();
        let original = Color::rgb(10, 20, 30);
        sink.insert(ELEMENT, FILL_COLOR, AnimationValue::Color(original));
        let mut scheduler = AnimationScheduler::new();
        let mut effect =
            ColorFillEffect::new(timing(100), Color::rgb(200, 100, 0));
        let start = Instant::now();

        let out = effect.compose(EffectDirection::Forward, &sink, ELEMENT);
        let _ = scheduler.play(out, ELEMENT, start, &mut sink);
        let _ = scheduler.tick(start + Duration::from_millis(100), &mut sink);
        assert_eq!(
            sink.get(ELEMENT, FILL_COLOR).and_then(|v| v.as_color()),
            Some(Color::rgb(200, 100, 0))
        );

        let back = effect.compose(EffectDirection::Reverse, &sink, ELEMENT);
        let resume = start + Duration::from_millis(200);
        let _ = scheduler.play(back, ELEMENT, resume, &mut sink);
        let _ = scheduler.tick(resume + Duration::from_millis(100), &mut sink);
        assert_eq!(
            sink.get(ELEMENT, FILL_COLOR).and_then(|v| v.as_color()),
            Some(original)
        );
    }

    #[test]
    fn test_stopped_notification_drives_post_effect_state() {
        // The embedder pattern: hide the element only once its fade-out
        // actually finished, not if the fade was interrupted.
        let mut sink = MemorySink::new();
        sink.insert(ELEMENT, OPACITY, AnimationValue::Scalar(1.0));
        let mut scheduler = AnimationScheduler::new();
        let mut effect = FadeEffect::fade_out(timing(100));
        let start = Instant::now();

        let hidden = Rc::new(Cell::new(false));
        let hidden_in = Rc::clone(&hidden);
        let out = effect
            .compose(EffectDirection::Forward, &sink, ELEMENT)
            .on_stopped(move |event| {
                if event.completed {
                    hidden_in.set(true);
                }
            });
        let _ = scheduler.play(out, ELEMENT, start, &mut sink);

        let _ = scheduler.tick(start + Duration::from_millis(50), &mut sink);
        assert!(!hidden.get());
        let _ = scheduler.tick(start + Duration::from_millis(100), &mut sink);
        assert!(hidden.get());
    }

    #[test]
    fn test_timing_preset_round_trip() {
        let timing = EffectTiming {
            duration: Duration::from_millis(450),
            delay: Duration::from_millis(50),
            easing: Some(Easing::default()),
        };
        let json = serde_json::to_string(&timing).unwrap();
        let parsed: EffectTiming = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, timing);
    }
}
