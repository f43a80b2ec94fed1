//! Procedural animations: tween leaves and sequence/set composites.
//!
//! Every animation shares one state machine ([`ProceduralAnimation`])
//! holding the repeat/reverse policy and lifecycle events, and dispatches
//! the four-operation contract (begin, progress, finalize, repeat) to its
//! kind: a [`TweenAnimation`] leaf, a [`SequenceAnimation`], or a
//! [`SetAnimation`].

mod sequence;
mod set;
mod tween;

pub use sequence::SequenceAnimation;
pub use set::SetAnimation;
pub use tween::TweenAnimation;

use std::time::{Duration, Instant};

use crate::sink::PropertySink;

/// Policy for the final property value when an animation is interrupted
/// before natural completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopState {
    /// Snap the property to the target value (frame 1).
    Complete,
    /// Leave the property at the last value written.
    Abort,
    /// Snap the property back to the base value (frame 0).
    Revert,
}

/// Payload of the `Stopped` notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoppedEvent {
    /// True only if the animation ran to natural completion.
    pub completed: bool,
    /// The stop policy applied (always `Complete` for natural completion).
    pub stop_state: StopState,
    /// How many repetition cycles the animation performed.
    pub repetitions: u32,
}

type StartingHandler = Box<dyn FnMut()>;
type RepeatingHandler = Box<dyn FnMut(u32) -> bool>;
type StoppedHandler = Box<dyn FnMut(&StoppedEvent)>;

#[derive(Default)]
struct AnimationEvents {
    starting: Option<StartingHandler>,
    repeating: Option<RepeatingHandler>,
    stopped: Option<StoppedHandler>,
}

enum AnimationKind {
    Tween(TweenAnimation),
    Sequence(SequenceAnimation),
    Set(SetAnimation),
}

impl AnimationKind {
    fn begin(
        &mut self,
        now: Instant,
        reversed: bool,
        sink: &mut dyn PropertySink,
    ) {
        match self {
            Self::Tween(tween) => tween.begin(now),
            Self::Sequence(sequence) => sequence.begin(now, reversed, sink),
            Self::Set(set) => set.begin(now, reversed, sink),
        }
    }

    fn progress(
        &mut self,
        now: Instant,
        reversed: bool,
        sink: &mut dyn PropertySink,
    ) -> bool {
        match self {
            Self::Tween(tween) => tween.progress(now, reversed, sink),
            Self::Sequence(sequence) => sequence.progress(now, reversed, sink),
            Self::Set(set) => set.progress(now, reversed, sink),
        }
    }

    fn finalize(
        &mut self,
        completed: bool,
        stop_state: StopState,
        sink: &mut dyn PropertySink,
    ) {
        match self {
            Self::Tween(tween) => tween.finalize(completed, stop_state, sink),
            Self::Sequence(sequence) => {
                sequence.finalize(completed, stop_state, sink);
            }
            Self::Set(set) => set.finalize(completed, stop_state, sink),
        }
    }

    fn repeat(
        &mut self,
        now: Instant,
        reversed: bool,
        sink: &mut dyn PropertySink,
    ) {
        match self {
            Self::Tween(tween) => tween.repeat(now),
            Self::Sequence(sequence) => sequence.repeat(now, reversed, sink),
            Self::Set(set) => set.repeat(now, reversed, sink),
        }
    }
}

/// A playable animation: a tween, or a composition of animations, plus the
/// repeat/reverse policy and lifecycle notifications.
///
/// Animations are played through the
/// [`AnimationScheduler`](crate::scheduler::AnimationScheduler), which owns
/// them while they run. Ownership moves on play, so a playing animation
/// cannot be played a second time.
pub struct ProceduralAnimation {
    kind: AnimationKind,
    repeat_count: u32,
    repeat_delay: Duration,
    auto_reverse: bool,
    reverse_delay: Duration,
    is_playing: bool,
    completed: bool,
    repetitions: u32,
    is_reversed: bool,
    base_reversed: bool,
    resume_at: Option<Instant>,
    events: AnimationEvents,
}

impl ProceduralAnimation {
    /// Wrap a tween leaf.
    #[must_use]
    pub fn tween(tween: TweenAnimation) -> Self {
        Self::from_kind(AnimationKind::Tween(tween))
    }

    /// Wrap a sequence composite.
    #[must_use]
    pub fn sequence(sequence: SequenceAnimation) -> Self {
        Self::from_kind(AnimationKind::Sequence(sequence))
    }

    /// Wrap a set composite.
    #[must_use]
    pub fn set(set: SetAnimation) -> Self {
        Self::from_kind(AnimationKind::Set(set))
    }

    fn from_kind(kind: AnimationKind) -> Self {
        Self {
            kind,
            repeat_count: 1,
            repeat_delay: Duration::ZERO,
            auto_reverse: false,
            reverse_delay: Duration::ZERO,
            is_playing: false,
            completed: false,
            repetitions: 0,
            is_reversed: false,
            base_reversed: false,
            resume_at: None,
            events: AnimationEvents::default(),
        }
    }

    /// Total repetition cycles to run; 0 repeats indefinitely until
    /// explicitly stopped. Default 1.
    #[must_use]
    pub fn with_repeat_count(mut self, count: u32) -> Self {
        self.repeat_count = count;
        self
    }

    /// Delay before each new repetition cycle starts.
    #[must_use]
    pub fn with_repeat_delay(mut self, delay: Duration) -> Self {
        self.repeat_delay = delay;
        self
    }

    /// Play each cycle forward then reversed. The paired reverse pass does
    /// not count as its own repetition.
    #[must_use]
    pub fn with_auto_reverse(mut self) -> Self {
        self.auto_reverse = true;
        self
    }

    /// Delay before the auto-reverse pass starts.
    #[must_use]
    pub fn with_reverse_delay(mut self, delay: Duration) -> Self {
        self.reverse_delay = delay;
        self
    }

    /// Notification fired on play, before the first frame is applied.
    #[must_use]
    pub fn on_starting(mut self, handler: impl FnMut() + 'static) -> Self {
        self.events.starting = Some(Box::new(handler));
        self
    }

    /// Cancelable notification fired when a cycle completes with repeat
    /// budget remaining. The handler receives the finished cycle count;
    /// returning false ends the animation instead of repeating.
    #[must_use]
    pub fn on_repeating(
        mut self,
        handler: impl FnMut(u32) -> bool + 'static,
    ) -> Self {
        self.events.repeating = Some(Box::new(handler));
        self
    }

    /// Notification fired after finalize, whether the animation completed
    /// naturally or was stopped.
    #[must_use]
    pub fn on_stopped(
        mut self,
        handler: impl FnMut(&StoppedEvent) + 'static,
    ) -> Self {
        self.events.stopped = Some(Box::new(handler));
        self
    }

    /// Whether the animation is currently playing.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// True only if the animation ran to natural completion; false after
    /// an explicit stop.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Count of repetition cycles so far; 1 from first play onward.
    #[must_use]
    pub const fn repetitions(&self) -> u32 {
        self.repetitions
    }

    /// Whether the current pass runs opposite to the played direction.
    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.is_reversed
    }

    pub(crate) fn begin(
        &mut self,
        now: Instant,
        reversed: bool,
        sink: &mut dyn PropertySink,
    ) {
        assert!(!self.is_playing, "animation is already playing");
        self.is_playing = true;
        self.completed = false;
        self.repetitions = 1;
        self.is_reversed = reversed;
        self.base_reversed = reversed;
        self.resume_at = None;
        if let Some(handler) = &mut self.events.starting {
            handler();
        }
        self.kind.begin(now, reversed, sink);
    }

    /// Advance to `now`. Returns true when the animation is exhausted,
    /// repeat and reverse passes included; the caller then finalizes it.
    pub(crate) fn progress(
        &mut self,
        now: Instant,
        sink: &mut dyn PropertySink,
    ) -> bool {
        if !self.is_playing {
            return true;
        }

        // Waiting out a repeat/reverse delay: no-op until the threshold,
        // then fresh timestamps for the next pass.
        if let Some(at) = self.resume_at {
            if now < at {
                return false;
            }
            self.resume_at = None;
            self.kind.repeat(now, self.is_reversed, sink);
        }

        if !self.kind.progress(now, self.is_reversed, sink) {
            return false;
        }

        // Pass finished. An auto-reverse pair replays in the opposite
        // direction first; only the paired completion ends the cycle.
        if self.auto_reverse && self.is_reversed == self.base_reversed {
            self.is_reversed = !self.base_reversed;
            self.resume_at = Some(now + self.reverse_delay);
            return false;
        }

        // Cycle finished; consult the repeat budget.
        let budget_remaining =
            self.repeat_count == 0 || self.repetitions < self.repeat_count;
        if budget_remaining {
            let keep_going = match &mut self.events.repeating {
                Some(handler) => handler(self.repetitions),
                None => true,
            };
            if keep_going {
                self.repetitions += 1;
                self.is_reversed = self.base_reversed;
                self.resume_at = Some(now + self.repeat_delay);
                return false;
            }
        }
        true
    }

    /// End the animation, apply the stop policy, and fire `Stopped`.
    /// Idempotent: a finished animation is left untouched.
    pub(crate) fn finalize(
        &mut self,
        completed: bool,
        stop_state: StopState,
        sink: &mut dyn PropertySink,
    ) {
        if !self.is_playing {
            return;
        }
        self.is_playing = false;
        self.completed = completed;
        self.resume_at = None;
        self.kind.finalize(completed, stop_state, sink);
        if let Some(handler) = &mut self.events.stopped {
            handler(&StoppedEvent {
                completed,
                stop_state,
                repetitions: self.repetitions,
            });
        }
    }
}

impl std::fmt::Debug for ProceduralAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind: &dyn std::fmt::Debug = match &self.kind {
            AnimationKind::Tween(t) => t,
            AnimationKind::Sequence(s) => s,
            AnimationKind::Set(s) => s,
        };
        f.debug_struct("ProceduralAnimation")
            .field("kind", kind)
            .field("repeat_count", &self.repeat_count)
            .field("auto_reverse", &self.auto_reverse)
            .field("is_playing", &self.is_playing)
            .field("repetitions", &self.repetitions)
            .finish_non_exhaustive()
    }
}
