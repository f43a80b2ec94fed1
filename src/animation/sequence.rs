//! Sequence: child animations played strictly one at a time.

use std::time::{Duration, Instant};

use crate::sink::PropertySink;

use super::{ProceduralAnimation, StopState};

/// Plays a fixed, ordered set of child animations one after another.
///
/// Forward playback walks the children in array order; reverse playback
/// walks them back-to-front and begins each child reversed. An optional
/// succession delay is honored between one child's completion and the
/// next child's start, in both directions.
pub struct SequenceAnimation {
    children: Vec<ProceduralAnimation>,
    succession_delay: Duration,
    current: usize,
    next_start: Option<Instant>,
}

impl SequenceAnimation {
    /// Create a sequence over the given children.
    ///
    /// # Panics
    ///
    /// An empty child list is caller misuse and fails fast here.
    #[must_use]
    pub fn new(children: Vec<ProceduralAnimation>) -> Self {
        assert!(
            !children.is_empty(),
            "a sequence animation requires at least one child"
        );
        Self {
            children,
            succession_delay: Duration::ZERO,
            current: 0,
            next_start: None,
        }
    }

    /// Delay between one child's completion and the next child's start.
    #[must_use]
    pub fn with_succession_delay(mut self, delay: Duration) -> Self {
        self.succession_delay = delay;
        self
    }

    /// Number of children in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the sequence has no children. Always false: construction
    /// rejects empty sequences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn begin(
        &mut self,
        now: Instant,
        reversed: bool,
        sink: &mut dyn PropertySink,
    ) {
        self.next_start = None;
        self.current = if reversed { self.children.len() - 1 } else { 0 };
        self.children[self.current].begin(now, reversed, sink);
    }

    pub(crate) fn progress(
        &mut self,
        now: Instant,
        reversed: bool,
        sink: &mut dyn PropertySink,
    ) -> bool {
        if let Some(at) = self.next_start {
            if now < at {
                return false;
            }
            self.next_start = None;
            self.children[self.current].begin(now, reversed, sink);
        }

        if !self.children[self.current].progress(now, sink) {
            return false;
        }
        self.children[self.current].finalize(true, StopState::Complete, sink);

        let at_end = if reversed {
            self.current == 0
        } else {
            self.current == self.children.len() - 1
        };
        if at_end {
            return true;
        }

        self.current = if reversed {
            self.current - 1
        } else {
            self.current + 1
        };
        if self.succession_delay.is_zero() {
            self.children[self.current].begin(now, reversed, sink);
        } else {
            self.next_start = Some(now + self.succession_delay);
        }
        false
    }

    /// Unnatural stop: only the currently active child is told to stop.
    /// Already-finished children reached their own terminal state and are
    /// left alone; not-yet-started children never wrote a frame.
    pub(crate) fn finalize(
        &mut self,
        completed: bool,
        stop_state: StopState,
        sink: &mut dyn PropertySink,
    ) {
        self.next_start = None;
        if completed {
            return;
        }
        let child = &mut self.children[self.current];
        if child.is_playing() {
            child.finalize(false, stop_state, sink);
        }
    }

    pub(crate) fn repeat(
        &mut self,
        now: Instant,
        reversed: bool,
        sink: &mut dyn PropertySink,
    ) {
        self.begin(now, reversed, sink);
    }
}

impl std::fmt::Debug for SequenceAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceAnimation")
            .field("children", &self.children.len())
            .field("succession_delay", &self.succession_delay)
            .field("current", &self.current)
            .finish()
    }
}
