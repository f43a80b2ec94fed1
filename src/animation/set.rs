//! Set: child animations played concurrently.

use std::time::Instant;

use crate::sink::PropertySink;

use super::{ProceduralAnimation, StopState};

/// Plays a fixed set of child animations together, completing once every
/// child has completed.
///
/// Children are fixed at construction; there is no API for adding a child
/// to a set that has already started.
pub struct SetAnimation {
    children: Vec<ProceduralAnimation>,
}

impl SetAnimation {
    /// Create a set over the given children.
    ///
    /// # Panics
    ///
    /// An empty child list is caller misuse and fails fast here.
    #[must_use]
    pub fn new(children: Vec<ProceduralAnimation>) -> Self {
        assert!(
            !children.is_empty(),
            "a set animation requires at least one child"
        );
        Self { children }
    }

    /// Number of children in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the set has no children. Always false: construction rejects
    /// empty sets.
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
        for child in &mut self.children {
            child.begin(now, reversed, sink);
        }
    }

    /// Advance every child still playing at the start of this tick.
    ///
    /// A child that completes during the tick is finalized immediately and
    /// excluded from future ticks. The set completes exactly when every
    /// child that was active at tick start finished on this same tick.
    pub(crate) fn progress(
        &mut self,
        now: Instant,
        _reversed: bool,
        sink: &mut dyn PropertySink,
    ) -> bool {
        let mut active = 0_usize;
        let mut completed = 0_usize;
        for child in &mut self.children {
            if !child.is_playing() {
                continue;
            }
            active += 1;
            if child.progress(now, sink) {
                child.finalize(true, StopState::Complete, sink);
                completed += 1;
            }
        }
        completed == active
    }

    /// Unnatural stop: every still-playing child is stopped with the same
    /// stop state; already-completed children are untouched.
    pub(crate) fn finalize(
        &mut self,
        completed: bool,
        stop_state: StopState,
        sink: &mut dyn PropertySink,
    ) {
        if completed {
            return;
        }
        for child in &mut self.children {
            if child.is_playing() {
                child.finalize(false, stop_state, sink);
            }
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

impl std::fmt::Debug for SetAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetAnimation")
            .field("children", &self.children.len())
            .finish()
    }
}
