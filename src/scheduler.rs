//! Per-element animation scheduling.
//!
//! The scheduler keeps one lazily created controller per element. A
//! controller holds that element's active animations in registration order
//! and is Active while the list is non-empty, Idle otherwise. The embedder
//! drives [`AnimationScheduler::tick`] from its per-frame rendering
//! callback and may stop calling it whenever `tick` reports that every
//! controller has gone Idle.

use std::time::Instant;

use rustc_hash::FxHashMap;

use crate::animation::{ProceduralAnimation, StopState};
use crate::sink::{ElementId, PropertySink};

/// Identifies a playing animation so it can be stopped later.
///
/// Handles are scheduler-scoped and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle {
    element: ElementId,
    serial: u64,
}

impl AnimationHandle {
    /// The element the animation targets.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        self.element
    }
}

struct ActiveEntry {
    serial: u64,
    animation: ProceduralAnimation,
}

/// Active animations for one element, in registration order.
#[derive(Default)]
struct ElementController {
    active: Vec<ActiveEntry>,
}

/// Registry of per-element controllers, advanced once per rendering tick.
///
/// Not a global: embedders construct one scheduler and pass it to whatever
/// plays animations. Controllers are created on first play against an
/// element and go dormant (rather than being evicted) when their active
/// list empties.
#[derive(Default)]
pub struct AnimationScheduler {
    controllers: FxHashMap<ElementId, ElementController>,
    /// Controller creation order; ticks walk elements in this order so a
    /// tick's write sequence is deterministic.
    order: Vec<ElementId>,
    next_serial: u64,
}

impl AnimationScheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin playing an animation against an element, forward.
    ///
    /// The scheduler takes ownership of the animation for its lifetime;
    /// the returned handle is the way to interrupt it.
    pub fn play(
        &mut self,
        animation: ProceduralAnimation,
        element: ElementId,
        now: Instant,
        sink: &mut dyn PropertySink,
    ) -> AnimationHandle {
        self.play_directed(animation, element, false, now, sink)
    }

    /// Begin playing an animation against an element, reversed.
    ///
    /// Reverse playback runs every frame from the target value back toward
    /// the base value; composites also walk their children back-to-front.
    pub fn play_reversed(
        &mut self,
        animation: ProceduralAnimation,
        element: ElementId,
        now: Instant,
        sink: &mut dyn PropertySink,
    ) -> AnimationHandle {
        self.play_directed(animation, element, true, now, sink)
    }

    fn play_directed(
        &mut self,
        mut animation: ProceduralAnimation,
        element: ElementId,
        reversed: bool,
        now: Instant,
        sink: &mut dyn PropertySink,
    ) -> AnimationHandle {
        let controller = match self.controllers.entry(element) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                entry.into_mut()
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                log::debug!("creating animation controller for {element:?}");
                self.order.push(element);
                entry.insert(ElementController::default())
            }
        };
        if controller.active.is_empty() {
            log::debug!("controller for {element:?} active");
        }

        animation.begin(now, reversed, sink);
        let serial = self.next_serial;
        self.next_serial += 1;
        controller.active.push(ActiveEntry { serial, animation });
        AnimationHandle { element, serial }
    }

    /// Advance every active animation to `now`.
    ///
    /// Animations are progressed in registration order; those reporting
    /// completion are finalized naturally and removed. Returns true while
    /// any controller remains Active, so the embedder knows to keep its
    /// frame callback scheduled. Idempotent with zero active animations.
    pub fn tick(&mut self, now: Instant, sink: &mut dyn PropertySink) -> bool {
        let mut any_active = false;
        for index in 0..self.order.len() {
            let element = self.order[index];
            let Some(controller) = self.controllers.get_mut(&element) else {
                continue;
            };
            if controller.active.is_empty() {
                continue;
            }

            // Snapshot the active list: completion handlers may queue new
            // plays against this element, and those must not be advanced
            // (or lost) mid-iteration.
            let snapshot = std::mem::take(&mut controller.active);
            let mut survivors = Vec::with_capacity(snapshot.len());
            for mut entry in snapshot {
                if entry.animation.progress(now, sink) {
                    entry.animation.finalize(true, StopState::Complete, sink);
                } else {
                    survivors.push(entry);
                }
            }

            // Re-borrow: anything registered during the iteration lands
            // after the survivors, preserving registration order.
            let Some(controller) = self.controllers.get_mut(&element) else {
                continue;
            };
            let appended = std::mem::replace(&mut controller.active, survivors);
            controller.active.extend(appended);

            if controller.active.is_empty() {
                log::debug!("controller for {element:?} idle");
            } else {
                any_active = true;
            }
        }
        any_active
    }

    /// Stop one animation immediately, applying the given stop policy
    /// within this call. Returns false if the handle is no longer active.
    pub fn stop(
        &mut self,
        handle: AnimationHandle,
        stop_state: StopState,
        sink: &mut dyn PropertySink,
    ) -> bool {
        let Some(controller) = self.controllers.get_mut(&handle.element)
        else {
            return false;
        };
        let Some(index) = controller
            .active
            .iter()
            .position(|entry| entry.serial == handle.serial)
        else {
            return false;
        };
        let mut entry = controller.active.remove(index);
        entry.animation.finalize(false, stop_state, sink);
        if controller.active.is_empty() {
            log::debug!("controller for {:?} idle", handle.element);
        }
        true
    }

    /// Stop every animation playing against an element. Returns how many
    /// were stopped.
    pub fn stop_all(
        &mut self,
        element: ElementId,
        stop_state: StopState,
        sink: &mut dyn PropertySink,
    ) -> usize {
        let Some(controller) = self.controllers.get_mut(&element) else {
            return 0;
        };
        let entries = std::mem::take(&mut controller.active);
        let count = entries.len();
        for mut entry in entries {
            entry.animation.finalize(false, stop_state, sink);
        }
        if count > 0 {
            log::debug!("controller for {element:?} idle");
        }
        count
    }

    /// Whether an element's controller is Active (has animations playing).
    #[must_use]
    pub fn is_active(&self, element: ElementId) -> bool {
        self.controllers
            .get(&element)
            .is_some_and(|controller| !controller.active.is_empty())
    }

    /// Number of animations playing against an element.
    #[must_use]
    pub fn active_count(&self, element: ElementId) -> usize {
        self.controllers
            .get(&element)
            .map_or(0, |controller| controller.active.len())
    }

    /// Whether every controller is Idle.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.controllers
            .values()
            .all(|controller| controller.active.is_empty())
    }
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("controllers", &self.controllers.len())
            .field(
                "active",
                &self
                    .controllers
                    .values()
                    .map(|controller| controller.active.len())
                    .sum::<usize>(),
            )
            .finish()
    }
}
