//! The seam between the animation engine and the embedding UI toolkit.
//!
//! The engine never touches a scene graph directly. It reads and writes
//! named property values through a [`PropertySink`] and identifies elements
//! by an opaque [`ElementId`] usable as a cache key.

use rustc_hash::FxHashMap;

use crate::value::{AnimationValue, PropertyKey};

/// Identity of a scene-graph element, as assigned by the embedder.
///
/// Used as the key for the lazily created per-element animation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a raw element identity.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identity value.
    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Property storage owned by the embedder.
///
/// `get` is used once per tween, at construction, to capture the base
/// value; `set` is called once per animated property per tick. Errors in
/// the embedder's storage are its own to raise; the engine neither catches
/// nor retries them.
pub trait PropertySink {
    /// Read the current value of a property, or `None` if the element has
    /// no such property.
    fn get(
        &self,
        element: ElementId,
        property: PropertyKey,
    ) -> Option<AnimationValue>;

    /// Write an interpolated value to a property.
    fn set(
        &mut self,
        element: ElementId,
        property: PropertyKey,
        value: AnimationValue,
    );
}

/// In-memory [`PropertySink`] backed by a hash map.
///
/// Suitable for embedders without retained property storage, and used
/// throughout this crate's tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    values: FxHashMap<(ElementId, PropertyKey), AnimationValue>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a property with an initial value.
    pub fn insert(
        &mut self,
        element: ElementId,
        property: PropertyKey,
        value: AnimationValue,
    ) {
        let _ = self.values.insert((element, property), value);
    }
}

impl PropertySink for MemorySink {
    fn get(
        &self,
        element: ElementId,
        property: PropertyKey,
    ) -> Option<AnimationValue> {
        self.values.get(&(element, property)).copied()
    }

    fn set(
        &mut self,
        element: ElementId,
        property: PropertyKey,
        value: AnimationValue,
    ) {
        let _ = self.values.insert((element, property), value);
    }
}
