//! Animated property values and interpolation between them.
//!
//! A tween interpolates one [`AnimationValue`] toward another of the same
//! kind. Scalars and vectors lerp per component; colors lerp each ARGB
//! channel independently and truncate back to the integer channel range.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Name of an animated property on an element.
///
/// Keys are cheap to copy and compare; the animation engine treats them as
/// opaque identifiers resolved by the embedder's [`PropertySink`].
///
/// [`PropertySink`]: crate::sink::PropertySink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyKey(&'static str);

impl PropertyKey {
    /// Create a key from a static property name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The property name this key was created with.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// An ARGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Alpha channel.
    pub a: u8,
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from ARGB channels.
    #[must_use]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Create an opaque color from RGB channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Interpolate each channel independently and truncate to channel range.
    #[must_use]
    pub fn lerp(self, target: Self, frame: f32) -> Self {
        Self {
            a: lerp_channel(self.a, target.a, frame),
            r: lerp_channel(self.r, target.r, frame),
            g: lerp_channel(self.g, target.g, frame),
            b: lerp_channel(self.b, target.b, frame),
        }
    }
}

fn lerp_channel(base: u8, target: u8, frame: f32) -> u8 {
    let base = f32::from(base);
    let target = f32::from(target);
    (base + (target - base) * frame).clamp(0.0, 255.0) as u8
}

/// The kind of an [`AnimationValue`], used for misuse checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Scalar f32 value.
    Scalar,
    /// 2-D vector value.
    Point,
    /// 3-D vector value.
    Vector,
    /// ARGB color value.
    Color,
}

/// A value an animation can read from and write to a property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationValue {
    /// Scalar property (opacity, rotation angle, font size).
    Scalar(f32),
    /// 2-D property (position, scale).
    Point(Vec2),
    /// 3-D property (translation in a 3-D scene).
    Vector(Vec3),
    /// Color property, interpolated per ARGB channel.
    Color(Color),
}

impl AnimationValue {
    /// The kind tag for this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Point(_) => ValueKind::Point,
            Self::Vector(_) => ValueKind::Vector,
            Self::Color(_) => ValueKind::Color,
        }
    }

    /// Interpolate toward `target` at the given frame.
    ///
    /// Both values must be the same kind; tweens enforce this at
    /// construction, so a mismatch here is a contract violation.
    #[must_use]
    pub fn lerp(&self, target: &Self, frame: f32) -> Self {
        match (self, target) {
            (Self::Scalar(base), Self::Scalar(to)) => {
                Self::Scalar(base + (to - base) * frame)
            }
            (Self::Point(base), Self::Point(to)) => {
                Self::Point(*base + (*to - *base) * frame)
            }
            (Self::Vector(base), Self::Vector(to)) => {
                Self::Vector(*base + (*to - *base) * frame)
            }
            (Self::Color(base), Self::Color(to)) => {
                Self::Color(base.lerp(*to, frame))
            }
            _ => unreachable!(
                "cannot interpolate {:?} toward {:?}",
                self.kind(),
                target.kind()
            ),
        }
    }

    /// The scalar payload, if this is a scalar value.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<f32> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// The 2-D payload, if this is a point value.
    #[must_use]
    pub const fn as_point(&self) -> Option<Vec2> {
        match self {
            Self::Point(v) => Some(*v),
            _ => None,
        }
    }

    /// The color payload, if this is a color value.
    #[must_use]
    pub const fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f32> for AnimationValue {
    fn from(v: f32) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec2> for AnimationValue {
    fn from(v: Vec2) -> Self {
        Self::Point(v)
    }
}

impl From<Vec3> for AnimationValue {
    fn from(v: Vec3) -> Self {
        Self::Vector(v)
    }
}

impl From<Color> for AnimationValue {
    fn from(v: Color) -> Self {
        Self::Color(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_lerp_endpoints() {
        let base = AnimationValue::Scalar(0.0);
        let target = AnimationValue::Scalar(100.0);
        assert_eq!(base.lerp(&target, 0.0), AnimationValue::Scalar(0.0));
        assert_eq!(base.lerp(&target, 1.0), AnimationValue::Scalar(100.0));
        assert_eq!(base.lerp(&target, 0.5), AnimationValue::Scalar(50.0));
    }

    #[test]
    fn test_point_lerp() {
        let base = AnimationValue::Point(Vec2::ZERO);
        let target = AnimationValue::Point(Vec2::new(10.0, 20.0));
        let mid = base.lerp(&target, 0.5);
        assert_eq!(mid.as_point(), Some(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn test_color_lerp_per_channel() {
        let base = Color::argb(0, 0, 100, 200);
        let target = Color::argb(255, 255, 200, 100);
        let mid = base.lerp(target, 0.5);
        assert_eq!(mid.a, 127); // truncated from 127.5
        assert_eq!(mid.r, 127);
        assert_eq!(mid.g, 150);
        assert_eq!(mid.b, 150);
    }

    #[test]
    fn test_color_lerp_endpoints_exact() {
        let base = Color::rgb(10, 20, 30);
        let target = Color::rgb(200, 100, 50);
        assert_eq!(base.lerp(target, 0.0), base);
        assert_eq!(base.lerp(target, 1.0), target);
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(AnimationValue::Scalar(1.0).kind(), ValueKind::Scalar);
        assert_eq!(
            AnimationValue::Color(Color::rgb(0, 0, 0)).kind(),
            ValueKind::Color
        );
        assert_ne!(
            AnimationValue::Point(Vec2::ZERO).kind(),
            AnimationValue::Vector(Vec3::ZERO).kind()
        );
    }

    #[test]
    fn test_property_key_display() {
        let key = PropertyKey::new("opacity");
        assert_eq!(key.name(), "opacity");
        assert_eq!(key.to_string(), "opacity");
    }
}
