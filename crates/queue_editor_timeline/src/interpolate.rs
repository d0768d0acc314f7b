// SPDX-License-Identifier: MIT OR Apache-2.0
//! Blending a from/to pair by playback progress.

use crate::property::{Color, Fill, Opacity, Rect, Rotation, Scale, Stroke, Text};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// How a property blends between two values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationRule {
    /// Single scalar, linear blend
    Linear,
    /// Each channel blended independently
    Channel,
    /// No blending: source until progress reaches 1
    Discrete,
}

/// A property value that can be blended
pub trait Animatable: Clone + PartialEq + Debug {
    /// Blend rule for this value
    const RULE: InterpolationRule;

    /// Blend towards `target` by `t`
    ///
    /// Only consulted for continuous rules. The default snaps like a discrete value.
    fn lerp(&self, target: &Self, t: f32) -> Self {
        if t < 1.0 {
            self.clone()
        } else {
            target.clone()
        }
    }
}

/// Interpolate from `from` towards `target` by `progress`
///
/// Snaps to `target` when there is no source value or progress is negative.
/// Progress above 1 is not clamped: continuous values extrapolate.
pub fn interpolate<V: Animatable>(progress: f32, target: &V, from: Option<&V>) -> V {
    let Some(from) = from else {
        return target.clone();
    };
    if progress < 0.0 {
        return target.clone();
    }

    match V::RULE {
        InterpolationRule::Linear | InterpolationRule::Channel => from.lerp(target, progress),
        InterpolationRule::Discrete => {
            if progress < 1.0 {
                from.clone()
            } else {
                target.clone()
            }
        }
    }
}

/// Linear interpolation between two floats
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl Animatable for Scale {
    const RULE: InterpolationRule = InterpolationRule::Linear;

    fn lerp(&self, target: &Self, t: f32) -> Self {
        Scale::new(lerp(self.scale, target.scale, t))
    }
}

impl Animatable for Opacity {
    const RULE: InterpolationRule = InterpolationRule::Linear;

    fn lerp(&self, target: &Self, t: f32) -> Self {
        Opacity::new(lerp(self.opacity, target.opacity, t))
    }
}

impl Animatable for Rotation {
    const RULE: InterpolationRule = InterpolationRule::Linear;

    // Plain linear blend, no shortest-arc wrap.
    fn lerp(&self, target: &Self, t: f32) -> Self {
        Rotation::new(lerp(self.degree, target.degree, t))
    }
}

impl Animatable for Rect {
    const RULE: InterpolationRule = InterpolationRule::Channel;

    fn lerp(&self, target: &Self, t: f32) -> Self {
        Rect::new(
            lerp(self.x, target.x, t),
            lerp(self.y, target.y, t),
            lerp(self.width, target.width, t),
            lerp(self.height, target.height, t),
        )
    }
}

impl Animatable for Color {
    const RULE: InterpolationRule = InterpolationRule::Channel;

    fn lerp(&self, target: &Self, t: f32) -> Self {
        Color::rgba(
            lerp(self.r, target.r, t),
            lerp(self.g, target.g, t),
            lerp(self.b, target.b, t),
            lerp(self.a, target.a, t),
        )
    }
}

impl Animatable for Fill {
    const RULE: InterpolationRule = InterpolationRule::Channel;

    fn lerp(&self, target: &Self, t: f32) -> Self {
        Fill::new(self.color.lerp(&target.color, t))
    }
}

impl Animatable for Stroke {
    const RULE: InterpolationRule = InterpolationRule::Channel;

    fn lerp(&self, target: &Self, t: f32) -> Self {
        Stroke::new(
            self.color.lerp(&target.color, t),
            lerp(self.width, target.width, t),
        )
    }
}

impl Animatable for Text {
    const RULE: InterpolationRule = InterpolationRule::Discrete;
}

impl Animatable for bool {
    const RULE: InterpolationRule = InterpolationRule::Discrete;
}
