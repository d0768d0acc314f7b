// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property descriptors.
//!
//! Each descriptor ties one animatable property to the effects that drive it,
//! the object's base value and the payload accessors. The resolver, selector
//! and interpolator are written once against [`Property`].

use crate::effect::{Effect, EffectKind};
use crate::interpolate::Animatable;
use crate::object::SceneObject;
use crate::property::{Fill, Opacity, PropertyKind, Rect, Rotation, Scale, Stroke, Text};

/// Descriptor for one animatable property
pub trait Property {
    /// Resolved value type
    type Value: Animatable;

    /// Which property this describes
    const KIND: PropertyKind;

    /// Whether effects of this kind drive the property
    fn matches(kind: EffectKind) -> bool {
        kind.property() == Self::KIND
    }

    /// The object's base value
    fn base(object: &SceneObject) -> Self::Value;

    /// Value carried by an effect, if it drives this property
    fn value(effect: &Effect) -> Option<Self::Value>;

    /// Build an effect at `index` carrying `value`
    fn with_value(index: u32, value: Self::Value) -> Effect;
}

/// Rectangle driven by `move` effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionProperty;

impl Property for PositionProperty {
    type Value = Rect;
    const KIND: PropertyKind = PropertyKind::Position;

    fn base(object: &SceneObject) -> Rect {
        object.rect
    }

    fn value(effect: &Effect) -> Option<Rect> {
        match effect {
            Effect::Move { rect, .. } => Some(*rect),
            _ => None,
        }
    }

    fn with_value(index: u32, rect: Rect) -> Effect {
        Effect::Move { index, rect }
    }
}

/// Scale driven by `scale` effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScaleProperty;

impl Property for ScaleProperty {
    type Value = Scale;
    const KIND: PropertyKind = PropertyKind::Scale;

    fn base(object: &SceneObject) -> Scale {
        object.scale
    }

    fn value(effect: &Effect) -> Option<Scale> {
        match effect {
            Effect::Scale { scale, .. } => Some(*scale),
            _ => None,
        }
    }

    fn with_value(index: u32, scale: Scale) -> Effect {
        Effect::Scale { index, scale }
    }
}

/// Opacity driven by `fade` effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpacityProperty;

impl Property for OpacityProperty {
    type Value = Opacity;
    const KIND: PropertyKind = PropertyKind::Opacity;

    fn base(object: &SceneObject) -> Opacity {
        object.fade
    }

    fn value(effect: &Effect) -> Option<Opacity> {
        match effect {
            Effect::Fade { fade, .. } => Some(*fade),
            _ => None,
        }
    }

    fn with_value(index: u32, fade: Opacity) -> Effect {
        Effect::Fade { index, fade }
    }
}

/// Rotation driven by `rotate` effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationProperty;

impl Property for RotationProperty {
    type Value = Rotation;
    const KIND: PropertyKind = PropertyKind::Rotation;

    fn base(object: &SceneObject) -> Rotation {
        object.rotate
    }

    fn value(effect: &Effect) -> Option<Rotation> {
        match effect {
            Effect::Rotate { rotate, .. } => Some(*rotate),
            _ => None,
        }
    }

    fn with_value(index: u32, rotate: Rotation) -> Effect {
        Effect::Rotate { index, rotate }
    }
}

/// Fill driven by `fill` effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillProperty;

impl Property for FillProperty {
    type Value = Fill;
    const KIND: PropertyKind = PropertyKind::Fill;

    fn base(object: &SceneObject) -> Fill {
        object.fill
    }

    fn value(effect: &Effect) -> Option<Fill> {
        match effect {
            Effect::Fill { fill, .. } => Some(*fill),
            _ => None,
        }
    }

    fn with_value(index: u32, fill: Fill) -> Effect {
        Effect::Fill { index, fill }
    }
}

/// Stroke driven by `stroke` effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrokeProperty;

impl Property for StrokeProperty {
    type Value = Stroke;
    const KIND: PropertyKind = PropertyKind::Stroke;

    fn base(object: &SceneObject) -> Stroke {
        object.stroke
    }

    fn value(effect: &Effect) -> Option<Stroke> {
        match effect {
            Effect::Stroke { stroke, .. } => Some(*stroke),
            _ => None,
        }
    }

    fn with_value(index: u32, stroke: Stroke) -> Effect {
        Effect::Stroke { index, stroke }
    }
}

/// Text driven by `text` effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextProperty;

impl Property for TextProperty {
    type Value = Text;
    const KIND: PropertyKind = PropertyKind::Text;

    fn base(object: &SceneObject) -> Text {
        object.text.clone()
    }

    fn value(effect: &Effect) -> Option<Text> {
        match effect {
            Effect::Text { text, .. } => Some(text.clone()),
            _ => None,
        }
    }

    fn with_value(index: u32, text: Text) -> Effect {
        Effect::Text { index, text }
    }
}

/// Visibility driven by `create` and `remove` effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityProperty;

impl Property for VisibilityProperty {
    type Value = bool;
    const KIND: PropertyKind = PropertyKind::Visibility;

    fn base(object: &SceneObject) -> bool {
        object.visible
    }

    fn value(effect: &Effect) -> Option<bool> {
        match effect {
            Effect::Create { .. } => Some(true),
            Effect::Remove { .. } => Some(false),
            _ => None,
        }
    }

    fn with_value(index: u32, visible: bool) -> Effect {
        if visible {
            Effect::Create { index }
        } else {
            Effect::Remove { index }
        }
    }
}
