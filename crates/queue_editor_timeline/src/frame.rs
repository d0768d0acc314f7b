// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resolving every property of an object for one rendered frame.

use crate::descriptor::{
    FillProperty, OpacityProperty, PositionProperty, Property, RotationProperty, ScaleProperty,
    StrokeProperty, TextProperty, VisibilityProperty,
};
use crate::error::InvalidEffectError;
use crate::interpolate::interpolate;
use crate::object::{ObjectId, SceneObject};
use crate::playback::PlaybackPosition;
use crate::property::{Fill, Opacity, PropertyKind, Rect, Rotation, Scale, Stroke, Text};
use crate::resolve::Resolver;
use serde::{Deserialize, Serialize};

/// Fully resolved properties, ready to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedProperties {
    /// Rectangle
    pub rect: Rect,
    /// Scale
    pub scale: Scale,
    /// Opacity
    pub opacity: Opacity,
    /// Rotation
    pub rotation: Rotation,
    /// Fill
    pub fill: Fill,
    /// Stroke
    pub stroke: Stroke,
    /// Text
    pub text: Text,
    /// Visibility
    pub visible: bool,
}

/// Per-property resolution results for one object
///
/// A malformed effect only fails the property it drives.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFrame {
    /// Object these results belong to
    pub object_id: ObjectId,
    /// Rectangle
    pub rect: Result<Rect, InvalidEffectError>,
    /// Scale
    pub scale: Result<Scale, InvalidEffectError>,
    /// Opacity
    pub opacity: Result<Opacity, InvalidEffectError>,
    /// Rotation
    pub rotation: Result<Rotation, InvalidEffectError>,
    /// Fill
    pub fill: Result<Fill, InvalidEffectError>,
    /// Stroke
    pub stroke: Result<Stroke, InvalidEffectError>,
    /// Text
    pub text: Result<Text, InvalidEffectError>,
    /// Visibility
    pub visible: Result<bool, InvalidEffectError>,
    /// Malformed entries of unrecognized type
    pub unattributed: Vec<InvalidEffectError>,
}

impl ResolvedFrame {
    /// All properties, or the first property error
    pub fn properties(&self) -> Result<ResolvedProperties, InvalidEffectError> {
        Ok(ResolvedProperties {
            rect: self.rect.clone()?,
            scale: self.scale.clone()?,
            opacity: self.opacity.clone()?,
            rotation: self.rotation.clone()?,
            fill: self.fill.clone()?,
            stroke: self.stroke.clone()?,
            text: self.text.clone()?,
            visible: self.visible.clone()?,
        })
    }

    /// Every failed property with its error
    pub fn errors(&self) -> Vec<(PropertyKind, &InvalidEffectError)> {
        [
            (PropertyKind::Position, self.rect.as_ref().err()),
            (PropertyKind::Scale, self.scale.as_ref().err()),
            (PropertyKind::Opacity, self.opacity.as_ref().err()),
            (PropertyKind::Rotation, self.rotation.as_ref().err()),
            (PropertyKind::Fill, self.fill.as_ref().err()),
            (PropertyKind::Stroke, self.stroke.as_ref().err()),
            (PropertyKind::Text, self.text.as_ref().err()),
            (PropertyKind::Visibility, self.visible.as_ref().err()),
        ]
        .into_iter()
        .filter_map(|(kind, err)| err.map(|err| (kind, err)))
        .collect()
    }

    /// Whether every property resolved and no entry is malformed
    pub fn is_clean(&self) -> bool {
        self.errors().is_empty() && self.unattributed.is_empty()
    }
}

impl Resolver {
    /// Value of property `P` to draw at `position`
    pub fn resolve<P: Property>(
        &self,
        object: &SceneObject,
        position: PlaybackPosition,
    ) -> Result<P::Value, InvalidEffectError> {
        let current = self.current_value::<P>(object, position.index)?;
        let animation = self.animation::<P>(object, position.index, position.direction)?;

        Ok(match animation {
            Some(animation) => {
                interpolate(position.progress, animation.target(), Some(&animation.from))
            }
            None => interpolate(position.progress, &current, None),
        })
    }

    /// Resolve every property of `object` at `position`
    pub fn resolve_frame(&self, object: &SceneObject, position: PlaybackPosition) -> ResolvedFrame {
        let frame = ResolvedFrame {
            object_id: object.id,
            rect: self.resolve::<PositionProperty>(object, position),
            scale: self.resolve::<ScaleProperty>(object, position),
            opacity: self.resolve::<OpacityProperty>(object, position),
            rotation: self.resolve::<RotationProperty>(object, position),
            fill: self.resolve::<FillProperty>(object, position),
            stroke: self.resolve::<StrokeProperty>(object, position),
            text: self.resolve::<TextProperty>(object, position),
            visible: self.resolve::<VisibilityProperty>(object, position),
            unattributed: object.unattributed_errors(),
        };

        for (kind, err) in frame.errors() {
            tracing::warn!(object = %object.name, property = %kind, "Cannot resolve: {}", err);
        }
        for err in &frame.unattributed {
            tracing::warn!(object = %object.name, "Ignoring effect: {}", err);
        }

        frame
    }
}

/// Resolve every property of `object` at `position`, in storage order
pub fn resolve_frame(object: &SceneObject, position: PlaybackPosition) -> ResolvedFrame {
    Resolver::default().resolve_frame(object, position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{Effect, EffectSlot};
    use crate::playback::Direction;
    use crate::property::Color;
    use serde_json::json;

    fn animated_object() -> SceneObject {
        let mut object = SceneObject::new("Box");
        object.visible = false;
        object
            .with_effect(Effect::Create { index: 0 })
            .with_effect(Effect::Scale {
                index: 2,
                scale: Scale::new(4.0),
            })
            .with_effect(Effect::Fill {
                index: 2,
                fill: Fill::new(Color::BLACK),
            })
            .with_effect(Effect::Text {
                index: 1,
                text: Text::new("Hi"),
            })
    }

    #[test]
    fn test_paused_frame_shows_current_state() {
        let object = animated_object();
        let props = resolve_frame(&object, PlaybackPosition::paused(2))
            .properties()
            .unwrap();

        assert_eq!(props.scale, Scale::new(4.0));
        assert_eq!(props.fill, Fill::new(Color::BLACK));
        assert_eq!(props.text, Text::new("Hi"));
        assert!(props.visible);
        assert_eq!(props.opacity, Opacity::new(1.0));
    }

    #[test]
    fn test_forward_mid_step() {
        let object = animated_object();
        let frame = resolve_frame(&object, PlaybackPosition::new(2, Direction::Forward, 0.5));
        let props = frame.properties().unwrap();

        assert_eq!(props.scale, Scale::new(2.5));
        assert_eq!(props.fill, Fill::new(Color::rgba(0.5, 0.5, 0.5, 1.0)));
        // Nothing authored at step 2 for text: it holds.
        assert_eq!(props.text, Text::new("Hi"));
    }

    #[test]
    fn test_extreme_steps_hold_state() {
        let object = animated_object();

        let end = resolve_frame(&object, PlaybackPosition::new(i64::MAX, Direction::Backward, 0.5))
            .properties()
            .unwrap();
        assert_eq!(end.scale, Scale::new(4.0));
        assert!(end.visible);

        let start = resolve_frame(&object, PlaybackPosition::new(i64::MIN, Direction::Forward, 0.5))
            .properties()
            .unwrap();
        assert_eq!(start.scale, Scale::new(1.0));
        assert!(!start.visible);
    }

    #[test]
    fn test_backward_mid_step() {
        let object = animated_object();
        let props = resolve_frame(&object, PlaybackPosition::new(1, Direction::Backward, 0.5))
            .properties()
            .unwrap();
        assert_eq!(props.scale, Scale::new(2.5));

        let start = resolve_frame(&object, PlaybackPosition::new(1, Direction::Backward, 0.0))
            .properties()
            .unwrap();
        assert_eq!(start.scale, Scale::new(4.0));
    }

    #[test]
    fn test_discrete_snaps_at_end_of_step() {
        let object = animated_object();
        let mid = resolve_frame(&object, PlaybackPosition::new(1, Direction::Forward, 0.99));
        assert_eq!(mid.text, Ok(Text::new("")));

        let end = resolve_frame(&object, PlaybackPosition::new(1, Direction::Forward, 1.0));
        assert_eq!(end.text, Ok(Text::new("Hi")));
    }

    #[test]
    fn test_visibility_appears_on_create() {
        let object = animated_object();
        let frame = resolve_frame(&object, PlaybackPosition::new(0, Direction::Forward, 0.5));
        assert_eq!(frame.visible, Ok(false));

        let frame = resolve_frame(&object, PlaybackPosition::new(0, Direction::Forward, 1.0));
        assert_eq!(frame.visible, Ok(true));
    }

    #[test]
    fn test_errors_are_per_property() {
        let mut object = animated_object();
        object.push_effect(EffectSlot::from_json(json!({"type": "fill", "index": 1})));
        object.push_effect(EffectSlot::from_json(json!({"type": "sparkle", "index": 1})));

        let frame = resolve_frame(&object, PlaybackPosition::paused(2));
        assert!(frame.fill.is_err());
        assert_eq!(frame.scale, Ok(Scale::new(4.0)));
        assert_eq!(frame.unattributed.len(), 1);
        assert!(!frame.is_clean());

        let errors = frame.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, PropertyKind::Fill);
        assert_eq!(errors[0].1.position(), 4);
        assert!(frame.properties().is_err());
    }

    #[test]
    fn test_resolved_properties_serialize() {
        let object = animated_object();
        let props = resolve_frame(&object, PlaybackPosition::paused(0))
            .properties()
            .unwrap();
        let value = serde_json::to_value(&props).unwrap();
        assert_eq!(value["scale"]["scale"], json!(1.0));
        assert_eq!(value["visible"], json!(true));
    }
}
