// SPDX-License-Identifier: MIT OR Apache-2.0
//! Effect definitions for the timeline.
//!
//! An effect changes one property of an object at a timeline step. Effects
//! are stored in authoring order, which need not match step order.

use crate::error::InvalidEffectError;
use crate::property::{Fill, Opacity, PropertyKind, Rect, Rotation, Scale, Stroke, Text};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Effect discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// Object appears
    Create,
    /// Object disappears
    Remove,
    /// Opacity change
    Fade,
    /// Fill color change
    Fill,
    /// Rectangle change
    Move,
    /// Rotation change
    Rotate,
    /// Stroke change
    Stroke,
    /// Text content change
    Text,
    /// Scale change
    Scale,
}

impl EffectKind {
    /// Look up a kind by its `type` name
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "create" => Self::Create,
            "remove" => Self::Remove,
            "fade" => Self::Fade,
            "fill" => Self::Fill,
            "move" => Self::Move,
            "rotate" => Self::Rotate,
            "stroke" => Self::Stroke,
            "text" => Self::Text,
            "scale" => Self::Scale,
            _ => return None,
        })
    }

    /// Get the `type` name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Remove => "remove",
            Self::Fade => "fade",
            Self::Fill => "fill",
            Self::Move => "move",
            Self::Rotate => "rotate",
            Self::Stroke => "stroke",
            Self::Text => "text",
            Self::Scale => "scale",
        }
    }

    /// Name of the field holding the payload, if the kind carries one
    pub fn payload_field(&self) -> Option<&'static str> {
        match self {
            Self::Create | Self::Remove => None,
            Self::Fade => Some("fade"),
            Self::Fill => Some("fill"),
            Self::Move => Some("rect"),
            Self::Rotate => Some("rotate"),
            Self::Stroke => Some("stroke"),
            Self::Text => Some("text"),
            Self::Scale => Some("scale"),
        }
    }

    /// The property this kind of effect drives
    pub fn property(&self) -> PropertyKind {
        match self {
            Self::Create | Self::Remove => PropertyKind::Visibility,
            Self::Fade => PropertyKind::Opacity,
            Self::Fill => PropertyKind::Fill,
            Self::Move => PropertyKind::Position,
            Self::Rotate => PropertyKind::Rotation,
            Self::Stroke => PropertyKind::Stroke,
            Self::Text => PropertyKind::Text,
            Self::Scale => PropertyKind::Scale,
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An effect at a timeline step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Effect {
    /// Object appears
    Create {
        /// Timeline step
        index: u32,
    },
    /// Object disappears
    Remove {
        /// Timeline step
        index: u32,
    },
    /// Opacity change
    Fade {
        /// Timeline step
        index: u32,
        /// New opacity
        fade: Opacity,
    },
    /// Fill change
    Fill {
        /// Timeline step
        index: u32,
        /// New fill
        fill: Fill,
    },
    /// Rectangle change
    Move {
        /// Timeline step
        index: u32,
        /// New rectangle
        rect: Rect,
    },
    /// Rotation change
    Rotate {
        /// Timeline step
        index: u32,
        /// New rotation
        rotate: Rotation,
    },
    /// Stroke change
    Stroke {
        /// Timeline step
        index: u32,
        /// New stroke
        stroke: Stroke,
    },
    /// Text change
    Text {
        /// Timeline step
        index: u32,
        /// New text
        text: Text,
    },
    /// Scale change
    Scale {
        /// Timeline step
        index: u32,
        /// New scale
        scale: Scale,
    },
}

impl Effect {
    /// Timeline step of this effect
    pub fn index(&self) -> u32 {
        match self {
            Effect::Create { index }
            | Effect::Remove { index }
            | Effect::Fade { index, .. }
            | Effect::Fill { index, .. }
            | Effect::Move { index, .. }
            | Effect::Rotate { index, .. }
            | Effect::Stroke { index, .. }
            | Effect::Text { index, .. }
            | Effect::Scale { index, .. } => *index,
        }
    }

    /// Discriminator of this effect
    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Create { .. } => EffectKind::Create,
            Effect::Remove { .. } => EffectKind::Remove,
            Effect::Fade { .. } => EffectKind::Fade,
            Effect::Fill { .. } => EffectKind::Fill,
            Effect::Move { .. } => EffectKind::Move,
            Effect::Rotate { .. } => EffectKind::Rotate,
            Effect::Stroke { .. } => EffectKind::Stroke,
            Effect::Text { .. } => EffectKind::Text,
            Effect::Scale { .. } => EffectKind::Scale,
        }
    }
}

/// A stored effect entry
///
/// Malformed entries are kept verbatim so the document still round-trips,
/// and are reported when a property they touch is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EffectSlot {
    /// Well-formed effect
    Valid(Effect),
    /// Entry that failed to parse as an effect
    Invalid(RawEffect),
}

impl EffectSlot {
    /// Parse a JSON value into a slot
    pub fn from_json(value: Value) -> Self {
        match serde_json::from_value::<Effect>(value.clone()) {
            Ok(effect) => EffectSlot::Valid(effect),
            Err(_) => EffectSlot::Invalid(RawEffect(value)),
        }
    }

    /// Get the effect if well-formed
    pub fn as_effect(&self) -> Option<&Effect> {
        match self {
            EffectSlot::Valid(effect) => Some(effect),
            EffectSlot::Invalid(_) => None,
        }
    }

    /// Get the raw entry if malformed
    pub fn as_invalid(&self) -> Option<&RawEffect> {
        match self {
            EffectSlot::Valid(_) => None,
            EffectSlot::Invalid(raw) => Some(raw),
        }
    }

    /// Discriminator, when recognizable
    pub fn kind(&self) -> Option<EffectKind> {
        match self {
            EffectSlot::Valid(effect) => Some(effect.kind()),
            EffectSlot::Invalid(raw) => raw.kind(),
        }
    }
}

impl From<Effect> for EffectSlot {
    fn from(effect: Effect) -> Self {
        EffectSlot::Valid(effect)
    }
}

/// Effect entry that could not be parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEffect(Value);

impl RawEffect {
    /// The stored JSON
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Discriminator, if the `type` field names a known kind
    pub fn kind(&self) -> Option<EffectKind> {
        self.0
            .get("type")
            .and_then(Value::as_str)
            .and_then(EffectKind::from_name)
    }

    /// Explain why this entry is not a valid effect
    ///
    /// `position` is the entry's place in the object's effect list.
    pub fn diagnose(&self, position: usize) -> InvalidEffectError {
        let Some(fields) = self.0.as_object() else {
            return InvalidEffectError::NotAnObject { position };
        };

        let type_field = fields.get("type");
        let Some(kind) = type_field.and_then(Value::as_str).and_then(EffectKind::from_name) else {
            return InvalidEffectError::UnknownType {
                position,
                kind: type_field.map(Value::to_string),
            };
        };

        let Some(index) = fields.get("index") else {
            return InvalidEffectError::MissingIndex { position, kind };
        };
        if let Some(negative) = index.as_i64().filter(|i| *i < 0) {
            return InvalidEffectError::NegativeIndex {
                position,
                kind,
                index: negative,
            };
        }
        if !index.as_u64().is_some_and(|i| u32::try_from(i).is_ok()) {
            return InvalidEffectError::InvalidIndex {
                position,
                kind,
                value: index.to_string(),
            };
        }

        if let Some(field) = kind.payload_field() {
            if !fields.contains_key(field) {
                return InvalidEffectError::MissingPayload {
                    position,
                    kind,
                    field,
                };
            }
        }

        let reason = match serde_json::from_value::<Effect>(self.0.clone()) {
            Err(e) => e.to_string(),
            Ok(_) => "entry was stored without being parsed".to_string(),
        };
        InvalidEffectError::MalformedPayload {
            position,
            kind,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slot(value: Value) -> EffectSlot {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_effect_json_shape() {
        let effect: Effect =
            serde_json::from_value(json!({"type": "scale", "index": 2, "scale": {"scale": 2.0}}))
                .unwrap();
        assert_eq!(
            effect,
            Effect::Scale {
                index: 2,
                scale: Scale::new(2.0)
            }
        );
        assert_eq!(effect.kind(), EffectKind::Scale);
        assert_eq!(effect.index(), 2);

        let value = serde_json::to_value(Effect::Create { index: 0 }).unwrap();
        assert_eq!(value, json!({"type": "create", "index": 0}));
    }

    #[test]
    fn test_kind_names() {
        for kind in [
            EffectKind::Create,
            EffectKind::Remove,
            EffectKind::Fade,
            EffectKind::Fill,
            EffectKind::Move,
            EffectKind::Rotate,
            EffectKind::Stroke,
            EffectKind::Text,
            EffectKind::Scale,
        ] {
            assert_eq!(EffectKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(EffectKind::from_name("blink"), None);
        assert_eq!(EffectKind::Move.payload_field(), Some("rect"));
        assert_eq!(EffectKind::Remove.property(), PropertyKind::Visibility);
    }

    #[test]
    fn test_valid_slot() {
        let s = slot(json!({"type": "fade", "index": 1, "fade": {"opacity": 0.5}}));
        assert!(matches!(s, EffectSlot::Valid(Effect::Fade { index: 1, .. })));
    }

    #[test]
    fn test_negative_index_is_kept_and_diagnosed() {
        let s = slot(json!({"type": "scale", "index": -1, "scale": {"scale": 2.0}}));
        let raw = s.as_invalid().unwrap();
        assert_eq!(raw.kind(), Some(EffectKind::Scale));
        assert_eq!(
            raw.diagnose(3),
            InvalidEffectError::NegativeIndex {
                position: 3,
                kind: EffectKind::Scale,
                index: -1
            }
        );
    }

    #[test]
    fn test_missing_payload() {
        let s = slot(json!({"type": "rotate", "index": 4}));
        assert_eq!(
            s.as_invalid().unwrap().diagnose(0),
            InvalidEffectError::MissingPayload {
                position: 0,
                kind: EffectKind::Rotate,
                field: "rotate"
            }
        );
    }

    #[test]
    fn test_unknown_type() {
        let s = slot(json!({"type": "blink", "index": 4}));
        assert_eq!(s.kind(), None);
        assert_eq!(
            s.as_invalid().unwrap().diagnose(2),
            InvalidEffectError::UnknownType {
                position: 2,
                kind: Some("\"blink\"".to_string())
            }
        );

        let untyped = slot(json!({"index": 4}));
        assert!(matches!(
            untyped.as_invalid().unwrap().diagnose(0),
            InvalidEffectError::UnknownType { kind: None, .. }
        ));
    }

    #[test]
    fn test_malformed_index_and_payload() {
        let fractional = slot(json!({"type": "create", "index": 1.5}));
        assert!(matches!(
            fractional.as_invalid().unwrap().diagnose(0),
            InvalidEffectError::InvalidIndex { .. }
        ));

        let missing = slot(json!({"type": "create"}));
        assert!(matches!(
            missing.as_invalid().unwrap().diagnose(0),
            InvalidEffectError::MissingIndex { .. }
        ));

        let bad_payload = slot(json!({"type": "scale", "index": 1, "scale": {"scale": "big"}}));
        assert!(matches!(
            bad_payload.as_invalid().unwrap().diagnose(0),
            InvalidEffectError::MalformedPayload {
                kind: EffectKind::Scale,
                ..
            }
        ));

        let not_object = slot(json!(42));
        assert_eq!(
            not_object.as_invalid().unwrap().diagnose(5),
            InvalidEffectError::NotAnObject { position: 5 }
        );
    }

    #[test]
    fn test_invalid_slot_round_trips() {
        let raw = json!({"type": "scale", "index": -1, "scale": {"scale": 2.0}});
        let s = slot(raw.clone());
        assert_eq!(serde_json::to_value(&s).unwrap(), raw);
    }
}
