// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene objects and their effect lists.

use crate::effect::{Effect, EffectSlot};
use crate::error::InvalidEffectError;
use crate::property::{Fill, Opacity, Rect, Rotation, Scale, Stroke, Text};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    /// Create a new random object ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything that owns an effect list
pub trait WithEffects {
    /// Stored effects, in authoring order
    fn effects(&self) -> &[EffectSlot];

    /// Well-formed effects, in authoring order
    fn valid_effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects().iter().filter_map(EffectSlot::as_effect)
    }
}

/// A scene object: base property values plus its effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Unique object ID
    #[serde(default)]
    pub id: ObjectId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Base rectangle
    #[serde(default)]
    pub rect: Rect,
    /// Base scale
    #[serde(default)]
    pub scale: Scale,
    /// Base opacity
    #[serde(default)]
    pub fade: Opacity,
    /// Base rotation
    #[serde(default)]
    pub rotate: Rotation,
    /// Base fill
    #[serde(default)]
    pub fill: Fill,
    /// Base stroke
    #[serde(default)]
    pub stroke: Stroke,
    /// Base text
    #[serde(default)]
    pub text: Text,
    /// Base visibility
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    /// Effects in authoring order
    #[serde(default)]
    pub effects: Vec<EffectSlot>,
}

fn visible_by_default() -> bool {
    true
}

impl SceneObject {
    /// Create an object with default base values and no effects
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            rect: Rect::default(),
            scale: Scale::default(),
            fade: Opacity::default(),
            rotate: Rotation::default(),
            fill: Fill::default(),
            stroke: Stroke::default(),
            text: Text::default(),
            visible: true,
            effects: Vec::new(),
        }
    }

    /// Append an effect
    pub fn with_effect(mut self, effect: impl Into<EffectSlot>) -> Self {
        self.effects.push(effect.into());
        self
    }

    /// Append an effect in place
    pub fn push_effect(&mut self, effect: impl Into<EffectSlot>) {
        self.effects.push(effect.into());
    }

    /// Diagnose every malformed effect entry
    pub fn validate(&self) -> Vec<InvalidEffectError> {
        self.effects
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| slot.as_invalid().map(|raw| raw.diagnose(position)))
            .collect()
    }

    /// Malformed entries whose type is not recognized
    ///
    /// These cannot be attributed to a property, so no property fails on them.
    pub fn unattributed_errors(&self) -> Vec<InvalidEffectError> {
        self.effects
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| match slot {
                EffectSlot::Invalid(raw) if raw.kind().is_none() => Some(raw.diagnose(position)),
                _ => None,
            })
            .collect()
    }

    /// One past the greatest valid effect index
    pub fn step_count(&self) -> u32 {
        self.valid_effects()
            .map(|e| e.index().saturating_add(1))
            .max()
            .unwrap_or(0)
    }
}

impl WithEffects for SceneObject {
    fn effects(&self) -> &[EffectSlot] {
        &self.effects
    }
}
