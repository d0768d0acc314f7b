// SPDX-License-Identifier: MIT OR Apache-2.0
//! Instantaneous property state at a timeline step.

use crate::descriptor::Property;
use crate::effect::{Effect, EffectSlot};
use crate::error::InvalidEffectError;
use crate::object::SceneObject;
use serde::{Deserialize, Serialize};

/// Which qualifying effect wins when several apply at a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResolutionOrder {
    /// Last qualifying effect in authoring order, whatever its index
    ///
    /// A later-stored effect with a smaller index overrides an earlier-stored
    /// one with a larger index. Documents rely on this playback output.
    #[default]
    StorageOrder,
    /// Qualifying effect with the greatest index; ties go to the later-stored one
    IndexOrder,
}

/// Resolves property values for scene objects
///
/// All methods are pure: they only read the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolver {
    /// Winner selection among qualifying effects
    pub order: ResolutionOrder,
}

impl Resolver {
    /// Create a resolver with the given order
    pub fn new(order: ResolutionOrder) -> Self {
        Self { order }
    }

    /// Value of property `P` as of step `index`
    ///
    /// Falls back to the base value when no effect of `P` has an index at or
    /// below `index`. Fails if any stored entry attributable to `P` is malformed.
    pub fn current_value<P: Property>(
        &self,
        object: &SceneObject,
        index: i64,
    ) -> Result<P::Value, InvalidEffectError> {
        check_entries::<P>(object)?;

        let qualifying = object
            .effects
            .iter()
            .filter_map(EffectSlot::as_effect)
            .filter(|effect| i64::from(effect.index()) <= index)
            .filter(|effect| P::matches(effect.kind()));

        let winner = match self.order {
            ResolutionOrder::StorageOrder => qualifying.last(),
            ResolutionOrder::IndexOrder => qualifying.max_by_key(|effect| effect.index()),
        };

        Ok(winner
            .and_then(P::value)
            .unwrap_or_else(|| P::base(object)))
    }

    /// First stored effect of `P` authored exactly at `index`, with its value
    pub(crate) fn effect_at<'a, P: Property>(
        &self,
        object: &'a SceneObject,
        index: i64,
    ) -> Option<(&'a Effect, P::Value)> {
        object
            .effects
            .iter()
            .filter_map(EffectSlot::as_effect)
            .filter(|effect| i64::from(effect.index()) == index)
            .find_map(|effect| P::value(effect).map(|value| (effect, value)))
    }
}

/// Fail on the first malformed entry attributable to `P`
fn check_entries<P: Property>(object: &SceneObject) -> Result<(), InvalidEffectError> {
    for (position, slot) in object.effects.iter().enumerate() {
        if let EffectSlot::Invalid(raw) = slot {
            if raw.kind().is_some_and(P::matches) {
                return Err(raw.diagnose(position));
            }
        }
    }
    Ok(())
}

/// Value of property `P` as of step `index`, in storage order
pub fn current_value<P: Property>(
    object: &SceneObject,
    index: i64,
) -> Result<P::Value, InvalidEffectError> {
    Resolver::default().current_value::<P>(object, index)
}
