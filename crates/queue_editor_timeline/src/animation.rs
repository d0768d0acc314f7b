// SPDX-License-Identifier: MIT OR Apache-2.0
//! Selecting the from/to pair to animate between adjacent steps.

use crate::descriptor::Property;
use crate::effect::Effect;
use crate::error::InvalidEffectError;
use crate::object::SceneObject;
use crate::playback::Direction;
use crate::resolve::Resolver;

/// The pair a property animates between
#[derive(Debug, Clone, PartialEq)]
pub struct Animation<P: Property> {
    /// Resolved value the animation starts from
    pub from: P::Value,
    /// Effect the animation ends on
    ///
    /// When playing backward this carries the value resolved at the
    /// destination step, not the value it was authored with.
    pub to: Effect,
    target: P::Value,
}

impl<P: Property> Animation<P> {
    /// Value carried by [`Animation::to`]
    pub fn target(&self) -> &P::Value {
        &self.target
    }
}

impl Resolver {
    /// Pair to animate property `P` into step `index` in `direction`
    ///
    /// - `Pause` never animates.
    /// - `Forward` goes from the state at `index - 1` to the effect authored at `index`.
    /// - `Backward` goes from the state at `index + 1` to the state at `index`, using
    ///   the effect authored at `index + 1` with its value replaced.
    ///
    /// Returns `None` when no effect of `P` is authored at the boundary step.
    pub fn animation<P: Property>(
        &self,
        object: &SceneObject,
        index: i64,
        direction: Direction,
    ) -> Result<Option<Animation<P>>, InvalidEffectError> {
        // Effect indices are `u32`, so a saturated step never matches one.
        let (from_index, target_index) = match direction {
            Direction::Pause => return Ok(None),
            Direction::Forward => (index.saturating_sub(1), index),
            Direction::Backward => (index.saturating_add(1), index.saturating_add(1)),
        };

        let from = self.current_value::<P>(object, from_index)?;

        let Some((effect, authored)) = self.effect_at::<P>(object, target_index) else {
            return Ok(None);
        };

        let (to, target) = match direction {
            Direction::Backward => {
                let value = self.current_value::<P>(object, index)?;
                (P::with_value(effect.index(), value.clone()), value)
            }
            _ => (effect.clone(), authored),
        };

        Ok(Some(Animation { from, to, target }))
    }
}

/// Pair to animate property `P` into step `index`, in storage order
pub fn animation<P: Property>(
    object: &SceneObject,
    index: i64,
    direction: Direction,
) -> Result<Option<Animation<P>>, InvalidEffectError> {
    Resolver::default().animation::<P>(object, index, direction)
}
