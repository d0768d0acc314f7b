// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline effect-resolution engine for the Queue editor.
//!
//! Scene objects carry base property values and a list of effects, each
//! changing one property at a timeline step. This crate computes what to
//! draw for any playback position:
//! - Resolver: the state of a property as of a step
//! - Selector: the from/to pair to animate between adjacent steps
//! - Interpolator: the blend of that pair by playback progress
//!
//! ## Architecture
//!
//! The three stages are written once against the [`Property`] descriptor
//! trait and instantiated for position, scale, opacity, rotation, fill,
//! stroke, text and visibility. All stages are pure. Malformed effects fail
//! only the property they drive.

pub mod animation;
pub mod descriptor;
pub mod document;
pub mod effect;
pub mod error;
pub mod frame;
pub mod interpolate;
pub mod object;
pub mod playback;
pub mod property;
pub mod resolve;
pub mod settings;

pub use animation::{animation, Animation};
pub use descriptor::{
    FillProperty, OpacityProperty, PositionProperty, Property, RotationProperty, ScaleProperty,
    StrokeProperty, TextProperty, VisibilityProperty,
};
pub use document::{Document, DocumentId, SharedDocument};
pub use effect::{Effect, EffectKind, EffectSlot, RawEffect};
pub use error::{DocumentError, InvalidEffectError, SettingsError};
pub use frame::{resolve_frame, ResolvedFrame, ResolvedProperties};
pub use interpolate::{interpolate, Animatable, InterpolationRule};
pub use object::{ObjectId, SceneObject, WithEffects};
pub use playback::{Direction, PlaybackController, PlaybackPosition, PlaybackState};
pub use property::{Color, Fill, Opacity, PropertyKind, Rect, Rotation, Scale, Stroke, Text};
pub use resolve::{current_value, ResolutionOrder, Resolver};
pub use settings::PlaybackSettings;
