// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the timeline engine.

use crate::effect::EffectKind;
use crate::object::ObjectId;

/// A stored effect that cannot take part in resolution
///
/// `position` is the entry's place in the object's effect list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidEffectError {
    /// Entry is not a JSON object
    #[error("Effect #{position} is not an object")]
    NotAnObject {
        /// Storage position
        position: usize,
    },

    /// Missing or unrecognized discriminator
    #[error("Effect #{position} has unrecognized type: {}", .kind.as_deref().unwrap_or("<missing>"))]
    UnknownType {
        /// Storage position
        position: usize,
        /// The `type` field as written, if present
        kind: Option<String>,
    },

    /// Missing step index
    #[error("Effect #{position} ({kind}) has no index")]
    MissingIndex {
        /// Storage position
        position: usize,
        /// Effect kind
        kind: EffectKind,
    },

    /// Step index below zero
    #[error("Effect #{position} ({kind}) has negative index {index}")]
    NegativeIndex {
        /// Storage position
        position: usize,
        /// Effect kind
        kind: EffectKind,
        /// The index as written
        index: i64,
    },

    /// Step index that is not a representable integer
    #[error("Effect #{position} ({kind}) has invalid index {value}")]
    InvalidIndex {
        /// Storage position
        position: usize,
        /// Effect kind
        kind: EffectKind,
        /// The index as written
        value: String,
    },

    /// Required payload field absent
    #[error("Effect #{position} ({kind}) is missing its '{field}' payload")]
    MissingPayload {
        /// Storage position
        position: usize,
        /// Effect kind
        kind: EffectKind,
        /// Expected field name
        field: &'static str,
    },

    /// Payload present but not of the expected shape
    #[error("Effect #{position} ({kind}) has a malformed payload: {reason}")]
    MalformedPayload {
        /// Storage position
        position: usize,
        /// Effect kind
        kind: EffectKind,
        /// Parser message
        reason: String,
    },
}

impl InvalidEffectError {
    /// Storage position of the offending entry
    pub fn position(&self) -> usize {
        match self {
            Self::NotAnObject { position }
            | Self::UnknownType { position, .. }
            | Self::MissingIndex { position, .. }
            | Self::NegativeIndex { position, .. }
            | Self::InvalidIndex { position, .. }
            | Self::MissingPayload { position, .. }
            | Self::MalformedPayload { position, .. } => *position,
        }
    }
}

/// Error loading or saving a document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Two objects share an ID
    #[error("Duplicate object: {0:?}")]
    DuplicateObject(ObjectId),
}

/// Error loading or saving playback settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// RON parse error
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
