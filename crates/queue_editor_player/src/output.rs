// SPDX-License-Identifier: MIT OR Apache-2.0
//! JSON-lines output of resolved frames.

use anyhow::Result;
use queue_editor_timeline::{
    Document, PlaybackPosition, PropertyKind, ResolvedFrame, ResolvedProperties, Resolver,
};
use serde::Serialize;
use std::io::Write;
use uuid::Uuid;

/// One object's result at one position
#[derive(Debug, Serialize)]
pub struct ObjectRecord<'a> {
    /// Object ID
    pub object: Uuid,
    /// Object name
    pub name: &'a str,
    /// Resolved properties, when every property resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<ResolvedProperties>,
    /// Failed properties
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<PropertyError>,
}

/// A property that failed to resolve
#[derive(Debug, Serialize)]
pub struct PropertyError {
    /// Failed property, or `None` for entries of unknown type
    pub property: Option<PropertyKind>,
    /// Error message
    pub message: String,
}

/// One object's result during playback
#[derive(Debug, Serialize)]
struct PlaybackRecord<'a> {
    frame: u64,
    position: PlaybackPosition,
    #[serde(flatten)]
    record: ObjectRecord<'a>,
}

impl<'a> ObjectRecord<'a> {
    /// Build a record from a resolved frame
    pub fn new(name: &'a str, frame: &ResolvedFrame) -> Self {
        let mut errors: Vec<PropertyError> = frame
            .errors()
            .into_iter()
            .map(|(kind, err)| PropertyError {
                property: Some(kind),
                message: err.to_string(),
            })
            .collect();
        errors.extend(frame.unattributed.iter().map(|err| PropertyError {
            property: None,
            message: err.to_string(),
        }));

        Self {
            object: frame.object_id.0,
            name,
            properties: frame.properties().ok(),
            errors,
        }
    }
}

/// Print every object at `position`
pub fn print_frames(
    document: &Document,
    resolver: &Resolver,
    position: PlaybackPosition,
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for (object, frame) in document.objects().zip(document.resolve_all(resolver, position)) {
        let record = ObjectRecord::new(&object.name, &frame);
        serde_json::to_writer(&mut out, &record)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Print every object at one simulated playback frame
pub fn print_playback_frame(
    document: &Document,
    resolver: &Resolver,
    frame: u64,
    position: PlaybackPosition,
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for (object, resolved) in document.objects().zip(document.resolve_all(resolver, position)) {
        let record = PlaybackRecord {
            frame,
            position,
            record: ObjectRecord::new(&object.name, &resolved),
        };
        serde_json::to_writer(&mut out, &record)?;
        writeln!(out)?;
    }
    Ok(())
}
