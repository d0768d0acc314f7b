// SPDX-License-Identifier: MIT OR Apache-2.0
//! Documents holding the scene objects of one animation.

use crate::error::{DocumentError, InvalidEffectError};
use crate::frame::ResolvedFrame;
use crate::object::{ObjectId, SceneObject};
use crate::playback::PlaybackPosition;
use crate::resolve::Resolver;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    /// Create a new random document ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

/// A scene: objects in drawing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DocumentFile", into = "DocumentFile")]
pub struct Document {
    /// Unique document ID
    pub id: DocumentId,
    /// Document name
    pub name: String,
    /// Objects in this document
    objects: IndexMap<ObjectId, SceneObject>,
}

/// On-disk shape of a document
#[derive(Serialize, Deserialize)]
struct DocumentFile {
    #[serde(default)]
    id: DocumentId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    objects: Vec<SceneObject>,
}

impl TryFrom<DocumentFile> for Document {
    type Error = DocumentError;

    fn try_from(file: DocumentFile) -> Result<Self, Self::Error> {
        let mut document = Document {
            id: file.id,
            name: file.name,
            objects: IndexMap::with_capacity(file.objects.len()),
        };
        for object in file.objects {
            if document.objects.contains_key(&object.id) {
                return Err(DocumentError::DuplicateObject(object.id));
            }
            document.add_object(object);
        }
        Ok(document)
    }
}

impl From<Document> for DocumentFile {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            name: document.name,
            objects: document.objects.into_values().collect(),
        }
    }
}

impl Document {
    /// Create an empty document
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(),
            name: name.into(),
            objects: IndexMap::new(),
        }
    }

    /// Add an object, replacing any object with the same ID
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        self.objects.insert(id, object);
        id
    }

    /// Remove an object
    pub fn remove_object(&mut self, object_id: ObjectId) -> Option<SceneObject> {
        self.objects.shift_remove(&object_id)
    }

    /// Get an object
    pub fn object(&self, object_id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&object_id)
    }

    /// Get a mutable object
    pub fn object_mut(&mut self, object_id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&object_id)
    }

    /// Get all objects
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    /// Get object count
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of timeline steps spanned by all objects
    pub fn step_count(&self) -> u32 {
        self.objects
            .values()
            .map(SceneObject::step_count)
            .max()
            .unwrap_or(0)
    }

    /// Resolve every object at `position`
    pub fn resolve_all(&self, resolver: &Resolver, position: PlaybackPosition) -> Vec<ResolvedFrame> {
        self.objects
            .values()
            .map(|object| resolver.resolve_frame(object, position))
            .collect()
    }

    /// Malformed effects, grouped by object
    pub fn validate(&self) -> Vec<(ObjectId, Vec<InvalidEffectError>)> {
        self.objects
            .values()
            .map(|object| (object.id, object.validate()))
            .filter(|(_, errors)| !errors.is_empty())
            .collect()
    }

    /// Parse a document from JSON
    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        let document: Document = serde_json::from_str(source)?;
        tracing::debug!(
            "Loaded document {:?} with {} objects over {} steps",
            document.name,
            document.object_count(),
            document.step_count()
        );
        Ok(document)
    }

    /// Serialize the document to pretty JSON
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a document from a file
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Save the document to a file
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// A document shared between an editing layer and resolution passes
///
/// Each pass resolves against a snapshot. Edits copy the document if a
/// snapshot is still held, so in-flight passes never see a partial edit.
#[derive(Debug, Default)]
pub struct SharedDocument {
    current: RwLock<Arc<Document>>,
}

impl SharedDocument {
    /// Wrap a document
    pub fn new(document: Document) -> Self {
        Self {
            current: RwLock::new(Arc::new(document)),
        }
    }

    /// Immutable view of the current document
    pub fn snapshot(&self) -> Arc<Document> {
        self.current.read().clone()
    }

    /// Apply an edit
    pub fn edit<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let mut current = self.current.write();
        f(Arc::make_mut(&mut *current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effect;
    use crate::playback::Direction;
    use crate::property::Scale;

    const TEMPLATE: &str = r##"{
        "name": "Wave",
        "objects": [
            {
                "id": "6f1c9d5e-0b6a-4d8e-9a3f-1f2e3d4c5b6a",
                "name": "Circle",
                "rect": {"x": 0, "y": 0, "width": 100, "height": 100},
                "fill": {"color": "#ff0000"},
                "effects": [
                    {"type": "create", "index": 0},
                    {"type": "move", "index": 1, "rect": {"x": 50, "y": 0, "width": 100, "height": 100}},
                    {"type": "scale", "index": 2, "scale": {"scale": 2}}
                ]
            },
            {
                "id": "0a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d",
                "name": "Label",
                "text": {"text": "Hello"},
                "effects": [
                    {"type": "text", "index": 3, "text": {"text": "World"}},
                    {"type": "fade", "index": 1}
                ]
            }
        ]
    }"##;

    #[test]
    fn test_load_template() {
        let document = Document::from_json(TEMPLATE).unwrap();
        assert_eq!(document.name, "Wave");
        assert_eq!(document.object_count(), 2);
        assert_eq!(document.step_count(), 4);

        let names: Vec<&str> = document.objects().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Circle", "Label"]);
    }

    #[test]
    fn test_validate_groups_by_object() {
        let document = Document::from_json(TEMPLATE).unwrap();
        let report = document.validate();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].1.len(), 1);
        assert_eq!(report[0].1[0].position(), 1);
    }

    #[test]
    fn test_resolve_all() {
        let document = Document::from_json(TEMPLATE).unwrap();
        let frames = document.resolve_all(
            &Resolver::default(),
            PlaybackPosition::new(1, Direction::Forward, 0.5),
        );
        assert_eq!(frames.len(), 2);

        let circle = frames[0].properties().unwrap();
        assert_eq!(circle.rect.x, 25.0);

        assert!(frames[1].opacity.is_err());
        assert!(frames[1].text.is_ok());
    }

    #[test]
    fn test_round_trip_keeps_malformed_effects() {
        let document = Document::from_json(TEMPLATE).unwrap();
        let json = document.to_json().unwrap();
        let reloaded = Document::from_json(&json).unwrap();
        assert_eq!(reloaded, document);
        assert_eq!(reloaded.validate().len(), 1);
    }

    #[test]
    fn test_file_round_trip() {
        let document = Document::from_json(TEMPLATE).unwrap();
        let path = std::env::temp_dir().join(format!("queue-document-{}.json", Uuid::new_v4()));

        document.save(&path).unwrap();
        let loaded = Document::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.unwrap(), document);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join(format!("queue-missing-{}.json", Uuid::new_v4()));
        assert!(matches!(Document::load(&path), Err(DocumentError::Io(_))));
    }

    #[test]
    fn test_duplicate_objects_rejected() {
        let object = SceneObject::new("Box");
        let file = serde_json::json!({
            "name": "Dup",
            "objects": [object.clone(), object]
        });
        let err = Document::from_json(&file.to_string()).unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
        assert!(err.to_string().contains("Duplicate object"));
    }

    #[test]
    fn test_object_management() {
        let mut document = Document::new("Scene");
        let first = document.add_object(SceneObject::new("A"));
        let second = document.add_object(SceneObject::new("B"));
        assert_eq!(document.object_count(), 2);

        document.remove_object(first);
        assert_eq!(document.object_count(), 1);
        assert!(document.object(second).is_some());
        assert!(document.object(first).is_none());
    }

    #[test]
    fn test_snapshot_is_isolated_from_edits() {
        let mut object = SceneObject::new("Box");
        object.push_effect(Effect::Scale {
            index: 1,
            scale: Scale::new(2.0),
        });
        let id = object.id;
        let mut document = Document::new("Scene");
        document.add_object(object);
        let shared = SharedDocument::new(document);

        let before = shared.snapshot();
        shared.edit(|doc| {
            if let Some(object) = doc.object_mut(id) {
                object.push_effect(Effect::Scale {
                    index: 1,
                    scale: Scale::new(3.0),
                });
            }
        });
        let after = shared.snapshot();

        let position = PlaybackPosition::paused(1);
        let resolver = Resolver::default();
        let old = before.resolve_all(&resolver, position);
        let new = after.resolve_all(&resolver, position);
        assert_eq!(old[0].scale, Ok(Scale::new(2.0)));
        assert_eq!(new[0].scale, Ok(Scale::new(3.0)));
    }

    #[test]
    fn test_parallel_resolution() {
        let document = Document::from_json(TEMPLATE).unwrap();
        let shared = SharedDocument::new(document);
        let resolver = Resolver::default();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|step| {
                    let snapshot = shared.snapshot();
                    scope.spawn(move || {
                        snapshot.resolve_all(&resolver, PlaybackPosition::paused(step))
                    })
                })
                .collect();

            for handle in handles {
                let frames = handle.join().unwrap();
                assert_eq!(frames.len(), 2);
            }
        });
    }
}
