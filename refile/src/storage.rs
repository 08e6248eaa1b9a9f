//! Host storage seams.
//!
//! The host framework owns file records and content entities; this subsystem
//! only reads them. The traits below are the boundary, and [`MemoryStorage`]
//! is the in-process backend used by the standalone binary and the tests.

use crate::errors::Result;
use crate::types::{EntityRef, FileId};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Metadata of an uploaded file as host storage reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileRecord {
    pub id: FileId,
    pub filename: String,
    pub uri: String,
}

/// A content entity that references a file (the owner entity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Entity {
    pub entity_type: String,
    pub id: String,
    /// Human-readable display label, used in the completion status message.
    pub label: String,
}

impl Entity {
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.entity_type.clone(), self.id.clone())
    }
}

/// Read access to file records.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn load(&self, id: &FileId) -> Result<Option<FileRecord>>;
}

/// Read access to content entities by `(entity_type, id)`.
#[async_trait]
pub trait EntityStorage: Send + Sync {
    async fn load(&self, entity_ref: &EntityRef) -> Result<Option<Entity>>;
}

/// In-memory storage backend over dashmap. Stands in for the host's entity
/// storage in the standalone binary and in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: DashMap<FileId, FileRecord>,
    entities: DashMap<(String, String), Entity>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_file(&self, file: FileRecord) {
        self.files.insert(file.id.clone(), file);
    }

    pub fn insert_entity(&self, entity: Entity) {
        self.entities.insert((entity.entity_type.clone(), entity.id.clone()), entity);
    }

    pub fn remove_entity(&self, entity_ref: &EntityRef) {
        self.entities.remove(&(entity_ref.entity_type.clone(), entity_ref.id.clone()));
    }
}

#[async_trait]
impl FileStorage for MemoryStorage {
    async fn load(&self, id: &FileId) -> Result<Option<FileRecord>> {
        Ok(self.files.get(id).map(|record| record.value().clone()))
    }
}

#[async_trait]
impl EntityStorage for MemoryStorage {
    async fn load(&self, entity_ref: &EntityRef) -> Result<Option<Entity>> {
        let key = (entity_ref.entity_type.clone(), entity_ref.id.clone());
        Ok(self.entities.get(&key).map(|entity| entity.value().clone()))
    }
}
