//! Identifier types shared across the replace flow.

use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Opaque identifier of an uploaded file. Owned by host storage; this
/// subsystem only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Reference to the content entity that currently holds the file being
/// replaced (the "owner entity").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct EntityRef {
    pub entity_type: String,
    pub id: String,
}

impl EntityRef {
    pub fn new(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

/// Serialized owner identity passed through the replace flow as the
/// `_ajax_context` query parameter, in the form `<entity_type>.<id>`.
///
/// Parsing requires exactly one separator with a non-empty half on each side;
/// anything else is rejected before any form is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextToken(EntityRef);

impl ContextToken {
    pub fn entity_ref(&self) -> &EntityRef {
        &self.0
    }

    pub fn into_entity_ref(self) -> EntityRef {
        self.0
    }
}

impl From<EntityRef> for ContextToken {
    fn from(entity_ref: EntityRef) -> Self {
        Self(entity_ref)
    }
}

impl From<&EntityRef> for ContextToken {
    fn from(entity_ref: &EntityRef) -> Self {
        Self(entity_ref.clone())
    }
}

impl fmt::Display for ContextToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0.entity_type, self.0.id)
    }
}

impl FromStr for ContextToken {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.split('.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(entity_type), Some(id), None) if !entity_type.is_empty() && !id.is_empty() => {
                Ok(Self(EntityRef::new(entity_type, id)))
            }
            _ => Err(Error::BadRequest {
                message: "missing or malformed context".to_string(),
            }),
        }
    }
}
