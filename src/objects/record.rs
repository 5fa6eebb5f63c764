//! Object records as submitted by callers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::types::{ObjectType, Point};

/// Why a raw record could not be turned into a [`LunarObject`]
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    #[error("size must be positive, got {0}")]
    NonPositiveSize(f64),
}

/// A candidate or accepted infrastructure object
///
/// Fields other than `type`, `position` and `size` are carried in `extra`
/// untouched and serialized back alongside the known ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunarObject {
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    pub position: Point,
    pub size: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LunarObject {
    pub fn new(object_type: impl Into<ObjectType>, position: Point, size: f64) -> Self {
        Self {
            object_type: object_type.into(),
            position,
            size,
            extra: Map::new(),
        }
    }

    /// Decode a raw JSON record
    pub fn from_value(record: &Value) -> Result<Self, RecordError> {
        let object: LunarObject = serde_json::from_value(record.clone())?;
        if object.size.is_nan() || object.size <= 0.0 {
            return Err(RecordError::NonPositiveSize(object.size));
        }
        Ok(object)
    }

    pub fn placement(&self) -> Placement {
        Placement {
            object_type: self.object_type.clone(),
            position: self.position,
        }
    }
}

/// Where a record wants to go and what it is.
///
/// Terrain and safety checks read nothing else, so a record with a bad
/// `size` can still be placed and analysed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Placement {
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    pub position: Point,
}

impl Placement {
    pub fn from_value(record: &Value) -> Result<Self, RecordError> {
        Ok(Placement::deserialize(record)?)
    }
}
