//! Core type definitions used throughout the codebase

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to an object when it is accepted into the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Object type key (open set)
///
/// Used as a lookup key into the rule tables. Types the tables don't list
/// fall back to the table's default instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectType(String);

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectType {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ObjectType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Integral grid coordinate for terrain queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i64,
    pub y: i64,
}

impl GridPosition {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Truncate a continuous point toward zero.
    ///
    /// Returns `None` for non-finite coordinates.
    pub fn from_point(point: &Point) -> Option<Self> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        Some(Self::new(point.x.trunc() as i64, point.y.trunc() as i64))
    }
}

/// Continuous position of an object (z is optional)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    pub fn horizontal(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance over the components both points carry.
    ///
    /// Two 3-D points are compared in 3-D; anything else in the plane.
    pub fn distance(&self, other: &Self) -> f64 {
        match (self.z, other.z) {
            (Some(z1), Some(z2)) => {
                DVec3::new(self.x, self.y, z1).distance(DVec3::new(other.x, other.y, z2))
            }
            _ => self.horizontal().distance(other.horizontal()),
        }
    }
}
