//! Luna Siting - terrain and safety validation for lunar base infrastructure

pub mod core;
pub mod objects;
pub mod safety;
pub mod terrain;
pub mod validation;

pub use crate::core::{ObjectId, ObjectType, Point, SitingConfig, SitingError};
pub use objects::{LunarObject, ObjectRegistry};
pub use validation::{SitingEngine, ValidationReport, ValidationVerdict};
