pub mod config;
pub mod error;
pub mod types;

pub use config::{RuleTables, SitingConfig, TerrainLimits, TypeProfile};
pub use error::{Result, SitingError};
pub use types::{GridPosition, ObjectId, ObjectType, Point};
