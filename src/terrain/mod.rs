//! Terrain model: height field decoding, geometry queries, placement checks

mod height_field;
mod loader;
mod placement;
mod slope;

pub use height_field::{Dimensions, HeightField, TerrainStatistics, TerrainSummary};
pub use loader::{has_supported_extension, load_from_image, TerrainUpload};
pub use placement::TerrainValidator;
pub use slope::slope_between;
