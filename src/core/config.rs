//! Siting configuration with documented constants
//!
//! Every rule table the validators consult lives here, keyed by object type
//! string, each with an explicit fallback for types it doesn't list. A TOML
//! file may override any section; omitted sections keep their defaults.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{Result, SitingError};
use super::types::ObjectType;

/// Largest terrain upload accepted (16 MiB)
pub const MAX_PAYLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Smallest accepted height field edge, in samples
pub const MIN_DIMENSION: usize = 10;

/// Default neighbourhood size for slope analysis
pub const SLOPE_WINDOW: usize = 3;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SitingConfig {
    pub terrain: TerrainLimits,
    pub rules: RuleTables,
}

impl SitingConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SitingConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let limits = &self.terrain;

        if limits.supported_extensions.is_empty() {
            return Err(SitingError::Config(
                "supported_extensions must list at least one extension".into(),
            ));
        }
        if let Some(ext) = limits
            .supported_extensions
            .iter()
            .find(|ext| !ext.starts_with('.'))
        {
            return Err(SitingError::Config(format!(
                "extension '{}' must start with '.'",
                ext
            )));
        }
        if limits.max_payload_bytes == 0 {
            return Err(SitingError::Config("max_payload_bytes must be positive".into()));
        }
        if limits.min_dimension < 2 {
            // Slope analysis needs at least two samples per axis
            return Err(SitingError::Config(format!(
                "min_dimension ({}) must be at least 2",
                limits.min_dimension
            )));
        }
        if limits.slope_window == 0 {
            return Err(SitingError::Config("slope_window must be at least 1".into()));
        }

        let rules = &self.rules;
        let negative = rules
            .max_slope
            .values()
            .chain(rules.safety_zones.values())
            .chain(rules.min_distances.values().flat_map(|row| row.values()))
            .chain([rules.default_max_slope, rules.default_min_distance].iter())
            .any(|v| !v.is_finite() || *v < 0.0);
        if negative {
            return Err(SitingError::Config(
                "slope limits and distances must be finite and non-negative".into(),
            ));
        }

        Ok(())
    }
}

/// Limits applied to terrain uploads before and after decoding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainLimits {
    /// Accepted file name suffixes with leading dot, matched in any case
    pub supported_extensions: Vec<String>,
    /// Upload size cap, checked before decoding
    pub max_payload_bytes: usize,
    /// Minimum width and height of a decoded field
    pub min_dimension: usize,
    /// Window edge used by placement slope checks
    pub slope_window: usize,
}

impl Default for TerrainLimits {
    fn default() -> Self {
        Self {
            supported_extensions: [".jpg", ".jpeg", ".png", ".tiff"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_payload_bytes: MAX_PAYLOAD_BYTES,
            min_dimension: MIN_DIMENSION,
            slope_window: SLOPE_WINDOW,
        }
    }
}

/// Terrain profile of an object type: a slope preference and elevation floor.
///
/// Distinct from the placement slope limits in [`RuleTables::max_slope`];
/// the two tables disagree for overlapping types and are kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeProfile {
    /// Preferred maximum slope (degrees)
    pub max_slope: f64,
    /// Lowest acceptable elevation (height units)
    pub min_elevation: f64,
}

/// Per-type rule tables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleTables {
    /// Placement slope limit per type (degrees)
    pub max_slope: AHashMap<String, f64>,
    pub default_max_slope: f64,

    /// Minimum separation, keyed candidate type -> existing type
    pub min_distances: AHashMap<String, AHashMap<String, f64>>,
    pub default_min_distance: f64,

    /// Exclusion radius around existing objects of these types
    pub safety_zones: AHashMap<String, f64>,

    pub radiation_sensitive: Vec<String>,
    pub noise_sensitive: Vec<String>,

    /// Service types that should exist somewhere on the base
    pub required_nearby: AHashMap<String, Vec<String>>,

    pub type_profiles: AHashMap<String, TypeProfile>,
    pub default_profile: TypeProfile,
}

impl Default for RuleTables {
    fn default() -> Self {
        let table = |entries: &[(&str, f64)]| -> AHashMap<String, f64> {
            entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
        };
        let names = |entries: &[&str]| -> Vec<String> {
            entries.iter().map(|s| s.to_string()).collect()
        };

        let max_slope = table(&[
            ("administrative", 5.0),
            ("residential", 7.0),
            ("industrial", 3.0),
            ("storage", 2.0),
            ("power", 10.0),
            ("communication", 15.0),
            ("research", 8.0),
        ]);

        let mut min_distances = AHashMap::new();
        min_distances.insert(
            "residential".to_string(),
            table(&[("spaceport", 5000.0), ("mining", 2000.0), ("waste", 3000.0)]),
        );
        min_distances.insert(
            "spaceport".to_string(),
            table(&[("residential", 5000.0), ("medical", 4000.0)]),
        );
        min_distances.insert(
            "medical".to_string(),
            table(&[("spaceport", 4000.0), ("mining", 3000.0)]),
        );

        let safety_zones = table(&[
            ("spaceport", 5000.0),
            ("mining", 2000.0),
            ("waste", 3000.0),
            ("production", 1500.0),
        ]);

        let mut required_nearby = AHashMap::new();
        required_nearby.insert("residential".to_string(), names(&["medical", "communication"]));
        required_nearby.insert("medical".to_string(), names(&["communication"]));
        required_nearby.insert("research".to_string(), names(&["communication"]));
        required_nearby.insert("spaceport".to_string(), names(&["communication", "repair"]));

        let profile = |max_slope, min_elevation| TypeProfile {
            max_slope,
            min_elevation,
        };
        let mut type_profiles = AHashMap::new();
        type_profiles.insert("residential".to_string(), profile(5.0, 0.0));
        type_profiles.insert("spaceport".to_string(), profile(2.0, -10.0));
        type_profiles.insert("solar".to_string(), profile(10.0, -20.0));
        type_profiles.insert("mining".to_string(), profile(15.0, -50.0));

        Self {
            max_slope,
            default_max_slope: 5.0,
            min_distances,
            default_min_distance: 1000.0,
            safety_zones,
            radiation_sensitive: names(&["residential", "medical", "research"]),
            noise_sensitive: names(&["residential", "medical", "research"]),
            required_nearby,
            type_profiles,
            default_profile: profile(7.0, -20.0),
        }
    }
}

impl RuleTables {
    /// Placement slope limit for a type, falling back to the default
    pub fn max_slope(&self, object_type: &ObjectType) -> f64 {
        self.max_slope
            .get(object_type.as_str())
            .copied()
            .unwrap_or(self.default_max_slope)
    }

    /// Required separation when placing `candidate` next to an `existing` object.
    ///
    /// The lookup is directional: the candidate's row is consulted, never the
    /// existing object's.
    pub fn min_distance(&self, candidate: &ObjectType, existing: &ObjectType) -> f64 {
        self.min_distances
            .get(candidate.as_str())
            .and_then(|row| row.get(existing.as_str()))
            .copied()
            .unwrap_or(self.default_min_distance)
    }

    /// Exclusion radius around an existing object of this type, if hazardous
    pub fn safety_radius(&self, object_type: &ObjectType) -> Option<f64> {
        self.safety_zones.get(object_type.as_str()).copied()
    }

    pub fn is_radiation_sensitive(&self, object_type: &ObjectType) -> bool {
        self.radiation_sensitive
            .iter()
            .any(|t| t == object_type.as_str())
    }

    pub fn is_noise_sensitive(&self, object_type: &ObjectType) -> bool {
        self.noise_sensitive.iter().any(|t| t == object_type.as_str())
    }

    pub fn required_nearby(&self, object_type: &ObjectType) -> &[String] {
        self.required_nearby
            .get(object_type.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn type_profile(&self, object_type: &ObjectType) -> TypeProfile {
        self.type_profiles
            .get(object_type.as_str())
            .copied()
            .unwrap_or(self.default_profile)
    }
}
