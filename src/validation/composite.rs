//! Composite engine that chains the object, terrain and safety checks

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::ValidationVerdict;
use crate::core::config::{SitingConfig, TerrainLimits};
use crate::core::error::Result;
use crate::core::types::{GridPosition, ObjectType};
use crate::objects::{LunarObject, ObjectRegistry, ObjectValidator, Placement};
use crate::safety::SafetyAnalyzer;
use crate::terrain::{load_from_image, HeightField, TerrainValidator};

/// Per-stage verdicts of a dry run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerdictSet {
    pub object: ValidationVerdict,
    pub terrain: ValidationVerdict,
    pub safety: ValidationVerdict,
}

/// Non-blocking observations attached to a dry run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    LowElevation { message: String },
    SteepForProfile { message: String },
    MissingService { service: ObjectType },
}

/// Result of running every stage on one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub message: String,
    pub results: VerdictSet,
    pub advisories: Vec<Advisory>,
}

impl ValidationReport {
    fn new(results: VerdictSet, advisories: Vec<Advisory>) -> Self {
        let overall = ValidationVerdict::combine(
            [&results.object, &results.terrain, &results.safety],
            "Validation successful",
        );
        Self {
            valid: overall.valid,
            message: overall.message,
            results,
            advisories,
        }
    }
}

/// The three validators sharing one set of rule tables.
///
/// The engine holds no terrain or registry of its own; both are passed in on
/// every call and the registry is never mutated here.
pub struct SitingEngine {
    limits: TerrainLimits,
    objects: ObjectValidator,
    terrain: TerrainValidator,
    safety: SafetyAnalyzer,
}

impl SitingEngine {
    pub fn new(config: SitingConfig) -> Self {
        let SitingConfig { terrain, rules } = config;
        let rules = Arc::new(rules);
        Self {
            objects: ObjectValidator::new(Arc::clone(&rules)),
            terrain: TerrainValidator::new(Arc::clone(&rules), terrain.slope_window),
            safety: SafetyAnalyzer::new(rules),
            limits: terrain,
        }
    }

    pub fn object_validator(&self) -> &ObjectValidator {
        &self.objects
    }

    pub fn terrain_validator(&self) -> &TerrainValidator {
        &self.terrain
    }

    pub fn safety_analyzer(&self) -> &SafetyAnalyzer {
        &self.safety
    }

    /// Decode a terrain upload under this engine's limits
    pub fn load_terrain(&self, bytes: &[u8], filename: &str) -> Result<HeightField> {
        load_from_image(bytes, filename, &self.limits)
    }

    /// Structure, then separation from accepted objects
    pub fn validate_object(&self, record: &Value, registry: &ObjectRegistry) -> ValidationVerdict {
        let structure = self.objects.validate_structure(record);
        if !structure.valid {
            return structure;
        }

        match LunarObject::from_value(record) {
            Ok(object) => self.objects.check_distance_requirements(
                &object.object_type,
                &object.position,
                registry,
            ),
            Err(e) => ValidationVerdict::fail(format!("Error validating object: {}", e)),
        }
    }

    /// Run every stage and aggregate, without short-circuiting
    pub fn validate_all(
        &self,
        record: &Value,
        registry: &ObjectRegistry,
        field: &HeightField,
    ) -> ValidationReport {
        let object = self.validate_object(record, registry);

        // Only type and position feed the terrain and safety stages
        let (terrain, safety, advisories) = match Placement::from_value(record) {
            Ok(candidate) => (
                self.terrain.validate_placement(
                    &candidate.position,
                    &candidate.object_type,
                    field,
                ),
                self.safety.analyze_safety(&candidate, registry, field),
                self.advisories(&candidate, registry, field),
            ),
            Err(e) => (
                ValidationVerdict::fail(format!("Error checking placement: {}", e)),
                ValidationVerdict::fail(format!("Error analyzing safety: {}", e)),
                Vec::new(),
            ),
        };

        let report = ValidationReport::new(
            VerdictSet {
                object,
                terrain,
                safety,
            },
            advisories,
        );
        tracing::debug!("Dry run: valid={} ({})", report.valid, report.message);
        report
    }

    /// Chained admission check, stopping at the first failing stage.
    ///
    /// On success the decoded object is handed back for the caller to commit
    /// with [`ObjectRegistry::insert`].
    pub fn evaluate(
        &self,
        record: &Value,
        registry: &ObjectRegistry,
        field: &HeightField,
    ) -> std::result::Result<LunarObject, ValidationVerdict> {
        let verdict = self.validate_object(record, registry);
        if !verdict.valid {
            tracing::warn!("Object rejected: {}", verdict.message);
            return Err(verdict);
        }

        let candidate = LunarObject::from_value(record)
            .map_err(|e| ValidationVerdict::fail(format!("Error validating object: {}", e)))?;

        let verdict = self
            .terrain
            .validate_placement(&candidate.position, &candidate.object_type, field);
        if !verdict.valid {
            tracing::warn!("Placement rejected: {}", verdict.message);
            return Err(verdict);
        }

        let verdict = self
            .safety
            .analyze_safety(&candidate.placement(), registry, field);
        if !verdict.valid {
            tracing::warn!("Safety rejected: {}", verdict.message);
            return Err(verdict);
        }

        Ok(candidate)
    }

    fn advisories(
        &self,
        candidate: &Placement,
        registry: &ObjectRegistry,
        field: &HeightField,
    ) -> Vec<Advisory> {
        let mut advisories = Vec::new();

        // Off-field positions already fail placement; no terrain notes for them
        let on_field =
            GridPosition::from_point(&candidate.position).is_some_and(|g| field.is_in_bounds(g));
        if on_field {
            let elevation = self
                .terrain
                .check_elevation(&candidate.position, &candidate.object_type, field);
            if !elevation.valid {
                advisories.push(Advisory::LowElevation {
                    message: elevation.message,
                });
            }

            let slope = self
                .terrain
                .check_profile_slope(&candidate.position, &candidate.object_type, field);
            if !slope.valid {
                advisories.push(Advisory::SteepForProfile {
                    message: slope.message,
                });
            }
        }

        advisories.extend(
            self.objects
                .missing_nearby(&candidate.object_type, registry)
                .into_iter()
                .map(|service| Advisory::MissingService { service }),
        );

        advisories
    }
}

impl Default for SitingEngine {
    fn default() -> Self {
        Self::new(SitingConfig::default())
    }
}
