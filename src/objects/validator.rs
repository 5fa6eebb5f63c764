//! Structural validation and minimum-separation checks

use serde_json::Value;
use std::sync::Arc;

use super::registry::ObjectRegistry;
use crate::core::config::RuleTables;
use crate::core::types::{ObjectType, Point};
use crate::validation::ValidationVerdict;

const REQUIRED_FIELDS: [&str; 3] = ["type", "position", "size"];

pub struct ObjectValidator {
    rules: Arc<RuleTables>,
}

impl ObjectValidator {
    pub fn new(rules: Arc<RuleTables>) -> Self {
        Self { rules }
    }

    /// Check the record's shape; the first problem found is reported
    pub fn validate_structure(&self, record: &Value) -> ValidationVerdict {
        let Some(fields) = record.as_object() else {
            return ValidationVerdict::fail("Object record must be a JSON object");
        };

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|f| !fields.contains_key(**f)) {
            return ValidationVerdict::fail(format!("Missing required field: {}", missing));
        }

        if !fields["type"].is_string() {
            return ValidationVerdict::fail("Object type must be a string");
        }

        let position = &fields["position"];
        let coordinate_ok = |axis: &str| position.get(axis).is_some_and(Value::is_number);
        if !position.is_object() || !coordinate_ok("x") || !coordinate_ok("y") {
            return ValidationVerdict::fail("Position must contain numeric x and y coordinates");
        }
        if position.get("z").is_some_and(|z| !z.is_null() && !z.is_number()) {
            return ValidationVerdict::fail("Position z coordinate must be a number");
        }

        match fields["size"].as_f64() {
            Some(size) if size > 0.0 => ValidationVerdict::pass("Object structure is valid"),
            _ => ValidationVerdict::fail("Size must be a positive number"),
        }
    }

    /// Euclidean distance over the components both points share
    pub fn distance_between(p1: &Point, p2: &Point) -> f64 {
        p1.distance(p2)
    }

    /// Minimum separation from every accepted object; first violation wins
    pub fn check_distance_requirements(
        &self,
        object_type: &ObjectType,
        position: &Point,
        registry: &ObjectRegistry,
    ) -> ValidationVerdict {
        for (id, existing) in registry.iter() {
            let required = self.rules.min_distance(object_type, &existing.object_type);
            let actual = Self::distance_between(position, &existing.position);

            if actual < required {
                tracing::debug!(
                    "{} at {:.1} from {} #{} (needs {})",
                    object_type,
                    actual,
                    existing.object_type,
                    id,
                    required
                );
                return ValidationVerdict::fail(format!(
                    "Too close to {} object (ID: {}). Minimum distance: {}m, Actual distance: {:.1}m",
                    existing.object_type, id, required, actual
                ));
            }
        }

        ValidationVerdict::pass("Distance requirements met")
    }

    /// Required service types with no accepted instance yet
    pub fn missing_nearby(
        &self,
        object_type: &ObjectType,
        registry: &ObjectRegistry,
    ) -> Vec<ObjectType> {
        self.rules
            .required_nearby(object_type)
            .iter()
            .map(|name| ObjectType::from(name.as_str()))
            .filter(|service| !registry.contains_type(service))
            .collect()
    }
}

impl Default for ObjectValidator {
    fn default() -> Self {
        Self::new(Arc::new(RuleTables::default()))
    }
}
