//! Safety analysis: exclusion zones and sensitivity gates

use std::sync::Arc;

use crate::core::config::RuleTables;
use crate::core::types::{ObjectType, Point};
use crate::objects::{ObjectRegistry, ObjectValidator, Placement};
use crate::terrain::HeightField;
use crate::validation::ValidationVerdict;

pub struct SafetyAnalyzer {
    rules: Arc<RuleTables>,
}

impl SafetyAnalyzer {
    pub fn new(rules: Arc<RuleTables>) -> Self {
        Self { rules }
    }

    /// Zones first, then radiation and noise for sensitive types.
    ///
    /// Returns the first failing verdict.
    pub fn analyze_safety(
        &self,
        placement: &Placement,
        registry: &ObjectRegistry,
        terrain: &HeightField,
    ) -> ValidationVerdict {
        let object_type = &placement.object_type;
        let position = &placement.position;

        let zones = self.check_safety_zones(object_type, position, registry);
        if !zones.valid {
            return zones;
        }

        if self.rules.is_radiation_sensitive(object_type) {
            let radiation = self.check_radiation_safety(position, registry, terrain);
            if !radiation.valid {
                return radiation;
            }
        }

        if self.rules.is_noise_sensitive(object_type) {
            let noise = self.check_noise_safety(position, registry);
            if !noise.valid {
                return noise;
            }
        }

        ValidationVerdict::pass("Safety checks passed")
    }

    /// Exclusion radius of each hazardous existing object.
    ///
    /// Only the existing object's type matters; the candidate's type is
    /// accepted for symmetry with the other checks. Standing exactly on the
    /// radius is allowed.
    pub fn check_safety_zones(
        &self,
        _object_type: &ObjectType,
        position: &Point,
        registry: &ObjectRegistry,
    ) -> ValidationVerdict {
        for (id, existing) in registry.iter() {
            let Some(radius) = self.rules.safety_radius(&existing.object_type) else {
                continue;
            };

            let distance = ObjectValidator::distance_between(position, &existing.position);
            if distance < radius {
                tracing::debug!(
                    "Inside {} zone of #{} ({:.1} < {})",
                    existing.object_type,
                    id,
                    distance,
                    radius
                );
                return ValidationVerdict::fail(format!(
                    "Position is within safety zone of {} (ID: {}). Required distance: {}m",
                    existing.object_type, id, radius
                ));
            }
        }

        ValidationVerdict::pass("Safety zones check passed")
    }

    /// Radiation exposure check. Always passes until a dose model exists.
    pub fn check_radiation_safety(
        &self,
        _position: &Point,
        _registry: &ObjectRegistry,
        _terrain: &HeightField,
    ) -> ValidationVerdict {
        ValidationVerdict::pass("Radiation safety check passed")
    }

    /// Noise exposure check. Always passes until an acoustic model exists.
    pub fn check_noise_safety(
        &self,
        _position: &Point,
        _registry: &ObjectRegistry,
    ) -> ValidationVerdict {
        ValidationVerdict::pass("Noise safety check passed")
    }
}

impl Default for SafetyAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(RuleTables::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::LunarObject;

    fn terrain() -> HeightField {
        let samples = (0..100).map(|i| (i / 10) as f64).collect();
        HeightField::from_samples(10, 10, samples, 10).unwrap()
    }

    fn spaceport_at_origin() -> ObjectRegistry {
        let mut registry = ObjectRegistry::new();
        registry.insert(LunarObject::new("spaceport", Point::new(0.0, 0.0), 10.0));
        registry
    }

    #[test]
    fn test_inside_spaceport_zone() {
        let verdict = SafetyAnalyzer::default().check_safety_zones(
            &"power".into(),
            &Point::new(4999.0, 0.0),
            &spaceport_at_origin(),
        );
        assert_eq!(
            verdict.message,
            "Position is within safety zone of spaceport (ID: 1). Required distance: 5000m"
        );
    }

    #[test]
    fn test_zone_boundary_is_legal() {
        let verdict = SafetyAnalyzer::default().check_safety_zones(
            &"power".into(),
            &Point::new(3000.0, 4000.0),
            &spaceport_at_origin(),
        );
        assert!(verdict.valid);
    }

    #[test]
    fn test_non_hazardous_objects_have_no_zone() {
        let mut registry = ObjectRegistry::new();
        registry.insert(LunarObject::new("residential", Point::new(0.0, 0.0), 1.0));
        let verdict = SafetyAnalyzer::default().check_safety_zones(
            &"mining".into(),
            &Point::new(0.0, 0.0),
            &registry,
        );
        assert!(verdict.valid);
    }

    #[test]
    fn test_stubs_always_pass() {
        let analyzer = SafetyAnalyzer::default();
        let registry = spaceport_at_origin();
        let field = terrain();
        let here = Point::new(1.0, 1.0);

        assert!(analyzer.check_radiation_safety(&here, &registry, &field).valid);
        assert!(analyzer.check_noise_safety(&here, &registry).valid);
    }

    #[test]
    fn test_analyze_short_circuits_on_zone() {
        let analyzer = SafetyAnalyzer::default();
        let candidate = LunarObject::new("medical", Point::new(10.0, 10.0), 1.0).placement();
        let verdict = analyzer.analyze_safety(&candidate, &spaceport_at_origin(), &terrain());
        assert!(!verdict.valid);
        assert!(verdict.message.starts_with("Position is within safety zone of spaceport"));

        let verdict = analyzer.analyze_safety(&candidate, &ObjectRegistry::new(), &terrain());
        assert_eq!(verdict, ValidationVerdict::pass("Safety checks passed"));
    }
}
