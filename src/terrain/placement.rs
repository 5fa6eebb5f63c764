//! Terrain placement checks: bounds, slope limits, elevation floor

use std::sync::Arc;

use super::height_field::HeightField;
use crate::core::config::{RuleTables, SLOPE_WINDOW};
use crate::core::types::{GridPosition, ObjectType, Point};
use crate::validation::ValidationVerdict;

const OUT_OF_BOUNDS: &str = "Position is outside the terrain bounds";

pub struct TerrainValidator {
    rules: Arc<RuleTables>,
    slope_window: usize,
}

impl TerrainValidator {
    pub fn new(rules: Arc<RuleTables>, slope_window: usize) -> Self {
        Self {
            rules,
            slope_window,
        }
    }

    /// Placement slope limit (degrees) for `object_type`
    pub fn max_allowed_slope(&self, object_type: &ObjectType) -> f64 {
        self.rules.max_slope(object_type)
    }

    /// Bounds check, then the steepest local slope against the type's limit
    pub fn validate_placement(
        &self,
        position: &Point,
        object_type: &ObjectType,
        field: &HeightField,
    ) -> ValidationVerdict {
        let Some(grid) = GridPosition::from_point(position) else {
            return ValidationVerdict::fail(
                "Error checking placement: coordinates must be finite numbers",
            );
        };

        let Some(slope) = field.slope_at(grid, self.slope_window) else {
            tracing::debug!("Placement at ({}, {}) is out of bounds", grid.x, grid.y);
            return ValidationVerdict::fail(OUT_OF_BOUNDS);
        };

        let limit = self.max_allowed_slope(object_type);
        tracing::debug!(
            "Slope {:.2} at ({}, {}) against {} limit {}",
            slope,
            grid.x,
            grid.y,
            object_type,
            limit
        );

        if slope > limit {
            return ValidationVerdict::fail(format!(
                "Slope too steep ({:.1}°) for object type {}",
                slope, object_type
            ));
        }

        ValidationVerdict::pass("Placement is valid")
    }

    /// Elevation at the position against the type profile's floor.
    ///
    /// Advisory only; not part of the accept chain.
    pub fn check_elevation(
        &self,
        position: &Point,
        object_type: &ObjectType,
        field: &HeightField,
    ) -> ValidationVerdict {
        let Some(elevation) = GridPosition::from_point(position).and_then(|g| field.elevation(g))
        else {
            return ValidationVerdict::fail(OUT_OF_BOUNDS);
        };

        let floor = self.rules.type_profile(object_type).min_elevation;
        if elevation < floor {
            return ValidationVerdict::fail(format!(
                "Elevation {:.1} is below the minimum of {} for object type {}",
                elevation, floor, object_type
            ));
        }

        ValidationVerdict::pass("Elevation is acceptable")
    }

    /// Local slope against the type profile's preferred maximum.
    ///
    /// Advisory only; the placement limit in [`Self::max_allowed_slope`] is
    /// what gates admission.
    pub fn check_profile_slope(
        &self,
        position: &Point,
        object_type: &ObjectType,
        field: &HeightField,
    ) -> ValidationVerdict {
        let Some(slope) =
            GridPosition::from_point(position).and_then(|g| field.slope_at(g, self.slope_window))
        else {
            return ValidationVerdict::fail(OUT_OF_BOUNDS);
        };

        let preferred = self.rules.type_profile(object_type).max_slope;
        if slope > preferred {
            return ValidationVerdict::fail(format!(
                "Slope {:.1}° exceeds the preferred {}° for object type {}",
                slope, preferred, object_type
            ));
        }

        ValidationVerdict::pass("Slope suits the type profile")
    }
}

impl Default for TerrainValidator {
    fn default() -> Self {
        Self::new(Arc::new(RuleTables::default()), SLOPE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat except for a steep ridge along column 15
    fn ridge_field() -> HeightField {
        let samples = (0..20 * 20)
            .map(|i| if i % 20 == 15 { 50.0 } else { 0.0 })
            .collect();
        HeightField::from_samples(20, 20, samples, 10).unwrap()
    }

    #[test]
    fn test_slope_limits_table() {
        let validator = TerrainValidator::default();
        let expected = [
            ("administrative", 5.0),
            ("residential", 7.0),
            ("industrial", 3.0),
            ("storage", 2.0),
            ("power", 10.0),
            ("communication", 15.0),
            ("research", 8.0),
            ("hydroponics", 5.0),
        ];
        for (name, limit) in expected {
            assert_eq!(validator.max_allowed_slope(&name.into()), limit, "{}", name);
        }
    }

    #[test]
    fn test_gentle_ground_accepted() {
        let verdict = TerrainValidator::default().validate_placement(
            &Point::new(5.0, 5.0),
            &"residential".into(),
            &ridge_field(),
        );
        assert!(verdict.valid, "{}", verdict.message);
    }

    #[test]
    fn test_steep_ground_rejected() {
        let verdict = TerrainValidator::default().validate_placement(
            &Point::new(14.0, 5.0),
            &"storage".into(),
            &ridge_field(),
        );
        assert!(!verdict.valid);
        assert!(verdict.message.starts_with("Slope too steep ("));
        assert!(verdict.message.ends_with("for object type storage"));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let field = ridge_field();
        let validator = TerrainValidator::default();
        for pos in [Point::new(20.0, 0.0), Point::new(0.0, 20.0), Point::new(-1.0, 3.0)] {
            let verdict = validator.validate_placement(&pos, &"power".into(), &field);
            assert_eq!(verdict, ValidationVerdict::fail(OUT_OF_BOUNDS));
        }
        // Truncation toward zero keeps -0.5 on column 0
        let verdict = validator.validate_placement(&Point::new(-0.5, 1.0), &"power".into(), &field);
        assert!(verdict.valid);
    }

    #[test]
    fn test_elevation_floor() {
        let mut rules = RuleTables::default();
        rules.default_profile.min_elevation = 10.0;
        let validator = TerrainValidator::new(Arc::new(rules), SLOPE_WINDOW);
        let field = ridge_field();

        let low = validator.check_elevation(&Point::new(2.0, 2.0), &"storage".into(), &field);
        assert!(!low.valid);
        let high = validator.check_elevation(&Point::new(15.0, 2.0), &"storage".into(), &field);
        assert!(high.valid);
        // Residential keeps its own profile floor of 0
        let res = validator.check_elevation(&Point::new(2.0, 2.0), &"residential".into(), &field);
        assert!(res.valid);
    }

    #[test]
    fn test_profile_slope_is_separate_from_limit() {
        let validator = TerrainValidator::default();
        let field = ridge_field();
        let near_ridge = Point::new(14.0, 5.0);

        // Mining prefers up to 15°, far below the ridge's pitch
        let verdict = validator.check_profile_slope(&near_ridge, &"mining".into(), &field);
        assert!(verdict.message.contains("preferred 15°"), "{}", verdict.message);

        let flat =
            validator.check_profile_slope(&Point::new(5.0, 5.0), &"spaceport".into(), &field);
        assert!(flat.valid);
    }
}
