//! Height field storage and summary statistics

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SitingError};
use crate::core::types::GridPosition;

/// Immutable row-major grid of elevation samples
///
/// Construction guarantees both edges meet the configured minimum and that
/// the samples are not all equal.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    samples: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainStatistics {
    pub min_height: f64,
    pub max_height: f64,
    pub mean_height: f64,
}

/// Read-only summary of a field, recomputed for each new field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainSummary {
    pub dimensions: Dimensions,
    pub statistics: TerrainStatistics,
}

impl HeightField {
    /// Build a field, rejecting mis-sized, undersized or flat grids.
    pub fn from_samples(
        width: usize,
        height: usize,
        samples: Vec<f64>,
        min_dimension: usize,
    ) -> Result<Self> {
        if width.checked_mul(height) != Some(samples.len()) {
            return Err(SitingError::SampleCount {
                width,
                height,
                actual: samples.len(),
            });
        }

        let too_small = SitingError::TooSmall {
            width,
            height,
            min: min_dimension,
        };
        if width < min_dimension || height < min_dimension {
            return Err(too_small);
        }

        let Some(&first) = samples.first() else {
            return Err(too_small);
        };
        if samples.iter().all(|&s| s == first) {
            return Err(SitingError::Degenerate { value: first });
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Elevation at column `x`, row `y` (caller guarantees bounds)
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.samples[y * self.width + x]
    }

    /// Elevation at a grid position, `None` outside the field
    pub fn elevation(&self, pos: GridPosition) -> Option<f64> {
        if self.is_in_bounds(pos) {
            Some(self.get(pos.x as usize, pos.y as usize))
        } else {
            None
        }
    }

    /// `0 <= x < width` and `0 <= y < height`
    pub fn is_in_bounds(&self, pos: GridPosition) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as u64) < self.width as u64
            && (pos.y as u64) < self.height as u64
    }

    /// Exact min/max/mean over every sample
    pub fn summarize(&self) -> TerrainSummary {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &s in &self.samples {
            min = min.min(s);
            max = max.max(s);
            sum += s;
        }

        TerrainSummary {
            dimensions: self.dimensions(),
            statistics: TerrainStatistics {
                min_height: min,
                max_height: max,
                mean_height: sum / self.samples.len() as f64,
            },
        }
    }

    /// Rows of samples, top row first
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.samples.chunks(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> HeightField {
        let samples = (0..width * height).map(|i| (i % width) as f64).collect();
        HeightField::from_samples(width, height, samples, 10).unwrap()
    }

    #[test]
    fn test_rejects_flat_field() {
        let result = HeightField::from_samples(12, 12, vec![42.0; 144], 10);
        assert!(matches!(result, Err(SitingError::Degenerate { .. })));
    }

    #[test]
    fn test_rejects_mismatched_sample_count() {
        let result = HeightField::from_samples(10, 10, vec![1.0, 2.0], 10);
        assert!(matches!(
            result,
            Err(SitingError::SampleCount { width: 10, height: 10, actual: 2 })
        ));
    }

    #[test]
    fn test_rejects_small_field_regardless_of_content() {
        let samples: Vec<f64> = (0..9 * 20).map(|i| i as f64).collect();
        let result = HeightField::from_samples(9, 20, samples, 10);
        assert!(matches!(result, Err(SitingError::TooSmall { width: 9, .. })));
    }

    #[test]
    fn test_summary_is_exact() {
        let field = ramp(10, 10);
        let summary = field.summarize();
        assert_eq!(summary.statistics.min_height, 0.0);
        assert_eq!(summary.statistics.max_height, 9.0);
        assert!((summary.statistics.mean_height - 4.5).abs() < 1e-12);
        assert_eq!(summary.dimensions, Dimensions { width: 10, height: 10 });
    }

    #[test]
    fn test_bounds_edges() {
        let field = ramp(12, 10);
        assert!(field.is_in_bounds(GridPosition::new(0, 0)));
        assert!(field.is_in_bounds(GridPosition::new(11, 9)));
        assert!(!field.is_in_bounds(GridPosition::new(12, 0)));
        assert!(!field.is_in_bounds(GridPosition::new(0, 10)));
        assert!(!field.is_in_bounds(GridPosition::new(-1, 3)));
    }

    #[test]
    fn test_elevation_lookup() {
        let field = ramp(10, 10);
        assert_eq!(field.elevation(GridPosition::new(7, 2)), Some(7.0));
        assert_eq!(field.elevation(GridPosition::new(10, 2)), None);
    }
}
