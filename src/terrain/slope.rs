//! Slope analysis over height field neighbourhoods

use super::height_field::HeightField;
use crate::core::types::{GridPosition, Point};

/// Offsets of the 8-neighbourhood, row by row
const NEIGHBOUR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Discrete derivative of `values[i]` along a line of samples.
///
/// Central difference inside, one-sided at both ends, zero when the line has
/// a single sample.
fn derivative(len: usize, i: usize, value: impl Fn(usize) -> f64) -> f64 {
    if len < 2 {
        0.0
    } else if i == 0 {
        value(1) - value(0)
    } else if i == len - 1 {
        value(len - 1) - value(len - 2)
    } else {
        (value(i + 1) - value(i - 1)) / 2.0
    }
}

impl HeightField {
    /// Steepest local slope (degrees) in a `window_size` square around `pos`.
    ///
    /// The window is clamped at the field edges, so positions near a border
    /// see a smaller window. Gradients are taken within the window only. The
    /// maximum over the window is returned, not the mean.
    ///
    /// Returns `None` when `pos` lies outside the field.
    pub fn slope_at(&self, pos: GridPosition, window_size: usize) -> Option<f64> {
        if !self.is_in_bounds(pos) {
            return None;
        }

        let half = i64::try_from(window_size / 2).unwrap_or(i64::MAX);
        let x0 = pos.x.saturating_sub(half).max(0) as usize;
        let x1 = pos.x.saturating_add(half).saturating_add(1).min(self.width() as i64) as usize;
        let y0 = pos.y.saturating_sub(half).max(0) as usize;
        let y1 = pos.y.saturating_add(half).saturating_add(1).min(self.height() as i64) as usize;

        let cols = x1 - x0;
        let rows = y1 - y0;
        let mut steepest = 0.0_f64;

        for row in 0..rows {
            for col in 0..cols {
                let gx = derivative(cols, col, |c| self.get(x0 + c, y0 + row));
                let gy = derivative(rows, row, |r| self.get(x0 + col, y0 + r));
                let slope = (gx * gx + gy * gy).sqrt().atan().to_degrees();
                steepest = steepest.max(slope);
            }
        }

        Some(steepest)
    }

    /// In-bounds 8-neighbours of `pos` as 3-D points (z = elevation)
    pub fn surrounding_points(&self, pos: GridPosition) -> Vec<Point> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|(dx, dy)| GridPosition::new(pos.x + dx, pos.y + dy))
            .filter_map(|p| {
                self.elevation(p)
                    .map(|z| Point::with_z(p.x as f64, p.y as f64, z))
            })
            .collect()
    }

    /// Largest absolute point-to-point slope from `pos` to any neighbour
    pub fn steepest_neighbour_slope(&self, pos: GridPosition) -> Option<f64> {
        let z = self.elevation(pos)?;
        let centre = Point::with_z(pos.x as f64, pos.y as f64, z);
        self.surrounding_points(pos)
            .iter()
            .map(|p| slope_between(&centre, p).abs())
            .reduce(f64::max)
    }
}

/// Slope (degrees) climbing from `a` to `b`.
///
/// Missing z counts as 0. Points sharing a horizontal location give 0.
pub fn slope_between(a: &Point, b: &Point) -> f64 {
    let horizontal = a.horizontal().distance(b.horizontal());
    if horizontal == 0.0 {
        return 0.0;
    }
    let dz = b.z.unwrap_or(0.0) - a.z.unwrap_or(0.0);
    dz.atan2(horizontal).to_degrees()
}
