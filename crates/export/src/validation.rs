//! Geometry validation utilities.
//!
//! `GeometryValidator` provides methods to check built buffers for
//! integrity: correct stride, in-range sequential indices, finite positions,
//! corner-aligned colors.

use crate::geometry::GeometryData;

/// Validator for `GeometryData` integrity checks.
pub struct GeometryValidator<'a> {
    geometry: &'a GeometryData,
}

impl<'a> GeometryValidator<'a> {
    /// Create a new validator for the given geometry.
    pub fn new(geometry: &'a GeometryData) -> Self {
        Self { geometry }
    }

    /// Number of vertices (positions buffer length / 3).
    pub fn vertex_count(&self) -> usize {
        self.geometry.positions.len() / 3
    }

    /// Check that the positions buffer length is a multiple of 3.
    pub fn is_stride_valid(&self) -> bool {
        self.geometry.positions.len() % 3 == 0
    }

    /// Check that there is exactly one position per index (the no-welding
    /// invariant).
    pub fn is_unwelded(&self) -> bool {
        self.vertex_count() == self.geometry.indices.len()
    }

    /// Check that indices are the sequence 0, 1, 2, ...
    pub fn are_indices_sequential(&self) -> bool {
        self.geometry
            .indices
            .iter()
            .enumerate()
            .all(|(i, &idx)| idx == i as u32)
    }

    /// Check that every position component is finite.
    pub fn are_positions_finite(&self) -> bool {
        self.geometry.positions.iter().all(|c| c.is_finite())
    }

    /// Check that the color buffer, when present, is corner-aligned with the
    /// positions buffer and holds values in 0.0..=1.0.
    pub fn are_colors_valid(&self) -> bool {
        match &self.geometry.colors {
            None => true,
            Some(colors) => {
                colors.len() == self.geometry.positions.len()
                    && colors.iter().all(|c| (0.0..=1.0).contains(c))
            }
        }
    }

    /// Run all checks, returning a message per failure.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "positions length {} is not a multiple of 3",
                self.geometry.positions.len()
            ));
        }
        if !self.is_unwelded() {
            errors.push(format!(
                "expected one position per index: {} vertices vs {} indices",
                self.vertex_count(),
                self.geometry.indices.len()
            ));
        }
        if !self.are_indices_sequential() {
            errors.push("indices are not sequential".to_string());
        }
        if !self.are_positions_finite() {
            errors.push("positions contain non-finite components".to_string());
        }
        if !self.are_colors_valid() {
            errors.push("color buffer is misaligned or out of range".to_string());
        }

        errors
    }
}
