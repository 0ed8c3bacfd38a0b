//! Shared mesh data model.
//!
//! `IndexedPolyhedron` is the contract between the CAD-kernel adapter (which
//! produces it) and the export engine (which consumes it). The types are plain
//! serde structs so the same description can travel over a socket or be built
//! in-process.

use serde::{Deserialize, Serialize};

/// One 3D point in kernel coordinates (Z-up, millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Per-face color triple (linear RGB, 0.0..=1.0).
pub type Rgb = [f32; 3];

/// Indexed-polyhedron mesh description as emitted by the CAD kernel.
///
/// Faces are arbitrary polygons (index lists into `vertices`, winding defines
/// the outward normal). Kernel output is frequently imperfect near boundaries:
/// faces with fewer than 3 indices, out-of-range indices, and non-finite
/// coordinates are all possible and are recovered from downstream, never
/// rejected here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexedPolyhedron {
    /// Ordered vertex positions.
    pub vertices: Vec<Point3>,
    /// Ordered polygon faces, each a list of indices into `vertices`.
    pub faces: Vec<Vec<u32>>,
    /// Optional per-face colors, index-aligned with `faces`.
    /// Absent entries render opaque white.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<Rgb>>,
    /// Optional wireframe points; each consecutive pair is one independent
    /// segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<Point3>>,
}

impl IndexedPolyhedron {
    pub fn new(vertices: Vec<Point3>, faces: Vec<Vec<u32>>) -> Self {
        Self {
            vertices,
            faces,
            colors: None,
            lines: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True when the polyhedron carries at least one full line segment.
    pub fn has_lines(&self) -> bool {
        self.lines.as_ref().is_some_and(|pts| pts.len() >= 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default_to_none() {
        let json = r#"{"vertices":[{"x":0.0,"y":0.0,"z":0.0}],"faces":[]}"#;
        let poly: IndexedPolyhedron = serde_json::from_str(json).unwrap();
        assert_eq!(poly.vertex_count(), 1);
        assert!(poly.colors.is_none());
        assert!(poly.lines.is_none());
        assert!(!poly.has_lines());
    }

    #[test]
    fn round_trips_through_json() {
        let poly = IndexedPolyhedron {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            faces: vec![vec![0, 1, 2]],
            colors: Some(vec![[1.0, 0.0, 0.0]]),
            lines: Some(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)]),
        };

        let json = serde_json::to_string(&poly).unwrap();
        let back: IndexedPolyhedron = serde_json::from_str(&json).unwrap();
        assert_eq!(back, poly);
        assert!(back.has_lines());
    }

    #[test]
    fn single_point_is_not_a_line() {
        let mut poly = IndexedPolyhedron::default();
        poly.lines = Some(vec![Point3::new(0.0, 0.0, 0.0)]);
        assert!(!poly.has_lines());
    }
}
