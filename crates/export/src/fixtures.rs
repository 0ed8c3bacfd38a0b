//! Factory functions for creating test polyhedra.
//!
//! Used by unit and integration tests across the crate; also handy for
//! exercising the exporter from a harness without a CAD kernel.

use shared::{IndexedPolyhedron, Point3};

pub fn p3(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

/// A single triangular face in the XY plane, no colors, no lines.
pub fn single_triangle() -> IndexedPolyhedron {
    IndexedPolyhedron::new(
        vec![p3(0.0, 0.0, 0.0), p3(1.0, 0.0, 0.0), p3(0.0, 1.0, 0.0)],
        vec![vec![0, 1, 2]],
    )
}

/// A unit cube as 8 vertices and 6 quad faces (outward winding).
pub fn unit_cube() -> IndexedPolyhedron {
    IndexedPolyhedron::new(
        vec![
            p3(0.0, 0.0, 0.0),
            p3(1.0, 0.0, 0.0),
            p3(1.0, 1.0, 0.0),
            p3(0.0, 1.0, 0.0),
            p3(0.0, 0.0, 1.0),
            p3(1.0, 0.0, 1.0),
            p3(1.0, 1.0, 1.0),
            p3(0.0, 1.0, 1.0),
        ],
        vec![
            vec![0, 3, 2, 1], // bottom
            vec![4, 5, 6, 7], // top
            vec![0, 1, 5, 4], // front
            vec![1, 2, 6, 5], // right
            vec![2, 3, 7, 6], // back
            vec![3, 0, 4, 7], // left
        ],
    )
}

/// One red quad face with an explicit per-face color.
pub fn colored_quad() -> IndexedPolyhedron {
    let mut poly = IndexedPolyhedron::new(
        vec![
            p3(0.0, 0.0, 0.0),
            p3(1.0, 0.0, 0.0),
            p3(1.0, 1.0, 0.0),
            p3(0.0, 1.0, 0.0),
        ],
        vec![vec![0, 1, 2, 3]],
    );
    poly.colors = Some(vec![[0.8, 0.1, 0.1]]);
    poly
}

/// No faces, no lines: exercises the degenerate point fallback.
pub fn empty_polyhedron() -> IndexedPolyhedron {
    IndexedPolyhedron::default()
}

/// Two independent line segments (4 points), no faces.
pub fn segments_only() -> IndexedPolyhedron {
    let mut poly = IndexedPolyhedron::default();
    poly.lines = Some(vec![
        p3(0.0, 0.0, 0.0),
        p3(1.0, 0.0, 0.0),
        p3(0.0, 1.0, 0.0),
        p3(0.0, 1.0, 1.0),
    ]);
    poly
}

/// A triangle surface plus two line segments, for mixed-scene tests.
pub fn triangle_with_segments() -> IndexedPolyhedron {
    let mut poly = single_triangle();
    poly.lines = segments_only().lines;
    poly
}

/// Imperfect kernel output: one clean triangle, one face with an out-of-range
/// index, one face with a NaN vertex, one degenerate two-index face.
pub fn broken_polyhedron() -> IndexedPolyhedron {
    IndexedPolyhedron::new(
        vec![
            p3(0.0, 0.0, 0.0),
            p3(1.0, 0.0, 0.0),
            p3(0.0, 1.0, 0.0),
            p3(f64::NAN, 0.0, 0.0),
        ],
        vec![
            vec![0, 1, 2],  // clean
            vec![0, 1, 99], // index out of range
            vec![0, 1, 3],  // NaN vertex
            vec![0, 1],     // degenerate
        ],
    )
}
