//! Flat geometry buffer construction from an indexed polyhedron.
//!
//! Produces the corner-per-corner buffers the scene assembler packs into the
//! glTF binary payload. Corners are never welded: every triangle owns three
//! unique position entries even when geometrically coincident with another's,
//! so indices are strictly sequential. Kernel output is often imperfect near
//! boundaries; anything malformed drops the offending triangle or segment and
//! the export carries on with what survived.

use glam::DVec3;
use shared::{IndexedPolyhedron, Point3, Rgb};

use crate::normalize::convert_point;
use crate::triangulate::fan_triangulate;

/// Color applied to faces when the polyhedron carries none: opaque white.
pub const DEFAULT_COLOR: Rgb = [1.0, 1.0, 1.0];

/// Flat buffers for one drawable geometry.
///
/// Invariant: `positions.len() / 3 == indices.len()` (one position per index,
/// no welding). `colors`, when present, has the same corner count as
/// `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    /// Flat position triples, one per triangle corner (or line endpoint).
    pub positions: Vec<f32>,
    /// Sequential indices: 0, 1, 2, ...
    pub indices: Vec<u32>,
    /// Flat color triples, corner-aligned with `positions`. `Some` for
    /// surfaces, `None` for lines.
    pub colors: Option<Vec<f32>>,
}

impl GeometryData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True for the degenerate single-point substitute emitted when a surface
    /// ends up with zero triangles.
    pub fn is_point_fallback(&self) -> bool {
        self.indices.len() == 1
    }
}

fn to_dvec3(p: &Point3) -> DVec3 {
    DVec3::new(p.x, p.y, p.z)
}

fn face_color(poly: &IndexedPolyhedron, face_idx: usize) -> Rgb {
    poly.colors
        .as_ref()
        .and_then(|colors| colors.get(face_idx))
        .copied()
        .unwrap_or(DEFAULT_COLOR)
}

/// Triangulate the polyhedron's faces into flat surface buffers.
///
/// Faces are visited in original order; each fan triangle appends three
/// normalized corners, three copies of the face color, and three sequential
/// indices. A triangle referencing an out-of-range vertex or a non-finite
/// coordinate is dropped whole. If nothing survives, a single-point fallback
/// at the origin is substituted so the document always contains one valid
/// primitive.
pub fn build_surface(poly: &IndexedPolyhedron, normalize: bool) -> GeometryData {
    let mut positions: Vec<f32> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut colors: Vec<f32> = Vec::new();
    let mut dropped = 0usize;

    for (face_idx, face) in poly.faces.iter().enumerate() {
        let color = face_color(poly, face_idx);

        for tri in fan_triangulate(face) {
            let mut corners = [DVec3::ZERO; 3];
            let mut valid = true;

            for (slot, &vi) in tri.iter().enumerate() {
                match poly.vertices.get(vi as usize) {
                    Some(p) => {
                        let p = convert_point(to_dvec3(p), normalize);
                        if !p.is_finite() {
                            valid = false;
                            break;
                        }
                        corners[slot] = p;
                    }
                    None => {
                        valid = false;
                        break;
                    }
                }
            }

            if !valid {
                dropped += 1;
                continue;
            }

            for p in corners {
                indices.push((positions.len() / 3) as u32);
                positions.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
                colors.extend_from_slice(&color);
            }
        }
    }

    if dropped > 0 {
        tracing::warn!(
            "build_surface: dropped {} malformed triangle(s), kept {}",
            dropped,
            indices.len() / 3
        );
    }

    if indices.is_empty() {
        // Degenerate single-point substitute: keeps the document valid even
        // for an empty or fully-malformed surface.
        tracing::warn!("build_surface: no triangles survived, emitting point fallback");
        positions.extend_from_slice(&[0.0, 0.0, 0.0]);
        colors.extend_from_slice(&DEFAULT_COLOR);
        indices.push(0);
    }

    GeometryData {
        positions,
        indices,
        colors: Some(colors),
    }
}

/// Build the independent wireframe buffers from the polyhedron's `lines`.
///
/// Each consecutive point pair is one segment; a trailing unpaired point is
/// dropped, as is any segment with a non-finite endpoint. Returns `None` when
/// no segment survives — the scene then simply has no line node.
pub fn build_lines(poly: &IndexedPolyhedron, normalize: bool) -> Option<GeometryData> {
    let points = poly.lines.as_ref()?;
    if points.len() < 2 {
        return None;
    }

    let mut positions: Vec<f32> = Vec::with_capacity(points.len() * 3);
    let mut indices: Vec<u32> = Vec::with_capacity(points.len());
    let mut dropped = 0usize;

    for pair in points.chunks_exact(2) {
        let a = convert_point(to_dvec3(&pair[0]), normalize);
        let b = convert_point(to_dvec3(&pair[1]), normalize);

        if !a.is_finite() || !b.is_finite() {
            dropped += 1;
            continue;
        }

        for p in [a, b] {
            indices.push((positions.len() / 3) as u32);
            positions.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        }
    }

    if dropped > 0 {
        tracing::warn!(
            "build_lines: dropped {} malformed segment(s), kept {}",
            dropped,
            indices.len() / 2
        );
    }

    if indices.is_empty() {
        return None;
    }

    Some(GeometryData {
        positions,
        indices,
        colors: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn single_triangle_buffers() {
        let geo = build_surface(&single_triangle(), false);
        assert_eq!(geo.positions, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(geo.indices, vec![0, 1, 2]);
        assert_eq!(geo.colors.as_deref(), Some(&[1.0f32; 9][..]));
    }

    #[test]
    fn no_welding_one_position_per_index() {
        for poly in [single_triangle(), unit_cube(), colored_quad()] {
            let geo = build_surface(&poly, true);
            assert_eq!(geo.positions.len() / 3, geo.indices.len());
        }
    }

    #[test]
    fn cube_quads_fan_to_twelve_triangles() {
        let geo = build_surface(&unit_cube(), false);
        assert_eq!(geo.triangle_count(), 12);
        assert_eq!(geo.vertex_count(), 36);
        // Sequential indices, since nothing is shared.
        let expected: Vec<u32> = (0..36).collect();
        assert_eq!(geo.indices, expected);
    }

    #[test]
    fn face_color_repeats_per_corner() {
        let geo = build_surface(&colored_quad(), false);
        let colors = geo.colors.unwrap();
        // One quad -> 2 triangles -> 6 corners, all carrying the face color.
        assert_eq!(colors.len(), 18);
        for corner in colors.chunks(3) {
            assert_eq!(corner, [0.8, 0.1, 0.1]);
        }
    }

    #[test]
    fn malformed_triangles_are_dropped_whole() {
        let geo = build_surface(&broken_polyhedron(), false);
        // Only the one clean face survives.
        assert_eq!(geo.triangle_count(), 1);
        assert_eq!(geo.positions.len() / 3, geo.indices.len());
    }

    #[test]
    fn empty_surface_gets_point_fallback() {
        let geo = build_surface(&empty_polyhedron(), true);
        assert!(geo.is_point_fallback());
        assert_eq!(geo.positions, vec![0.0, 0.0, 0.0]);
        assert_eq!(geo.indices, vec![0]);
        assert_eq!(geo.colors.as_deref(), Some(&DEFAULT_COLOR[..]));
    }

    #[test]
    fn two_segments_make_four_sequential_indices() {
        let geo = build_lines(&segments_only(), false).unwrap();
        assert_eq!(geo.indices, vec![0, 1, 2, 3]);
        assert_eq!(geo.vertex_count(), 4);
        assert!(geo.colors.is_none());
    }

    #[test]
    fn trailing_unpaired_point_is_dropped() {
        let mut poly = segments_only();
        poly.lines.as_mut().unwrap().push(shared::Point3::new(9.0, 9.0, 9.0));
        let geo = build_lines(&poly, false).unwrap();
        assert_eq!(geo.vertex_count(), 4);
    }

    #[test]
    fn absent_or_degenerate_lines_yield_none() {
        assert!(build_lines(&single_triangle(), false).is_none());

        let mut poly = empty_polyhedron();
        poly.lines = Some(vec![shared::Point3::new(0.0, 0.0, 0.0)]);
        assert!(build_lines(&poly, false).is_none());
    }

    #[test]
    fn non_finite_segment_is_dropped() {
        let mut poly = segments_only();
        poly.lines.as_mut().unwrap()[1] = shared::Point3::new(f64::NAN, 0.0, 0.0);
        let geo = build_lines(&poly, false).unwrap();
        // First segment gone, second intact and re-indexed from zero.
        assert_eq!(geo.indices, vec![0, 1]);
        assert_eq!(geo.vertex_count(), 2);
    }
}
