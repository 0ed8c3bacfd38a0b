//! Fan triangulation of polygon faces.

/// Split one n-gon face into n−2 triangles anchored at the first vertex:
/// `triangle_i = (v0, v_i, v_{i+1})` for `i = 1..n-1`.
///
/// Faces with fewer than 3 indices produce no triangles (skipped, never an
/// error). Correct only for convex planar polygons; a concave face comes out
/// visually wrong rather than failing.
pub fn fan_triangulate(face: &[u32]) -> Vec<[u32; 3]> {
    if face.len() < 3 {
        return Vec::new();
    }

    let mut triangles = Vec::with_capacity(face.len() - 2);
    for i in 1..face.len() - 1 {
        triangles.push([face[0], face[i], face[i + 1]]);
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn triangle_passes_through() {
        assert_eq!(fan_triangulate(&[4, 7, 9]), vec![[4, 7, 9]]);
    }

    #[test]
    fn quad_splits_into_two() {
        assert_eq!(fan_triangulate(&[0, 1, 2, 3]), vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn ngon_yields_n_minus_two_triangles_over_same_indices() {
        for n in 3..12u32 {
            let face: Vec<u32> = (0..n).collect();
            let tris = fan_triangulate(&face);
            assert_eq!(tris.len(), (n - 2) as usize);

            let used: HashSet<u32> = tris.iter().flatten().copied().collect();
            let expected: HashSet<u32> = face.iter().copied().collect();
            assert_eq!(used, expected);
        }
    }

    #[test]
    fn degenerate_faces_are_skipped() {
        assert!(fan_triangulate(&[]).is_empty());
        assert!(fan_triangulate(&[0]).is_empty());
        assert!(fan_triangulate(&[0, 1]).is_empty());
    }
}
