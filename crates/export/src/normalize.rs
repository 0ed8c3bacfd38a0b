//! Coordinate-system normalization.
//!
//! The CAD kernel works in Z-up millimeters; glTF mandates Y-up right-handed
//! meters. Every emitted position, surface and line alike, goes through the
//! same conversion — applying it unevenly shows up as visually misaligned
//! output, so the builders funnel everything through `convert_point`.

use glam::DVec3;

/// Uniform scale from kernel units (mm) to glTF units (m).
pub const MM_TO_M: f64 = 1.0e-3;

/// Map one point from the kernel convention (Z-up, mm) to the glTF convention
/// (Y-up, m): `(x, y, z) -> (x, z, -y) / 1000`.
pub fn to_gltf_coords(p: DVec3) -> DVec3 {
    DVec3::new(p.x * MM_TO_M, p.z * MM_TO_M, -p.y * MM_TO_M)
}

/// Apply `to_gltf_coords` when `normalize` is set; exact identity otherwise.
/// Callers already working in the glTF convention pass `false`.
pub fn convert_point(p: DVec3, normalize: bool) -> DVec3 {
    if normalize {
        to_gltf_coords(p)
    } else {
        p
    }
}
