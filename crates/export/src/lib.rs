//! glTF/GLB export engine for indexed-polyhedron CAD meshes.
//!
//! Pipeline: `IndexedPolyhedron` → [`geometry`] (flat buffers) → [`scene`]
//! (scene graph + packed binary buffer) → [`serialize`] (GLB bytes or
//! self-contained glTF text).
//!
//! Every export call is synchronous, stateless and independent; callers
//! exporting large meshes off an interactive thread wrap the call in their
//! own executor. Malformed kernel geometry is recovered by dropping the
//! offending triangles; internal invariant violations surface as
//! [`ExportError`].

pub mod error;
pub mod fixtures;
pub mod geometry;
pub mod normalize;
pub mod scene;
pub mod serialize;
pub mod triangulate;
pub mod validation;

pub use error::ExportError;
pub use geometry::GeometryData;
pub use scene::SceneGraph;

use shared::IndexedPolyhedron;

/// Output container selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFormat {
    /// Single binary container (.glb).
    Glb,
    /// Indented JSON text with the buffer embedded as a base64 data URI
    /// (.gltf).
    Gltf,
}

/// One finished export.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportedAsset {
    Binary(Vec<u8>),
    Text(String),
}

impl ExportedAsset {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportedAsset::Binary(_) => serialize::GLB_MIME_TYPE,
            ExportedAsset::Text(_) => serialize::GLTF_MIME_TYPE,
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportedAsset::Binary(_) => "glb",
            ExportedAsset::Text(_) => "gltf",
        }
    }

    /// The serialized payload, UTF-8 encoded for the textual form.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            ExportedAsset::Binary(bytes) => bytes,
            ExportedAsset::Text(text) => text.into_bytes(),
        }
    }
}

/// Export one polyhedron to the selected container.
///
/// `normalize` converts from the kernel convention (Z-up, mm) to the glTF
/// convention (Y-up, m); callers already sharing the target convention pass
/// `false`.
pub fn export_polyhedron(
    poly: &IndexedPolyhedron,
    format: AssetFormat,
    normalize: bool,
) -> Result<ExportedAsset, ExportError> {
    let surface = geometry::build_surface(poly, normalize);
    let lines = geometry::build_lines(poly, normalize);

    tracing::info!(
        "export_polyhedron: {} face(s) -> {} triangle(s), {} line vertex(es), format {:?}",
        poly.face_count(),
        surface.triangle_count(),
        lines.as_ref().map_or(0, |l| l.vertex_count()),
        format
    );

    let scene = scene::assemble(&surface, lines.as_ref());
    match format {
        AssetFormat::Glb => serialize::to_glb(&scene).map(ExportedAsset::Binary),
        AssetFormat::Gltf => serialize::to_gltf(&scene).map(ExportedAsset::Text),
    }
}
