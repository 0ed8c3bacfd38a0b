//! Scene-graph assembly: materials, primitives, nodes, and the packed buffer.
//!
//! `assemble` turns the built geometry into the logical glTF scene plus one
//! binary buffer holding every accessor's backing bytes. Everything is created
//! fresh per export and never mutated afterwards; the serializer only reads.

use crate::geometry::GeometryData;

/// glTF component types.
pub const FLOAT: u32 = 5126;
pub const UNSIGNED_INT: u32 = 5125;

/// glTF buffer-view targets.
pub const ARRAY_BUFFER: u32 = 34962;
pub const ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// glTF primitive draw mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveMode {
    /// Point list — used only for the degenerate empty-surface fallback.
    Points,
    Lines,
    Triangles,
}

impl PrimitiveMode {
    pub fn gl_mode(self) -> u32 {
        match self {
            PrimitiveMode::Points => 0,
            PrimitiveMode::Lines => 1,
            PrimitiveMode::Triangles => 4,
        }
    }
}

/// PBR material parameters for one primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: &'static str,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub double_sided: bool,
    pub alpha_mode: &'static str,
}

/// Fixed surface material. Per-face color travels through the COLOR_0 vertex
/// attribute (viewers multiply it into the base color), never through
/// per-primitive material variation.
pub const SURFACE_MATERIAL: Material = Material {
    name: "Surface",
    base_color: [1.0, 1.0, 1.0, 1.0],
    metallic: 0.0,
    roughness: 0.9,
    double_sided: true,
    alpha_mode: "OPAQUE",
};

/// Fixed wireframe material: dark, fully rough, no vertex colors.
pub const LINE_MATERIAL: Material = Material {
    name: "Wireframe",
    base_color: [0.05, 0.05, 0.05, 1.0],
    metallic: 0.0,
    roughness: 1.0,
    double_sided: false,
    alpha_mode: "OPAQUE",
};

/// Typed view over a region of the packed binary buffer. One buffer view per
/// accessor; the serializer emits both arrays from this.
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub component_type: u32,
    /// "VEC3" or "SCALAR".
    pub element_type: &'static str,
    pub count: usize,
    pub byte_offset: usize,
    pub byte_length: usize,
    pub target: u32,
    /// Component-wise bounds, required by glTF for POSITION accessors.
    pub min_max: Option<([f32; 3], [f32; 3])>,
}

impl Accessor {
    /// Byte size of one element (all components are 4-byte scalars).
    pub fn element_size(&self) -> usize {
        let components = if self.element_type == "VEC3" { 3 } else { 1 };
        components * 4
    }
}

/// One drawable unit: a draw mode, attribute accessors, and a material.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub mode: PrimitiveMode,
    pub material: usize,
    pub position: usize,
    /// COLOR_0 accessor, present for surfaces only.
    pub color: Option<usize>,
    pub indices: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshDef {
    pub name: &'static str,
    pub primitive: Primitive,
}

/// Scene node with an identity transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: &'static str,
    pub mesh: usize,
}

/// The assembled scene: every node is a scene root, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGraph {
    pub nodes: Vec<Node>,
    pub meshes: Vec<MeshDef>,
    pub materials: Vec<Material>,
    pub accessors: Vec<Accessor>,
    /// Single binary buffer backing all accessors.
    pub bin: Vec<u8>,
}

/// Build the scene graph from the surface geometry (always present, possibly
/// the point fallback) and the optional line geometry. Surface node first,
/// line node second.
pub fn assemble(surface: &GeometryData, lines: Option<&GeometryData>) -> SceneGraph {
    let mut scene = SceneGraph::default();

    let surface_mode = if surface.is_point_fallback() {
        PrimitiveMode::Points
    } else {
        PrimitiveMode::Triangles
    };

    scene.materials.push(SURFACE_MATERIAL);
    let primitive = pack_geometry(&mut scene, surface, surface_mode, 0);
    scene.meshes.push(MeshDef {
        name: "Surface",
        primitive,
    });
    scene.nodes.push(Node {
        name: "Surface",
        mesh: 0,
    });

    if let Some(lines) = lines {
        scene.materials.push(LINE_MATERIAL);
        let primitive = pack_geometry(&mut scene, lines, PrimitiveMode::Lines, 1);
        scene.meshes.push(MeshDef {
            name: "Wireframe",
            primitive,
        });
        scene.nodes.push(Node {
            name: "Wireframe",
            mesh: 1,
        });
    }

    scene
}

/// Append one geometry's buffers to the scene's binary blob and record the
/// accessors for it.
fn pack_geometry(
    scene: &mut SceneGraph,
    geometry: &GeometryData,
    mode: PrimitiveMode,
    material: usize,
) -> Primitive {
    let (byte_offset, byte_length) = push_f32s(&mut scene.bin, &geometry.positions);
    let position = scene.accessors.len();
    scene.accessors.push(Accessor {
        component_type: FLOAT,
        element_type: "VEC3",
        count: geometry.vertex_count(),
        byte_offset,
        byte_length,
        target: ARRAY_BUFFER,
        min_max: position_bounds(&geometry.positions),
    });

    let color = geometry.colors.as_ref().map(|colors| {
        let (byte_offset, byte_length) = push_f32s(&mut scene.bin, colors);
        let accessor = scene.accessors.len();
        scene.accessors.push(Accessor {
            component_type: FLOAT,
            element_type: "VEC3",
            count: colors.len() / 3,
            byte_offset,
            byte_length,
            target: ARRAY_BUFFER,
            min_max: None,
        });
        accessor
    });

    let (byte_offset, byte_length) = push_u32s(&mut scene.bin, &geometry.indices);
    let indices = scene.accessors.len();
    scene.accessors.push(Accessor {
        component_type: UNSIGNED_INT,
        element_type: "SCALAR",
        count: geometry.indices.len(),
        byte_offset,
        byte_length,
        target: ELEMENT_ARRAY_BUFFER,
        min_max: None,
    });

    Primitive {
        mode,
        material,
        position,
        color,
        indices,
    }
}

fn push_f32s(bin: &mut Vec<u8>, data: &[f32]) -> (usize, usize) {
    let offset = bin.len();
    for &f in data {
        bin.extend_from_slice(&f.to_le_bytes());
    }
    let length = bin.len() - offset;
    // Keep every section 4-byte aligned (per GLB spec).
    while bin.len() % 4 != 0 {
        bin.push(0);
    }
    (offset, length)
}

fn push_u32s(bin: &mut Vec<u8>, data: &[u32]) -> (usize, usize) {
    let offset = bin.len();
    for &v in data {
        bin.extend_from_slice(&v.to_le_bytes());
    }
    let length = bin.len() - offset;
    while bin.len() % 4 != 0 {
        bin.push(0);
    }
    (offset, length)
}

fn position_bounds(positions: &[f32]) -> Option<([f32; 3], [f32; 3])> {
    if positions.is_empty() {
        return None;
    }

    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for corner in positions.chunks_exact(3) {
        for axis in 0..3 {
            min[axis] = min[axis].min(corner[axis]);
            max[axis] = max[axis].max(corner[axis]);
        }
    }
    Some((min, max))
}
