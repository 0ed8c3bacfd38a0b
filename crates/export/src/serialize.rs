//! GLB / glTF rendering of an assembled scene graph.
//!
//! Both output forms share one JSON document builder. The binary form packs
//! the document and the buffer into the standard two-chunk GLB container; the
//! textual form embeds the buffer as a base64 data URI, yielding a single
//! self-contained `.gltf` file with no external references.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::json;

use crate::error::ExportError;
use crate::scene::SceneGraph;

/// GLB magic number: "glTF"
const GLB_MAGIC: u32 = 0x46546C67;
/// GLB version 2
const GLB_VERSION: u32 = 2;
/// JSON chunk type
const CHUNK_TYPE_JSON: u32 = 0x4E4F534A;
/// BIN chunk type
const CHUNK_TYPE_BIN: u32 = 0x004E4942;

pub const GLB_MIME_TYPE: &str = "model/gltf-binary";
pub const GLTF_MIME_TYPE: &str = "model/gltf+json";

/// Check the assembler's output before serializing. A failure here is an
/// engine bug, never bad input, so it must surface rather than be swallowed.
fn check_invariants(scene: &SceneGraph) -> Result<(), ExportError> {
    // Every mesh holds exactly one primitive, so no meshes means no
    // primitives anywhere.
    if scene.meshes.is_empty() {
        return Err(ExportError::EmptyScene);
    }

    for (index, acc) in scene.accessors.iter().enumerate() {
        let expected = acc.count * acc.element_size();
        if acc.byte_length != expected {
            return Err(ExportError::AccessorLengthMismatch {
                accessor: index,
                declared: acc.byte_length,
                expected,
            });
        }
        let end = acc.byte_offset + acc.byte_length;
        if end > scene.bin.len() {
            return Err(ExportError::AccessorOutOfBounds {
                accessor: index,
                end,
                buffer_len: scene.bin.len(),
            });
        }
    }

    Ok(())
}

/// Render the scene graph to a glTF 2.0 JSON document. `buffer_uri` is set
/// for the textual form and absent for GLB (where the buffer is the BIN
/// chunk).
fn build_document(scene: &SceneGraph, buffer_uri: Option<&str>) -> serde_json::Value {
    let mut buffer_views = Vec::with_capacity(scene.accessors.len());
    let mut accessors = Vec::with_capacity(scene.accessors.len());

    for (i, acc) in scene.accessors.iter().enumerate() {
        buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": acc.byte_offset,
            "byteLength": acc.byte_length,
            "target": acc.target
        }));

        let mut entry = json!({
            "bufferView": i,
            "byteOffset": 0,
            "componentType": acc.component_type,
            "count": acc.count,
            "type": acc.element_type
        });
        if let Some((min, max)) = acc.min_max {
            entry["min"] = json!(min);
            entry["max"] = json!(max);
        }
        accessors.push(entry);
    }

    let materials: Vec<_> = scene
        .materials
        .iter()
        .map(|m| {
            json!({
                "name": m.name,
                "doubleSided": m.double_sided,
                "alphaMode": m.alpha_mode,
                "pbrMetallicRoughness": {
                    "baseColorFactor": m.base_color,
                    "metallicFactor": m.metallic,
                    "roughnessFactor": m.roughness
                }
            })
        })
        .collect();

    let meshes: Vec<_> = scene
        .meshes
        .iter()
        .map(|mesh| {
            let prim = &mesh.primitive;
            let mut attributes = json!({ "POSITION": prim.position });
            if let Some(color) = prim.color {
                attributes["COLOR_0"] = json!(color);
            }
            json!({
                "name": mesh.name,
                "primitives": [{
                    "attributes": attributes,
                    "indices": prim.indices,
                    "material": prim.material,
                    "mode": prim.mode.gl_mode()
                }]
            })
        })
        .collect();

    let nodes: Vec<_> = scene
        .nodes
        .iter()
        .map(|node| json!({ "name": node.name, "mesh": node.mesh }))
        .collect();
    let node_indices: Vec<usize> = (0..scene.nodes.len()).collect();

    let mut buffer = json!({ "byteLength": scene.bin.len() });
    if let Some(uri) = buffer_uri {
        buffer["uri"] = json!(uri);
    }

    json!({
        "asset": {
            "version": "2.0",
            "generator": "mesh-export v0.1"
        },
        "scene": 0,
        "scenes": [{
            "name": "Scene",
            "nodes": node_indices
        }],
        "nodes": nodes,
        "meshes": meshes,
        "materials": materials,
        "accessors": accessors,
        "bufferViews": buffer_views,
        "buffers": [buffer]
    })
}

/// Serialize to the binary GLB container: 12-byte header, space-padded JSON
/// chunk, zero-padded BIN chunk, all little-endian. Output length is always a
/// multiple of 4.
pub fn to_glb(scene: &SceneGraph) -> Result<Vec<u8>, ExportError> {
    check_invariants(scene)?;

    let document = build_document(scene, None);
    let json_str = serde_json::to_string(&document)?;
    let mut json_bytes = json_str.into_bytes();

    // Pad JSON to 4-byte alignment with spaces (per GLB spec).
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }

    // Pad BIN to 4-byte alignment with zeros (per GLB spec).
    let mut bin_data = scene.bin.clone();
    while bin_data.len() % 4 != 0 {
        bin_data.push(0);
    }

    let json_chunk_length = json_bytes.len() as u32;
    let bin_chunk_length = bin_data.len() as u32;

    let total_length: u32 = 12 // header
        + 8 + json_chunk_length  // JSON chunk header + data
        + 8 + bin_chunk_length; // BIN chunk header + data

    let mut glb = Vec::with_capacity(total_length as usize);

    // Header
    glb.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&total_length.to_le_bytes());

    // JSON chunk
    glb.extend_from_slice(&json_chunk_length.to_le_bytes());
    glb.extend_from_slice(&CHUNK_TYPE_JSON.to_le_bytes());
    glb.extend_from_slice(&json_bytes);

    // BIN chunk
    glb.extend_from_slice(&bin_chunk_length.to_le_bytes());
    glb.extend_from_slice(&CHUNK_TYPE_BIN.to_le_bytes());
    glb.extend_from_slice(&bin_data);

    Ok(glb)
}

/// Serialize to the self-contained textual form: the same document as
/// indented JSON with the buffer embedded as a base64 data URI. Encoding
/// works on the raw bytes; anything character-based would corrupt values
/// above the Latin-1 range.
pub fn to_gltf(scene: &SceneGraph) -> Result<String, ExportError> {
    check_invariants(scene)?;

    let uri = format!(
        "data:application/octet-stream;base64,{}",
        BASE64.encode(&scene.bin)
    );
    let document = build_document(scene, Some(&uri));
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Accessor, SceneGraph, ARRAY_BUFFER, FLOAT};

    #[test]
    fn empty_scene_is_fatal() {
        let scene = SceneGraph::default();
        assert!(matches!(to_glb(&scene), Err(ExportError::EmptyScene)));
        assert!(matches!(to_gltf(&scene), Err(ExportError::EmptyScene)));
    }

    #[test]
    fn accessor_length_mismatch_is_fatal() {
        let scene = scene_with_accessor(Accessor {
            component_type: FLOAT,
            element_type: "VEC3",
            count: 3,
            byte_offset: 0,
            byte_length: 40, // 3 * 12 == 36 expected
            target: ARRAY_BUFFER,
            min_max: None,
        });

        assert!(matches!(
            to_glb(&scene),
            Err(ExportError::AccessorLengthMismatch { accessor: 0, declared: 40, expected: 36 })
        ));
    }

    #[test]
    fn accessor_past_buffer_end_is_fatal() {
        let scene = scene_with_accessor(Accessor {
            component_type: FLOAT,
            element_type: "VEC3",
            count: 4, // 48 bytes, buffer only has 36
            byte_offset: 0,
            byte_length: 48,
            target: ARRAY_BUFFER,
            min_max: None,
        });

        assert!(matches!(
            to_gltf(&scene),
            Err(ExportError::AccessorOutOfBounds { accessor: 0, end: 48, buffer_len: 36 })
        ));
    }

    fn scene_with_accessor(accessor: Accessor) -> SceneGraph {
        use crate::scene::{Material, MeshDef, Node, Primitive, PrimitiveMode};

        SceneGraph {
            nodes: vec![Node { name: "Surface", mesh: 0 }],
            meshes: vec![MeshDef {
                name: "Surface",
                primitive: Primitive {
                    mode: PrimitiveMode::Triangles,
                    material: 0,
                    position: 0,
                    color: None,
                    indices: 0,
                },
            }],
            materials: vec![Material {
                name: "Surface",
                base_color: [1.0; 4],
                metallic: 0.0,
                roughness: 0.9,
                double_sided: true,
                alpha_mode: "OPAQUE",
            }],
            accessors: vec![accessor],
            bin: vec![0u8; 36],
        }
    }
}
