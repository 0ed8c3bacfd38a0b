//! Export engine error types.

use thiserror::Error;

/// Fatal export failures.
///
/// Malformed input geometry never lands here — the geometry builder recovers
/// from it by dropping triangles. These variants signal an engine bug (a
/// scene-graph invariant violation) or a serialization-layer failure, and
/// must surface to the caller rather than silently truncating output.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The assembled scene contains no primitives at all. The single-point
    /// fallback makes this unreachable from any input.
    #[error("assembled scene contains no primitives")]
    EmptyScene,

    /// An accessor's declared byte length disagrees with its element count.
    #[error("accessor {accessor}: declared byte length {declared}, expected {expected}")]
    AccessorLengthMismatch {
        accessor: usize,
        declared: usize,
        expected: usize,
    },

    /// An accessor's byte range runs past the end of the backing buffer.
    #[error("accessor {accessor}: byte range ends at {end} but buffer holds {buffer_len} bytes")]
    AccessorOutOfBounds {
        accessor: usize,
        end: usize,
        buffer_len: usize,
    },

    /// glTF document serialization failed.
    #[error("glTF document serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
