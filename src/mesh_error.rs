//! StellarMeshError: unified error type for stellar-mesh public APIs
//!
//! This error type is used throughout the crate to provide robust,
//! non-panicking error handling for all public APIs.

use thiserror::Error;

/// Unified error type for stellar-mesh operations.
#[derive(Debug, Error)]
pub enum StellarMeshError {
    /// An element or boundary element references a vertex index that does
    /// not exist in the mesh.
    #[error("invalid vertex reference: {kind} {index} references vertex {vertex}, mesh has {num_vertices} vertices")]
    InvalidVertexReference {
        /// "element" or "boundary element".
        kind: &'static str,
        index: usize,
        vertex: usize,
        num_vertices: usize,
    },
    /// The mesh topology is non-conforming (an interior face with valence
    /// above 2, or a boundary face without a matching boundary quad).
    #[error("non-conforming topology: {0}")]
    NonConforming(String),
    /// Invalid or degenerate geometry encountered.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// High-order nodes were required but have not been attached.
    /// Call `promote_to_high_order` before `project_mesh`.
    #[error("mesh has no high-order node field (promote_to_high_order must run first)")]
    MissingNodes,
    /// Configuration file could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(String),
    /// Configuration record could not be serialized.
    #[error("configuration serialize error: {0}")]
    ConfigSerialize(String),
    /// Underlying I/O failure (file or socket).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
