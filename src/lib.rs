//! # stellar-mesh
//!
//! stellar-mesh builds multi-block, high-order, curvilinear hexahedral meshes
//! approximating a spheroidal stellar interior (core + envelope, with an
//! optional exterior domain), suitable for finite-element simulation.
//!
//! ## Pipeline
//!
//! The stages run strictly in sequence, each mutating the mesh in place:
//!
//! 1. [`topology::build_skeleton`] — fixed seven-block cubed-sphere topology
//!    (16 vertices, 7 hexahedra, 6 boundary quads).
//! 2. [`topology::finalize`] — orientation repair, conformity check, uniform
//!    refinement.
//! 3. [`topology::promote_to_high_order`] — nodal field of the configured
//!    polynomial order.
//! 4. [`topology::project_mesh`] — every node rewritten through the composed
//!    curvilinear transform (equiangular cube-to-sphere, smooth core/envelope
//!    blend, spheroidal flattening, Kelvin exterior expansion).
//! 5. [`validation`] — post-hoc scans tagging inverted elements/faces via the
//!    reserved sentinel attributes.
//! 6. [`io`] — native/VTK serialization and socket streaming to a viewer.
//!
//! ## Example
//!
//! ```no_run
//! use stellar_mesh::config::MeshConfig;
//! use stellar_mesh::topology::{build_skeleton, finalize, project_mesh, promote_to_high_order};
//!
//! let config = MeshConfig::default();
//! let mut mesh = build_skeleton(&config);
//! finalize(&mut mesh, &config)?;
//! promote_to_high_order(&mut mesh, &config)?;
//! project_mesh(&mut mesh, &config)?;
//! assert!(mesh.nodes().is_some());
//! # Ok::<(), stellar_mesh::mesh_error::StellarMeshError>(())
//! ```
//!
//! This is not a general-purpose meshing library: block topology, element
//! counts, and attribute IDs are fixed, hand-designed constants for exactly
//! the core/envelope star model.

pub mod config;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod mesh_error;
pub mod topology;
pub mod validation;

/// A convenient prelude importing the most-used types and pipeline stages.
pub mod prelude {
    pub use crate::config::MeshConfig;
    pub use crate::geometry::{
        apply_equiangular, apply_kelvin, apply_spheroidal, transform_point,
    };
    pub use crate::io::{save_mesh, save_vtk, view_face_valence, view_mesh, VisualizationMode};
    pub use crate::mesh::{BoundaryQuad, HexMesh, Hexahedron, NodeField};
    pub use crate::mesh_error::StellarMeshError;
    pub use crate::topology::{build_skeleton, finalize, project_mesh, promote_to_high_order};
    pub use crate::validation::{mark_flipped_boundary_elements, mark_flipped_elements};
}
