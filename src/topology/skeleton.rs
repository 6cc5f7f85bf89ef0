//! Coarse multi-block skeleton for the star model.
//!
//! The topology is a fixed, hand-authored seven-block cubed-sphere template:
//! a central cubic core block surrounded by six envelope blocks that together
//! fill the shell between an inner cube of half-width `r_core` and an outer
//! cube of half-width `r_star`. Vertex positions are logical (pre-mapping)
//! coordinates; the curvilinear projection later bends the whole assembly
//! into the spheroidal star.
//!
//! The template produces exactly 16 vertices, 7 hexahedra, and 6 boundary
//! quads. These counts are a contract with downstream consumers, not an
//! implementation detail.

use crate::config::MeshConfig;
use crate::mesh::{HexMesh, ATTR_CORE, ATTR_ENVELOPE, BDR_ATTR_SURFACE};
use log::info;

/// Corner sign pattern shared by the inner and outer cube, in standard
/// hexahedron order (bottom face counter-clockwise, then top face).
const CUBE_SIGNS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// The seven blocks: the core cube, then one envelope frustum per cube face
/// (inner-cube vertices are 0..8, outer-cube vertices are 8..16). Each list
/// is ordered for positive volume.
const BLOCKS: [([usize; 8], i32); 7] = [
    ([0, 1, 2, 3, 4, 5, 6, 7], ATTR_CORE),
    ([8, 9, 10, 11, 0, 1, 2, 3], ATTR_ENVELOPE), // below (-z)
    ([4, 5, 6, 7, 12, 13, 14, 15], ATTR_ENVELOPE), // above (+z)
    ([8, 11, 15, 12, 0, 3, 7, 4], ATTR_ENVELOPE), // -x
    ([1, 2, 6, 5, 9, 10, 14, 13], ATTR_ENVELOPE), // +x
    ([8, 12, 13, 9, 0, 4, 5, 1], ATTR_ENVELOPE), // -y
    ([3, 7, 6, 2, 11, 15, 14, 10], ATTR_ENVELOPE), // +y
];

/// Outer-cube faces forming the star surface, oriented outward.
const SURFACE_QUADS: [[usize; 4]; 6] = [
    [8, 11, 10, 9],   // -z
    [12, 13, 14, 15], // +z
    [8, 12, 15, 11],  // -x
    [9, 10, 14, 13],  // +x
    [8, 9, 13, 12],   // -y
    [11, 15, 14, 10], // +y
];

/// Build the coarse multi-block mesh skeleton for the star model.
///
/// Uses `r_core` and `r_star` from the configuration for the logical block
/// extents; no refinement or curving happens here. The only failure mode is
/// allocation, so this does not return a `Result`.
pub fn build_skeleton(config: &MeshConfig) -> HexMesh {
    let mut mesh = HexMesh::new();
    for half_width in [config.r_core, config.r_star] {
        for signs in &CUBE_SIGNS {
            mesh.add_vertex([
                signs[0] * half_width,
                signs[1] * half_width,
                signs[2] * half_width,
            ]);
        }
    }
    for (vertices, attribute) in BLOCKS {
        mesh.add_element(vertices, attribute);
    }
    for vertices in SURFACE_QUADS {
        mesh.add_boundary_quad(vertices, BDR_ATTR_SURFACE);
    }
    info!(
        "built skeleton: {} vertices, {} elements, {} boundary quads",
        mesh.num_vertices(),
        mesh.num_elements(),
        mesh.num_boundary_elements()
    );
    mesh
}
