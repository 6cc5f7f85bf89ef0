//! Topology finalization: orientation repair, conformity checks, and uniform
//! refinement.
//!
//! This stage must run before high-order promotion; subdividing a curved mesh
//! would require re-running the mapping for every new node, which the
//! pipeline avoids by ordering refinement strictly first.

use crate::config::MeshConfig;
use crate::mesh::{refine::uniform_refine, HexMesh};
use crate::mesh_error::StellarMeshError;
use crate::validation::signed_hex_volume;
use log::{debug, info};

/// Finalize the block topology in place.
///
/// Validates vertex references, reorders negatively-oriented hexahedra
/// (swapping bottom and top faces), rejects degenerate or non-conforming
/// topology, then applies `refinement_levels` uniform refinement passes.
/// With `refinement_levels > 0` the element count strictly increases
/// (each pass multiplies it by eight).
pub fn finalize(mesh: &mut HexMesh, config: &MeshConfig) -> Result<(), StellarMeshError> {
    mesh.validate_references()?;

    let mut repaired = 0usize;
    for index in 0..mesh.num_elements() {
        let corners = mesh.element_corners(index)?;
        let volume = signed_hex_volume(&corners);
        if volume == 0.0 {
            return Err(StellarMeshError::InvalidGeometry(format!(
                "element {index} is degenerate (zero volume)"
            )));
        }
        if volume < 0.0 {
            let v = mesh.elements()[index].vertices;
            mesh.elements_mut()[index].vertices = [v[4], v[5], v[6], v[7], v[0], v[1], v[2], v[3]];
            repaired += 1;
        }
    }
    if repaired > 0 {
        debug!("finalize: reoriented {repaired} inverted elements");
    }

    if !mesh.is_conforming() {
        return Err(StellarMeshError::NonConforming(
            "face valence or boundary coverage check failed".into(),
        ));
    }

    for pass in 0..config.refinement_levels {
        uniform_refine(mesh)?;
        debug!(
            "finalize: refinement pass {}/{} -> {} elements",
            pass + 1,
            config.refinement_levels,
            mesh.num_elements()
        );
    }

    info!(
        "finalized mesh: {} vertices, {} elements, {} boundary quads",
        mesh.num_vertices(),
        mesh.num_elements(),
        mesh.num_boundary_elements()
    );
    Ok(())
}
