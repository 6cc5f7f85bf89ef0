//! High-order promotion and curvilinear projection.
//!
//! [`promote_to_high_order`] attaches the nodal field (straight-edged
//! geometry); [`project_mesh`] then pushes every node and corner vertex
//! through the composed curvilinear transform. Projection without prior
//! promotion is a pipeline-order violation and fails with
//! [`StellarMeshError::MissingNodes`].

use crate::config::MeshConfig;
use crate::geometry::transform_point;
use crate::mesh::{HexMesh, NodeField};
use crate::mesh_error::StellarMeshError;
use log::info;

/// Attach a nodal finite-element representation of the configured polynomial
/// order to the mesh.
///
/// Every node starts at the straight-edged (trilinear) interpolation of its
/// element; the mesh geometry is unchanged until projection.
pub fn promote_to_high_order(
    mesh: &mut HexMesh,
    config: &MeshConfig,
) -> Result<(), StellarMeshError> {
    let nodes = NodeField::straight_edged(mesh, config.order)?;
    info!(
        "promoted mesh to order {}: {} nodes",
        config.order,
        nodes.num_nodes()
    );
    mesh.set_nodes(nodes);
    Ok(())
}

/// Rewrite every high-order node (and corner vertex) through the composed
/// curvilinear transform, using the owning element's region attribute.
///
/// Requires [`promote_to_high_order`] to have run. After projection all node
/// coordinates are finite for any configuration on the valid domain; this is
/// a postcondition checked by the test suite, not re-verified per node here.
pub fn project_mesh(mesh: &mut HexMesh, config: &MeshConfig) -> Result<(), StellarMeshError> {
    let mut nodes = mesh.take_nodes().ok_or(StellarMeshError::MissingNodes)?;

    for index in 0..mesh.num_elements() {
        let attribute = mesh.elements()[index].attribute;
        for node in nodes.element_nodes_mut(index) {
            transform_point(node, config, attribute);
        }
    }

    // Corner vertices are shared between elements; transform each once, with
    // the attribute of the first element that owns it (the transform does not
    // branch on the attribute today).
    let mut visited = vec![false; mesh.num_vertices()];
    for index in 0..mesh.num_elements() {
        let element = mesh.elements()[index];
        for &vertex in &element.vertices {
            if !visited[vertex] {
                visited[vertex] = true;
                transform_point(&mut mesh.vertices_mut()[vertex], config, element.attribute);
            }
        }
    }

    info!("projected {} nodes through curvilinear map", nodes.num_nodes());
    mesh.set_nodes(nodes);
    Ok(())
}
