//! High-order nodal field attached to a hexahedral mesh.
//!
//! A [`NodeField`] of polynomial order `p` stores a `(p + 1)^3` lattice of
//! node positions for every element, laid out `t`-major then `s` then `r`.
//! Storage is per element: nodes on shared faces and edges are duplicated
//! rather than identified. The projection stage rewrites nodes pointwise, so
//! duplicated interface nodes receive identical images and the curved mesh
//! stays watertight.

use crate::mesh_error::StellarMeshError;

use super::HexMesh;

/// Trilinear shape-function weights on the reference cube `[0, 1]^3`, in the
/// standard hexahedron corner order.
pub(crate) fn trilinear_weights(r: f64, s: f64, t: f64) -> [f64; 8] {
    let rm = 1.0 - r;
    let sm = 1.0 - s;
    let tm = 1.0 - t;
    [
        rm * sm * tm,
        r * sm * tm,
        r * s * tm,
        rm * s * tm,
        rm * sm * t,
        r * sm * t,
        r * s * t,
        rm * s * t,
    ]
}

/// Nodal positions of a high-order representation of the mesh.
#[derive(Clone, Debug)]
pub struct NodeField {
    order: u32,
    nodes_per_element: usize,
    positions: Vec<[f64; 3]>,
}

impl NodeField {
    /// Build a straight-edged node field of the given polynomial order.
    ///
    /// Every node starts at the trilinear interpolation of its element's
    /// corners, i.e. the uncurved geometry.
    pub fn straight_edged(mesh: &HexMesh, order: u32) -> Result<Self, StellarMeshError> {
        if order == 0 {
            return Err(StellarMeshError::InvalidGeometry(
                "nodal polynomial order must be positive".into(),
            ));
        }
        let p = order as usize;
        let side = p + 1;
        let nodes_per_element = side * side * side;
        let mut positions = Vec::with_capacity(nodes_per_element * mesh.num_elements());
        for index in 0..mesh.num_elements() {
            let corners = mesh.element_corners(index)?;
            for k in 0..side {
                let t = k as f64 / p as f64;
                for j in 0..side {
                    let s = j as f64 / p as f64;
                    for i in 0..side {
                        let r = i as f64 / p as f64;
                        let weights = trilinear_weights(r, s, t);
                        let mut node = [0.0; 3];
                        for (weight, corner) in weights.iter().zip(corners.iter()) {
                            node[0] += weight * corner[0];
                            node[1] += weight * corner[1];
                            node[2] += weight * corner[2];
                        }
                        positions.push(node);
                    }
                }
            }
        }
        Ok(Self {
            order,
            nodes_per_element,
            positions,
        })
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn nodes_per_element(&self) -> usize {
        self.nodes_per_element
    }

    pub fn num_nodes(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[[f64; 3]] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [[f64; 3]] {
        &mut self.positions
    }

    /// Nodes belonging to element `index`.
    pub fn element_nodes(&self, index: usize) -> &[[f64; 3]] {
        let start = index * self.nodes_per_element;
        &self.positions[start..start + self.nodes_per_element]
    }

    /// Mutable nodes belonging to element `index`.
    pub fn element_nodes_mut(&mut self, index: usize) -> &mut [[f64; 3]] {
        let start = index * self.nodes_per_element;
        &mut self.positions[start..start + self.nodes_per_element]
    }

    /// True when every node coordinate is finite.
    pub fn all_finite(&self) -> bool {
        self.positions
            .iter()
            .all(|node| node.iter().all(|coordinate| coordinate.is_finite()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::ATTR_CORE;

    fn unit_hex_mesh() -> HexMesh {
        let mut mesh = HexMesh::new();
        for &z in &[0.0, 1.0] {
            mesh.add_vertex([0.0, 0.0, z]);
            mesh.add_vertex([1.0, 0.0, z]);
            mesh.add_vertex([1.0, 1.0, z]);
            mesh.add_vertex([0.0, 1.0, z]);
        }
        mesh.add_element([0, 1, 2, 3, 4, 5, 6, 7], ATTR_CORE);
        mesh
    }

    #[test]
    fn lattice_size_matches_order() {
        let mesh = unit_hex_mesh();
        let nodes = NodeField::straight_edged(&mesh, 3).unwrap();
        assert_eq!(nodes.order(), 3);
        assert_eq!(nodes.nodes_per_element(), 64);
        assert_eq!(nodes.num_nodes(), 64);
        assert!(nodes.all_finite());
    }

    #[test]
    fn order_one_reproduces_corners() {
        let mesh = unit_hex_mesh();
        let nodes = NodeField::straight_edged(&mesh, 1).unwrap();
        let lattice = nodes.element_nodes(0);
        // t-major layout: (0,0,0), (1,0,0), (0,1,0), (1,1,0), then top.
        assert_eq!(lattice[0], [0.0, 0.0, 0.0]);
        assert_eq!(lattice[1], [1.0, 0.0, 0.0]);
        assert_eq!(lattice[2], [0.0, 1.0, 0.0]);
        assert_eq!(lattice[3], [1.0, 1.0, 0.0]);
        assert_eq!(lattice[7], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn interior_node_is_interpolated() {
        let mesh = unit_hex_mesh();
        let nodes = NodeField::straight_edged(&mesh, 2).unwrap();
        // Middle of the 3x3x3 lattice is the element center.
        let center = nodes.element_nodes(0)[13];
        assert!((center[0] - 0.5).abs() < 1e-14);
        assert!((center[1] - 0.5).abs() < 1e-14);
        assert!((center[2] - 0.5).abs() < 1e-14);
    }

    #[test]
    fn zero_order_is_rejected() {
        let mesh = unit_hex_mesh();
        assert!(matches!(
            NodeField::straight_edged(&mesh, 0),
            Err(StellarMeshError::InvalidGeometry(_))
        ));
    }
}
