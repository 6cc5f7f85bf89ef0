//! Hexahedral mesh substrate for the star model pipeline.
//!
//! [`HexMesh`] owns vertex positions, hexahedral elements, and boundary
//! quadrilaterals, each carrying an integer attribute. The builder allocates
//! it, every later pipeline stage takes it by exclusive mutable reference,
//! and the caller (or the I/O layer) finally persists it — no stage retains
//! aliased state across calls.
//!
//! Vertex ordering per hexahedron is the standard one: bottom face
//! `[v0, v1, v2, v3]` counter-clockwise seen from above, top face
//! `[v4, v5, v6, v7]` matching corner for corner. Boundary quads are oriented
//! so `(v1 − v0) × (v3 − v0)` points out of the domain.

pub mod nodes;
pub mod refine;

use crate::mesh_error::StellarMeshError;
use itertools::Itertools;
use std::collections::BTreeMap;

pub use nodes::NodeField;

/// Region attribute for the central core block.
pub const ATTR_CORE: i32 = 1;
/// Region attribute for the six envelope blocks.
pub const ATTR_ENVELOPE: i32 = 2;
/// Boundary attribute for the outer star surface.
pub const BDR_ATTR_SURFACE: i32 = 1;
/// Reserved sentinel written onto volume elements with inverted orientation.
/// Must never be used as a region attribute.
pub const ATTR_FLIPPED_ELEMENT: i32 = 999;
/// Reserved sentinel written onto boundary elements with inverted orientation.
/// Must never be used as a region attribute.
pub const ATTR_FLIPPED_BOUNDARY: i32 = 500;

/// A hexahedral volume element: eight vertex indices plus a region attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hexahedron {
    pub vertices: [usize; 8],
    pub attribute: i32,
}

/// A boundary quadrilateral: four vertex indices plus a face attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryQuad {
    pub vertices: [usize; 4],
    pub attribute: i32,
}

/// Local vertex indices of the six faces of a hexahedron, each ordered so its
/// normal points out of the element.
pub const HEX_FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1], // bottom
    [4, 5, 6, 7], // top
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

/// Local vertex index pairs of the twelve edges of a hexahedron.
pub const HEX_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// A 3-D conforming hexahedral mesh with attribute-tagged elements and
/// boundary faces, and an optional high-order node field.
#[derive(Clone, Debug, Default)]
pub struct HexMesh {
    vertices: Vec<[f64; 3]>,
    elements: Vec<Hexahedron>,
    boundary: Vec<BoundaryQuad>,
    nodes: Option<NodeField>,
}

impl HexMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spatial dimension (always 3).
    pub fn dimension(&self) -> usize {
        3
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    pub fn num_boundary_elements(&self) -> usize {
        self.boundary.len()
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, position: [f64; 3]) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    /// Append a hexahedral element.
    pub fn add_element(&mut self, vertices: [usize; 8], attribute: i32) {
        self.elements.push(Hexahedron {
            vertices,
            attribute,
        });
    }

    /// Append a boundary quadrilateral.
    pub fn add_boundary_quad(&mut self, vertices: [usize; 4], attribute: i32) {
        self.boundary.push(BoundaryQuad {
            vertices,
            attribute,
        });
    }

    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut [[f64; 3]] {
        &mut self.vertices
    }

    pub fn elements(&self) -> &[Hexahedron] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [Hexahedron] {
        &mut self.elements
    }

    pub fn boundary(&self) -> &[BoundaryQuad] {
        &self.boundary
    }

    pub fn boundary_mut(&mut self) -> &mut [BoundaryQuad] {
        &mut self.boundary
    }

    /// The attached high-order node field, if promotion has run.
    pub fn nodes(&self) -> Option<&NodeField> {
        self.nodes.as_ref()
    }

    pub fn nodes_mut(&mut self) -> Option<&mut NodeField> {
        self.nodes.as_mut()
    }

    /// Attach (or replace) the high-order node field.
    pub fn set_nodes(&mut self, nodes: NodeField) {
        self.nodes = Some(nodes);
    }

    pub(crate) fn clear_nodes(&mut self) {
        self.nodes = None;
    }

    pub(crate) fn take_nodes(&mut self) -> Option<NodeField> {
        self.nodes.take()
    }

    /// Replace the boundary quad list wholesale (diagnostic views).
    pub(crate) fn set_boundary(&mut self, boundary: Vec<BoundaryQuad>) {
        self.boundary = boundary;
    }

    /// Gather the corner positions of element `index`.
    pub fn element_corners(&self, index: usize) -> Result<[[f64; 3]; 8], StellarMeshError> {
        let element = &self.elements[index];
        let mut corners = [[0.0; 3]; 8];
        for (slot, &vertex) in element.vertices.iter().enumerate() {
            corners[slot] = *self.vertices.get(vertex).ok_or_else(|| {
                StellarMeshError::InvalidVertexReference {
                    kind: "element",
                    index,
                    vertex,
                    num_vertices: self.vertices.len(),
                }
            })?;
        }
        Ok(corners)
    }

    /// Gather the corner positions of boundary quad `index`.
    pub fn boundary_corners(&self, index: usize) -> Result<[[f64; 3]; 4], StellarMeshError> {
        let quad = &self.boundary[index];
        let mut corners = [[0.0; 3]; 4];
        for (slot, &vertex) in quad.vertices.iter().enumerate() {
            corners[slot] = *self.vertices.get(vertex).ok_or_else(|| {
                StellarMeshError::InvalidVertexReference {
                    kind: "boundary element",
                    index,
                    vertex,
                    num_vertices: self.vertices.len(),
                }
            })?;
        }
        Ok(corners)
    }

    /// Check that every element and boundary element references only valid
    /// vertex indices.
    pub fn validate_references(&self) -> Result<(), StellarMeshError> {
        let num_vertices = self.vertices.len();
        for (index, element) in self.elements.iter().enumerate() {
            if let Some(&vertex) = element.vertices.iter().find(|&&v| v >= num_vertices) {
                return Err(StellarMeshError::InvalidVertexReference {
                    kind: "element",
                    index,
                    vertex,
                    num_vertices,
                });
            }
        }
        for (index, quad) in self.boundary.iter().enumerate() {
            if let Some(&vertex) = quad.vertices.iter().find(|&&v| v >= num_vertices) {
                return Err(StellarMeshError::InvalidVertexReference {
                    kind: "boundary element",
                    index,
                    vertex,
                    num_vertices,
                });
            }
        }
        Ok(())
    }

    /// Valence of every element face, keyed by the sorted vertex quadruple.
    ///
    /// Interior faces have valence 2, exterior faces 1. Anything above 2
    /// indicates broken topology.
    pub fn face_valences(&self) -> BTreeMap<[usize; 4], u32> {
        let mut valences = BTreeMap::new();
        for element in &self.elements {
            for face in &HEX_FACES {
                let key = face_key(face.map(|local| element.vertices[local]));
                *valences.entry(key).or_insert(0) += 1;
            }
        }
        valences
    }

    /// Conformity predicate: every face is shared by at most two elements and
    /// every valence-1 face is covered by exactly one boundary quad.
    pub fn is_conforming(&self) -> bool {
        let valences = self.face_valences();
        if valences.values().any(|&v| v > 2) {
            return false;
        }
        let boundary_keys: BTreeMap<[usize; 4], u32> = self
            .boundary
            .iter()
            .map(|quad| face_key(quad.vertices))
            .counts()
            .into_iter()
            .map(|(key, count)| (key, count as u32))
            .collect();
        for (key, &valence) in &valences {
            let covered = boundary_keys.get(key).copied().unwrap_or(0);
            if valence == 1 && covered != 1 {
                return false;
            }
            if valence == 2 && covered != 0 {
                return false;
            }
        }
        // Boundary quads must sit on actual element faces.
        boundary_keys.keys().all(|key| valences.contains_key(key))
    }
}

/// Canonical (sorted) key identifying a face independent of orientation.
pub(crate) fn face_key(mut vertices: [usize; 4]) -> [usize; 4] {
    vertices.sort_unstable();
    vertices
}
