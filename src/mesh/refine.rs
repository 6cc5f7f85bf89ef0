//! Uniform refinement of hexahedral meshes.
//!
//! One pass splits every hexahedron into eight and every boundary quad into
//! four. Mid-edge, face-center, and element-center vertices are created once
//! and reused across neighboring elements by keying them on the sorted set of
//! corner vertices they interpolate, so refinement preserves conformity.
//! Boundary quads resolve their mid-edge and center vertices through the same
//! cache, keeping them glued to the volume faces they cover.
//!
//! Refinement invalidates any attached high-order node field; the pipeline
//! orders all refinement strictly before promotion so the mapping never has
//! to be re-run per new node.

use crate::mesh_error::StellarMeshError;
use log::debug;
use std::collections::BTreeMap;

use super::{BoundaryQuad, Hexahedron, HexMesh};

/// Lattice coordinates of the standard hexahedron corners.
const CORNER_LATTICE: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Corners of a hexahedron supporting lattice ordinate `a` in one direction:
/// endpoints support themselves, the midpoint supports both.
fn support(a: usize) -> &'static [usize] {
    match a {
        0 => &[0],
        1 => &[0, 1],
        _ => &[1],
    }
}

/// Resolve (creating on demand) the vertex interpolating the given corner
/// set, identified by its sorted global-vertex key.
fn interpolated_vertex(
    mesh: &mut HexMesh,
    cache: &mut BTreeMap<Vec<usize>, usize>,
    supporting: &[usize],
) -> usize {
    if supporting.len() == 1 {
        return supporting[0];
    }
    let mut key: Vec<usize> = supporting.to_vec();
    key.sort_unstable();
    if let Some(&existing) = cache.get(&key) {
        return existing;
    }
    let mut position = [0.0; 3];
    for &vertex in supporting {
        let p = mesh.vertices()[vertex];
        position[0] += p[0];
        position[1] += p[1];
        position[2] += p[2];
    }
    let scale = 1.0 / supporting.len() as f64;
    for coordinate in position.iter_mut() {
        *coordinate *= scale;
    }
    let created = mesh.add_vertex(position);
    cache.insert(key, created);
    created
}

/// Vertex at lattice position `(a, b, c)` of the 3x3x3 refinement lattice of
/// a hexahedron with the given corner vertices.
fn lattice_vertex(
    mesh: &mut HexMesh,
    cache: &mut BTreeMap<Vec<usize>, usize>,
    corners: &[usize; 8],
    a: usize,
    b: usize,
    c: usize,
) -> usize {
    let mut supporting = Vec::with_capacity(8);
    for (slot, lattice) in CORNER_LATTICE.iter().enumerate() {
        if support(a).contains(&lattice[0])
            && support(b).contains(&lattice[1])
            && support(c).contains(&lattice[2])
        {
            supporting.push(corners[slot]);
        }
    }
    interpolated_vertex(mesh, cache, &supporting)
}

/// Apply one uniform refinement pass in place.
pub fn uniform_refine(mesh: &mut HexMesh) -> Result<(), StellarMeshError> {
    mesh.validate_references()?;
    let mut cache: BTreeMap<Vec<usize>, usize> = BTreeMap::new();

    let coarse_elements: Vec<Hexahedron> = mesh.elements().to_vec();
    let mut refined_elements = Vec::with_capacity(coarse_elements.len() * 8);
    for element in &coarse_elements {
        // Full 3x3x3 lattice of this element, t-major.
        let mut lattice = [[[0usize; 3]; 3]; 3];
        for (c, plane) in lattice.iter_mut().enumerate() {
            for (b, row) in plane.iter_mut().enumerate() {
                for (a, slot) in row.iter_mut().enumerate() {
                    *slot = lattice_vertex(mesh, &mut cache, &element.vertices, a, b, c);
                }
            }
        }
        for c in 0..2 {
            for b in 0..2 {
                for a in 0..2 {
                    refined_elements.push(Hexahedron {
                        vertices: [
                            lattice[c][b][a],
                            lattice[c][b][a + 1],
                            lattice[c][b + 1][a + 1],
                            lattice[c][b + 1][a],
                            lattice[c + 1][b][a],
                            lattice[c + 1][b][a + 1],
                            lattice[c + 1][b + 1][a + 1],
                            lattice[c + 1][b + 1][a],
                        ],
                        attribute: element.attribute,
                    });
                }
            }
        }
    }

    let coarse_boundary: Vec<BoundaryQuad> = mesh.boundary().to_vec();
    let mut refined_boundary = Vec::with_capacity(coarse_boundary.len() * 4);
    for quad in &coarse_boundary {
        let [q0, q1, q2, q3] = quad.vertices;
        let m01 = interpolated_vertex(mesh, &mut cache, &[q0, q1]);
        let m12 = interpolated_vertex(mesh, &mut cache, &[q1, q2]);
        let m23 = interpolated_vertex(mesh, &mut cache, &[q2, q3]);
        let m30 = interpolated_vertex(mesh, &mut cache, &[q3, q0]);
        let center = interpolated_vertex(mesh, &mut cache, &[q0, q1, q2, q3]);
        refined_boundary.push(BoundaryQuad {
            vertices: [q0, m01, center, m30],
            attribute: quad.attribute,
        });
        refined_boundary.push(BoundaryQuad {
            vertices: [m01, q1, m12, center],
            attribute: quad.attribute,
        });
        refined_boundary.push(BoundaryQuad {
            vertices: [center, m12, q2, m23],
            attribute: quad.attribute,
        });
        refined_boundary.push(BoundaryQuad {
            vertices: [m30, center, m23, q3],
            attribute: quad.attribute,
        });
    }

    mesh.elements = refined_elements;
    mesh.boundary = refined_boundary;
    mesh.clear_nodes();
    debug!(
        "uniform refinement pass: {} vertices, {} elements, {} boundary quads",
        mesh.num_vertices(),
        mesh.num_elements(),
        mesh.num_boundary_elements()
    );
    Ok(())
}
