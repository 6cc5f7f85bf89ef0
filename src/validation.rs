//! Post-hoc orientation scans for projected meshes.
//!
//! Aggressive flattening or a steep core blend can invert elements near the
//! instability radius. These scans tag the offenders through the reserved
//! sentinel attributes ([`ATTR_FLIPPED_ELEMENT`], [`ATTR_FLIPPED_BOUNDARY`])
//! for downstream inspection or exclusion; inverted geometry is never a hard
//! failure. Both scans are idempotent and have no side effect beyond the
//! attribute rewrite.

use crate::mesh::{face_key, HexMesh, ATTR_FLIPPED_BOUNDARY, ATTR_FLIPPED_ELEMENT, HEX_FACES};
use crate::mesh_error::StellarMeshError;
use log::warn;
use std::collections::BTreeMap;

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn signed_tet_volume(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> f64 {
    dot(sub(b, a), cross(sub(c, a), sub(d, a))) / 6.0
}

/// Signed volume of a hexahedron from its corner positions, via a five-tet
/// decomposition. Negative values indicate inverted orientation.
pub fn signed_hex_volume(corners: &[[f64; 3]; 8]) -> f64 {
    signed_tet_volume(corners[0], corners[1], corners[3], corners[4])
        + signed_tet_volume(corners[1], corners[2], corners[3], corners[6])
        + signed_tet_volume(corners[1], corners[3], corners[4], corners[6])
        + signed_tet_volume(corners[1], corners[4], corners[5], corners[6])
        + signed_tet_volume(corners[3], corners[4], corners[6], corners[7])
}

fn centroid(points: &[[f64; 3]]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for p in points {
        out[0] += p[0];
        out[1] += p[1];
        out[2] += p[2];
    }
    let scale = 1.0 / points.len() as f64;
    [out[0] * scale, out[1] * scale, out[2] * scale]
}

/// Mark volume elements whose Jacobian (signed volume) is non-positive with
/// the reserved attribute `999`. Returns the number of elements marked.
pub fn mark_flipped_elements(mesh: &mut HexMesh) -> Result<usize, StellarMeshError> {
    let mut flipped = 0usize;
    for index in 0..mesh.num_elements() {
        let corners = mesh.element_corners(index)?;
        if signed_hex_volume(&corners) <= 0.0 {
            mesh.elements_mut()[index].attribute = ATTR_FLIPPED_ELEMENT;
            flipped += 1;
        }
    }
    if flipped > 0 {
        warn!("marked {flipped} flipped volume elements");
    }
    Ok(flipped)
}

/// Mark boundary quads whose outward normal points into their adjacent
/// element with the reserved attribute `500`. Returns the number marked.
///
/// A boundary quad `[q0, q1, q2, q3]` is expected to have
/// `(q1 − q0) × (q3 − q0)` pointing away from the element it bounds.
pub fn mark_flipped_boundary_elements(mesh: &mut HexMesh) -> Result<usize, StellarMeshError> {
    // Element centroid per face key, for the faces that sit on the boundary.
    let mut face_owner: BTreeMap<[usize; 4], [f64; 3]> = BTreeMap::new();
    for index in 0..mesh.num_elements() {
        let element = mesh.elements()[index];
        let corners = mesh.element_corners(index)?;
        let element_centroid = centroid(&corners);
        for face in &HEX_FACES {
            let key = face_key(face.map(|local| element.vertices[local]));
            face_owner.insert(key, element_centroid);
        }
    }

    let mut flipped = 0usize;
    for index in 0..mesh.num_boundary_elements() {
        let quad = mesh.boundary()[index];
        let corners = mesh.boundary_corners(index)?;
        let normal = cross(sub(corners[1], corners[0]), sub(corners[3], corners[0]));
        let Some(&owner_centroid) = face_owner.get(&face_key(quad.vertices)) else {
            // Quad on no element face at all; flag it rather than skip it.
            mesh.boundary_mut()[index].attribute = ATTR_FLIPPED_BOUNDARY;
            flipped += 1;
            continue;
        };
        let outward = sub(centroid(&corners), owner_centroid);
        if dot(normal, outward) <= 0.0 {
            mesh.boundary_mut()[index].attribute = ATTR_FLIPPED_BOUNDARY;
            flipped += 1;
        }
    }
    if flipped > 0 {
        warn!("marked {flipped} flipped boundary elements");
    }
    Ok(flipped)
}
