//! Streaming to a GLVis-style interactive mesh viewer.
//!
//! Opens a TCP connection per call (default `localhost:19916`), sends the
//! `mesh` keyword followed by the native mesh body, then window title and
//! key commands selecting the attribute coloring. No session state is kept;
//! the connection closes when the writer is dropped.

use crate::io::native::write_native;
use crate::mesh::{face_key, BoundaryQuad, HexMesh, HEX_FACES};
use crate::mesh_error::StellarMeshError;
use log::info;
use std::collections::BTreeSet;
use std::io::{BufWriter, Write};
use std::net::TcpStream;

/// Attribute coloring applied by the viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisualizationMode {
    /// Plain rendering, no attribute coloring.
    #[default]
    None,
    /// Color elements by their region attribute.
    ElementId,
    /// Color boundary faces by their boundary attribute.
    BoundaryElementId,
}

impl VisualizationMode {
    /// Viewer key commands enabling the coloring mode.
    fn keys(self) -> &'static str {
        match self {
            VisualizationMode::None => "",
            VisualizationMode::ElementId => "e",
            VisualizationMode::BoundaryElementId => "b",
        }
    }
}

fn stream_mesh(
    mesh: &HexMesh,
    title: &str,
    mode: VisualizationMode,
    host: &str,
    port: u16,
) -> Result<(), StellarMeshError> {
    let stream = TcpStream::connect((host, port))?;
    let mut writer = BufWriter::new(stream);
    writeln!(writer, "mesh")?;
    write_native(mesh, &mut writer)?;
    writeln!(writer, "window_title '{title}'")?;
    let keys = mode.keys();
    if !keys.is_empty() {
        writeln!(writer, "keys {keys}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Stream a mesh to a viewer at `host:port` with the given title and
/// coloring mode.
pub fn view_mesh(
    mesh: &HexMesh,
    title: &str,
    mode: VisualizationMode,
    host: &str,
    port: u16,
) -> Result<(), StellarMeshError> {
    stream_mesh(mesh, title, mode, host, port)?;
    info!("streamed mesh to viewer at {host}:{port}");
    Ok(())
}

/// One quad per distinct element face, attributed by adjacency valence
/// (1 = true exterior surface, 2 = internal shared face).
pub fn face_valence_quads(mesh: &HexMesh) -> Vec<BoundaryQuad> {
    let valences = mesh.face_valences();
    let mut seen = BTreeSet::new();
    let mut quads = Vec::new();
    for element in mesh.elements() {
        for face in &HEX_FACES {
            let vertices = face.map(|local| element.vertices[local]);
            let key = face_key(vertices);
            if seen.insert(key) {
                quads.push(BoundaryQuad {
                    vertices,
                    attribute: valences[&key] as i32,
                });
            }
        }
    }
    quads
}

/// Stream the face-valence diagnostic view: every element face colored by
/// how many elements share it. Useful for sanity-checking block stitching
/// (a valence above 2, or an outer face at valence 2, means broken topology).
pub fn view_face_valence(mesh: &HexMesh, host: &str, port: u16) -> Result<(), StellarMeshError> {
    let mut diagnostic = mesh.clone();
    diagnostic.set_boundary(face_valence_quads(mesh));
    stream_mesh(
        &diagnostic,
        "Face valence (1 = surface, 2 = internal)",
        VisualizationMode::BoundaryElementId,
        host,
        port,
    )?;
    info!("streamed face-valence view to {host}:{port}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MeshConfig;
    use crate::topology::build_skeleton;

    #[test]
    fn skeleton_face_valences() {
        let mesh = build_skeleton(&MeshConfig::default());
        let quads = face_valence_quads(&mesh);
        // 7 hexes x 6 faces = 42 incidences over 24 distinct faces.
        assert_eq!(quads.len(), 24);
        let exterior = quads.iter().filter(|q| q.attribute == 1).count();
        let interior = quads.iter().filter(|q| q.attribute == 2).count();
        assert_eq!(exterior, 6);
        assert_eq!(interior, 18);
    }

    #[test]
    fn view_fails_cleanly_without_server() {
        let mesh = build_skeleton(&MeshConfig::default());
        // Port 1 is never listening; expect a connection error, not a panic.
        let result = view_mesh(&mesh, "test", VisualizationMode::ElementId, "127.0.0.1", 1);
        assert!(matches!(result, Err(StellarMeshError::Io(_))));
    }
}
