//! Native ASCII mesh format.
//!
//! A sectioned, human-inspectable format whose header counts always match
//! the in-memory mesh:
//!
//! ```text
//! stellar-mesh v1
//! dimension 3
//! elements <count>
//! <attribute> <v0> ... <v7>        (one line per hexahedron)
//! boundary <count>
//! <attribute> <v0> ... <v3>        (one line per quad)
//! vertices <count>
//! <x> <y> <z>
//! nodes <order> <count>            (only when a node field is attached)
//! <x> <y> <z>
//! ```

use crate::mesh::HexMesh;
use crate::mesh_error::StellarMeshError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Format version tag written at the top of every file.
pub const FORMAT_HEADER: &str = "stellar-mesh v1";

/// Serialize a mesh in the native format to any writer.
pub fn write_native<W: Write>(mesh: &HexMesh, writer: &mut W) -> Result<(), StellarMeshError> {
    writeln!(writer, "{FORMAT_HEADER}")?;
    writeln!(writer, "dimension {}", mesh.dimension())?;

    writeln!(writer, "elements {}", mesh.num_elements())?;
    for element in mesh.elements() {
        write!(writer, "{}", element.attribute)?;
        for vertex in element.vertices {
            write!(writer, " {vertex}")?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "boundary {}", mesh.num_boundary_elements())?;
    for quad in mesh.boundary() {
        write!(writer, "{}", quad.attribute)?;
        for vertex in quad.vertices {
            write!(writer, " {vertex}")?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "vertices {}", mesh.num_vertices())?;
    for vertex in mesh.vertices() {
        writeln!(writer, "{} {} {}", vertex[0], vertex[1], vertex[2])?;
    }

    if let Some(nodes) = mesh.nodes() {
        writeln!(writer, "nodes {} {}", nodes.order(), nodes.num_nodes())?;
        for node in nodes.positions() {
            writeln!(writer, "{} {} {}", node[0], node[1], node[2])?;
        }
    }
    Ok(())
}

/// Save a mesh to a file in the native format.
pub fn save_mesh(mesh: &HexMesh, path: impl AsRef<Path>) -> Result<(), StellarMeshError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_native(mesh, &mut writer)?;
    writer.flush()?;
    info!("saved mesh to {}", path.display());
    Ok(())
}
