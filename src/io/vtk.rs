//! Legacy VTK (`.vtk`) writer for ParaView.
//!
//! Emits an ASCII `UNSTRUCTURED_GRID` dataset with hexahedral cells and the
//! element attribute as a `CELL_DATA` scalar, which ParaView reads natively
//! and can color by region (or by the flipped-element sentinels after a
//! validation scan).

use crate::mesh::HexMesh;
use crate::mesh_error::StellarMeshError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// VTK cell type id for a linear hexahedron.
const VTK_HEXAHEDRON: i32 = 12;

/// Serialize a mesh as an ASCII legacy-VTK unstructured grid.
pub fn write_vtk<W: Write>(mesh: &HexMesh, writer: &mut W) -> Result<(), StellarMeshError> {
    writeln!(writer, "# vtk DataFile Version 3.0")?;
    writeln!(writer, "stellar-mesh")?;
    writeln!(writer, "ASCII")?;
    writeln!(writer, "DATASET UNSTRUCTURED_GRID")?;

    writeln!(writer, "POINTS {} double", mesh.num_vertices())?;
    for vertex in mesh.vertices() {
        writeln!(writer, "{} {} {}", vertex[0], vertex[1], vertex[2])?;
    }

    let total_size = mesh.num_elements() * 9;
    writeln!(writer, "CELLS {} {}", mesh.num_elements(), total_size)?;
    for element in mesh.elements() {
        write!(writer, "8")?;
        for vertex in element.vertices {
            write!(writer, " {vertex}")?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "CELL_TYPES {}", mesh.num_elements())?;
    for _ in mesh.elements() {
        writeln!(writer, "{VTK_HEXAHEDRON}")?;
    }

    writeln!(writer, "CELL_DATA {}", mesh.num_elements())?;
    writeln!(writer, "SCALARS attribute int 1")?;
    writeln!(writer, "LOOKUP_TABLE default")?;
    for element in mesh.elements() {
        writeln!(writer, "{}", element.attribute)?;
    }
    Ok(())
}

/// Save a mesh as a ParaView-compatible `.vtk` file.
///
/// `base_name` gets the `.vtk` extension appended when it has none.
pub fn save_vtk(mesh: &HexMesh, base_name: impl AsRef<Path>) -> Result<(), StellarMeshError> {
    let mut path = base_name.as_ref().to_path_buf();
    if path.extension().is_none() {
        path.set_extension("vtk");
    }
    let mut writer = BufWriter::new(File::create(&path)?);
    write_vtk(mesh, &mut writer)?;
    writer.flush()?;
    info!("saved VTK dataset to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MeshConfig;
    use crate::topology::build_skeleton;

    #[test]
    fn vtk_body_has_expected_sections() {
        let mesh = build_skeleton(&MeshConfig::default());
        let mut buffer = Vec::new();
        write_vtk(&mesh, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("DATASET UNSTRUCTURED_GRID"));
        assert!(text.contains("POINTS 16 double"));
        assert!(text.contains("CELLS 7 63"));
        assert!(text.contains("CELL_TYPES 7"));
        assert!(text.contains("SCALARS attribute int 1"));
    }

    #[test]
    fn extension_is_appended_to_base_name() {
        let mesh = build_skeleton(&MeshConfig::default());
        let base = std::env::temp_dir().join("stellar_mesh_vtk_test");
        save_vtk(&mesh, &base).unwrap();
        let path = base.with_extension("vtk");
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
