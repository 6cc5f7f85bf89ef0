//! Serialization and visualization for finalized (optionally projected)
//! meshes.
//!
//! The I/O layer sits at the collaborator boundary: it consumes the mesh and
//! produces no feedback into the pipeline. Writers are `Write`-generic with
//! thin file-path wrappers, so the same body streams to files and sockets.

pub mod glvis;
pub mod native;
pub mod vtk;

pub use glvis::{view_face_valence, view_mesh, VisualizationMode};
pub use native::{save_mesh, write_native};
pub use vtk::{save_vtk, write_vtk};
