//! Multi-block topology construction and the curvilinear pipeline stages.
//!
//! The stages run strictly in order: [`build_skeleton`] allocates the coarse
//! block topology, [`finalize`] validates and refines it, then
//! [`promote_to_high_order`] and [`project_mesh`] curve it. Each stage takes
//! exclusive mutable access to the mesh for its duration.

pub mod curvilinear;
pub mod finalize;
pub mod skeleton;

pub use curvilinear::{project_mesh, promote_to_high_order};
pub use finalize::finalize;
pub use skeleton::build_skeleton;
