//! Pointwise coordinate transforms for the curvilinear star geometry.
//!
//! Everything in this module is a deterministic, side-effect-free function of
//! its inputs; the only mutation is the in-place rewrite of the position
//! passed to it.

pub mod mapping;

pub use mapping::{apply_equiangular, apply_kelvin, apply_spheroidal, transform_point};
