//! Pointwise transform behavior through the public API.

use proptest::prelude::*;
use stellar_mesh::config::MeshConfig;
use stellar_mesh::geometry::{
    apply_equiangular, apply_kelvin, apply_spheroidal, transform_point,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn equiangular_basic_transform() {
    let mut pos = [1.0, 0.5, -0.25];
    apply_equiangular(&mut pos);
    let expected_y = (std::f64::consts::PI / 4.0 * 0.5).tan();
    let expected_z = (std::f64::consts::PI / 4.0 * -0.25).tan();
    assert!(approx(pos[0], 1.0));
    assert!(approx(pos[1], expected_y));
    assert!(approx(pos[2], expected_z));
}

#[test]
fn spheroidal_flattens_z() {
    let config = MeshConfig {
        flattening: 0.2,
        ..MeshConfig::default()
    };
    let mut pos = [0.0, 0.0, 10.0];
    apply_spheroidal(&mut pos, &config);
    assert!(approx(pos[2], 8.0));
}

#[test]
fn kelvin_expands_outside_star() {
    let config = MeshConfig::default();
    let mut pos = [5.5, 0.0, 0.0];
    apply_kelvin(&mut pos, &config);
    assert!(approx(pos[0], 6.0));
    assert!(approx(pos[1], 0.0));
    assert!(approx(pos[2], 0.0));
}

#[test]
fn transform_axis_inside_core_no_change() {
    let config = MeshConfig::default();
    let mut pos = [1.0, 0.0, 0.0];
    transform_point(&mut pos, &config, 0);
    assert!(approx(pos[0], 1.0));
    assert!(approx(pos[1], 0.0));
    assert!(approx(pos[2], 0.0));
}

#[test]
fn transform_axis_envelope_no_change() {
    let config = MeshConfig::default();
    let mut pos = [3.0, 0.0, 0.0];
    transform_point(&mut pos, &config, 0);
    assert!(approx(pos[0], 3.0));
    assert!(approx(pos[1], 0.0));
    assert!(approx(pos[2], 0.0));
}

#[test]
fn transform_axis_outside_star_kelvin_expands() {
    let config = MeshConfig::default();
    let mut pos = [5.5, 0.0, 0.0];
    transform_point(&mut pos, &config, 0);
    assert!(approx(pos[0], 6.0));
    assert!(approx(pos[1], 0.0));
    assert!(approx(pos[2], 0.0));
}

#[test]
fn transform_works_on_all_axes() {
    let config = MeshConfig::default();
    for axis in 0..3 {
        let mut pos = [0.0; 3];
        pos[axis] = 3.0;
        transform_point(&mut pos, &config, 0);
        assert!(approx(pos[axis], 3.0), "axis {axis} moved to {}", pos[axis]);
    }
}

proptest! {
    /// The composed transform never produces NaN/Inf anywhere on the logical
    /// skeleton domain, for any configuration on the valid parameter ranges.
    #[test]
    fn transform_is_finite_on_valid_domain(
        r_core in 0.5f64..2.0,
        r_star in 4.0f64..6.0,
        exterior_span in 1.0f64..3.0,
        core_steepness in 0.5f64..4.0,
        flattening in 0.0f64..0.5,
        x in -1.0f64..1.0,
        y in -1.0f64..1.0,
        z in -1.0f64..1.0,
    ) {
        let config = MeshConfig {
            r_core,
            r_star,
            r_infinity: r_star + exterior_span,
            flattening,
            core_steepness,
            ..MeshConfig::default()
        };
        let mut pos = [x * r_star, y * r_star, z * r_star];
        transform_point(&mut pos, &config, 1);
        prop_assert!(pos.iter().all(|coordinate| coordinate.is_finite()));
    }
}
