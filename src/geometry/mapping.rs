//! Coordinate transforms mapping the logical block topology onto the curved
//! stellar domain.
//!
//! The composed map ([`transform_point`]) takes a point of the logical
//! cubed-sphere skeleton and produces its physical image: an equiangular
//! cube-to-sphere remap blended smoothly between the cubical core and the
//! spherical envelope, followed by oblate flattening, followed by a radial
//! Kelvin-style expansion for points beyond the stellar surface. Positions
//! are `[f64; 3]` updated in place.

use crate::config::MeshConfig;
use std::f64::consts::FRAC_PI_4;

/// Euclidean norm of a position.
fn norm(p: [f64; 3]) -> f64 {
    (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt()
}

/// Chebyshev (`ℓ∞`) norm: the half-width of the cube shell through `p`.
fn linf(p: [f64; 3]) -> f64 {
    p[0].abs().max(p[1].abs()).max(p[2].abs())
}

/// Apply an equiangular (gnomonic-style) cube-face projection in place.
///
/// The largest-magnitude component is taken as the cube half-width; the two
/// transverse coordinates are remapped by equal angular increments:
/// `p_i' = p_d · tan(π/4 · p_i / p_d)`. For an x-dominant point this is the
/// classical `y' = x · tan(π/4 · y/x)`, `z' = x · tan(π/4 · z/x)` form.
///
/// Singular at the cube center; a zero dominant component leaves the point
/// untouched. Callers guard the origin through `MeshConfig::r_instability`.
pub fn apply_equiangular(pos: &mut [f64; 3]) {
    let mut dominant = 0;
    for axis in 1..3 {
        if pos[axis].abs() > pos[dominant].abs() {
            dominant = axis;
        }
    }
    let h = pos[dominant];
    if h == 0.0 {
        return;
    }
    for axis in 0..3 {
        if axis != dominant {
            pos[axis] = h * (FRAC_PI_4 * pos[axis] / h).tan();
        }
    }
}

/// Apply oblate spheroidal flattening in place.
///
/// Scales the third coordinate by `1 − flattening`; `flattening = 0` is the
/// identity.
pub fn apply_spheroidal(pos: &mut [f64; 3], config: &MeshConfig) {
    pos[2] *= 1.0 - config.flattening;
}

/// Apply the Kelvin-style exterior expansion in place.
///
/// Rescales the radius so the bounded logical shell `[r_star, r_infinity)`
/// maps onto the unbounded physical exterior `[r_star, ∞)`:
///
/// `ρ' = r_star + (r_infinity − r_star) · (ρ − r_star) / (r_infinity − ρ)`
///
/// `ρ = r_star` is a fixed point and `ρ'` grows without bound as the logical
/// radius approaches `r_infinity`. Direction is preserved. Behavior below
/// `r_star` is unspecified; callers branch on radius before invoking.
pub fn apply_kelvin(pos: &mut [f64; 3], config: &MeshConfig) {
    let rho = norm(*pos);
    if rho == 0.0 {
        return;
    }
    let span = config.r_infinity - config.r_star;
    let expanded = config.r_star + span * (rho - config.r_star) / (config.r_infinity - rho);
    let scale = expanded / rho;
    for coordinate in pos.iter_mut() {
        *coordinate *= scale;
    }
}

/// Smooth core-to-envelope blend weight at radius `rho`.
///
/// Logistic in `(rho − r_core)` scaled by `core_steepness`: 1/2 at the core
/// radius, approaching 0 toward the center and 1 in the envelope. Monotonic
/// and continuous everywhere, so the composed transform has no seam at
/// `r_core`.
fn envelope_weight(rho: f64, config: &MeshConfig) -> f64 {
    1.0 / (1.0 + (-config.core_steepness * (rho - config.r_core)).exp())
}

/// Map a logical skeleton point to the curvilinear physical domain in place.
///
/// Points within `r_instability` of the origin pass through unchanged.
/// Otherwise the point is blended between its logical position (core
/// shaping) and its cubed-sphere image (the equiangular remap renormalized
/// onto the sphere through its cube shell), flattened spheroidally, and,
/// if the result lies beyond `r_star`, expanded by the Kelvin transform
/// into the exterior domain.
///
/// On-axis points are fixed points of the cube-to-sphere map, so the
/// composed transform is the identity on axes up to `r_star` and matches
/// [`apply_kelvin`] beyond it (for `flattening = 0`).
///
/// `_attribute` is the owning element's region attribute; it does not alter
/// behavior today and is kept as a seam for per-region mapping policies.
pub fn transform_point(pos: &mut [f64; 3], config: &MeshConfig, _attribute: i32) {
    let rho = norm(*pos);
    if rho < config.r_instability {
        return;
    }

    // Cubed-sphere image: equiangular remap, then renormalize the radius to
    // the half-width of the cube shell the point sits on.
    let shell = linf(*pos);
    let mut sphere = *pos;
    apply_equiangular(&mut sphere);
    let sphere_norm = norm(sphere);
    if sphere_norm > 0.0 {
        let rescale = shell / sphere_norm;
        for coordinate in sphere.iter_mut() {
            *coordinate *= rescale;
        }
    }

    let w = envelope_weight(rho, config);
    for axis in 0..3 {
        pos[axis] += w * (sphere[axis] - pos[axis]);
    }

    apply_spheroidal(pos, config);

    if norm(*pos) > config.r_star {
        apply_kelvin(pos, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn equiangular_x_dominant() {
        let mut pos = [1.0, 0.5, -0.25];
        apply_equiangular(&mut pos);
        assert!(approx(pos[0], 1.0));
        assert!(approx(pos[1], (FRAC_PI_4 * 0.5).tan()));
        assert!(approx(pos[2], (FRAC_PI_4 * -0.25).tan()));
    }

    #[test]
    fn equiangular_z_dominant_remaps_transverse() {
        let mut pos = [0.5, -0.25, 1.0];
        apply_equiangular(&mut pos);
        assert!(approx(pos[2], 1.0));
        assert!(approx(pos[0], (FRAC_PI_4 * 0.5).tan()));
        assert!(approx(pos[1], (FRAC_PI_4 * -0.25).tan()));
    }

    #[test]
    fn equiangular_face_center_is_fixed() {
        let mut pos = [0.0, 2.0, 0.0];
        apply_equiangular(&mut pos);
        assert_eq!(pos, [0.0, 2.0, 0.0]);
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
    fn spheroidal_zero_flattening_is_identity() {
        let config = MeshConfig::default();
        let mut pos = [1.0, 2.0, 3.0];
        apply_spheroidal(&mut pos, &config);
        assert_eq!(pos, [1.0, 2.0, 3.0]);
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
    fn kelvin_fixes_the_stellar_surface() {
        let config = MeshConfig::default();
        let mut pos = [0.0, 5.0, 0.0];
        apply_kelvin(&mut pos, &config);
        assert!(approx(pos[1], 5.0));
    }

    #[test]
    fn kelvin_preserves_direction() {
        let config = MeshConfig::default();
        let mut pos = [3.6, 3.6, 1.8];
        let before = pos;
        apply_kelvin(&mut pos, &config);
        let rho_before = (before[0] * before[0] + before[1] * before[1] + before[2] * before[2])
            .sqrt();
        let rho_after = (pos[0] * pos[0] + pos[1] * pos[1] + pos[2] * pos[2]).sqrt();
        for axis in 0..3 {
            assert!(approx(pos[axis] / rho_after, before[axis] / rho_before));
        }
    }

    #[test]
    fn transform_identity_near_origin() {
        let config = MeshConfig::default();
        let mut pos = [1e-15, 0.0, 0.0];
        transform_point(&mut pos, &config, 1);
        assert_eq!(pos, [1e-15, 0.0, 0.0]);
    }

    #[test]
    fn transform_axis_inside_core_unchanged() {
        let config = MeshConfig::default();
        let mut pos = [1.0, 0.0, 0.0];
        transform_point(&mut pos, &config, 1);
        assert!(approx(pos[0], 1.0));
        assert!(approx(pos[1], 0.0));
        assert!(approx(pos[2], 0.0));
    }

    #[test]
    fn transform_axis_envelope_unchanged() {
        let config = MeshConfig::default();
        let mut pos = [3.0, 0.0, 0.0];
        transform_point(&mut pos, &config, 2);
        assert!(approx(pos[0], 3.0));
        assert!(approx(pos[1], 0.0));
        assert!(approx(pos[2], 0.0));
    }

    #[test]
    fn transform_axis_outside_star_matches_kelvin() {
        let config = MeshConfig::default();
        let mut pos = [5.5, 0.0, 0.0];
        transform_point(&mut pos, &config, 2);
        assert!(approx(pos[0], 6.0));
        assert!(approx(pos[1], 0.0));
        assert!(approx(pos[2], 0.0));
    }

    #[test]
    fn transform_is_continuous_across_core_radius() {
        let config = MeshConfig::default();
        let eps = 1e-9;
        let mut below = [config.r_core - eps, config.r_core - eps, 0.0];
        let mut above = [config.r_core + eps, config.r_core + eps, 0.0];
        transform_point(&mut below, &config, 1);
        transform_point(&mut above, &config, 2);
        for axis in 0..3 {
            assert!((below[axis] - above[axis]).abs() < 1e-6);
        }
    }

    #[test]
    fn transform_pulls_cube_diagonal_toward_sphere() {
        let config = MeshConfig::default();
        // Outer-cube corner of the skeleton: logical radius r_star * sqrt(3).
        let s = config.r_star;
        let mut pos = [s, s, s];
        transform_point(&mut pos, &config, 2);
        let rho = norm(pos);
        // Deep in the envelope the blend weight is ~1, so the corner lands
        // close to the sphere of radius r_star (then barely Kelvin-expanded).
        assert!(rho > config.r_star - 1e-6);
        assert!(rho < config.r_star * 1.1);
    }
}
