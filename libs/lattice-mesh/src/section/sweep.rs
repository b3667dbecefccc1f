//! # Frame Sweep
//!
//! Places a profile at longitudinal position `s_rel` of an element whose
//! reference trajectory is either straight or a circular arc of curvature
//! `g = 1/ρ`, with the pole-face edge angle interpolated from `-e1` at the
//! entrance to `e2` at the exit.
//!
//! ## Algorithm
//!
//! Straight (`g == 0`, exact branch):
//!
//! ```text
//! M = T(s_rel, 0, 0) · Rx(edge)
//! ```
//!
//! Curved:
//!
//! ```text
//! M = T(0, -ρ, 0) · Rz(-g·s_rel) · T(0, ρ, 0) · Rz(edge)
//! ```
//!
//! The curved composition rotates the bevelled profile about the arc centre
//! `(0, -ρ, 0)`, so every profile point rides a circle around it.

use super::Profile;
use glam::{DMat4, DVec3};

/// Trajectory and edge parameters of a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SweepParams {
    /// Curvature `g = angle / L`; zero for straight elements.
    pub curvature: f64,
    /// Entrance edge angle.
    pub e1: f64,
    /// Exit edge angle.
    pub e2: f64,
    /// Element length `L`.
    pub length: f64,
}

impl SweepParams {
    /// Straight sweep without edge angles.
    pub fn straight(length: f64) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }

    /// Curved sweep with edge angles.
    pub fn bend(curvature: f64, e1: f64, e2: f64, length: f64) -> Self {
        Self {
            curvature,
            e1,
            e2,
            length,
        }
    }
}

/// Edge angle at `s_rel`: `e2·f − e1·(1 − f)` with `f = s_rel/L + 0.5`.
///
/// Zero when `L == 0`.
pub fn edge_angle(s_rel: f64, params: &SweepParams) -> f64 {
    if params.length == 0.0 {
        return 0.0;
    }
    let f = s_rel / params.length + 0.5;
    params.e2 * f - params.e1 * (1.0 - f)
}

/// Affine transform taking a profile lifted at `x = 0` to its swept pose.
pub fn sweep_matrix(s_rel: f64, params: &SweepParams) -> DMat4 {
    let edge = edge_angle(s_rel, params);
    let g = params.curvature;

    if g == 0.0 {
        DMat4::from_translation(DVec3::new(s_rel, 0.0, 0.0)) * DMat4::from_rotation_x(edge)
    } else {
        let rho = 1.0 / g;
        DMat4::from_translation(DVec3::new(0.0, -rho, 0.0))
            * DMat4::from_rotation_z(-g * s_rel)
            * DMat4::from_translation(DVec3::new(0.0, rho, 0.0))
            * DMat4::from_rotation_z(edge)
    }
}

/// Sweeps a profile to longitudinal position `s_rel`.
///
/// # Example
///
/// ```rust
/// use lattice_mesh::section::{revolve_section, Profile, SweepParams};
///
/// let profile = Profile::rectangle(0.1, 0.1);
/// let section = revolve_section(&profile, 0.5, &SweepParams::straight(1.0));
/// assert!(section.iter().all(|p| (p.x - 0.5).abs() < 1e-12));
/// ```
pub fn revolve_section(profile: &Profile, s_rel: f64, params: &SweepParams) -> Vec<DVec3> {
    let matrix = sweep_matrix(s_rel, params);
    profile
        .at(0.0)
        .into_iter()
        .map(|p| matrix.transform_point3(p))
        .collect()
}

/// Centre of the reference arc in the element frame, `None` when straight.
pub fn arc_center(curvature: f64) -> Option<DVec3> {
    if curvature == 0.0 {
        None
    } else {
        Some(DVec3::new(0.0, -1.0 / curvature, 0.0))
    }
}
