//! # Cross-Sections
//!
//! Transverse aperture loops and the sweep that carries them along an
//! element's reference trajectory:
//! - **shapes**: rectangle, ellipse and multipole loops
//! - **sweep**: straight and curved frame sweep with edge-angle correction
//!
//! ## Element frame
//!
//! Right-handed, `x` along the reference trajectory, `y` in the bend plane,
//! `z` vertical. Profiles live in the `(y, z)` plane; sweeping places them
//! at longitudinal position `s_rel ∈ [-L/2, L/2]`.

mod shapes;
mod sweep;


pub use sweep::{arc_center, edge_angle, revolve_section, sweep_matrix, SweepParams};

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// A closed loop of `(y, z)` points transverse to the beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    points: Vec<DVec2>,
}

impl Profile {
    /// Creates a profile from `(y, z)` points.
    pub fn new(points: Vec<DVec2>) -> Self {
        Self { points }
    }

    /// Returns the loop points.
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Returns the number of points in the loop.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the loop has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area in the `(y, z)` plane: positive when the loop runs
    /// counter-clockwise seen from `+x`, negative when clockwise.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        0.5 * (0..n)
            .map(|i| self.points[i].perp_dot(self.points[(i + 1) % n]))
            .sum::<f64>()
    }

    /// Lifts the loop into 3D at longitudinal offset `x`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lattice_mesh::section::Profile;
    ///
    /// let section = Profile::rectangle(1.0, 2.0).at(0.5);
    /// assert!(section.iter().all(|p| p.x == 0.5));
    /// ```
    pub fn at(&self, x: f64) -> Vec<DVec3> {
        self.points.iter().map(|p| DVec3::new(x, p.x, p.y)).collect()
    }
}
