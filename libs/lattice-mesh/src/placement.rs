//! # Global Placement
//!
//! Maps an element's floor pose into the host scene.
//!
//! Lattice coordinates put the beam along `z`; the scene puts it along its
//! first axis. [`AxisMapping`] is the one place that permutation lives:
//!
//! ```text
//! scene = (lattice.z, lattice.x, lattice.y)
//! ```
//!
//! The element mesh is built with its longitudinal axis on scene `x`, so it
//! only needs the rotation `Rz(yaw) · Ry(pitch) · Rx(roll)` (roll applied
//! first) and the mapped translation.

use crate::mesh::Mesh;
use glam::{DMat3, DMat4, DVec3};
use lattice_table::FloorPose;
use serde::{Deserialize, Serialize};

/// Fixed lattice → scene axis permutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisMapping;

impl AxisMapping {
    /// Maps a lattice point `(x, y, z)` to scene `(z, x, y)`.
    #[inline]
    pub fn map_point(point: DVec3) -> DVec3 {
        DVec3::new(point.z, point.x, point.y)
    }

    /// Maps a scene point back to lattice coordinates.
    #[inline]
    pub fn unmap_point(point: DVec3) -> DVec3 {
        DVec3::new(point.y, point.z, point.x)
    }

    /// The permutation as a matrix, `matrix() * p == map_point(p)`.
    pub fn matrix() -> DMat3 {
        DMat3::from_cols(DVec3::Y, DVec3::Z, DVec3::X)
    }
}

/// Placement of one element instance in the scene.
///
/// # Example
///
/// ```rust
/// use lattice_mesh::Placement;
/// use lattice_table::FloorPose;
/// use glam::DVec3;
///
/// let pose = FloorPose::new(1.0, 2.0, 3.0, 0.0, 0.0, 0.0);
/// let placement = Placement::from_floor(&pose, DVec3::ZERO);
/// assert_eq!(placement.translation, DVec3::new(3.0, 1.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Scene-space translation.
    pub translation: DVec3,
    /// Rotation about scene `z`.
    pub yaw: f64,
    /// Rotation about scene `y`.
    pub pitch: f64,
    /// Rotation about scene `x`.
    pub roll: f64,
}

impl Placement {
    /// Builds the placement for a floor pose.
    ///
    /// `origin` is the global centre in scene coordinates, subtracted from
    /// the mapped position (`(z − x_c, x − y_c, y − z_c)`).
    pub fn from_floor(floor: &FloorPose, origin: DVec3) -> Self {
        let position = AxisMapping::map_point(DVec3::new(floor.x, floor.y, floor.z));
        Self {
            translation: position - origin,
            yaw: floor.theta,
            pitch: -floor.phi,
            roll: floor.psi,
        }
    }

    /// Rotation part only.
    pub fn rotation(&self) -> DMat4 {
        DMat4::from_rotation_z(self.yaw)
            * DMat4::from_rotation_y(self.pitch)
            * DMat4::from_rotation_x(self.roll)
    }

    /// Full local → scene transform: `T · Rz(yaw) · Ry(pitch) · Rx(roll)`.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_translation(self.translation) * self.rotation()
    }

    /// Returns a copy of `mesh` in scene coordinates.
    pub fn apply(&self, mesh: &Mesh) -> Mesh {
        mesh.transformed(&self.matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn assert_vec_eq(a: DVec3, b: DVec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
    }

    #[test]
    fn test_axis_mapping_beam_axis_is_first() {
        let beam = DVec3::new(0.0, 0.0, 1.0);
        assert_eq!(AxisMapping::map_point(beam), DVec3::X);
        assert_eq!(AxisMapping::map_point(DVec3::X), DVec3::Y);
        assert_eq!(AxisMapping::map_point(DVec3::Y), DVec3::Z);
    }

    #[test]
    fn test_axis_mapping_matrix_matches_map_point() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(AxisMapping::matrix() * p, AxisMapping::map_point(p));
        assert_eq!(AxisMapping::unmap_point(AxisMapping::map_point(p)), p);
    }

    #[test]
    fn test_translation_subtracts_origin() {
        let pose = FloorPose::new(1.0, 2.0, 3.0, 0.0, 0.0, 0.0);
        let placement = Placement::from_floor(&pose, DVec3::new(0.5, 0.5, 0.5));
        assert_eq!(placement.translation, DVec3::new(2.5, 0.5, 1.5));
    }

    #[test]
    fn test_angles() {
        let pose = FloorPose::new(0.0, 0.0, 0.0, 0.1, 0.2, 0.3);
        let placement = Placement::from_floor(&pose, DVec3::ZERO);
        assert_eq!(placement.yaw, 0.1);
        assert_eq!(placement.pitch, -0.2);
        assert_eq!(placement.roll, 0.3);
    }

    #[test]
    fn test_yaw_turns_beam_axis() {
        let pose = FloorPose::new(0.0, 0.0, 0.0, FRAC_PI_2, 0.0, 0.0);
        let m = Placement::from_floor(&pose, DVec3::ZERO).matrix();
        assert_vec_eq(m.transform_vector3(DVec3::X), DVec3::Y);
    }

    #[test]
    fn test_roll_applied_before_yaw() {
        let pose = FloorPose::new(0.0, 0.0, 0.0, FRAC_PI_2, 0.0, FRAC_PI_2);
        let m = Placement::from_floor(&pose, DVec3::ZERO).matrix();
        // Rx(90°) takes y to z, then Rz(90°) leaves z alone
        assert_vec_eq(m.transform_vector3(DVec3::Y), DVec3::Z);
    }

    #[test]
    fn test_apply_moves_mesh() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        let pose = FloorPose::new(0.0, 0.0, 10.0, 0.0, 0.0, 0.0);
        let placed = Placement::from_floor(&pose, DVec3::ZERO).apply(&mesh);
        assert_eq!(placed.vertex(0), DVec3::new(10.0, 0.0, 0.0));
    }
}
