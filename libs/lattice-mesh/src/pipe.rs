//! # Centered Pipe
//!
//! Open aperture surfaces for vacuum chambers. The surface is the inner
//! wall only; giving it thickness is left to the host (a solidify step
//! expanding outward by [`ApertureMesh::thickness`]).

use crate::assemble::build_aperture_mesh;
use crate::error::GeometryResult;
use crate::mesh::Mesh;
use crate::section::{revolve_section, Profile, SweepParams};
use config::constants::{BEND_SAMPLES, ELLIPSE_POINTS, STRAIGHT_SAMPLES};
use serde::{Deserialize, Serialize};

/// Aperture cross-section shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApertureType {
    #[default]
    Rectangular,
    Elliptical,
}

/// Parameters of a centered pipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeSpec {
    pub length: f64,
    /// Curvature `g`; zero for a straight pipe.
    pub curvature: f64,
    /// Horizontal half-aperture.
    pub a: f64,
    /// Vertical half-aperture.
    pub b: f64,
    /// Half-aperture toward `+y`; zero means same as `a`.
    pub a2: f64,
    /// Half-aperture toward `+z`; zero means same as `b`.
    pub b2: f64,
    /// Points per elliptical section.
    pub points: usize,
    pub thickness: f64,
    pub aperture: ApertureType,
}

impl Default for PipeSpec {
    fn default() -> Self {
        Self {
            length: 1.0,
            curvature: 0.0,
            a: 1.0,
            b: 2.0,
            a2: 0.0,
            b2: 0.0,
            points: ELLIPSE_POINTS,
            thickness: 0.01,
            aperture: ApertureType::Rectangular,
        }
    }
}

impl PipeSpec {
    pub fn elliptical(a: f64, b: f64, length: f64) -> Self {
        Self {
            a,
            b,
            length,
            aperture: ApertureType::Elliptical,
            ..Self::default()
        }
    }

    pub fn rectangular(a: f64, b: f64, length: f64) -> Self {
        Self {
            a,
            b,
            length,
            aperture: ApertureType::Rectangular,
            ..Self::default()
        }
    }

    pub fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = curvature;
        self
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Sets separate half-apertures for the positive `y` and `z` sides.
    pub fn with_positive_limits(mut self, a2: f64, b2: f64) -> Self {
        self.a2 = a2;
        self.b2 = b2;
        self
    }

    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// Baseline cross-section.
    pub fn profile(&self) -> Profile {
        match self.aperture {
            ApertureType::Elliptical => {
                Profile::ellipse_quadrants(self.a, self.b, self.points, self.a2, self.b2)
            }
            ApertureType::Rectangular => {
                let a2 = if self.a2 == 0.0 { self.a } else { self.a2 };
                let b2 = if self.b2 == 0.0 { self.b } else { self.b2 };
                Profile::rectangle_asymmetric(self.a, self.b, a2, b2)
            }
        }
    }

    /// Longitudinal sample positions, `-L/2..=L/2`.
    pub fn sample_positions(&self) -> Vec<f64> {
        let count = if self.curvature == 0.0 {
            STRAIGHT_SAMPLES
        } else {
            BEND_SAMPLES
        };
        (0..count)
            .map(|i| self.length * i as f64 / (count - 1) as f64 - self.length / 2.0)
            .collect()
    }
}

/// Open pipe surface and the wall thickness to give it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApertureMesh {
    pub mesh: Mesh,
    pub thickness: f64,
}

/// Builds the open inner surface of a pipe centered on the element origin.
///
/// # Example
///
/// ```rust
/// use lattice_mesh::{centered_pipe, PipeSpec};
///
/// let pipe = centered_pipe(&PipeSpec::rectangular(0.02, 0.01, 1.0))?;
/// assert_eq!(pipe.mesh.vertex_count(), 8);
/// assert_eq!(pipe.mesh.face_count(), 4);
/// # Ok::<(), lattice_mesh::GeometryError>(())
/// ```
pub fn centered_pipe(spec: &PipeSpec) -> GeometryResult<ApertureMesh> {
    let profile = spec.profile();
    let sweep = SweepParams::bend(spec.curvature, 0.0, 0.0, spec.length);
    let sections: Vec<_> = spec
        .sample_positions()
        .into_iter()
        .map(|s_rel| revolve_section(&profile, s_rel, &sweep))
        .collect();

    Ok(ApertureMesh {
        mesh: build_aperture_mesh(&sections)?,
        thickness: spec.thickness,
    })
}
