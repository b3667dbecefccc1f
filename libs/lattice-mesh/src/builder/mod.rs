//! # Element Mesh Builder
//!
//! Turns one [`Element`] into a closed mesh in its local frame:
//!
//! 1. Choose the cross-section from the element key ([`ElementMeshBuilder::element_profile`])
//! 2. Choose longitudinal samples: 20 for SBEND, 2 otherwise
//! 3. Sweep the profile to every sample ([`revolve_section`])
//! 4. Stitch with end caps, normals outward ([`outward_tube`])
//!
//! Profile selection is pure; its diagnostics are logged once, by
//! [`ElementMeshBuilder::ele_mesh`].

use crate::assemble::outward_tube;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::error::{GeometryError, GeometryResult};
use crate::mesh::Mesh;
use crate::section::{revolve_section, Profile, SweepParams};
use crate::style::StyleTable;
use config::constants::{
    BEND_SAMPLES, DEGENERATE_BEND_EPSILON, ELLIPSE_POINTS, QUADRUPOLE_FOLD, SEXTUPOLE_FOLD,
    STRAIGHT_SAMPLES,
};
use glam::DVec3;
use lattice_table::{Element, ElementKind};


/// A built element mesh with the notes produced while building it.
#[derive(Debug, Clone)]
pub struct ElementMesh {
    pub mesh: Mesh,
    /// Number of cross-sections stacked along the element.
    pub sections: usize,
    /// Points per cross-section.
    pub points_per_section: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Profile and sweep chosen for an element.
#[derive(Debug, Clone)]
pub struct SectionPlan {
    pub profile: Profile,
    pub sweep: SweepParams,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds element meshes against a shared [`StyleTable`].
///
/// # Example
///
/// ```rust
/// use lattice_mesh::{ElementMeshBuilder, StyleTable};
/// use lattice_table::{Element, ElementKind};
///
/// let style = StyleTable::default();
/// let builder = ElementMeshBuilder::new(&style);
/// let built = builder.ele_mesh(&Element::new("Q1", ElementKind::Quadrupole, 0.3))?;
/// assert_eq!(built.mesh.vertex_count(), 2 * 8);
/// # Ok::<(), lattice_mesh::GeometryError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ElementMeshBuilder<'a> {
    style: &'a StyleTable,
}

impl<'a> ElementMeshBuilder<'a> {
    pub fn new(style: &'a StyleTable) -> Self {
        Self { style }
    }

    /// Longitudinal sample positions from `-L/2` to `L/2` inclusive.
    pub fn sample_positions(&self, element: &Element) -> Vec<f64> {
        let count = match element.kind {
            ElementKind::SBend(_) => BEND_SAMPLES,
            _ => STRAIGHT_SAMPLES,
        };
        let length = element.length;
        (0..count)
            .map(|i| length * i as f64 / (count - 1) as f64 - length / 2.0)
            .collect()
    }

    /// Chooses the cross-section and sweep parameters for an element.
    ///
    /// Diagnostics are collected, not logged.
    pub fn element_profile(&self, element: &Element) -> SectionPlan {
        let mut diagnostics = Vec::new();
        let key = element.key();
        let scale = self.style.x_scale(key);
        if scale.fallback {
            diagnostics.push(Diagnostic::warning(
                DiagnosticCode::MissingScale,
                &element.name,
                format!("missing {key} in scale table, using {}", scale.value),
            ));
        }
        let sc = scale.value;
        let mut sweep = SweepParams::straight(element.length);

        let profile = match &element.kind {
            ElementKind::Quadrupole => Profile::multipole(sc, QUADRUPOLE_FOLD),
            ElementKind::Sextupole => Profile::multipole(sc, SEXTUPOLE_FOLD),
            ElementKind::SBend(bend) => {
                if bend.angle.abs() < DEGENERATE_BEND_EPSILON
                    || element.length.abs() < DEGENERATE_BEND_EPSILON
                {
                    diagnostics.push(Diagnostic::info(
                        DiagnosticCode::DegenerateBend,
                        &element.name,
                        format!(
                            "bend with angle {} and length {} drawn straight",
                            bend.angle, element.length
                        ),
                    ));
                } else {
                    sweep = SweepParams::bend(
                        bend.angle / element.length,
                        bend.e1,
                        bend.e2,
                        element.length,
                    );
                }
                Profile::rectangle(sc, sc)
            }
            // Positive table radii are used as given, without the 2:1
            // height ratio of the scale-based default
            ElementKind::Wiggler(wiggler) => {
                if wiggler.radius_x > 0.0 && wiggler.radius_y > 0.0 {
                    Profile::rectangle(wiggler.radius_x, wiggler.radius_y)
                } else {
                    Profile::rectangle(sc, 2.0 * sc)
                }
            }
            ElementKind::Pipe(pipe) => {
                if pipe.radius_x == 0.0 && pipe.radius_y == 0.0 {
                    Profile::ellipse(sc, sc, ELLIPSE_POINTS)
                } else {
                    // Outer envelope: thickness grows outward
                    Profile::ellipse(
                        pipe.radius_x + pipe.thickness,
                        pipe.radius_y + pipe.thickness,
                        ELLIPSE_POINTS,
                    )
                }
            }
            ElementKind::Other(key) => {
                diagnostics.push(Diagnostic::warning(
                    DiagnosticCode::UnknownKey,
                    &element.name,
                    format!("unknown key {key}, using generic elliptical aperture"),
                ));
                Profile::ellipse(sc, sc, ELLIPSE_POINTS)
            }
            ElementKind::Marker
            | ElementKind::Drift
            | ElementKind::Lcavity
            | ElementKind::RfCavity
            | ElementKind::Solenoid
            | ElementKind::EGun
            | ElementKind::ECollimator
            | ElementKind::RCollimator
            | ElementKind::EmField
            | ElementKind::Instrument => Profile::ellipse(sc, sc, ELLIPSE_POINTS),
        };

        SectionPlan {
            profile,
            sweep,
            diagnostics,
        }
    }

    /// Cross-section of an element at `s_rel`, in the element frame.
    pub fn ele_section(&self, s_rel: f64, element: &Element) -> Vec<DVec3> {
        let plan = self.element_profile(element);
        revolve_section(&plan.profile, s_rel, &plan.sweep)
    }

    /// Builds the closed mesh of an element in its local frame, every face
    /// normal pointing outward.
    pub fn ele_mesh(&self, element: &Element) -> GeometryResult<ElementMesh> {
        log::debug!("mesh: {}", element.name);
        let plan = self.element_profile(element);
        let samples = self.sample_positions(element);

        let sections: Vec<Vec<DVec3>> = samples
            .iter()
            .map(|&s_rel| revolve_section(&plan.profile, s_rel, &plan.sweep))
            .collect();

        let winding = plan.profile.signed_area();
        let mesh = outward_tube(&sections, winding).map_err(|err| match err {
            GeometryError::SectionCountMismatch { .. } => GeometryError::invariant(format!(
                "{}: sections of one element differ in size ({err})",
                element.name
            )),
            other => other,
        })?;

        Ok(ElementMesh {
            mesh,
            sections: sections.len(),
            points_per_section: plan.profile.len(),
            diagnostics: plan.diagnostics.into_iter().map(Diagnostic::report).collect(),
        })
    }
}
