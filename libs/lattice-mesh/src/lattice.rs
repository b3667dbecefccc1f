//! # Lattice Build
//!
//! Builds every element of a lattice into a placed, coloured mesh object.
//!
//! Per-element builds are independent and run on the rayon pool; the
//! [`StyleTable`] is borrowed immutably for the whole batch. Output order
//! follows input order. A failing element is recorded in
//! [`LatticeScene::failures`] and never stops the others.

use crate::builder::ElementMeshBuilder;
use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::error::{GeometryError, GeometryResult};
use crate::mesh::Mesh;
use crate::placement::{AxisMapping, Placement};
use crate::style::StyleTable;
use config::constants::{POINT_LIKE_KEYS, POINT_LIKE_LENGTH, PUNCH_LENGTH_FACTOR};
use glam::DVec3;
use lattice_table::{CadModelRef, Element, ElementKind, FloorAxis, PipeParams};
use rayon::prelude::*;
use std::borrow::Cow;

/// What to do with an element before building it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthDecision {
    /// Build as given.
    Build,
    /// Build with this length instead.
    Substitute(f64),
    /// Do not build.
    Skip,
}

/// Handling of elements with `L == 0`.
///
/// Point-like keys get a small substitute length so they still show up;
/// every other zero-length element is skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroLengthPolicy {
    pub point_like_keys: Vec<String>,
    pub substitute_length: f64,
}

impl Default for ZeroLengthPolicy {
    fn default() -> Self {
        Self {
            point_like_keys: POINT_LIKE_KEYS.iter().map(|key| key.to_string()).collect(),
            substitute_length: POINT_LIKE_LENGTH,
        }
    }
}

impl ZeroLengthPolicy {
    /// Adds a key to the point-like set.
    pub fn with_point_like(mut self, key: impl Into<String>) -> Self {
        self.point_like_keys.push(key.into());
        self
    }

    pub fn with_substitute_length(mut self, length: f64) -> Self {
        self.substitute_length = length;
        self
    }

    pub fn resolve(&self, element: &Element) -> LengthDecision {
        if element.length != 0.0 {
            LengthDecision::Build
        } else if self.point_like_keys.iter().any(|key| key == element.key()) {
            LengthDecision::Substitute(self.substitute_length)
        } else {
            LengthDecision::Skip
        }
    }
}

/// Options for a batch build.
#[derive(Debug, Clone)]
pub struct LatticeOptions {
    pub style: StyleTable,
    pub zero_length: ZeroLengthPolicy,
    /// Scene-space point subtracted from every translation.
    pub origin: DVec3,
    /// Also build the hole-cutting mesh for thick pipes.
    pub pipe_punch: bool,
}

impl Default for LatticeOptions {
    fn default() -> Self {
        Self {
            style: StyleTable::default(),
            zero_length: ZeroLengthPolicy::default(),
            origin: DVec3::ZERO,
            pipe_punch: true,
        }
    }
}

impl LatticeOptions {
    pub fn with_style(mut self, style: StyleTable) -> Self {
        self.style = style;
        self
    }

    pub fn with_origin(mut self, origin: DVec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_zero_length(mut self, policy: ZeroLengthPolicy) -> Self {
        self.zero_length = policy;
        self
    }

    pub fn with_pipe_punch(mut self, enabled: bool) -> Self {
        self.pipe_punch = enabled;
        self
    }
}

/// One built element, ready for a host scene.
///
/// `mesh` is in the element frame; `placement` takes it to the scene.
#[derive(Debug, Clone)]
pub struct ElementObject {
    pub name: String,
    pub key: String,
    pub index: i64,
    pub mesh: Mesh,
    pub placement: Placement,
    pub color: [f32; 4],
    /// External CAD asset referenced by the element description.
    pub cad_model: Option<CadModelRef>,
    /// Solid to subtract from neighbours, for thick pipes.
    pub punch: Option<Mesh>,
}

impl ElementObject {
    /// The element mesh in scene coordinates.
    pub fn scene_mesh(&self) -> Mesh {
        self.placement.apply(&self.mesh)
    }
}

/// An element whose mesh could not be built.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFailure {
    pub name: String,
    pub error: GeometryError,
}

/// Result of a batch build.
#[derive(Debug, Clone, Default)]
pub struct LatticeScene {
    pub objects: Vec<ElementObject>,
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<ElementFailure>,
}

impl LatticeScene {
    /// True when no element failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// First object with the given name.
    pub fn object(&self, name: &str) -> Option<&ElementObject> {
        self.objects.iter().find(|object| object.name == name)
    }
}

struct ElementOutcome {
    object: Option<ElementObject>,
    diagnostics: Vec<Diagnostic>,
    failure: Option<ElementFailure>,
}

/// Builds all elements of a lattice.
///
/// # Example
///
/// ```rust
/// use lattice_mesh::{build_lattice, LatticeOptions};
/// use lattice_table::{Element, ElementKind};
///
/// let lattice = vec![
///     Element::new("BEGINNING", ElementKind::Marker, 0.0),
///     Element::new("D1", ElementKind::Drift, 1.0),
///     Element::new("FLOOR", ElementKind::Other("FLOOR".into()), 0.0),
/// ];
/// let scene = build_lattice(&lattice, &LatticeOptions::default());
/// assert_eq!(scene.objects.len(), 2);
/// assert!(scene.is_complete());
/// ```
pub fn build_lattice(elements: &[Element], options: &LatticeOptions) -> LatticeScene {
    log::debug!("building {} elements", elements.len());
    let builder = ElementMeshBuilder::new(&options.style);

    let outcomes: Vec<ElementOutcome> = elements
        .par_iter()
        .map(|element| build_outcome(&builder, element, options))
        .collect();

    let mut scene = LatticeScene::default();
    for outcome in outcomes {
        scene.objects.extend(outcome.object);
        scene.diagnostics.extend(outcome.diagnostics);
        scene.failures.extend(outcome.failure);
    }
    scene
}

fn build_outcome(
    builder: &ElementMeshBuilder<'_>,
    element: &Element,
    options: &LatticeOptions,
) -> ElementOutcome {
    let mut diagnostics = Vec::new();

    let element = match options.zero_length.resolve(element) {
        LengthDecision::Build => Cow::Borrowed(element),
        LengthDecision::Substitute(length) => {
            diagnostics.push(
                Diagnostic::info(
                    DiagnosticCode::LengthSubstituted,
                    &element.name,
                    format!("zero-length {} drawn with L = {length}", element.key()),
                )
                .report(),
            );
            Cow::Owned(Element {
                length,
                ..element.clone()
            })
        }
        LengthDecision::Skip => {
            diagnostics.push(
                Diagnostic::info(
                    DiagnosticCode::ZeroLengthSkipped,
                    &element.name,
                    format!("zero-length {} skipped", element.key()),
                )
                .report(),
            );
            return ElementOutcome {
                object: None,
                diagnostics,
                failure: None,
            };
        }
    };

    match build_object(builder, &element, options, &mut diagnostics) {
        Ok(object) => ElementOutcome {
            object: Some(object),
            diagnostics,
            failure: None,
        },
        Err(error) => {
            diagnostics.push(
                Diagnostic::warning(DiagnosticCode::BuildFailed, &element.name, error.to_string())
                    .report(),
            );
            ElementOutcome {
                object: None,
                diagnostics,
                failure: Some(ElementFailure {
                    name: element.name.clone(),
                    error,
                }),
            }
        }
    }
}

fn build_object(
    builder: &ElementMeshBuilder<'_>,
    element: &Element,
    options: &LatticeOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> GeometryResult<ElementObject> {
    let built = builder.ele_mesh(element)?;
    diagnostics.extend(built.diagnostics);

    let punch = match punch_element(element) {
        Some(punch) if options.pipe_punch => Some(builder.ele_mesh(&punch)?.mesh),
        _ => None,
    };

    Ok(ElementObject {
        name: element.name.clone(),
        key: element.key().to_string(),
        index: element.index,
        mesh: built.mesh,
        placement: Placement::from_floor(&element.floor, options.origin),
        color: options.style.color(element.key()),
        cad_model: element.cad_model(),
        punch,
    })
}

/// Zero-thickness, slightly longer copy of a thick pipe.
pub fn punch_element(element: &Element) -> Option<Element> {
    match element.kind {
        ElementKind::Pipe(pipe) if pipe.thickness > 0.0 && pipe.radius_x > 0.0 => Some(Element {
            kind: ElementKind::Pipe(PipeParams {
                thickness: 0.0,
                ..pipe
            }),
            length: element.length * PUNCH_LENGTH_FACTOR,
            ..element.clone()
        }),
        _ => None,
    }
}

/// Minimum and maximum of one floor coordinate over a lattice.
pub fn lattice_bounds(elements: &[Element], axis: FloorAxis) -> Option<(f64, f64)> {
    elements
        .iter()
        .map(|element| element.floor.coordinate(axis))
        .fold(None, |bounds, value| match bounds {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })
}

/// Centre of the lattice's floor bounds in scene coordinates, for use as
/// [`LatticeOptions::origin`].
pub fn lattice_center(elements: &[Element]) -> Option<DVec3> {
    let mid = |axis| lattice_bounds(elements, axis).map(|(min, max)| 0.5 * (min + max));
    let center = DVec3::new(mid(FloorAxis::X)?, mid(FloorAxis::Y)?, mid(FloorAxis::Z)?);
    Some(AxisMapping::map_point(center))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_table::FloorPose;

    fn thick_pipe() -> Element {
        Element::new(
            "P1",
            ElementKind::Pipe(PipeParams {
                radius_x: 0.3,
                radius_y: 0.3,
                thickness: 0.01,
            }),
            1.0,
        )
    }

    #[test]
    fn test_zero_length_policy() {
        let policy = ZeroLengthPolicy::default();
        let marker = Element::new("M", ElementKind::Marker, 0.0);
        let drift = Element::new("D", ElementKind::Drift, 0.0);
        let quad = Element::new("Q", ElementKind::Quadrupole, 0.3);
        assert_eq!(policy.resolve(&marker), LengthDecision::Substitute(1e-3));
        assert_eq!(policy.resolve(&drift), LengthDecision::Skip);
        assert_eq!(policy.resolve(&quad), LengthDecision::Build);

        let policy = policy.with_point_like("DRIFT").with_substitute_length(0.5);
        assert_eq!(policy.resolve(&drift), LengthDecision::Substitute(0.5));
    }

    #[test]
    fn test_build_keeps_order_and_reports_policy() {
        let lattice = vec![
            Element::new("BEGINNING", ElementKind::Marker, 0.0),
            Element::new("D1", ElementKind::Drift, 1.0),
            Element::new("K0", ElementKind::Drift, 0.0),
            Element::new("Q1", ElementKind::Quadrupole, 0.3),
        ];
        let scene = build_lattice(&lattice, &LatticeOptions::default());
        let names: Vec<_> = scene.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["BEGINNING", "D1", "Q1"]);

        let codes: Vec<_> = scene.diagnostics.iter().map(|d| d.code).collect();
        assert!(codes.contains(&DiagnosticCode::LengthSubstituted));
        assert!(codes.contains(&DiagnosticCode::ZeroLengthSkipped));

        let (min, max) = scene.objects[0].mesh.bounding_box();
        assert!((max.x - min.x - 1e-3).abs() < 1e-12);
    }

    #[test]
    fn test_object_color_and_cad_model() {
        let lattice = vec![Element::new("Q1", ElementKind::Quadrupole, 0.3)
            .with_descrip("3DMODEL=quad_7.blend")];
        let options = LatticeOptions::default();
        let scene = build_lattice(&lattice, &options);
        let object = scene.object("Q1").unwrap();
        assert_eq!(object.color, options.style.color("QUADRUPOLE"));
        assert_eq!(object.cad_model.as_ref().unwrap().file_name(), "quad_7.blend");
        assert!(object.punch.is_none());
    }

    #[test]
    fn test_thick_pipe_gets_punch() {
        let scene = build_lattice(&[thick_pipe()], &LatticeOptions::default());
        let object = &scene.objects[0];
        let punch = object.punch.as_ref().unwrap();
        let (min, max) = punch.bounding_box();
        assert!((max.x - min.x - 1.1).abs() < 1e-12);
        // Punch radius is the bare aperture, the pipe body the outer envelope
        assert!((max.y - 0.3).abs() < 1e-12);
        assert!((object.mesh.bounding_box().1.y - 0.31).abs() < 1e-12);

        let scene = build_lattice(
            &[thick_pipe()],
            &LatticeOptions::default().with_pipe_punch(false),
        );
        assert!(scene.objects[0].punch.is_none());
    }

    #[test]
    fn test_punch_element_needs_thickness() {
        assert!(punch_element(&thick_pipe()).is_some());
        let thin = Element::new("P0", ElementKind::Pipe(PipeParams::default()), 1.0);
        assert!(punch_element(&thin).is_none());
    }

    #[test]
    fn test_placement_uses_origin() {
        let lattice = vec![Element::new("D1", ElementKind::Drift, 1.0)
            .with_floor(FloorPose::new(1.0, 2.0, 3.0, 0.0, 0.0, 0.0))];
        let options = LatticeOptions::default().with_origin(DVec3::new(3.0, 0.0, 0.0));
        let scene = build_lattice(&lattice, &options);
        assert_eq!(scene.objects[0].placement.translation, DVec3::new(0.0, 1.0, 2.0));
        let (min, max) = scene.objects[0].scene_mesh().bounding_box();
        assert!((0.5 * (min.x + max.x)).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_and_center() {
        let lattice = vec![
            Element::new("A", ElementKind::Drift, 1.0)
                .with_floor(FloorPose::new(-1.0, 0.0, 0.0, 0.0, 0.0, 0.0)),
            Element::new("B", ElementKind::Drift, 1.0)
                .with_floor(FloorPose::new(3.0, 0.0, 10.0, 0.0, 0.0, 0.0)),
        ];
        assert_eq!(lattice_bounds(&lattice, FloorAxis::X), Some((-1.0, 3.0)));
        assert_eq!(lattice_bounds(&lattice, FloorAxis::Z), Some((0.0, 10.0)));
        assert_eq!(lattice_bounds(&[], FloorAxis::Z), None);
        assert_eq!(lattice_center(&lattice), Some(DVec3::new(5.0, 1.0, 0.0)));
    }
}
