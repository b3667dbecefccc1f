//! # Lattice Mesh
//!
//! Geometry kernel that turns beamline elements into surface meshes and
//! scene placements.
//!
//! ## Architecture
//!
//! ```text
//! Element → Profile (section) → swept sections (section) → Mesh (assemble)
//!                                                            ↓
//!                                  Placement (placement) ← floor pose
//! ```
//!
//! Every step is a pure function of its inputs. [`build_lattice`] runs the
//! per-element builds in parallel against one immutable [`StyleTable`].
//!
//! ## Frames
//!
//! Element meshes are built in the element frame: `x` along the beam,
//! `y` in the bend plane, `z` vertical. [`Placement`] takes them to the
//! scene, whose first axis is the lattice `z` ([`AxisMapping`]).
//!
//! ## Usage
//!
//! ```rust
//! use lattice_mesh::{build_lattice, LatticeOptions};
//! use lattice_table::parse_table;
//!
//! let text = "\
//! name, index, x, y, z, theta, phi, psi, key, L, c1, c2, c3, descrip
//! B1, 1, 0, 0, 1, 0, 0, 0, SBEND, 2.0, 0.2, 0.01, 0.02, bend
//! ";
//! let lattice = parse_table(text).unwrap();
//! let scene = build_lattice(&lattice, &LatticeOptions::default());
//! assert_eq!(scene.objects[0].mesh.vertex_count(), 20 * 4);
//! ```

pub mod assemble;
pub mod builder;
pub mod diagnostic;
pub mod error;
pub mod lattice;
pub mod mesh;
pub mod orbit;
pub mod pipe;
pub mod placement;
pub mod section;
pub mod style;

pub use assemble::{build_aperture_mesh, faces_from, outward_tube};
pub use builder::{ElementMesh, ElementMeshBuilder, SectionPlan};
pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use error::{GeometryError, GeometryResult};
pub use lattice::{
    build_lattice, lattice_bounds, lattice_center, ElementFailure, ElementObject, LatticeOptions,
    LatticeScene, LengthDecision, ZeroLengthPolicy,
};
pub use mesh::Mesh;
pub use orbit::{orbit_color, orbit_mesh, orbit_name, parse_orbit, BeamParams, OrbitPoint};
pub use pipe::{centered_pipe, ApertureMesh, ApertureType, PipeSpec};
pub use placement::{AxisMapping, Placement};
pub use section::{revolve_section, Profile, SweepParams};
pub use style::{ScaleLookup, StyleTable};
