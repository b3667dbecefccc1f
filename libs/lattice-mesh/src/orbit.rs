//! # Orbit Tubes
//!
//! Tubes drawn around a tracked orbit, one ring per orbit point, coloured
//! by the final beam energy.
//!
//! ## Orbit table
//!
//! Whitespace-separated, two header lines, one point per line:
//!
//! ```text
//!  0  1   2  3   4  5   6  7      8  9  10 11      12     13      14
//!  y  py  z  pz  x  px  t  e_tot  s  -  -  beta_a  eta_x  beta_b  eta_y
//! ```
//!
//! Positions are already in scene axes; no [`AxisMapping`](crate::AxisMapping)
//! is applied.

use crate::assemble::outward_tube;
use crate::error::GeometryResult;
use crate::mesh::Mesh;
use config::constants::{
    BEAM_SIZE_SIGMAS, DEFAULT_ORBIT_COLOR, ELECTRON_MC2, ENERGY_COLOR, ORBIT_SECTION_POINTS,
    ORBIT_TUBE_RADIUS,
};
use glam::DVec3;
use lattice_table::{ParseError, ParseResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Columns an orbit line must have.
pub const ORBIT_COLUMNS: usize = 15;

/// Used columns, in file order.
const COLUMN_NAMES: [(usize, &str); 13] = [
    (0, "y"),
    (1, "py"),
    (2, "z"),
    (3, "pz"),
    (4, "x"),
    (5, "px"),
    (6, "t"),
    (7, "e_tot"),
    (8, "s"),
    (11, "beta_a"),
    (12, "eta_x"),
    (13, "beta_b"),
    (14, "eta_y"),
];

/// One tracked orbit point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitPoint {
    pub y: f64,
    pub py: f64,
    pub z: f64,
    pub pz: f64,
    pub x: f64,
    pub px: f64,
    pub t: f64,
    /// Total energy in eV.
    pub e_tot: f64,
    pub s: f64,
    pub beta_a: f64,
    pub eta_x: f64,
    pub beta_b: f64,
    pub eta_y: f64,
}

impl OrbitPoint {
    pub fn position(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Heading angle in the horizontal plane, `atan2(py, px)`.
    pub fn heading(&self) -> f64 {
        self.py.atan2(self.px)
    }
}

/// Beam parameters for sizing the tube from the optics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamParams {
    /// Normalized emittance, plane a.
    pub emit_norm_a: f64,
    /// Normalized emittance, plane b.
    pub emit_norm_b: f64,
    /// Relative energy spread.
    pub sigma_delta: f64,
}

/// Parses one orbit line.
pub fn parse_orbit_line(line: &str, row: usize) -> ParseResult<OrbitPoint> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < ORBIT_COLUMNS {
        return Err(ParseError::FieldCount {
            row,
            found: fields.len(),
            expected: ORBIT_COLUMNS,
        });
    }

    let mut values = [0.0; 13];
    for (slot, &(column, name)) in values.iter_mut().zip(COLUMN_NAMES.iter()) {
        *slot = fields[column]
            .parse::<f64>()
            .map_err(|_| ParseError::invalid_number(row, name, fields[column]))?;
    }
    let [y, py, z, pz, x, px, t, e_tot, s, beta_a, eta_x, beta_b, eta_y] = values;

    Ok(OrbitPoint {
        y,
        py,
        z,
        pz,
        x,
        px,
        t,
        e_tot,
        s,
        beta_a,
        eta_x,
        beta_b,
        eta_y,
    })
}

/// Parses an orbit table, skipping the two header lines and blank lines.
///
/// # Example
///
/// ```rust
/// use lattice_mesh::orbit::parse_orbit;
///
/// let text = "header\nunits\n0 0 0 0 0 1 0 42e6 0 0 0 1 0 1 0\n";
/// let orbit = parse_orbit(text).unwrap();
/// assert_eq!(orbit.len(), 1);
/// assert_eq!(orbit[0].e_tot, 42e6);
/// ```
pub fn parse_orbit(text: &str) -> ParseResult<Vec<OrbitPoint>> {
    text.lines()
        .enumerate()
        .skip(2)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_orbit_line(line, i + 1))
        .collect()
}

/// Tube half-sizes from the optics: `10·sqrt(β·ε·mc²/E + η²·σδ²)`.
pub fn beam_sizes(point: &OrbitPoint, beam: &BeamParams) -> (f64, f64) {
    let size = |beta: f64, emit: f64, eta: f64| {
        BEAM_SIZE_SIGMAS
            * (beta * emit * ELECTRON_MC2 / point.e_tot + eta.powi(2) * beam.sigma_delta.powi(2))
                .sqrt()
    };
    (
        size(point.beta_a, beam.emit_norm_a, point.eta_x),
        size(point.beta_b, beam.emit_norm_b, point.eta_y),
    )
}

/// Ring of `n` points around an orbit point, perpendicular to its heading.
///
/// `rx`/`ry` are the horizontal and vertical half-sizes, replaced by
/// [`beam_sizes`] when `beam` is given.
pub fn orbit_section(
    point: &OrbitPoint,
    rx: f64,
    ry: f64,
    n: usize,
    beam: Option<&BeamParams>,
) -> Vec<DVec3> {
    let (r1, r2) = match beam {
        Some(beam) => beam_sizes(point, beam),
        None => (rx, ry),
    };
    let (sin_h, cos_h) = point.heading().sin_cos();
    let center = point.position();

    (0..n)
        .map(|i| {
            let a = TAU * i as f64 / n as f64;
            center + DVec3::new(-r1 * a.cos() * sin_h, r1 * a.cos() * cos_h, r2 * a.sin())
        })
        .collect()
}

/// Closed tube through all orbit points with the default radius.
///
/// Rings run counter-clockwise about the heading, so with points ordered
/// along the beam every face normal points outward.
pub fn orbit_mesh(orbit: &[OrbitPoint], beam: Option<&BeamParams>) -> GeometryResult<Mesh> {
    let sections: Vec<_> = orbit
        .iter()
        .map(|point| {
            orbit_section(
                point,
                ORBIT_TUBE_RADIUS,
                ORBIT_TUBE_RADIUS,
                ORBIT_SECTION_POINTS,
                beam,
            )
        })
        .collect();
    outward_tube(&sections, 1.0)
}

/// Final energy in whole MeV, truncated.
fn final_energy_mev(orbit: &[OrbitPoint]) -> Option<i64> {
    orbit.last().map(|point| (point.e_tot / 1e6) as i64)
}

fn energy_color(mev: i64) -> Option<[f32; 3]> {
    ENERGY_COLOR
        .iter()
        .find(|(energy, _)| *energy == mev)
        .map(|(_, color)| *color)
}

/// Colour of an orbit from its final energy.
pub fn orbit_color(orbit: &[OrbitPoint]) -> [f32; 4] {
    let [r, g, b] = final_energy_mev(orbit)
        .and_then(energy_color)
        .unwrap_or(DEFAULT_ORBIT_COLOR);
    [r, g, b, 1.0]
}

/// Name of an orbit from its final energy, `energy_<MeV>_MeV` or
/// `energy_changing_MeV`.
pub fn orbit_name(orbit: &[OrbitPoint]) -> String {
    match final_energy_mev(orbit).filter(|&mev| energy_color(mev).is_some()) {
        Some(mev) => format!("energy_{mev}_MeV"),
        None => "energy_changing_MeV".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use approx::assert_relative_eq;

    const ORBIT: &str = "\
  y  py  z  pz  x  px  t  e_tot  s  ix  ele  beta_a  eta_x  beta_b  eta_y
  (m) (1) (m) (1) (m) (1) (s) (eV) (m) - - (m) (m) (m) (m)
0 0 0 0 0 1 0 42.5e6 0.0 1 BEG 10 0 5 0
0 0 0 0 1 1 0 42.5e6 1.0 2 D1 12 0.1 6 0

0 0 0 0 2 1 0 42.5e6 2.0 3 Q1 14 0.2 7 0
";

    fn point_at(x: f64) -> OrbitPoint {
        OrbitPoint {
            x,
            px: 1.0,
            e_tot: 42e6,
            ..OrbitPoint::default()
        }
    }

    #[test]
    fn test_parse_orbit() {
        let orbit = parse_orbit(ORBIT).unwrap();
        assert_eq!(orbit.len(), 3);
        assert_eq!(orbit[1].x, 1.0);
        assert_eq!(orbit[1].s, 1.0);
        assert_eq!(orbit[1].beta_a, 12.0);
        assert_eq!(orbit[1].eta_x, 0.1);
        assert_eq!(orbit[2].beta_b, 7.0);
    }

    #[test]
    fn test_parse_orbit_short_line() {
        let err = parse_orbit_line("0 0 0", 7).unwrap_err();
        assert!(matches!(
            err,
            ParseError::FieldCount {
                row: 7,
                found: 3,
                expected: 15
            }
        ));
    }

    #[test]
    fn test_parse_orbit_bad_number() {
        let err = parse_orbit("h\nh\n0 0 0 0 0 1 0 abc 0 0 0 1 0 1 0\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidNumber {
                row: 3,
                field: "e_tot",
                ..
            }
        ));
    }

    #[test]
    fn test_section_is_perpendicular_ring() {
        let point = point_at(0.0);
        let ring = orbit_section(&point, 0.5, 0.25, 16, None);
        assert_eq!(ring.len(), 16);
        for p in &ring {
            // Heading along +x, ring in the y-z plane
            assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
            assert_relative_eq!((p.y / 0.5).powi(2) + (p.z / 0.25).powi(2), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_section_follows_heading() {
        let point = OrbitPoint {
            py: 1.0,
            px: 0.0,
            ..OrbitPoint::default()
        };
        let ring = orbit_section(&point, 1.0, 1.0, 4, None);
        // Heading along +y, first ring point offset along -x
        assert_relative_eq!(ring[0].x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(ring[0].y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_beam_sizes() {
        let point = OrbitPoint {
            e_tot: ELECTRON_MC2,
            beta_a: 4.0,
            beta_b: 1.0,
            eta_x: 1.0,
            ..OrbitPoint::default()
        };
        let beam = BeamParams {
            emit_norm_a: 1e-6,
            emit_norm_b: 1e-6,
            sigma_delta: 1e-3,
        };
        let (r1, r2) = beam_sizes(&point, &beam);
        assert_relative_eq!(r1, 10.0 * (4e-6f64 + 1e-6).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(r2, 10.0 * 1e-3, epsilon = 1e-12);
    }

    #[test]
    fn test_orbit_mesh() {
        let orbit = parse_orbit(ORBIT).unwrap();
        let mesh = orbit_mesh(&orbit, None).unwrap();
        assert_eq!(mesh.vertex_count(), 3 * 16);
        assert_eq!(mesh.face_count(), 2 * 16 + 2);
        assert_eq!(orbit_mesh(&[], None).unwrap_err(), GeometryError::TooFewSections { count: 0 });
    }

    #[test]
    fn test_orbit_mesh_faces_outward() {
        let orbit = parse_orbit(ORBIT).unwrap();
        let mesh = orbit_mesh(&orbit, None).unwrap();
        let sides = mesh.face_count() - 2;
        for i in 0..sides {
            let face = mesh.face(i);
            let center = face.iter().map(|&v| mesh.vertex(v)).sum::<DVec3>() / 4.0;
            // Orbit runs along x through the origin
            let radial = DVec3::new(0.0, center.y, center.z);
            assert!(mesh.face_normal(i).dot(radial) > 0.0, "side face {i}");
        }
        assert!(mesh.face_normal(sides).x < 0.0);
        assert!(mesh.face_normal(sides + 1).x > 0.0);
    }

    #[test]
    fn test_orbit_color_and_name() {
        let orbit = parse_orbit(ORBIT).unwrap();
        assert_eq!(orbit_color(&orbit), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(orbit_name(&orbit), "energy_42_MeV");

        let odd = vec![point_at(0.0), OrbitPoint { e_tot: 60e6, ..point_at(1.0) }];
        assert_eq!(orbit_color(&odd), [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(orbit_name(&odd), "energy_changing_MeV");
        assert_eq!(orbit_name(&[]), "energy_changing_MeV");
    }
}
