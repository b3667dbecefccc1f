//! # Mesh Assembly
//!
//! Stitches an ordered stack of equal-size cross-sections into a quad-strip
//! tube, optionally closed with flat end caps.
//!
//! ## Topology
//!
//! With `N` sections of `n` points, vertex `j` of section `i` has index
//! `i·n + j`. Each consecutive section pair contributes `n` quads
//!
//! ```text
//! (i·n + j, (i+1)·n + j, (i+1)·n + (j+1)%n, i·n + (j+1)%n)
//! ```
//!
//! and a closed mesh adds the first section reversed and the last section
//! in order, for `(N−1)·n + 2` faces in total.
//!
//! ## Orientation
//!
//! The index formula fixes the winding of sides and caps relative to the
//! profile loop, and the two always disagree: a counter-clockwise loop
//! (seen from the direction the sections advance) gives outward caps and
//! inward sides, a clockwise loop the reverse. [`outward_tube`] flips
//! whichever half is wrong.

use crate::error::{GeometryError, GeometryResult};
use crate::mesh::Mesh;
use glam::DVec3;

/// Builds a tube mesh from sections, with end caps when `closed`.
///
/// All sections must have the same point count; this is checked before any
/// buffer is built.
///
/// # Example
///
/// ```rust
/// use lattice_mesh::assemble::faces_from;
/// use lattice_mesh::section::Profile;
///
/// let profile = Profile::rectangle(1.0, 1.0);
/// let sections = vec![profile.at(-0.5), profile.at(0.5)];
/// let mesh = faces_from(&sections, true)?;
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.face_count(), 6);
/// # Ok::<(), lattice_mesh::GeometryError>(())
/// ```
pub fn faces_from(sections: &[Vec<DVec3>], closed: bool) -> GeometryResult<Mesh> {
    let n = common_point_count(sections)?;
    let count = sections.len();
    let cap_faces = if closed { 2 } else { 0 };

    let mut mesh = Mesh::with_capacity(count * n, (count - 1) * n + cap_faces);
    for section in sections {
        mesh.extend_vertices(section);
    }
    stitch(&mut mesh, count, n);

    if closed {
        let n = n as u32;
        let last = (count as u32 - 1) * n;
        mesh.add_face((0..n).rev().collect());
        mesh.add_face((last..last + n).collect());
    }

    Ok(mesh)
}

/// Builds a closed tube whose face normals all point outward.
///
/// `winding` is the signed area of the profile loop, seen from the
/// direction the sections advance (see [`Profile::signed_area`]). Rigid
/// sweeps keep that sign, so it decides which faces need flipping.
///
/// [`Profile::signed_area`]: crate::section::Profile::signed_area
pub fn outward_tube(sections: &[Vec<DVec3>], winding: f64) -> GeometryResult<Mesh> {
    let mut mesh = faces_from(sections, true)?;
    let caps = mesh.face_count() - 2;
    let flipped = if winding > 0.0 {
        0..caps
    } else {
        caps..mesh.face_count()
    };
    for index in flipped {
        mesh.flip_face(index);
    }
    Ok(mesh)
}

/// Builds an open aperture mesh: vertices appended section by section,
/// consecutive sections stitched, no end caps.
///
/// Vertices are not deduplicated; a point shared by two sections appears
/// once per section.
pub fn build_aperture_mesh(sections: &[Vec<DVec3>]) -> GeometryResult<Mesh> {
    faces_from(sections, false)
}

/// Returns the shared point count, or an error naming the first section
/// that breaks it.
fn common_point_count(sections: &[Vec<DVec3>]) -> GeometryResult<usize> {
    let first = sections
        .first()
        .ok_or(GeometryError::TooFewSections { count: 0 })?;
    let n = first.len();

    if let Some((index, section)) = sections
        .iter()
        .enumerate()
        .find(|(_, section)| section.len() != n)
    {
        return Err(GeometryError::mismatch(index, n, section.len()));
    }
    if n == 0 {
        return Err(GeometryError::EmptySection);
    }
    Ok(n)
}

/// Adds the side quads between every consecutive section pair.
fn stitch(mesh: &mut Mesh, count: usize, n: usize) {
    for i in 0..count - 1 {
        let base = (i * n) as u32;
        let next = ((i + 1) * n) as u32;
        for j in 0..n as u32 {
            let j_next = (j + 1) % n as u32;
            mesh.add_face(vec![base + j, next + j, next + j_next, base + j_next]);
        }
    }
}
