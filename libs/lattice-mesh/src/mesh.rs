//! # Mesh Data Structure
//!
//! Polygon mesh with an ordered vertex buffer and an ordered face buffer.
//! Side faces are quads, end caps are n-gons.

use config::constants::EPSILON;
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

/// A polygon mesh with vertices and face indices.
///
/// All geometry calculations use f64. Export to f32 only happens at the
/// host boundary ([`Mesh::vertices_f32`]).
///
/// # Example
///
/// ```rust
/// use lattice_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 1.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_face(vec![0, 1, 2, 3]);
/// assert_eq!(mesh.triangulate().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Faces as ordered vertex index loops
    faces: Vec<Vec<u32>>,
    /// Optional vertex normals
    normals: Option<Vec<DVec3>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            normals: None,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Appends a run of vertices.
    pub fn extend_vertices(&mut self, positions: &[DVec3]) {
        self.vertices.extend_from_slice(positions);
    }

    /// Adds a face by vertex indices.
    pub fn add_face(&mut self, face: Vec<u32>) {
        self.faces.push(face);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the faces.
    #[inline]
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the face at the given index.
    #[inline]
    pub fn face(&self, index: usize) -> &[u32] {
        &self.faces[index]
    }

    /// Returns the vertex normals.
    pub fn normals(&self) -> Option<&[DVec3]> {
        self.normals.as_deref()
    }

    /// Newell normal of one face (unnormalized, length = twice the area).
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let face = &self.faces[index];
        let mut normal = DVec3::ZERO;
        for (i, &a) in face.iter().enumerate() {
            let b = face[(i + 1) % face.len()];
            let p = self.vertices[a as usize];
            let q = self.vertices[b as usize];
            normal.x += (p.y - q.y) * (p.z + q.z);
            normal.y += (p.z - q.z) * (p.x + q.x);
            normal.z += (p.x - q.x) * (p.y + q.y);
        }
        normal
    }

    /// Computes and sets area-weighted vertex normals.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];

        for index in 0..self.faces.len() {
            let normal = self.face_normal(index);
            for &v in &self.faces[index] {
                normals[v as usize] += normal;
            }
        }

        for normal in &mut normals {
            let len = normal.length();
            if len > 0.0 {
                *normal /= len;
            }
        }

        self.normals = Some(normals);
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Transforms all vertices by a 4x4 matrix.
    pub fn transform(&mut self, matrix: &DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }

        // Normals use the inverse transpose
        if let Some(normals) = &mut self.normals {
            let normal_matrix = matrix.inverse().transpose();
            for n in normals {
                *n = normal_matrix.transform_vector3(*n).normalize_or_zero();
            }
        }
    }

    /// Returns a transformed copy.
    pub fn transformed(&self, matrix: &DMat4) -> Self {
        let mut copy = self.clone();
        copy.transform(matrix);
        copy
    }

    /// Reverses the winding of one face.
    pub fn flip_face(&mut self, index: usize) {
        self.faces[index].reverse();
        // Stale once winding changes
        self.normals = None;
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - Every face has at least 3 indices
    /// - All face indices are valid
    /// - No face repeats a vertex index
    /// - No face has zero area
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        for (index, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return false;
            }
            if face.iter().any(|&i| i >= vertex_count) {
                return false;
            }
            for (k, i) in face.iter().enumerate() {
                if face[k + 1..].contains(i) {
                    return false;
                }
            }
            if self.face_normal(index).length() < EPSILON {
                return false;
            }
        }

        true
    }

    /// Fan-triangulates every face, preserving winding.
    pub fn triangulate(&self) -> Vec<[u32; 3]> {
        let mut triangles = Vec::new();
        for face in &self.faces {
            for i in 1..face.len().saturating_sub(1) {
                triangles.push([face[0], face[i], face[i + 1]]);
            }
        }
        triangles
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            result.push(v.x as f32);
            result.push(v.y as f32);
            result.push(v.z as f32);
        }
        result
    }

    /// Exports triangulated face indices as a flat u32 array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangulate().into_iter().flatten().collect()
    }

    /// Exports normals as f32 array for GPU.
    pub fn normals_f32(&self) -> Option<Vec<f32>> {
        self.normals.as_ref().map(|normals| {
            let mut result = Vec::with_capacity(normals.len() * 3);
            for n in normals {
                result.push(n.x as f32);
                result.push(n.y as f32);
                result.push(n.z as f32);
            }
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(DVec3::new(1.0, 1.0, 0.0));
        mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
        mesh.add_face(vec![0, 1, 2, 3]);
        mesh
    }

    #[test]
    fn test_mesh_new() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_mesh_add_vertex() {
        let mut mesh = Mesh::new();
        let idx = mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(idx, 0);
        assert_eq!(mesh.vertex(0), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let mesh = unit_square();
        let n = mesh.face_normal(0);
        // Counter-clockwise about +Z, area 1
        assert!((n - DVec3::new(0.0, 0.0, 2.0)).length() < 1e-12);
    }

    #[test]
    fn test_compute_normals() {
        let mut mesh = unit_square();
        mesh.compute_normals();
        for n in mesh.normals().unwrap() {
            assert!((*n - DVec3::Z).length() < 1e-12);
        }
        assert_eq!(mesh.normals_f32().unwrap().len(), 4 * 3);
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(-1.0, -2.0, -3.0));
        mesh.add_vertex(DVec3::new(4.0, 5.0, 6.0));
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_mesh_validate_valid() {
        assert!(unit_square().validate());
    }

    #[test]
    fn test_mesh_validate_invalid_index() {
        let mut mesh = unit_square();
        mesh.add_face(vec![0, 1, 9]);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_validate_repeated_index() {
        let mut mesh = unit_square();
        mesh.add_face(vec![0, 1, 1]);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_mesh_validate_zero_area() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::X * 2.0);
        mesh.add_face(vec![0, 1, 2]);
        assert!(!mesh.validate());
    }

    #[test]
    fn test_triangulate_fan() {
        let mesh = unit_square();
        assert_eq!(mesh.triangulate(), vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.indices_u32(), vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_transform_translation() {
        let mesh = unit_square().transformed(&DMat4::from_translation(DVec3::new(0.0, 0.0, 5.0)));
        let (min, max) = mesh.bounding_box();
        assert_eq!(min.z, 5.0);
        assert_eq!(max.z, 5.0);
    }

    #[test]
    fn test_mesh_vertices_f32() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices_f32(), vec![1.0f32, 2.0, 3.0]);
    }

    #[test]
    fn test_flip_face_reverses_normal() {
        let mut mesh = unit_square();
        mesh.compute_normals();
        mesh.flip_face(0);
        assert_eq!(mesh.face(0), &[3, 2, 1, 0]);
        assert!((mesh.face_normal(0) + DVec3::new(0.0, 0.0, 2.0)).length() < 1e-12);
        assert!(mesh.normals().is_none());
    }
}
