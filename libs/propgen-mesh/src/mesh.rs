//! # Mesh Buffer
//!
//! Core polygon mesh representation: vertex positions plus faces stored as
//! ordered vertex-index lists.

use config::constants::VERTEX_MERGE_EPSILON;
use glam::DVec3;

use crate::error::MeshError;

/// A polygon mesh with vertices and index-list faces.
///
/// All geometry calculations use f64 internally. Faces are ordered index
/// lists (length >= 3) with outward winding; triangulation happens only at
/// export or CSG boundaries.
///
/// # Example
///
/// ```rust
/// use propgen_mesh::MeshBuffer;
/// use glam::DVec3;
///
/// let mut mesh = MeshBuffer::new();
/// let a = mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_face(&[a, b, c]).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffer {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Faces as ordered vertex-index loops
    faces: Vec<Vec<u32>>,
}

impl Default for MeshBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuffer {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
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

    /// Adds a face from vertex indices and returns its face index.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidFace`] when the face has fewer than 3
    /// indices, references an out-of-range vertex, or repeats an index.
    pub fn add_face(&mut self, indices: &[u32]) -> Result<usize, MeshError> {
        if indices.len() < 3 {
            return Err(MeshError::invalid_face(format!(
                "face needs at least 3 vertices, got {}",
                indices.len()
            )));
        }

        let vertex_count = self.vertices.len() as u32;
        for &idx in indices {
            if idx >= vertex_count {
                return Err(MeshError::invalid_face(format!(
                    "vertex index {} out of range (vertex count {})",
                    idx, vertex_count
                )));
            }
        }

        for (i, &idx) in indices.iter().enumerate() {
            if indices[i + 1..].contains(&idx) {
                return Err(MeshError::invalid_face(format!(
                    "vertex index {} repeated within face",
                    idx
                )));
            }
        }

        let face_index = self.faces.len();
        self.faces.push(indices.to_vec());
        Ok(face_index)
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

    /// Overwrites the position of an existing vertex.
    #[inline]
    pub fn set_vertex(&mut self, index: u32, position: DVec3) {
        self.vertices[index as usize] = position;
    }

    /// Replaces the index loop of an existing face.
    ///
    /// Used by operators that rewrite face corners in place (bevel).
    /// The caller is responsible for keeping the loop valid.
    pub(crate) fn set_face(&mut self, index: usize, indices: Vec<u32>) {
        self.faces[index] = indices;
    }

    /// Appends another mesh, re-indexing its faces.
    ///
    /// Returns the vertex index offset applied to the appended geometry so
    /// callers can address the just-appended vertices.
    pub fn append(&mut self, other: &MeshBuffer) -> u32 {
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);
        for face in &other.faces {
            self.faces.push(face.iter().map(|&i| i + offset).collect());
        }

        offset
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

    /// Translates every vertex by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Transforms every vertex by a 4x4 matrix.
    pub fn transform(&mut self, matrix: &glam::DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }
    }

    /// Returns the unique undirected edges of the mesh.
    pub fn edges(&self) -> Vec<(u32, u32)> {
        let mut edges = Vec::new();
        for face in &self.faces {
            for i in 0..face.len() {
                let a = face[i];
                let b = face[(i + 1) % face.len()];
                let edge = if a < b { (a, b) } else { (b, a) };
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }
        edges
    }

    /// Returns edges used by exactly one face (the open boundary).
    pub fn boundary_edges(&self) -> Vec<(u32, u32)> {
        let mut counts: Vec<((u32, u32), u32)> = Vec::new();
        for face in &self.faces {
            for i in 0..face.len() {
                let a = face[i];
                let b = face[(i + 1) % face.len()];
                let edge = if a < b { (a, b) } else { (b, a) };
                match counts.iter_mut().find(|(e, _)| *e == edge) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((edge, 1)),
                }
            }
        }

        counts
            .into_iter()
            .filter_map(|(edge, n)| (n == 1).then_some(edge))
            .collect()
    }

    /// Returns indices of vertices inside an axis-aligned box.
    ///
    /// The bounds are inclusive. Builders use this to select geometry for
    /// localized operators (bevel a corner, lift a lip) without tracking
    /// indices through every preceding step.
    pub fn vertices_in_bounds(&self, min: DVec3, max: DVec3) -> Vec<u32> {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| {
                v.x >= min.x
                    && v.x <= max.x
                    && v.y >= min.y
                    && v.y <= max.y
                    && v.z >= min.z
                    && v.z <= max.z
            })
            .map(|(i, _)| i as u32)
            .collect()
    }

    /// Returns edges whose both endpoints are inside an axis-aligned box.
    pub fn edges_in_bounds(&self, min: DVec3, max: DVec3) -> Vec<(u32, u32)> {
        let selected = self.vertices_in_bounds(min, max);
        self.edges()
            .into_iter()
            .filter(|(a, b)| selected.contains(a) && selected.contains(b))
            .collect()
    }

    /// Computes area-weighted vertex normals from the polygon faces.
    ///
    /// Face normals come from Newell's method, so non-triangular and
    /// slightly non-planar faces contribute sensibly.
    pub fn vertex_normals(&self) -> Vec<DVec3> {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];

        for face in &self.faces {
            let normal = self.face_normal_raw(face);
            for &idx in face {
                normals[idx as usize] += normal;
            }
        }

        for normal in &mut normals {
            let len = normal.length();
            if len > 0.0 {
                *normal /= len;
            }
        }

        normals
    }

    /// Newell's method face normal, scaled by twice the face area.
    fn face_normal_raw(&self, face: &[u32]) -> DVec3 {
        let mut normal = DVec3::ZERO;
        for i in 0..face.len() {
            let a = self.vertices[face[i] as usize];
            let b = self.vertices[face[(i + 1) % face.len()] as usize];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        normal
    }

    /// Returns the unit normal of one face, or zero for degenerate faces.
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let raw = self.face_normal_raw(&self.faces[index]);
        let len = raw.length();
        if len > 0.0 {
            raw / len
        } else {
            DVec3::ZERO
        }
    }

    /// Reverses the winding of every face.
    ///
    /// Must be called after any mirror (negative-axis scale) so outward
    /// normals stay outward.
    pub fn reverse_windings(&mut self) {
        for face in &mut self.faces {
            face.reverse();
        }
    }

    /// Removes faces with near-zero area or collapsed index loops.
    ///
    /// Returns the number of faces removed.
    pub fn remove_degenerate_faces(&mut self) -> usize {
        let before = self.faces.len();
        let vertices = std::mem::take(&mut self.vertices);

        self.faces.retain(|face| {
            let mut normal = DVec3::ZERO;
            for i in 0..face.len() {
                let a = vertices[face[i] as usize];
                let b = vertices[face[(i + 1) % face.len()] as usize];
                normal.x += (a.y - b.y) * (a.z + b.z);
                normal.y += (a.z - b.z) * (a.x + b.x);
                normal.z += (a.x - b.x) * (a.y + b.y);
            }
            normal.length() > VERTEX_MERGE_EPSILON
        });

        self.vertices = vertices;
        before - self.faces.len()
    }

    /// Fan-triangulates every face.
    ///
    /// Returns triangles as index triples; faces must be convex (all
    /// generated primitives are, and operators preserve convex faces).
    pub fn triangulate(&self) -> Vec<[u32; 3]> {
        let mut triangles = Vec::new();
        for face in &self.faces {
            for i in 1..face.len() - 1 {
                triangles.push([face[0], face[i], face[i + 1]]);
            }
        }
        triangles
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All face indices are in range
    /// - No face repeats an index
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        for face in &self.faces {
            if face.len() < 3 {
                return false;
            }
            for (i, &idx) in face.iter().enumerate() {
                if idx >= vertex_count {
                    return false;
                }
                if face[i + 1..].contains(&idx) {
                    return false;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_new() {
        let mesh = MeshBuffer::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_mesh_add_vertex() {
        let mut mesh = MeshBuffer::new();
        let idx = mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(idx, 0);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.vertex(0), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_mesh_add_face() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        let face = mesh.add_face(&[0, 1, 2]).unwrap();
        assert_eq!(face, 0);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.face(0), &[0, 1, 2]);
    }

    #[test]
    fn test_mesh_add_face_too_short() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        let result = mesh.add_face(&[0, 1]);
        assert!(matches!(result, Err(MeshError::InvalidFace { .. })));
    }

    #[test]
    fn test_mesh_add_face_out_of_range() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::ZERO);
        let result = mesh.add_face(&[0, 1, 2]);
        assert!(matches!(result, Err(MeshError::InvalidFace { .. })));
    }

    #[test]
    fn test_mesh_add_face_repeated_index() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        let result = mesh.add_face(&[0, 1, 0]);
        assert!(matches!(result, Err(MeshError::InvalidFace { .. })));
    }

    #[test]
    fn test_mesh_append_offsets_faces() {
        let mut a = MeshBuffer::new();
        a.add_vertex(DVec3::ZERO);
        a.add_vertex(DVec3::X);
        a.add_vertex(DVec3::Y);
        a.add_face(&[0, 1, 2]).unwrap();

        let mut b = MeshBuffer::new();
        b.add_vertex(DVec3::Z);
        b.add_vertex(DVec3::new(1.0, 0.0, 1.0));
        b.add_vertex(DVec3::new(0.0, 1.0, 1.0));
        b.add_face(&[0, 1, 2]).unwrap();

        let offset = a.append(&b);
        assert_eq!(offset, 3);
        assert_eq!(a.vertex_count(), 6);
        assert_eq!(a.face_count(), 2);
        assert_eq!(a.face(1), &[3, 4, 5]);
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::new(-1.0, -2.0, -3.0));
        mesh.add_vertex(DVec3::new(4.0, 5.0, 6.0));
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(max, DVec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_mesh_edges_deduplicated() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_vertex(DVec3::Z);
        mesh.add_face(&[0, 1, 2]).unwrap();
        mesh.add_face(&[0, 2, 3]).unwrap();
        // Shared edge (0, 2) counted once
        assert_eq!(mesh.edges().len(), 5);
    }

    #[test]
    fn test_mesh_boundary_edges_open_triangle() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_face(&[0, 1, 2]).unwrap();
        assert_eq!(mesh.boundary_edges().len(), 3);
    }

    #[test]
    fn test_mesh_vertices_in_bounds() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::new(0.5, 0.5, 0.5));
        mesh.add_vertex(DVec3::new(5.0, 0.0, 0.0));
        let inside = mesh.vertices_in_bounds(DVec3::ZERO, DVec3::ONE);
        assert_eq!(inside, vec![0]);
    }

    #[test]
    fn test_mesh_reverse_windings() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_face(&[0, 1, 2]).unwrap();
        let normal_before = mesh.face_normal(0);
        mesh.reverse_windings();
        let normal_after = mesh.face_normal(0);
        assert!((normal_before + normal_after).length() < 1e-12);
    }

    #[test]
    fn test_mesh_remove_degenerate_faces() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_vertex(DVec3::new(2.0, 0.0, 0.0));
        mesh.add_face(&[0, 1, 2]).unwrap();
        // Collinear face has zero area
        mesh.add_face(&[0, 1, 3]).unwrap();
        let removed = mesh.remove_degenerate_faces();
        assert_eq!(removed, 1);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_mesh_triangulate_quad() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::new(1.0, 1.0, 0.0));
        mesh.add_vertex(DVec3::Y);
        mesh.add_face(&[0, 1, 2, 3]).unwrap();
        let tris = mesh.triangulate();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_mesh_validate() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_face(&[0, 1, 2]).unwrap();
        assert!(mesh.validate());
    }
}
