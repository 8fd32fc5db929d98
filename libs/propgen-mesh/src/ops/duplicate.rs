//! # Duplicate Operator
//!
//! Clones a face set (and the vertices it references) inside one mesh,
//! returning handles to only the new elements. This is the primitive
//! behind "stamp one step, then make N more".

use crate::error::MeshError;
use crate::mesh::MeshBuffer;

/// Handles to geometry created by [`duplicate_faces`].
#[derive(Debug, Clone)]
pub struct Duplicated {
    /// New vertex indices, ordered by first appearance in the source faces
    pub vertices: Vec<u32>,
    /// New face indices
    pub faces: Vec<usize>,
}

/// Clones the given faces and their vertices, appending to the mesh.
///
/// The originals are untouched; the returned handles reference exactly the
/// new elements so callers can transform only the copy.
///
/// # Errors
///
/// Returns [`MeshError::InvalidFace`] when a face index is out of range.
pub fn duplicate_faces(mesh: &mut MeshBuffer, faces: &[usize]) -> Result<Duplicated, MeshError> {
    for &f in faces {
        if f >= mesh.face_count() {
            return Err(MeshError::invalid_face(format!(
                "face index {} out of range (face count {})",
                f,
                mesh.face_count()
            )));
        }
    }

    // Collect referenced vertices in deterministic first-appearance order
    let mut source_verts: Vec<u32> = Vec::new();
    for &f in faces {
        for &idx in mesh.face(f) {
            if !source_verts.contains(&idx) {
                source_verts.push(idx);
            }
        }
    }

    let mut remap = vec![0u32; mesh.vertex_count()];
    let mut new_verts = Vec::with_capacity(source_verts.len());
    for &idx in &source_verts {
        let position = mesh.vertex(idx);
        let new_idx = mesh.add_vertex(position);
        remap[idx as usize] = new_idx;
        new_verts.push(new_idx);
    }

    let mut new_faces = Vec::with_capacity(faces.len());
    for &f in faces {
        let loop_indices: Vec<u32> = mesh.face(f).iter().map(|&i| remap[i as usize]).collect();
        new_faces.push(mesh.add_face(&loop_indices)?);
    }

    Ok(Duplicated {
        vertices: new_verts,
        faces: new_faces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::create_box;
    use crate::transform::translate_set;
    use glam::DVec3;

    #[test]
    fn test_duplicate_counts() {
        let mut mesh = create_box(DVec3::ONE, true).unwrap();
        let all_faces: Vec<usize> = (0..mesh.face_count()).collect();
        let copy = duplicate_faces(&mut mesh, &all_faces).unwrap();
        assert_eq!(copy.vertices.len(), 8);
        assert_eq!(copy.faces.len(), 6);
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.face_count(), 12);
    }

    #[test]
    fn test_duplicate_returns_only_new_elements() {
        let mut mesh = create_box(DVec3::ONE, true).unwrap();
        let copy = duplicate_faces(&mut mesh, &[0]).unwrap();
        assert!(copy.vertices.iter().all(|&v| v >= 8));
        assert!(copy.faces.iter().all(|&f| f >= 6));
    }

    #[test]
    fn test_duplicate_then_translate_preserves_original() {
        let mut mesh = create_box(DVec3::ONE, true).unwrap();
        let original: Vec<DVec3> = mesh.vertices().to_vec();

        let all_faces: Vec<usize> = (0..mesh.face_count()).collect();
        let copy = duplicate_faces(&mut mesh, &all_faces).unwrap();
        translate_set(&mut mesh, &copy.vertices, DVec3::new(0.0, 0.0, 3.0));

        // Bit-identical originals
        assert_eq!(&mesh.vertices()[..8], &original[..]);
        assert_eq!(mesh.vertex(copy.vertices[0]).z, original[0].z + 3.0);
    }

    #[test]
    fn test_duplicate_out_of_range() {
        let mut mesh = create_box(DVec3::ONE, true).unwrap();
        assert!(duplicate_faces(&mut mesh, &[99]).is_err());
    }
}
