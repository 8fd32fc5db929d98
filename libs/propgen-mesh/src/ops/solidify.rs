//! # Solidify
//!
//! Gives an open or closed surface a wall thickness: an inner shell is
//! offset inward along the vertex normals, its windings are reversed, and
//! any open boundary is bridged with rim quads. An open cone becomes a
//! hollow cone with walls; a closed box becomes a box-within-a-box.

use crate::error::MeshError;
use crate::mesh::MeshBuffer;
use config::constants::EPSILON;

/// Thickens a surface into a solid shell.
///
/// The inner shell is offset inward (against the area-weighted vertex
/// normals) by `thickness`, so the original surface stays put as the
/// outer wall. Open boundaries get bridged rims; a closed input simply
/// gains an inverted inner copy.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when `thickness` is not
/// strictly positive, or when the mesh has no faces to offset.
pub fn solidify(mesh: &MeshBuffer, thickness: f64) -> Result<MeshBuffer, MeshError> {
    if thickness <= EPSILON {
        return Err(MeshError::invalid_parameter(format!(
            "thickness must be positive, got {}",
            thickness
        )));
    }
    if mesh.face_count() == 0 {
        return Err(MeshError::invalid_parameter(
            "cannot solidify a mesh with no faces",
        ));
    }

    let normals = mesh.vertex_normals();
    let vertex_count = mesh.vertex_count() as u32;

    let mut result = mesh.clone();

    // Inner shell, offset against the normals so the outer wall stays put
    for (idx, normal) in normals.iter().enumerate() {
        let position = mesh.vertex(idx as u32) - *normal * thickness;
        result.add_vertex(position);
    }
    for face_idx in 0..mesh.face_count() {
        let inner: Vec<u32> = mesh
            .face(face_idx)
            .iter()
            .rev()
            .map(|&v| v + vertex_count)
            .collect();
        result.add_face(&inner)?;
    }

    // Bridge open boundaries. The outer face traverses a boundary edge
    // a -> b, so the rim must traverse b -> a to keep windings consistent.
    for (a, b) in directed_boundary_edges(mesh) {
        result.add_face(&[b, a, a + vertex_count, b + vertex_count])?;
    }

    Ok(result)
}

/// Boundary edges in the direction their single owning face traverses them.
fn directed_boundary_edges(mesh: &MeshBuffer) -> Vec<(u32, u32)> {
    let mut counts: Vec<((u32, u32), u32)> = Vec::new();
    for face_idx in 0..mesh.face_count() {
        let face = mesh.face(face_idx);
        for i in 0..face.len() {
            let a = face[i];
            let b = face[(i + 1) % face.len()];
            let key = if a < b { (a, b) } else { (b, a) };
            match counts.iter_mut().find(|(e, _)| *e == key) {
                Some((_, n)) => *n += 1,
                None => counts.push((key, 1)),
            }
        }
    }

    let mut directed = Vec::new();
    for face_idx in 0..mesh.face_count() {
        let face = mesh.face(face_idx);
        for i in 0..face.len() {
            let a = face[i];
            let b = face[(i + 1) % face.len()];
            let key = if a < b { (a, b) } else { (b, a) };
            if counts
                .iter()
                .any(|(e, n)| *e == key && *n == 1)
            {
                directed.push((a, b));
            }
        }
    }
    directed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{create_box, create_cylinder};
    use glam::DVec3;

    #[test]
    fn test_solidify_closed_mesh_doubles_geometry() {
        let cube = create_box(DVec3::splat(2.0), true).unwrap();
        let solid = solidify(&cube, 0.25).unwrap();
        assert_eq!(solid.vertex_count(), 16);
        assert_eq!(solid.face_count(), 12);
        // Closed input gains no rim
        assert!(solid.boundary_edges().is_empty());
    }

    #[test]
    fn test_solidify_outer_wall_unmoved() {
        let cube = create_box(DVec3::splat(2.0), true).unwrap();
        let solid = solidify(&cube, 0.25).unwrap();
        for i in 0..cube.vertex_count() as u32 {
            assert_eq!(solid.vertex(i), cube.vertex(i));
        }
    }

    #[test]
    fn test_solidify_offsets_inward() {
        let cube = create_box(DVec3::splat(2.0), true).unwrap();
        let solid = solidify(&cube, 0.25).unwrap();
        let outer = cube.vertex(0).length();
        let inner = solid.vertex(8).length();
        assert!(inner < outer);
    }

    #[test]
    fn test_solidify_open_cone_closes_boundary() {
        let cone = create_cylinder(16, 2.0, 0.0, 1.5, false).unwrap();
        assert!(!cone.boundary_edges().is_empty());
        let solid = solidify(&cone, 0.1).unwrap();
        assert!(solid.boundary_edges().is_empty());
        assert!(solid.validate());
    }

    #[test]
    fn test_solidify_rejects_zero_thickness() {
        let cube = create_box(DVec3::ONE, true).unwrap();
        assert!(matches!(
            solidify(&cube, 0.0),
            Err(MeshError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_solidify_rejects_empty_mesh() {
        let mesh = MeshBuffer::new();
        assert!(solidify(&mesh, 0.1).is_err());
    }
}
