//! # Box Primitive
//!
//! Generates an axis-aligned cuboid mesh.

use glam::DVec3;

use crate::error::MeshError;
use crate::mesh::MeshBuffer;

/// Creates an axis-aligned cuboid mesh.
///
/// # Arguments
///
/// * `size` - Dimensions [x, y, z]
/// * `center` - If true, center at origin; if false, corner at origin
///
/// # Returns
///
/// A mesh with 8 vertices and 6 quad faces, outward winding.
///
/// # Example
///
/// ```rust
/// use propgen_mesh::primitives::create_box;
/// use glam::DVec3;
///
/// let mesh = create_box(DVec3::splat(10.0), false).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.face_count(), 6);
/// ```
pub fn create_box(size: DVec3, center: bool) -> Result<MeshBuffer, MeshError> {
    if size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "box size must be positive: {:?}",
            size
        )));
    }

    let mut mesh = MeshBuffer::with_capacity(8, 6);

    let (min, max) = if center {
        let half = size / 2.0;
        (-half, half)
    } else {
        (DVec3::ZERO, size)
    };

    // Bottom face (z = min.z)
    let v0 = mesh.add_vertex(DVec3::new(min.x, min.y, min.z));
    let v1 = mesh.add_vertex(DVec3::new(max.x, min.y, min.z));
    let v2 = mesh.add_vertex(DVec3::new(max.x, max.y, min.z));
    let v3 = mesh.add_vertex(DVec3::new(min.x, max.y, min.z));

    // Top face (z = max.z)
    let v4 = mesh.add_vertex(DVec3::new(min.x, min.y, max.z));
    let v5 = mesh.add_vertex(DVec3::new(max.x, min.y, max.z));
    let v6 = mesh.add_vertex(DVec3::new(max.x, max.y, max.z));
    let v7 = mesh.add_vertex(DVec3::new(min.x, max.y, max.z));

    // 6 quads, counter-clockwise when viewed from outside
    mesh.add_face(&[v0, v3, v2, v1])?; // bottom (z-)
    mesh.add_face(&[v4, v5, v6, v7])?; // top (z+)
    mesh.add_face(&[v0, v1, v5, v4])?; // front (y-)
    mesh.add_face(&[v2, v3, v7, v6])?; // back (y+)
    mesh.add_face(&[v3, v0, v4, v7])?; // left (x-)
    mesh.add_face(&[v1, v2, v6, v5])?; // right (x+)

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_counts() {
        let mesh = create_box(DVec3::splat(10.0), false).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);
        assert!(mesh.faces().iter().all(|f| f.len() == 4));
    }

    #[test]
    fn test_box_not_centered() {
        let mesh = create_box(DVec3::splat(10.0), false).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::splat(10.0));
    }

    #[test]
    fn test_box_centered() {
        let mesh = create_box(DVec3::splat(10.0), true).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::splat(-5.0));
        assert_eq!(max, DVec3::splat(5.0));
    }

    #[test]
    fn test_box_rectangular() {
        let mesh = create_box(DVec3::new(10.0, 20.0, 30.0), false).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn test_box_outward_normals() {
        let mesh = create_box(DVec3::splat(2.0), true).unwrap();
        // Every face normal should point away from the origin
        for i in 0..mesh.face_count() {
            let normal = mesh.face_normal(i);
            let centroid: DVec3 = mesh
                .face(i)
                .iter()
                .map(|&v| mesh.vertex(v))
                .sum::<DVec3>()
                / 4.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_box_volume_unit() {
        let mesh = create_box(DVec3::ONE, true).unwrap();
        // Signed volume via divergence theorem over the triangulation
        let mut volume = 0.0;
        for tri in mesh.triangulate() {
            let a = mesh.vertex(tri[0]);
            let b = mesh.vertex(tri[1]);
            let c = mesh.vertex(tri[2]);
            volume += a.dot(b.cross(c)) / 6.0;
        }
        assert!((volume - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_box_invalid_size() {
        let result = create_box(DVec3::new(0.0, 10.0, 10.0), false);
        assert!(matches!(result, Err(MeshError::InvalidParameter { .. })));
    }

    #[test]
    fn test_box_negative_size() {
        let result = create_box(DVec3::new(-5.0, 10.0, 10.0), false);
        assert!(result.is_err());
    }

    #[test]
    fn test_box_validates() {
        let mesh = create_box(DVec3::splat(10.0), false).unwrap();
        assert!(mesh.validate());
    }
}
