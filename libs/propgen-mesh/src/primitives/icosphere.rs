//! # Icosphere Primitive
//!
//! Subdivided icosahedron, used for rock-like blobs.

use std::collections::HashMap;

use glam::DVec3;

use crate::error::MeshError;
use crate::mesh::MeshBuffer;

/// Creates an icosphere mesh.
///
/// `subdivisions = 1` yields the base icosahedron (12 vertices, 20
/// triangles); each further level splits every triangle in four and
/// projects the new vertices back onto the sphere.
///
/// # Arguments
///
/// * `subdivisions` - Subdivision level (>= 1)
/// * `diameter` - Sphere diameter
///
/// # Example
///
/// ```rust
/// use propgen_mesh::primitives::create_icosphere;
///
/// let mesh = create_icosphere(1, 2.0).unwrap();
/// assert_eq!(mesh.vertex_count(), 12);
/// assert_eq!(mesh.face_count(), 20);
/// ```
pub fn create_icosphere(subdivisions: u32, diameter: f64) -> Result<MeshBuffer, MeshError> {
    if subdivisions < 1 {
        return Err(MeshError::invalid_parameter(format!(
            "icosphere subdivisions must be at least 1: {}",
            subdivisions
        )));
    }
    if diameter <= 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "icosphere diameter must be positive: {}",
            diameter
        )));
    }

    let radius = diameter / 2.0;

    // Icosahedron from three orthogonal golden rectangles
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let mut positions = vec![
        DVec3::new(-1.0, phi, 0.0),
        DVec3::new(1.0, phi, 0.0),
        DVec3::new(-1.0, -phi, 0.0),
        DVec3::new(1.0, -phi, 0.0),
        DVec3::new(0.0, -1.0, phi),
        DVec3::new(0.0, 1.0, phi),
        DVec3::new(0.0, -1.0, -phi),
        DVec3::new(0.0, 1.0, -phi),
        DVec3::new(phi, 0.0, -1.0),
        DVec3::new(phi, 0.0, 1.0),
        DVec3::new(-phi, 0.0, -1.0),
        DVec3::new(-phi, 0.0, 1.0),
    ];
    for p in &mut positions {
        *p = p.normalize();
    }

    let mut triangles: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for _ in 1..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next = Vec::with_capacity(triangles.len() * 4);

        for tri in &triangles {
            let mid = |a: u32, b: u32, positions: &mut Vec<DVec3>, cache: &mut HashMap<(u32, u32), u32>| {
                let key = if a < b { (a, b) } else { (b, a) };
                *cache.entry(key).or_insert_with(|| {
                    let m = (positions[a as usize] + positions[b as usize]).normalize();
                    positions.push(m);
                    positions.len() as u32 - 1
                })
            };

            let ab = mid(tri[0], tri[1], &mut positions, &mut midpoints);
            let bc = mid(tri[1], tri[2], &mut positions, &mut midpoints);
            let ca = mid(tri[2], tri[0], &mut positions, &mut midpoints);

            next.push([tri[0], ab, ca]);
            next.push([tri[1], bc, ab]);
            next.push([tri[2], ca, bc]);
            next.push([ab, bc, ca]);
        }

        triangles = next;
    }

    let mut mesh = MeshBuffer::with_capacity(positions.len(), triangles.len());
    for p in positions {
        mesh.add_vertex(p * radius);
    }
    for tri in triangles {
        mesh.add_face(&tri)?;
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosahedron_counts() {
        let mesh = create_icosphere(1, 2.0).unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 20);
        assert!(mesh.validate());
    }

    #[test]
    fn test_icosphere_subdivided_counts() {
        let mesh = create_icosphere(2, 2.0).unwrap();
        assert_eq!(mesh.vertex_count(), 42);
        assert_eq!(mesh.face_count(), 80);
    }

    #[test]
    fn test_icosphere_vertices_on_sphere() {
        let mesh = create_icosphere(3, 2.0).unwrap();
        for v in mesh.vertices() {
            assert!((v.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_icosphere_closed() {
        let mesh = create_icosphere(2, 2.0).unwrap();
        assert!(mesh.boundary_edges().is_empty());
    }

    #[test]
    fn test_icosphere_invalid_params() {
        assert!(create_icosphere(0, 2.0).is_err());
        assert!(create_icosphere(1, 0.0).is_err());
    }
}
