//! # Cylinder Primitive
//!
//! Generates cylinder, frustum, and cone meshes, degenerating to a flat
//! disc at zero depth.

use std::f64::consts::PI;

use config::constants::{EPSILON, MIN_SEGMENTS};
use glam::DVec3;

use crate::error::MeshError;
use crate::mesh::MeshBuffer;

/// Creates a cylinder, frustum, or cone mesh along the local Z axis.
///
/// The body spans `-depth/2` to `+depth/2`. `diameter1` is the bottom
/// circle, `diameter2` the top. A zero diameter collapses that end to a
/// single apex vertex. When `depth` is effectively zero and `cap_ends` is
/// set, the result degenerates to a flat capped disc. Every segment count
/// goes through the same path; 4 segments is just a square prism.
///
/// # Arguments
///
/// * `segments` - Number of segments around the circumference (>= 3)
/// * `diameter1` - Bottom circle diameter
/// * `diameter2` - Top circle diameter
/// * `depth` - Extent along Z
/// * `cap_ends` - If true, fill the end circles with N-gon caps
///
/// # Example
///
/// ```rust
/// use propgen_mesh::primitives::create_cylinder;
///
/// // Capped cylinder: 2N vertices, N sides + 2 caps
/// let mesh = create_cylinder(16, 2.0, 2.0, 5.0, true).unwrap();
/// assert_eq!(mesh.vertex_count(), 32);
/// assert_eq!(mesh.face_count(), 18);
///
/// // Cone
/// let cone = create_cylinder(16, 2.0, 0.0, 5.0, false).unwrap();
/// assert_eq!(cone.vertex_count(), 17);
/// ```
pub fn create_cylinder(
    segments: u32,
    diameter1: f64,
    diameter2: f64,
    depth: f64,
    cap_ends: bool,
) -> Result<MeshBuffer, MeshError> {
    if segments < MIN_SEGMENTS {
        return Err(MeshError::invalid_parameter(format!(
            "cylinder segments must be at least {}: {}",
            MIN_SEGMENTS, segments
        )));
    }

    if diameter1 < 0.0 || diameter2 < 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "cylinder diameters must be non-negative: d1={}, d2={}",
            diameter1, diameter2
        )));
    }

    if diameter1 <= EPSILON && diameter2 <= EPSILON {
        return Err(MeshError::invalid_parameter(
            "cylinder must have at least one non-zero diameter",
        ));
    }

    if depth < 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "cylinder depth must be non-negative: {}",
            depth
        )));
    }

    let radius1 = diameter1 / 2.0;
    let radius2 = diameter2 / 2.0;

    // Flat disc degeneration
    if depth <= EPSILON {
        if !cap_ends {
            return Err(MeshError::invalid_parameter(
                "zero-depth cylinder without caps encloses nothing",
            ));
        }
        let radius = radius1.max(radius2);
        let mut mesh = MeshBuffer::with_capacity(segments as usize, 1);
        let ring = add_circle(&mut mesh, radius, 0.0, segments);
        mesh.add_face(&ring)?;
        return Ok(mesh);
    }

    let z_bottom = -depth / 2.0;
    let z_top = depth / 2.0;

    let mut mesh = MeshBuffer::new();

    let bottom: Vec<u32> = if radius1 > EPSILON {
        add_circle(&mut mesh, radius1, z_bottom, segments)
    } else {
        vec![mesh.add_vertex(DVec3::new(0.0, 0.0, z_bottom))]
    };

    let top: Vec<u32> = if radius2 > EPSILON {
        add_circle(&mut mesh, radius2, z_top, segments)
    } else {
        vec![mesh.add_vertex(DVec3::new(0.0, 0.0, z_top))]
    };

    // Side faces
    if bottom.len() > 1 && top.len() > 1 {
        // Frustum: one quad per segment
        for j in 0..segments as usize {
            let j_next = (j + 1) % segments as usize;
            mesh.add_face(&[bottom[j], bottom[j_next], top[j_next], top[j]])?;
        }
    } else if bottom.len() > 1 {
        // Cone with apex on top
        let apex = top[0];
        for j in 0..segments as usize {
            let j_next = (j + 1) % segments as usize;
            mesh.add_face(&[bottom[j], bottom[j_next], apex])?;
        }
    } else {
        // Inverted cone with apex on the bottom
        let apex = bottom[0];
        for j in 0..segments as usize {
            let j_next = (j + 1) % segments as usize;
            mesh.add_face(&[apex, top[j_next], top[j]])?;
        }
    }

    if cap_ends {
        if bottom.len() > 1 {
            let reversed: Vec<u32> = bottom.iter().rev().copied().collect();
            mesh.add_face(&reversed)?;
        }
        if top.len() > 1 {
            mesh.add_face(&top)?;
        }
    }

    Ok(mesh)
}

/// Adds one ring of `segments` vertices at height `z`, CCW from +X.
fn add_circle(mesh: &mut MeshBuffer, radius: f64, z: f64, segments: u32) -> Vec<u32> {
    (0..segments)
        .map(|j| {
            let theta = 2.0 * PI * j as f64 / segments as f64;
            mesh.add_vertex(DVec3::new(radius * theta.cos(), radius * theta.sin(), z))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_capped_counts() {
        let mesh = create_cylinder(12, 2.0, 2.0, 4.0, true).unwrap();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.face_count(), 14); // 12 sides + 2 caps
        assert!(mesh.validate());
    }

    #[test]
    fn test_cylinder_uncapped_counts() {
        let mesh = create_cylinder(12, 2.0, 2.0, 4.0, false).unwrap();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.face_count(), 12);
    }

    #[test]
    fn test_cylinder_centered_on_z() {
        let mesh = create_cylinder(8, 2.0, 2.0, 4.0, true).unwrap();
        let (min, max) = mesh.bounding_box();
        assert!((min.z + 2.0).abs() < 1e-12);
        assert!((max.z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_cone_apex() {
        let mesh = create_cylinder(8, 2.0, 0.0, 4.0, true).unwrap();
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.face_count(), 9); // 8 sides + bottom cap
    }

    #[test]
    fn test_inverted_cone() {
        let mesh = create_cylinder(8, 0.0, 2.0, 4.0, false).unwrap();
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.face_count(), 8);
        assert!(mesh.validate());
    }

    #[test]
    fn test_flat_disc() {
        let mesh = create_cylinder(8, 2.0, 2.0, 0.0, true).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_flat_disc_uncapped_rejected() {
        let result = create_cylinder(8, 2.0, 2.0, 0.0, false);
        assert!(result.is_err());
    }

    #[test]
    fn test_square_prism_no_special_case() {
        // 4 segments is an ordinary prism, not a box special case
        let mesh = create_cylinder(4, 2.0, 2.0, 1.0, true).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);
        // First vertex sits on +X at the bottom ring
        assert!((mesh.vertex(0) - DVec3::new(1.0, 0.0, -0.5)).length() < 1e-12);
    }

    #[test]
    fn test_cylinder_too_few_segments() {
        let result = create_cylinder(2, 2.0, 2.0, 4.0, true);
        assert!(matches!(result, Err(MeshError::InvalidParameter { .. })));
    }

    #[test]
    fn test_cylinder_negative_diameter() {
        let result = create_cylinder(8, -1.0, 2.0, 4.0, true);
        assert!(result.is_err());
    }

    #[test]
    fn test_cylinder_both_diameters_zero() {
        let result = create_cylinder(8, 0.0, 0.0, 4.0, true);
        assert!(result.is_err());
    }
}
