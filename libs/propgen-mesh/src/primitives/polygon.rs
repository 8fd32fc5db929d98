//! # Polygon Outlines
//!
//! Flat regular and alternating-radius (star) polygon builders.

use std::f64::consts::PI;

use config::constants::MIN_SEGMENTS;
use glam::DVec3;

use crate::error::MeshError;
use crate::mesh::MeshBuffer;

/// Creates a flat regular N-gon in the z = 0 plane.
///
/// Vertices run counter-clockwise from +X. When `filled` is set the
/// outline carries a single N-gon face, or a triangle fan around a
/// center vertex when `cap_triangulated` is also set; otherwise the
/// buffer holds only the outline vertices (callers bridge or extrude
/// them).
///
/// # Example
///
/// ```rust
/// use propgen_mesh::primitives::create_regular_polygon;
///
/// let hexagon = create_regular_polygon(6, 2.0, true, false).unwrap();
/// assert_eq!(hexagon.vertex_count(), 6);
/// assert_eq!(hexagon.face_count(), 1);
///
/// let fanned = create_regular_polygon(6, 2.0, true, true).unwrap();
/// assert_eq!(fanned.vertex_count(), 7);
/// assert_eq!(fanned.face_count(), 6);
/// ```
pub fn create_regular_polygon(
    segments: u32,
    diameter: f64,
    filled: bool,
    cap_triangulated: bool,
) -> Result<MeshBuffer, MeshError> {
    if segments < MIN_SEGMENTS {
        return Err(MeshError::invalid_parameter(format!(
            "polygon segments must be at least {}: {}",
            MIN_SEGMENTS, segments
        )));
    }
    if diameter <= 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "polygon diameter must be positive: {}",
            diameter
        )));
    }

    let radius = diameter / 2.0;
    let mut mesh = MeshBuffer::with_capacity(segments as usize, 1);
    let ring: Vec<u32> = (0..segments)
        .map(|j| {
            let theta = 2.0 * PI * j as f64 / segments as f64;
            mesh.add_vertex(DVec3::new(radius * theta.cos(), radius * theta.sin(), 0.0))
        })
        .collect();

    if filled {
        if cap_triangulated {
            let center = mesh.add_vertex(DVec3::ZERO);
            for j in 0..segments as usize {
                let j_next = (j + 1) % segments as usize;
                mesh.add_face(&[center, ring[j], ring[j_next]])?;
            }
        } else {
            mesh.add_face(&ring)?;
        }
    }

    Ok(mesh)
}

/// Creates a flat star outline with vertices alternating between two radii.
///
/// Produces `2 * points` vertices around the unit circle: even indices at
/// `outer_radius`, odd indices at `inner_radius`. Both degenerate forms
/// are accepted: equal radii give a regular polygon, a zero inner radius
/// gives zero-width spikes.
///
/// When `filled` is set the outline is capped on both sides with triangle
/// fans around coincident center vertices, giving the closed disc topology
/// downstream solidify/boolean operators expect.
///
/// # Example
///
/// ```rust
/// use propgen_mesh::primitives::create_star_polygon;
///
/// let star = create_star_polygon(5, 1.0, 0.375, false).unwrap();
/// assert_eq!(star.vertex_count(), 10);
/// ```
pub fn create_star_polygon(
    points: u32,
    outer_radius: f64,
    inner_radius: f64,
    filled: bool,
) -> Result<MeshBuffer, MeshError> {
    if points < 2 {
        return Err(MeshError::invalid_parameter(format!(
            "star needs at least 2 points: {}",
            points
        )));
    }
    if outer_radius <= 0.0 {
        return Err(MeshError::invalid_parameter(format!(
            "star outer radius must be positive: {}",
            outer_radius
        )));
    }
    if inner_radius < 0.0 || inner_radius > outer_radius {
        return Err(MeshError::invalid_parameter(format!(
            "star inner radius must lie in [0, outer]: {}",
            inner_radius
        )));
    }

    let count = 2 * points;
    let mut mesh = MeshBuffer::with_capacity(count as usize + 2, 2 * count as usize);
    let ring: Vec<u32> = (0..count)
        .map(|j| {
            let radius = if j % 2 == 0 { outer_radius } else { inner_radius };
            let theta = 2.0 * PI * j as f64 / count as f64;
            mesh.add_vertex(DVec3::new(radius * theta.cos(), radius * theta.sin(), 0.0))
        })
        .collect();

    if filled {
        // Star outlines are star-shaped about the origin, so a center fan
        // fills them correctly even though they are non-convex.
        let top_center = mesh.add_vertex(DVec3::ZERO);
        let bottom_center = mesh.add_vertex(DVec3::ZERO);
        for j in 0..count as usize {
            let j_next = (j + 1) % count as usize;
            mesh.add_face(&[top_center, ring[j], ring[j_next]])?;
            mesh.add_face(&[bottom_center, ring[j_next], ring[j]])?;
        }
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_polygon_outline() {
        let mesh = create_regular_polygon(8, 2.0, false, false).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 0);
        for v in mesh.vertices() {
            assert!((v.length() - 1.0).abs() < 1e-12);
            assert_eq!(v.z, 0.0);
        }
    }

    #[test]
    fn test_regular_polygon_filled() {
        let mesh = create_regular_polygon(5, 2.0, true, false).unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.face(0).len(), 5);
    }

    #[test]
    fn test_regular_polygon_triangulated_cap() {
        let mesh = create_regular_polygon(5, 2.0, true, true).unwrap();
        // Rim plus one center vertex, one triangle per segment
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 5);
        for f in 0..mesh.face_count() {
            assert_eq!(mesh.face(f).len(), 3);
        }
        assert_eq!(mesh.vertex(5), DVec3::ZERO);
        assert!(mesh.validate());
    }

    #[test]
    fn test_regular_polygon_rejects_two_segments() {
        assert!(create_regular_polygon(2, 2.0, true, false).is_err());
    }

    #[test]
    fn test_star_alternating_radii() {
        let mesh = create_star_polygon(5, 1.0, 0.375, false).unwrap();
        assert_eq!(mesh.vertex_count(), 10);
        for (j, v) in mesh.vertices().iter().enumerate() {
            let expected = if j % 2 == 0 { 1.0 } else { 0.375 };
            assert!((v.length() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_star_equal_radii_degenerates_to_polygon() {
        let mesh = create_star_polygon(4, 1.0, 1.0, false).unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        for v in mesh.vertices() {
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_star_zero_inner_radius_accepted() {
        let mesh = create_star_polygon(3, 1.0, 0.0, false).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
    }

    #[test]
    fn test_star_filled_is_closed_disc() {
        let mesh = create_star_polygon(5, 1.0, 0.375, true).unwrap();
        // Capped disc topology: V - E + F == 2
        let v = mesh.vertex_count() as i64;
        let e = mesh.edges().len() as i64;
        let f = mesh.face_count() as i64;
        assert_eq!(v - e + f, 2);
        assert!(mesh.boundary_edges().is_empty());
    }

    #[test]
    fn test_star_rejects_one_point() {
        assert!(create_star_polygon(1, 1.0, 0.5, true).is_err());
    }

    #[test]
    fn test_star_rejects_inner_exceeding_outer() {
        assert!(create_star_polygon(5, 1.0, 1.5, true).is_err());
    }
}
