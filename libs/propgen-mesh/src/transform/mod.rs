//! # Transform Operators
//!
//! Coordinate mutations on explicit vertex subsets: translate, scale about
//! a point, rotate about an arbitrary center/axis, Euler rotation, mirror,
//! point-merge, and final placement baking.
//!
//! Whole-mesh convenience variants live on [`MeshBuffer`] itself; these
//! operators exist because the builder recipes keep transforming "the
//! vertices returned by the previous step" rather than whole objects.

use glam::{DQuat, DVec3};

use crate::mesh::MeshBuffer;

/// Axis selector for mirroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Returns every vertex index of the mesh, for operators that default to
/// the full vertex set.
pub fn all_vertices(mesh: &MeshBuffer) -> Vec<u32> {
    (0..mesh.vertex_count() as u32).collect()
}

/// Translates a vertex subset by an offset.
pub fn translate_set(mesh: &mut MeshBuffer, verts: &[u32], offset: DVec3) {
    for &idx in verts {
        let v = mesh.vertex(idx);
        mesh.set_vertex(idx, v + offset);
    }
}

/// Scales a vertex subset about a center point with per-axis factors.
pub fn scale_set(mesh: &mut MeshBuffer, verts: &[u32], factors: DVec3, center: DVec3) {
    for &idx in verts {
        let v = mesh.vertex(idx);
        mesh.set_vertex(idx, center + (v - center) * factors);
    }
}

/// Rotates a vertex subset about an arbitrary center and axis.
///
/// `axis` need not be unit length; zero axes leave the set unchanged.
pub fn rotate_set(mesh: &mut MeshBuffer, verts: &[u32], center: DVec3, axis: DVec3, angle: f64) {
    if axis.length_squared() == 0.0 {
        return;
    }
    let rotation = DQuat::from_axis_angle(axis.normalize(), angle);
    for &idx in verts {
        let v = mesh.vertex(idx);
        mesh.set_vertex(idx, center + rotation * (v - center));
    }
}

/// Rotates a vertex subset by Euler angles, applied X then Y then Z.
pub fn rotate_euler_set(mesh: &mut MeshBuffer, verts: &[u32], center: DVec3, euler: DVec3) {
    rotate_set(mesh, verts, center, DVec3::X, euler.x);
    rotate_set(mesh, verts, center, DVec3::Y, euler.y);
    rotate_set(mesh, verts, center, DVec3::Z, euler.z);
}

/// Mirrors the whole mesh across one axis plane through the origin.
///
/// Negating a coordinate flips handedness, so every face winding is
/// reversed to keep normals outward.
pub fn mirror_axis(mesh: &mut MeshBuffer, axis: Axis) {
    let factors = match axis {
        Axis::X => DVec3::new(-1.0, 1.0, 1.0),
        Axis::Y => DVec3::new(1.0, -1.0, 1.0),
        Axis::Z => DVec3::new(1.0, 1.0, -1.0),
    };
    let verts = all_vertices(mesh);
    scale_set(mesh, &verts, factors, DVec3::ZERO);
    mesh.reverse_windings();
}

/// Collapses a vertex subset to a single coordinate.
///
/// Faces referencing the set stay in place and become degenerate where
/// they collapse; pass `remove_degenerate` to drop the zero-area ones.
/// Used to taper an extruded tube into a point.
pub fn point_merge(mesh: &mut MeshBuffer, verts: &[u32], target: DVec3, remove_degenerate: bool) {
    for &idx in verts {
        mesh.set_vertex(idx, target);
    }
    if remove_degenerate {
        mesh.remove_degenerate_faces();
    }
}

/// Bakes the final placement into the vertex coordinates.
///
/// Applies the Euler rotation (X then Y then Z, about the origin) and then
/// the translation. Builders call this once, after all bevel/boolean work,
/// because those operators assume the canonical unplaced frame.
pub fn bake_placement(mesh: &mut MeshBuffer, location: DVec3, rotation: DVec3) {
    let verts = all_vertices(mesh);
    rotate_euler_set(mesh, &verts, DVec3::ZERO, rotation);
    mesh.translate(location);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn triangle() -> MeshBuffer {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::ZERO);
        mesh.add_vertex(DVec3::X);
        mesh.add_vertex(DVec3::Y);
        mesh.add_face(&[0, 1, 2]).unwrap();
        mesh
    }

    #[test]
    fn test_translate_subset_only() {
        let mut mesh = triangle();
        translate_set(&mut mesh, &[1], DVec3::new(0.0, 0.0, 5.0));
        assert_eq!(mesh.vertex(0), DVec3::ZERO);
        assert_eq!(mesh.vertex(1), DVec3::new(1.0, 0.0, 5.0));
    }

    #[test]
    fn test_scale_about_center() {
        let mut mesh = triangle();
        let verts = all_vertices(&mesh);
        scale_set(&mut mesh, &verts, DVec3::splat(2.0), DVec3::X);
        assert_eq!(mesh.vertex(1), DVec3::X); // center is fixed
        assert_eq!(mesh.vertex(0), DVec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotate_about_axis() {
        let mut mesh = triangle();
        rotate_set(&mut mesh, &[1], DVec3::ZERO, DVec3::Z, FRAC_PI_2);
        let v = mesh.vertex(1);
        assert!((v - DVec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_rotate_euler_order_xyz() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::Y);
        // X by 90° sends Y to Z; then Z by 90° leaves Z fixed.
        rotate_euler_set(
            &mut mesh,
            &[0],
            DVec3::ZERO,
            DVec3::new(FRAC_PI_2, 0.0, FRAC_PI_2),
        );
        assert!((mesh.vertex(0) - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_mirror_reverses_windings() {
        let mut mesh = triangle();
        let normal_before = mesh.face_normal(0);
        mirror_axis(&mut mesh, Axis::X);
        let normal_after = mesh.face_normal(0);
        // Mirroring across X flips x coordinates; the +Z normal must stay +Z
        assert!((normal_before - normal_after).length() < 1e-12);
        assert_eq!(mesh.vertex(1), DVec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_point_merge_keeps_faces_by_default() {
        let mut mesh = triangle();
        point_merge(&mut mesh, &[1, 2], DVec3::Z, false);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertex(1), DVec3::Z);
        assert_eq!(mesh.vertex(2), DVec3::Z);
    }

    #[test]
    fn test_point_merge_removes_degenerate_faces() {
        let mut mesh = triangle();
        point_merge(&mut mesh, &[0, 1, 2], DVec3::Z, true);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_bake_placement() {
        let mut mesh = MeshBuffer::new();
        mesh.add_vertex(DVec3::X);
        bake_placement(
            &mut mesh,
            DVec3::new(0.0, 0.0, 10.0),
            DVec3::new(0.0, 0.0, FRAC_PI_2),
        );
        assert!((mesh.vertex(0) - DVec3::new(0.0, 1.0, 10.0)).length() < 1e-12);
    }
}
