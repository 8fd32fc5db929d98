//! # Boolean Operations
//!
//! CSG boolean operations (union, difference, intersection) on closed
//! meshes, implemented with BSP trees after csg.js by Evan Wallace.
//!
//! ## Pipeline
//!
//! 1. Check both operands are closed (no boundary edges)
//! 2. Fan-triangulate the polygon faces into BSP polygons
//! 3. Run the csg.js clip sequence on two BSP trees
//! 4. Weld the resulting polygon soup back into an indexed mesh
//!
//! Boolean results are triangle-dominated even when the inputs were
//! quad meshes; splitting along BSP planes does not preserve the
//! original face loops.

pub mod bsp;
pub mod plane;
pub mod polygon;

use glam::DVec3;

use crate::error::MeshError;
use crate::mesh::MeshBuffer;
use config::constants::VERTEX_MERGE_EPSILON;

use bsp::BspNode;
use polygon::Polygon;

// =============================================================================
// OPERATIONS
// =============================================================================

/// Computes the union of two closed meshes.
///
/// # Errors
///
/// Returns [`MeshError::NonManifoldInput`] when either operand is empty
/// or has boundary edges.
pub fn union(a: &MeshBuffer, b: &MeshBuffer) -> Result<MeshBuffer, MeshError> {
    let mut tree_a = BspNode::new(mesh_to_polygons(check_operand(a, "union")?));
    let mut tree_b = BspNode::new(mesh_to_polygons(check_operand(b, "union")?));

    tree_a.clip_to(&tree_b);
    tree_b.clip_to(&tree_a);
    tree_b.invert();
    tree_b.clip_to(&tree_a);
    tree_b.invert();
    tree_a.add_polygons(tree_b.all_polygons());

    Ok(polygons_to_mesh(&tree_a.all_polygons()))
}

/// Computes `a` minus `b` for two closed meshes.
///
/// # Errors
///
/// Returns [`MeshError::NonManifoldInput`] when either operand is empty
/// or has boundary edges.
pub fn difference(a: &MeshBuffer, b: &MeshBuffer) -> Result<MeshBuffer, MeshError> {
    let mut tree_a = BspNode::new(mesh_to_polygons(check_operand(a, "difference")?));
    let mut tree_b = BspNode::new(mesh_to_polygons(check_operand(b, "difference")?));

    tree_a.invert();
    tree_a.clip_to(&tree_b);
    tree_b.clip_to(&tree_a);
    tree_b.invert();
    tree_b.clip_to(&tree_a);
    tree_b.invert();
    tree_a.add_polygons(tree_b.all_polygons());
    tree_a.invert();

    Ok(polygons_to_mesh(&tree_a.all_polygons()))
}

/// Computes the intersection of two closed meshes.
///
/// # Errors
///
/// Returns [`MeshError::NonManifoldInput`] when either operand is empty
/// or has boundary edges.
pub fn intersection(a: &MeshBuffer, b: &MeshBuffer) -> Result<MeshBuffer, MeshError> {
    let mut tree_a = BspNode::new(mesh_to_polygons(check_operand(a, "intersection")?));
    let mut tree_b = BspNode::new(mesh_to_polygons(check_operand(b, "intersection")?));

    tree_a.invert();
    tree_b.clip_to(&tree_a);
    tree_b.invert();
    tree_a.clip_to(&tree_b);
    tree_b.clip_to(&tree_a);
    tree_a.add_polygons(tree_b.all_polygons());
    tree_a.invert();

    Ok(polygons_to_mesh(&tree_a.all_polygons()))
}

// =============================================================================
// MESH CONVERSION
// =============================================================================

fn check_operand<'a>(mesh: &'a MeshBuffer, operation: &str) -> Result<&'a MeshBuffer, MeshError> {
    if mesh.face_count() == 0 {
        return Err(MeshError::non_manifold(format!(
            "{} operand has no faces",
            operation
        )));
    }
    let open = mesh.boundary_edges();
    if !open.is_empty() {
        return Err(MeshError::non_manifold(format!(
            "{} operand is not closed ({} boundary edges)",
            operation,
            open.len()
        )));
    }
    Ok(mesh)
}

/// Fan-triangulates the mesh into BSP polygons.
///
/// Degenerate triangles are dropped; they carry no plane and cannot
/// partition space.
fn mesh_to_polygons(mesh: &MeshBuffer) -> Vec<Polygon> {
    mesh.triangulate()
        .into_iter()
        .filter_map(|[a, b, c]| {
            Polygon::from_vertices(vec![mesh.vertex(a), mesh.vertex(b), mesh.vertex(c)])
        })
        .collect()
}

/// Rebuilds an indexed mesh from a polygon soup.
///
/// Vertices closer than the merge epsilon weld into one, so polygons
/// that share split edges connect instead of leaving hairline cracks.
fn polygons_to_mesh(polygons: &[Polygon]) -> MeshBuffer {
    let mut mesh = MeshBuffer::new();
    let mut positions: Vec<DVec3> = Vec::new();

    let mut index_of = |mesh: &mut MeshBuffer, point: DVec3| -> u32 {
        for (i, &existing) in positions.iter().enumerate() {
            if (existing - point).length() <= VERTEX_MERGE_EPSILON {
                return i as u32;
            }
        }
        positions.push(point);
        mesh.add_vertex(point)
    };

    for poly in polygons {
        let mut face: Vec<u32> = Vec::with_capacity(poly.vertices().len());
        for &v in poly.vertices() {
            let idx = index_of(&mut mesh, v);
            if !face.contains(&idx) {
                face.push(idx);
            }
        }
        if face.len() >= 3 {
            // Indices are distinct and in range, so this cannot fail
            let _ = mesh.add_face(&face);
        }
    }

    mesh
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{create_box, create_cylinder};

    fn signed_volume(mesh: &MeshBuffer) -> f64 {
        let mut volume = 0.0;
        for [a, b, c] in mesh.triangulate() {
            let (a, b, c) = (mesh.vertex(a), mesh.vertex(b), mesh.vertex(c));
            volume += a.dot(b.cross(c)) / 6.0;
        }
        volume
    }

    fn shifted_box(size: f64, offset: DVec3) -> MeshBuffer {
        let mut mesh = create_box(DVec3::splat(size), true).unwrap();
        mesh.translate(offset);
        mesh
    }

    #[test]
    fn test_union_disjoint_keeps_both() {
        let a = shifted_box(1.0, DVec3::ZERO);
        let b = shifted_box(1.0, DVec3::new(5.0, 0.0, 0.0));
        let result = union(&a, &b).unwrap();
        assert!((signed_volume(&result) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_difference_removes_overlap() {
        // Cut the +x half off a unit cube
        let a = shifted_box(1.0, DVec3::ZERO);
        let b = shifted_box(1.0, DVec3::new(0.5, 0.0, 0.0));
        let result = difference(&a, &b).unwrap();
        assert!((signed_volume(&result) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_difference_disjoint_is_identity_volume() {
        let a = shifted_box(1.0, DVec3::ZERO);
        let b = shifted_box(1.0, DVec3::new(5.0, 0.0, 0.0));
        let result = difference(&a, &b).unwrap();
        assert!((signed_volume(&result) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_difference_punches_hole() {
        let slab = create_box(DVec3::new(4.0, 4.0, 1.0), true).unwrap();
        let drill = create_cylinder(16, 1.0, 1.0, 3.0, true).unwrap();
        let result = difference(&slab, &drill).unwrap();

        let slab_volume = signed_volume(&slab);
        let drilled = signed_volume(&result);
        assert!(drilled < slab_volume);
        assert!(drilled > slab_volume - 1.0);
    }

    #[test]
    fn test_intersection_of_offset_cubes() {
        let a = shifted_box(1.0, DVec3::ZERO);
        let b = shifted_box(1.0, DVec3::new(0.5, 0.0, 0.0));
        let result = intersection(&a, &b).unwrap();
        assert!((signed_volume(&result) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_boolean_rejects_open_mesh() {
        let closed = shifted_box(1.0, DVec3::ZERO);
        let open = create_cylinder(8, 1.0, 1.0, 1.0, false).unwrap();
        assert!(matches!(
            difference(&closed, &open),
            Err(MeshError::NonManifoldInput { .. })
        ));
        assert!(matches!(
            difference(&open, &closed),
            Err(MeshError::NonManifoldInput { .. })
        ));
    }

    #[test]
    fn test_boolean_rejects_empty_mesh() {
        let closed = shifted_box(1.0, DVec3::ZERO);
        let empty = MeshBuffer::new();
        assert!(union(&closed, &empty).is_err());
    }
}
