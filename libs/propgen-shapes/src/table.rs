//! # Table
//!
//! A table top with a configurable ring of legs. Top and legs are N-gon
//! prisms with their flat sides tangent to the footprint, so four
//! segments give a rectangular top and square legs. Legs reach from the
//! ground to the underside of the top.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use propgen_mesh::primitives::create_cylinder;
use propgen_mesh::transform::{all_vertices, rotate_set, scale_set};
use propgen_mesh::{MeshBuffer, MeshError};

use crate::placement::Placement;

/// Table parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableParams {
    /// Top length along X (min 1.0)
    pub length: f64,
    /// Top width along Y (min 1.0)
    pub width: f64,
    /// Height of the top surface off the ground (min 0.01)
    pub height: f64,
    /// Top slab thickness (min 0.01)
    pub thickness: f64,
    /// Segments of the top disc; 4 means a rectangular top (min 4)
    pub top_segments: u32,
    /// Number of legs (0 for a floating slab)
    pub legs: u32,
    /// Segments per leg; 4 means square legs (min 3)
    pub leg_segments: u32,
    /// Leg cross-section size (min 0.01)
    pub leg_thickness: f64,
    /// Diameter of the leg ring before scaling by length/width
    pub leg_offset: f64,
    /// Final rigid placement
    pub placement: Placement,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            length: 1.0,
            width: 1.0,
            height: 1.0,
            thickness: 0.025,
            top_segments: 4,
            legs: 4,
            leg_segments: 4,
            leg_thickness: 0.075,
            leg_offset: 0.75,
            placement: Placement::default(),
        }
    }
}

impl TableParams {
    fn validate(&self) -> Result<(), MeshError> {
        if self.length < 1.0 || self.width < 1.0 {
            return Err(MeshError::invalid_parameter(format!(
                "table top must be at least 1.0 x 1.0, got {} x {}",
                self.length, self.width
            )));
        }
        if self.height < 0.01 {
            return Err(MeshError::invalid_parameter(format!(
                "table height must be at least 0.01, got {}",
                self.height
            )));
        }
        if self.thickness < 0.01 || self.leg_thickness < 0.01 {
            return Err(MeshError::invalid_parameter(
                "top and leg thickness must be at least 0.01",
            ));
        }
        if self.top_segments < 4 {
            return Err(MeshError::invalid_parameter(format!(
                "top needs at least 4 segments, got {}",
                self.top_segments
            )));
        }
        if self.leg_segments < 3 {
            return Err(MeshError::invalid_parameter(format!(
                "legs need at least 3 segments, got {}",
                self.leg_segments
            )));
        }
        if self.leg_offset < 0.0 {
            return Err(MeshError::invalid_parameter(format!(
                "leg offset must be non-negative, got {}",
                self.leg_offset
            )));
        }
        Ok(())
    }
}

/// Unit-height N-gon prism whose flat sides are tangent to the unit
/// footprint: the ring is circumscribed to apothem 0.5 and rotated half
/// a step, which puts four segments on the unit-box corners.
fn unit_slab(segments: u32) -> Result<MeshBuffer, MeshError> {
    let half_step = std::f64::consts::PI / f64::from(segments);
    let diameter = 1.0 / half_step.cos();
    let mut mesh = create_cylinder(segments, diameter, diameter, 1.0, true)?;
    let verts = all_vertices(&mesh);
    rotate_set(&mut mesh, &verts, DVec3::ZERO, DVec3::Z, half_step);
    Ok(mesh)
}

/// Ring of leg centres at the top-to-ground midpoint height.
fn leg_centres(params: &TableParams) -> Vec<DVec3> {
    let offset = params.leg_offset / 2.0;
    let z = params.height / 2.0 - params.thickness / 2.0;

    let first = match params.legs {
        1 => DVec3::new(0.0, 0.0, z),
        4 => DVec3::new(offset, offset, z),
        _ => DVec3::new(offset, 0.0, z),
    };

    let step = std::f64::consts::TAU / f64::from(params.legs);
    let mut centres = Vec::with_capacity(params.legs as usize);
    for i in 0..params.legs {
        let angle = step * f64::from(i);
        let (sin, cos) = angle.sin_cos();
        let rotated = DVec3::new(
            first.x * cos - first.y * sin,
            first.x * sin + first.y * cos,
            first.z,
        );
        // Leg ring stretches with the top
        centres.push(DVec3::new(
            rotated.x * params.length,
            rotated.y * params.width,
            rotated.z,
        ));
    }
    centres
}

/// Builds a table.
///
/// The top surface sits at `z == height`; legs touch `z == 0`.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] when any field is below its
/// documented minimum.
pub fn build_table(params: &TableParams) -> Result<MeshBuffer, MeshError> {
    params.validate()?;

    let mut mesh = unit_slab(params.top_segments)?;
    let verts = all_vertices(&mesh);
    scale_set(
        &mut mesh,
        &verts,
        DVec3::new(params.length, params.width, params.thickness),
        DVec3::ZERO,
    );
    mesh.translate(DVec3::new(
        0.0,
        0.0,
        params.height - params.thickness / 2.0,
    ));

    if params.legs > 0 {
        let leg_height = params.height - params.thickness;
        for centre in leg_centres(params) {
            let mut leg = unit_slab(params.leg_segments)?;
            let leg_verts = all_vertices(&leg);
            scale_set(
                &mut leg,
                &leg_verts,
                DVec3::new(params.leg_thickness, params.leg_thickness, leg_height),
                DVec3::ZERO,
            );
            leg.translate(centre);
            mesh.append(&leg);
        }
    }

    params.placement.apply(&mut mesh);
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_table_default_counts() {
        let table = build_table(&TableParams::default()).unwrap();
        // Rectangular top plus four square legs, all 4-gon prisms
        assert_eq!(table.vertex_count(), 8 * 5);
        assert_eq!(table.face_count(), 6 * 5);
        assert!(table.validate());
    }

    #[test]
    fn test_table_square_top_on_rectangle_corners() {
        // Four segments run through the same prism path as any other
        // count; the half-step rotation puts them on the box corners
        let params = TableParams::default();
        let table = build_table(&params).unwrap();
        let corner = DVec3::new(params.length / 2.0, params.width / 2.0, params.height);
        assert!(table.vertices().iter().any(|v| (*v - corner).length() < 1e-9));
        let (min, max) = table.bounding_box();
        assert_relative_eq!(max.x - min.x, params.length, epsilon = 1e-9);
        assert_relative_eq!(max.y - min.y, params.width, epsilon = 1e-9);
    }

    #[test]
    fn test_table_top_at_height_and_legs_on_ground() {
        let params = TableParams::default();
        let table = build_table(&params).unwrap();
        let (min, max) = table.bounding_box();
        assert_relative_eq!(max.z, params.height, epsilon = 1e-12);
        assert_relative_eq!(min.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_table_round_top_and_legs() {
        let params = TableParams {
            top_segments: 12,
            legs: 3,
            leg_segments: 8,
            ..TableParams::default()
        };
        let table = build_table(&params).unwrap();
        assert_eq!(table.vertex_count(), 24 + 3 * 16);
        assert_eq!(table.face_count(), 14 + 3 * 10);
    }

    #[test]
    fn test_table_single_leg_centred() {
        let params = TableParams {
            legs: 1,
            leg_segments: 8,
            ..TableParams::default()
        };
        let centres = leg_centres(&params);
        assert_eq!(centres.len(), 1);
        assert_relative_eq!(centres[0].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(centres[0].y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_table_legless() {
        let params = TableParams {
            legs: 0,
            ..TableParams::default()
        };
        let table = build_table(&params).unwrap();
        assert_eq!(table.face_count(), 6);
    }

    #[test]
    fn test_table_determinism() {
        let params = TableParams::default();
        let a = build_table(&params).unwrap();
        let b = build_table(&params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_table_rejects_small_top() {
        let params = TableParams {
            length: 0.5,
            ..TableParams::default()
        };
        assert!(matches!(
            build_table(&params),
            Err(MeshError::InvalidParameter { .. })
        ));
    }
}
